//! End-to-end population scenario at the full default scale:
//! 2000 customers, one subscription each, coherent lifecycle dates,
//! and disjoint churn / at-risk cohorts.

use saasgen_core::types::{CustomerId, SubscriptionStatus};
use saasgen_core::{pipeline, DatasetConfig};
use std::collections::BTreeSet;

#[test]
fn full_scale_population_is_coherent() {
    let config = DatasetConfig::default();
    let dataset = pipeline::generate(&config).expect("pipeline run");

    // Exactly 2000 unique customer ids, 1..=2000.
    assert_eq!(dataset.customers.len(), 2000);
    let ids: BTreeSet<CustomerId> = dataset.customers.iter().map(|c| c.customer_id).collect();
    assert_eq!(ids.len(), 2000);
    assert_eq!(ids.first(), Some(&1));
    assert_eq!(ids.last(), Some(&2000));

    // Exactly one subscription per customer, same id space.
    assert_eq!(dataset.subscriptions.len(), 2000);
    let sub_customers: BTreeSet<CustomerId> = dataset
        .subscriptions
        .iter()
        .map(|s| s.customer_id)
        .collect();
    assert_eq!(sub_customers, ids);

    for sub in &dataset.subscriptions {
        match sub.status {
            SubscriptionStatus::Canceled => {
                let end = sub.end_date.expect("canceled subscription must have end_date");
                assert!(
                    (end - sub.start_date).num_days() >= config.min_subscription_days,
                    "subscription {} lived under {} days",
                    sub.subscription_id,
                    config.min_subscription_days
                );
                assert!(end <= config.end_date);
            }
            SubscriptionStatus::Active => {
                assert!(sub.end_date.is_none(), "active subscription carries an end_date");
            }
        }
        assert!(sub.start_date <= config.end_date);
    }
}

#[test]
fn at_risk_cohort_excludes_every_churner() {
    let config = DatasetConfig::default();
    let dataset = pipeline::generate(&config).expect("pipeline run");

    let churned: BTreeSet<CustomerId> = dataset
        .subscriptions
        .iter()
        .filter(|s| s.status == SubscriptionStatus::Canceled)
        .map(|s| s.customer_id)
        .collect();

    assert!(dataset.at_risk.is_disjoint(&churned));
    assert!(!dataset.at_risk.is_empty(), "10% of actives should be flagged");

    let active_count = 2000 - churned.len();
    assert_eq!(dataset.at_risk.len(), active_count / 10);
}

#[test]
fn churn_rate_is_near_the_configured_probability() {
    let config = DatasetConfig::default();
    let dataset = pipeline::generate(&config).expect("pipeline run");

    let churned = dataset
        .subscriptions
        .iter()
        .filter(|s| s.status == SubscriptionStatus::Canceled)
        .count();
    let rate = churned as f64 / 2000.0;
    // Bernoulli(0.45) over 2000 draws; ±5 percentage points is ~4.5 sigma.
    assert!(
        (0.40..=0.50).contains(&rate),
        "churn rate {rate:.3} is implausibly far from 0.45"
    );
}
