//! At-risk cohort selection.
//!
//! A fixed fraction of still-active customers is flagged "at risk": they
//! never churn, but the billing, usage, and ticket stages inject the same
//! leading-indicator signals a churner shows. Churners are never members,
//! so the churn and at-risk cohorts are disjoint by construction.

use crate::config::DatasetConfig;
use crate::rng::StreamRng;
use crate::subscription_generator::SubscriptionRecord;
use crate::types::{CustomerId, SubscriptionStatus};
use std::collections::BTreeSet;

/// Sample `at_risk_share` of active customers without replacement.
/// Partial Fisher-Yates over the active id list keeps the draw count
/// proportional to the cohort size.
pub fn select(
    config: &DatasetConfig,
    subscriptions: &[SubscriptionRecord],
    rng: &mut StreamRng,
) -> BTreeSet<CustomerId> {
    let mut active: Vec<CustomerId> = subscriptions
        .iter()
        .filter(|sub| sub.status == SubscriptionStatus::Active)
        .map(|sub| sub.customer_id)
        .collect();

    let cohort_size = (active.len() as f64 * config.at_risk_share) as usize;
    for i in 0..cohort_size {
        let j = i + rng.next_u64_below((active.len() - i) as u64) as usize;
        active.swap(i, j);
    }

    active.into_iter().take(cohort_size).collect()
}
