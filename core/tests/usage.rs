//! Usage invariants: non-negative counts, windows clipped to the
//! subscription span, and visible decay in the trailing window for
//! churners and at-risk actives.

use chrono::Duration;
use saasgen_core::usage_generator::UsageRecord;
use saasgen_core::{pipeline, DatasetConfig};
use std::collections::HashMap;

#[test]
fn counts_are_non_negative_and_windows_are_clipped() {
    let config = DatasetConfig::default_test();
    let dataset = pipeline::generate(&config).expect("pipeline run");

    let subs: HashMap<_, _> = dataset
        .subscriptions
        .iter()
        .map(|s| (s.customer_id, s))
        .collect();

    assert!(!dataset.usage.is_empty());
    for row in &dataset.usage {
        assert!(row.active_users >= 0);
        assert!(row.sessions >= 0);
        assert!(row.core_feature_events >= 0);

        let sub = subs[&row.customer_id];
        let window_end = sub.effective_end(config.end_date).min(config.end_date);
        let window_start =
            (window_end - Duration::days(config.usage_days - 1)).max(sub.start_date);
        assert!(
            row.usage_date >= window_start && row.usage_date <= window_end,
            "customer {} usage on {} outside {window_start}..{window_end}",
            row.customer_id,
            row.usage_date
        );
    }
}

#[test]
fn every_customer_gets_one_row_per_window_day() {
    let config = DatasetConfig::default_test();
    let dataset = pipeline::generate(&config).expect("pipeline run");

    let mut rows_per_customer: HashMap<i64, i64> = HashMap::new();
    for row in &dataset.usage {
        *rows_per_customer.entry(row.customer_id).or_default() += 1;
    }

    for sub in &dataset.subscriptions {
        let window_end = sub.effective_end(config.end_date).min(config.end_date);
        let window_start =
            (window_end - Duration::days(config.usage_days - 1)).max(sub.start_date);
        let expected = (window_end - window_start).num_days() + 1;
        assert_eq!(
            rows_per_customer.get(&sub.customer_id).copied().unwrap_or(0),
            expected,
            "customer {} window length mismatch",
            sub.customer_id
        );
    }
}

/// Mean daily activity in the trailing decay window vs the rest of the
/// window. Only customers with a decent seat count and enough days
/// outside the window are sampled, so the multiplicative decay
/// (≥ 35% for churners, ≥ 20% for at-risk) dominates the ±15% noise.
fn mean_split(rows: &[&UsageRecord], boundary: chrono::NaiveDate) -> Option<(f64, f64)> {
    let (inside, outside): (Vec<_>, Vec<_>) = rows.iter().partition(|r| r.usage_date >= boundary);
    if inside.len() < 20 || outside.len() < 60 {
        return None;
    }
    let mean = |rows: &[&&UsageRecord]| {
        rows.iter().map(|r| r.active_users as f64).sum::<f64>() / rows.len() as f64
    };
    Some((mean(&inside), mean(&outside)))
}

#[test]
fn churners_show_decay_in_the_final_thirty_days() {
    let config = DatasetConfig::default();
    let dataset = pipeline::generate(&config).expect("pipeline run");

    let mut rows_by_customer: HashMap<i64, Vec<&UsageRecord>> = HashMap::new();
    for row in &dataset.usage {
        rows_by_customer.entry(row.customer_id).or_default().push(row);
    }

    let mut checked = 0;
    for sub in &dataset.subscriptions {
        let Some(end) = sub.end_date else { continue };
        if sub.seats < 20 {
            continue;
        }
        let Some(rows) = rows_by_customer.get(&sub.customer_id) else { continue };
        let boundary = end - Duration::days(config.drop_window_days);
        let Some((decayed, baseline)) = mean_split(rows, boundary) else { continue };
        assert!(
            decayed < baseline,
            "customer {}: decayed mean {decayed:.1} not below baseline {baseline:.1}",
            sub.customer_id
        );
        checked += 1;
    }
    assert!(checked > 50, "only {checked} churners were comparable");
}

#[test]
fn at_risk_actives_show_decay_at_the_window_end() {
    let config = DatasetConfig::default();
    let dataset = pipeline::generate(&config).expect("pipeline run");

    let mut rows_by_customer: HashMap<i64, Vec<&UsageRecord>> = HashMap::new();
    for row in &dataset.usage {
        rows_by_customer.entry(row.customer_id).or_default().push(row);
    }

    let subs: HashMap<_, _> = dataset
        .subscriptions
        .iter()
        .map(|s| (s.customer_id, s))
        .collect();

    let mut checked = 0;
    let mut decayed_below = 0;
    for customer_id in &dataset.at_risk {
        let sub = subs[customer_id];
        if sub.seats < 20 {
            continue;
        }
        let Some(rows) = rows_by_customer.get(customer_id) else { continue };
        let window_end = sub.effective_end(config.end_date).min(config.end_date);
        let boundary = window_end - Duration::days(config.drop_window_days);
        let Some((decayed, baseline)) = mean_split(rows, boundary) else { continue };
        checked += 1;
        decayed_below += i32::from(decayed < baseline);
    }
    assert!(checked > 10, "only {checked} at-risk actives were comparable");
    // Decay factors start at 20%; allow a little slack for small bases.
    assert!(
        decayed_below as f64 >= checked as f64 * 0.9,
        "{decayed_below}/{checked} at-risk actives show decay"
    );
}
