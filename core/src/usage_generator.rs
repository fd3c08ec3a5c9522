//! Daily product usage generation.
//!
//! Each customer gets a rolling window of `usage_days` daily rows ending
//! at their effective end (churn date, or dataset end), clipped so it
//! never precedes the subscription start. Baselines are drawn once per
//! customer, each day adds independent multiplicative noise, and a single
//! per-customer decay factor suppresses the final `drop_window_days`
//! before a churn date (churners) or before the window end (at-risk
//! actives). A customer can hit at most one of the two decay conditions.

use crate::config::DatasetConfig;
use crate::customer_generator::CustomerRecord;
use crate::rng::StreamRng;
use crate::subscription_generator::SubscriptionRecord;
use crate::types::CustomerId;
use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UsageRecord {
    pub customer_id: CustomerId,
    pub usage_date: NaiveDate,
    pub active_users: i64,
    pub sessions: i64,
    pub core_feature_events: i64,
}

fn scaled(count: i64, factor: f64) -> i64 {
    ((count as f64 * factor).round() as i64).max(0)
}

pub fn generate(
    config: &DatasetConfig,
    customers: &[CustomerRecord],
    subscriptions: &[SubscriptionRecord],
    at_risk: &BTreeSet<CustomerId>,
    rng: &mut StreamRng,
) -> Vec<UsageRecord> {
    let mut rows = Vec::new();

    for (customer, sub) in customers.iter().zip(subscriptions) {
        let profile = config.profile(customer.segment);

        let window_end = sub.effective_end(config.end_date).min(config.end_date);
        let window_start =
            (window_end - Duration::days(config.usage_days - 1)).max(sub.start_date);
        if window_start > window_end {
            continue;
        }

        let (ratio_lo, ratio_hi) = profile.dau_ratio_range;
        let dau_ratio = rng.uniform(ratio_lo, ratio_hi);
        let base_active_users = ((sub.seats as f64 * dau_ratio).round() as i64).max(1);

        let sessions_mult = rng.uniform(
            config.sessions_per_user_range.0,
            config.sessions_per_user_range.1,
        );
        let base_sessions = ((base_active_users as f64 * sessions_mult).round() as i64).max(1);

        let events_mult = rng.uniform(
            config.events_per_session_range.0,
            config.events_per_session_range.1,
        );
        let base_events = ((base_sessions as f64 * events_mult).round() as i64).max(1);

        // One decay factor per customer, stable across days. Churn and
        // at-risk are mutually exclusive, so at most one is drawn.
        let churn_decay = sub
            .end_date
            .map(|_| rng.uniform(config.churn_drop_range.0, config.churn_drop_range.1));
        let at_risk_decay = if sub.end_date.is_none() && at_risk.contains(&sub.customer_id) {
            Some(rng.uniform(config.at_risk_drop_range.0, config.at_risk_drop_range.1))
        } else {
            None
        };

        let mut day = window_start;
        while day <= window_end {
            let mut active_users =
                scaled(base_active_users, rng.uniform(config.users_noise.0, config.users_noise.1));
            let mut sessions = scaled(
                base_sessions,
                rng.uniform(config.sessions_noise.0, config.sessions_noise.1),
            );
            let mut events =
                scaled(base_events, rng.uniform(config.events_noise.0, config.events_noise.1));

            let decay = match (churn_decay, sub.end_date, at_risk_decay) {
                (Some(factor), Some(end), _)
                    if (0..=config.drop_window_days).contains(&(end - day).num_days()) =>
                {
                    Some(factor)
                }
                (None, None, Some(factor))
                    if (0..=config.drop_window_days)
                        .contains(&(window_end - day).num_days()) =>
                {
                    Some(factor)
                }
                _ => None,
            };
            if let Some(factor) = decay {
                active_users = scaled(active_users, 1.0 - factor);
                sessions = scaled(sessions, 1.0 - factor);
                events = scaled(events, 1.0 - factor);
            }

            rows.push(UsageRecord {
                customer_id: sub.customer_id,
                usage_date: day,
                active_users,
                sessions,
                core_feature_events: events,
            });
            day += Duration::days(1);
        }
    }

    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scaled_floors_at_zero_and_rounds() {
        assert_eq!(scaled(8, 0.5), 4);
        assert_eq!(scaled(2, 0.75), 2); // 1.5 rounds half away from zero
        assert_eq!(scaled(3, 0.25), 1);
        assert_eq!(scaled(1, 0.125), 0);
        assert_eq!(scaled(0, 1.25), 0);
    }
}
