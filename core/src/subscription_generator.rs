//! Subscription table generation — one subscription per customer.
//!
//! Plan and seat count come from the customer's segment profile. Churn is
//! a two-stage draw: first whether the subscription ever churns, then a
//! voluntary/involuntary label weighted by the segment's churn tendency
//! ratio. Canceled subscriptions get an end date floored to a month start
//! and guaranteed at least `min_subscription_days` of life.

use crate::calendar::{add_months, month_start};
use crate::config::DatasetConfig;
use crate::customer_generator::CustomerRecord;
use crate::rng::StreamRng;
use crate::types::{ChurnKind, CustomerId, Plan, SubscriptionId, SubscriptionStatus};
use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubscriptionRecord {
    pub subscription_id: SubscriptionId,
    pub customer_id: CustomerId,
    pub plan: Plan,
    pub seats: i64,
    pub start_date: NaiveDate,
    /// Present iff status is canceled.
    pub end_date: Option<NaiveDate>,
    pub status: SubscriptionStatus,
    /// Diagnostic label, not an output column.
    #[serde(skip)]
    pub churn_kind: Option<ChurnKind>,
}

impl SubscriptionRecord {
    /// The date this subscription stops producing activity: its end date
    /// when canceled, otherwise the dataset end.
    pub fn effective_end(&self, dataset_end: NaiveDate) -> NaiveDate {
        self.end_date.unwrap_or(dataset_end)
    }
}

pub fn generate(
    config: &DatasetConfig,
    customers: &[CustomerRecord],
    rng: &mut StreamRng,
) -> Vec<SubscriptionRecord> {
    let plan_weights = |mix: &[f64; 3]| -> [(Plan, f64); 3] {
        [
            (Plan::Basic, mix[0]),
            (Plan::Pro, mix[1]),
            (Plan::Business, mix[2]),
        ]
    };

    customers
        .iter()
        .map(|customer| {
            let profile = config.profile(customer.segment);

            let plan = rng.pick_weighted(&plan_weights(&profile.plan_mix));
            let seats = rng.int_between(profile.seat_range.0, profile.seat_range.1);

            let start_lag = rng.int_between(0, config.max_start_lag_days - 1);
            let start_date =
                (customer.signup_date + Duration::days(start_lag)).min(config.end_date);

            let months_active =
                rng.int_between(config.churn_months_range.0, config.churn_months_range.1);
            let candidate_end = month_start(add_months(start_date, months_active as u32));

            let churn_kind = if rng.chance(config.churn_p) {
                let voluntary_share = profile.voluntary_churn_p_month
                    / (profile.voluntary_churn_p_month + profile.involuntary_churn_p_month);
                if rng.chance(voluntary_share) {
                    Some(ChurnKind::Voluntary)
                } else {
                    Some(ChurnKind::Involuntary)
                }
            } else {
                None
            };

            let (end_date, status) = match churn_kind {
                None => (None, SubscriptionStatus::Active),
                Some(_) => {
                    let mut end = candidate_end.min(config.end_date);
                    if (end - start_date).num_days() < config.min_subscription_days {
                        end = (start_date + Duration::days(config.min_subscription_days))
                            .min(config.end_date);
                    }
                    (Some(end), SubscriptionStatus::Canceled)
                }
            };

            SubscriptionRecord {
                subscription_id: customer.customer_id,
                customer_id: customer.customer_id,
                plan,
                seats,
                start_date,
                end_date,
                status,
                churn_kind,
            }
        })
        .collect()
}
