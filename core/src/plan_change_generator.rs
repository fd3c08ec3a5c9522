//! Plan-change history generation.
//!
//! Each subscription gets a short, chronologically unsorted history of
//! upgrade / downgrade / seat-change events. (Plan, seats) state threads
//! sequentially across a subscription's changes so they compose. An
//! upgrade at the top tier or a downgrade at the bottom degrades to a
//! seat change rather than being skipped.

use crate::calendar::uniform_date;
use crate::config::DatasetConfig;
use crate::customer_generator::CustomerRecord;
use crate::rng::StreamRng;
use crate::subscription_generator::SubscriptionRecord;
use crate::types::{ChangeType, CustomerId, Plan, RowId, Segment};
use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanChangeRecord {
    pub change_id: RowId,
    pub customer_id: CustomerId,
    pub change_date: NaiveDate,
    pub change_type: ChangeType,
    pub old_plan: Plan,
    pub new_plan: Plan,
    pub old_seats: i64,
    pub new_seats: i64,
}

pub fn generate(
    config: &DatasetConfig,
    customers: &[CustomerRecord],
    subscriptions: &[SubscriptionRecord],
    rng: &mut StreamRng,
) -> Vec<PlanChangeRecord> {
    let type_weights = [
        (ChangeType::Upgrade, config.change_type_mix[0]),
        (ChangeType::Downgrade, config.change_type_mix[1]),
        (ChangeType::SeatChange, config.change_type_mix[2]),
    ];

    let mut changes = Vec::new();
    let mut change_id: RowId = 1;

    for (customer, sub) in customers.iter().zip(subscriptions) {
        let profile = config.profile(customer.segment);
        let max_changes = if customer.segment == Segment::Enterprise {
            config.max_plan_changes.1
        } else {
            config.max_plan_changes.0
        };
        let n_changes = rng.int_between(0, max_changes);

        let earliest = sub.start_date + Duration::days(config.change_earliest_days);
        let latest = sub.effective_end(config.end_date).min(config.end_date);

        let mut current_plan = sub.plan;
        let mut current_seats = sub.seats;

        for _ in 0..n_changes {
            let change_date = uniform_date(rng, earliest, latest);
            let mut change_type = rng.pick_weighted(&type_weights);

            let old_plan = current_plan;
            let old_seats = current_seats;
            let mut new_plan = current_plan;
            let mut new_seats = current_seats;

            if let ChangeType::Upgrade | ChangeType::Downgrade = change_type {
                let stepped = match change_type {
                    ChangeType::Upgrade => current_plan.next_up(),
                    _ => current_plan.next_down(),
                };
                match stepped {
                    Some(plan) => new_plan = plan,
                    // Tier boundary: degrade to a seat change.
                    None => change_type = ChangeType::SeatChange,
                }
            }

            if change_type == ChangeType::SeatChange {
                let delta = (current_seats as f64
                    * rng.uniform(-config.seat_delta_ratio, config.seat_delta_ratio))
                .round() as i64;
                new_seats =
                    (current_seats + delta).clamp(profile.seat_range.0, profile.seat_range.1);
            }

            changes.push(PlanChangeRecord {
                change_id,
                customer_id: customer.customer_id,
                change_date,
                change_type,
                old_plan,
                new_plan,
                old_seats,
                new_seats,
            });
            change_id += 1;

            current_plan = new_plan;
            current_seats = new_seats;
        }
    }

    changes
}
