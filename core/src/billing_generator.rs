//! Invoice and payment generation.
//!
//! Walks each subscription month by month from its start month through
//! its end month (dataset end when active). The plan/seat state billed
//! for a month is resolved by replaying the plan-change history up to
//! that month start — a pure function over the pre-indexed, date-sorted
//! changes. Payment failure odds are the segment base rate, boosted in
//! the final months before a known cancellation and, for at-risk active
//! customers, flat-elevated in the final dataset month.

use crate::calendar::{month_end, month_start, month_starts, sub_months};
use crate::config::DatasetConfig;
use crate::customer_generator::CustomerRecord;
use crate::plan_change_generator::PlanChangeRecord;
use crate::rng::StreamRng;
use crate::subscription_generator::SubscriptionRecord;
use crate::types::{
    ChangeType, CustomerId, InvoiceId, InvoiceStatus, PaymentStatus, Plan, RowId,
    SubscriptionStatus,
};
use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoiceRecord {
    pub invoice_id: InvoiceId,
    pub customer_id: CustomerId,
    pub invoice_month: NaiveDate,
    pub amount_due: f64,
    pub due_date: NaiveDate,
    #[serde(rename = "invoice_status")]
    pub status: InvoiceStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentRecord {
    pub payment_id: RowId,
    pub invoice_id: InvoiceId,
    pub attempt_date: NaiveDate,
    pub amount_paid: f64,
    pub status: PaymentStatus,
}

/// The (plan, seats) pair in effect at some point in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlanState {
    pub plan: Plan,
    pub seats: i64,
}

impl PlanState {
    /// Replay `changes` (pre-sorted by date) up to and including
    /// `as_of`, last writer wins per field.
    pub fn resolve(base: PlanState, changes: &[&PlanChangeRecord], as_of: NaiveDate) -> PlanState {
        let mut state = base;
        for change in changes.iter().filter(|c| c.change_date <= as_of) {
            if let ChangeType::Upgrade | ChangeType::Downgrade = change.change_type {
                state.plan = change.new_plan;
            }
            state.seats = change.new_seats;
        }
        state
    }
}

/// Plan changes grouped per customer, sorted by (date, id).
pub fn index_changes(changes: &[PlanChangeRecord]) -> HashMap<CustomerId, Vec<&PlanChangeRecord>> {
    let mut by_customer: HashMap<CustomerId, Vec<&PlanChangeRecord>> = HashMap::new();
    for change in changes {
        by_customer.entry(change.customer_id).or_default().push(change);
    }
    for history in by_customer.values_mut() {
        history.sort_by_key(|c| (c.change_date, c.change_id));
    }
    by_customer
}

fn round2(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

pub fn generate(
    config: &DatasetConfig,
    customers: &[CustomerRecord],
    subscriptions: &[SubscriptionRecord],
    changes: &[PlanChangeRecord],
    at_risk: &BTreeSet<CustomerId>,
    rng: &mut StreamRng,
) -> (Vec<InvoiceRecord>, Vec<PaymentRecord>) {
    let changes_by_customer = index_changes(changes);
    // The month at-risk actives show billing failures in.
    let last_month_start = sub_months(month_start(config.end_date), 1);

    let mut invoices = Vec::new();
    let mut payments = Vec::new();
    let mut invoice_id: InvoiceId = 1;

    for (customer, sub) in customers.iter().zip(subscriptions) {
        let base_fail_p = config.profile(customer.segment).failed_payment_p;
        let base = PlanState {
            plan: sub.plan,
            seats: sub.seats,
        };
        let history = changes_by_customer
            .get(&sub.customer_id)
            .map(Vec::as_slice)
            .unwrap_or(&[]);

        let billing_end = sub.effective_end(config.end_date);
        let churn_boost_from = sub
            .end_date
            .map(|end| sub_months(month_start(end), config.churn_fail_window_months as u32));

        for month in month_starts(sub.start_date, billing_end) {
            let state = PlanState::resolve(base, history, month);
            let amount_due = config.price_per_seat(state.plan) * state.seats as f64;
            let due_date = month_end(month);

            let mut failed = rng.chance(base_fail_p);
            let attempt_lag = rng.int_between(0, config.max_attempt_lag_days - 1);
            let attempt_date = due_date - Duration::days(attempt_lag);

            // Churners fail more often as the end approaches.
            if let Some(boost_from) = churn_boost_from {
                if month >= boost_from {
                    let boosted = (base_fail_p + config.churn_fail_boost).min(config.churn_fail_cap);
                    if rng.chance(boosted) {
                        failed = true;
                    }
                }
            }

            // At-risk actives fail in the final dataset month.
            if sub.status == SubscriptionStatus::Active
                && at_risk.contains(&sub.customer_id)
                && month >= last_month_start
                && rng.chance(config.at_risk_billing_p)
            {
                failed = true;
            }

            let (payment_status, amount_paid, invoice_status) = if failed {
                (PaymentStatus::Failed, 0.0, InvoiceStatus::Open)
            } else {
                (PaymentStatus::Paid, amount_due, InvoiceStatus::Paid)
            };

            invoices.push(InvoiceRecord {
                invoice_id,
                customer_id: sub.customer_id,
                invoice_month: month,
                amount_due: round2(amount_due),
                due_date,
                status: invoice_status,
            });
            payments.push(PaymentRecord {
                payment_id: invoice_id,
                invoice_id,
                attempt_date,
                amount_paid: round2(amount_paid),
                status: payment_status,
            });
            invoice_id += 1;
        }
    }

    (invoices, payments)
}
