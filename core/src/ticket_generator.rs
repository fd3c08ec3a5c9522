//! Support ticket generation.
//!
//! Ticket count is a segment-dependent draw, topped up for canceled
//! customers, plus an occasional burst for at-risk actives. Creation
//! dates are uniform over the whole dataset range — support load is not
//! tied to the subscription span.

use crate::calendar::uniform_date;
use crate::config::DatasetConfig;
use crate::customer_generator::CustomerRecord;
use crate::rng::StreamRng;
use crate::subscription_generator::SubscriptionRecord;
use crate::types::{CustomerId, RowId, Severity, SubscriptionStatus};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TicketRecord {
    pub ticket_id: RowId,
    pub customer_id: CustomerId,
    pub created_date: NaiveDate,
    pub severity: Severity,
}

pub fn generate(
    config: &DatasetConfig,
    customers: &[CustomerRecord],
    subscriptions: &[SubscriptionRecord],
    at_risk: &BTreeSet<CustomerId>,
    rng: &mut StreamRng,
) -> Vec<TicketRecord> {
    let severity_weights = [
        (Severity::Low, config.severity_mix[0]),
        (Severity::Medium, config.severity_mix[1]),
        (Severity::High, config.severity_mix[2]),
    ];

    let mut tickets = Vec::new();
    let mut ticket_id: RowId = 1;

    for (customer, sub) in customers.iter().zip(subscriptions) {
        let profile = config.profile(customer.segment);
        let mut n_tickets = rng.int_between(profile.ticket_range.0, profile.ticket_range.1);

        if sub.status == SubscriptionStatus::Canceled {
            n_tickets += rng.int_between(
                config.canceled_ticket_bonus.0,
                config.canceled_ticket_bonus.1,
            );
        }

        if at_risk.contains(&sub.customer_id) && rng.chance(config.at_risk_ticket_p) {
            n_tickets += rng.int_between(
                config.at_risk_ticket_burst.0,
                config.at_risk_ticket_burst.1,
            );
        }

        for _ in 0..n_tickets {
            tickets.push(TicketRecord {
                ticket_id,
                customer_id: sub.customer_id,
                created_date: uniform_date(rng, config.start_date, config.end_date),
                severity: rng.pick_weighted(&severity_weights),
            });
            ticket_id += 1;
        }
    }

    tickets
}
