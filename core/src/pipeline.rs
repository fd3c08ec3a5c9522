//! Pipeline driver.
//!
//! Runs the seven generator stages in dependency order, each on its own
//! deterministic RNG stream. Execution order is fixed:
//!
//!   customers → subscriptions → risk cohort → plan changes
//!   → billing (invoices + payments) → usage → tickets
//!
//! The whole dataset is held in memory and handed back as one value;
//! serialization is the caller's concern (see `export`).

use crate::billing_generator::{self, InvoiceRecord, PaymentRecord};
use crate::config::DatasetConfig;
use crate::customer_generator::{self, CustomerRecord};
use crate::error::GenResult;
use crate::plan_change_generator::{self, PlanChangeRecord};
use crate::risk_cohort;
use crate::rng::{RngBank, StageSlot};
use crate::subscription_generator::{self, SubscriptionRecord};
use crate::ticket_generator::{self, TicketRecord};
use crate::types::CustomerId;
use crate::usage_generator::{self, UsageRecord};
use std::collections::BTreeSet;

/// All seven tables of one generated dataset.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub customers: Vec<CustomerRecord>,
    pub subscriptions: Vec<SubscriptionRecord>,
    pub plan_changes: Vec<PlanChangeRecord>,
    pub invoices: Vec<InvoiceRecord>,
    pub payments: Vec<PaymentRecord>,
    pub usage: Vec<UsageRecord>,
    pub tickets: Vec<TicketRecord>,
    /// Active customers flagged with synthetic early-warning signals.
    pub at_risk: BTreeSet<CustomerId>,
}

impl Dataset {
    /// (table name, row count) pairs in export order.
    pub fn row_counts(&self) -> [(&'static str, usize); 7] {
        [
            ("customers", self.customers.len()),
            ("subscriptions", self.subscriptions.len()),
            ("plan_changes", self.plan_changes.len()),
            ("invoices", self.invoices.len()),
            ("payments", self.payments.len()),
            ("product_usage_daily", self.usage.len()),
            ("support_tickets", self.tickets.len()),
        ]
    }
}

/// Generate the full dataset for `config`. Pure in (config, seed):
/// the same inputs always produce the same tables.
pub fn generate(config: &DatasetConfig) -> GenResult<Dataset> {
    config.validate()?;
    let bank = RngBank::new(config.seed);

    let customers =
        customer_generator::generate(config, &mut bank.for_stage(StageSlot::Customer));
    log::info!("stage=customer rows={}", customers.len());

    let subscriptions = subscription_generator::generate(
        config,
        &customers,
        &mut bank.for_stage(StageSlot::Subscription),
    );
    log::info!("stage=subscription rows={}", subscriptions.len());

    let at_risk =
        risk_cohort::select(config, &subscriptions, &mut bank.for_stage(StageSlot::RiskCohort));
    log::info!("stage=risk_cohort flagged={}", at_risk.len());

    let plan_changes = plan_change_generator::generate(
        config,
        &customers,
        &subscriptions,
        &mut bank.for_stage(StageSlot::PlanChange),
    );
    log::info!("stage=plan_change rows={}", plan_changes.len());

    let (invoices, payments) = billing_generator::generate(
        config,
        &customers,
        &subscriptions,
        &plan_changes,
        &at_risk,
        &mut bank.for_stage(StageSlot::Billing),
    );
    log::info!("stage=billing invoices={} payments={}", invoices.len(), payments.len());

    let usage = usage_generator::generate(
        config,
        &customers,
        &subscriptions,
        &at_risk,
        &mut bank.for_stage(StageSlot::Usage),
    );
    log::info!("stage=usage rows={}", usage.len());

    let tickets = ticket_generator::generate(
        config,
        &customers,
        &subscriptions,
        &at_risk,
        &mut bank.for_stage(StageSlot::Ticket),
    );
    log::info!("stage=ticket rows={}", tickets.len());

    Ok(Dataset {
        customers,
        subscriptions,
        plan_changes,
        invoices,
        payments,
        usage,
        tickets,
        at_risk,
    })
}
