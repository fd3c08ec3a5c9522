//! saasgen-core — deterministic synthetic dataset for a seat-based
//! B2B SaaS business.
//!
//! One run generates seven related tables (customers, subscriptions,
//! plan changes, invoices, payments, daily usage, support tickets) as a
//! pure function of `DatasetConfig` and its master seed, then serializes
//! them to CSV. Churned customers and a disjoint cohort of "at-risk"
//! actives both carry leading-indicator signals (usage decay, billing
//! failures, ticket spikes) for downstream churn-model demos.

pub mod billing_generator;
pub mod calendar;
pub mod config;
pub mod customer_generator;
pub mod error;
pub mod export;
pub mod pipeline;
pub mod plan_change_generator;
pub mod risk_cohort;
pub mod rng;
pub mod subscription_generator;
pub mod ticket_generator;
pub mod types;
pub mod usage_generator;

pub use config::DatasetConfig;
pub use error::{GenError, GenResult};
pub use pipeline::{generate, Dataset};
