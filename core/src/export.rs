//! CSV serialization of a generated dataset.
//!
//! One file per table, header row included, columns in record field
//! order. Writing goes through serde so the record structs are the
//! single source of truth for the schema.

use crate::billing_generator::{InvoiceRecord, PaymentRecord};
use crate::customer_generator::CustomerRecord;
use crate::error::GenResult;
use crate::pipeline::Dataset;
use crate::plan_change_generator::PlanChangeRecord;
use crate::subscription_generator::SubscriptionRecord;
use crate::ticket_generator::TicketRecord;
use crate::usage_generator::UsageRecord;
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::Path;

pub const TABLE_FILES: [&str; 7] = [
    "customers.csv",
    "subscriptions.csv",
    "plan_changes.csv",
    "invoices.csv",
    "payments.csv",
    "product_usage_daily.csv",
    "support_tickets.csv",
];

/// Column names for a table's header row.
///
/// `csv::Writer` only derives headers from the first serialized record,
/// so an empty table needs them spelled out to still produce a valid
/// file. Must stay in sync with the record's serde field names; the
/// tests below catch drift.
pub trait CsvRecord: Serialize {
    const HEADERS: &'static [&'static str];
}

impl CsvRecord for CustomerRecord {
    const HEADERS: &'static [&'static str] = &["customer_id", "signup_date", "region", "segment"];
}

impl CsvRecord for SubscriptionRecord {
    const HEADERS: &'static [&'static str] = &[
        "subscription_id",
        "customer_id",
        "plan",
        "seats",
        "start_date",
        "end_date",
        "status",
    ];
}

impl CsvRecord for PlanChangeRecord {
    const HEADERS: &'static [&'static str] = &[
        "change_id",
        "customer_id",
        "change_date",
        "change_type",
        "old_plan",
        "new_plan",
        "old_seats",
        "new_seats",
    ];
}

impl CsvRecord for InvoiceRecord {
    const HEADERS: &'static [&'static str] = &[
        "invoice_id",
        "customer_id",
        "invoice_month",
        "amount_due",
        "due_date",
        "invoice_status",
    ];
}

impl CsvRecord for PaymentRecord {
    const HEADERS: &'static [&'static str] =
        &["payment_id", "invoice_id", "attempt_date", "amount_paid", "status"];
}

impl CsvRecord for UsageRecord {
    const HEADERS: &'static [&'static str] = &[
        "customer_id",
        "usage_date",
        "active_users",
        "sessions",
        "core_feature_events",
    ];
}

impl CsvRecord for TicketRecord {
    const HEADERS: &'static [&'static str] =
        &["ticket_id", "customer_id", "created_date", "severity"];
}

/// Serialize one table to any writer.
pub fn write_table<W: Write, T: CsvRecord>(writer: W, rows: &[T]) -> GenResult<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    if rows.is_empty() {
        csv_writer.write_record(T::HEADERS)?;
    }
    for row in rows {
        csv_writer.serialize(row)?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Serialize one table to an in-memory buffer. Used by the determinism
/// tests; the CSV bytes are the canonical output representation.
pub fn table_to_bytes<T: CsvRecord>(rows: &[T]) -> GenResult<Vec<u8>> {
    let mut buffer = Vec::new();
    write_table(&mut buffer, rows)?;
    Ok(buffer)
}

/// Write all seven tables under `out_dir`, creating it if absent.
pub fn write_dataset(dataset: &Dataset, out_dir: &Path) -> GenResult<()> {
    std::fs::create_dir_all(out_dir)?;

    write_table(File::create(out_dir.join("customers.csv"))?, &dataset.customers)?;
    write_table(File::create(out_dir.join("subscriptions.csv"))?, &dataset.subscriptions)?;
    write_table(File::create(out_dir.join("plan_changes.csv"))?, &dataset.plan_changes)?;
    write_table(File::create(out_dir.join("invoices.csv"))?, &dataset.invoices)?;
    write_table(File::create(out_dir.join("payments.csv"))?, &dataset.payments)?;
    write_table(File::create(out_dir.join("product_usage_daily.csv"))?, &dataset.usage)?;
    write_table(File::create(out_dir.join("support_tickets.csv"))?, &dataset.tickets)?;

    log::info!("wrote {} tables to {}", TABLE_FILES.len(), out_dir.display());
    Ok(())
}
