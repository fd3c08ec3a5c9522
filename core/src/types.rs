//! Shared primitive types and the closed categorical vocabulary of the
//! dataset (plans, segments, regions, statuses).

use serde::{Deserialize, Serialize};

/// Sequential row identifier, 1-based within each table.
pub type RowId = i64;

pub type CustomerId = RowId;
pub type SubscriptionId = RowId;
pub type InvoiceId = RowId;

/// Subscription pricing tier. Ordered: upgrades step right, downgrades left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Plan {
    Basic,
    Pro,
    Business,
}

impl Plan {
    /// Tier order used by upgrade/downgrade stepping.
    pub const TIERS: [Plan; 3] = [Plan::Basic, Plan::Pro, Plan::Business];

    /// One tier up, or None at the top of the ladder.
    pub fn next_up(self) -> Option<Plan> {
        match self {
            Plan::Basic => Some(Plan::Pro),
            Plan::Pro => Some(Plan::Business),
            Plan::Business => None,
        }
    }

    /// One tier down, or None at the bottom.
    pub fn next_down(self) -> Option<Plan> {
        match self {
            Plan::Basic => None,
            Plan::Pro => Some(Plan::Basic),
            Plan::Business => Some(Plan::Pro),
        }
    }

    pub fn index(self) -> usize {
        match self {
            Plan::Basic => 0,
            Plan::Pro => 1,
            Plan::Business => 2,
        }
    }
}

/// Customer size tier. Drives seat ranges, plan mix, churn tendencies,
/// payment failure rates, usage baselines, and ticket volume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Segment {
    #[serde(rename = "SMB")]
    Smb,
    #[serde(rename = "Mid-Market")]
    MidMarket,
    Enterprise,
}

impl Segment {
    pub const ALL: [Segment; 3] = [Segment::Smb, Segment::MidMarket, Segment::Enterprise];

    pub fn index(self) -> usize {
        match self {
            Segment::Smb => 0,
            Segment::MidMarket => 1,
            Segment::Enterprise => 2,
        }
    }
}

/// Sales region. Assignment only — no behavior hangs off it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Region {
    Na,
    Emea,
    Apac,
    Latam,
}

impl Region {
    pub const ALL: [Region; 4] = [Region::Na, Region::Emea, Region::Apac, Region::Latam];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionStatus {
    Active,
    Canceled,
}

/// Why a subscription churned. Label only: weighted by segment tendency
/// but never written to any output column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChurnKind {
    Voluntary,
    Involuntary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeType {
    Upgrade,
    Downgrade,
    SeatChange,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    Open,
    Paid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Paid,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}
