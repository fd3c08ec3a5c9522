//! Pipeline configuration.
//!
//! Every tunable of the dataset lives here as an embedded constant on
//! `DatasetConfig::default()` — the pipeline reads no input files. The
//! whole run is a pure function of (config, seed).

use crate::error::{GenError, GenResult};
use crate::types::{Plan, Region, Segment};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Per-segment tendencies: seat range, plan mix, churn and payment
/// behavior, usage baseline, ticket volume.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SegmentProfile {
    pub segment: Segment,
    /// Share of the customer population, cumulative pick order = `Segment::ALL`.
    pub population_share: f64,
    /// Inclusive seat count bounds; seat changes clamp into this range.
    pub seat_range: (i64, i64),
    /// Plan pick weights in `Plan::TIERS` order.
    pub plan_mix: [f64; 3],
    /// Monthly voluntary churn tendency. Only the voluntary:involuntary
    /// ratio matters — it weights the churn-kind label.
    pub voluntary_churn_p_month: f64,
    pub involuntary_churn_p_month: f64,
    /// Base per-invoice payment failure probability.
    pub failed_payment_p: f64,
    /// Daily-active-user ratio drawn once per customer from this range.
    pub dau_ratio_range: (f64, f64),
    /// Inclusive support ticket count range per customer.
    pub ticket_range: (i64, i64),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetConfig {
    pub seed: u64,
    pub n_customers: usize,
    /// First date any customer can sign up.
    pub start_date: NaiveDate,
    /// Overall dataset end; nothing is dated after this.
    pub end_date: NaiveDate,
    /// Signups stop this many days before `end_date`.
    pub signup_lead_days: i64,

    /// Price per seat per month, in `Plan::TIERS` order.
    pub plan_price_per_seat: [f64; 3],
    /// Region pick weights in `Region::ALL` order.
    pub region_mix: [f64; 4],
    pub segments: [SegmentProfile; 3],

    /// Probability that a subscription ever churns.
    pub churn_p: f64,
    /// Subscription lifetime draw, months, inclusive.
    pub churn_months_range: (i64, i64),
    /// Canceled subscriptions live at least this many days.
    pub min_subscription_days: i64,
    /// Subscription starts up to this many days (exclusive) after signup.
    pub max_start_lag_days: i64,

    /// Fraction of active customers flagged as at-risk.
    pub at_risk_share: f64,

    /// Plan changes per subscription, inclusive: (standard max, enterprise max).
    pub max_plan_changes: (i64, i64),
    /// Earliest change: this many days after subscription start.
    pub change_earliest_days: i64,
    /// upgrade / downgrade / seat_change weights.
    pub change_type_mix: [f64; 3],
    /// Relative seat delta bound for a seat_change draw (±).
    pub seat_delta_ratio: f64,

    /// Extra failure probability in the final months before cancellation.
    pub churn_fail_boost: f64,
    /// Ceiling on the boosted failure probability.
    pub churn_fail_cap: f64,
    /// How many months before the cancellation month the boost applies.
    pub churn_fail_window_months: i64,
    /// Flat failure probability for at-risk actives in the final dataset month.
    pub at_risk_billing_p: f64,
    /// Payment attempt lands up to this many days (exclusive) before due date.
    pub max_attempt_lag_days: i64,

    /// Length of the per-customer rolling usage window, days.
    pub usage_days: i64,
    /// Trailing window (days) that receives the usage decay.
    pub drop_window_days: i64,
    /// Per-customer decay factor range for churners.
    pub churn_drop_range: (f64, f64),
    /// Per-customer decay factor range for at-risk actives.
    pub at_risk_drop_range: (f64, f64),
    /// Per-customer sessions-per-active-user multiplier range.
    pub sessions_per_user_range: (f64, f64),
    /// Per-customer events-per-session multiplier range.
    pub events_per_session_range: (f64, f64),
    /// Daily multiplicative noise on active users / sessions / events.
    pub users_noise: (f64, f64),
    pub sessions_noise: (f64, f64),
    pub events_noise: (f64, f64),

    /// Extra tickets for canceled customers, inclusive range.
    pub canceled_ticket_bonus: (i64, i64),
    /// Probability an at-risk active gets a ticket burst.
    pub at_risk_ticket_p: f64,
    /// Burst size, inclusive range.
    pub at_risk_ticket_burst: (i64, i64),
    /// low / medium / high severity weights.
    pub severity_mix: [f64; 3],
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            n_customers: 2000,
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2025, 12, 31).unwrap(),
            signup_lead_days: 120,

            plan_price_per_seat: [49.0, 99.0, 149.0],
            region_mix: [0.55, 0.20, 0.15, 0.10],
            segments: [
                SegmentProfile {
                    segment: Segment::Smb,
                    population_share: 0.60,
                    seat_range: (3, 25),
                    plan_mix: [0.60, 0.35, 0.05],
                    voluntary_churn_p_month: 0.030,
                    involuntary_churn_p_month: 0.010,
                    failed_payment_p: 0.080,
                    dau_ratio_range: (0.35, 0.65),
                    ticket_range: (0, 3),
                },
                SegmentProfile {
                    segment: Segment::MidMarket,
                    population_share: 0.30,
                    seat_range: (26, 100),
                    plan_mix: [0.25, 0.55, 0.20],
                    voluntary_churn_p_month: 0.018,
                    involuntary_churn_p_month: 0.007,
                    failed_payment_p: 0.050,
                    dau_ratio_range: (0.40, 0.70),
                    ticket_range: (1, 5),
                },
                SegmentProfile {
                    segment: Segment::Enterprise,
                    population_share: 0.10,
                    seat_range: (101, 400),
                    plan_mix: [0.05, 0.35, 0.60],
                    voluntary_churn_p_month: 0.010,
                    involuntary_churn_p_month: 0.004,
                    failed_payment_p: 0.025,
                    dau_ratio_range: (0.45, 0.75),
                    ticket_range: (2, 8),
                },
            ],

            churn_p: 0.45,
            churn_months_range: (4, 23),
            min_subscription_days: 60,
            max_start_lag_days: 14,

            at_risk_share: 0.10,

            max_plan_changes: (2, 3),
            change_earliest_days: 30,
            change_type_mix: [0.25, 0.35, 0.40],
            seat_delta_ratio: 0.25,

            churn_fail_boost: 0.35,
            churn_fail_cap: 0.75,
            churn_fail_window_months: 2,
            at_risk_billing_p: 0.20,
            max_attempt_lag_days: 5,

            usage_days: 240,
            drop_window_days: 30,
            churn_drop_range: (0.35, 0.70),
            at_risk_drop_range: (0.20, 0.55),
            sessions_per_user_range: (1.5, 3.0),
            events_per_session_range: (2.0, 6.0),
            users_noise: (0.85, 1.15),
            sessions_noise: (0.85, 1.20),
            events_noise: (0.80, 1.25),

            canceled_ticket_bonus: (0, 2),
            at_risk_ticket_p: 0.15,
            at_risk_ticket_burst: (2, 5),
            severity_mix: [0.65, 0.28, 0.07],
        }
    }
}

impl DatasetConfig {
    /// Config with a small population for use in unit tests.
    pub fn default_test() -> Self {
        Self {
            n_customers: 300,
            ..Self::default()
        }
    }

    pub fn profile(&self, segment: Segment) -> &SegmentProfile {
        &self.segments[segment.index()]
    }

    pub fn price_per_seat(&self, plan: Plan) -> f64 {
        self.plan_price_per_seat[plan.index()]
    }

    /// Region pick weights paired with their regions, in draw order.
    pub fn region_weights(&self) -> [(Region, f64); 4] {
        [
            (Region::Na, self.region_mix[0]),
            (Region::Emea, self.region_mix[1]),
            (Region::Apac, self.region_mix[2]),
            (Region::Latam, self.region_mix[3]),
        ]
    }

    /// Latest allowed signup date.
    pub fn signup_cutoff(&self) -> NaiveDate {
        self.end_date - chrono::Duration::days(self.signup_lead_days)
    }

    /// Fail fast on nonsensical constants. Everything else the clamping
    /// rules in the generators keep in range by construction.
    pub fn validate(&self) -> GenResult<()> {
        if self.n_customers == 0 {
            return Err(GenError::invalid_config("n_customers must be > 0"));
        }
        if self.signup_cutoff() < self.start_date {
            return Err(GenError::invalid_config(format!(
                "date range {}..{} leaves no room for the {}-day signup lead",
                self.start_date, self.end_date, self.signup_lead_days
            )));
        }
        for profile in &self.segments {
            if profile.seat_range.0 <= 0 || profile.seat_range.0 > profile.seat_range.1 {
                return Err(GenError::invalid_config(format!(
                    "segment {:?} seat_range {:?} is not a positive ascending range",
                    profile.segment, profile.seat_range
                )));
            }
            if profile.ticket_range.0 > profile.ticket_range.1 {
                return Err(GenError::invalid_config(format!(
                    "segment {:?} ticket_range {:?} is reversed",
                    profile.segment, profile.ticket_range
                )));
            }
            let (lo, hi) = profile.dau_ratio_range;
            if !(0.0..=1.0).contains(&lo) || !(0.0..=1.0).contains(&hi) || lo > hi {
                return Err(GenError::invalid_config(format!(
                    "segment {:?} dau_ratio_range {:?} must be an ascending range in [0, 1]",
                    profile.segment, profile.dau_ratio_range
                )));
            }
            let ratio_denominator =
                profile.voluntary_churn_p_month + profile.involuntary_churn_p_month;
            if ratio_denominator <= 0.0 {
                return Err(GenError::invalid_config(format!(
                    "segment {:?} churn tendencies must not both be zero",
                    profile.segment
                )));
            }
        }
        for (name, p) in [
            ("churn_p", self.churn_p),
            ("at_risk_share", self.at_risk_share),
            ("at_risk_billing_p", self.at_risk_billing_p),
            ("at_risk_ticket_p", self.at_risk_ticket_p),
        ] {
            if !(0.0..=1.0).contains(&p) {
                return Err(GenError::invalid_config(format!(
                    "{name} = {p} is not a probability"
                )));
            }
        }
        if self.churn_months_range.0 > self.churn_months_range.1 || self.churn_months_range.0 < 1 {
            return Err(GenError::invalid_config(format!(
                "churn_months_range {:?} is not a positive ascending range",
                self.churn_months_range
            )));
        }
        for (name, (lo, hi)) in [
            ("churn_drop_range", self.churn_drop_range),
            ("at_risk_drop_range", self.at_risk_drop_range),
        ] {
            if lo > hi || lo < 0.0 || hi > 1.0 {
                return Err(GenError::invalid_config(format!(
                    "{name} {:?} must be an ascending range in [0, 1]",
                    (lo, hi)
                )));
            }
        }
        if self.usage_days < 1 || self.drop_window_days < 0 {
            return Err(GenError::invalid_config(
                "usage_days must be >= 1 and drop_window_days >= 0",
            ));
        }
        if self.max_start_lag_days < 1 || self.max_attempt_lag_days < 1 {
            return Err(GenError::invalid_config(
                "max_start_lag_days and max_attempt_lag_days must be >= 1",
            ));
        }
        Ok(())
    }
}
