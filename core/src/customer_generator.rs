//! Customer table generation.
//!
//! One record per customer: sequential id, uniform signup date inside
//! the allowed window, segment and region drawn independently from the
//! configured categorical mixes.

use crate::calendar::uniform_date;
use crate::config::DatasetConfig;
use crate::rng::StreamRng;
use crate::types::{CustomerId, Region, Segment};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerRecord {
    pub customer_id: CustomerId,
    pub signup_date: NaiveDate,
    pub region: Region,
    pub segment: Segment,
}

pub fn generate(config: &DatasetConfig, rng: &mut StreamRng) -> Vec<CustomerRecord> {
    let cutoff = config.signup_cutoff();
    let segment_weights: Vec<(Segment, f64)> = config
        .segments
        .iter()
        .map(|profile| (profile.segment, profile.population_share))
        .collect();
    let region_weights = config.region_weights();

    (1..=config.n_customers as CustomerId)
        .map(|customer_id| CustomerRecord {
            customer_id,
            signup_date: uniform_date(rng, config.start_date, cutoff),
            segment: rng.pick_weighted(&segment_weights),
            region: rng.pick_weighted(&region_weights),
        })
        .collect()
}
