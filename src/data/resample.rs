use super::frequency::Frequency;
use crate::error::Result;
use crate::types::PriceSeries;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

/// Aggregate prices to `frequency`, keeping the last observation (in input
/// order) of each bucket. Buckets without observations are not emitted.
pub fn resample_last(prices: &PriceSeries, frequency: Frequency) -> Result<PriceSeries> {
    let mut buckets: BTreeMap<DateTime<Utc>, f64> = BTreeMap::new();

    for (ts, price) in prices.iter() {
        buckets.insert(frequency.bucket_end(ts)?, price);
    }

    log::debug!(
        "Resampled {} observations into {} {} buckets",
        prices.len(),
        buckets.len(),
        frequency
    );

    Ok(PriceSeries::from_pairs(buckets))
}
