//! Feature construction for the rainfall and crop models
//!
//! Everything here is deterministic: identical inputs produce identical
//! feature tables, so training, evaluation and serving agree on column order.

use std::collections::BTreeMap;

use crate::error::{PipelineError, PipelineResult};
use crate::models::{
    CropFeatureVector, CropInput, DailyRainfallRecord, RainfallFeatureVector, RainfallInput,
    RainfallObservation, RainfallTrainingTable, RawCropInput, CROP_FEATURE_NAMES,
};
use crate::types::RegionKey;

/// Number of preceding months a training row needs
pub const LAG_WINDOW: usize = 3;

/// Collapse daily readings into monthly totals, one observation per record
pub fn aggregate_daily(records: &[DailyRainfallRecord]) -> Vec<RainfallObservation> {
    records
        .iter()
        .map(|record| RainfallObservation {
            region: record.region.clone(),
            month: record.month,
            total_rainfall: record.monthly_total(),
        })
        .collect()
}

/// Build the supervised (month, lag1, lag2, lag3) -> total_rainfall table.
///
/// Observations are grouped by region and sorted by month; lagN is the total
/// N rows earlier in the same region. Rows without three predecessors are
/// dropped rather than filled. Rows come out ordered by region, then month.
pub fn build_rainfall_training_table(observations: &[RainfallObservation]) -> RainfallTrainingTable {
    let mut groups: BTreeMap<&RegionKey, Vec<&RainfallObservation>> = BTreeMap::new();
    for observation in observations {
        groups.entry(&observation.region).or_default().push(observation);
    }

    let mut table = RainfallTrainingTable::default();
    for (region, mut series) in groups {
        series.sort_by_key(|o| o.month);

        let mut kept = 0usize;
        for (i, current) in series.iter().enumerate().skip(LAG_WINDOW) {
            let lag1 = series[i - 1].total_rainfall;
            let lag2 = series[i - 2].total_rainfall;
            let lag3 = series[i - 3].total_rainfall;
            if ![lag1, lag2, lag3, current.total_rainfall]
                .iter()
                .all(|v| v.is_finite())
            {
                continue;
            }
            table
                .features
                .push(RainfallFeatureVector::new(current.month, lag1, lag2, lag3));
            table.targets.push(current.total_rainfall);
            kept += 1;
        }

        tracing::trace!(region = %region, months = series.len(), rows = kept, "built lag rows");
    }

    table
}

/// Rainfall regressor input in order (month, lag1, lag2, lag3)
pub fn build_rainfall_vector(input: &RainfallInput) -> RainfallFeatureVector {
    RainfallFeatureVector::new(input.month, input.lag1, input.lag2, input.lag3)
}

/// Crop classifier input in order (N, P, K, temperature, humidity, pH, rainfall)
pub fn build_crop_vector(input: &CropInput) -> PipelineResult<CropFeatureVector> {
    let values = [
        input.n,
        input.p,
        input.k,
        input.temperature,
        input.humidity,
        input.ph,
        input.rainfall,
    ];
    if let Some(index) = values.iter().position(|v| !v.is_finite()) {
        return Err(PipelineError::validation(
            CROP_FEATURE_NAMES[index],
            "value must be finite",
        ));
    }
    Ok(CropFeatureVector::from_ordered(values))
}

/// Validate an untyped caller mapping and build the crop vector from it
pub fn build_crop_vector_from_raw(raw: &RawCropInput) -> PipelineResult<CropFeatureVector> {
    build_crop_vector(&raw.validate()?)
}

/// Mean of the three lags.
///
/// Only for degraded operation when no rainfall model is configured.
pub fn estimate_rainfall_from_lags(lag1: f64, lag2: f64, lag3: f64) -> f64 {
    (lag1 + lag2 + lag3) / 3.0
}
