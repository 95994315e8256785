//! Rainfall series models

use serde::{Deserialize, Serialize};

use crate::types::RegionKey;

/// Number of feature columns consumed by the rainfall regressor
pub const RAINFALL_FEATURE_COUNT: usize = 4;

/// Feature column names in model order
pub const RAINFALL_FEATURE_NAMES: [&str; RAINFALL_FEATURE_COUNT] = ["month", "lag1", "lag2", "lag3"];

/// Monthly rainfall total for one district
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RainfallObservation {
    pub region: RegionKey,
    pub month: u8,
    /// Sum of the daily readings for the month, in mm
    pub total_rainfall: f64,
}

/// One row of the raw daily rainfall table
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DailyRainfallRecord {
    pub region: RegionKey,
    pub month: u8,
    /// Readings for day 1, 2, ... ; `None` where the cell was blank or non-numeric
    pub daily: Vec<Option<f64>>,
}

impl DailyRainfallRecord {
    /// Sum of the present daily readings
    pub fn monthly_total(&self) -> f64 {
        self.daily.iter().flatten().sum()
    }
}

/// Input row for the rainfall regressor
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct RainfallFeatureVector {
    pub month: f64,
    pub lag1: f64,
    pub lag2: f64,
    pub lag3: f64,
}

impl RainfallFeatureVector {
    pub fn new(month: u8, lag1: f64, lag2: f64, lag3: f64) -> Self {
        Self {
            month: f64::from(month),
            lag1,
            lag2,
            lag3,
        }
    }

    /// Values in model order (month, lag1, lag2, lag3)
    pub fn to_array(&self) -> [f64; RAINFALL_FEATURE_COUNT] {
        [self.month, self.lag1, self.lag2, self.lag3]
    }
}

/// Supervised lag-feature table with features and targets aligned by row
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RainfallTrainingTable {
    pub features: Vec<RainfallFeatureVector>,
    pub targets: Vec<f64>,
}

impl RainfallTrainingTable {
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_monthly_total_skips_missing_days() {
        let record = DailyRainfallRecord {
            region: RegionKey::new("Assam", "Kamrup"),
            month: 6,
            daily: vec![Some(1.5), None, Some(2.5), Some(0.0)],
        };
        assert_eq!(record.monthly_total(), 4.0);
    }

    #[test]
    fn test_monthly_total_all_missing_is_zero() {
        let record = DailyRainfallRecord {
            region: RegionKey::new("Assam", "Kamrup"),
            month: 1,
            daily: vec![None; 31],
        };
        assert_eq!(record.monthly_total(), 0.0);
    }

    #[test]
    fn test_feature_vector_order() {
        let v = RainfallFeatureVector::new(9, 260.0, 230.0, 210.0);
        assert_eq!(v.to_array(), [9.0, 260.0, 230.0, 210.0]);
    }
}
