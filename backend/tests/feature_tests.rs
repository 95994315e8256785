//! Feature construction tests
//!
//! Tests for the FeatureBuilder including:
//! - Lag alignment within a region
//! - Daily aggregation
//! - Fixed crop vector ordering

use proptest::prelude::*;
use shared::{
    aggregate_daily, build_crop_vector, build_crop_vector_from_raw,
    build_rainfall_training_table, estimate_rainfall_from_lags, CropInput, DailyRainfallRecord,
    PipelineError, RainfallObservation, RawCropInput, RegionKey, CROP_FEATURE_COUNT,
};

fn obs(district: &str, month: u8, total: f64) -> RainfallObservation {
    RainfallObservation {
        region: RegionKey::new("Karnataka", district),
        month,
        total_rainfall: total,
    }
}

// ============================================================================
// Lag Table Tests
// ============================================================================

mod lag_table {
    use super::*;

    #[test]
    fn four_months_yield_one_row() {
        let observations = vec![
            obs("Mysuru", 1, 10.0),
            obs("Mysuru", 2, 20.0),
            obs("Mysuru", 3, 30.0),
            obs("Mysuru", 4, 40.0),
        ];
        let table = build_rainfall_training_table(&observations);

        assert_eq!(table.len(), 1);
        let row = table.features[0];
        assert_eq!(row.month, 4.0);
        assert_eq!(row.lag1, 30.0);
        assert_eq!(row.lag2, 20.0);
        assert_eq!(row.lag3, 10.0);
        assert_eq!(table.targets, vec![40.0]);
    }

    #[test]
    fn unsorted_input_is_sorted_by_month() {
        let observations = vec![
            obs("Mysuru", 4, 40.0),
            obs("Mysuru", 2, 20.0),
            obs("Mysuru", 1, 10.0),
            obs("Mysuru", 3, 30.0),
        ];
        let table = build_rainfall_training_table(&observations);
        assert_eq!(table.features[0].lag1, 30.0);
    }

    #[test]
    fn regions_never_share_lags() {
        let observations = vec![
            obs("Mysuru", 1, 10.0),
            obs("Mysuru", 2, 20.0),
            obs("Udupi", 3, 300.0),
            obs("Mysuru", 3, 30.0),
            obs("Mysuru", 4, 40.0),
            obs("Udupi", 4, 400.0),
        ];
        let table = build_rainfall_training_table(&observations);
        assert_eq!(table.len(), 1);
        assert_eq!(table.features[0].lag1, 30.0);
    }

    #[test]
    fn short_history_is_dropped() {
        let table = build_rainfall_training_table(&[obs("Mysuru", 1, 1.0), obs("Mysuru", 2, 2.0)]);
        assert!(table.is_empty());
    }

    #[test]
    fn daily_readings_sum_skipping_missing_days() {
        let records = vec![DailyRainfallRecord {
            region: RegionKey::new("Kerala", "Idukki"),
            month: 7,
            daily: vec![Some(12.5), None, Some(7.5), Some(0.0)],
        }];
        let observations = aggregate_daily(&records);
        assert_eq!(observations.len(), 1);
        assert_eq!(observations[0].total_rainfall, 20.0);
        assert_eq!(observations[0].month, 7);
    }

    #[test]
    fn lag_average_is_the_mean() {
        assert_eq!(estimate_rainfall_from_lags(60.0, 55.0, 50.0), 55.0);
    }
}

// ============================================================================
// Crop Vector Tests
// ============================================================================

mod crop_vector {
    use super::*;

    #[test]
    fn vector_follows_training_order() {
        let input = CropInput {
            n: 1.0,
            p: 2.0,
            k: 3.0,
            temperature: 4.0,
            humidity: 5.0,
            ph: 6.0,
            rainfall: 7.0,
        };
        let vector = build_crop_vector(&input).unwrap();

        assert_eq!(vector.len(), CROP_FEATURE_COUNT);
        assert_eq!(vector.as_slice(), &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0]);
        assert_eq!(vector.at(5), Some(6.0));
        assert_eq!(vector.at(7), None);
        assert_eq!(vector.rainfall(), 7.0);
    }

    #[test]
    fn non_finite_reading_names_its_field() {
        let input = CropInput {
            n: 1.0,
            p: 2.0,
            k: 3.0,
            temperature: 4.0,
            humidity: f64::NAN,
            ph: 6.0,
            rainfall: 7.0,
        };
        let err = build_crop_vector(&input).unwrap_err();
        assert_eq!(err, PipelineError::validation("humidity", "value must be finite"));
    }

    #[test]
    fn raw_mapping_without_rainfall_fails() {
        let raw: RawCropInput = serde_json::from_value(serde_json::json!({
            "N": 90, "P": 42, "K": 43, "temperature": 20.8, "humidity": 82, "pH": 6.5
        }))
        .unwrap();
        assert_eq!(build_crop_vector_from_raw(&raw).unwrap_err().field(), Some("rainfall"));
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    /// Strategy for generating a region's monthly totals, January first
    fn series_strategy() -> impl Strategy<Value = Vec<f64>> {
        prop::collection::vec(0.0f64..600.0, 0..=12)
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Each row's lags are the three preceding totals of the same region
        #[test]
        fn prop_lag_alignment(a in series_strategy(), b in series_strategy()) {
            let mut observations = Vec::new();
            for (i, total) in a.iter().enumerate() {
                observations.push(obs("A", i as u8 + 1, *total));
            }
            for (i, total) in b.iter().enumerate() {
                observations.push(obs("B", i as u8 + 1, *total));
            }

            let table = build_rainfall_training_table(&observations);
            let expected_rows = a.len().saturating_sub(3) + b.len().saturating_sub(3);
            prop_assert_eq!(table.len(), expected_rows);
            prop_assert_eq!(table.features.len(), table.targets.len());

            // Region A rows come first, ordered by month
            for (row, series_index) in table.features.iter().zip(3..a.len()) {
                prop_assert_eq!(row.month, (series_index + 1) as f64);
                prop_assert_eq!(row.lag1, a[series_index - 1]);
                prop_assert_eq!(row.lag2, a[series_index - 2]);
                prop_assert_eq!(row.lag3, a[series_index - 3]);
            }
        }

        /// The crop vector always has seven finite entries in input order
        #[test]
        fn prop_crop_vector_order(values in prop::array::uniform7(0.0f64..500.0)) {
            let input = CropInput {
                n: values[0],
                p: values[1],
                k: values[2],
                temperature: values[3],
                humidity: values[4],
                ph: values[5],
                rainfall: values[6],
            };
            let vector = build_crop_vector(&input).unwrap();
            prop_assert_eq!(vector.as_slice(), &values[..]);
        }
    }
}
