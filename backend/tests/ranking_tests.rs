//! Ranked crop recommendation tests
//!
//! Tests for the classifier capabilities including:
//! - Stable, probability-descending ranking
//! - Confidence taken from the top-ranked class
//! - Point/ranked disagreement surfaced as an error

use std::sync::Arc;

use proptest::prelude::*;
use shared::{
    Classifier, ClassifierBinding, CropInput, CropRecommender, PipelineError,
    ProbabilisticClassifier, CROP_FEATURE_COUNT,
};

/// A classifier that returns a scripted distribution
struct Scripted {
    classes: Vec<String>,
    probabilities: Vec<f64>,
    point: Option<String>,
}

impl Scripted {
    fn new(probabilities: &[f64]) -> Self {
        Self {
            classes: (0..probabilities.len()).map(|i| format!("crop{}", i)).collect(),
            probabilities: probabilities.to_vec(),
            point: None,
        }
    }

    fn with_point(mut self, label: &str) -> Self {
        self.point = Some(label.to_string());
        self
    }
}

impl Classifier for Scripted {
    fn name(&self) -> &str {
        "scripted"
    }

    fn n_features(&self) -> usize {
        CROP_FEATURE_COUNT
    }

    fn classes(&self) -> &[String] {
        &self.classes
    }

    fn predict(&self, features: &[f64]) -> String {
        if let Some(point) = &self.point {
            return point.clone();
        }
        self.predict_ranked(features)
            .first()
            .map(|c| c.label.clone())
            .unwrap_or_default()
    }
}

impl ProbabilisticClassifier for Scripted {
    fn predict_proba(&self, _features: &[f64]) -> Vec<f64> {
        self.probabilities.clone()
    }
}

fn recommender(model: Scripted) -> CropRecommender {
    let binding = ClassifierBinding::distribution("crop", Arc::new(model), CROP_FEATURE_COUNT).unwrap();
    CropRecommender::new(binding).unwrap()
}

fn any_input() -> CropInput {
    CropInput {
        n: 60.0,
        p: 40.0,
        k: 50.0,
        temperature: 23.0,
        humidity: 55.0,
        ph: 6.2,
        rainfall: 55.0,
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

mod unit_tests {
    use super::*;

    #[test]
    fn ties_keep_class_order() {
        let ranked = Scripted::new(&[0.2, 0.4, 0.2, 0.2]).predict_ranked(&[]);
        let labels: Vec<&str> = ranked.iter().map(|c| c.label.as_str()).collect();
        assert_eq!(labels, vec!["crop1", "crop0", "crop2", "crop3"]);
    }

    #[test]
    fn top_three_only() {
        let recommendation = recommender(Scripted::new(&[0.1, 0.2, 0.3, 0.4]))
            .recommend(&any_input())
            .unwrap();
        assert_eq!(recommendation.crop, "crop3");
        assert_eq!(recommendation.confidence, 0.4);
        let crops: Vec<&str> = recommendation
            .alternatives
            .iter()
            .map(|a| a.crop.as_str())
            .collect();
        assert_eq!(crops, vec!["crop3", "crop2", "crop1"]);
    }

    #[test]
    fn fewer_than_three_classes() {
        let recommendation = recommender(Scripted::new(&[0.7, 0.3]))
            .recommend(&any_input())
            .unwrap();
        assert_eq!(recommendation.alternatives.len(), 2);
    }

    #[test]
    fn probabilities_are_not_renormalized() {
        let recommendation = recommender(Scripted::new(&[0.25, 0.25]))
            .recommend(&any_input())
            .unwrap();
        assert_eq!(recommendation.confidence, 0.25);
    }

    #[test]
    fn disagreement_is_an_inconsistency() {
        let model = Scripted::new(&[0.1, 0.9]).with_point("crop0");
        let err = recommender(model).recommend(&any_input()).unwrap_err();
        assert_eq!(
            err,
            PipelineError::ModelInconsistency {
                component: "crop".to_string(),
                point: "crop0".to_string(),
                ranked: "crop1".to_string(),
            }
        );
    }

    #[test]
    fn wrong_feature_width_is_rejected_at_bind_time() {
        let err = ClassifierBinding::distribution("crop", Arc::new(Scripted::new(&[1.0])), 4)
            .unwrap_err();
        assert!(matches!(
            err,
            PipelineError::FeatureShape { expected: 7, actual: 4, .. }
        ));
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    /// Strategy for generating distributions with frequent ties
    fn distribution_strategy() -> impl Strategy<Value = Vec<f64>> {
        prop::collection::vec(prop::sample::select(vec![0.0, 0.05, 0.1, 0.2, 0.3]), 1..10)
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Ranked output is descending and equal probabilities keep class order
        #[test]
        fn prop_stable_descending_ranking(probabilities in distribution_strategy()) {
            let ranked = Scripted::new(&probabilities).predict_ranked(&[]);
            prop_assert_eq!(ranked.len(), probabilities.len());

            for pair in ranked.windows(2) {
                prop_assert!(pair[0].probability >= pair[1].probability);
                if pair[0].probability == pair[1].probability {
                    let a: usize = pair[0].label.trim_start_matches("crop").parse().unwrap();
                    let b: usize = pair[1].label.trim_start_matches("crop").parse().unwrap();
                    prop_assert!(a < b);
                }
            }
        }

        /// Confidence is the top-ranked probability and leads the alternatives
        #[test]
        fn prop_confidence_is_top_probability(probabilities in distribution_strategy()) {
            let max = probabilities.iter().cloned().fold(f64::MIN, f64::max);
            let recommendation = recommender(Scripted::new(&probabilities))
                .recommend(&any_input())
                .unwrap();

            prop_assert_eq!(recommendation.confidence, max);
            prop_assert_eq!(recommendation.alternatives[0].score, max);
            prop_assert_eq!(&recommendation.alternatives[0].crop, &recommendation.crop);
            prop_assert!(recommendation.alternatives.len() <= 3);
        }
    }
}
