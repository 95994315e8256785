//! Bundled model artifact tests
//!
//! The demonstration artifacts under `models/` must bind with the widths the
//! pipeline expects and serve the sample scenarios.

use shared::{
    load_classifier, load_regressor, sample_scenarios, ClassifierCapability, CropInput,
    CropRecommender, PredictionPipeline, RainfallPredictor, CROP_FEATURE_COUNT,
    RAINFALL_FEATURE_COUNT,
};

const RAINFALL_MODEL: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../models/rainfall_model.json");
const CROP_MODEL: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../models/crop_model.json");

/// Per-label feature means (N, P, K, temperature, humidity, pH, rainfall)
const LABEL_MEANS: [(&str, [f64; 7]); 22] = [
    ("apple", [20.8, 134.22, 199.89, 22.63, 92.33, 5.93, 112.65]),
    ("banana", [100.23, 82.01, 50.05, 27.38, 80.36, 5.98, 104.63]),
    ("blackgram", [40.02, 67.47, 19.24, 29.97, 65.12, 7.13, 67.88]),
    ("chickpea", [40.09, 67.79, 79.92, 18.87, 16.86, 7.34, 80.06]),
    ("coconut", [21.98, 16.93, 30.59, 27.41, 94.84, 5.98, 175.69]),
    ("coffee", [101.2, 28.74, 29.94, 25.54, 58.87, 6.79, 158.07]),
    ("cotton", [117.77, 46.24, 19.56, 23.99, 79.84, 6.91, 80.4]),
    ("grapes", [23.18, 132.53, 200.11, 23.85, 81.88, 6.03, 69.61]),
    ("jute", [78.4, 46.86, 39.99, 24.96, 79.64, 6.73, 174.79]),
    ("kidneybeans", [20.75, 67.54, 20.05, 20.12, 21.61, 5.75, 105.92]),
    ("lentil", [18.77, 68.36, 19.41, 24.51, 64.8, 6.93, 45.68]),
    ("maize", [77.76, 48.44, 19.79, 22.39, 65.09, 6.25, 84.77]),
    ("mango", [20.07, 27.18, 29.92, 31.21, 50.16, 5.77, 94.7]),
    ("mothbeans", [21.44, 48.01, 20.23, 28.19, 53.16, 6.83, 51.2]),
    ("mungbean", [20.99, 47.28, 19.87, 28.53, 85.5, 6.72, 48.4]),
    ("muskmelon", [100.32, 17.72, 50.08, 28.66, 92.34, 6.36, 24.69]),
    ("orange", [19.58, 16.55, 10.01, 22.77, 92.17, 7.02, 110.47]),
    ("papaya", [49.88, 59.05, 50.04, 33.72, 92.4, 6.74, 142.63]),
    ("pigeonpeas", [20.73, 67.73, 20.29, 27.74, 48.06, 5.79, 149.46]),
    ("pomegranate", [18.87, 18.75, 40.21, 21.84, 90.13, 6.43, 107.53]),
    ("rice", [79.89, 47.58, 39.87, 23.69, 82.27, 6.43, 236.18]),
    ("watermelon", [99.42, 17.0, 50.22, 25.59, 85.16, 6.5, 50.79]),
];

fn bundled_recommender() -> CropRecommender {
    let crop = load_classifier("crop", CROP_MODEL, CROP_FEATURE_COUNT).unwrap();
    CropRecommender::new(crop).unwrap()
}

fn bundled_pipeline() -> PredictionPipeline {
    let rainfall = load_regressor("rainfall", RAINFALL_MODEL, RAINFALL_FEATURE_COUNT).unwrap();
    PredictionPipeline::new(RainfallPredictor::new(rainfall).unwrap(), bundled_recommender())
}

fn crop_input(values: [f64; 7]) -> CropInput {
    let [n, p, k, temperature, humidity, ph, rainfall] = values;
    CropInput {
        n,
        p,
        k,
        temperature,
        humidity,
        ph,
        rainfall,
    }
}

#[test]
fn crop_artifact_covers_all_labels_with_distribution() {
    let crop = load_classifier("crop", CROP_MODEL, CROP_FEATURE_COUNT).unwrap();
    assert_eq!(crop.classes().len(), 22);
    assert_eq!(crop.capability(), ClassifierCapability::Distribution);
    assert_eq!(crop.feature_importances().map(|f| f.len()), Some(7));
}

#[test]
fn rainfall_artifact_rejects_wrong_width() {
    assert!(load_regressor("rainfall", RAINFALL_MODEL, CROP_FEATURE_COUNT).is_err());
}

#[test]
fn high_rainfall_scenario_recommends_rice() {
    let scenario = &sample_scenarios()[0];
    let result = bundled_pipeline().run_validated(&scenario.input).unwrap();

    assert!((result.predicted_rainfall - 244.9).abs() < 1e-9);
    assert_eq!(result.recommended_crop, "rice");
    assert_eq!(result.alternatives.len(), 3);
    assert_eq!(result.alternatives[0].crop, "rice");
    assert_eq!(result.confidence, result.alternatives[0].score);
    assert!(result.confidence > 0.5 && result.confidence < 1.0);
    assert!(result.advisory.contains("good monsoon"));
}

#[test]
fn every_scenario_is_served_with_ranked_alternatives() {
    let pipeline = bundled_pipeline();
    for scenario in sample_scenarios() {
        let result = pipeline.run_validated(&scenario.input).unwrap();
        let alternatives = &result.alternatives;

        assert!(!alternatives.is_empty() && alternatives.len() <= 3, "{}", scenario.name);
        assert_eq!(alternatives[0].crop, result.recommended_crop, "{}", scenario.name);
        assert_eq!(result.confidence, alternatives[0].score, "{}", scenario.name);
        assert!((0.0..=1.0).contains(&result.confidence), "{}", scenario.name);
        for pair in alternatives.windows(2) {
            assert!(pair[0].score >= pair[1].score, "{}", scenario.name);
        }
    }
}

#[test]
fn every_label_mean_is_recommended_as_itself() {
    let recommender = bundled_recommender();
    for (label, means) in LABEL_MEANS {
        let recommendation = recommender.recommend(&crop_input(means)).unwrap();
        assert_eq!(recommendation.crop, label);
    }
}
