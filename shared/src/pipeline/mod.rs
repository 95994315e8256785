//! Prediction pipeline: validation, rainfall forecast, crop recommendation, advisory
//!
//! The pipeline is the single place where caller input becomes model feature
//! vectors. It holds only immutable bound models, so one instance can serve
//! concurrent callers without locking.

mod advisory;
mod crop;
mod rainfall;

pub use advisory::{generate_advisory, RainfallBand};
pub use crop::{CropRecommendation, CropRecommender, TOP_K};
pub use rainfall::RainfallPredictor;

use crate::error::PipelineResult;
use crate::features::estimate_rainfall_from_lags;
use crate::models::{
    CropInput, PredictionInput, PredictionResult, RainfallInput, RawPredictionInput,
};
use crate::types::RainfallSource;

/// How the pipeline obtains the rainfall figure fed to the crop model
#[derive(Debug, Clone)]
enum RainfallStage {
    Model(RainfallPredictor),
    LagAverage,
}

/// Chains the rainfall forecast into the crop recommendation
#[derive(Debug, Clone)]
pub struct PredictionPipeline {
    rainfall: RainfallStage,
    recommender: CropRecommender,
}

impl PredictionPipeline {
    pub fn new(rainfall: RainfallPredictor, recommender: CropRecommender) -> Self {
        Self {
            rainfall: RainfallStage::Model(rainfall),
            recommender,
        }
    }

    /// Degraded pipeline that estimates rainfall as the mean of the lags
    pub fn with_lag_average(recommender: CropRecommender) -> Self {
        tracing::warn!("no rainfall model bound; forecasts fall back to the lag average");
        Self {
            rainfall: RainfallStage::LagAverage,
            recommender,
        }
    }

    pub fn rainfall_source(&self) -> RainfallSource {
        match self.rainfall {
            RainfallStage::Model(_) => RainfallSource::Model,
            RainfallStage::LagAverage => RainfallSource::LagAverage,
        }
    }

    pub fn rainfall_predictor(&self) -> Option<&RainfallPredictor> {
        match &self.rainfall {
            RainfallStage::Model(predictor) => Some(predictor),
            RainfallStage::LagAverage => None,
        }
    }

    pub fn crop_recommender(&self) -> &CropRecommender {
        &self.recommender
    }

    /// Validate caller input and run the full chain
    pub fn run(&self, raw: &RawPredictionInput) -> PipelineResult<PredictionResult> {
        let input = raw.validate()?;
        self.run_validated(&input)
    }

    pub fn run_validated(&self, input: &PredictionInput) -> PipelineResult<PredictionResult> {
        let predicted_rainfall = self.forecast_rainfall(&input.rainfall_input());
        let recommendation = self
            .recommender
            .recommend(&input.crop_input(predicted_rainfall))?;
        let advisory = generate_advisory(&recommendation.crop, predicted_rainfall);

        Ok(PredictionResult {
            predicted_rainfall,
            rainfall_source: self.rainfall_source(),
            recommended_crop: recommendation.crop,
            confidence: recommendation.confidence,
            alternatives: recommendation.alternatives,
            advisory,
        })
    }

    /// Rainfall for a validated lag window, from the model or the lag average
    pub fn forecast_rainfall(&self, input: &RainfallInput) -> f64 {
        match &self.rainfall {
            RainfallStage::Model(predictor) => predictor.forecast_input(input),
            RainfallStage::LagAverage => {
                estimate_rainfall_from_lags(input.lag1, input.lag2, input.lag3)
            }
        }
    }

    /// Crop recommendation for an explicit rainfall value
    pub fn recommend_crop(&self, input: &CropInput) -> PipelineResult<CropRecommendation> {
        self.recommender.recommend(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PipelineError;
    use crate::ml::ModelArtifact;
    use crate::models::RawValue;

    const RAIN: &str = r#"{
        "kind": "linear_regressor",
        "name": "rain_linear",
        "coefficients": [0.0, 0.5, 0.3, 0.2],
        "intercept": 0.0
    }"#;

    const CROP: &str = r#"{
        "kind": "random_forest_classifier",
        "name": "crop_rf",
        "n_features": 7,
        "classes": ["chickpea", "maize", "rice"],
        "trees": [
            {"nodes": [
                {"feature": 6, "threshold": 150.0, "left": 1, "right": 2},
                {"value": [6.0, 4.0, 0.0]},
                {"value": [0.0, 2.0, 8.0]}
            ]}
        ]
    }"#;

    fn pipeline() -> PredictionPipeline {
        let rain = ModelArtifact::from_json_str("rainfall", RAIN)
            .unwrap()
            .into_regressor("rainfall", 4)
            .unwrap();
        let crop = ModelArtifact::from_json_str("crop", CROP)
            .unwrap()
            .into_classifier("crop", 7)
            .unwrap();
        PredictionPipeline::new(
            RainfallPredictor::new(rain).unwrap(),
            CropRecommender::new(crop).unwrap(),
        )
    }

    fn wet_input() -> PredictionInput {
        PredictionInput {
            month: 9,
            lag1: 260.0,
            lag2: 230.0,
            lag3: 210.0,
            n: 100.0,
            p: 55.0,
            k: 60.0,
            temperature: 28.0,
            humidity: 85.0,
            ph: 6.4,
        }
    }

    #[test]
    fn test_forecast_feeds_crop_model() {
        let result = pipeline().run_validated(&wet_input()).unwrap();
        // 0.5*260 + 0.3*230 + 0.2*210
        assert!((result.predicted_rainfall - 241.0).abs() < 1e-9);
        assert_eq!(result.recommended_crop, "rice");
        assert_eq!(result.confidence, 0.8);
        assert_eq!(result.alternatives.len(), 3);
        assert!(result.advisory.contains("good monsoon"));
        assert_eq!(result.rainfall_source, RainfallSource::Model);
    }

    #[test]
    fn test_lag_average_fallback() {
        let crop = pipeline().crop_recommender().clone();
        let degraded = PredictionPipeline::with_lag_average(crop);
        let result = degraded.run_validated(&wet_input()).unwrap();
        assert!((result.predicted_rainfall - 700.0 / 3.0).abs() < 1e-9);
        assert_eq!(result.rainfall_source, RainfallSource::LagAverage);
        assert!(degraded.rainfall_predictor().is_none());
    }

    #[test]
    fn test_missing_field_returns_no_result() {
        let mut raw = RawPredictionInput::from(wet_input());
        raw.ph = None;
        assert!(matches!(
            pipeline().run(&raw),
            Err(PipelineError::Validation { ref field, .. }) if field == "pH"
        ));
    }

    #[test]
    fn test_non_numeric_field() {
        let mut raw = RawPredictionInput::from(wet_input());
        raw.lag3 = Some(RawValue::Text("n/a".to_string()));
        assert_eq!(pipeline().run(&raw).unwrap_err().field(), Some("lag3"));
    }
}
