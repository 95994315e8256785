//! Prediction service: owns the immutable pipeline and audits every invocation

use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use shared::{
    crop_display_name, estimate_rainfall_from_lags, load_classifier, load_regressor,
    season_for_month, ClassifierCapability, CropRecommender, PipelineError, PipelineResult,
    PredictionPipeline, PredictionResult, RainfallInput, RainfallLevel, RainfallPredictor,
    RainfallSource, RawCropInput, RawPredictionInput, RawRainfallInput, SeasonInfo,
    CROP_FEATURE_COUNT, RAINFALL_FEATURE_COUNT,
};
use uuid::Uuid;

use crate::config::ModelsConfig;

/// Target of the passive audit log
pub const AUDIT_TARGET: &str = "prediction_audit";

/// Models bound at startup
enum ModelState {
    Ready(PredictionPipeline),
    /// The crop model failed to load and degraded start was allowed
    CropUnavailable {
        rainfall: Option<RainfallPredictor>,
        reason: String,
    },
}

/// Prediction service for the HTTP layer
#[derive(Clone)]
pub struct PredictionService {
    state: Arc<ModelState>,
}

/// Result of `/predict`, the flat pipeline record plus transport metadata
#[derive(Debug, Serialize)]
pub struct PredictionResponse {
    pub request_id: Uuid,
    #[serde(flatten)]
    pub result: PredictionResult,
    pub main_crop_display: String,
}

/// Result of `/rainfall`
#[derive(Debug, Serialize)]
pub struct RainfallForecast {
    pub month: u8,
    pub rainfall: f64,
    pub unit: &'static str,
    pub source: RainfallSource,
    pub level: RainfallLevel,
    pub level_label: String,
    pub tasks: Vec<String>,
    pub season: Option<SeasonInfo>,
}

/// Result of `/recommend-crop`
#[derive(Debug, Serialize)]
pub struct CropRecommendationResponse {
    pub crop: String,
    pub display_name: String,
    pub confidence: f64,
    pub top3: Vec<String>,
    pub top3_probs: Vec<f64>,
}

/// Which models are bound, for the health endpoint
#[derive(Debug, Serialize)]
pub struct ModelStatus {
    pub rainfall_model: Option<String>,
    pub rainfall_source: RainfallSource,
    pub crop_model: Option<String>,
    pub crop_capability: Option<ClassifierCapability>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub degraded_reason: Option<String>,
}

impl PredictionService {
    /// Load and bind the configured artifacts.
    ///
    /// Missing or malformed artifacts fail here, before the server listens,
    /// unless the matching degraded mode is enabled.
    pub fn from_config(models: &ModelsConfig) -> PipelineResult<Self> {
        let rainfall = match models.rainfall_artifact() {
            Some(path) => {
                let binding = load_regressor(
                    RainfallPredictor::COMPONENT,
                    path,
                    RAINFALL_FEATURE_COUNT,
                )?;
                Some(RainfallPredictor::new(binding)?)
            }
            None if models.allow_lag_average_fallback => {
                tracing::warn!("No rainfall model configured, using the lag average");
                None
            }
            None => {
                return Err(PipelineError::unavailable(
                    RainfallPredictor::COMPONENT,
                    "no artifact configured and lag-average fallback is disabled",
                ))
            }
        };

        let crop = load_classifier(CropRecommender::COMPONENT, &models.crop_path, CROP_FEATURE_COUNT)
            .and_then(CropRecommender::new);

        match crop {
            Ok(recommender) => Ok(Self::from_parts(rainfall, recommender)),
            Err(err) if models.allow_degraded_start => {
                tracing::error!("Starting without a crop model: {}", err);
                Ok(Self::degraded(rainfall, err.to_string()))
            }
            Err(err) => Err(err),
        }
    }

    /// Build a ready service from already bound components
    pub fn from_parts(rainfall: Option<RainfallPredictor>, recommender: CropRecommender) -> Self {
        let pipeline = match rainfall {
            Some(predictor) => PredictionPipeline::new(predictor, recommender),
            None => PredictionPipeline::with_lag_average(recommender),
        };
        Self {
            state: Arc::new(ModelState::Ready(pipeline)),
        }
    }

    /// Build a service whose crop model is unavailable
    pub fn degraded(rainfall: Option<RainfallPredictor>, reason: impl Into<String>) -> Self {
        Self {
            state: Arc::new(ModelState::CropUnavailable {
                rainfall,
                reason: reason.into(),
            }),
        }
    }

    fn pipeline(&self) -> PipelineResult<&PredictionPipeline> {
        match self.state.as_ref() {
            ModelState::Ready(pipeline) => Ok(pipeline),
            ModelState::CropUnavailable { reason, .. } => Err(PipelineError::unavailable(
                CropRecommender::COMPONENT,
                reason.clone(),
            )),
        }
    }

    /// The bound rainfall predictor, if any
    pub fn rainfall_predictor(&self) -> Option<&RainfallPredictor> {
        match self.state.as_ref() {
            ModelState::Ready(pipeline) => pipeline.rainfall_predictor(),
            ModelState::CropUnavailable { rainfall, .. } => rainfall.as_ref(),
        }
    }

    /// The bound crop recommender, if any
    pub fn crop_recommender(&self) -> Option<&CropRecommender> {
        self.pipeline().ok().map(PredictionPipeline::crop_recommender)
    }

    pub fn status(&self) -> ModelStatus {
        let rainfall_model = self
            .rainfall_predictor()
            .map(|p| p.model().name().to_string());
        let rainfall_source = if rainfall_model.is_some() {
            RainfallSource::Model
        } else {
            RainfallSource::LagAverage
        };
        let crop = self.crop_recommender();

        ModelStatus {
            rainfall_model,
            rainfall_source,
            crop_model: crop.map(|c| c.model().name().to_string()),
            crop_capability: crop.map(CropRecommender::capability),
            degraded_reason: match self.state.as_ref() {
                ModelState::Ready(_) => None,
                ModelState::CropUnavailable { reason, .. } => Some(reason.clone()),
            },
        }
    }

    /// Run the full pipeline and emit one audit event
    pub fn predict(&self, raw: &RawPredictionInput) -> PipelineResult<PredictionResponse> {
        let request_id = Uuid::new_v4();
        let timestamp = Utc::now().to_rfc3339();

        let outcome = self.pipeline().and_then(|pipeline| {
            let input = raw.validate()?;
            let result = pipeline.run_validated(&input)?;
            Ok((input, result))
        });

        match outcome {
            Ok((input, result)) => {
                tracing::info!(
                    target: AUDIT_TARGET,
                    %request_id,
                    %timestamp,
                    ?input,
                    predicted_rainfall = result.predicted_rainfall,
                    rainfall_source = ?result.rainfall_source,
                    crop = %result.recommended_crop,
                    confidence = result.confidence,
                    "prediction served"
                );
                let main_crop_display = crop_display_name(&result.recommended_crop);
                Ok(PredictionResponse {
                    request_id,
                    result,
                    main_crop_display,
                })
            }
            Err(err) => {
                tracing::info!(
                    target: AUDIT_TARGET,
                    %request_id,
                    %timestamp,
                    error = %err,
                    "prediction rejected"
                );
                Err(err)
            }
        }
    }

    /// Forecast monthly rainfall and attach the agronomic reading of it
    pub fn forecast_rainfall(&self, raw: &RawRainfallInput) -> PipelineResult<RainfallForecast> {
        let input = raw.validate()?;
        let (rainfall, source) = self.rainfall_for(&input);
        let level = RainfallLevel::classify(rainfall);

        Ok(RainfallForecast {
            month: input.month,
            rainfall,
            unit: "mm",
            source,
            level,
            level_label: level.to_string(),
            tasks: level.field_tasks().iter().map(|t| t.to_string()).collect(),
            season: season_for_month(input.month),
        })
    }

    fn rainfall_for(&self, input: &RainfallInput) -> (f64, RainfallSource) {
        match self.state.as_ref() {
            ModelState::Ready(pipeline) => {
                (pipeline.forecast_rainfall(input), pipeline.rainfall_source())
            }
            ModelState::CropUnavailable {
                rainfall: Some(predictor),
                ..
            } => (predictor.forecast_input(input), RainfallSource::Model),
            ModelState::CropUnavailable { rainfall: None, .. } => (
                estimate_rainfall_from_lags(input.lag1, input.lag2, input.lag3),
                RainfallSource::LagAverage,
            ),
        }
    }

    /// Rank crops for an explicit rainfall value
    pub fn recommend_crop(&self, raw: &RawCropInput) -> PipelineResult<CropRecommendationResponse> {
        let pipeline = self.pipeline()?;
        let input = raw.validate()?;
        let recommendation = pipeline.recommend_crop(&input)?;
        tracing::debug!(crop = %recommendation.crop, confidence = recommendation.confidence, "crop recommended");

        let (top3, top3_probs): (Vec<String>, Vec<f64>) = recommendation
            .alternatives
            .iter()
            .map(|alt| (alt.crop.clone(), alt.score))
            .unzip();
        Ok(CropRecommendationResponse {
            display_name: crop_display_name(&recommendation.crop),
            crop: recommendation.crop,
            confidence: recommendation.confidence,
            top3,
            top3_probs,
        })
    }
}
