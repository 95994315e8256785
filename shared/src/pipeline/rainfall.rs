//! Next-month rainfall forecast from the lag window

use crate::error::PipelineResult;
use crate::features::build_rainfall_vector;
use crate::ml::RegressorBinding;
use crate::models::{RainfallInput, RawRainfallInput, RAINFALL_FEATURE_COUNT};

/// Wraps a regressor trained on (month, lag1, lag2, lag3) -> rainfall
#[derive(Debug, Clone)]
pub struct RainfallPredictor {
    model: RegressorBinding,
}

impl RainfallPredictor {
    pub const COMPONENT: &'static str = "rainfall";

    pub fn new(model: RegressorBinding) -> PipelineResult<Self> {
        model.ensure_width(Self::COMPONENT, RAINFALL_FEATURE_COUNT)?;
        Ok(Self { model })
    }

    pub fn model(&self) -> &RegressorBinding {
        &self.model
    }

    /// Forecast rainfall in mm.
    ///
    /// Month must be in 1..=12 and lags non-negative; violations are
    /// validation errors, never clamped.
    pub fn forecast(&self, month: u8, lag1: f64, lag2: f64, lag3: f64) -> PipelineResult<f64> {
        let input = RawRainfallInput {
            month: Some(f64::from(month).into()),
            lag1: Some(lag1.into()),
            lag2: Some(lag2.into()),
            lag3: Some(lag3.into()),
        }
        .validate()?;
        Ok(self.forecast_input(&input))
    }

    /// Forecast for an already validated window
    pub fn forecast_input(&self, input: &RainfallInput) -> f64 {
        let vector = build_rainfall_vector(input);
        let forecast = self.model.predict(&vector.to_array());
        tracing::debug!(
            month = input.month,
            lag1 = input.lag1,
            lag2 = input.lag2,
            lag3 = input.lag3,
            forecast,
            "rainfall forecast"
        );
        forecast
    }
}
