//! HTTP handlers for the Smart Agro Assistant API

pub mod agronomy;
pub mod evaluation;
pub mod health;
pub mod prediction;

use axum::extract::rejection::JsonRejection;
use axum::Json;

use crate::error::{AppError, AppResult};

pub use agronomy::{get_fertilizer_plan, get_scenarios};
pub use evaluation::get_evaluation;
pub use health::health_check;
pub use prediction::{predict, predict_rainfall, recommend_crop};

/// Unwrap a JSON body, turning extractor rejections into the error envelope
fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> AppResult<T> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| AppError::MalformedBody(rejection.body_text()))
}
