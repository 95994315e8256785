//! HTTP handlers for the prediction endpoints

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use shared::{RawCropInput, RawPredictionInput, RawRainfallInput};

use super::json_body;
use crate::error::AppResult;
use crate::services::prediction::{
    CropRecommendationResponse, PredictionResponse, RainfallForecast,
};
use crate::AppState;

/// Run the full rainfall -> crop -> advisory pipeline
pub async fn predict(
    State(state): State<AppState>,
    payload: Result<Json<RawPredictionInput>, JsonRejection>,
) -> AppResult<Json<PredictionResponse>> {
    let input = json_body(payload)?;
    let response = state.prediction.predict(&input)?;
    Ok(Json(response))
}

/// Forecast monthly rainfall from the lag window
pub async fn predict_rainfall(
    State(state): State<AppState>,
    payload: Result<Json<RawRainfallInput>, JsonRejection>,
) -> AppResult<Json<RainfallForecast>> {
    let input = json_body(payload)?;
    let forecast = state.prediction.forecast_rainfall(&input)?;
    Ok(Json(forecast))
}

/// Rank crops for soil readings and an explicit rainfall value
pub async fn recommend_crop(
    State(state): State<AppState>,
    payload: Result<Json<RawCropInput>, JsonRejection>,
) -> AppResult<Json<CropRecommendationResponse>> {
    let input = json_body(payload)?;
    let recommendation = state.prediction.recommend_crop(&input)?;
    Ok(Json(recommendation))
}
