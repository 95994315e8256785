//! Health check handlers

use axum::{extract::State, Json};
use serde::Serialize;

use crate::services::prediction::ModelStatus;
use crate::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub environment: String,
    pub models: ModelStatus,
    pub evaluation_available: bool,
}

/// Health check endpoint handler
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let models = state.prediction.status();
    let status = if models.degraded_reason.is_some() {
        "degraded"
    } else {
        "healthy"
    };

    Json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        environment: state.config.environment.clone(),
        models,
        evaluation_available: state.evaluation.is_some(),
    })
}
