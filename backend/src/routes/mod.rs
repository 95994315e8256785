//! Route definitions for the Smart Agro Assistant API

use axum::{
    routing::{get, post},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Prediction pipeline
        .route("/predict", post(handlers::predict))
        .route("/rainfall", post(handlers::predict_rainfall))
        .route("/recommend-crop", post(handlers::recommend_crop))
        // Agronomy lookups
        .route("/fertilizer", post(handlers::get_fertilizer_plan))
        .route("/scenarios", get(handlers::get_scenarios))
        // Model evaluation
        .route("/evaluation", get(handlers::get_evaluation))
}
