//! HTTP handlers for the rule-based agronomy lookups

use axum::{extract::rejection::JsonRejection, Json};
use shared::{FertilizerPlan, Scenario};

use super::json_body;
use crate::error::AppResult;
use crate::services::agronomy::{self, FertilizerRequest};

/// Fertilizer quantities to close the nutrient gap for a crop
pub async fn get_fertilizer_plan(
    payload: Result<Json<FertilizerRequest>, JsonRejection>,
) -> AppResult<Json<FertilizerPlan>> {
    let request = json_body(payload)?;
    let plan = agronomy::fertilizer_plan(&request)?;
    Ok(Json(plan))
}

/// Demonstration inputs
pub async fn get_scenarios() -> Json<Vec<Scenario>> {
    Json(agronomy::scenarios())
}
