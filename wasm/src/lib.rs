//! WebAssembly module for the Smart Agro Assistant
//!
//! Provides client-side computation for:
//! - Advisory text and rainfall levels
//! - Lag-average rainfall estimates
//! - Offline input validation
//! - Fertilizer plans and crop display names

use wasm_bindgen::prelude::*;

// Re-export shared types for use in JavaScript
pub use shared::models::*;
pub use shared::types::*;
pub use shared::validation::*;

/// Advisory text for a crop and a rainfall amount
#[wasm_bindgen]
pub fn advisory_text(crop: &str, rainfall_mm: f64) -> String {
    shared::generate_advisory(crop, rainfall_mm)
}

/// Rainfall level label (e.g. "Good / Adequate")
#[wasm_bindgen]
pub fn classify_rainfall_level(rainfall_mm: f64) -> String {
    RainfallLevel::classify(rainfall_mm).to_string()
}

/// Field tasks for the next seven days at a rainfall level, as a JSON array
#[wasm_bindgen]
pub fn rainfall_field_tasks(rainfall_mm: f64) -> String {
    let tasks = RainfallLevel::classify(rainfall_mm).field_tasks();
    serde_json::to_string(tasks).unwrap_or_else(|_| "[]".to_string())
}

/// Mean of the three lags, for use without a rainfall model
#[wasm_bindgen]
pub fn estimate_rainfall_from_lags(lag1: f64, lag2: f64, lag3: f64) -> f64 {
    shared::estimate_rainfall_from_lags(lag1, lag2, lag3)
}

/// Validate a prediction form and return the normalized input as JSON
#[wasm_bindgen]
pub fn validate_prediction_input(input_json: &str) -> Result<String, JsValue> {
    let raw: RawPredictionInput = serde_json::from_str(input_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid input JSON: {}", e)))?;

    let input = raw.validate().map_err(|e| {
        let message = JsValue::from_str(&e.to_string());
        web_sys::console::warn_1(&message);
        message
    })?;
    serde_json::to_string(&input).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Name of the first invalid field in a prediction form, if any
#[wasm_bindgen]
pub fn first_invalid_field(input_json: &str) -> Option<String> {
    let raw: RawPredictionInput = match serde_json::from_str(input_json) {
        Ok(raw) => raw,
        Err(_) => return Some("body".to_string()),
    };
    raw.validate().err().and_then(|e| e.field().map(str::to_string))
}

/// Display name with emoji for a crop label
#[wasm_bindgen]
pub fn crop_display_name(crop: &str) -> String {
    shared::crop_display_name(crop)
}

/// Fertilizer plan for a crop and current soil N/P/K, as JSON
#[wasm_bindgen]
pub fn fertilizer_plan(crop: &str, n: f64, p: f64, k: f64) -> Result<String, JsValue> {
    let plan = FertilizerPlan::for_crop(crop, n, p, k);
    serde_json::to_string(&plan).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Season phase for a month as JSON, or null outside 1-12
#[wasm_bindgen]
pub fn season_for_month(month: u8) -> String {
    serde_json::to_string(&shared::season_for_month(month)).unwrap_or_else(|_| "null".to_string())
}

/// Names of the demonstration scenarios
#[wasm_bindgen]
pub fn sample_scenario_names() -> js_sys::Array {
    sample_scenarios()
        .into_iter()
        .map(|scenario| JsValue::from_str(&scenario.name))
        .collect()
}

/// A demonstration scenario's input as JSON, by position
#[wasm_bindgen]
pub fn sample_scenario_input(index: usize) -> Option<String> {
    let scenario = sample_scenarios().into_iter().nth(index)?;
    serde_json::to_string(&scenario.input).ok()
}
