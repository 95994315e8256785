//! Validation utilities for the Smart Agro Assistant
//!
//! Ranges follow the agronomic input form: lags and nutrients are physical
//! quantities and cannot be negative, month is a calendar month.

use crate::error::{PipelineError, PipelineResult};
use crate::models::RawValue;

// ============================================================================
// Field gate
// ============================================================================

/// Require a numeric, finite value for `field` and apply a range check.
///
/// Missing values, non-numeric values and range violations all fail with a
/// validation error naming the field.
pub fn checked<T>(
    field: &str,
    value: Option<&RawValue>,
    check: impl Fn(f64) -> Result<T, &'static str>,
) -> PipelineResult<T> {
    let value = value.ok_or_else(|| PipelineError::validation(field, "field is required"))?;
    let number = value
        .as_number()
        .ok_or_else(|| PipelineError::validation(field, "value must be numeric"))?;
    if !number.is_finite() {
        return Err(PipelineError::validation(field, "value must be finite"));
    }
    check(number).map_err(|message| PipelineError::validation(field, message))
}

// ============================================================================
// Rainfall inputs
// ============================================================================

/// Validate a calendar month given as a number
pub fn validate_month(month: f64) -> Result<u8, &'static str> {
    if month.fract() != 0.0 {
        return Err("Month must be a whole number");
    }
    if !(1.0..=12.0).contains(&month) {
        return Err("Month must be between 1 and 12");
    }
    Ok(month as u8)
}

/// Validate a quantity that cannot be negative (rainfall, nutrients)
pub fn validate_non_negative(value: f64) -> Result<f64, &'static str> {
    if value < 0.0 {
        return Err("Value cannot be negative");
    }
    Ok(value)
}

// ============================================================================
// Soil and climate inputs
// ============================================================================

/// Validate air temperature in °C
pub fn validate_temperature(celsius: f64) -> Result<f64, &'static str> {
    if !(-10.0..=60.0).contains(&celsius) {
        return Err("Temperature must be between -10 and 60 °C");
    }
    Ok(celsius)
}

/// Validate relative humidity in percent
pub fn validate_humidity(percent: f64) -> Result<f64, &'static str> {
    if !(0.0..=100.0).contains(&percent) {
        return Err("Humidity must be between 0 and 100%");
    }
    Ok(percent)
}

/// Validate soil pH
pub fn validate_ph(ph: f64) -> Result<f64, &'static str> {
    if !(0.0..=14.0).contains(&ph) {
        return Err("pH must be between 0 and 14");
    }
    Ok(ph)
}
