//! Linear regression inference: `coefficients · x + intercept`

use serde::{Deserialize, Serialize};

use super::Regressor;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LinearRegressor {
    pub name: String,
    pub coefficients: Vec<f64>,
    pub intercept: f64,
}

impl LinearRegressor {
    pub fn validate(&self) -> Result<(), String> {
        if self.coefficients.is_empty() {
            return Err("regressor has no coefficients".to_string());
        }
        if !self.intercept.is_finite() || !self.coefficients.iter().all(|c| c.is_finite()) {
            return Err("regressor has non-finite weights".to_string());
        }
        Ok(())
    }
}

impl Regressor for LinearRegressor {
    fn name(&self) -> &str {
        &self.name
    }

    fn n_features(&self) -> usize {
        self.coefficients.len()
    }

    fn predict(&self, features: &[f64]) -> f64 {
        self.coefficients
            .iter()
            .zip(features)
            .map(|(w, x)| w * x)
            .sum::<f64>()
            + self.intercept
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_prediction() {
        let model = LinearRegressor {
            name: "rain_linear".to_string(),
            coefficients: vec![0.0, 0.5, 0.3, 0.2],
            intercept: 10.0,
        };
        assert!(model.validate().is_ok());
        assert_eq!(model.n_features(), 4);
        assert!((model.predict(&[9.0, 100.0, 100.0, 100.0]) - 110.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_coefficients_rejected() {
        let model = LinearRegressor {
            name: "empty".to_string(),
            coefficients: vec![],
            intercept: 0.0,
        };
        assert!(model.validate().is_err());
    }
}
