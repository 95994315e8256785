//! Rule-based agronomy lookups served alongside the models

use serde::Deserialize;
use shared::{
    checked, sample_scenarios, validate_non_negative, FertilizerPlan, PipelineError,
    PipelineResult, RawValue, Scenario,
};

/// Input for a fertilizer plan
#[derive(Debug, Deserialize)]
pub struct FertilizerRequest {
    #[serde(default)]
    pub crop: Option<String>,
    #[serde(rename = "N", default)]
    pub n: Option<RawValue>,
    #[serde(rename = "P", default)]
    pub p: Option<RawValue>,
    #[serde(rename = "K", default)]
    pub k: Option<RawValue>,
}

/// Nutrient gap and product quantities for the requested crop
pub fn fertilizer_plan(request: &FertilizerRequest) -> PipelineResult<FertilizerPlan> {
    let crop = request
        .crop
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .ok_or_else(|| PipelineError::validation("crop", "field is required"))?;
    let n = checked("N", request.n.as_ref(), validate_non_negative)?;
    let p = checked("P", request.p.as_ref(), validate_non_negative)?;
    let k = checked("K", request.k.as_ref(), validate_non_negative)?;

    Ok(FertilizerPlan::for_crop(crop, n, p, k))
}

pub fn scenarios() -> Vec<Scenario> {
    sample_scenarios()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fertilizer_plan_for_rice() {
        let request: FertilizerRequest = serde_json::from_value(serde_json::json!({
            "crop": "Rice", "N": 60, "P": 50, "K": 20
        }))
        .unwrap();
        let plan = fertilizer_plan(&request).unwrap();
        assert_eq!(plan.need.n, 40.0);
        assert_eq!(plan.need.p, 0.0);
        assert_eq!(plan.products.urea_kg_per_acre, 87.0);
        assert_eq!(plan.products.mop_kg_per_acre, 50.0);
    }

    #[test]
    fn test_fertilizer_plan_requires_crop() {
        let request: FertilizerRequest =
            serde_json::from_value(serde_json::json!({ "N": 60, "P": 50, "K": 20 })).unwrap();
        let err = fertilizer_plan(&request).unwrap_err();
        assert_eq!(err.field(), Some("crop"));
    }

    #[test]
    fn test_fertilizer_plan_rejects_negative_potassium() {
        let request: FertilizerRequest = serde_json::from_value(serde_json::json!({
            "crop": "maize", "N": 1, "P": 1, "K": -3
        }))
        .unwrap();
        assert_eq!(fertilizer_plan(&request).unwrap_err().field(), Some("K"));
    }
}
