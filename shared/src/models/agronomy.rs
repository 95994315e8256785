//! Agronomy knowledge tables: rainfall levels, monsoon calendar, fertilizer targets

use serde::{Deserialize, Serialize};

/// Coarse classification of a monthly rainfall amount
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RainfallLevel {
    VeryLow,
    LowToModerate,
    Adequate,
    High,
    VeryHigh,
}

impl RainfallLevel {
    /// Classify a monthly total in mm
    pub fn classify(rainfall_mm: f64) -> Self {
        if rainfall_mm < 20.0 {
            RainfallLevel::VeryLow
        } else if rainfall_mm < 60.0 {
            RainfallLevel::LowToModerate
        } else if rainfall_mm < 120.0 {
            RainfallLevel::Adequate
        } else if rainfall_mm < 200.0 {
            RainfallLevel::High
        } else {
            RainfallLevel::VeryHigh
        }
    }

    /// Field tasks for the next seven days at this level
    pub fn field_tasks(&self) -> &'static [&'static str] {
        match self {
            RainfallLevel::VeryLow => &[
                "Plan supplemental irrigation if crop is in vegetative/flowering stage.",
                "Use mulching to conserve soil moisture and reduce evaporation.",
                "Avoid heavy nitrogen top-dressing until some moisture is available.",
            ],
            RainfallLevel::LowToModerate => &[
                "Good for early establishment; schedule light irrigation only if soil cracks.",
                "Plan weeding and intercultivation while soil is moist enough to work.",
                "Check canal/borewell availability in case the next spell is delayed.",
            ],
            RainfallLevel::Adequate => &[
                "Ideal window for nutrient application (top-dress N and K) if crop stage matches.",
                "Use this moisture to complete pending gap-filling or thinning.",
                "Monitor for foliar diseases after 3-4 continuous cloudy days.",
            ],
            RainfallLevel::High => &[
                "Inspect drainage channels and bunds to avoid standing water.",
                "Avoid entering fields with machinery until topsoil dries slightly.",
                "Watch for root diseases and nutrient leaching.",
            ],
            RainfallLevel::VeryHigh => &[
                "High risk of waterlogging; open emergency drains where possible.",
                "After the rain, check for lodging, root rot and yellowing from nutrient wash-out.",
                "Delay sowing/planting until the field is workable to avoid compaction.",
            ],
        }
    }
}

impl std::fmt::Display for RainfallLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            RainfallLevel::VeryLow => "Very Low",
            RainfallLevel::LowToModerate => "Low to Moderate",
            RainfallLevel::Adequate => "Good / Adequate",
            RainfallLevel::High => "High",
            RainfallLevel::VeryHigh => "Very High / Heavy",
        };
        write!(f, "{}", s)
    }
}

/// Monsoon calendar entry for a month
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SeasonInfo {
    pub month: u8,
    pub month_name: String,
    pub phase: String,
    pub typical: String,
}

const SEASONS: [(&str, &str); 12] = [
    ("Winter / Dry", "Very low rainfall; cool and dry conditions."),
    ("Winter / Pre-Heat", "Generally dry with slowly rising temperatures."),
    ("Pre-Monsoon", "Hotter days; occasional thunderstorms in some regions."),
    ("Pre-Monsoon", "Very warm; convective showers possible by evening."),
    ("Pre-Monsoon / Onset Prep", "Peak summer; first monsoon clouds build up in the south."),
    ("SW Monsoon Onset", "Monsoon sets in; rainfall quickly increases."),
    ("SW Monsoon Peak", "Very high rainfall; major water recharge month."),
    ("SW Monsoon Active", "Sustained monsoon with breaks; good crop moisture."),
    ("SW Monsoon Withdrawal", "Rains start reducing; transition to post-monsoon."),
    ("NE Monsoon / Post-Monsoon", "Rain in east and south; retreating monsoon showers."),
    ("NE Monsoon / Cool", "Rainy spells in some regions; temperatures start to drop."),
    ("Winter Onset", "Mostly dry and cooler; isolated showers possible."),
];

/// Monsoon calendar phase for a month in 1..=12
pub fn season_for_month(month: u8) -> Option<SeasonInfo> {
    let index = usize::from(month).checked_sub(1)?;
    let (phase, typical) = SEASONS.get(index)?;
    Some(SeasonInfo {
        month,
        month_name: crate::types::month_name(month)?.to_string(),
        phase: phase.to_string(),
        typical: typical.to_string(),
    })
}

/// Target N/P/K per acre for a crop
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct NutrientTargets {
    #[serde(rename = "N")]
    pub n: f64,
    #[serde(rename = "P")]
    pub p: f64,
    #[serde(rename = "K")]
    pub k: f64,
}

impl NutrientTargets {
    pub fn for_crop(crop: &str) -> Self {
        let (n, p, k) = match crop.trim().to_lowercase().as_str() {
            "rice" => (100.0, 50.0, 50.0),
            "wheat" => (90.0, 40.0, 40.0),
            "maize" => (120.0, 60.0, 40.0),
            _ => (80.0, 40.0, 40.0),
        };
        Self { n, p, k }
    }
}

/// Fertilizer product quantities in kg per acre
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct FertilizerProducts {
    pub urea_kg_per_acre: f64,
    pub dap_kg_per_acre: f64,
    pub mop_kg_per_acre: f64,
}

/// Nutrient gap and product plan for a recommended crop
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FertilizerPlan {
    pub crop: String,
    pub target: NutrientTargets,
    pub need: NutrientTargets,
    pub products: FertilizerProducts,
    pub note: String,
}

// Nutrient fraction of each product
const UREA_N: f64 = 0.46;
const DAP_P: f64 = 0.46;
const MOP_K: f64 = 0.60;

impl FertilizerPlan {
    pub fn for_crop(crop: &str, n: f64, p: f64, k: f64) -> Self {
        let target = NutrientTargets::for_crop(crop);
        let need = NutrientTargets {
            n: round1((target.n - n).max(0.0)),
            p: round1((target.p - p).max(0.0)),
            k: round1((target.k - k).max(0.0)),
        };
        let products = FertilizerProducts {
            urea_kg_per_acre: round1(need.n / UREA_N),
            dap_kg_per_acre: round1(need.p / DAP_P),
            mop_kg_per_acre: round1(need.k / MOP_K),
        };

        Self {
            crop: crop.to_string(),
            target,
            need,
            products,
            note: "Approximate per-acre quantities from a generic recommendation. \
                   Fine-tune using local soil test reports and agronomist advice."
                .to_string(),
        }
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rainfall_level_bands() {
        assert_eq!(RainfallLevel::classify(0.0), RainfallLevel::VeryLow);
        assert_eq!(RainfallLevel::classify(19.9), RainfallLevel::VeryLow);
        assert_eq!(RainfallLevel::classify(20.0), RainfallLevel::LowToModerate);
        assert_eq!(RainfallLevel::classify(60.0), RainfallLevel::Adequate);
        assert_eq!(RainfallLevel::classify(120.0), RainfallLevel::High);
        assert_eq!(RainfallLevel::classify(200.0), RainfallLevel::VeryHigh);
        assert_eq!(RainfallLevel::VeryHigh.to_string(), "Very High / Heavy");
        assert_eq!(RainfallLevel::High.field_tasks().len(), 3);
    }

    #[test]
    fn test_season_lookup() {
        let september = season_for_month(9).unwrap();
        assert_eq!(september.month_name, "September");
        assert_eq!(september.phase, "SW Monsoon Withdrawal");
        assert!(season_for_month(0).is_none());
        assert!(season_for_month(13).is_none());
    }

    #[test]
    fn test_fertilizer_plan_for_rice() {
        let plan = FertilizerPlan::for_crop("Rice", 54.0, 50.0, 20.0);
        assert_eq!(plan.need.n, 46.0);
        assert_eq!(plan.need.p, 0.0);
        assert_eq!(plan.need.k, 30.0);
        assert_eq!(plan.products.urea_kg_per_acre, 100.0);
        assert_eq!(plan.products.dap_kg_per_acre, 0.0);
        assert_eq!(plan.products.mop_kg_per_acre, 50.0);
    }

    #[test]
    fn test_fertilizer_plan_surplus_needs_nothing() {
        let plan = FertilizerPlan::for_crop("mango", 200.0, 200.0, 200.0);
        assert_eq!(plan.target, NutrientTargets { n: 80.0, p: 40.0, k: 40.0 });
        assert_eq!(plan.products.urea_kg_per_acre, 0.0);
    }
}
