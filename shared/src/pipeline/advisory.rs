//! Rule-based advisory text for a recommended crop and forecast rainfall

use serde::{Deserialize, Serialize};

use crate::models::CropFamily;

/// Rainfall bands, evaluated highest first; bounds are exclusive
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RainfallBand {
    VeryHigh,
    GoodMonsoon,
    Moderate,
    Low,
}

impl RainfallBand {
    pub fn classify(rainfall_mm: f64) -> Self {
        if rainfall_mm > 250.0 {
            RainfallBand::VeryHigh
        } else if rainfall_mm > 150.0 {
            RainfallBand::GoodMonsoon
        } else if rainfall_mm > 80.0 {
            RainfallBand::Moderate
        } else {
            RainfallBand::Low
        }
    }

    pub fn phrase(&self) -> &'static str {
        match self {
            RainfallBand::VeryHigh => "very high",
            RainfallBand::GoodMonsoon => "good monsoon",
            RainfallBand::Moderate => "moderate",
            RainfallBand::Low => "low",
        }
    }

    fn guidance(&self) -> &'static str {
        match self {
            RainfallBand::VeryHigh => {
                "Clear drainage channels and prepare fields for possible flooding."
            }
            RainfallBand::GoodMonsoon => "Conditions favour water-loving crops.",
            RainfallBand::Moderate => "Monitor soil moisture and irrigate if dry spells extend.",
            RainfallBand::Low => {
                "Plan supplemental irrigation or prefer drought-tolerant varieties."
            }
        }
    }
}

fn crop_note(family: CropFamily) -> &'static str {
    match family {
        CropFamily::Rice => "Rice/paddy: keep bunds intact and maintain 2-5 cm of standing water.",
        CropFamily::Plantation => {
            "Banana, coconut and sugarcane need steady moisture; mulch and schedule regular irrigation."
        }
        CropFamily::Pulses => {
            "Pulses fix their own nitrogen; avoid waterlogging and keep nitrogen doses light."
        }
        CropFamily::Coffee => {
            "Coffee prefers shade and well-drained slopes; watch for berry diseases in wet spells."
        }
        CropFamily::Other => {
            "Follow soil-test based fertilization and keep the field weed-free during early growth."
        }
    }
}

/// Advisory text: rainfall guidance followed by a crop-family note.
///
/// Unknown crops receive the generic note.
pub fn generate_advisory(crop: &str, rainfall_mm: f64) -> String {
    let band = RainfallBand::classify(rainfall_mm);
    format!(
        "Expected rainfall is {} ({:.1} mm). {} {}",
        band.phrase(),
        rainfall_mm,
        band.guidance(),
        crop_note(CropFamily::of(crop))
    )
}
