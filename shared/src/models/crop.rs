//! Crop recommendation models

use serde::{Deserialize, Serialize};

/// Number of feature columns consumed by the crop classifier
pub const CROP_FEATURE_COUNT: usize = 7;

/// Feature column names in model order
pub const CROP_FEATURE_NAMES: [&str; CROP_FEATURE_COUNT] =
    ["N", "P", "K", "temperature", "humidity", "ph", "rainfall"];

/// Soil and climate readings in the order the crop classifier was trained on.
///
/// `at(0)=N, at(1)=P, at(2)=K, at(3)=temperature, at(4)=humidity, at(5)=pH,
/// at(6)=rainfall`. Reordering silently corrupts predictions.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct CropFeatureVector([f64; CROP_FEATURE_COUNT]);

impl CropFeatureVector {
    pub(crate) fn from_ordered(values: [f64; CROP_FEATURE_COUNT]) -> Self {
        Self(values)
    }

    pub fn at(&self, index: usize) -> Option<f64> {
        self.0.get(index).copied()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        CROP_FEATURE_COUNT
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn rainfall(&self) -> f64 {
        self.0[6]
    }
}

/// One entry of the ranked alternatives list
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RankedCrop {
    pub crop: String,
    pub score: f64,
}

impl RankedCrop {
    pub fn new(crop: impl Into<String>, score: f64) -> Self {
        Self {
            crop: crop.into(),
            score,
        }
    }
}

/// Crop families that receive a specific advisory note
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CropFamily {
    Rice,
    Plantation,
    Pulses,
    Coffee,
    Other,
}

impl CropFamily {
    /// Case-insensitive lookup of the family a crop label belongs to
    pub fn of(crop: &str) -> Self {
        match crop.trim().to_lowercase().as_str() {
            "rice" | "paddy" => CropFamily::Rice,
            "banana" | "coconut" | "sugarcane" => CropFamily::Plantation,
            "chickpea" | "kidneybeans" | "pigeonpeas" | "mothbeans" | "mungbean"
            | "blackgram" | "lentil" => CropFamily::Pulses,
            "coffee" => CropFamily::Coffee,
            _ => CropFamily::Other,
        }
    }
}

/// Display name with an emoji for the known crop labels
pub fn crop_display_name(crop: &str) -> String {
    let name = match crop.trim().to_lowercase().as_str() {
        "rice" => "🍚 Rice",
        "maize" => "🌽 Maize",
        "chickpea" => "🧆 Chickpea",
        "kidneybeans" => "🫘 Kidney Beans",
        "pigeonpeas" => "🫘 Pigeon Peas",
        "mothbeans" => "🫘 Moth Beans",
        "mungbean" => "🫘 Mung Bean",
        "blackgram" => "🫘 Black Gram",
        "lentil" => "🥣 Lentil",
        "pomegranate" => "🍎 Pomegranate",
        "banana" => "🍌 Banana",
        "mango" => "🥭 Mango",
        "grapes" => "🍇 Grapes",
        "watermelon" => "🍉 Watermelon",
        "muskmelon" => "🍈 Muskmelon",
        "apple" => "🍎 Apple",
        "orange" => "🍊 Orange",
        "papaya" => "🍉 Papaya",
        "coconut" => "🥥 Coconut",
        "cotton" => "🧵 Cotton",
        "jute" => "🪢 Jute",
        "coffee" => "☕ Coffee",
        _ => return crop.to_string(),
    };
    name.to_string()
}
