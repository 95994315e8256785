//! Pipeline input and output records

use serde::{Deserialize, Serialize};

use crate::error::PipelineResult;
use crate::models::RankedCrop;
use crate::types::RainfallSource;
use crate::validation::{
    checked, validate_humidity, validate_month, validate_non_negative, validate_ph,
    validate_temperature,
};

/// A loosely typed field value as received from a caller
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum RawValue {
    Number(f64),
    Text(String),
    Other(serde_json::Value),
}

impl RawValue {
    /// Numeric reading of the value; numeric strings are accepted
    pub fn as_number(&self) -> Option<f64> {
        match self {
            RawValue::Number(n) => Some(*n),
            RawValue::Text(s) => s.trim().parse::<f64>().ok(),
            RawValue::Other(_) => None,
        }
    }
}

impl From<f64> for RawValue {
    fn from(value: f64) -> Self {
        RawValue::Number(value)
    }
}

/// Unvalidated request for a full rainfall + crop prediction.
///
/// `T` and `H` are accepted as synonyms for temperature and humidity.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RawPredictionInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub month: Option<RawValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lag1: Option<RawValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lag2: Option<RawValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lag3: Option<RawValue>,
    #[serde(default, rename = "N", skip_serializing_if = "Option::is_none")]
    pub n: Option<RawValue>,
    #[serde(default, rename = "P", skip_serializing_if = "Option::is_none")]
    pub p: Option<RawValue>,
    #[serde(default, rename = "K", skip_serializing_if = "Option::is_none")]
    pub k: Option<RawValue>,
    #[serde(default, alias = "T", skip_serializing_if = "Option::is_none")]
    pub temperature: Option<RawValue>,
    #[serde(default, alias = "H", skip_serializing_if = "Option::is_none")]
    pub humidity: Option<RawValue>,
    #[serde(default, rename = "pH", alias = "ph", skip_serializing_if = "Option::is_none")]
    pub ph: Option<RawValue>,
}

impl RawPredictionInput {
    /// Validate every field in canonical order, failing on the first bad one
    pub fn validate(&self) -> PipelineResult<PredictionInput> {
        let rainfall = RawRainfallInput {
            month: self.month.clone(),
            lag1: self.lag1.clone(),
            lag2: self.lag2.clone(),
            lag3: self.lag3.clone(),
        }
        .validate()?;
        let soil = validate_soil(
            self.n.as_ref(),
            self.p.as_ref(),
            self.k.as_ref(),
            self.temperature.as_ref(),
            self.humidity.as_ref(),
            self.ph.as_ref(),
        )?;

        Ok(PredictionInput {
            month: rainfall.month,
            lag1: rainfall.lag1,
            lag2: rainfall.lag2,
            lag3: rainfall.lag3,
            n: soil.n,
            p: soil.p,
            k: soil.k,
            temperature: soil.temperature,
            humidity: soil.humidity,
            ph: soil.ph,
        })
    }
}

impl From<PredictionInput> for RawPredictionInput {
    fn from(input: PredictionInput) -> Self {
        Self {
            month: Some(RawValue::Number(f64::from(input.month))),
            lag1: Some(input.lag1.into()),
            lag2: Some(input.lag2.into()),
            lag3: Some(input.lag3.into()),
            n: Some(input.n.into()),
            p: Some(input.p.into()),
            k: Some(input.k.into()),
            temperature: Some(input.temperature.into()),
            humidity: Some(input.humidity.into()),
            ph: Some(input.ph.into()),
        }
    }
}

/// Unvalidated request for a rainfall forecast only
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RawRainfallInput {
    #[serde(default)]
    pub month: Option<RawValue>,
    #[serde(default)]
    pub lag1: Option<RawValue>,
    #[serde(default)]
    pub lag2: Option<RawValue>,
    #[serde(default)]
    pub lag3: Option<RawValue>,
}

impl RawRainfallInput {
    pub fn validate(&self) -> PipelineResult<RainfallInput> {
        let month = checked("month", self.month.as_ref(), validate_month)?;
        let lag1 = checked("lag1", self.lag1.as_ref(), validate_non_negative)?;
        let lag2 = checked("lag2", self.lag2.as_ref(), validate_non_negative)?;
        let lag3 = checked("lag3", self.lag3.as_ref(), validate_non_negative)?;

        Ok(RainfallInput {
            month,
            lag1,
            lag2,
            lag3,
        })
    }
}

/// Unvalidated request for a crop recommendation with an explicit rainfall value
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RawCropInput {
    #[serde(default, rename = "N")]
    pub n: Option<RawValue>,
    #[serde(default, rename = "P")]
    pub p: Option<RawValue>,
    #[serde(default, rename = "K")]
    pub k: Option<RawValue>,
    #[serde(default, alias = "T")]
    pub temperature: Option<RawValue>,
    #[serde(default, alias = "H")]
    pub humidity: Option<RawValue>,
    #[serde(default, rename = "pH", alias = "ph")]
    pub ph: Option<RawValue>,
    #[serde(default)]
    pub rainfall: Option<RawValue>,
}

impl RawCropInput {
    pub fn validate(&self) -> PipelineResult<CropInput> {
        let soil = validate_soil(
            self.n.as_ref(),
            self.p.as_ref(),
            self.k.as_ref(),
            self.temperature.as_ref(),
            self.humidity.as_ref(),
            self.ph.as_ref(),
        )?;
        let rainfall = checked("rainfall", self.rainfall.as_ref(), validate_non_negative)?;

        Ok(CropInput {
            n: soil.n,
            p: soil.p,
            k: soil.k,
            temperature: soil.temperature,
            humidity: soil.humidity,
            ph: soil.ph,
            rainfall,
        })
    }
}

struct SoilReadings {
    n: f64,
    p: f64,
    k: f64,
    temperature: f64,
    humidity: f64,
    ph: f64,
}

fn validate_soil(
    n: Option<&RawValue>,
    p: Option<&RawValue>,
    k: Option<&RawValue>,
    temperature: Option<&RawValue>,
    humidity: Option<&RawValue>,
    ph: Option<&RawValue>,
) -> PipelineResult<SoilReadings> {
    Ok(SoilReadings {
        n: checked("N", n, validate_non_negative)?,
        p: checked("P", p, validate_non_negative)?,
        k: checked("K", k, validate_non_negative)?,
        temperature: checked("temperature", temperature, validate_temperature)?,
        humidity: checked("humidity", humidity, validate_humidity)?,
        ph: checked("pH", ph, validate_ph)?,
    })
}

/// Validated request for a full prediction
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct PredictionInput {
    pub month: u8,
    pub lag1: f64,
    pub lag2: f64,
    pub lag3: f64,
    #[serde(rename = "N")]
    pub n: f64,
    #[serde(rename = "P")]
    pub p: f64,
    #[serde(rename = "K")]
    pub k: f64,
    pub temperature: f64,
    pub humidity: f64,
    #[serde(rename = "pH")]
    pub ph: f64,
}

impl PredictionInput {
    pub fn rainfall_input(&self) -> RainfallInput {
        RainfallInput {
            month: self.month,
            lag1: self.lag1,
            lag2: self.lag2,
            lag3: self.lag3,
        }
    }

    pub fn crop_input(&self, rainfall: f64) -> CropInput {
        CropInput {
            n: self.n,
            p: self.p,
            k: self.k,
            temperature: self.temperature,
            humidity: self.humidity,
            ph: self.ph,
            rainfall,
        }
    }
}

/// Validated month and lag window
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct RainfallInput {
    pub month: u8,
    pub lag1: f64,
    pub lag2: f64,
    pub lag3: f64,
}

/// Validated soil/climate readings plus rainfall
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct CropInput {
    #[serde(rename = "N")]
    pub n: f64,
    #[serde(rename = "P")]
    pub p: f64,
    #[serde(rename = "K")]
    pub k: f64,
    pub temperature: f64,
    pub humidity: f64,
    #[serde(rename = "pH")]
    pub ph: f64,
    pub rainfall: f64,
}

/// Output of one pipeline invocation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PredictionResult {
    pub predicted_rainfall: f64,
    pub rainfall_source: RainfallSource,
    #[serde(rename = "main_crop", alias = "crop")]
    pub recommended_crop: String,
    #[serde(rename = "main_crop_score", alias = "confidence")]
    pub confidence: f64,
    /// At most three entries, score-descending
    pub alternatives: Vec<RankedCrop>,
    #[serde(rename = "advice")]
    pub advisory: String,
}

/// A named demonstration input
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Scenario {
    pub name: String,
    pub input: PredictionInput,
}

/// Demonstration inputs covering wet, dry and moderate conditions
pub fn sample_scenarios() -> Vec<Scenario> {
    let scenario = |name: &str, input: PredictionInput| Scenario {
        name: name.to_string(),
        input,
    };

    vec![
        scenario(
            "High rainfall – tropical",
            PredictionInput {
                month: 9,
                lag1: 260.0,
                lag2: 230.0,
                lag3: 210.0,
                n: 100.0,
                p: 55.0,
                k: 60.0,
                temperature: 28.0,
                humidity: 85.0,
                ph: 6.4,
            },
        ),
        scenario(
            "Dry region – pulses",
            PredictionInput {
                month: 2,
                lag1: 40.0,
                lag2: 35.0,
                lag3: 20.0,
                n: 40.0,
                p: 20.0,
                k: 30.0,
                temperature: 22.0,
                humidity: 50.0,
                ph: 7.0,
            },
        ),
        scenario(
            "Moderate – fruits",
            PredictionInput {
                month: 6,
                lag1: 120.0,
                lag2: 90.0,
                lag3: 60.0,
                n: 70.0,
                p: 45.0,
                k: 50.0,
                temperature: 26.0,
                humidity: 65.0,
                ph: 6.2,
            },
        ),
    ]
}
