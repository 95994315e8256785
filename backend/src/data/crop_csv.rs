//! Crop recommendation table: `N,P,K,temperature,humidity,ph,rainfall,label`

use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use shared::{CropInput, LabeledCropSample};

use super::DatasetError;

#[derive(Debug, Deserialize)]
struct CropRow {
    #[serde(rename = "N")]
    n: f64,
    #[serde(rename = "P")]
    p: f64,
    #[serde(rename = "K")]
    k: f64,
    temperature: f64,
    humidity: f64,
    #[serde(alias = "pH")]
    ph: f64,
    rainfall: f64,
    label: String,
}

impl From<CropRow> for LabeledCropSample {
    fn from(row: CropRow) -> Self {
        LabeledCropSample {
            features: CropInput {
                n: row.n,
                p: row.p,
                k: row.k,
                temperature: row.temperature,
                humidity: row.humidity,
                ph: row.ph,
                rainfall: row.rainfall,
            },
            label: row.label.trim().to_string(),
        }
    }
}

/// Parse labelled crop samples from any reader
pub fn parse_crop_samples<R: Read>(reader: R) -> Result<Vec<LabeledCropSample>, DatasetError> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let samples = rdr
        .deserialize::<CropRow>()
        .map(|row| row.map(LabeledCropSample::from))
        .collect::<Result<Vec<_>, _>>()?;

    if samples.is_empty() {
        return Err(DatasetError::Empty);
    }
    Ok(samples)
}

/// Load the crop recommendation table from disk
pub fn load_crop_samples(path: &Path) -> Result<Vec<LabeledCropSample>, DatasetError> {
    let file = std::fs::File::open(path).map_err(|source| DatasetError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let samples = parse_crop_samples(file)?;
    tracing::info!(path = %path.display(), rows = samples.len(), "loaded crop samples");
    Ok(samples)
}
