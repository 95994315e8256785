//! Loaders for the labelled datasets used to evaluate the bound models

pub mod crop_csv;
pub mod rainfall_csv;

use thiserror::Error;

use crate::error::AppError;

pub use crop_csv::{load_crop_samples, parse_crop_samples};
pub use rainfall_csv::{day_column_name, load_daily_rainfall, parse_daily_rainfall};

/// Dataset parsing failures
#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("missing column '{0}'")]
    MissingColumn(String),

    #[error("no usable rows")]
    Empty,
}

impl From<DatasetError> for AppError {
    fn from(err: DatasetError) -> Self {
        AppError::Dataset(err.to_string())
    }
}
