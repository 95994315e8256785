//! Business logic services for the Smart Agro Assistant

pub mod agronomy;
pub mod evaluation;
pub mod prediction;

pub use prediction::PredictionService;
