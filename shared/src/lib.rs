//! Shared pipeline for the Smart Agro Assistant
//!
//! This crate holds the input types, feature construction, model bindings and
//! the rainfall-to-crop-to-advisory pipeline shared by the backend and the
//! WASM bindings.

pub mod error;
pub mod evaluation;
pub mod features;
pub mod ml;
pub mod models;
pub mod pipeline;
pub mod types;
pub mod validation;

pub use error::*;
pub use evaluation::*;
pub use features::*;
pub use ml::*;
pub use models::*;
pub use pipeline::*;
pub use types::*;
pub use validation::*;
