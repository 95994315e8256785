//! Domain models for the Smart Agro Assistant

mod agronomy;
mod crop;
mod prediction;
mod rainfall;

pub use agronomy::*;
pub use crop::*;
pub use prediction::*;
pub use rainfall::*;
