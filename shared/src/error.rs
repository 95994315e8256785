//! Typed failures of the prediction core

use thiserror::Error;

/// Errors raised by the prediction pipeline and model bindings
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PipelineError {
    /// A caller-supplied field is missing, non-numeric, or out of range
    #[error("Validation error on '{field}': {message}")]
    Validation { field: String, message: String },

    /// A required model could not be loaded or bound
    #[error("{component} model unavailable: {reason}")]
    ModelUnavailable { component: String, reason: String },

    /// The point prediction disagrees with the top of the ranked distribution
    #[error("{component} model inconsistency: point prediction '{point}' but ranked top '{ranked}'")]
    ModelInconsistency {
        component: String,
        point: String,
        ranked: String,
    },

    /// A model expects a different number of features than it is bound to
    #[error("{component} model expects {expected} features, bound to {actual}")]
    FeatureShape {
        component: String,
        expected: usize,
        actual: usize,
    },
}

impl PipelineError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        PipelineError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn unavailable(component: impl Into<String>, reason: impl Into<String>) -> Self {
        PipelineError::ModelUnavailable {
            component: component.into(),
            reason: reason.into(),
        }
    }

    /// Name of the offending input field, for validation failures
    pub fn field(&self) -> Option<&str> {
        match self {
            PipelineError::Validation { field, .. } => Some(field),
            _ => None,
        }
    }
}

/// Result type alias for the prediction core
pub type PipelineResult<T> = Result<T, PipelineError>;
