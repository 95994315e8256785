//! Frozen model artifacts exported from the training environment as JSON
//!
//! ```json
//! { "kind": "random_forest_classifier", "name": "crop_rf", "n_features": 7,
//!   "classes": ["maize", "rice"], "trees": [{ "nodes": [...] }] }
//! ```

use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::{
    ClassifierBinding, LinearRegressor, NearestCentroidClassifier, RandomForestClassifier,
    RandomForestRegressor, RegressorBinding,
};
use crate::error::{PipelineError, PipelineResult};

/// A serialized model, tagged by kind
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModelArtifact {
    RandomForestRegressor(RandomForestRegressor),
    LinearRegressor(LinearRegressor),
    RandomForestClassifier(RandomForestClassifier),
    NearestCentroidClassifier(NearestCentroidClassifier),
}

impl ModelArtifact {
    pub fn from_json_str(component: &str, json: &str) -> PipelineResult<Self> {
        let artifact: ModelArtifact = serde_json::from_str(json).map_err(|e| {
            PipelineError::unavailable(component, format!("invalid model artifact: {}", e))
        })?;
        artifact
            .validate()
            .map_err(|reason| PipelineError::unavailable(component, reason))?;
        Ok(artifact)
    }

    pub fn from_path(component: &str, path: impl AsRef<Path>) -> PipelineResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            PipelineError::unavailable(component, format!("failed to read {}: {}", path.display(), e))
        })?;
        Self::from_json_str(component, &content)
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ModelArtifact::RandomForestRegressor(_) => "random_forest_regressor",
            ModelArtifact::LinearRegressor(_) => "linear_regressor",
            ModelArtifact::RandomForestClassifier(_) => "random_forest_classifier",
            ModelArtifact::NearestCentroidClassifier(_) => "nearest_centroid_classifier",
        }
    }

    fn validate(&self) -> Result<(), String> {
        match self {
            ModelArtifact::RandomForestRegressor(m) => m.validate(),
            ModelArtifact::LinearRegressor(m) => m.validate(),
            ModelArtifact::RandomForestClassifier(m) => m.validate(),
            ModelArtifact::NearestCentroidClassifier(m) => m.validate(),
        }
    }

    /// Bind as a regressor over `expected_features` columns
    pub fn into_regressor(
        self,
        component: &str,
        expected_features: usize,
    ) -> PipelineResult<RegressorBinding> {
        let kind = self.kind();
        match self {
            ModelArtifact::RandomForestRegressor(m) => {
                RegressorBinding::bind(component, Arc::new(m), expected_features)
            }
            ModelArtifact::LinearRegressor(m) => {
                RegressorBinding::bind(component, Arc::new(m), expected_features)
            }
            _ => Err(PipelineError::unavailable(
                component,
                format!("{} cannot be bound as a regressor", kind),
            )),
        }
    }

    /// Bind as a classifier over `expected_features` columns.
    ///
    /// Forests bind distribution-capable; centroid models bind point-only.
    pub fn into_classifier(
        self,
        component: &str,
        expected_features: usize,
    ) -> PipelineResult<ClassifierBinding> {
        let kind = self.kind();
        match self {
            ModelArtifact::RandomForestClassifier(m) => {
                ClassifierBinding::distribution(component, Arc::new(m), expected_features)
            }
            ModelArtifact::NearestCentroidClassifier(m) => {
                ClassifierBinding::point_only(component, Arc::new(m), expected_features)
            }
            _ => Err(PipelineError::unavailable(
                component,
                format!("{} cannot be bound as a classifier", kind),
            )),
        }
    }
}

/// Load and bind a regressor artifact from disk
pub fn load_regressor(
    component: &str,
    path: impl AsRef<Path>,
    expected_features: usize,
) -> PipelineResult<RegressorBinding> {
    let artifact = ModelArtifact::from_path(component, path)?;
    let kind = artifact.kind();
    let binding = artifact.into_regressor(component, expected_features)?;
    tracing::info!(
        component,
        kind,
        name = binding.name(),
        n_features = binding.n_features(),
        "bound regressor"
    );
    Ok(binding)
}

/// Load and bind a classifier artifact from disk
pub fn load_classifier(
    component: &str,
    path: impl AsRef<Path>,
    expected_features: usize,
) -> PipelineResult<ClassifierBinding> {
    let artifact = ModelArtifact::from_path(component, path)?;
    let kind = artifact.kind();
    let binding = artifact.into_classifier(component, expected_features)?;
    tracing::info!(
        component,
        kind,
        name = binding.name(),
        n_features = binding.n_features(),
        classes = binding.classes().len(),
        capability = ?binding.capability(),
        "bound classifier"
    );
    Ok(binding)
}
