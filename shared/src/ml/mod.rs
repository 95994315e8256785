//! Model port: inference over frozen, externally trained models
//!
//! A bound model is read-only after startup. Classifiers come in two
//! capabilities, chosen when the model is bound rather than checked per call:
//! point-only, or distribution-capable (full class probabilities).

mod artifact;
mod centroid;
mod forest;
mod linear;

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{PipelineError, PipelineResult};

pub use artifact::*;
pub use centroid::NearestCentroidClassifier;
pub use forest::{RandomForestClassifier, RandomForestRegressor, Tree, TreeNode};
pub use linear::LinearRegressor;

/// A model producing a single continuous output
pub trait Regressor: Send + Sync {
    fn name(&self) -> &str;

    fn n_features(&self) -> usize;

    fn predict(&self, features: &[f64]) -> f64;

    fn feature_importances(&self) -> Option<&[f64]> {
        None
    }
}

/// A model producing a class label
pub trait Classifier: Send + Sync {
    fn name(&self) -> &str;

    fn n_features(&self) -> usize;

    /// Class labels in the model's fixed order
    fn classes(&self) -> &[String];

    fn predict(&self, features: &[f64]) -> String;

    fn feature_importances(&self) -> Option<&[f64]> {
        None
    }
}

/// A classifier that also exposes its class-probability distribution
pub trait ProbabilisticClassifier: Classifier {
    /// Probabilities aligned with [`Classifier::classes`]
    fn predict_proba(&self, features: &[f64]) -> Vec<f64>;

    /// Labels with probabilities, probability-descending.
    ///
    /// Equal probabilities keep the model's class order.
    fn predict_ranked(&self, features: &[f64]) -> Vec<ClassProbability> {
        let mut ranked: Vec<ClassProbability> = self
            .classes()
            .iter()
            .zip(self.predict_proba(features))
            .map(|(label, probability)| ClassProbability {
                label: label.clone(),
                probability,
            })
            .collect();
        ranked.sort_by(|a, b| descending(a.probability, b.probability));
        ranked
    }
}

fn descending(a: f64, b: f64) -> Ordering {
    b.partial_cmp(&a).unwrap_or(Ordering::Equal)
}

/// One (label, probability) pair of a ranked distribution
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClassProbability {
    pub label: String,
    pub probability: f64,
}

/// Capability a classifier was bound with
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ClassifierCapability {
    PointOnly,
    Distribution,
}

/// A regressor bound to a fixed feature width
#[derive(Clone)]
pub struct RegressorBinding {
    model: Arc<dyn Regressor>,
}

impl RegressorBinding {
    pub fn bind(
        component: &str,
        model: Arc<dyn Regressor>,
        expected_features: usize,
    ) -> PipelineResult<Self> {
        check_width(component, model.n_features(), expected_features)?;
        Ok(Self { model })
    }

    /// Fail unless the model consumes exactly `width` features
    pub fn ensure_width(&self, component: &str, width: usize) -> PipelineResult<()> {
        check_width(component, self.n_features(), width)
    }

    pub fn name(&self) -> &str {
        self.model.name()
    }

    pub fn n_features(&self) -> usize {
        self.model.n_features()
    }

    pub fn predict(&self, features: &[f64]) -> f64 {
        self.model.predict(features)
    }

    pub fn feature_importances(&self) -> Option<&[f64]> {
        self.model.feature_importances()
    }
}

impl fmt::Debug for RegressorBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegressorBinding")
            .field("name", &self.name())
            .field("n_features", &self.n_features())
            .finish()
    }
}

/// A classifier bound to a fixed feature width with a fixed capability
#[derive(Clone)]
pub enum ClassifierBinding {
    PointOnly(Arc<dyn Classifier>),
    Distribution(Arc<dyn ProbabilisticClassifier>),
}

impl ClassifierBinding {
    pub fn point_only(
        component: &str,
        model: Arc<dyn Classifier>,
        expected_features: usize,
    ) -> PipelineResult<Self> {
        check_width(component, model.n_features(), expected_features)?;
        check_classes(component, model.classes())?;
        Ok(ClassifierBinding::PointOnly(model))
    }

    pub fn distribution(
        component: &str,
        model: Arc<dyn ProbabilisticClassifier>,
        expected_features: usize,
    ) -> PipelineResult<Self> {
        check_width(component, model.n_features(), expected_features)?;
        check_classes(component, model.classes())?;
        Ok(ClassifierBinding::Distribution(model))
    }

    /// Fail unless the model consumes exactly `width` features
    pub fn ensure_width(&self, component: &str, width: usize) -> PipelineResult<()> {
        check_width(component, self.n_features(), width)
    }

    pub fn capability(&self) -> ClassifierCapability {
        match self {
            ClassifierBinding::PointOnly(_) => ClassifierCapability::PointOnly,
            ClassifierBinding::Distribution(_) => ClassifierCapability::Distribution,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            ClassifierBinding::PointOnly(m) => m.name(),
            ClassifierBinding::Distribution(m) => m.name(),
        }
    }

    pub fn n_features(&self) -> usize {
        match self {
            ClassifierBinding::PointOnly(m) => m.n_features(),
            ClassifierBinding::Distribution(m) => m.n_features(),
        }
    }

    pub fn classes(&self) -> &[String] {
        match self {
            ClassifierBinding::PointOnly(m) => m.classes(),
            ClassifierBinding::Distribution(m) => m.classes(),
        }
    }

    pub fn predict(&self, features: &[f64]) -> String {
        match self {
            ClassifierBinding::PointOnly(m) => m.predict(features),
            ClassifierBinding::Distribution(m) => m.predict(features),
        }
    }

    /// Ranked distribution, or `None` for point-only models
    pub fn predict_ranked(&self, features: &[f64]) -> Option<Vec<ClassProbability>> {
        match self {
            ClassifierBinding::PointOnly(_) => None,
            ClassifierBinding::Distribution(m) => Some(m.predict_ranked(features)),
        }
    }

    pub fn feature_importances(&self) -> Option<&[f64]> {
        match self {
            ClassifierBinding::PointOnly(m) => m.feature_importances(),
            ClassifierBinding::Distribution(m) => m.feature_importances(),
        }
    }
}

impl fmt::Debug for ClassifierBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassifierBinding")
            .field("name", &self.name())
            .field("capability", &self.capability())
            .field("n_features", &self.n_features())
            .field("classes", &self.classes().len())
            .finish()
    }
}

fn check_width(component: &str, model_width: usize, bound_width: usize) -> PipelineResult<()> {
    if model_width != bound_width {
        return Err(PipelineError::FeatureShape {
            component: component.to_string(),
            expected: model_width,
            actual: bound_width,
        });
    }
    Ok(())
}

fn check_classes(component: &str, classes: &[String]) -> PipelineResult<()> {
    if classes.is_empty() {
        return Err(PipelineError::unavailable(component, "classifier has no classes"));
    }
    Ok(())
}
