//! Random forest inference over exported decision trees
//!
//! Trees are stored as flat node arrays in pre-order: node 0 is the root and
//! every child index is greater than its parent's, so traversal terminates.

use serde::{Deserialize, Serialize};

use super::{Classifier, ProbabilisticClassifier, Regressor};

/// A node of an exported decision tree
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum TreeNode {
    /// `features[feature] <= threshold` goes left, anything else right
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf { value: Vec<f64> },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Tree {
    pub nodes: Vec<TreeNode>,
}

impl Tree {
    /// Leaf vector reached by `features`
    pub fn leaf(&self, features: &[f64]) -> &[f64] {
        let mut index = 0;
        loop {
            match &self.nodes[index] {
                TreeNode::Leaf { value } => return value,
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    // Missing features compare false and go right
                    let x = features.get(*feature).copied().unwrap_or(f64::NAN);
                    index = if x <= *threshold { *left } else { *right };
                }
            }
        }
    }

    fn validate(&self, n_features: usize, leaf_width: usize) -> Result<(), String> {
        if self.nodes.is_empty() {
            return Err("tree has no nodes".to_string());
        }
        for (i, node) in self.nodes.iter().enumerate() {
            match node {
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    if *feature >= n_features {
                        return Err(format!(
                            "node {} splits on feature {} but model has {}",
                            i, feature, n_features
                        ));
                    }
                    if !threshold.is_finite() {
                        return Err(format!("node {} has a non-finite threshold", i));
                    }
                    for child in [*left, *right] {
                        if child <= i || child >= self.nodes.len() {
                            return Err(format!("node {} has invalid child {}", i, child));
                        }
                    }
                }
                TreeNode::Leaf { value } => {
                    if value.len() != leaf_width {
                        return Err(format!(
                            "leaf {} has {} values, expected {}",
                            i,
                            value.len(),
                            leaf_width
                        ));
                    }
                }
            }
        }
        Ok(())
    }

    /// Classifier leaves hold class weights, which must be finite and non-negative
    fn validate_weights(&self) -> Result<(), String> {
        for (i, node) in self.nodes.iter().enumerate() {
            if let TreeNode::Leaf { value } = node {
                if value.iter().any(|w| !w.is_finite() || *w < 0.0) {
                    return Err(format!("leaf {} has a negative or non-finite class weight", i));
                }
            }
        }
        Ok(())
    }
}

fn validate_importances(importances: &Option<Vec<f64>>, n_features: usize) -> Result<(), String> {
    match importances {
        Some(values) if values.len() != n_features => Err(format!(
            "{} feature importances for {} features",
            values.len(),
            n_features
        )),
        _ => Ok(()),
    }
}

/// Forest of regression trees; the prediction is the mean leaf value
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RandomForestRegressor {
    pub name: String,
    pub n_features: usize,
    pub trees: Vec<Tree>,
    #[serde(default)]
    pub feature_importances: Option<Vec<f64>>,
}

impl RandomForestRegressor {
    pub fn validate(&self) -> Result<(), String> {
        if self.trees.is_empty() {
            return Err("forest has no trees".to_string());
        }
        for (i, tree) in self.trees.iter().enumerate() {
            tree.validate(self.n_features, 1)
                .map_err(|e| format!("tree {}: {}", i, e))?;
        }
        validate_importances(&self.feature_importances, self.n_features)
    }
}

impl Regressor for RandomForestRegressor {
    fn name(&self) -> &str {
        &self.name
    }

    fn n_features(&self) -> usize {
        self.n_features
    }

    fn predict(&self, features: &[f64]) -> f64 {
        let total: f64 = self.trees.iter().map(|t| t.leaf(features)[0]).sum();
        total / self.trees.len() as f64
    }

    fn feature_importances(&self) -> Option<&[f64]> {
        self.feature_importances.as_deref()
    }
}

/// Forest of classification trees.
///
/// Each leaf holds per-class weights; the distribution is the mean of the
/// per-tree normalized leaves and the label is the first most probable class.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RandomForestClassifier {
    pub name: String,
    pub n_features: usize,
    pub classes: Vec<String>,
    pub trees: Vec<Tree>,
    #[serde(default)]
    pub feature_importances: Option<Vec<f64>>,
}

impl RandomForestClassifier {
    pub fn validate(&self) -> Result<(), String> {
        if self.classes.is_empty() {
            return Err("classifier has no classes".to_string());
        }
        if self.trees.is_empty() {
            return Err("forest has no trees".to_string());
        }
        for (i, tree) in self.trees.iter().enumerate() {
            tree.validate(self.n_features, self.classes.len())
                .and_then(|_| tree.validate_weights())
                .map_err(|e| format!("tree {}: {}", i, e))?;
        }
        validate_importances(&self.feature_importances, self.n_features)
    }
}

impl Classifier for RandomForestClassifier {
    fn name(&self) -> &str {
        &self.name
    }

    fn n_features(&self) -> usize {
        self.n_features
    }

    fn classes(&self) -> &[String] {
        &self.classes
    }

    fn predict(&self, features: &[f64]) -> String {
        let probabilities = self.predict_proba(features);
        let mut best = 0;
        for (i, p) in probabilities.iter().enumerate() {
            if *p > probabilities[best] {
                best = i;
            }
        }
        self.classes[best].clone()
    }

    fn feature_importances(&self) -> Option<&[f64]> {
        self.feature_importances.as_deref()
    }
}

impl ProbabilisticClassifier for RandomForestClassifier {
    fn predict_proba(&self, features: &[f64]) -> Vec<f64> {
        let mut probabilities = vec![0.0; self.classes.len()];
        for tree in &self.trees {
            let leaf = tree.leaf(features);
            let total: f64 = leaf.iter().sum();
            if total <= 0.0 {
                continue;
            }
            for (p, weight) in probabilities.iter_mut().zip(leaf) {
                *p += weight / total;
            }
        }
        let n_trees = self.trees.len() as f64;
        probabilities.iter_mut().for_each(|p| *p /= n_trees);
        probabilities
    }
}
