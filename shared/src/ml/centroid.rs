//! Nearest-centroid classification, a point-only model

use serde::{Deserialize, Serialize};

use super::Classifier;

/// Assigns the class whose centroid is nearest in Euclidean distance.
///
/// Exposes no probability distribution. Ties go to the earlier class.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NearestCentroidClassifier {
    pub name: String,
    pub classes: Vec<String>,
    pub centroids: Vec<Vec<f64>>,
}

impl NearestCentroidClassifier {
    pub fn validate(&self) -> Result<(), String> {
        if self.classes.is_empty() {
            return Err("classifier has no classes".to_string());
        }
        if self.centroids.len() != self.classes.len() {
            return Err(format!(
                "{} centroids for {} classes",
                self.centroids.len(),
                self.classes.len()
            ));
        }
        let width = self.centroids[0].len();
        if width == 0 || self.centroids.iter().any(|c| c.len() != width) {
            return Err("centroids must share a non-zero width".to_string());
        }
        Ok(())
    }

    fn distance(centroid: &[f64], features: &[f64]) -> f64 {
        centroid
            .iter()
            .enumerate()
            .map(|(i, c)| {
                let d = features.get(i).copied().unwrap_or(0.0) - c;
                d * d
            })
            .sum()
    }
}

impl Classifier for NearestCentroidClassifier {
    fn name(&self) -> &str {
        &self.name
    }

    fn n_features(&self) -> usize {
        self.centroids.first().map_or(0, Vec::len)
    }

    fn classes(&self) -> &[String] {
        &self.classes
    }

    fn predict(&self, features: &[f64]) -> String {
        let mut best = 0;
        let mut best_distance = f64::INFINITY;
        for (i, centroid) in self.centroids.iter().enumerate() {
            let d = Self::distance(centroid, features);
            if d < best_distance {
                best = i;
                best_distance = d;
            }
        }
        self.classes[best].clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model() -> NearestCentroidClassifier {
        NearestCentroidClassifier {
            name: "crop_centroid".to_string(),
            classes: vec!["rice".to_string(), "chickpea".to_string()],
            centroids: vec![vec![80.0, 230.0], vec![40.0, 80.0]],
        }
    }

    #[test]
    fn test_nearest_class_wins() {
        let m = model();
        assert!(m.validate().is_ok());
        assert_eq!(m.predict(&[82.0, 210.0]), "rice");
        assert_eq!(m.predict(&[45.0, 60.0]), "chickpea");
    }

    #[test]
    fn test_mismatched_centroids_rejected() {
        let mut m = model();
        m.centroids.pop();
        assert!(m.validate().is_err());
    }
}
