//! Crop recommendation with a ranked confidence list

use serde::{Deserialize, Serialize};

use crate::error::{PipelineError, PipelineResult};
use crate::features::build_crop_vector;
use crate::ml::{ClassifierBinding, ClassifierCapability};
use crate::models::{CropInput, RankedCrop, CROP_FEATURE_COUNT};

/// Maximum length of the alternatives list
pub const TOP_K: usize = 3;

/// Top crop with its confidence and ranked alternatives
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CropRecommendation {
    pub crop: String,
    pub confidence: f64,
    pub alternatives: Vec<RankedCrop>,
}

/// Wraps a classifier trained on (N, P, K, temperature, humidity, pH, rainfall) -> crop
#[derive(Debug, Clone)]
pub struct CropRecommender {
    model: ClassifierBinding,
}

impl CropRecommender {
    pub const COMPONENT: &'static str = "crop";

    pub fn new(model: ClassifierBinding) -> PipelineResult<Self> {
        model.ensure_width(Self::COMPONENT, CROP_FEATURE_COUNT)?;
        Ok(Self { model })
    }

    pub fn model(&self) -> &ClassifierBinding {
        &self.model
    }

    pub fn capability(&self) -> ClassifierCapability {
        self.model.capability()
    }

    /// Recommend a crop.
    ///
    /// With a distribution-capable model the confidence is the probability of
    /// the top-ranked class and the alternatives are the three most probable
    /// classes. A point-only model yields confidence 1.0 and a single
    /// alternative. Probabilities are passed through without renormalization.
    pub fn recommend(&self, input: &CropInput) -> PipelineResult<CropRecommendation> {
        let vector = build_crop_vector(input)?;
        let features = vector.as_slice();
        let crop = self.model.predict(features);

        let recommendation = match self.model.predict_ranked(features) {
            Some(ranked) => {
                let top = ranked.first().ok_or_else(|| {
                    PipelineError::unavailable(Self::COMPONENT, "model returned an empty distribution")
                })?;
                if top.label != crop {
                    tracing::error!(
                        model = self.model.name(),
                        point = %crop,
                        ranked = %top.label,
                        "point prediction disagrees with ranked distribution"
                    );
                    return Err(PipelineError::ModelInconsistency {
                        component: Self::COMPONENT.to_string(),
                        point: crop,
                        ranked: top.label.clone(),
                    });
                }
                let confidence = top.probability;
                let alternatives = ranked
                    .into_iter()
                    .take(TOP_K)
                    .map(|c| RankedCrop::new(c.label, c.probability))
                    .collect();
                CropRecommendation {
                    crop,
                    confidence,
                    alternatives,
                }
            }
            None => CropRecommendation {
                alternatives: vec![RankedCrop::new(crop.clone(), 1.0)],
                crop,
                confidence: 1.0,
            },
        };

        tracing::debug!(
            crop = %recommendation.crop,
            confidence = recommendation.confidence,
            alternatives = recommendation.alternatives.len(),
            "crop recommendation"
        );
        Ok(recommendation)
    }
}
