//! Offline evaluation of the bound models against labelled tables

use std::collections::BTreeSet;
use std::fmt::Write;

use serde::{Deserialize, Serialize};

use crate::error::PipelineResult;
use crate::features::build_crop_vector;
use crate::models::{CropInput, RainfallTrainingTable, CROP_FEATURE_NAMES, RAINFALL_FEATURE_NAMES};
use crate::pipeline::{CropRecommender, RainfallPredictor};

/// Error metrics for a regressor
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RegressionMetrics {
    pub samples: usize,
    pub mae: f64,
    pub rmse: f64,
}

/// Mean absolute error and root mean squared error
pub fn regression_metrics(actual: &[f64], predicted: &[f64]) -> RegressionMetrics {
    let samples = actual.len().min(predicted.len());
    if samples == 0 {
        return RegressionMetrics {
            samples,
            mae: 0.0,
            rmse: 0.0,
        };
    }
    let (abs_sum, sq_sum) = actual
        .iter()
        .zip(predicted)
        .fold((0.0, 0.0), |(abs_sum, sq_sum), (a, p)| {
            let err = a - p;
            (abs_sum + err.abs(), sq_sum + err * err)
        });
    let n = samples as f64;
    RegressionMetrics {
        samples,
        mae: abs_sum / n,
        rmse: (sq_sum / n).sqrt(),
    }
}

/// Precision, recall and F1 for one class
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClassMetrics {
    pub label: String,
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    pub support: usize,
}

/// Averaged precision, recall and F1
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AveragedMetrics {
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
}

/// Accuracy, per-class report and confusion matrix for a classifier
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClassificationMetrics {
    pub samples: usize,
    pub accuracy: f64,
    /// Sorted union of true and predicted labels
    pub labels: Vec<String>,
    pub per_class: Vec<ClassMetrics>,
    pub macro_avg: AveragedMetrics,
    pub weighted_avg: AveragedMetrics,
    /// `confusion[true][predicted]`, indexed by `labels`
    pub confusion: Vec<Vec<usize>>,
}

fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

/// Classification report over aligned true and predicted labels.
///
/// Classes never predicted get precision 0 rather than an error.
pub fn classification_metrics(actual: &[String], predicted: &[String]) -> ClassificationMetrics {
    let samples = actual.len().min(predicted.len());
    let labels: Vec<String> = actual
        .iter()
        .chain(predicted)
        .cloned()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    let index = |label: &String| labels.binary_search(label).unwrap_or(0);

    let mut confusion = vec![vec![0usize; labels.len()]; labels.len()];
    let mut correct = 0;
    for (a, p) in actual.iter().zip(predicted) {
        confusion[index(a)][index(p)] += 1;
        if a == p {
            correct += 1;
        }
    }

    let per_class: Vec<ClassMetrics> = labels
        .iter()
        .enumerate()
        .map(|(i, label)| {
            let tp = confusion[i][i];
            let support: usize = confusion[i].iter().sum();
            let predicted_count: usize = confusion.iter().map(|row| row[i]).sum();
            let precision = ratio(tp, predicted_count);
            let recall = ratio(tp, support);
            let f1 = if precision + recall > 0.0 {
                2.0 * precision * recall / (precision + recall)
            } else {
                0.0
            };
            ClassMetrics {
                label: label.clone(),
                precision,
                recall,
                f1,
                support,
            }
        })
        .collect();

    let class_count = per_class.len().max(1) as f64;
    let macro_avg = AveragedMetrics {
        precision: per_class.iter().map(|c| c.precision).sum::<f64>() / class_count,
        recall: per_class.iter().map(|c| c.recall).sum::<f64>() / class_count,
        f1: per_class.iter().map(|c| c.f1).sum::<f64>() / class_count,
    };
    let total_support = per_class.iter().map(|c| c.support).sum::<usize>().max(1) as f64;
    let weighted = |f: fn(&ClassMetrics) -> f64| {
        per_class
            .iter()
            .map(|c| f(c) * c.support as f64)
            .sum::<f64>()
            / total_support
    };
    let weighted_avg = AveragedMetrics {
        precision: weighted(|c| c.precision),
        recall: weighted(|c| c.recall),
        f1: weighted(|c| c.f1),
    };

    ClassificationMetrics {
        samples,
        accuracy: ratio(correct, samples),
        labels,
        per_class,
        macro_avg,
        weighted_avg,
        confusion,
    }
}

/// Importance of one input column, as exported with the model
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FeatureImportance {
    pub feature: String,
    pub importance: f64,
}

fn importances(names: &[&str], values: Option<&[f64]>) -> Vec<FeatureImportance> {
    values
        .map(|values| {
            names
                .iter()
                .zip(values)
                .map(|(name, importance)| FeatureImportance {
                    feature: name.to_string(),
                    importance: *importance,
                })
                .collect()
        })
        .unwrap_or_default()
}

/// A row of the crop feature/label table
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LabeledCropSample {
    pub features: CropInput,
    pub label: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RainfallEvaluation {
    pub model: String,
    pub metrics: RegressionMetrics,
    pub feature_importances: Vec<FeatureImportance>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CropEvaluation {
    pub model: String,
    pub metrics: ClassificationMetrics,
    pub feature_importances: Vec<FeatureImportance>,
}

/// Score the rainfall regressor on a lag training table
pub fn evaluate_rainfall(
    predictor: &RainfallPredictor,
    table: &RainfallTrainingTable,
) -> RainfallEvaluation {
    let model = predictor.model();
    let predicted: Vec<f64> = table
        .features
        .iter()
        .map(|row| model.predict(&row.to_array()))
        .collect();
    RainfallEvaluation {
        model: model.name().to_string(),
        metrics: regression_metrics(&table.targets, &predicted),
        feature_importances: importances(&RAINFALL_FEATURE_NAMES, model.feature_importances()),
    }
}

/// Score the crop classifier's point predictions on a labelled table
pub fn evaluate_crop(
    recommender: &CropRecommender,
    samples: &[LabeledCropSample],
) -> PipelineResult<CropEvaluation> {
    let model = recommender.model();
    let mut predicted = Vec::with_capacity(samples.len());
    for sample in samples {
        let vector = build_crop_vector(&sample.features)?;
        predicted.push(model.predict(vector.as_slice()));
    }
    let actual: Vec<String> = samples.iter().map(|s| s.label.clone()).collect();

    Ok(CropEvaluation {
        model: model.name().to_string(),
        metrics: classification_metrics(&actual, &predicted),
        feature_importances: importances(&CROP_FEATURE_NAMES, model.feature_importances()),
    })
}

/// Evaluation of whichever models had a dataset to score against
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct EvaluationReport {
    pub rainfall: Option<RainfallEvaluation>,
    pub crop: Option<CropEvaluation>,
}

impl EvaluationReport {
    /// Plain-text summary suitable for download
    pub fn summary_text(&self) -> String {
        let mut out = String::new();
        if let Some(rainfall) = &self.rainfall {
            let _ = writeln!(out, "Rainfall Model ({}):", rainfall.model);
            let _ = writeln!(out, "Samples: {}", rainfall.metrics.samples);
            let _ = writeln!(out, "MAE: {:.3} mm", rainfall.metrics.mae);
            let _ = writeln!(out, "RMSE: {:.3} mm", rainfall.metrics.rmse);
            out.push('\n');
        }
        if let Some(crop) = &self.crop {
            let m = &crop.metrics;
            let _ = writeln!(out, "Crop Model ({}):", crop.model);
            let _ = writeln!(out, "Accuracy: {:.3}", m.accuracy);
            out.push('\n');
            let _ = writeln!(out, "Classification Report:");
            let _ = writeln!(
                out,
                "{:>14} {:>9} {:>9} {:>9} {:>9}",
                "", "precision", "recall", "f1-score", "support"
            );
            for c in &m.per_class {
                let _ = writeln!(
                    out,
                    "{:>14} {:>9.2} {:>9.2} {:>9.2} {:>9}",
                    c.label, c.precision, c.recall, c.f1, c.support
                );
            }
            for (name, avg) in [("macro avg", &m.macro_avg), ("weighted avg", &m.weighted_avg)] {
                let _ = writeln!(
                    out,
                    "{:>14} {:>9.2} {:>9.2} {:>9.2} {:>9}",
                    name, avg.precision, avg.recall, avg.f1, m.samples
                );
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_regression_metrics() {
        let m = regression_metrics(&[10.0, 20.0, 30.0], &[12.0, 18.0, 30.0]);
        assert_eq!(m.samples, 3);
        assert!((m.mae - 4.0 / 3.0).abs() < 1e-12);
        assert!((m.rmse - (8.0f64 / 3.0).sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_regression_metrics_empty() {
        let m = regression_metrics(&[], &[]);
        assert_eq!(m.samples, 0);
        assert_eq!(m.mae, 0.0);
    }

    #[test]
    fn test_classification_report() {
        let actual = labels(&["rice", "rice", "maize", "jute"]);
        let predicted = labels(&["rice", "maize", "maize", "rice"]);
        let m = classification_metrics(&actual, &predicted);

        assert_eq!(m.labels, labels(&["jute", "maize", "rice"]));
        assert_eq!(m.accuracy, 0.5);
        assert_eq!(m.confusion, vec![vec![0, 0, 1], vec![0, 1, 0], vec![0, 1, 1]]);

        let rice = &m.per_class[2];
        assert_eq!(rice.support, 2);
        assert_eq!(rice.precision, 0.5);
        assert_eq!(rice.recall, 0.5);

        let jute = &m.per_class[0];
        assert_eq!(jute.precision, 0.0);
        assert_eq!(jute.f1, 0.0);
    }

    #[test]
    fn test_summary_text_lists_classes() {
        let report = EvaluationReport {
            rainfall: Some(RainfallEvaluation {
                model: "rain_rf".to_string(),
                metrics: regression_metrics(&[1.0], &[2.0]),
                feature_importances: vec![],
            }),
            crop: Some(CropEvaluation {
                model: "crop_rf".to_string(),
                metrics: classification_metrics(&labels(&["rice"]), &labels(&["rice"])),
                feature_importances: vec![],
            }),
        };
        let text = report.summary_text();
        assert!(text.contains("MAE: 1.000 mm"));
        assert!(text.contains("Accuracy: 1.000"));
        assert!(text.contains("rice"));
    }
}
