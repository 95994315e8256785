//! Evaluation of the bound models against the configured datasets

use serde::Serialize;
use shared::{
    aggregate_daily, build_rainfall_training_table, evaluate_crop, evaluate_rainfall,
    EvaluationReport,
};

use crate::config::DatasetsConfig;
use crate::data::{load_crop_samples, load_daily_rainfall};
use crate::error::{AppError, AppResult};
use crate::services::PredictionService;

/// Score every model that has both a binding and a dataset.
///
/// Returns `None` when no dataset is configured.
pub fn build_report(
    service: &PredictionService,
    datasets: &DatasetsConfig,
) -> AppResult<Option<EvaluationReport>> {
    if datasets.rainfall_csv.is_none() && datasets.crop_csv.is_none() {
        return Ok(None);
    }

    let mut report = EvaluationReport::default();

    if let Some(path) = &datasets.rainfall_csv {
        let records = load_daily_rainfall(path)?;
        let table = build_rainfall_training_table(&aggregate_daily(&records));
        match service.rainfall_predictor() {
            Some(predictor) => {
                let evaluation = evaluate_rainfall(predictor, &table);
                tracing::info!(
                    rows = evaluation.metrics.samples,
                    mae = evaluation.metrics.mae,
                    rmse = evaluation.metrics.rmse,
                    "evaluated rainfall model"
                );
                report.rainfall = Some(evaluation);
            }
            None => tracing::warn!("Rainfall dataset configured but no rainfall model is bound"),
        }
    }

    if let Some(path) = &datasets.crop_csv {
        let samples = load_crop_samples(path)?;
        match service.crop_recommender() {
            Some(recommender) => {
                let evaluation = evaluate_crop(recommender, &samples)?;
                tracing::info!(
                    rows = evaluation.metrics.samples,
                    accuracy = evaluation.metrics.accuracy,
                    "evaluated crop model"
                );
                report.crop = Some(evaluation);
            }
            None => tracing::warn!("Crop dataset configured but no crop model is bound"),
        }
    }

    Ok(Some(report))
}

#[derive(Serialize)]
struct ClassReportRow<'a> {
    label: &'a str,
    precision: f64,
    recall: f64,
    f1: f64,
    support: usize,
}

/// Export the per-class crop report as CSV
pub fn class_report_csv(report: &EvaluationReport) -> AppResult<String> {
    let crop = report
        .crop
        .as_ref()
        .ok_or_else(|| AppError::NotFound("Crop evaluation".to_string()))?;

    let mut wtr = csv::Writer::from_writer(vec![]);
    for class in &crop.metrics.per_class {
        wtr.serialize(ClassReportRow {
            label: &class.label,
            precision: class.precision,
            recall: class.recall,
            f1: class.f1,
            support: class.support,
        })
        .map_err(|e| AppError::Internal(format!("CSV serialization error: {}", e)))?;
    }
    let csv_data = String::from_utf8(
        wtr.into_inner()
            .map_err(|e| AppError::Internal(format!("CSV writer error: {}", e)))?,
    )
    .map_err(|e| AppError::Internal(format!("UTF-8 conversion error: {}", e)))?;
    Ok(csv_data)
}
