//! Evaluation report handler

use axum::{
    extract::{Query, State},
    http::header,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::services::evaluation::class_report_csv;
use crate::AppState;

#[derive(Deserialize)]
pub struct EvaluationQuery {
    pub format: Option<String>, // "json", "text" or "csv"
}

/// Get the evaluation report computed at startup
pub async fn get_evaluation(
    State(state): State<AppState>,
    Query(query): Query<EvaluationQuery>,
) -> AppResult<impl IntoResponse> {
    let report = state
        .evaluation
        .as_ref()
        .ok_or_else(|| AppError::NotFound("Evaluation report".to_string()))?;

    match query.format.as_deref() {
        Some("text") => Ok((
            [
                (header::CONTENT_TYPE, "text/plain; charset=utf-8"),
                (header::CONTENT_DISPOSITION, "attachment; filename=\"model_evaluation.txt\""),
            ],
            report.summary_text(),
        )
            .into_response()),
        Some("csv") => {
            let csv = class_report_csv(report)?;
            Ok((
                [
                    (header::CONTENT_TYPE, "text/csv"),
                    (header::CONTENT_DISPOSITION, "attachment; filename=\"crop_report.csv\""),
                ],
                csv,
            )
                .into_response())
        }
        _ => Ok(Json(report.as_ref().clone()).into_response()),
    }
}
