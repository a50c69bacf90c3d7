//! Report API handlers.

use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use aperta_core::{ReportError, ReportRequest, ReportSummary};

use crate::state::AppState;

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// POST /api/reports
///
/// Generate a consolidated open-event report for the selected tenants and
/// date window. Partial upstream outages degrade the report; only
/// validation, credential-store, and sink failures produce an error status.
pub async fn generate_report(
    State(state): State<Arc<AppState>>,
    Json(body): Json<ReportRequest>,
) -> Result<Json<ReportSummary>, (StatusCode, Json<ErrorResponse>)> {
    match state.runner().generate(&body).await {
        Ok(summary) => Ok(Json(summary)),
        Err(e) => {
            let status = if e.is_validation() {
                StatusCode::BAD_REQUEST
            } else if matches!(e, ReportError::TenantStore(_)) {
                StatusCode::BAD_GATEWAY
            } else {
                StatusCode::INTERNAL_SERVER_ERROR
            };
            Err((status, Json(ErrorResponse { error: e.to_string() })))
        }
    }
}

/// GET /api/reports/download
///
/// Serve the last-written report CSV.
pub async fn download_report(
    State(state): State<Arc<AppState>>,
) -> Result<Response, (StatusCode, Json<ErrorResponse>)> {
    let path = state.runner().report_location();

    match tokio::fs::read(&path).await {
        Ok(data) => {
            let filename = path
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or("report.csv");
            Ok((
                [
                    (header::CONTENT_TYPE, "text/csv".to_string()),
                    (
                        header::CONTENT_DISPOSITION,
                        format!("attachment; filename=\"{}\"", filename),
                    ),
                ],
                data,
            )
                .into_response())
        }
        Err(_) => Err((
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: "No report has been generated yet".to_string(),
            }),
        )),
    }
}
