//! HTTP request handlers.

use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::{error, info};

use super::AppState;
use crate::error::{AnalysisError, IntakeError};
use crate::output::{AnalysisResult, AnalyzeRequest, ExtractResponse, HealthResponse, UploadedFile};

/// Multipart field names that carry uploads.
const FILE_FIELDS: &[&str] = &["files", "file"];

/// Liveness probe.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        service: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Extract text from one or more uploaded PDFs/images.
pub async fn extract(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ExtractResponse>, AppError> {
    let mut files = Vec::new();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or("");
        if !FILE_FIELDS.contains(&name) {
            continue;
        }
        let filename = field.file_name().unwrap_or("").to_string();
        let content_type = field.content_type().unwrap_or("").to_string();
        let data = field.bytes().await?;
        files.push(UploadedFile::new(filename, content_type, data.to_vec()));
    }

    info!("Received {} file(s) for extraction", files.len());
    let response = state.intake.handle(files).await?;
    Ok(Json(response))
}

/// Forward text to the hosted model for stylistic feedback.
pub async fn analyze(
    State(state): State<AppState>,
    Json(req): Json<AnalyzeRequest>,
) -> Result<Json<AnalysisResult>, AppError> {
    let analysis = state.analyst.analyze(&req.text).await?;
    Ok(Json(AnalysisResult { analysis }))
}

/// Every error a handler can return. Rendered as `{"detail": "..."}`.
#[derive(Debug)]
pub enum AppError {
    BadRequest(IntakeError),
    Analysis(AnalysisError),
}

impl From<IntakeError> for AppError {
    fn from(err: IntakeError) -> Self {
        AppError::BadRequest(err)
    }
}

impl From<MultipartError> for AppError {
    fn from(err: MultipartError) -> Self {
        let intake = if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
            IntakeError::PayloadTooLarge(err.body_text())
        } else {
            IntakeError::Multipart(err.body_text())
        };
        AppError::BadRequest(intake)
    }
}

impl From<AnalysisError> for AppError {
    fn from(err: AnalysisError) -> Self {
        AppError::Analysis(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, detail) = match self {
            AppError::BadRequest(err @ IntakeError::PayloadTooLarge(_)) => {
                (StatusCode::PAYLOAD_TOO_LARGE, err.to_string())
            }
            AppError::BadRequest(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            AppError::Analysis(err) => {
                error!("Analysis failed: {}", err);
                (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
            }
        };

        let body = Json(serde_json::json!({
            "detail": detail,
        }));

        (status, body).into_response()
    }
}
