//! Axum route handlers for the Analysis API.

use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    Json,
};
use tracing::{info, warn};

use crate::errors::AppError;
use crate::models::{AnalysisReport, Document};
use crate::pipeline::PipelineSnapshot;
use crate::state::AppState;

const FILE_FIELD: &str = "file";
const JOB_DESCRIPTION_FIELD: &str = "job_description";
const FALLBACK_FILE_NAME: &str = "resume";

struct Upload {
    document: Document,
    job_description: Option<String>,
}

/// POST /api/v1/analysis
///
/// Multipart upload: `file` (required) and `job_description` (optional).
/// Returns the report for both successful and failed runs; only a missing or
/// unreadable upload is rejected, before any remote call is made.
pub async fn handle_analyze(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<AnalysisReport>, AppError> {
    let mut multipart = multipart.map_err(|rejection| {
        warn!("Rejected analysis request: {rejection}");
        AppError::Validation(rejection.body_text())
    })?;
    let upload = read_upload(&mut multipart).await?;
    info!(
        "Received {} ({} bytes) for analysis",
        upload.document.name(),
        upload.document.len()
    );

    // Detached so a client disconnect cannot strand the run mid-flight.
    let orchestrator = state.orchestrator.clone();
    let report = tokio::spawn(async move {
        orchestrator
            .run_analysis(&upload.document, upload.job_description.as_deref())
            .await
    })
    .await
    .map_err(|e| AppError::Internal(anyhow::anyhow!("analysis task failed: {e}")))?;

    if report.is_failure() {
        warn!("Analysis of {} failed; returning error report", report.file_name);
    } else {
        info!(
            "Analysis of {} complete, top role: {}",
            report.file_name,
            report.top_role().unwrap_or("none")
        );
    }

    Ok(Json(report))
}

/// GET /api/v1/analysis/status
///
/// Lifecycle of the most recently initiated run, with its report once settled.
pub async fn handle_status(State(state): State<AppState>) -> Json<PipelineSnapshot> {
    Json(state.orchestrator.snapshot())
}

async fn read_upload(multipart: &mut Multipart) -> Result<Upload, AppError> {
    let mut document = None;
    let mut job_description = None;

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some(FILE_FIELD) => {
                let file_name = field
                    .file_name()
                    .filter(|n| !n.trim().is_empty())
                    .unwrap_or(FALLBACK_FILE_NAME)
                    .to_string();
                let content_type = field.content_type().map(str::to_string);
                let content = field.bytes().await?;
                document = Some(Document::new(file_name, content, content_type.as_deref()));
            }
            Some(JOB_DESCRIPTION_FIELD) => {
                job_description = Some(field.text().await?);
            }
            _ => {}
        }
    }

    let document = document.ok_or_else(|| {
        AppError::Validation(format!("Missing '{FILE_FIELD}' field: upload a resume to analyze"))
    })?;

    Ok(Upload {
        document,
        job_description,
    })
}
