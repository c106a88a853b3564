//! Resume Analysis — the upload → extract → score → persist pipeline.
//!
//! Runs synchronously within the triggering request; progress is reported as
//! coarse sequential log steps. Uploaded bytes are spooled to a temp file for
//! extraction, and the temp file is removed on drop whether or not the
//! pipeline succeeds.

use std::io::Write;
use std::sync::Arc;

use anyhow::anyhow;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use bytes::Bytes;
use tempfile::NamedTempFile;
use tracing::info;

use crate::errors::AppError;
use crate::extract::{self, DocumentFormat};
use crate::models::file::{AnalysisMetadata, FileKind};
use crate::models::user::Role;
use crate::session::{AnalysisOutcome, Session};
use crate::state::AppState;
use crate::store::files;

/// Stand-in used when no job description is supplied in any form.
const FALLBACK_JOB_DESCRIPTION: &str = "Sample job description";

/// POST /api/v1/analysis
pub async fn run_analysis(
    State(state): State<AppState>,
    Extension(session): Extension<Arc<Session>>,
    mut multipart: Multipart,
) -> Result<Json<AnalysisOutcome>, AppError> {
    session.require_role(Role::JobSeeker)?;

    let mut resume: Option<(String, Bytes)> = None;
    let mut jd_file: Option<(String, Bytes)> = None;
    let mut jd_text_field: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("malformed multipart request: {e}")))?
    {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };
        match name.as_str() {
            "resume" => {
                let filename = field
                    .file_name()
                    .map(str::to_string)
                    .ok_or_else(|| AppError::Validation("resume must be a file upload".to_string()))?;
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("failed to read resume upload: {e}")))?;
                resume = Some((filename, data));
            }
            "job_description" => {
                let filename = field.file_name().map(str::to_string).ok_or_else(|| {
                    AppError::Validation("job_description must be a file upload".to_string())
                })?;
                let data = field.bytes().await.map_err(|e| {
                    AppError::Validation(format!("failed to read job description upload: {e}"))
                })?;
                jd_file = Some((filename, data));
            }
            "job_text" => {
                jd_text_field = Some(field.text().await.map_err(|e| {
                    AppError::Validation(format!("failed to read job_text field: {e}"))
                })?);
            }
            _ => {}
        }
    }

    let (resume_name, resume_bytes) =
        resume.ok_or_else(|| AppError::Validation("a resume upload is required".to_string()))?;

    let resume_format = DocumentFormat::from_filename(&resume_name)?;
    if !resume_format.accepted_for_resume() {
        return Err(AppError::Validation(
            "resumes must be PDF, DOC, or DOCX".to_string(),
        ));
    }

    info!("Extracting resume text from {resume_name}");
    let resume_text = extract_upload(&resume_bytes, resume_format)?;

    let job_text = match jd_file {
        Some((jd_name, jd_bytes)) => {
            let jd_format = DocumentFormat::from_filename(&jd_name)?;
            info!("Extracting job description from {jd_name}");
            extract_upload(&jd_bytes, jd_format)?
        }
        None => jd_text_field
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| FALLBACK_JOB_DESCRIPTION.to_string()),
    };

    info!("Scoring resume against job description");
    let report = state.scorer.score(&resume_text, &job_text).await?;

    info!("Persisting analysis record");
    let metadata = AnalysisMetadata::new(
        &resume_text,
        &job_text,
        report.matched_terms.clone(),
        report.missing_terms.clone(),
    );
    files::insert_analysis(
        &state.db,
        Some(session.user_id),
        &resume_name,
        FileKind::Resume,
        report.score,
        &metadata,
    )
    .await?;

    let total = report.matched_terms.len() + report.missing_terms.len();
    let outcome = AnalysisOutcome {
        score: report.score,
        skills_matched: format!("{}/{}", report.matched_terms.len(), total),
        matched_skills: report.matched_terms,
        missing_skills: report.missing_terms,
        keyword_coverage: report.keyword_coverage,
        experience: report.experience,
    };
    state
        .sessions
        .set_last_analysis(session.token, outcome.clone());

    info!(
        "Analysis complete for {resume_name}: score {:.0}",
        outcome.score
    );
    Ok(Json(outcome))
}

/// GET /api/v1/analysis/latest
pub async fn latest(
    State(state): State<AppState>,
    Extension(session): Extension<Arc<Session>>,
) -> Result<Json<Option<AnalysisOutcome>>, AppError> {
    session.require_role(Role::JobSeeker)?;
    Ok(Json(state.sessions.last_analysis(session.token)))
}

/// DELETE /api/v1/analysis/latest — clears the stashed result so the next
/// analysis starts from a clean slate. The session itself stays live.
pub async fn reset(
    State(state): State<AppState>,
    Extension(session): Extension<Arc<Session>>,
) -> Result<StatusCode, AppError> {
    session.require_role(Role::JobSeeker)?;
    state.sessions.clear_last_analysis(session.token);
    Ok(StatusCode::NO_CONTENT)
}

/// Spools upload bytes to disk and extracts from the temp path. The temp
/// file is deleted on drop on success and failure paths alike.
fn extract_upload(data: &[u8], format: DocumentFormat) -> Result<String, AppError> {
    let mut tmp =
        NamedTempFile::new().map_err(|e| anyhow!("failed to create temp file: {e}"))?;
    tmp.write_all(data)
        .map_err(|e| anyhow!("failed to spool upload: {e}"))?;
    extract::extract_path(tmp.path(), format)
}
