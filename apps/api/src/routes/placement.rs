//! Placement dashboard — fleet statistics, the full resume listing, and the
//! CSV export.

use std::sync::Arc;

use anyhow::anyhow;
use axum::extract::State;
use axum::http::header;
use axum::response::IntoResponse;
use axum::{Extension, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::errors::AppError;
use crate::models::file::truncate_chars;
use crate::models::user::Role;
use crate::session::Session;
use crate::state::AppState;
use crate::store::aggregates::{self, FleetStats, ResumeWithOwner};

/// Skill lists in exports are cut to the first entries in display order.
const MAX_EXPORTED_SKILLS: usize = 20;

/// Characters of resume text shown as a sample.
const TEXT_SAMPLE_CHARS: usize = 100;

#[derive(Debug, Serialize)]
pub struct ResumeSummary {
    pub name: String,
    pub email: String,
    pub filename: String,
    pub score: Option<f64>,
    pub upload_date: DateTime<Utc>,
    pub text_sample: String,
}

/// CSV record; serde names become the header row.
#[derive(Debug, Serialize)]
struct ExportRecord {
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Email")]
    email: String,
    #[serde(rename = "Filename")]
    filename: String,
    #[serde(rename = "Score")]
    score: String,
    #[serde(rename = "Upload Date")]
    upload_date: String,
    #[serde(rename = "Matched Skills")]
    matched_skills: String,
    #[serde(rename = "Missing Skills")]
    missing_skills: String,
    #[serde(rename = "Text Sample")]
    text_sample: String,
}

impl From<ResumeWithOwner> for ExportRecord {
    fn from(row: ResumeWithOwner) -> Self {
        ExportRecord {
            name: row.name,
            email: row.email,
            filename: row.filename,
            score: format_score(row.score),
            upload_date: row.upload_date.format("%Y-%m-%d %H:%M:%S").to_string(),
            matched_skills: join_skills(&row.metadata.matched_skills),
            missing_skills: join_skills(&row.metadata.missing_skills),
            text_sample: text_sample(&row.metadata.text_excerpt),
        }
    }
}

/// GET /api/v1/placement/stats
pub async fn stats(
    State(state): State<AppState>,
    Extension(session): Extension<Arc<Session>>,
) -> Result<Json<FleetStats>, AppError> {
    session.require_role(Role::PlacementStaff)?;
    Ok(Json(aggregates::fleet_stats(&state.db).await?))
}

/// GET /api/v1/placement/resumes
pub async fn list_resumes(
    State(state): State<AppState>,
    Extension(session): Extension<Arc<Session>>,
) -> Result<Json<Vec<ResumeSummary>>, AppError> {
    session.require_role(Role::PlacementStaff)?;
    let rows = aggregates::all_resumes(&state.db).await?;
    Ok(Json(
        rows.into_iter()
            .map(|row| ResumeSummary {
                name: row.name,
                email: row.email,
                filename: row.filename,
                score: row.score,
                upload_date: row.upload_date,
                text_sample: text_sample(&row.metadata.text_excerpt),
            })
            .collect(),
    ))
}

/// GET /api/v1/placement/export — CSV attachment of every job-seeker resume.
pub async fn export_csv(
    State(state): State<AppState>,
    Extension(session): Extension<Arc<Session>>,
) -> Result<impl IntoResponse, AppError> {
    session.require_role(Role::PlacementStaff)?;
    let rows = aggregates::export_rows(&state.db).await?;

    let mut writer = csv::Writer::from_writer(Vec::new());
    for row in rows {
        writer
            .serialize(ExportRecord::from(row))
            .map_err(|e| anyhow!("CSV serialization failed: {e}"))?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| anyhow!("CSV finalization failed: {e}"))?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"all_candidates.csv\"",
            ),
        ],
        bytes,
    ))
}

/// Integer percentage with a trailing `%`; unscored rows read as 0%.
fn format_score(score: Option<f64>) -> String {
    format!("{:.0}%", score.unwrap_or(0.0))
}

fn join_skills(skills: &[String]) -> String {
    skills
        .iter()
        .take(MAX_EXPORTED_SKILLS)
        .cloned()
        .collect::<Vec<_>>()
        .join(", ")
}

fn text_sample(text: &str) -> String {
    format!("{}...", truncate_chars(text, TEXT_SAMPLE_CHARS))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::file::AnalysisMetadata;
    use sqlx::types::Json as SqlxJson;

    #[test]
    fn test_score_formats_as_integer_percent() {
        assert_eq!(format_score(Some(86.4)), "86%");
        assert_eq!(format_score(Some(66.7)), "67%");
        assert_eq!(format_score(None), "0%");
    }

    #[test]
    fn test_skills_join_truncates_to_twenty() {
        let skills: Vec<String> = (0..25).map(|i| format!("skill{i}")).collect();
        let joined = join_skills(&skills);
        assert_eq!(joined.split(", ").count(), 20);
        assert!(joined.starts_with("skill0, skill1"));
        assert!(!joined.contains("skill20"));
    }

    #[test]
    fn test_skills_join_handles_empty_list() {
        assert_eq!(join_skills(&[]), "");
    }

    #[test]
    fn test_text_sample_is_first_100_chars_with_ellipsis() {
        let text = "x".repeat(250);
        let sample = text_sample(&text);
        assert_eq!(sample.len(), 103);
        assert!(sample.ends_with("..."));
    }

    #[test]
    fn test_short_text_still_gets_ellipsis() {
        assert_eq!(text_sample("short"), "short...");
    }

    #[test]
    fn test_export_record_from_row() {
        let row = ResumeWithOwner {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            filename: "cv.pdf".to_string(),
            score: Some(72.6),
            upload_date: "2026-08-07T10:30:00Z".parse().unwrap(),
            metadata: SqlxJson(AnalysisMetadata::new(
                "resume body text",
                "job body text",
                vec!["python".to_string(), "sql".to_string()],
                vec!["aws".to_string()],
            )),
        };

        let record = ExportRecord::from(row);
        assert_eq!(record.score, "73%");
        assert_eq!(record.upload_date, "2026-08-07 10:30:00");
        assert_eq!(record.matched_skills, "python, sql");
        assert_eq!(record.missing_skills, "aws");
        assert_eq!(record.text_sample, "resume body text...");
    }
}
