use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::types::Json;
use sqlx::{FromRow, SqlitePool};

use crate::errors::AppError;
use crate::models::file::AnalysisMetadata;
use crate::models::user::Role;

/// Fleet-wide statistics for the placement dashboard.
#[derive(Debug, Clone, Serialize)]
pub struct FleetStats {
    pub total_resumes: i64,
    pub high_match: i64,
    pub average_score: f64,
}

/// One resume joined with its owner, as consumed by the placement listing
/// and the CSV export.
#[derive(Debug, Clone, FromRow)]
pub struct ResumeWithOwner {
    pub name: String,
    pub email: String,
    pub filename: String,
    pub score: Option<f64>,
    pub upload_date: DateTime<Utc>,
    pub metadata: Json<AnalysisMetadata>,
}

pub async fn fleet_stats(pool: &SqlitePool) -> Result<FleetStats, AppError> {
    let total_resumes: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM files WHERE kind = 'resume'")
            .fetch_one(pool)
            .await?;

    // The high-match count spans every scored file, not just resumes,
    // matching the counting the dashboard has always shown.
    let high_match: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM files WHERE score >= 80")
        .fetch_one(pool)
        .await?;

    // AVG over zero rows is NULL; the dashboard reports 0.
    let average_score: Option<f64> =
        sqlx::query_scalar("SELECT AVG(score) FROM files WHERE kind = 'resume'")
            .fetch_one(pool)
            .await?;

    Ok(FleetStats {
        total_resumes,
        high_match,
        average_score: average_score.unwrap_or(0.0),
    })
}

/// Every resume on record joined with its owner, regardless of role.
pub async fn all_resumes(pool: &SqlitePool) -> Result<Vec<ResumeWithOwner>, AppError> {
    Ok(sqlx::query_as::<_, ResumeWithOwner>(
        "SELECT u.name, u.email, f.filename, f.score, f.upload_date, f.metadata \
         FROM files f JOIN users u ON f.user_id = u.id \
         WHERE f.kind = 'resume' \
         ORDER BY f.upload_date ASC, f.id ASC",
    )
    .fetch_all(pool)
    .await?)
}

/// Resumes belonging to job-seeker accounts only: the export population.
pub async fn export_rows(pool: &SqlitePool) -> Result<Vec<ResumeWithOwner>, AppError> {
    Ok(sqlx::query_as::<_, ResumeWithOwner>(
        "SELECT u.name, u.email, f.filename, f.score, f.upload_date, f.metadata \
         FROM users u JOIN files f ON u.id = f.user_id \
         WHERE u.role = ? AND f.kind = 'resume' \
         ORDER BY f.upload_date ASC, f.id ASC",
    )
    .bind(Role::JobSeeker)
    .fetch_all(pool)
    .await?)
}
