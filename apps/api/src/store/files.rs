use chrono::Utc;
use sqlx::types::Json;
use sqlx::SqlitePool;
use tracing::info;

use crate::errors::AppError;
use crate::models::file::{AnalysisMetadata, FileKind, FileRow};

/// Inserts one analysis record with a server-assigned upload timestamp.
/// Rows are never mutated or deleted after this point.
pub async fn insert_analysis(
    pool: &SqlitePool,
    user_id: Option<i64>,
    filename: &str,
    kind: FileKind,
    score: f64,
    metadata: &AnalysisMetadata,
) -> Result<i64, AppError> {
    let done = sqlx::query(
        "INSERT INTO files (user_id, filename, kind, score, metadata, upload_date) \
         VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(user_id)
    .bind(filename)
    .bind(kind)
    .bind(score)
    .bind(Json(metadata))
    .bind(Utc::now())
    .execute(pool)
    .await?;

    let id = done.last_insert_rowid();
    info!("Inserted analysis record {id} for {filename}");
    Ok(id)
}

/// Returns a user's resume records ordered by upload time.
pub async fn list_resumes_for_user(
    pool: &SqlitePool,
    user_id: i64,
) -> Result<Vec<FileRow>, AppError> {
    Ok(sqlx::query_as::<_, FileRow>(
        "SELECT * FROM files WHERE user_id = ? AND kind = ? ORDER BY upload_date ASC, id ASC",
    )
    .bind(user_id)
    .bind(FileKind::Resume)
    .fetch_all(pool)
    .await?)
}
