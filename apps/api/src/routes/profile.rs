use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::{Extension, Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::user::Role;
use crate::session::Session;
use crate::state::AppState;
use crate::store::{files, users};

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub name: String,
    pub email: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateProfileRequest {
    pub name: String,
}

/// One row of the analysis history panel.
#[derive(Debug, Serialize)]
pub struct ResumeHistoryEntry {
    pub filename: String,
    pub upload_date: DateTime<Utc>,
    pub score: Option<f64>,
    pub verdict: Option<&'static str>,
}

/// GET /api/v1/profile
pub async fn get_profile(
    State(state): State<AppState>,
    Extension(session): Extension<Arc<Session>>,
) -> Result<Json<ProfileResponse>, AppError> {
    session.require_role(Role::JobSeeker)?;
    let user = users::find_by_id(&state.db, session.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User {} not found", session.user_id)))?;
    Ok(Json(ProfileResponse {
        name: user.name,
        email: user.email,
    }))
}

/// PATCH /api/v1/profile — the name is the only mutable field; email is
/// fixed at sign-up.
pub async fn update_profile(
    State(state): State<AppState>,
    Extension(session): Extension<Arc<Session>>,
    Json(req): Json<UpdateProfileRequest>,
) -> Result<StatusCode, AppError> {
    session.require_role(Role::JobSeeker)?;
    let name = req.name.trim();
    if name.is_empty() {
        return Err(AppError::Validation("name must not be empty".to_string()));
    }

    users::update_name(&state.db, session.user_id, name).await?;
    state.sessions.rename(session.token, name);
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/profile/resumes — upload history, oldest first, with a
/// match verdict per scored row.
pub async fn resume_history(
    State(state): State<AppState>,
    Extension(session): Extension<Arc<Session>>,
) -> Result<Json<Vec<ResumeHistoryEntry>>, AppError> {
    session.require_role(Role::JobSeeker)?;
    let rows = files::list_resumes_for_user(&state.db, session.user_id).await?;
    Ok(Json(
        rows.into_iter()
            .map(|row| ResumeHistoryEntry {
                filename: row.filename,
                upload_date: row.upload_date,
                score: row.score,
                verdict: row.score.map(verdict),
            })
            .collect(),
    ))
}

/// Classifies a match score for the history display.
fn verdict(score: f64) -> &'static str {
    if score >= 80.0 {
        "High"
    } else if score >= 60.0 {
        "Medium"
    } else {
        "Low"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verdict_boundaries() {
        assert_eq!(verdict(100.0), "High");
        assert_eq!(verdict(80.0), "High");
        assert_eq!(verdict(79.9), "Medium");
        assert_eq!(verdict(60.0), "Medium");
        assert_eq!(verdict(59.9), "Low");
        assert_eq!(verdict(0.0), "Low");
    }
}
