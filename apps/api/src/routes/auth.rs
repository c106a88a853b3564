use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::{Extension, Json};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::user::Role;
use crate::session::Session;
use crate::state::AppState;
use crate::store::users;

#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
}

#[derive(Debug, Serialize)]
pub struct SignupResponse {
    pub id: i64,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: Uuid,
    pub name: String,
    pub role: Role,
}

/// POST /api/v1/auth/signup
pub async fn signup(
    State(state): State<AppState>,
    Json(req): Json<SignupRequest>,
) -> Result<(StatusCode, Json<SignupResponse>), AppError> {
    let name = req.name.trim();
    let email = req.email.trim();
    if name.is_empty() || email.is_empty() || req.password.is_empty() {
        return Err(AppError::Validation(
            "name, email, and password are required".to_string(),
        ));
    }

    let id = users::create_user(&state.db, name, email, &req.password, req.role).await?;
    Ok((StatusCode::CREATED, Json(SignupResponse { id })))
}

/// POST /api/v1/auth/login
///
/// A failed lookup (unknown email or wrong password alike) maps to the one
/// generic `InvalidCredentials` response.
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let email = req.email.trim();
    if email.is_empty() || req.password.is_empty() {
        return Err(AppError::Validation(
            "email and password are required".to_string(),
        ));
    }

    let user = users::authenticate(&state.db, email, &req.password)
        .await?
        .ok_or(AppError::InvalidCredentials)?;

    let session = state.sessions.create(&user);
    info!("User {} logged in", user.id);

    Ok(Json(LoginResponse {
        token: session.token,
        name: session.name,
        role: session.role,
    }))
}

/// POST /api/v1/auth/logout
///
/// Destroys the session and everything it holds, including any pending
/// analysis result.
pub async fn logout(
    State(state): State<AppState>,
    Extension(session): Extension<Arc<Session>>,
) -> Result<StatusCode, AppError> {
    state.sessions.remove(session.token);
    info!("User {} logged out", session.user_id);
    Ok(StatusCode::NO_CONTENT)
}
