pub mod analysis;
pub mod auth;
pub mod health;
pub mod placement;
pub mod profile;

use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::routing::{get, post};
use axum::Router;

use crate::session;
use crate::state::AppState;

/// Largest accepted upload body. Resumes are small; this is headroom, not a
/// product limit.
const MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    // Everything below requires a live session; wrong-role access inside the
    // group returns 403 from the handler's own gate.
    let protected = Router::new()
        .route("/api/v1/auth/logout", post(auth::logout))
        .route("/api/v1/analysis", post(analysis::run_analysis))
        .route(
            "/api/v1/analysis/latest",
            get(analysis::latest).delete(analysis::reset),
        )
        .route(
            "/api/v1/profile",
            get(profile::get_profile).patch(profile::update_profile),
        )
        .route("/api/v1/profile/resumes", get(profile::resume_history))
        .route("/api/v1/placement/stats", get(placement::stats))
        .route("/api/v1/placement/resumes", get(placement::list_resumes))
        .route("/api/v1/placement/export", get(placement::export_csv))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            session::require_session,
        ));

    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/auth/signup", post(auth::signup))
        .route("/api/v1/auth/login", post(auth::login))
        .merge(protected)
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .with_state(state)
}
