//! Session management — one bearer token per login, held in process memory.
//!
//! A session is created on successful login and destroyed on logout; there
//! are no other transitions, and the role inside a session never changes.
//! All per-session state (including the most recent analysis result) lives
//! here and nowhere else, so logout discards everything at once.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use axum::extract::{Request, State};
use axum::http::{header, HeaderMap};
use axum::middleware::Next;
use axum::response::Response;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::user::{Role, User};
use crate::state::AppState;

/// The most recent analysis result, kept for display until explicitly
/// cleared or the session ends.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisOutcome {
    pub score: f64,
    /// "matched/total" over the job-relevant terms, e.g. "2/3".
    pub skills_matched: String,
    pub matched_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    pub keyword_coverage: f64,
    pub experience: String,
}

/// One authenticated session. Handlers receive a snapshot via request
/// extensions; mutations go through `SessionStore`.
#[derive(Debug, Clone)]
pub struct Session {
    pub token: Uuid,
    pub user_id: i64,
    pub name: String,
    pub role: Role,
    pub last_analysis: Option<AnalysisOutcome>,
}

impl Session {
    pub fn require_role(&self, role: Role) -> Result<(), AppError> {
        if self.role == role {
            Ok(())
        } else {
            Err(AppError::Forbidden)
        }
    }
}

/// In-process session registry keyed by bearer token.
#[derive(Clone, Default)]
pub struct SessionStore {
    inner: Arc<RwLock<HashMap<Uuid, Session>>>,
}

impl SessionStore {
    /// Creates a session for a freshly authenticated user.
    pub fn create(&self, user: &User) -> Session {
        let session = Session {
            token: Uuid::new_v4(),
            user_id: user.id,
            name: user.name.clone(),
            role: user.role,
            last_analysis: None,
        };
        self.write().insert(session.token, session.clone());
        session
    }

    pub fn get(&self, token: Uuid) -> Option<Session> {
        self.read().get(&token).cloned()
    }

    /// Logout: removes the session and with it all held state, including any
    /// pending analysis result.
    pub fn remove(&self, token: Uuid) -> bool {
        self.write().remove(&token).is_some()
    }

    pub fn set_last_analysis(&self, token: Uuid, outcome: AnalysisOutcome) {
        if let Some(session) = self.write().get_mut(&token) {
            session.last_analysis = Some(outcome);
        }
    }

    /// Clears only the stashed analysis result; the session stays live.
    pub fn clear_last_analysis(&self, token: Uuid) {
        if let Some(session) = self.write().get_mut(&token) {
            session.last_analysis = None;
        }
    }

    pub fn last_analysis(&self, token: Uuid) -> Option<AnalysisOutcome> {
        self.read().get(&token).and_then(|s| s.last_analysis.clone())
    }

    /// Keeps the session's display name in sync after a profile update.
    pub fn rename(&self, token: Uuid, name: &str) {
        if let Some(session) = self.write().get_mut(&token) {
            session.name = name.to_string();
        }
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, HashMap<Uuid, Session>> {
        self.inner.read().expect("session store lock poisoned")
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, HashMap<Uuid, Session>> {
        self.inner.write().expect("session store lock poisoned")
    }
}

/// Middleware guarding every authenticated route: resolves the bearer token
/// to a live session and hands the handler a snapshot via extensions.
pub async fn require_session(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = bearer_token(request.headers()).ok_or(AppError::Unauthorized)?;
    let session = state.sessions.get(token).ok_or(AppError::Unauthorized)?;
    request.extensions_mut().insert(Arc::new(session));
    Ok(next.run(request).await)
}

fn bearer_token(headers: &HeaderMap) -> Option<Uuid> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .and_then(|token| Uuid::parse_str(token.trim()).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job_seeker() -> User {
        User {
            id: 7,
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            password: "pw".to_string(),
            role: Role::JobSeeker,
        }
    }

    fn outcome() -> AnalysisOutcome {
        AnalysisOutcome {
            score: 66.0,
            skills_matched: "2/3".to_string(),
            matched_skills: vec!["python".to_string(), "sql".to_string()],
            missing_skills: vec!["aws".to_string()],
            keyword_coverage: 200.0 / 3.0,
            experience: "5 years".to_string(),
        }
    }

    #[test]
    fn test_login_creates_resolvable_session() {
        let store = SessionStore::default();
        let session = store.create(&job_seeker());

        let resolved = store.get(session.token).expect("session should resolve");
        assert_eq!(resolved.user_id, 7);
        assert_eq!(resolved.role, Role::JobSeeker);
        assert!(resolved.last_analysis.is_none());
    }

    #[test]
    fn test_logout_discards_session_and_pending_analysis() {
        let store = SessionStore::default();
        let session = store.create(&job_seeker());
        store.set_last_analysis(session.token, outcome());

        assert!(store.remove(session.token));
        assert!(store.get(session.token).is_none());
        assert!(store.last_analysis(session.token).is_none());
        // A second logout of the same token is a no-op.
        assert!(!store.remove(session.token));
    }

    #[test]
    fn test_reset_clears_only_the_analysis() {
        let store = SessionStore::default();
        let session = store.create(&job_seeker());
        store.set_last_analysis(session.token, outcome());
        assert!(store.last_analysis(session.token).is_some());

        store.clear_last_analysis(session.token);
        assert!(store.last_analysis(session.token).is_none());
        assert!(store.get(session.token).is_some());
    }

    #[test]
    fn test_rename_updates_the_session_copy() {
        let store = SessionStore::default();
        let session = store.create(&job_seeker());
        store.rename(session.token, "Ada Lovelace");
        assert_eq!(store.get(session.token).unwrap().name, "Ada Lovelace");
    }

    #[test]
    fn test_role_gate() {
        let store = SessionStore::default();
        let session = store.create(&job_seeker());
        assert!(session.require_role(Role::JobSeeker).is_ok());
        assert!(matches!(
            session.require_role(Role::PlacementStaff),
            Err(AppError::Forbidden)
        ));
    }

    #[test]
    fn test_unknown_token_does_not_resolve() {
        let store = SessionStore::default();
        assert!(store.get(Uuid::new_v4()).is_none());
    }

    #[test]
    fn test_bearer_token_parsing() {
        let token = Uuid::new_v4();
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            format!("Bearer {token}").parse().unwrap(),
        );
        assert_eq!(bearer_token(&headers), Some(token));

        let mut bad = HeaderMap::new();
        bad.insert(header::AUTHORIZATION, "Basic abc".parse().unwrap());
        assert_eq!(bearer_token(&bad), None);
        assert_eq!(bearer_token(&HeaderMap::new()), None);
    }
}
