use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Account role, fixed at sign-up and never reassigned afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(rename_all = "snake_case")]
pub enum Role {
    JobSeeker,
    PlacementStaff,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    /// Stored and compared verbatim.
    /// TODO: replace plaintext credential storage with salted one-way hashes
    /// and a constant-time comparison.
    #[serde(skip_serializing)]
    pub password: String,
    pub role: Role,
}
