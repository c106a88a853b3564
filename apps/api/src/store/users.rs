use sqlx::SqlitePool;
use tracing::info;

use crate::errors::AppError;
use crate::models::user::{Role, User};

/// Creates a user and returns the assigned id.
/// A duplicate email surfaces as `AppError::DuplicateEmail`; the original
/// row is left untouched.
pub async fn create_user(
    pool: &SqlitePool,
    name: &str,
    email: &str,
    password: &str,
    role: Role,
) -> Result<i64, AppError> {
    let result = sqlx::query("INSERT INTO users (name, email, password, role) VALUES (?, ?, ?, ?)")
        .bind(name)
        .bind(email)
        .bind(password)
        .bind(role)
        .execute(pool)
        .await;

    match result {
        Ok(done) => {
            let id = done.last_insert_rowid();
            info!("Created user {id} ({email})");
            Ok(id)
        }
        Err(sqlx::Error::Database(db)) if db.is_unique_violation() => {
            Err(AppError::DuplicateEmail)
        }
        Err(e) => Err(e.into()),
    }
}

/// Looks a user up by email and password. `None` means the credentials did
/// not match; that is an expected outcome, not a fault.
///
/// The comparison is verbatim against the stored value.
pub async fn authenticate(
    pool: &SqlitePool,
    email: &str,
    password: &str,
) -> Result<Option<User>, AppError> {
    Ok(
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = ? AND password = ?")
            .bind(email)
            .bind(password)
            .fetch_optional(pool)
            .await?,
    )
}

pub async fn find_by_id(pool: &SqlitePool, user_id: i64) -> Result<Option<User>, AppError> {
    Ok(sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ?")
        .bind(user_id)
        .fetch_optional(pool)
        .await?)
}

/// Updates the display name, the only mutable user field.
pub async fn update_name(pool: &SqlitePool, user_id: i64, name: &str) -> Result<(), AppError> {
    sqlx::query("UPDATE users SET name = ? WHERE id = ?")
        .bind(name)
        .bind(user_id)
        .execute(pool)
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::testing;

    #[tokio::test]
    async fn test_create_and_authenticate_user() {
        let pool = testing::pool().await;
        let id = create_user(&pool, "Ada", "ada@example.com", "hunter2", Role::JobSeeker)
            .await
            .unwrap();

        let user = authenticate(&pool, "ada@example.com", "hunter2")
            .await
            .unwrap()
            .expect("credentials should match");
        assert_eq!(user.id, id);
        assert_eq!(user.name, "Ada");
        assert_eq!(user.role, Role::JobSeeker);
    }

    #[tokio::test]
    async fn test_duplicate_email_fails_and_first_user_survives() {
        let pool = testing::pool().await;
        create_user(&pool, "Ada", "ada@example.com", "hunter2", Role::JobSeeker)
            .await
            .unwrap();

        let err = create_user(&pool, "Eve", "ada@example.com", "other", Role::JobSeeker)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::DuplicateEmail));

        // First registration is still queryable.
        let user = authenticate(&pool, "ada@example.com", "hunter2")
            .await
            .unwrap();
        assert!(user.is_some());
        assert_eq!(user.unwrap().name, "Ada");
    }

    #[tokio::test]
    async fn test_wrong_password_returns_none() {
        let pool = testing::pool().await;
        create_user(&pool, "Ada", "ada@example.com", "hunter2", Role::JobSeeker)
            .await
            .unwrap();

        let user = authenticate(&pool, "ada@example.com", "wrong").await.unwrap();
        assert!(user.is_none());
    }

    #[tokio::test]
    async fn test_unknown_email_returns_none() {
        let pool = testing::pool().await;
        let user = authenticate(&pool, "ghost@example.com", "any").await.unwrap();
        assert!(user.is_none());
    }

    #[tokio::test]
    async fn test_update_name_persists() {
        let pool = testing::pool().await;
        let id = create_user(&pool, "Ada", "ada@example.com", "hunter2", Role::PlacementStaff)
            .await
            .unwrap();

        update_name(&pool, id, "Ada Lovelace").await.unwrap();

        let user = find_by_id(&pool, id).await.unwrap().unwrap();
        assert_eq!(user.name, "Ada Lovelace");
        assert_eq!(user.role, Role::PlacementStaff);
    }
}
