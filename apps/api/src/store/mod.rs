//! Record Store — durable persistence and aggregate read queries.
//!
//! Every write is a single independent INSERT or UPDATE with no multi-row
//! invariant, so SQLite's default statement-level serialization is all the
//! coordination required.

pub mod aggregates;
pub mod files;
pub mod users;

#[cfg(test)]
pub(crate) mod testing {
    use sqlx::sqlite::SqlitePoolOptions;
    use sqlx::SqlitePool;

    /// Fresh in-memory database with the full schema. One connection only:
    /// each `sqlite::memory:` connection is its own database.
    pub async fn pool() -> SqlitePool {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("in-memory SQLite pool");
        crate::db::init_schema(&pool).await.expect("schema init");
        pool
    }
}
