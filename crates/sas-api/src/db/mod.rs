//! # Database Persistence Layer
//!
//! SQLite persistence via SQLx. One table per entity:
//!
//! - `standard_templates`: built-in templates, seeded at startup
//! - `assessment_tasks`: one row per task, with cached aggregates
//! - `assessment_items`: one row per (task, control item), cascading on
//!   task deletion
//!
//! All functions take a `&SqlitePool` (or a transaction) and return
//! `sqlx::Error`; handlers convert with `?` into `AppError`.

pub mod items;
pub mod tasks;
pub mod templates;

use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

use crate::config::DatabaseConfig;

/// Connect to SQLite and run the embedded migrations.
///
/// File databases are created if missing, together with their parent
/// directory. Foreign keys are enforced on every connection.
pub async fn init_pool(config: &DatabaseConfig) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(&config.url)?
        .create_if_missing(true)
        .foreign_keys(true);

    let in_memory = is_in_memory(&config.url);
    if !in_memory {
        if let Some(parent) = options.get_filename().parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(sqlx::Error::Io)?;
            }
        }
    }

    let mut pool_options = SqlitePoolOptions::new()
        .max_connections(config.max_connections.max(1))
        .acquire_timeout(Duration::from_secs(5));
    if in_memory {
        // The in-memory database lives as long as one connection to it stays open.
        pool_options = pool_options.idle_timeout(None).max_lifetime(None);
    }

    let pool = pool_options.connect_with(options).await?;
    tracing::info!(url = %config.url, "connected to SQLite");

    sqlx::migrate!("./migrations").run(&pool).await?;
    tracing::info!("database migrations applied");

    Ok(pool)
}

fn is_in_memory(url: &str) -> bool {
    url.contains(":memory:") || url.contains("mode=memory")
}

/// Cheap liveness query used by the readiness check.
pub async fn ping(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Parse a stored enum column, logging and falling back to the default on
/// values this build does not recognize.
pub(crate) fn parse_or_default<T>(column: &'static str, id: i64, raw: &str) -> T
where
    T: FromStr + Default,
    T::Err: std::fmt::Display,
{
    raw.parse().unwrap_or_else(|e: T::Err| {
        tracing::warn!(
            id,
            column,
            value = %raw,
            error = %e,
            "unrecognized value in database, using default"
        );
        T::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use sas_core::{Rating, TaskStatus};

    #[test]
    fn memory_urls_detected() {
        assert!(is_in_memory("sqlite::memory:"));
        assert!(is_in_memory("sqlite://file:test?mode=memory&cache=shared"));
        assert!(!is_in_memory("sqlite://data/assessments.db"));
    }

    #[test]
    fn stored_enums_parse_with_fallback() {
        let rating: Rating = parse_or_default("rating", 1, "partial");
        assert_eq!(rating, Rating::Partial);
        let rating: Rating = parse_or_default("rating", 1, "excellent");
        assert_eq!(rating, Rating::NotStarted);
        let status: TaskStatus = parse_or_default("status", 1, "archived");
        assert_eq!(status, TaskStatus::Draft);
    }

    #[tokio::test]
    async fn in_memory_pool_connections_share_one_database() {
        let config = DatabaseConfig {
            url: "sqlite::memory:".to_string(),
            max_connections: 2,
        };
        let pool = init_pool(&config).await.unwrap();

        let mut first = pool.acquire().await.unwrap();
        let mut second = pool.acquire().await.unwrap();
        sqlx::query("CREATE TABLE shared_check (x INTEGER)")
            .execute(&mut *first)
            .await
            .unwrap();
        sqlx::query("INSERT INTO shared_check (x) VALUES (7)")
            .execute(&mut *first)
            .await
            .unwrap();
        let x: i64 = sqlx::query_scalar("SELECT x FROM shared_check")
            .fetch_one(&mut *second)
            .await
            .unwrap();
        assert_eq!(x, 7);
        drop(first);
        drop(second);

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM shared_check")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 1);
    }

    #[tokio::test]
    async fn init_pool_creates_file_database_and_parent_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("assessments.db");
        let config = DatabaseConfig {
            url: format!("sqlite://{}", path.display()),
            max_connections: 1,
        };
        let pool = init_pool(&config).await.unwrap();
        ping(&pool).await.unwrap();
        assert!(path.exists());
    }
}
