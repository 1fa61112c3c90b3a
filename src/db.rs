//! SQLite connection and schema management for the crawl state.
//!
//! - Connection pool sized for SQLite's file-level locking
//! - WAL journal and busy timeout on every pooled connection
//! - Migrations from `migrations/` applied on open
//!
//! # Example
//!
//! ```no_run
//! use krawl_core::Database;
//! use std::path::Path;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let db = Database::new(Path::new(".krawl/state.db")).await?;
//! assert!(db.is_wal_enabled().await?);
//! # Ok(())
//! # }
//! ```

use std::path::Path;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use thiserror::Error;
use tracing::instrument;

/// Kept low for SQLite since it uses file-level locking.
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Connections wait this long before returning `SQLITE_BUSY`.
const BUSY_TIMEOUT: Duration = Duration::from_millis(5000);

/// File name of the state database inside the working directory.
pub const STATE_DB_FILE: &str = "state.db";

/// Database-related errors.
#[derive(Error, Debug)]
pub enum DbError {
    #[error("failed to connect to database: {0}")]
    Connection(#[from] sqlx::Error),

    #[error("failed to run migrations: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Pooled connection to the state database.
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Opens (creating if needed) the database at `db_path` and migrates it.
    ///
    /// # Errors
    ///
    /// Returns `DbError::Connection` if the connection fails,
    /// or `DbError::Migration` if migrations fail.
    #[instrument(skip(db_path), fields(path = %db_path.display()))]
    pub async fn new(db_path: &Path) -> Result<Self, DbError> {
        let options = SqliteConnectOptions::new()
            .filename(db_path)
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(BUSY_TIMEOUT);

        let pool = SqlitePoolOptions::new()
            .max_connections(DEFAULT_MAX_CONNECTIONS)
            .connect_with(options)
            .await?;

        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self { pool })
    }

    /// Opens `state.db` inside `workdir`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// As [`Self::new`]; a directory that cannot be created surfaces as
    /// `DbError::Connection`.
    pub async fn open_workdir(workdir: &Path) -> Result<Self, DbError> {
        tokio::fs::create_dir_all(workdir)
            .await
            .map_err(|e| DbError::Connection(sqlx::Error::Io(e)))?;
        Self::new(&workdir.join(STATE_DB_FILE)).await
    }

    /// Creates an in-memory database for testing.
    ///
    /// A single connection keeps the memory database alive and shared.
    ///
    /// # Errors
    ///
    /// Returns `DbError::Connection` if the connection fails,
    /// or `DbError::Migration` if migrations fail.
    #[instrument]
    pub async fn new_in_memory() -> Result<Self, DbError> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await?;

        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self { pool })
    }

    #[must_use]
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Checks if WAL mode is enabled.
    ///
    /// # Errors
    ///
    /// Returns `DbError::Connection` if the query fails.
    #[instrument(skip(self))]
    pub async fn is_wal_enabled(&self) -> Result<bool, DbError> {
        let result: (String,) = sqlx::query_as("PRAGMA journal_mode")
            .fetch_one(&self.pool)
            .await?;

        Ok(result.0.eq_ignore_ascii_case("wal"))
    }

    /// Closes all pooled connections, flushing the WAL.
    #[instrument(skip(self))]
    pub async fn close(self) {
        self.pool.close().await;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_database_new_in_memory_succeeds() {
        assert!(Database::new_in_memory().await.is_ok());
    }

    #[tokio::test]
    async fn test_database_projects_table_constraints() {
        let db = Database::new_in_memory().await.unwrap();

        let insert = |procedure: &'static str| {
            sqlx::query(
                "INSERT INTO projects (platform, project_id, canonical_url, source_url, \
                 first_fetched_at, fetched_at, sourcing_procedure, content_hash, payload_format, \
                 raw_payload, manifest_json, rdf_ntriples) \
                 VALUES ('url', ?, 'u', 'u', 't', 't', ?, 'h', 'json', x'00', '{}', '')",
            )
            .bind(procedure)
            .bind(procedure)
        };

        assert!(insert("api").execute(db.pool()).await.is_ok());
        assert!(
            insert("scraped").execute(db.pool()).await.is_err(),
            "unknown sourcing procedure should be rejected by CHECK constraint"
        );
    }

    #[tokio::test]
    async fn test_database_cursor_and_failure_tables_exist() {
        let db = Database::new_in_memory().await.unwrap();
        sqlx::query(
            "INSERT INTO fetcher_cursors (platform, cursor_json, updated_at) VALUES ('url', '{}', 't')",
        )
        .execute(db.pool())
        .await
        .unwrap();
        sqlx::query(
            "INSERT INTO project_failures (platform, project_id, stage, kind, message, failed_at) \
             VALUES ('url', 'a', 'fetch', 'fatal', 'boom', 't')",
        )
        .execute(db.pool())
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn test_open_workdir_creates_directory_with_wal() {
        let temp_dir = tempfile::tempdir().unwrap();
        let workdir = temp_dir.path().join("nested/.krawl");

        let db = Database::open_workdir(&workdir).await.unwrap();
        assert!(workdir.join(STATE_DB_FILE).exists());
        assert!(db.is_wal_enabled().await.unwrap());
        db.close().await;
    }
}
