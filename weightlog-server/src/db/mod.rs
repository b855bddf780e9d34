//! SQLite storage for daily records
//!
//! One pool per process, one pooled connection per request. Handlers call
//! [`Database::acquire`] and build a [`RecordRepo`] over the connection; the
//! connection goes back to the pool when it is dropped, on every exit path.

pub mod records;

use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::NaiveDate;
use sqlx::pool::PoolConnection;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use sqlx::Sqlite;

pub use records::RecordRepo;

/// Kept low for single-user tooling.
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

const SCHEMA: &str = include_str!("schema.sql");

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("a record for {date} already exists")]
    DuplicateDate { date: NaiveDate },

    #[error("record {id} not found")]
    NotFound { id: i64 },
}

impl DbError {
    /// Map a write failure, turning a unique-constraint violation on `date`
    /// into [`DbError::DuplicateDate`].
    pub(crate) fn from_write(err: sqlx::Error, date: NaiveDate) -> Self {
        match &err {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                Self::DuplicateDate { date }
            }
            _ => Self::Sqlx(err),
        }
    }
}

/// File-backed record store
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
    path: PathBuf,
}

impl Database {
    /// Open or create the database at `path` and ensure the schema exists.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, DbError> {
        let path = path.into();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let options = SqliteConnectOptions::new()
            .filename(&path)
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(5));

        let pool = SqlitePoolOptions::new()
            .max_connections(DEFAULT_MAX_CONNECTIONS)
            .connect_with(options)
            .await?;

        let db = Self { pool, path };
        db.initialize().await?;
        tracing::debug!(path = %db.path.display(), "database ready");
        Ok(db)
    }

    /// Create the record table if it is absent. Safe to call repeatedly.
    pub async fn initialize(&self) -> Result<(), DbError> {
        sqlx::raw_sql(SCHEMA).execute(&self.pool).await?;
        Ok(())
    }

    /// Check out a connection scoped to the caller.
    pub async fn acquire(&self) -> Result<PoolConnection<Sqlite>, DbError> {
        Ok(self.pool.acquire().await?)
    }

    /// Database file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Close every pooled connection.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn open_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("weight.db");

        let db = Database::open(&path).await.unwrap();
        assert!(path.exists());
        assert_eq!(db.path(), path.as_path());
        db.close().await;
    }

    #[tokio::test]
    async fn initialize_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::open(dir.path().join("weight.db")).await.unwrap();

        db.initialize().await.unwrap();
        db.initialize().await.unwrap();

        let mut conn = db.acquire().await.unwrap();
        assert_eq!(RecordRepo::new(&mut conn).count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn reopen_keeps_records() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("weight.db");

        let db = Database::open(&path).await.unwrap();
        {
            let mut conn = db.acquire().await.unwrap();
            RecordRepo::new(&mut conn)
                .insert(&crate::models::NewRecord {
                    date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                    weight: 70.5,
                    memo: String::new(),
                })
                .await
                .unwrap();
        }
        db.close().await;

        let db = Database::open(&path).await.unwrap();
        let mut conn = db.acquire().await.unwrap();
        assert_eq!(RecordRepo::new(&mut conn).count().await.unwrap(), 1);
    }
}
