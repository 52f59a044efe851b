//! Reading Store Implementation

use crate::StorageError;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection, SqliteJournalMode};
use sqlx::{Connection, FromRow};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Local wall-clock timestamp format, second precision
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// How long to wait on a lock held by another process
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

const CREATE_READINGS_TABLE: &str = "CREATE TABLE IF NOT EXISTS readings (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    timestamp TEXT,
    temperature REAL,
    humidity REAL
)";

const CREATE_TIMESTAMP_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_readings_timestamp ON readings (timestamp)";

/// One persisted reading
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct StoredRecord {
    pub id: i64,
    pub timestamp: String,
    pub temperature: f64,
    pub humidity: f64,
}

/// Handle to the readings database file.
///
/// Holds no open connection; each call acquires one and releases it on
/// every exit path.
#[derive(Debug, Clone)]
pub struct ReadingStore {
    path: PathBuf,
    read_only: bool,
}

impl ReadingStore {
    /// Store that may create and append to the file
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            read_only: false,
        }
    }

    /// Store for readers; never creates or writes the file
    pub fn read_only(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            read_only: true,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create the schema if it does not exist yet. Safe on every start.
    pub async fn initialize(&self) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|source| StorageError::Directory {
                    path: parent.to_path_buf(),
                    source,
                })?;
        }

        let mut conn = self.connect().await?;
        let result = create_schema(&mut conn).await;
        release(conn, result).await?;

        info!("Readings store ready at {}", self.path.display());
        Ok(())
    }

    /// Append one reading in its own committed transaction.
    ///
    /// Returns the new row id. Ids are never reused.
    pub async fn append(
        &self,
        timestamp: NaiveDateTime,
        temperature: f64,
        humidity: f64,
    ) -> Result<i64, StorageError> {
        let timestamp = timestamp.format(TIMESTAMP_FORMAT).to_string();
        let mut conn = self.connect().await?;
        let result = insert_reading(&mut conn, &timestamp, temperature, humidity).await;
        let id = release(conn, result).await?;

        debug!("Inserted reading {} at {}", id, timestamp);
        Ok(id)
    }

    /// Readings with `timestamp >= cutoff`, in insertion order
    pub async fn readings_since(
        &self,
        cutoff: NaiveDateTime,
    ) -> Result<Vec<StoredRecord>, StorageError> {
        let cutoff = cutoff.format(TIMESTAMP_FORMAT).to_string();
        let mut conn = self.connect().await?;
        let result = sqlx::query_as::<_, StoredRecord>(
            "SELECT id, timestamp, temperature, humidity FROM readings
             WHERE timestamp >= ?1
             ORDER BY id",
        )
        .bind(cutoff)
        .fetch_all(&mut conn)
        .await
        .map_err(StorageError::from);
        release(conn, result).await
    }

    /// The newest `limit` readings, oldest first
    pub async fn latest(&self, limit: u32) -> Result<Vec<StoredRecord>, StorageError> {
        let mut conn = self.connect().await?;
        let result = sqlx::query_as::<_, StoredRecord>(
            "SELECT id, timestamp, temperature, humidity FROM (
                 SELECT id, timestamp, temperature, humidity FROM readings
                 ORDER BY id DESC LIMIT ?1
             ) ORDER BY id",
        )
        .bind(limit)
        .fetch_all(&mut conn)
        .await
        .map_err(StorageError::from);
        release(conn, result).await
    }

    /// Total number of stored readings
    pub async fn count(&self) -> Result<i64, StorageError> {
        let mut conn = self.connect().await?;
        let result = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM readings")
            .fetch_one(&mut conn)
            .await
            .map_err(StorageError::from);
        release(conn, result).await
    }

    async fn connect(&self) -> Result<SqliteConnection, StorageError> {
        let mut options = SqliteConnectOptions::new()
            .filename(&self.path)
            .busy_timeout(BUSY_TIMEOUT);
        options = if self.read_only {
            options.read_only(true)
        } else {
            options
                .create_if_missing(true)
                .journal_mode(SqliteJournalMode::Wal)
        };

        SqliteConnection::connect_with(&options)
            .await
            .map_err(|source| StorageError::Open {
                path: self.path.clone(),
                source,
            })
    }
}

async fn create_schema(conn: &mut SqliteConnection) -> Result<(), StorageError> {
    let mut tx = conn.begin().await?;
    sqlx::query(CREATE_READINGS_TABLE).execute(&mut *tx).await?;
    sqlx::query(CREATE_TIMESTAMP_INDEX).execute(&mut *tx).await?;
    tx.commit().await?;
    Ok(())
}

async fn insert_reading(
    conn: &mut SqliteConnection,
    timestamp: &str,
    temperature: f64,
    humidity: f64,
) -> Result<i64, StorageError> {
    let mut tx = conn.begin().await?;
    let id = sqlx::query(
        "INSERT INTO readings (timestamp, temperature, humidity) VALUES (?1, ?2, ?3)",
    )
        .bind(timestamp)
        .bind(temperature)
        .bind(humidity)
        .execute(&mut *tx)
        .await?
        .last_insert_rowid();
    tx.commit().await?;
    Ok(id)
}

/// Close the connection whatever the outcome of the work done on it.
/// A transaction dropped before commit has already been rolled back.
async fn release<T>(
    conn: SqliteConnection,
    result: Result<T, StorageError>,
) -> Result<T, StorageError> {
    match (result, conn.close().await) {
        (Ok(value), Ok(())) => Ok(value),
        (Ok(_), Err(err)) => Err(err.into()),
        (Err(err), closed) => {
            if let Err(close_err) = closed {
                warn!("Failed to close database connection: {}", close_err);
            }
            Err(err)
        }
    }
}
