//! Storage Layer
//!
//! Durable, append-only SQLite store for accepted readings. Every
//! operation opens its own connection, runs to a committed state and
//! closes the connection before returning.

mod repository;

pub use repository::{ReadingStore, StoredRecord, TIMESTAMP_FORMAT};

use std::path::PathBuf;
use thiserror::Error;

/// Storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Cannot create database directory {}: {source}", path.display())]
    Directory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Cannot open database {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: sqlx::Error,
    },
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}
