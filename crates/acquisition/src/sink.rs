//! Persistence seam between the loop and the store

use chrono::NaiveDateTime;
use std::future::Future;
use storage::{ReadingStore, StorageError};

/// Destination for accepted readings
pub trait RecordSink {
    /// Durably record one reading, returning its id
    fn record(
        &mut self,
        timestamp: NaiveDateTime,
        temperature: f64,
        humidity: f64,
    ) -> impl Future<Output = Result<i64, StorageError>>;
}

impl RecordSink for ReadingStore {
    async fn record(
        &mut self,
        timestamp: NaiveDateTime,
        temperature: f64,
        humidity: f64,
    ) -> Result<i64, StorageError> {
        ReadingStore::append(self, timestamp, temperature, humidity).await
    }
}
