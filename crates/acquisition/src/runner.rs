//! Acquisition Loop Implementation

use crate::sink::RecordSink;
use chrono::{Local, NaiveDateTime};
use data_validator::{AcceptedReading, Classification, Rejection, ValidationConfig, Validator};
use dht_sensor::{SensorError, SensorSource};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use storage::{StorageError, TIMESTAMP_FORMAT};
use tracing::{error, info, warn};

/// Configuration for the acquisition loop
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AcquisitionConfig {
    /// Pause between the end of one cycle and the start of the next (default: 15)
    pub interval_secs: u64,
}

impl Default for AcquisitionConfig {
    fn default() -> Self {
        Self { interval_secs: 15 }
    }
}

impl AcquisitionConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }
}

/// What happened during one cycle
#[derive(Debug)]
pub enum CycleOutcome {
    /// Reading accepted and persisted
    Stored {
        id: i64,
        timestamp: NaiveDateTime,
        reading: AcceptedReading,
    },
    /// Reading failed validation, nothing written
    Skipped(Rejection),
    /// No reading could be taken
    SensorFault(SensorError),
    /// Reading accepted but could not be persisted; it is dropped
    StorageFault {
        reading: AcceptedReading,
        error: StorageError,
    },
}

impl CycleOutcome {
    pub fn is_stored(&self) -> bool {
        matches!(self, CycleOutcome::Stored { .. })
    }
}

/// Sequential sample → classify → persist loop.
///
/// Holds no state between cycles besides its collaborators.
pub struct AcquisitionLoop<S, K> {
    sensor: S,
    sink: K,
    validator: Validator,
    config: AcquisitionConfig,
}

impl<S: SensorSource, K: RecordSink> AcquisitionLoop<S, K> {
    /// Create a new acquisition loop
    pub fn new(
        sensor: S,
        sink: K,
        validation: ValidationConfig,
        config: AcquisitionConfig,
    ) -> Self {
        Self {
            sensor,
            sink,
            validator: Validator::new(validation),
            config,
        }
    }

    /// Run forever. Every cycle is followed by the configured pause,
    /// whatever its outcome.
    pub async fn run(&mut self) {
        info!(
            "Starting acquisition from {} every {}s",
            self.sensor.describe(),
            self.config.interval_secs
        );

        loop {
            self.run_cycle().await;
            tokio::time::sleep(self.config.interval()).await;
        }
    }

    /// Execute one cycle and log its outcome
    pub async fn run_cycle(&mut self) -> CycleOutcome {
        let reading = match self.sensor.sample().await {
            Ok(reading) => reading,
            Err(err) => {
                error!("Sensor read error: {}", err);
                return CycleOutcome::SensorFault(err);
            }
        };

        let accepted = match self.validator.classify(&reading) {
            Classification::Accepted(accepted) => accepted,
            Classification::Rejected(rejection) => {
                warn!(
                    reason = %rejection.reason,
                    "Skipped invalid reading - {}",
                    rejection.reading
                );
                return CycleOutcome::Skipped(rejection);
            }
        };

        let timestamp = Local::now().naive_local();
        info!(
            timestamp = %timestamp.format(TIMESTAMP_FORMAT),
            "Temp: {}C | Humidity: {}%",
            accepted.temperature_c,
            accepted.humidity_pct
        );

        match self
            .sink
            .record(timestamp, accepted.temperature_c, accepted.humidity_pct)
            .await
        {
            Ok(id) => CycleOutcome::Stored {
                id,
                timestamp,
                reading: accepted,
            },
            Err(err) => {
                error!("Dropping reading, store write failed: {}", err);
                CycleOutcome::StorageFault {
                    reading: accepted,
                    error: err,
                }
            }
        }
    }

    pub fn sink(&self) -> &K {
        &self.sink
    }
}
