//! Sensor Error Types

use std::path::PathBuf;
use thiserror::Error;

/// Communication-level failures while sampling the sensor
#[derive(Debug, Error)]
pub enum SensorError {
    /// The IIO device for the sensor does not exist
    #[error("Sensor device not found at {}", .0.display())]
    DeviceNotFound(PathBuf),

    /// The sensor did not answer the start signal
    #[error("Sensor did not respond")]
    Timeout,

    /// Checksum mismatch or bus error while decoding the response
    #[error("Sensor communication error: {0}")]
    Communication(String),

    /// The driver returned something that is not a number
    #[error("Malformed sensor value {value:?} in {channel}")]
    Malformed { channel: &'static str, value: String },

    /// Any other I/O failure
    #[error("Sensor I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl SensorError {
    /// Map an I/O error raised while reading a channel attribute.
    ///
    /// The kernel driver reports a missing response as `ETIMEDOUT` and a
    /// bad checksum or edge count as `EIO`.
    pub fn from_channel_io(err: std::io::Error) -> Self {
        match err.raw_os_error() {
            Some(libc::ETIMEDOUT) => SensorError::Timeout,
            Some(libc::EIO) => SensorError::Communication(err.to_string()),
            _ => SensorError::Io(err),
        }
    }
}
