//! Rejection Reasons

use thiserror::Error;

/// Why a reading was rejected
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum RejectReason {
    /// Temperature channel absent
    #[error("temperature missing")]
    MissingTemperature,

    /// Humidity channel absent
    #[error("humidity missing")]
    MissingHumidity,

    /// Temperature under the plausibility floor (undershoot artifact)
    #[error("temperature {value} below floor {floor}")]
    TemperatureBelowFloor { value: f64, floor: f64 },

    /// Humidity at or under the floor (sensor glitch)
    #[error("humidity {value} not above {floor}")]
    HumidityNotPositive { value: f64, floor: f64 },
}
