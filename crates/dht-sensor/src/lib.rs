//! DHT11 Sensor Access
//!
//! Takes single temperature/humidity samples from a DHT11 bound to the
//! Linux kernel `dht11` IIO driver. A sample either yields a [`Reading`]
//! (whose channels may individually be absent) or fails with a
//! [`SensorError`].

mod dht11;
mod error;
mod reading;
mod simulated;

pub use dht11::{Dht11Sensor, HUMIDITY_CHANNEL, TEMPERATURE_CHANNEL};
pub use error::SensorError;
pub use reading::Reading;
pub use simulated::{ScriptedSensor, SimulatedSensor};

use std::future::Future;

/// Default GPIO line the sensor data pin is wired to (BCM numbering)
pub const DEFAULT_GPIO_PIN: u8 = 4;

/// A source of temperature/humidity samples.
///
/// Each call performs exactly one physical probe. Implementations must not
/// retry internally; the caller owns the retry cadence.
pub trait SensorSource {
    /// Take one reading
    fn sample(&mut self) -> impl Future<Output = Result<Reading, SensorError>>;

    /// Human readable description used in startup logs
    fn describe(&self) -> String;
}
