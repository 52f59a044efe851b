//! DHT11 via the Linux IIO subsystem
//!
//! The kernel `dht11` driver (`dtoverlay=dht11,gpiopin=N`) bit-bangs the
//! one-wire protocol and exposes the decoded channels as sysfs attributes.
//! Reading the temperature attribute triggers a fresh transaction; the
//! humidity attribute is served from the same transaction.

use crate::error::SensorError;
use crate::reading::Reading;
use crate::SensorSource;
use std::io;
use std::path::PathBuf;
use tracing::{debug, info};

/// Temperature attribute, milli-degrees Celsius
pub const TEMPERATURE_CHANNEL: &str = "in_temp_input";
/// Relative humidity attribute, milli-percent
pub const HUMIDITY_CHANNEL: &str = "in_humidityrelative_input";

const MILLI_SCALE: f64 = 1000.0;

/// DHT11 sensor bound to an IIO device directory
#[derive(Debug, Clone)]
pub struct Dht11Sensor {
    /// IIO device directory, e.g. `/sys/bus/iio/devices/iio:device0`
    device: PathBuf,
    /// GPIO line the overlay binds the driver to
    gpio_pin: u8,
}

impl Dht11Sensor {
    /// Create a sensor for the given IIO device directory
    pub fn new(device: impl Into<PathBuf>, gpio_pin: u8) -> Self {
        let device = device.into();
        info!("Using DHT11 on GPIO {} at {}", gpio_pin, device.display());
        Self { device, gpio_pin }
    }

    /// GPIO line of the data pin
    pub fn gpio_pin(&self) -> u8 {
        self.gpio_pin
    }

    async fn read_channel(&self, channel: &'static str) -> Result<Option<f64>, SensorError> {
        let path = self.device.join(channel);
        match tokio::fs::read_to_string(&path).await {
            Ok(raw) => parse_channel(channel, &raw),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                if tokio::fs::metadata(&self.device).await.is_err() {
                    Err(SensorError::DeviceNotFound(self.device.clone()))
                } else {
                    debug!("Channel {} not exposed by {}", channel, self.device.display());
                    Ok(None)
                }
            }
            Err(err) => Err(SensorError::from_channel_io(err)),
        }
    }
}

impl SensorSource for Dht11Sensor {
    async fn sample(&mut self) -> Result<Reading, SensorError> {
        let temperature_c = self.read_channel(TEMPERATURE_CHANNEL).await?;
        let humidity_pct = self.read_channel(HUMIDITY_CHANNEL).await?;
        debug!(?temperature_c, ?humidity_pct, "DHT11 sample");
        Ok(Reading {
            temperature_c,
            humidity_pct,
        })
    }

    fn describe(&self) -> String {
        format!("DHT11 (GPIO {}, {})", self.gpio_pin, self.device.display())
    }
}

/// Parse a milli-unit attribute. Empty content means the channel is absent.
fn parse_channel(channel: &'static str, raw: &str) -> Result<Option<f64>, SensorError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed
        .parse::<i64>()
        .map(|milli| Some(milli as f64 / MILLI_SCALE))
        .map_err(|_| SensorError::Malformed {
            channel,
            value: trimmed.to_string(),
        })
}
