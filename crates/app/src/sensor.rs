//! Sensor selection

use crate::config::{SensorKind, SensorSettings};
use dht_sensor::{Dht11Sensor, Reading, SensorError, SensorSource, SimulatedSensor};

/// The sensor chosen in the settings
pub enum AnySensor {
    Dht11(Dht11Sensor),
    Simulated(SimulatedSensor),
}

impl AnySensor {
    pub fn from_settings(settings: &SensorSettings) -> Self {
        match settings.kind {
            SensorKind::Dht11 => {
                AnySensor::Dht11(Dht11Sensor::new(&settings.iio_device, settings.gpio_pin))
            }
            SensorKind::Simulated => {
                AnySensor::Simulated(SimulatedSensor::new(settings.simulated_dropout_every))
            }
        }
    }
}

impl SensorSource for AnySensor {
    async fn sample(&mut self) -> Result<Reading, SensorError> {
        match self {
            AnySensor::Dht11(sensor) => sensor.sample().await,
            AnySensor::Simulated(sensor) => sensor.sample().await,
        }
    }

    fn describe(&self) -> String {
        match self {
            AnySensor::Dht11(sensor) => sensor.describe(),
            AnySensor::Simulated(sensor) => sensor.describe(),
        }
    }
}
