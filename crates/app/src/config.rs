//! Deployment settings
//!
//! Read once at startup from an optional `roomsense.toml` next to the
//! executable. Every field has a default, so the file may be absent.

use acquisition::AcquisitionConfig;
use config::{Config, ConfigError, File};
use data_validator::ValidationConfig;
use dht_sensor::DEFAULT_GPIO_PIN;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Settings file name, looked up next to the executable
pub const SETTINGS_FILE: &str = "roomsense.toml";

/// Top-level settings
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub sensor: SensorSettings,
    pub validation: ValidationConfig,
    pub acquisition: AcquisitionConfig,
    pub storage: StorageSettings,
    pub api: ApiSettings,
    pub logging: LoggingSettings,
}

/// Which sensor implementation to sample
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SensorKind {
    /// DHT11 through the kernel IIO driver
    Dht11,
    /// Synthetic readings, for running off-device
    Simulated,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SensorSettings {
    pub kind: SensorKind,
    /// BCM GPIO line the data pin is wired to
    pub gpio_pin: u8,
    /// IIO device directory of the bound `dht11` driver
    pub iio_device: PathBuf,
    /// Simulated sensor only: drop humidity every N samples (0 = never)
    pub simulated_dropout_every: u64,
}

impl Default for SensorSettings {
    fn default() -> Self {
        Self {
            kind: SensorKind::Dht11,
            gpio_pin: DEFAULT_GPIO_PIN,
            iio_device: PathBuf::from("/sys/bus/iio/devices/iio:device0"),
            simulated_dropout_every: 20,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    /// Database file; relative paths are resolved against the executable's directory
    pub database_path: PathBuf,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from("sensor_data.db"),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiSettings {
    /// Listen address of the read-only API
    pub bind: String,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0:5000".to_string(),
        }
    }
}

/// Console output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Maximum level: trace, debug, info, warn or error
    pub level: String,
    pub format: LogFormat,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Text,
        }
    }
}

impl Settings {
    /// Load `roomsense.toml` from `base_dir`, falling back to defaults
    pub fn load(base_dir: &Path) -> Result<Self, ConfigError> {
        Self::from_file(&base_dir.join(SETTINGS_FILE))
    }

    /// Load settings from a specific file, which may be missing
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::from(path).required(false))
            .build()?
            .try_deserialize()
    }

    /// Resolved database file location
    pub fn database_path(&self, base_dir: &Path) -> PathBuf {
        let path = &self.storage.database_path;
        if path.is_absolute() {
            path.clone()
        } else {
            base_dir.join(path)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::time::Duration;
    use uuid::Uuid;

    fn temp_dir() -> PathBuf {
        let dir = std::env::temp_dir().join(format!("roomsense-config-{}", Uuid::new_v4()));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = temp_dir();
        let settings = Settings::load(&dir).unwrap();

        assert_eq!(settings.sensor.kind, SensorKind::Dht11);
        assert_eq!(settings.sensor.gpio_pin, 4);
        assert_eq!(settings.validation, ValidationConfig::default());
        assert_eq!(settings.acquisition.interval(), Duration::from_secs(15));
        assert_eq!(settings.api.bind, "0.0.0.0:5000");
        assert_eq!(settings.logging.format, LogFormat::Text);
        assert_eq!(settings.database_path(&dir), dir.join("sensor_data.db"));
        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_file_overrides_defaults() {
        let dir = temp_dir();
        fs::write(
            dir.join(SETTINGS_FILE),
            r#"
[sensor]
kind = "simulated"
gpio_pin = 17

[validation]
min_temperature_c = -10.0

[acquisition]
interval_secs = 60

[storage]
database_path = "/var/lib/roomsense/readings.db"

[logging]
format = "json"
"#,
        )
        .unwrap();

        let settings = Settings::load(&dir).unwrap();
        assert_eq!(settings.sensor.kind, SensorKind::Simulated);
        assert_eq!(settings.sensor.gpio_pin, 17);
        assert_eq!(settings.validation.min_temperature_c, -10.0);
        assert_eq!(settings.validation.min_humidity_pct, 0.0);
        assert_eq!(settings.acquisition.interval_secs, 60);
        assert_eq!(
            settings.database_path(&dir),
            PathBuf::from("/var/lib/roomsense/readings.db")
        );
        assert_eq!(settings.logging.format, LogFormat::Json);
        assert_eq!(settings.logging.level, "info");
        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_unknown_sensor_kind_rejected() {
        let dir = temp_dir();
        fs::write(dir.join(SETTINGS_FILE), "[sensor]\nkind = \"bme280\"\n").unwrap();

        assert!(Settings::load(&dir).is_err());
        fs::remove_dir_all(dir).unwrap();
    }
}
