//! Raw sensor reading

use serde::{Deserialize, Serialize};
use std::fmt;

/// One raw sample attempt.
///
/// `None` means the sensor answered but did not report that channel,
/// which is distinct from a [`crate::SensorError`].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Reading {
    /// Temperature in degrees Celsius
    pub temperature_c: Option<f64>,
    /// Relative humidity in percent
    pub humidity_pct: Option<f64>,
}

impl Reading {
    /// Reading with both channels present
    pub fn new(temperature_c: f64, humidity_pct: f64) -> Self {
        Self {
            temperature_c: Some(temperature_c),
            humidity_pct: Some(humidity_pct),
        }
    }

    /// Whether both channels are present
    pub fn is_complete(&self) -> bool {
        self.temperature_c.is_some() && self.humidity_pct.is_some()
    }
}

impl fmt::Display for Reading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Temp: {}, Humidity: {}",
            OptionalValue(self.temperature_c),
            OptionalValue(self.humidity_pct)
        )
    }
}

struct OptionalValue(Option<f64>);

impl fmt::Display for OptionalValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(value) => write!(f, "{}", value),
            None => f.write_str("None"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_marks_absent_channels() {
        let reading = Reading {
            temperature_c: None,
            humidity_pct: Some(60.0),
        };
        assert_eq!(reading.to_string(), "Temp: None, Humidity: 60");
        assert!(!reading.is_complete());
    }

    #[test]
    fn test_complete_reading() {
        let reading = Reading::new(22.5, 55.0);
        assert!(reading.is_complete());
        assert_eq!(reading.to_string(), "Temp: 22.5, Humidity: 55");
    }
}
