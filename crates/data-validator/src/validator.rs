//! Validity Predicate

use crate::error::RejectReason;
use dht_sensor::Reading;
use serde::{Deserialize, Serialize};

/// Plausibility bounds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Lowest accepted temperature (°C), inclusive
    pub min_temperature_c: f64,
    /// Humidity must be strictly above this (%)
    pub min_humidity_pct: f64,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            min_temperature_c: 5.0,
            min_humidity_pct: 0.0,
        }
    }
}

/// A reading that passed validation, values unchanged
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AcceptedReading {
    pub temperature_c: f64,
    pub humidity_pct: f64,
}

/// A rejected reading together with the first failed check
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rejection {
    pub reading: Reading,
    pub reason: RejectReason,
}

/// Outcome of classifying one reading
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Classification {
    Accepted(AcceptedReading),
    Rejected(Rejection),
}

impl Classification {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Classification::Accepted(_))
    }
}

/// Classifies readings against [`ValidationConfig`]
#[derive(Debug, Clone, Default)]
pub struct Validator {
    config: ValidationConfig,
}

impl Validator {
    /// Create a new validator with given config
    pub fn new(config: ValidationConfig) -> Self {
        Self { config }
    }

    /// Classify a reading. Pure and total.
    ///
    /// Checks run in order: temperature present, humidity present,
    /// temperature at or above the floor, humidity above the floor.
    /// NaN never satisfies a bound and is rejected.
    pub fn classify(&self, reading: &Reading) -> Classification {
        match self.check(reading) {
            Ok(accepted) => Classification::Accepted(accepted),
            Err(reason) => Classification::Rejected(Rejection {
                reading: *reading,
                reason,
            }),
        }
    }

    fn check(&self, reading: &Reading) -> Result<AcceptedReading, RejectReason> {
        let temperature_c = reading
            .temperature_c
            .ok_or(RejectReason::MissingTemperature)?;
        let humidity_pct = reading.humidity_pct.ok_or(RejectReason::MissingHumidity)?;

        if !(temperature_c >= self.config.min_temperature_c) {
            return Err(RejectReason::TemperatureBelowFloor {
                value: temperature_c,
                floor: self.config.min_temperature_c,
            });
        }
        if !(humidity_pct > self.config.min_humidity_pct) {
            return Err(RejectReason::HumidityNotPositive {
                value: humidity_pct,
                floor: self.config.min_humidity_pct,
            });
        }

        Ok(AcceptedReading {
            temperature_c,
            humidity_pct,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn reason(classification: Classification) -> RejectReason {
        match classification {
            Classification::Rejected(rejection) => rejection.reason,
            Classification::Accepted(a) => panic!("unexpectedly accepted {:?}", a),
        }
    }

    #[test]
    fn test_typical_reading_accepted() {
        let validator = Validator::default();
        assert_eq!(
            validator.classify(&Reading::new(22.5, 55.0)),
            Classification::Accepted(AcceptedReading {
                temperature_c: 22.5,
                humidity_pct: 55.0,
            })
        );
    }

    #[test]
    fn test_missing_channels() {
        let validator = Validator::default();
        let no_temp = Reading {
            temperature_c: None,
            humidity_pct: Some(60.0),
        };
        assert_eq!(reason(validator.classify(&no_temp)), RejectReason::MissingTemperature);

        let no_hum = Reading {
            temperature_c: Some(20.0),
            humidity_pct: None,
        };
        assert_eq!(reason(validator.classify(&no_hum)), RejectReason::MissingHumidity);

        assert_eq!(
            reason(validator.classify(&Reading::default())),
            RejectReason::MissingTemperature
        );
    }

    #[test]
    fn test_boundaries() {
        let validator = Validator::default();
        assert!(validator.classify(&Reading::new(5.0, 0.1)).is_accepted());
        assert!(!validator.classify(&Reading::new(4.999, 50.0)).is_accepted());
        assert_eq!(
            reason(validator.classify(&Reading::new(25.0, 0.0))),
            RejectReason::HumidityNotPositive {
                value: 0.0,
                floor: 0.0
            }
        );
    }

    #[test]
    fn test_cold_reading_rejected() {
        let validator = Validator::default();
        let rejected = validator.classify(&Reading::new(3.0, 40.0));
        match rejected {
            Classification::Rejected(rejection) => {
                assert_eq!(rejection.reading, Reading::new(3.0, 40.0));
                assert_eq!(
                    rejection.reason,
                    RejectReason::TemperatureBelowFloor {
                        value: 3.0,
                        floor: 5.0
                    }
                );
            }
            other => panic!("expected rejection, got {:?}", other),
        }
    }

    #[test]
    fn test_nan_rejected() {
        let validator = Validator::default();
        assert!(!validator.classify(&Reading::new(f64::NAN, 50.0)).is_accepted());
        assert!(!validator.classify(&Reading::new(20.0, f64::NAN)).is_accepted());
    }

    #[test]
    fn test_custom_bounds() {
        let validator = Validator::new(ValidationConfig {
            min_temperature_c: -10.0,
            min_humidity_pct: 20.0,
        });
        assert!(validator.classify(&Reading::new(-5.0, 30.0)).is_accepted());
        assert!(!validator.classify(&Reading::new(-5.0, 20.0)).is_accepted());
    }

    proptest! {
        #[test]
        fn prop_plausible_readings_accepted_unchanged(
            temperature in 5.0f64..100.0,
            humidity in 0.0001f64..100.0,
        ) {
            let reading = Reading::new(temperature, humidity);
            let classification = Validator::default().classify(&reading);
            prop_assert_eq!(
                classification,
                Classification::Accepted(AcceptedReading {
                    temperature_c: temperature,
                    humidity_pct: humidity,
                })
            );
        }

        #[test]
        fn prop_cold_readings_rejected(
            temperature in -50.0f64..5.0,
            humidity in -10.0f64..100.0,
        ) {
            let reading = Reading::new(temperature, humidity);
            let classification = Validator::default().classify(&reading);
            prop_assert!(!classification.is_accepted());
        }

        #[test]
        fn prop_non_positive_humidity_rejected(
            temperature in -50.0f64..100.0,
            humidity in -100.0f64..=0.0,
        ) {
            let reading = Reading::new(temperature, humidity);
            let classification = Validator::default().classify(&reading);
            prop_assert!(!classification.is_accepted());
        }

        #[test]
        fn prop_absent_channel_rejected(
            temperature in proptest::option::of(-50.0f64..100.0),
            humidity in proptest::option::of(-10.0f64..100.0),
        ) {
            prop_assume!(temperature.is_none() || humidity.is_none());
            let reading = Reading { temperature_c: temperature, humidity_pct: humidity };
            prop_assert!(!Validator::default().classify(&reading).is_accepted());
        }
    }
}
