//! Off-device sensor sources

use crate::error::SensorError;
use crate::reading::Reading;
use crate::SensorSource;
use std::collections::VecDeque;
use tracing::{debug, info};

/// Deterministic synthetic sensor for running without hardware.
///
/// Produces a slow indoor-climate wave. Every `dropout_every`-th sample
/// reports no humidity, mimicking the DHT11's occasional partial answers.
#[derive(Debug, Clone)]
pub struct SimulatedSensor {
    step: u64,
    dropout_every: u64,
}

impl SimulatedSensor {
    /// Create a simulated sensor. A `dropout_every` of 0 disables dropouts.
    pub fn new(dropout_every: u64) -> Self {
        info!("Creating simulated DHT11 sensor");
        Self {
            step: 0,
            dropout_every,
        }
    }
}

impl Default for SimulatedSensor {
    fn default() -> Self {
        Self::new(20)
    }
}

impl SensorSource for SimulatedSensor {
    async fn sample(&mut self) -> Result<Reading, SensorError> {
        self.step += 1;
        let t = self.step as f64;

        // DHT11 resolution is 1 unit on both channels
        let temperature = (21.0 + 3.0 * (t / 40.0).sin()).round();
        let humidity = (50.0 + 10.0 * (t / 60.0).cos()).round();

        let dropout = self.dropout_every > 0 && self.step % self.dropout_every == 0;
        debug!(step = self.step, dropout, "Simulated sample");

        Ok(Reading {
            temperature_c: Some(temperature),
            humidity_pct: if dropout { None } else { Some(humidity) },
        })
    }

    fn describe(&self) -> String {
        "simulated DHT11".to_string()
    }
}

/// Replays a fixed sequence of sample outcomes.
///
/// Once the script is exhausted every sample times out.
#[derive(Debug, Default)]
pub struct ScriptedSensor {
    script: VecDeque<Result<Reading, SensorError>>,
}

impl ScriptedSensor {
    /// Create a sensor that yields `script` in order
    pub fn new(script: impl IntoIterator<Item = Result<Reading, SensorError>>) -> Self {
        Self {
            script: script.into_iter().collect(),
        }
    }

    /// Outcomes not yet consumed
    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl SensorSource for ScriptedSensor {
    async fn sample(&mut self) -> Result<Reading, SensorError> {
        self.script.pop_front().unwrap_or(Err(SensorError::Timeout))
    }

    fn describe(&self) -> String {
        format!("scripted sensor ({} outcomes queued)", self.script.len())
    }
}
