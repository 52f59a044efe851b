//! Acquisition Loop
//!
//! Samples the sensor on a fixed cadence, classifies each reading and
//! appends accepted readings to the store. Faults are contained to the
//! cycle that produced them.

mod runner;
mod sink;

pub use runner::{AcquisitionConfig, AcquisitionLoop, CycleOutcome};
pub use sink::RecordSink;
