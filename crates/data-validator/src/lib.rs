//! Reading Validation
//!
//! Classifies raw sensor readings as accepted or rejected against
//! physically plausible bounds.

mod error;
mod validator;

pub use error::RejectReason;
pub use validator::{AcceptedReading, Classification, Rejection, ValidationConfig, Validator};
