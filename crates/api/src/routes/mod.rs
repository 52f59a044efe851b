//! API Routes

pub mod host;
pub mod readings;
