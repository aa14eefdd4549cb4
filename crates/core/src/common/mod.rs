//! Common types and constants shared across the simulator.

/// Memory-map, architectural, and encoding constants.
pub mod constants;
/// Fault definitions and error-trait integration.
pub mod error;
/// Severity-coded log channel drained on read.
pub mod logs;

pub use error::SimError;
pub use logs::{LogChannel, LOG_FATAL, LOG_SUCCESS, LOG_TRACE, LOG_WARNING};
