//! Structured logging for the Hyperliquid perp monitor.
//!
//! Status lines, alert sends, and cycle failures all go through
//! `tracing`; JSON output in production, compact output in development.

pub mod error;
pub mod logging;

pub use error::{TelemetryError, TelemetryResult};
pub use logging::init_logging;
