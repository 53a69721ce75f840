//! Hyperliquid perp monitor application.
//!
//! Orchestrates the poll cycle: fetch market stats, run the spike
//! detectors against prior-cycle state, fetch liquidations, dispatch
//! alerts, sleep, repeat. A failed cycle is logged and skipped; the
//! loop itself never terminates.

pub mod app;
pub mod config;
pub mod error;

pub use app::Application;
pub use config::AppConfig;
pub use error::{AppError, AppResult};
