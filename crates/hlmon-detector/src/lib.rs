//! Stateful delta detection for the Hyperliquid perp monitor.
//!
//! `SpikeDetector` compares each poll against the previous one held in
//! `DetectorState` and emits `Alert`s when a percentage change crosses a
//! configured threshold. The whale and liquidation checks are stateless
//! notional comparisons.

pub mod config;
pub mod detector;
pub mod state;

pub use config::DetectorConfig;
pub use detector::SpikeDetector;
pub use state::DetectorState;
