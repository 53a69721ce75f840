//! Core domain types for the Hyperliquid perp monitor.
//!
//! This crate provides the types shared across the monitor:
//! - `MarketStats`: per-coin snapshot from `metaAndAssetCtxs`
//! - `Position`, `Liquidation`: ephemeral records for size checks
//! - `Alert`: typed threshold-crossing events with their wire text

pub mod alert;
pub mod types;

pub use alert::{Alert, Direction};
pub use types::{FundingHistoryEntry, Liquidation, MarketStats, Position};
