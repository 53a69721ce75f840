//! REST market-data fetchers for the Hyperliquid perp monitor.
//!
//! One `InfoClient` per process issues `metaAndAssetCtxs`,
//! `fundingHistory`, and `liquidations` requests against the public
//! `/info` endpoint and parses the responses into core types.

pub mod client;
pub mod error;
pub mod parser;

pub use client::InfoClient;
pub use error::{FeedError, FeedResult};
