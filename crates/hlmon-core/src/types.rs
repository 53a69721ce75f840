//! Market data records.
//!
//! All numeric fields use `rust_decimal` for exact arithmetic; the
//! exchange reports prices and sizes as decimal strings.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Per-coin market statistics from a single `metaAndAssetCtxs` poll.
///
/// Produced fresh every poll; never persisted beyond process memory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketStats {
    /// Open interest in contracts.
    pub open_interest: Decimal,
    /// Open interest in USD (contracts x mark price).
    pub open_interest_usd: Decimal,
    /// Funding rate, fractional, per funding interval.
    pub funding_rate: Decimal,
    /// Mark price in USD.
    pub mark_px: Decimal,
    /// Notional volume traded in the last 24h (USD).
    pub day_ntl_vlm: Decimal,
    /// Reference price from 24h ago (USD).
    pub prev_day_px: Decimal,
}

/// An individual open position, sourced from an external position feed.
///
/// The monitor exposes the whale-size check as a capability; nothing in
/// this scope wires a live position feed into it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    /// Coin symbol (e.g., "BTC").
    pub coin: String,
    /// Signed position size in contracts (positive = long).
    pub szi: Decimal,
    /// Entry price, when the feed reports one.
    pub entry_px: Option<Decimal>,
    /// Current mark price.
    pub mark_px: Decimal,
}

impl Position {
    /// Position notional in USD: `|szi| * mark_px`.
    pub fn notional(&self) -> Decimal {
        self.szi.abs() * self.mark_px
    }

    /// Whether the position is long (szi > 0).
    pub fn is_long(&self) -> bool {
        self.szi.is_sign_positive() && !self.szi.is_zero()
    }
}

/// A liquidation event reported by the exchange.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Liquidation {
    /// Coin symbol.
    pub coin: String,
    /// Liquidated size in contracts.
    pub sz: Decimal,
    /// Execution price.
    pub px: Decimal,
}

impl Liquidation {
    /// Liquidation notional in USD: `sz * px`.
    pub fn notional(&self) -> Decimal {
        self.sz * self.px
    }
}

/// One entry from the `fundingHistory` endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FundingHistoryEntry {
    /// Coin symbol.
    pub coin: String,
    /// Funding rate at that interval.
    pub funding_rate: Decimal,
    /// Funding premium.
    pub premium: Decimal,
    /// Interval timestamp (ms since epoch).
    pub time: i64,
}
