//! Alert types.
//!
//! Each detector emits a typed `Alert`; the `Display` impl renders the
//! exact text handed to the delivery channel.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Direction of a change or position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    /// Classify from the sign of a change.
    pub fn from_sign(value: Decimal) -> Self {
        if value.is_sign_positive() && !value.is_zero() {
            Self::Up
        } else {
            Self::Down
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Up => write!(f, "\u{2191}"),
            Self::Down => write!(f, "\u{2193}"),
        }
    }
}

/// A threshold-crossing event.
///
/// Transient; exists only long enough to be rendered and dispatched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Alert {
    /// Open interest changed by at least the configured percentage.
    OiSpike {
        coin: String,
        direction: Direction,
        change_pct: Decimal,
        open_interest: Decimal,
    },
    /// Funding rate changed by at least the configured percentage.
    FundingSpike {
        coin: String,
        direction: Direction,
        change_pct: Decimal,
        funding_rate: Decimal,
    },
    /// Mark price moved by at least the configured percentage in one poll.
    PriceMove {
        coin: String,
        direction: Direction,
        change_pct: Decimal,
        mark_px: Decimal,
    },
    /// An individual position above the whale notional threshold.
    Whale {
        coin: String,
        direction: Direction,
        notional_usd: Decimal,
        entry_px: Option<Decimal>,
    },
    /// A liquidation above the notional threshold.
    Liquidation {
        coin: String,
        notional_usd: Decimal,
        px: Decimal,
    },
}

impl Alert {
    /// Coin symbol this alert refers to.
    pub fn coin(&self) -> &str {
        match self {
            Self::OiSpike { coin, .. }
            | Self::FundingSpike { coin, .. }
            | Self::PriceMove { coin, .. }
            | Self::Whale { coin, .. }
            | Self::Liquidation { coin, .. } => coin,
        }
    }

    /// Category tag used in the rendered message.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::OiSpike { .. } => "OI SPIKE",
            Self::FundingSpike { .. } => "FUNDING SPIKE",
            Self::PriceMove { .. } => "VOLATILITY",
            Self::Whale { .. } => "WHALE",
            Self::Liquidation { .. } => "LIQUIDATION",
        }
    }
}

/// Rescale for display (e.g., `15` at 1 dp renders "15.0").
fn scaled(value: Decimal, dp: u32) -> Decimal {
    let mut v = value;
    v.rescale(dp);
    v
}

impl fmt::Display for Alert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OiSpike {
                coin,
                direction,
                change_pct,
                open_interest,
            } => write!(
                f,
                "{direction} OI SPIKE: {coin} OI changed {}% (now: {})",
                scaled(*change_pct, 1),
                scaled(*open_interest, 0),
            ),
            Self::FundingSpike {
                coin,
                direction,
                change_pct,
                funding_rate,
            } => write!(
                f,
                "{direction} FUNDING SPIKE: {coin} funding moved {}% (now: {})",
                scaled(*change_pct, 1),
                scaled(*funding_rate, 6),
            ),
            Self::PriceMove {
                coin,
                direction,
                change_pct,
                mark_px,
            } => write!(
                f,
                "{direction} VOLATILITY: {coin} moved {}% in 1m (now: ${})",
                scaled(*change_pct, 2),
                scaled(*mark_px, 2),
            ),
            Self::Whale {
                coin,
                direction,
                notional_usd,
                entry_px,
            } => match entry_px {
                Some(entry) => write!(
                    f,
                    "{direction} WHALE: {coin} ${} (entry: {entry})",
                    scaled(*notional_usd, 0),
                ),
                None => write!(
                    f,
                    "{direction} WHALE: {coin} ${} (entry: n/a)",
                    scaled(*notional_usd, 0),
                ),
            },
            Self::Liquidation {
                coin,
                notional_usd,
                px,
            } => write!(
                f,
                "LIQUIDATION: {coin} ${} @ ${}",
                scaled(*notional_usd, 0),
                scaled(*px, 2),
            ),
        }
    }
}
