//! Detector configuration.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Thresholds for the spike detectors.
///
/// Percentage thresholds compare against `|change_pct|`; notional
/// thresholds compare against USD value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectorConfig {
    /// Open-interest change threshold (%).
    #[serde(default = "default_oi_spike_pct")]
    pub oi_spike_pct: Decimal,
    /// Funding-rate change threshold (%).
    #[serde(default = "default_funding_spike_pct")]
    pub funding_spike_pct: Decimal,
    /// Mark-price move threshold (%) per poll interval.
    #[serde(default = "default_volatility_spike_pct")]
    pub volatility_spike_pct: Decimal,
    /// 24h volume change threshold (%). Not consumed by any current
    /// detector; accepted so existing deployments keep their setting.
    #[serde(default = "default_volume_spike_pct")]
    pub volume_spike_pct: Decimal,
    /// Whale position notional threshold (USD).
    #[serde(default = "default_whale_size_usd")]
    pub whale_size_usd: Decimal,
    /// Liquidation notional threshold (USD).
    #[serde(default = "default_liquidation_usd")]
    pub liquidation_usd: Decimal,
}

fn default_oi_spike_pct() -> Decimal {
    Decimal::from(10) // 10%
}

fn default_funding_spike_pct() -> Decimal {
    Decimal::from(50) // 50%
}

fn default_volatility_spike_pct() -> Decimal {
    Decimal::from(3) // 3% in one poll
}

fn default_volume_spike_pct() -> Decimal {
    Decimal::from(200) // 200%
}

fn default_whale_size_usd() -> Decimal {
    Decimal::from(100_000) // $100K
}

fn default_liquidation_usd() -> Decimal {
    Decimal::from(50_000) // $50K
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            oi_spike_pct: default_oi_spike_pct(),
            funding_spike_pct: default_funding_spike_pct(),
            volatility_spike_pct: default_volatility_spike_pct(),
            volume_spike_pct: default_volume_spike_pct(),
            whale_size_usd: default_whale_size_usd(),
            liquidation_usd: default_liquidation_usd(),
        }
    }
}

impl DetectorConfig {
    /// Validate configuration values.
    ///
    /// Returns Err if any percentage threshold is negative or any
    /// notional threshold is non-positive.
    pub fn validate(&self) -> Result<(), String> {
        for (name, value) in [
            ("oi_spike_pct", self.oi_spike_pct),
            ("funding_spike_pct", self.funding_spike_pct),
            ("volatility_spike_pct", self.volatility_spike_pct),
            ("volume_spike_pct", self.volume_spike_pct),
        ] {
            if value.is_sign_negative() {
                return Err(format!("{name} ({value}) must be non-negative"));
            }
        }

        for (name, value) in [
            ("whale_size_usd", self.whale_size_usd),
            ("liquidation_usd", self.liquidation_usd),
        ] {
            if value.is_sign_negative() || value.is_zero() {
                return Err(format!("{name} ({value}) must be positive"));
            }
        }

        Ok(())
    }
}
