//! Application configuration.
//!
//! Loaded from an optional TOML file, then overridden by environment
//! variables (the deployment surface the original tooling expects).

use crate::error::{AppError, AppResult};
use hlmon_detector::DetectorConfig;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// API base URL; `/info` is appended by the feed client.
    #[serde(default = "default_info_url")]
    pub info_url: String,
    /// Notification channel name passed to the delivery CLI.
    #[serde(default = "default_channel")]
    pub channel: String,
    /// Delivery CLI binary name or path.
    #[serde(default = "default_command")]
    pub command: String,
    /// Seconds between polls.
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,
    /// Detector thresholds.
    #[serde(default)]
    pub detector: DetectorConfig,
}

fn default_info_url() -> String {
    "https://api.hyperliquid.xyz".to_string()
}

fn default_channel() -> String {
    "telegram".to_string()
}

fn default_command() -> String {
    "openclaw".to_string()
}

fn default_poll_interval_secs() -> u64 {
    60
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            info_url: default_info_url(),
            channel: default_channel(),
            command: default_command(),
            poll_interval_secs: default_poll_interval_secs(),
            detector: DetectorConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration: TOML file (if present) plus env overrides.
    ///
    /// File path resolution: explicit argument, then `HLMON_CONFIG`,
    /// then `config/default.toml`. A missing file means defaults.
    pub fn load(path: Option<&str>) -> AppResult<Self> {
        let config_path = path
            .map(|p| p.to_string())
            .or_else(|| std::env::var("HLMON_CONFIG").ok())
            .unwrap_or_else(|| "config/default.toml".to_string());

        let mut config = if Path::new(&config_path).exists() {
            Self::from_file(&config_path)?
        } else {
            tracing::warn!(path = %config_path, "Config file not found, using defaults");
            Self::default()
        };

        config.apply_overrides(|name| std::env::var(name).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a specific file.
    pub fn from_file(path: &str) -> AppResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| AppError::Config(format!("Failed to read config: {e}")))?;

        toml::from_str(&content)
            .map_err(|e| AppError::Config(format!("Failed to parse config: {e}")))
    }

    /// Apply overrides from a variable lookup (the environment in
    /// production; injected directly in tests).
    pub fn apply_overrides(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> AppResult<()> {
        if let Some(url) = lookup("HYPERLIQUID_API_URL") {
            self.info_url = url;
        }
        if let Some(channel) = lookup("ALERT_CHANNEL") {
            self.channel = channel;
        }

        let override_decimal = |name: &str, target: &mut Decimal| -> AppResult<()> {
            if let Some(raw) = lookup(name) {
                *target = raw
                    .parse()
                    .map_err(|e| AppError::Config(format!("{name}={raw}: {e}")))?;
            }
            Ok(())
        };

        override_decimal("OI_SPIKE_THRESHOLD", &mut self.detector.oi_spike_pct)?;
        override_decimal("WHALE_SIZE_THRESHOLD", &mut self.detector.whale_size_usd)?;
        override_decimal("FUNDING_SPIKE_THRESHOLD", &mut self.detector.funding_spike_pct)?;
        override_decimal("LIQUIDATION_THRESHOLD", &mut self.detector.liquidation_usd)?;
        override_decimal("VOLUME_SPIKE_THRESHOLD", &mut self.detector.volume_spike_pct)?;
        override_decimal(
            "VOLATILITY_SPIKE_THRESHOLD",
            &mut self.detector.volatility_spike_pct,
        )?;

        Ok(())
    }

    /// Validate configuration values.
    pub fn validate(&self) -> AppResult<()> {
        if self.poll_interval_secs == 0 {
            return Err(AppError::Config(
                "poll_interval_secs must be positive".to_string(),
            ));
        }
        self.detector.validate().map_err(AppError::Config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.info_url, "https://api.hyperliquid.xyz");
        assert_eq!(config.channel, "telegram");
        assert_eq!(config.poll_interval_secs, 60);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_overrides_apply() {
        let mut config = AppConfig::default();
        config
            .apply_overrides(|name| match name {
                "HYPERLIQUID_API_URL" => Some("https://testnet.example".to_string()),
                "OI_SPIKE_THRESHOLD" => Some("5".to_string()),
                "WHALE_SIZE_THRESHOLD" => Some("250000".to_string()),
                _ => None,
            })
            .unwrap();

        assert_eq!(config.info_url, "https://testnet.example");
        assert_eq!(config.detector.oi_spike_pct, dec!(5));
        assert_eq!(config.detector.whale_size_usd, dec!(250000));
        // Untouched values keep their defaults
        assert_eq!(config.detector.funding_spike_pct, dec!(50));
    }

    #[test]
    fn test_unparseable_override_names_the_variable() {
        let mut config = AppConfig::default();
        let err = config
            .apply_overrides(|name| {
                (name == "LIQUIDATION_THRESHOLD").then(|| "lots".to_string())
            })
            .unwrap_err();

        assert!(err.to_string().contains("LIQUIDATION_THRESHOLD"));
    }

    #[test]
    fn test_zero_interval_rejected() {
        let config = AppConfig {
            poll_interval_secs: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_toml() {
        let config: AppConfig = toml::from_str(
            r#"
            poll_interval_secs = 30

            [detector]
            oi_spike_pct = "15"
            "#,
        )
        .unwrap();

        assert_eq!(config.poll_interval_secs, 30);
        assert_eq!(config.detector.oi_spike_pct, dec!(15));
        assert_eq!(config.channel, "telegram");
        assert_eq!(config.detector.liquidation_usd, dec!(50000));
    }
}
