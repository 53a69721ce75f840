//! Spike detector implementation.
//!
//! Three delta detectors (open interest, funding, price) share one
//! shape: compute percentage change against the prior value, alert when
//! the magnitude meets the threshold, then overwrite the prior
//! unconditionally. The whale and liquidation checks are stateless.

use crate::config::DetectorConfig;
use crate::state::DetectorState;
use hlmon_core::{Alert, Direction, Liquidation, MarketStats, Position};
use rust_decimal::Decimal;
use std::collections::HashMap;
use tracing::debug;

/// Percentage change of `current` versus `prior`.
///
/// The denominator is `|prior|` so a negative prior (funding) keeps the
/// sign of the move. Returns None when `prior` is zero; the caller
/// treats that as no change for the cycle rather than dividing.
fn pct_change(current: Decimal, prior: Decimal) -> Option<Decimal> {
    if prior.is_zero() {
        return None;
    }
    Some((current - prior) / prior.abs() * Decimal::ONE_HUNDRED)
}

/// Threshold-crossing detector over per-coin market stats.
///
/// Each check is independent and order-insensitive: the delta detectors
/// touch disjoint prior maps, the notional checks touch none.
pub struct SpikeDetector {
    config: DetectorConfig,
}

impl SpikeDetector {
    /// Create a new detector with configuration.
    pub fn new(config: DetectorConfig) -> Self {
        Self { config }
    }

    /// Get current configuration.
    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    /// Run all three delta detectors over one snapshot.
    pub fn scan(
        &self,
        state: &mut DetectorState,
        markets: &HashMap<String, MarketStats>,
    ) -> Vec<Alert> {
        let mut alerts = self.check_oi_spikes(state, markets);
        alerts.extend(self.check_funding_spikes(state, markets));
        alerts.extend(self.check_price_moves(state, markets));
        debug!(
            market_count = markets.len(),
            alert_count = alerts.len(),
            "Snapshot scanned"
        );
        alerts
    }

    /// Check for open-interest changes above the threshold.
    pub fn check_oi_spikes(
        &self,
        state: &mut DetectorState,
        markets: &HashMap<String, MarketStats>,
    ) -> Vec<Alert> {
        let mut alerts = Vec::new();
        for (coin, stats) in markets {
            let current = stats.open_interest;
            if let Some(pct) = state
                .last_oi
                .get(coin)
                .and_then(|prior| pct_change(current, *prior))
            {
                if pct.abs() >= self.config.oi_spike_pct {
                    alerts.push(Alert::OiSpike {
                        coin: coin.clone(),
                        direction: Direction::from_sign(pct),
                        change_pct: pct,
                        open_interest: current,
                    });
                }
            }
            state.last_oi.insert(coin.clone(), current);
        }
        alerts
    }

    /// Check for funding-rate changes above the threshold.
    ///
    /// A zero prior suppresses the coin's alert for one cycle; the
    /// prior is still advanced to the current rate.
    pub fn check_funding_spikes(
        &self,
        state: &mut DetectorState,
        markets: &HashMap<String, MarketStats>,
    ) -> Vec<Alert> {
        let mut alerts = Vec::new();
        for (coin, stats) in markets {
            let current = stats.funding_rate;
            if let Some(pct) = state
                .last_funding
                .get(coin)
                .and_then(|prior| pct_change(current, *prior))
            {
                if pct.abs() >= self.config.funding_spike_pct {
                    alerts.push(Alert::FundingSpike {
                        coin: coin.clone(),
                        direction: Direction::from_sign(pct),
                        change_pct: pct,
                        funding_rate: current,
                    });
                }
            }
            state.last_funding.insert(coin.clone(), current);
        }
        alerts
    }

    /// Check for mark-price moves above the threshold.
    pub fn check_price_moves(
        &self,
        state: &mut DetectorState,
        markets: &HashMap<String, MarketStats>,
    ) -> Vec<Alert> {
        let mut alerts = Vec::new();
        for (coin, stats) in markets {
            let current = stats.mark_px;
            if let Some(pct) = state
                .last_px
                .get(coin)
                .and_then(|prior| pct_change(current, *prior))
            {
                if pct.abs() >= self.config.volatility_spike_pct {
                    alerts.push(Alert::PriceMove {
                        coin: coin.clone(),
                        direction: Direction::from_sign(pct),
                        change_pct: pct,
                        mark_px: current,
                    });
                }
            }
            state.last_px.insert(coin.clone(), current);
        }
        alerts
    }

    /// Check positions against the whale notional threshold. Stateless.
    ///
    /// No live position feed is wired in this scope; callers supply
    /// records from an external collaborator.
    pub fn check_whale_positions(&self, positions: &[Position]) -> Vec<Alert> {
        positions
            .iter()
            .filter(|pos| pos.notional() >= self.config.whale_size_usd)
            .map(|pos| Alert::Whale {
                coin: pos.coin.clone(),
                direction: if pos.is_long() {
                    Direction::Up
                } else {
                    Direction::Down
                },
                notional_usd: pos.notional(),
                entry_px: pos.entry_px,
            })
            .collect()
    }

    /// Check liquidation events against the notional threshold. Stateless.
    pub fn check_liquidations(&self, liquidations: &[Liquidation]) -> Vec<Alert> {
        liquidations
            .iter()
            .filter(|liq| liq.notional() >= self.config.liquidation_usd)
            .map(|liq| Alert::Liquidation {
                coin: liq.coin.clone(),
                notional_usd: liq.notional(),
                px: liq.px,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn stats(oi: Decimal, funding: Decimal, mark_px: Decimal) -> MarketStats {
        MarketStats {
            open_interest: oi,
            open_interest_usd: oi * mark_px,
            funding_rate: funding,
            mark_px,
            day_ntl_vlm: Decimal::ZERO,
            prev_day_px: Decimal::ZERO,
        }
    }

    fn one_market(coin: &str, oi: Decimal, funding: Decimal, px: Decimal) -> HashMap<String, MarketStats> {
        HashMap::from([(coin.to_string(), stats(oi, funding, px))])
    }

    #[test]
    fn test_first_observation_never_alerts() {
        let detector = SpikeDetector::new(DetectorConfig::default());
        let mut state = DetectorState::new();
        let markets = one_market("BTC", dec!(1000), dec!(0.0001), dec!(60000));

        let alerts = detector.scan(&mut state, &markets);
        assert!(alerts.is_empty());

        // Baseline is stored for all three detectors
        assert_eq!(state.last_oi["BTC"], dec!(1000));
        assert_eq!(state.last_funding["BTC"], dec!(0.0001));
        assert_eq!(state.last_px["BTC"], dec!(60000));
    }

    #[test]
    fn test_oi_spike_two_cycles() {
        let detector = SpikeDetector::new(DetectorConfig::default());
        let mut state = DetectorState::new();

        // Cycle 1: baseline
        let alerts = detector.check_oi_spikes(&mut state, &one_market("BTC", dec!(1000), dec!(0), dec!(0)));
        assert!(alerts.is_empty());

        // Cycle 2: +15% at default 10% threshold
        let alerts = detector.check_oi_spikes(&mut state, &one_market("BTC", dec!(1150), dec!(0), dec!(0)));
        assert_eq!(alerts.len(), 1);
        let text = alerts[0].to_string();
        assert!(text.contains("15.0%"));
        assert!(text.contains("BTC"));
        assert_eq!(state.last_oi["BTC"], dec!(1150));
    }

    #[test]
    fn test_oi_below_threshold_still_updates_prior() {
        let detector = SpikeDetector::new(DetectorConfig::default());
        let mut state = DetectorState::new();
        state.last_oi.insert("BTC".to_string(), dec!(1000));

        // +5% is below the 10% default
        let alerts = detector.check_oi_spikes(&mut state, &one_market("BTC", dec!(1050), dec!(0), dec!(0)));
        assert!(alerts.is_empty());
        assert_eq!(state.last_oi["BTC"], dec!(1050));
    }

    #[test]
    fn test_oi_fires_at_exact_threshold() {
        let detector = SpikeDetector::new(DetectorConfig::default());
        let mut state = DetectorState::new();
        state.last_oi.insert("BTC".to_string(), dec!(1000));

        // Exactly +10% meets the >= threshold
        let alerts = detector.check_oi_spikes(&mut state, &one_market("BTC", dec!(1100), dec!(0), dec!(0)));
        assert_eq!(alerts.len(), 1);
    }

    #[test]
    fn test_oi_drop_alerts_with_down_direction() {
        let detector = SpikeDetector::new(DetectorConfig::default());
        let mut state = DetectorState::new();
        state.last_oi.insert("BTC".to_string(), dec!(1000));

        let alerts = detector.check_oi_spikes(&mut state, &one_market("BTC", dec!(850), dec!(0), dec!(0)));
        assert_eq!(alerts.len(), 1);
        match &alerts[0] {
            Alert::OiSpike {
                direction,
                change_pct,
                ..
            } => {
                assert_eq!(*direction, Direction::Down);
                assert_eq!(*change_pct, dec!(-15));
            }
            other => panic!("unexpected alert: {other:?}"),
        }
    }

    #[test]
    fn test_funding_zero_prior_suppresses_alert() {
        let detector = SpikeDetector::new(DetectorConfig::default());
        let mut state = DetectorState::new();
        state.last_funding.insert("BTC".to_string(), Decimal::ZERO);

        let alerts =
            detector.check_funding_spikes(&mut state, &one_market("BTC", dec!(0), dec!(0.0005), dec!(0)));
        assert!(alerts.is_empty());
        // Prior advances so the next cycle has a usable baseline
        assert_eq!(state.last_funding["BTC"], dec!(0.0005));
    }

    #[test]
    fn test_funding_negative_prior_keeps_move_sign() {
        let detector = SpikeDetector::new(DetectorConfig::default());
        let mut state = DetectorState::new();
        state.last_funding.insert("BTC".to_string(), dec!(-0.0001));

        // -0.0001 -> -0.00005 is a +50% move against |prior|
        let alerts = detector.check_funding_spikes(
            &mut state,
            &one_market("BTC", dec!(0), dec!(-0.00005), dec!(0)),
        );
        assert_eq!(alerts.len(), 1);
        match &alerts[0] {
            Alert::FundingSpike {
                direction,
                change_pct,
                ..
            } => {
                assert_eq!(*direction, Direction::Up);
                assert_eq!(*change_pct, dec!(50));
            }
            other => panic!("unexpected alert: {other:?}"),
        }
    }

    #[test]
    fn test_price_move_threshold() {
        let detector = SpikeDetector::new(DetectorConfig::default());
        let mut state = DetectorState::new();
        state.last_px.insert("BTC".to_string(), dec!(60000));

        // +2% is below the 3% default
        let alerts = detector.check_price_moves(&mut state, &one_market("BTC", dec!(0), dec!(0), dec!(61200)));
        assert!(alerts.is_empty());

        // A further +3.43% from the updated prior fires
        let alerts = detector.check_price_moves(&mut state, &one_market("BTC", dec!(0), dec!(0), dec!(63300)));
        assert_eq!(alerts.len(), 1);
        assert_eq!(state.last_px["BTC"], dec!(63300));
    }

    #[test]
    fn test_whale_threshold_boundaries() {
        let position = Position {
            coin: "BTC".to_string(),
            szi: dec!(2),
            entry_px: Some(dec!(59000)),
            mark_px: dec!(60000),
        };

        // size_usd = 120000: fires at 100K
        let detector = SpikeDetector::new(DetectorConfig::default());
        let alerts = detector.check_whale_positions(std::slice::from_ref(&position));
        assert_eq!(alerts.len(), 1);

        // Does not fire at 150K
        let detector = SpikeDetector::new(DetectorConfig {
            whale_size_usd: dec!(150000),
            ..Default::default()
        });
        assert!(detector.check_whale_positions(std::slice::from_ref(&position)).is_empty());
    }

    #[test]
    fn test_whale_direction_from_size_sign() {
        let detector = SpikeDetector::new(DetectorConfig::default());
        let short = Position {
            coin: "BTC".to_string(),
            szi: dec!(-2),
            entry_px: None,
            mark_px: dec!(60000),
        };
        let alerts = detector.check_whale_positions(&[short]);
        assert_eq!(alerts.len(), 1);
        match &alerts[0] {
            Alert::Whale { direction, notional_usd, .. } => {
                assert_eq!(*direction, Direction::Down);
                assert_eq!(*notional_usd, dec!(120000));
            }
            other => panic!("unexpected alert: {other:?}"),
        }
    }

    #[test]
    fn test_liquidation_threshold_boundaries() {
        let liq = Liquidation {
            coin: "BTC".to_string(),
            sz: dec!(1),
            px: dec!(60000),
        };

        // size_usd = 60000: fires at the 50K default
        let detector = SpikeDetector::new(DetectorConfig::default());
        assert_eq!(detector.check_liquidations(std::slice::from_ref(&liq)).len(), 1);

        // Does not fire at 70K
        let detector = SpikeDetector::new(DetectorConfig {
            liquidation_usd: dec!(70000),
            ..Default::default()
        });
        assert!(detector.check_liquidations(std::slice::from_ref(&liq)).is_empty());
    }

    #[test]
    fn test_scan_runs_all_delta_detectors() {
        let detector = SpikeDetector::new(DetectorConfig::default());
        let mut state = DetectorState::new();
        state.last_oi.insert("BTC".to_string(), dec!(1000));
        state.last_funding.insert("BTC".to_string(), dec!(0.0001));
        state.last_px.insert("BTC".to_string(), dec!(60000));

        // OI +20%, funding +100%, price +5%: all three fire
        let markets = one_market("BTC", dec!(1200), dec!(0.0002), dec!(63000));
        let alerts = detector.scan(&mut state, &markets);
        assert_eq!(alerts.len(), 3);

        // All priors advanced
        assert_eq!(state.last_oi["BTC"], dec!(1200));
        assert_eq!(state.last_funding["BTC"], dec!(0.0002));
        assert_eq!(state.last_px["BTC"], dec!(63000));
    }

    #[test]
    fn test_pct_change_zero_prior() {
        assert!(pct_change(dec!(5), Decimal::ZERO).is_none());
        assert_eq!(pct_change(dec!(115), dec!(100)), Some(dec!(15)));
    }
}
