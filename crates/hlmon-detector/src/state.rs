//! Prior-value cache for the delta detectors.

use rust_decimal::Decimal;
use std::collections::HashMap;

/// Last observed value per coin for each delta detector.
///
/// The three maps are independent; each detector reads and writes only
/// its own. Every map entry is overwritten at the end of a detection
/// pass whether or not an alert fired, so percentage change is always
/// measured tick-to-tick, never event-to-event. Empty at startup: the
/// first observation of a coin can never alert.
#[derive(Debug, Clone, Default)]
pub struct DetectorState {
    /// Last open interest (contracts) per coin.
    pub last_oi: HashMap<String, Decimal>,
    /// Last funding rate per coin.
    pub last_funding: HashMap<String, Decimal>,
    /// Last mark price per coin.
    pub last_px: HashMap<String, Decimal>,
}

impl DetectorState {
    /// Create an empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// True if no coin has been observed yet.
    pub fn is_empty(&self) -> bool {
        self.last_oi.is_empty() && self.last_funding.is_empty() && self.last_px.is_empty()
    }
}
