//! Main application orchestration.
//!
//! One sequential flow drives everything: fetch snapshot, run the
//! detectors, fetch liquidations, dispatch alerts, sleep. The three
//! prior-value maps are touched only from this flow, so no locking is
//! needed.

use crate::config::AppConfig;
use crate::error::AppResult;
use hlmon_alert::{AlertSink, Dispatcher, OpenClawSink};
use hlmon_core::{Alert, Liquidation, MarketStats};
use hlmon_detector::{DetectorState, SpikeDetector};
use hlmon_feed::InfoClient;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{error, info, warn};

/// Main application.
pub struct Application<S: AlertSink> {
    config: AppConfig,
    client: InfoClient,
    detector: SpikeDetector,
    state: DetectorState,
    dispatcher: Dispatcher<S>,
}

impl Application<OpenClawSink> {
    /// Create the application with the OpenClaw delivery sink.
    pub fn new(config: AppConfig) -> AppResult<Self> {
        let sink = OpenClawSink::new(config.command.as_str(), config.channel.as_str());
        Self::with_sink(config, sink)
    }
}

impl<S: AlertSink> Application<S> {
    /// Create the application over an arbitrary sink.
    pub fn with_sink(config: AppConfig, sink: S) -> AppResult<Self> {
        config.validate()?;
        let client = InfoClient::new(config.info_url.as_str())?;
        let detector = SpikeDetector::new(config.detector.clone());

        Ok(Self {
            config,
            client,
            detector,
            state: DetectorState::new(),
            dispatcher: Dispatcher::new(sink),
        })
    }

    /// Run the polling loop forever.
    ///
    /// A failed cycle is logged at the loop boundary and treated as
    /// empty; the loop proceeds straight to the sleep. Stops only when
    /// the process is killed.
    pub async fn run(&mut self) -> AppResult<()> {
        let thresholds = self.detector.config();
        info!(
            poll_interval_secs = self.config.poll_interval_secs,
            oi_spike_pct = %thresholds.oi_spike_pct,
            funding_spike_pct = %thresholds.funding_spike_pct,
            volatility_spike_pct = %thresholds.volatility_spike_pct,
            whale_size_usd = %thresholds.whale_size_usd,
            liquidation_usd = %thresholds.liquidation_usd,
            "Starting Hyperliquid monitor"
        );

        loop {
            match self.run_once().await {
                Ok(alerts) if alerts.is_empty() => info!("No alerts"),
                Ok(alerts) => info!(alert_count = alerts.len(), "Cycle complete"),
                Err(e) => error!(error = %e, "Monitoring cycle failed"),
            }
            tokio::time::sleep(Duration::from_secs(self.config.poll_interval_secs)).await;
        }
    }

    /// Run one monitoring cycle.
    ///
    /// A failed snapshot fetch aborts the cycle before any detector
    /// runs, leaving all prior-value maps unchanged. A failed
    /// liquidation fetch only suppresses liquidation alerts.
    pub async fn run_once(&mut self) -> AppResult<Vec<Alert>> {
        let markets = self.client.market_stats().await?;

        let liquidations = match self.client.liquidations(None).await {
            Ok(liqs) => liqs,
            Err(e) => {
                warn!(error = %e, "Liquidations unavailable this cycle");
                Vec::new()
            }
        };

        Ok(self.process(&markets, &liquidations).await)
    }

    /// Detect over one snapshot and dispatch whatever fires.
    async fn process(
        &mut self,
        markets: &HashMap<String, MarketStats>,
        liquidations: &[Liquidation],
    ) -> Vec<Alert> {
        let mut alerts = self.detector.scan(&mut self.state, markets);
        alerts.extend(self.detector.check_liquidations(liquidations));

        self.dispatcher.dispatch_all(&alerts).await;
        alerts
    }

    /// Prior-value state, for inspection.
    pub fn state(&self) -> &DetectorState {
        &self.state
    }
}
