//! Fire-and-forget alert dispatch.

use crate::sink::AlertSink;
use chrono::Local;
use hlmon_core::Alert;
use tracing::{info, warn};

/// Message prefix tag.
const TAG: &str = "[HL Monitor]";

/// Formats alerts and hands them to the sink.
///
/// Delivery is fire-and-forget: a failure is logged with the original
/// alert text and never aborts the calling cycle.
pub struct Dispatcher<S: AlertSink> {
    sink: S,
}

impl<S: AlertSink> Dispatcher<S> {
    /// Create a dispatcher over the given sink.
    pub fn new(sink: S) -> Self {
        Self { sink }
    }

    /// The underlying sink.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Render the full message: tag, ISO-8601 timestamp, alert text.
    fn format_message(alert: &Alert) -> String {
        format!("{TAG} {}\n{alert}", Local::now().to_rfc3339())
    }

    /// Dispatch one alert. Never fails; delivery errors are logged.
    pub async fn dispatch(&self, alert: &Alert) {
        let message = Self::format_message(alert);
        match self.sink.deliver(&message).await {
            Ok(()) => info!(alert = %alert, "Alert sent"),
            Err(e) => warn!(alert = %alert, error = %e, "Alert delivery failed"),
        }
    }

    /// Dispatch a batch sequentially.
    pub async fn dispatch_all(&self, alerts: &[Alert]) {
        for alert in alerts {
            self.dispatch(alert).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::RecordingSink;
    use hlmon_core::Direction;
    use rust_decimal_macros::dec;

    fn oi_alert() -> Alert {
        Alert::OiSpike {
            coin: "BTC".to_string(),
            direction: Direction::Up,
            change_pct: dec!(15),
            open_interest: dec!(1150),
        }
    }

    #[tokio::test]
    async fn test_dispatch_prefixes_tag_and_timestamp() {
        let dispatcher = Dispatcher::new(RecordingSink::new());
        dispatcher.dispatch(&oi_alert()).await;

        let delivered = dispatcher.sink.delivered();
        assert_eq!(delivered.len(), 1);
        assert!(delivered[0].starts_with("[HL Monitor] "));
        // Tag line and alert body are separated by a newline
        let body = delivered[0].split_once('\n').unwrap().1;
        assert!(body.contains("OI SPIKE"));
        assert!(body.contains("15.0%"));
    }

    #[tokio::test]
    async fn test_dispatch_swallows_delivery_failure() {
        let sink = RecordingSink::new();
        sink.set_fail(true);
        let dispatcher = Dispatcher::new(sink);
        // Must not panic or propagate
        dispatcher.dispatch(&oi_alert()).await;
        assert!(dispatcher.sink.delivered().is_empty());
    }

    #[tokio::test]
    async fn test_dispatch_all_is_sequential_and_complete() {
        let dispatcher = Dispatcher::new(RecordingSink::new());
        let alerts = vec![oi_alert(), oi_alert(), oi_alert()];
        dispatcher.dispatch_all(&alerts).await;
        assert_eq!(dispatcher.sink.delivered().len(), 3);
    }
}
