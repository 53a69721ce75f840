//! Structured logging initialization.

use crate::error::TelemetryResult;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter applied when `RUST_LOG` is unset.
const DEFAULT_FILTER: &str = "info,hlmon=debug";

/// Initialize structured logging.
///
/// JSON output when `RUST_ENV=production`, compact human-readable
/// output otherwise. `RUST_LOG` overrides [`DEFAULT_FILTER`].
pub fn init_logging() -> TelemetryResult<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let registry = tracing_subscriber::registry().with(filter);

    match std::env::var("RUST_ENV").as_deref() {
        Ok("production") => registry
            .with(
                fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_span_list(true),
            )
            .init(),
        _ => registry
            .with(fmt::layer().compact().with_target(true))
            .init(),
    }

    Ok(())
}
