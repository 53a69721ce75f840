//! Hyperliquid perp monitor - entry point.
//!
//! Polls the public `/info` endpoint and forwards threshold alerts to
//! Telegram via the OpenClaw CLI.

use anyhow::Result;
use clap::Parser;
use tracing::info;

/// Hyperliquid perp monitor
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Configuration file path (can also be set via HLMON_CONFIG env var)
    #[arg(short, long)]
    config: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    hlmon_telemetry::init_logging()?;

    info!("Starting hlmon v{}", env!("CARGO_PKG_VERSION"));

    let config = hlmon_bot::AppConfig::load(args.config.as_deref())?;
    info!(info_url = %config.info_url, channel = %config.channel, "Configuration loaded");

    let mut app = hlmon_bot::Application::new(config)?;
    app.run().await?;

    Ok(())
}
