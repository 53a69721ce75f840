//! Delivery sink trait and the OpenClaw CLI implementation.

use crate::error::{AlertError, AlertResult};
use std::pin::Pin;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tracing::debug;

/// Boxed future for dyn-compatible async trait methods.
pub type BoxFuture<'a, T> = Pin<Box<dyn std::future::Future<Output = T> + Send + 'a>>;

/// Capability to deliver one message to the notification channel.
///
/// Abstracts the transport so the scheduler can be tested with a
/// recording implementation.
pub trait AlertSink: Send + Sync {
    /// Deliver the message. Failures carry their cause; the caller
    /// decides whether to escalate (the dispatcher never does).
    fn deliver(&self, text: &str) -> BoxFuture<'_, AlertResult<()>>;
}

/// Timeout for one delivery attempt.
const DELIVERY_TIMEOUT: Duration = Duration::from_secs(10);

/// Delivers messages by invoking the OpenClaw CLI as a subprocess:
/// `<command> message send --channel <channel> --message <text>`.
pub struct OpenClawSink {
    command: String,
    channel: String,
}

impl OpenClawSink {
    /// Create a sink for the given channel.
    ///
    /// # Arguments
    /// * `command` - delivery binary name or path (normally "openclaw")
    /// * `channel` - channel argument (normally "telegram")
    pub fn new(command: impl Into<String>, channel: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            channel: channel.into(),
        }
    }

    async fn run(&self, text: &str) -> AlertResult<()> {
        let child = Command::new(&self.command)
            .args([
                "message",
                "send",
                "--channel",
                self.channel.as_str(),
                "--message",
                text,
            ])
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| AlertError::Spawn(format!("{}: {e}", self.command)))?;

        let output = tokio::time::timeout(DELIVERY_TIMEOUT, child.wait_with_output())
            .await
            .map_err(|_| AlertError::Timeout(DELIVERY_TIMEOUT.as_secs()))?
            .map_err(|e| AlertError::Spawn(format!("{}: {e}", self.command)))?;

        if !output.status.success() {
            return Err(AlertError::Exit {
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }

        debug!(channel = %self.channel, "Alert delivered");
        Ok(())
    }
}

impl AlertSink for OpenClawSink {
    fn deliver(&self, text: &str) -> BoxFuture<'_, AlertResult<()>> {
        let text = text.to_string();
        Box::pin(async move { self.run(&text).await })
    }
}

/// Recording sink for testing.
///
/// Stores every delivered message; can be switched to fail each call.
#[derive(Debug, Default)]
pub struct RecordingSink {
    delivered: std::sync::Mutex<Vec<String>>,
    fail: std::sync::atomic::AtomicBool,
}

impl RecordingSink {
    /// Create a sink that accepts every delivery.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make subsequent deliveries fail (or succeed again).
    pub fn set_fail(&self, fail: bool) {
        self.fail.store(fail, std::sync::atomic::Ordering::SeqCst);
    }

    /// Messages delivered so far.
    pub fn delivered(&self) -> Vec<String> {
        self.delivered.lock().expect("sink lock poisoned").clone()
    }
}

impl AlertSink for RecordingSink {
    fn deliver(&self, text: &str) -> BoxFuture<'_, AlertResult<()>> {
        let text = text.to_string();
        Box::pin(async move {
            if self.fail.load(std::sync::atomic::Ordering::SeqCst) {
                return Err(AlertError::Spawn("delivery unavailable".to_string()));
            }
            self.delivered
                .lock()
                .expect("sink lock poisoned")
                .push(text);
            Ok(())
        })
    }
}
