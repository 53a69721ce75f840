//! Alert delivery for the Hyperliquid perp monitor.
//!
//! The `AlertSink` trait is the collaborator boundary: the monitor only
//! needs `deliver(text) -> success | failure`. The shipped
//! implementation shells out to the OpenClaw CLI; the dispatcher adds
//! the timestamp prefix and swallows delivery failures.

pub mod dispatcher;
pub mod error;
pub mod sink;

pub use dispatcher::Dispatcher;
pub use error::{AlertError, AlertResult};
pub use sink::{AlertSink, BoxFuture, OpenClawSink, RecordingSink};
