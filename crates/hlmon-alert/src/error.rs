//! Alert delivery error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AlertError {
    #[error("Failed to spawn delivery command: {0}")]
    Spawn(String),

    #[error("Delivery command timed out after {0}s")]
    Timeout(u64),

    #[error("Delivery command exited with {status}: {stderr}")]
    Exit { status: String, stderr: String },
}

pub type AlertResult<T> = Result<T, AlertError>;
