//! Feed error types.

use thiserror::Error;

/// Errors from the REST fetchers.
///
/// A failed fetch carries its cause so callers can distinguish
/// "fetch failed" from "fetch returned nothing".
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("HTTP client error: {0}")]
    HttpClient(String),

    #[error("Malformed response: {0}")]
    Parse(String),
}

pub type FeedResult<T> = Result<T, FeedError>;
