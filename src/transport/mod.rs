//! 传输层：基于 reqwest 的单次 HTTP 请求发送。
//!
//! HTTP transport. One call here is one network attempt; retries live in the
//! client's execution layer.

pub mod http;

pub use http::HttpTransport;

use thiserror::Error;

/// Failures below the HTTP status level (nothing was classified yet).
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("request timed out: {0}")]
    Timeout(#[source] reqwest::Error),

    #[error("connection failed: {0}")]
    Connect(#[source] reqwest::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{0}")]
    Other(String),
}

impl TransportError {
    /// Sort a reqwest failure into the most specific variant.
    pub fn from_reqwest(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            TransportError::Timeout(e)
        } else if e.is_connect() {
            TransportError::Connect(e)
        } else {
            TransportError::Http(e)
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, TransportError::Timeout(_))
    }
}

impl From<TransportError> for crate::error::ApiError {
    fn from(e: TransportError) -> Self {
        crate::error::ApiError::network(e.to_string())
    }
}
