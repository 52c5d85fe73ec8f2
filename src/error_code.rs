//! 错误分类：定义 6 种固定错误类型及其重试语义。
//!
//! Classified error kinds.
//!
//! Every failed request surfaces exactly one [`ErrorKind`]. The kind decides two
//! things: the stable error code reported to the caller, and whether the
//! request executor is allowed to try again.
//!
//! | Kind             | HTTP status | Code                   | Transient |
//! |------------------|-------------|------------------------|-----------|
//! | `Validation`     | 400         | `VALIDATION_ERROR`     | no        |
//! | `Authentication` | 401         | `AUTHENTICATION_ERROR` | no        |
//! | `NotFound`       | 404         | `NOT_FOUND`            | no        |
//! | `RateLimit`      | 429         | `RATE_LIMIT_EXCEEDED`  | no        |
//! | `Network`        | 0 (none)    | `NETWORK_ERROR`        | yes       |
//! | `Generic`        | other       | from response body     | if >= 500 |
//!
//! ## Example
//!
//! ```rust
//! use chatroutes::error_code::ErrorKind;
//!
//! let kind = ErrorKind::from_http_status(429);
//! assert_eq!(kind, ErrorKind::RateLimit);
//! assert_eq!(kind.code(), Some("RATE_LIMIT_EXCEEDED"));
//! assert!(!kind.is_transient(429));
//! ```

use std::fmt;

/// Sentinel status used for failures that never produced an HTTP response.
pub const NETWORK_STATUS: u16 = 0;

/// Fixed taxonomy of request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// 400: malformed request or invalid parameters
    Validation,
    /// 401: missing, invalid or expired credentials
    Authentication,
    /// 404: the addressed resource does not exist
    NotFound,
    /// 429: too many requests
    RateLimit,
    /// No HTTP response: connection refused, reset, timed out
    Network,
    /// Any other status
    Generic,
}

impl ErrorKind {
    /// Maps an HTTP status to its kind. Status `0` is the network sentinel.
    pub fn from_http_status(status: u16) -> Self {
        match status {
            NETWORK_STATUS => Self::Network,
            400 => Self::Validation,
            401 => Self::Authentication,
            404 => Self::NotFound,
            429 => Self::RateLimit,
            _ => Self::Generic,
        }
    }

    /// Stable code string for the kind. `Generic` has none of its own; it
    /// reports whatever code the server sent.
    #[inline]
    pub fn code(&self) -> Option<&'static str> {
        match self {
            Self::Validation => Some("VALIDATION_ERROR"),
            Self::Authentication => Some("AUTHENTICATION_ERROR"),
            Self::NotFound => Some("NOT_FOUND"),
            Self::RateLimit => Some("RATE_LIMIT_EXCEEDED"),
            Self::Network => Some("NETWORK_ERROR"),
            Self::Generic => None,
        }
    }

    /// Returns the snake_case name (e.g., `"not_found"`).
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::Authentication => "authentication",
            Self::NotFound => "not_found",
            Self::RateLimit => "rate_limit",
            Self::Network => "network",
            Self::Generic => "generic",
        }
    }

    /// Message used when the response body carries none.
    #[inline]
    pub fn default_message(&self) -> &'static str {
        match self {
            Self::Validation => "Validation failed",
            Self::Authentication => "Authentication failed",
            Self::NotFound => "Resource not found",
            Self::RateLimit => "Rate limit exceeded",
            Self::Network => "Network request failed",
            Self::Generic => "An error occurred",
        }
    }

    /// Whether a failure of this kind may be retried.
    ///
    /// Only transport failures and server-side (`>= 500`) generic errors are
    /// transient; everything caused by the request itself is terminal.
    #[inline]
    pub fn is_transient(&self, http_status: u16) -> bool {
        match self {
            Self::Network => true,
            Self::Generic => http_status >= 500,
            Self::Validation | Self::Authentication | Self::NotFound | Self::RateLimit => false,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
