use crate::error_code::{ErrorKind, NETWORK_STATUS};
use serde_json::Value;
use std::fmt;
use thiserror::Error;

/// Structured error context for better error handling and debugging.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ErrorContext {
    /// Field path or configuration key that caused the error (e.g., "base_url", "data.message")
    pub field_path: Option<String>,
    /// Additional context about the error (e.g., expected type, actual value)
    pub details: Option<String>,
    /// Source of the error (e.g., "client_builder", "messages.send")
    pub source: Option<String>,
}

impl ErrorContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_field_path(mut self, path: impl Into<String>) -> Self {
        self.field_path = Some(path.into());
        self
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}

/// A request failure tagged with exactly one [`ErrorKind`].
///
/// Callers branch on [`ApiError::kind`]; the remaining fields are context.
/// Values are immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiError {
    kind: ErrorKind,
    http_status: u16,
    code: Option<String>,
    message: String,
    details: Option<Value>,
    retry_after: Option<u64>,
}

impl ApiError {
    /// Builds an error of `kind` with the kind's default message and code.
    pub fn new(kind: ErrorKind, http_status: u16) -> Self {
        Self {
            kind,
            http_status,
            code: kind.code().map(str::to_string),
            message: kind.default_message().to_string(),
            details: None,
            retry_after: None,
        }
    }

    /// A failure that never produced an HTTP response.
    pub fn network(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Network, NETWORK_STATUS).with_message(message)
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    pub fn with_retry_after(mut self, secs: u64) -> Self {
        self.retry_after = Some(secs);
        self
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// HTTP status of the failed response; `0` for network failures.
    pub fn http_status(&self) -> u16 {
        self.http_status
    }

    pub fn code(&self) -> Option<&str> {
        self.code.as_deref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn details(&self) -> Option<&Value> {
        self.details.as_ref()
    }

    /// Seconds the server asked us to wait (rate limit responses only).
    pub fn retry_after(&self) -> Option<u64> {
        self.retry_after
    }

    /// Whether the request executor may retry after this error.
    pub fn is_transient(&self) -> bool {
        self.kind.is_transient(self.http_status)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} error", self.kind)?;
        if self.http_status != NETWORK_STATUS {
            write!(f, " (HTTP {})", self.http_status)?;
        }
        if let Some(code) = &self.code {
            write!(f, " [{}]", code)?;
        }
        write!(f, ": {}", self.message)
    }
}

impl std::error::Error for ApiError {}

/// Unified error type for the client.
#[derive(Debug, Error)]
pub enum Error {
    #[error("API request failed: {0}")]
    Api(#[from] ApiError),

    #[error("Configuration error: {message}{}", format_context(.context))]
    Configuration {
        message: String,
        context: ErrorContext,
    },

    #[error("Unexpected response: {message}{}", format_context(.context))]
    Response {
        message: String,
        context: ErrorContext,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Stream callback error: {0}")]
    Callback(#[source] Box<dyn std::error::Error + Send + Sync>),
}

// Helper function to format error context for display
fn format_context(ctx: &ErrorContext) -> String {
    let mut parts = Vec::new();
    if let Some(ref field) = ctx.field_path {
        parts.push(format!("field: {}", field));
    }
    if let Some(ref details) = ctx.details {
        parts.push(format!("details: {}", details));
    }
    if let Some(ref source) = ctx.source {
        parts.push(format!("source: {}", source));
    }
    if parts.is_empty() {
        String::new()
    } else {
        format!(" ({})", parts.join(", "))
    }
}

impl Error {
    /// Create a new configuration error with structured context
    pub fn configuration_with_context(msg: impl Into<String>, context: ErrorContext) -> Self {
        Error::Configuration {
            message: msg.into(),
            context,
        }
    }

    /// Create a new unexpected-response error with structured context
    pub fn response_with_context(msg: impl Into<String>, context: ErrorContext) -> Self {
        Error::Response {
            message: msg.into(),
            context,
        }
    }

    /// Wrap an application error raised inside a stream callback.
    pub fn callback(err: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Error::Callback(err.into())
    }

    /// The classified kind, if this is a request failure.
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            Error::Api(e) => Some(e.kind()),
            _ => None,
        }
    }

    /// The classified error, if this is a request failure.
    pub fn as_api(&self) -> Option<&ApiError> {
        match self {
            Error::Api(e) => Some(e),
            _ => None,
        }
    }

    /// Extract error context if available
    pub fn context(&self) -> Option<&ErrorContext> {
        match self {
            Error::Configuration { context, .. } | Error::Response { context, .. } => Some(context),
            _ => None,
        }
    }
}
