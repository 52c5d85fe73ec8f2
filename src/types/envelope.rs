use crate::{Error, ErrorContext, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The success/data/error wrapper around every non-streaming response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Server error code (e.g. `"VALIDATION_ERROR"`) when `success` is false.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl<T> ApiResponse<T> {
    /// Envelope for a successful response with no body (e.g. `204 No Content`).
    pub(crate) fn empty_success() -> Self {
        Self {
            success: true,
            data: None,
            error: None,
            message: None,
            details: None,
        }
    }

    /// The payload of a successful envelope.
    ///
    /// Fails with [`Error::Response`] when the server reported failure or
    /// left out the payload; the server's message wins over `fallback`.
    pub fn into_data(self, fallback: &str) -> Result<T> {
        match (self.success, self.data) {
            (true, Some(data)) => Ok(data),
            (_, _) => Err(Error::response_with_context(
                self.message.unwrap_or_else(|| fallback.to_string()),
                envelope_context(self.error, "data"),
            )),
        }
    }

    /// Check an envelope whose payload is irrelevant (deletes, logout).
    pub fn into_unit(self, fallback: &str) -> Result<()> {
        if self.success {
            Ok(())
        } else {
            Err(Error::response_with_context(
                self.message.unwrap_or_else(|| fallback.to_string()),
                envelope_context(self.error, "success"),
            ))
        }
    }
}

fn envelope_context(code: Option<String>, field: &str) -> ErrorContext {
    let ctx = ErrorContext::new()
        .with_field_path(field)
        .with_source("response_envelope");
    match code {
        Some(code) => ctx.with_details(code),
        None => ctx,
    }
}
