//! Error classification logic

use crate::error::ApiError;
use crate::error_code::ErrorKind;
use serde_json::Value;

/// Turn a failed HTTP response into a classified error.
///
/// `body` is the decoded JSON body, or `Value::Null` when there was none.
/// The message comes from the body's `message` field, then its `error` field,
/// then the kind's default. `details` is carried for every kind; `retryAfter`
/// only for rate limiting. `Generic` keeps the server's `error` code verbatim.
pub fn classify(http_status: u16, body: &Value) -> ApiError {
    let kind = ErrorKind::from_http_status(http_status);

    let server_code = body.get("error").and_then(Value::as_str);
    let message = body
        .get("message")
        .and_then(Value::as_str)
        .filter(|m| !m.is_empty())
        .or(server_code.filter(|c| !c.is_empty()))
        .unwrap_or_else(|| kind.default_message());

    let mut err = ApiError::new(kind, http_status).with_message(message);

    if kind == ErrorKind::Generic {
        if let Some(code) = server_code {
            err = err.with_code(code);
        }
    }

    if let Some(details) = body.get("details").filter(|d| !d.is_null()) {
        err = err.with_details(details.clone());
    }

    if kind == ErrorKind::RateLimit {
        if let Some(secs) = body.get("retryAfter").and_then(retry_after_secs) {
            err = err.with_retry_after(secs);
        }
    }

    err
}

/// Classify a response whose body is raw text that may not be JSON.
///
/// Non-JSON bodies (an HTML error page from a proxy, say) are classified as
/// if the body were empty; the text is kept in `details`.
pub(crate) fn classify_text(http_status: u16, text: &str) -> ApiError {
    match serde_json::from_str::<Value>(text) {
        Ok(body) => classify(http_status, &body),
        Err(_) => {
            let err = classify(http_status, &Value::Null);
            let trimmed = text.trim();
            if trimmed.is_empty() {
                err
            } else {
                err.with_details(Value::String(trimmed.to_string()))
            }
        }
    }
}

fn retry_after_secs(v: &Value) -> Option<u64> {
    match v {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f.ceil() as u64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn validation_carries_details() {
        let body = json!({
            "success": false,
            "error": "VALIDATION_ERROR",
            "message": "title is required",
            "details": {"field": "title"}
        });
        let err = classify(400, &body);
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(err.message(), "title is required");
        assert_eq!(err.code(), Some("VALIDATION_ERROR"));
        assert_eq!(err.details(), Some(&json!({"field": "title"})));
    }

    #[test]
    fn falls_back_to_error_field_then_default_message() {
        let err = classify(401, &json!({"error": "token expired"}));
        assert_eq!(err.kind(), ErrorKind::Authentication);
        assert_eq!(err.message(), "token expired");

        let err = classify(404, &json!({}));
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(err.message(), "Resource not found");
        assert_eq!(err.code(), Some("NOT_FOUND"));
    }

    #[test]
    fn empty_message_falls_through_to_error_field() {
        let err = classify(503, &json!({"message": "", "error": "UPSTREAM_DOWN"}));
        assert_eq!(err.message(), "UPSTREAM_DOWN");
        assert_eq!(err.code(), Some("UPSTREAM_DOWN"));

        let err = classify(400, &json!({"message": "", "error": ""}));
        assert_eq!(err.message(), ErrorKind::Validation.default_message());
    }

    #[test]
    fn rate_limit_reads_retry_after() {
        let err = classify(429, &json!({"message": "slow down", "retryAfter": 30}));
        assert_eq!(err.kind(), ErrorKind::RateLimit);
        assert_eq!(err.retry_after(), Some(30));

        let err = classify(429, &json!({"retryAfter": "12"}));
        assert_eq!(err.retry_after(), Some(12));

        let err = classify(429, &Value::Null);
        assert_eq!(err.retry_after(), None);
        assert_eq!(err.message(), "Rate limit exceeded");
    }

    #[test]
    fn generic_keeps_status_and_server_code() {
        let err = classify(503, &json!({"error": "UPSTREAM_UNAVAILABLE", "message": "try later"}));
        assert_eq!(err.kind(), ErrorKind::Generic);
        assert_eq!(err.http_status(), 503);
        assert_eq!(err.code(), Some("UPSTREAM_UNAVAILABLE"));
        assert!(err.is_transient());

        let err = classify(403, &json!({"message": "forbidden"}));
        assert_eq!(err.kind(), ErrorKind::Generic);
        assert_eq!(err.code(), None);
        assert!(!err.is_transient());
    }

    #[test]
    fn non_json_body_is_kept_as_details() {
        let err = classify_text(502, "<html>Bad Gateway</html>");
        assert_eq!(err.kind(), ErrorKind::Generic);
        assert_eq!(err.message(), "An error occurred");
        assert_eq!(err.details(), Some(&json!("<html>Bad Gateway</html>")));

        let err = classify_text(500, "");
        assert!(err.details().is_none());
    }
}
