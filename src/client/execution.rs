//! 请求执行逻辑：带分类错误与指数退避的非流式请求执行。
//!
//! Request execution: one logical call, retried on transient failures.

use crate::client::error_classification::classify_text;
use crate::client::policy::execute_with_retry;
use crate::client::request::ApiRequest;
use crate::error::ApiError;
use crate::error_code::ErrorKind;
use crate::transport::TransportError;
use crate::types::ApiResponse;
use crate::Result;
use serde::de::DeserializeOwned;
use std::time::{Duration, Instant};
use tracing::{debug, info};
use uuid::Uuid;

use super::core::ChatRoutesClient;

impl ChatRoutesClient {
    /// Execute one logical call and return the decoded envelope.
    ///
    /// Transient failures (transport errors, HTTP >= 500) are retried up to
    /// the configured budget with exponential backoff; every other failure is
    /// returned on first occurrence. The envelope is returned as-is, so a
    /// `success: false` body with a 2xx status is not an error here.
    pub async fn execute<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<ApiResponse<T>> {
        let client_request_id = Uuid::new_v4().to_string();
        let timeout = request.timeout.unwrap_or(self.config.timeout);
        let policy = self.config.retry_policy();
        let start = Instant::now();

        let req = &request;
        let id = client_request_id.as_str();
        let result = execute_with_retry(
            &policy,
            move |attempt| self.execute_once::<T>(req, timeout, id, attempt),
            tokio::time::sleep,
        )
        .await;

        match result {
            Ok(envelope) => Ok(envelope),
            Err(err) => {
                info!(
                    http_status = err.http_status(),
                    error_kind = err.kind().name(),
                    method = %request.method,
                    path = request.path.as_str(),
                    client_request_id = id,
                    duration_ms = start.elapsed().as_millis() as u64,
                    "chatroutes request failed"
                );
                Err(finalize(err, policy.max_attempts()).into())
            }
        }
    }

    /// A single attempt: send, then classify or decode.
    async fn execute_once<T: DeserializeOwned>(
        &self,
        request: &ApiRequest,
        timeout: Duration,
        client_request_id: &str,
        attempt: u32,
    ) -> std::result::Result<ApiResponse<T>, ApiError> {
        let resp = self
            .transport
            .send(request, timeout, client_request_id)
            .await?;

        let status = resp.status();
        let text = resp.text().await.map_err(TransportError::from_reqwest)?;

        debug!(
            attempt,
            http_status = status.as_u16(),
            path = request.path.as_str(),
            client_request_id,
            "chatroutes response received"
        );

        if !status.is_success() {
            return Err(classify_text(status.as_u16(), &text));
        }

        if text.trim().is_empty() {
            return Ok(ApiResponse::empty_success());
        }

        // Unreadable success bodies are unclassified: retried, then wrapped.
        serde_json::from_str::<ApiResponse<T>>(&text)
            .map_err(|e| ApiError::network(format!("Failed to parse response body: {}", e)))
    }
}

/// Shape the error that leaves the executor.
///
/// A failure that was never classified from an HTTP response is reported as a
/// network error summarising the whole call; classified errors pass through.
fn finalize(err: ApiError, attempts: u32) -> ApiError {
    if err.kind() != ErrorKind::Network {
        return err;
    }
    ApiError::network("Request failed after retries").with_details(serde_json::json!({
        "error": err.message(),
        "attempts": attempts,
    }))
}
