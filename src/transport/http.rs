use crate::client::config::ClientConfig;
use crate::client::request::ApiRequest;
use crate::transport::TransportError;
use crate::{Error, ErrorContext, Result};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use std::time::Duration;

/// Header carrying our per-call correlation id.
pub const CLIENT_REQUEST_ID_HEADER: &str = "x-client-request-id";

pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl HttpTransport {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        // No client-wide timeout: non-streaming calls set a per-request
        // deadline, and stream bodies must be allowed to run long.
        let client = reqwest::Client::builder()
            .connect_timeout(config.timeout())
            .pool_max_idle_per_host(
                std::env::var("CHATROUTES_HTTP_POOL_MAX_IDLE_PER_HOST")
                    .ok()
                    .and_then(|s| s.parse::<usize>().ok())
                    .unwrap_or(32),
            )
            .pool_idle_timeout(Some(Duration::from_secs(90)))
            .build()
            .map_err(|e| {
                Error::configuration_with_context(
                    format!("Failed to build HTTP client: {}", e),
                    ErrorContext::new().with_source("http_transport"),
                )
            })?;

        Ok(Self {
            client,
            base_url: config.base_url().to_string(),
            api_key: config.api_key().to_string(),
        })
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn build(
        &self,
        request: &ApiRequest,
        client_request_id: &str,
        accept_stream: bool,
    ) -> std::result::Result<reqwest::RequestBuilder, TransportError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if accept_stream {
            headers.insert(ACCEPT, HeaderValue::from_static("text/event-stream"));
        }
        if !request.skip_auth {
            let auth = HeaderValue::from_str(&format!("ApiKey {}", self.api_key))
                .map_err(|e| TransportError::Other(format!("invalid API key header: {e}")))?;
            headers.insert(AUTHORIZATION, auth);
        }
        headers.insert(
            HeaderName::from_static(CLIENT_REQUEST_ID_HEADER),
            HeaderValue::from_str(client_request_id)
                .map_err(|e| TransportError::Other(format!("invalid request id: {e}")))?,
        );

        // Caller headers replace the defaults above.
        for (name, value) in &request.headers {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| TransportError::Other(format!("invalid header name {name:?}: {e}")))?;
            let value = HeaderValue::from_str(value)
                .map_err(|e| TransportError::Other(format!("invalid header value: {e}")))?;
            headers.insert(name, value);
        }

        let mut req = self
            .client
            .request(request.method.clone(), self.url(&request.path))
            .headers(headers);

        if !request.query.is_empty() {
            req = req.query(&request.query);
        }
        if let Some(body) = request.wire_body() {
            req = req.json(body);
        }

        Ok(req)
    }

    /// Send one non-streaming attempt with the given deadline.
    pub async fn send(
        &self,
        request: &ApiRequest,
        timeout: Duration,
        client_request_id: &str,
    ) -> std::result::Result<reqwest::Response, TransportError> {
        self.build(request, client_request_id, false)?
            .timeout(timeout)
            .send()
            .await
            .map_err(TransportError::from_reqwest)
    }

    /// Open a streaming response. Only connecting is bounded (by the
    /// client's connect timeout); the body may take as long as it takes.
    pub async fn send_stream(
        &self,
        request: &ApiRequest,
        client_request_id: &str,
    ) -> std::result::Result<reqwest::Response, TransportError> {
        self.build(request, client_request_id, true)?
            .send()
            .await
            .map_err(TransportError::from_reqwest)
    }
}
