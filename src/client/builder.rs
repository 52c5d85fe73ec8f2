use crate::client::config::{
    ClientConfig, DEFAULT_BASE_URL, DEFAULT_RETRY_ATTEMPTS, DEFAULT_RETRY_DELAY, DEFAULT_TIMEOUT,
};
use crate::client::core::ChatRoutesClient;
use crate::{Error, ErrorContext, Result};
use std::sync::Arc;
use std::time::Duration;

/// Builder for creating clients with custom configuration.
///
/// Resolution order for every setting: explicit builder value, then the
/// environment, then the built-in default.
///
/// | Setting | Environment variable |
/// |---------|----------------------|
/// | API key | `CHATROUTES_API_KEY` |
/// | Base URL | `CHATROUTES_BASE_URL` |
/// | Timeout (ms) | `CHATROUTES_TIMEOUT_MS` |
/// | Retry attempts | `CHATROUTES_RETRY_ATTEMPTS` |
/// | Retry base delay (ms) | `CHATROUTES_RETRY_DELAY_MS` |
#[derive(Debug, Default, Clone)]
pub struct ChatRoutesClientBuilder {
    api_key: Option<String>,
    base_url: Option<String>,
    timeout: Option<Duration>,
    retry_attempts: Option<u32>,
    retry_delay: Option<Duration>,
    ignore_env: bool,
}

impl ChatRoutesClientBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Override the service address (for self-hosted deployments and mock servers).
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Per-attempt deadline for non-streaming calls.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Number of retries after the first attempt. `0` disables retrying.
    pub fn retry_attempts(mut self, n: u32) -> Self {
        self.retry_attempts = Some(n);
        self
    }

    /// Base delay of the exponential backoff.
    pub fn retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = Some(delay);
        self
    }

    /// Do not consult `CHATROUTES_*` environment variables.
    pub fn ignore_env(mut self, ignore: bool) -> Self {
        self.ignore_env = ignore;
        self
    }

    fn env(&self, name: &str) -> Option<String> {
        if self.ignore_env {
            return None;
        }
        std::env::var(name)
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
    }

    fn env_parse<T: std::str::FromStr>(&self, name: &str) -> Result<Option<T>> {
        match self.env(name) {
            None => Ok(None),
            Some(raw) => raw.parse::<T>().map(Some).map_err(|_| {
                Error::configuration_with_context(
                    format!("Invalid value for {}", name),
                    ErrorContext::new()
                        .with_field_path(name)
                        .with_details(raw)
                        .with_source("client_builder"),
                )
            }),
        }
    }

    /// Resolve the final configuration without building a client.
    pub fn build_config(&self) -> Result<ClientConfig> {
        let api_key = self
            .api_key
            .clone()
            .or_else(|| self.env("CHATROUTES_API_KEY"))
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| {
                Error::configuration_with_context(
                    "API key is required",
                    ErrorContext::new()
                        .with_field_path("api_key")
                        .with_source("client_builder"),
                )
            })?;

        let raw_base = self
            .base_url
            .clone()
            .or_else(|| self.env("CHATROUTES_BASE_URL"))
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let base_url = normalize_base_url(&raw_base)?;

        let timeout = match self.timeout {
            Some(t) => t,
            None => self
                .env_parse::<u64>("CHATROUTES_TIMEOUT_MS")?
                .map(Duration::from_millis)
                .unwrap_or(DEFAULT_TIMEOUT),
        };
        if timeout.is_zero() {
            return Err(Error::configuration_with_context(
                "Timeout must be greater than zero",
                ErrorContext::new()
                    .with_field_path("timeout")
                    .with_source("client_builder"),
            ));
        }

        let retry_attempts = match self.retry_attempts {
            Some(n) => n,
            None => self
                .env_parse::<u32>("CHATROUTES_RETRY_ATTEMPTS")?
                .unwrap_or(DEFAULT_RETRY_ATTEMPTS),
        };

        let retry_delay = match self.retry_delay {
            Some(d) => d,
            None => self
                .env_parse::<u64>("CHATROUTES_RETRY_DELAY_MS")?
                .map(Duration::from_millis)
                .unwrap_or(DEFAULT_RETRY_DELAY),
        };

        Ok(ClientConfig {
            api_key,
            base_url,
            timeout,
            retry_attempts,
            retry_delay,
        })
    }

    /// Build the client.
    pub fn build(self) -> Result<ChatRoutesClient> {
        let config = Arc::new(self.build_config()?);
        let transport = Arc::new(crate::transport::HttpTransport::new(&config)?);
        Ok(ChatRoutesClient { config, transport })
    }
}

fn normalize_base_url(raw: &str) -> Result<String> {
    let parsed = url::Url::parse(raw.trim()).map_err(|e| {
        Error::configuration_with_context(
            format!("Invalid base URL: {}", e),
            ErrorContext::new()
                .with_field_path("base_url")
                .with_details(raw)
                .with_source("client_builder"),
        )
    })?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(Error::configuration_with_context(
            "Base URL must use http or https",
            ErrorContext::new()
                .with_field_path("base_url")
                .with_details(raw)
                .with_source("client_builder"),
        ));
    }
    Ok(parsed.as_str().trim_end_matches('/').to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builder() -> ChatRoutesClientBuilder {
        ChatRoutesClientBuilder::new().ignore_env(true)
    }

    #[test]
    fn defaults_apply() {
        let cfg = builder().api_key("k").build_config().unwrap();
        assert_eq!(cfg.base_url(), "https://api.chatroutes.com");
        assert_eq!(cfg.timeout(), Duration::from_secs(30));
        assert_eq!(cfg.retry_attempts(), 3);
        assert_eq!(cfg.retry_delay(), Duration::from_secs(1));
    }

    #[test]
    fn explicit_zero_retries_is_kept() {
        let cfg = builder()
            .api_key("k")
            .retry_attempts(0)
            .build_config()
            .unwrap();
        assert_eq!(cfg.retry_attempts(), 0);
        assert_eq!(cfg.retry_policy().max_attempts(), 1);
    }

    #[test]
    fn missing_key_is_a_configuration_error() {
        let err = builder().build_config().unwrap_err();
        match err {
            Error::Configuration { context, .. } => {
                assert_eq!(context.field_path.as_deref(), Some("api_key"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn base_url_is_validated_and_trimmed() {
        let cfg = builder()
            .api_key("k")
            .base_url("http://localhost:8080/")
            .build_config()
            .unwrap();
        assert_eq!(cfg.base_url(), "http://localhost:8080");

        assert!(builder()
            .api_key("k")
            .base_url("not a url")
            .build_config()
            .is_err());
        assert!(builder()
            .api_key("k")
            .base_url("ftp://example.com")
            .build_config()
            .is_err());
    }

    #[test]
    fn debug_redacts_key() {
        let cfg = builder().api_key("secret-key").build_config().unwrap();
        let dbg = format!("{:?}", cfg);
        assert!(!dbg.contains("secret-key"));
        assert!(dbg.contains("<redacted>"));
    }
}
