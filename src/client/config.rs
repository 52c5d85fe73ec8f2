//! Resolved connection settings.

use std::fmt;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://api.chatroutes.com";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(30_000);
pub const DEFAULT_RETRY_ATTEMPTS: u32 = 3;
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_millis(1_000);

/// Immutable client configuration, shared read-only by every call.
///
/// Built once by [`ChatRoutesClientBuilder`](crate::ChatRoutesClientBuilder).
#[derive(Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub(crate) api_key: String,
    pub(crate) base_url: String,
    pub(crate) timeout: Duration,
    pub(crate) retry_attempts: u32,
    pub(crate) retry_delay: Duration,
}

impl ClientConfig {
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Base URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Per-attempt deadline unless a request overrides it.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Retries after the first attempt.
    pub fn retry_attempts(&self) -> u32 {
        self.retry_attempts
    }

    /// Base of the exponential backoff.
    pub fn retry_delay(&self) -> Duration {
        self.retry_delay
    }

    pub(crate) fn retry_policy(&self) -> crate::client::policy::RetryPolicy {
        crate::client::policy::RetryPolicy::new(self.retry_attempts, self.retry_delay)
    }
}

// Keep the key out of logs.
impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("retry_attempts", &self.retry_attempts)
            .field("retry_delay", &self.retry_delay)
            .finish()
    }
}
