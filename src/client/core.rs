use crate::client::config::ClientConfig;
use crate::client::request::ApiRequest;
use crate::facade::{AuthApi, BranchesApi, ConversationsApi, MessagesApi};
use crate::transport::HttpTransport;
use crate::types::ApiResponse;
use crate::Result;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;

/// Client for the ChatRoutes API.
///
/// Cheap to clone; clones share the connection pool and the immutable
/// configuration, and may be used from concurrent tasks.
#[derive(Clone)]
pub struct ChatRoutesClient {
    pub(crate) config: Arc<ClientConfig>,
    pub(crate) transport: Arc<HttpTransport>,
}

impl std::fmt::Debug for ChatRoutesClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatRoutesClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl ChatRoutesClient {
    /// Create a client with the given API key and defaults for everything else.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        crate::client::builder::ChatRoutesClientBuilder::new()
            .api_key(api_key)
            .build()
    }

    /// Create a client configured entirely from `CHATROUTES_*` environment variables.
    pub fn from_env() -> Result<Self> {
        crate::client::builder::ChatRoutesClientBuilder::new().build()
    }

    pub fn builder() -> crate::client::builder::ChatRoutesClientBuilder {
        crate::client::builder::ChatRoutesClientBuilder::new()
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn auth(&self) -> AuthApi<'_> {
        AuthApi::new(self)
    }

    pub fn conversations(&self) -> ConversationsApi<'_> {
        ConversationsApi::new(self)
    }

    pub fn messages(&self) -> MessagesApi<'_> {
        MessagesApi::new(self)
    }

    pub fn branches(&self) -> BranchesApi<'_> {
        BranchesApi::new(self)
    }

    /// `GET path?query`.
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<ApiResponse<T>> {
        let mut req = ApiRequest::get(path);
        for (k, v) in query {
            req = req.query(*k, v.clone());
        }
        self.execute(req).await
    }

    /// `POST path` with an optional JSON body.
    pub async fn post<T, B>(&self, path: &str, body: Option<&B>) -> Result<ApiResponse<T>>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let mut req = ApiRequest::post(path);
        if let Some(body) = body {
            req = req.json(body)?;
        }
        self.execute(req).await
    }

    /// `PATCH path` with a JSON body.
    pub async fn patch<T, B>(&self, path: &str, body: &B) -> Result<ApiResponse<T>>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.execute(ApiRequest::patch(path).json(body)?).await
    }

    /// `DELETE path`.
    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<ApiResponse<T>> {
        self.execute(ApiRequest::delete(path)).await
    }
}
