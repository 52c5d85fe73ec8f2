use super::api_path;
use crate::client::request::ApiRequest;
use crate::client::ChatRoutesClient;
use crate::types::auth::RefreshTokenRequest;
use crate::types::{ApiResponse, AuthSession, AuthTokens, LoginRequest, RegisterRequest, User};
use crate::Result;
use serde_json::Value;

/// `/auth` endpoints.
///
/// Register, login and refresh are sent without the `Authorization` header.
/// Tokens are returned to the caller; the client does not store them.
pub struct AuthApi<'a> {
    client: &'a ChatRoutesClient,
}

impl<'a> AuthApi<'a> {
    pub(crate) fn new(client: &'a ChatRoutesClient) -> Self {
        Self { client }
    }

    pub async fn register(&self, request: &RegisterRequest) -> Result<AuthSession> {
        let req = ApiRequest::post(api_path(&["auth/register"]))
            .json(request)?
            .skip_auth();
        let resp: ApiResponse<AuthSession> = self.client.execute(req).await?;
        resp.into_data("Registration failed")
    }

    pub async fn login(&self, request: &LoginRequest) -> Result<AuthSession> {
        let req = ApiRequest::post(api_path(&["auth/login"]))
            .json(request)?
            .skip_auth();
        let resp: ApiResponse<AuthSession> = self.client.execute(req).await?;
        resp.into_data("Login failed")
    }

    /// The user owning the configured API key.
    pub async fn me(&self) -> Result<User> {
        self.client
            .get::<User>(&api_path(&["auth/me"]), &[])
            .await?
            .into_data("Failed to get user info")
    }

    pub async fn refresh_token(&self, refresh_token: &str) -> Result<AuthTokens> {
        let req = ApiRequest::post(api_path(&["auth/refresh"]))
            .json(&RefreshTokenRequest { refresh_token })?
            .skip_auth();
        let resp: ApiResponse<AuthTokens> = self.client.execute(req).await?;
        resp.into_data("Token refresh failed")
    }

    pub async fn logout(&self) -> Result<()> {
        self.client
            .post::<Value, ()>(&api_path(&["auth/logout"]), None)
            .await?
            .into_unit("Logout failed")
    }
}
