//! `reqwest`-based client for the identity RPC endpoints.

use std::time::Duration;

use async_trait::async_trait;
use banner_core::roles::Role;
use banner_core::types::DbId;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::RpcError;
use crate::wire::{
    PingResponse, ResolveIdentityRequest, ResolveIdentityResponse, ResolveRoleRequest,
    ResolveRoleResponse, PING_PATH, RESOLVE_IDENTITY_PATH, RESOLVE_ROLE_PATH,
};
use crate::IdentityClient;

/// HTTP client for a single identity service instance.
///
/// Cloning is cheap and shares the underlying connection pool.
#[derive(Clone)]
pub struct HttpIdentityClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpIdentityClient {
    /// * `base_url` - RPC listener root, e.g. `http://127.0.0.1:8082`.
    /// * `timeout` - per-call deadline.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, RpcError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .pool_idle_timeout(Duration::from_secs(90))
            .build()?;
        Ok(Self::with_client(client, base_url))
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // ---- private helpers ----

    async fn call<Req, Resp>(&self, path: &str, body: &Req) -> Result<Resp, RpcError>
    where
        Req: Serialize + ?Sized,
        Resp: DeserializeOwned,
    {
        let response = self
            .client
            .post(format!("{}{path}", self.base_url))
            .json(body)
            .send()
            .await?;
        Self::parse_response(response).await
    }

    /// Map a non-2xx status to the matching [`RpcError`] variant.
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, RpcError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "<unreadable body>".to_string());
        Err(match status {
            StatusCode::NOT_FOUND => RpcError::NotFound(body),
            StatusCode::UNAUTHORIZED => RpcError::Unauthenticated(body),
            other => RpcError::Remote {
                status: other.as_u16(),
                body,
            },
        })
    }

    async fn parse_response<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, RpcError> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl IdentityClient for HttpIdentityClient {
    async fn resolve_identity(&self, session_token: &str) -> Result<DbId, RpcError> {
        let request = ResolveIdentityRequest {
            session_token: session_token.to_string(),
        };
        let response: ResolveIdentityResponse = self.call(RESOLVE_IDENTITY_PATH, &request).await?;
        Ok(response.user_id)
    }

    async fn resolve_role(&self, user_id: DbId) -> Result<Role, RpcError> {
        let response: ResolveRoleResponse = self
            .call(RESOLVE_ROLE_PATH, &ResolveRoleRequest { user_id })
            .await?;
        response
            .role
            .parse()
            .map_err(|_| RpcError::Malformed(format!("unknown role '{}'", response.role)))
    }

    async fn ping(&self) -> Result<(), RpcError> {
        let response = self
            .client
            .get(format!("{}{PING_PATH}", self.base_url))
            .send()
            .await?;
        let body: PingResponse = Self::parse_response(response).await?;
        tracing::debug!(status = %body.status, base_url = %self.base_url, "Identity RPC ping");
        Ok(())
    }
}
