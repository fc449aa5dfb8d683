//! Authenticated HTTP client for the backend API.

use std::sync::Arc;
use std::time::Duration;

use reqwest::{Client, RequestBuilder, Response};
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use super::error::{ApiResult, RequestError};
use crate::session::SessionStore;

/// Client for the management backend.
///
/// The bearer credential is read from the session store at call time, never
/// snapshotted at construction, so a login or logout is picked up by the very
/// next request. With no token present the request goes out unauthenticated
/// and the backend decides whether that is acceptable.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    store: Arc<SessionStore>,
}

impl ApiClient {
    /// Create a client for the given base URL.
    pub fn new(base_url: impl Into<String>, store: Arc<SessionStore>) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            store,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET a JSON value, authenticated with the current session token.
    pub async fn get(&self, path: &str) -> ApiResult<Value> {
        let request = self.authorize(self.client.get(self.url(path)));
        self.send(request).await
    }

    /// POST a JSON body, authenticated with the current session token.
    pub async fn post(&self, path: &str, body: &impl Serialize) -> ApiResult<Value> {
        let request = self.authorize(self.client.post(self.url(path)).json(body));
        self.send(request).await
    }

    /// GET with an explicit bearer token, bypassing the session store.
    ///
    /// Used during login to resolve the identity behind a token that has not
    /// been committed to the session yet.
    pub async fn get_with_token(&self, path: &str, token: &str) -> ApiResult<Value> {
        let request = self
            .client
            .get(self.url(path))
            .header("Authorization", format!("Bearer {}", token));
        self.send(request).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match self.store.get().token {
            Some(token) => request.header("Authorization", format!("Bearer {}", token)),
            None => request,
        }
    }

    async fn send(&self, request: RequestBuilder) -> ApiResult<Value> {
        let response = request.send().await?;
        Self::handle_response(response).await
    }

    /// Parse a successful body, or turn a rejection into [`RequestError::Status`]
    /// with the backend's `detail` string when it supplies a textual one.
    async fn handle_response(response: Response) -> ApiResult<Value> {
        let status = response.status();

        if status.is_success() {
            response
                .json()
                .await
                .map_err(|e| RequestError::Decode(format!("invalid JSON body: {}", e)))
        } else {
            let detail = response
                .json::<Value>()
                .await
                .ok()
                .and_then(|body| body.get("detail").and_then(Value::as_str).map(str::to_string));
            debug!(status = status.as_u16(), ?detail, "request rejected by backend");
            Err(RequestError::Status {
                status: status.as_u16(),
                detail,
            })
        }
    }
}
