//! # API Client
//!
//! Main HTTP client for backend API communication.

use crate::core::error::{ClientError, Result};
use crate::core::service::ApiService;
use parking_lot::RwLock;
use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use shared::{
    CreateItemRequest, CreateSwapRequest, ErrorResponse, ItemDto, StatsResponse,
    SwapDetailResponse, SwapDto, SwapMessageDto, SwapStatus, UpdateItemRequest, UserDto,
};
use std::time::{Duration, Instant};

/// Default backend address.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";

/// HTTP client for the ReWear backend.
///
/// Holds the bearer token issued by the external sign-in service. Requests
/// to protected routes fail with [`ClientError::NotSignedIn`] until one is set.
pub struct ApiClient {
    pub(crate) client: Client,
    base_url: String,
    token: RwLock<Option<String>>,
}

impl ApiClient {
    /// Create a client with a 10 second timeout.
    pub fn new(base_url: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: RwLock::new(None),
        }
    }

    pub fn with_token(self, token: impl Into<String>) -> Self {
        self.set_token(Some(token.into()));
        self
    }

    /// Replace (or clear) the bearer token.
    pub fn set_token(&self, token: Option<String>) {
        *self.token.write() = token;
    }

    pub fn is_signed_in(&self) -> bool {
        self.token.read().is_some()
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Unauthenticated request.
    pub(crate) fn public(&self, method: Method, path: &str) -> RequestBuilder {
        self.client.request(method, self.url(path))
    }

    /// Request carrying the bearer token.
    pub(crate) fn authed(&self, method: Method, path: &str) -> Result<RequestBuilder> {
        let token = self.token.read().clone().ok_or(ClientError::NotSignedIn)?;
        Ok(self.public(method, path).bearer_auth(token))
    }

    /// Send `request` and decode a success body as `T`, or the error body as
    /// [`ClientError::Api`].
    pub(crate) async fn send<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        op: &'static str,
    ) -> Result<T> {
        let start = Instant::now();
        let response = request.send().await.map_err(|e| {
            tracing::error!(op, error = %e, "Network error");
            ClientError::from(e)
        })?;

        let status = response.status();
        let duration_ms = start.elapsed().as_millis();

        if status.is_success() {
            let body = response
                .json::<T>()
                .await
                .map_err(|e| ClientError::Decode(e.to_string()))?;
            tracing::debug!(op, status = status.as_u16(), duration_ms, "Request succeeded");
            Ok(body)
        } else {
            let error = response
                .json::<ErrorResponse>()
                .await
                .map_err(|e| ClientError::Decode(format!("error body: {}", e)))?;
            tracing::warn!(
                op,
                status = status.as_u16(),
                code = %error.code,
                error = %error.error,
                duration_ms,
                "Request failed"
            );
            Err(ClientError::from_response(status.as_u16(), error))
        }
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

#[async_trait::async_trait]
impl ApiService for ApiClient {
    async fn current_user(&self) -> Result<UserDto> {
        super::auth::current_user(self).await
    }

    async fn list_items(&self) -> Result<Vec<ItemDto>> {
        super::items::list_items(self).await
    }

    async fn my_items(&self) -> Result<Vec<ItemDto>> {
        super::items::my_items(self).await
    }

    async fn get_item(&self, id: i64) -> Result<ItemDto> {
        super::items::get_item(self, id).await
    }

    async fn create_item(&self, request: CreateItemRequest) -> Result<ItemDto> {
        super::items::create_item(self, &request).await
    }

    async fn update_item(&self, id: i64, request: UpdateItemRequest) -> Result<ItemDto> {
        super::items::update_item(self, id, &request).await
    }

    async fn delete_item(&self, id: i64) -> Result<()> {
        super::items::delete_item(self, id).await
    }

    async fn list_swaps(&self) -> Result<Vec<SwapDto>> {
        super::swaps::list_swaps(self).await
    }

    async fn get_swap(&self, id: i64) -> Result<SwapDetailResponse> {
        super::swaps::get_swap(self, id).await
    }

    async fn create_swap(&self, request: CreateSwapRequest) -> Result<SwapDto> {
        super::swaps::create_swap(self, &request).await
    }

    async fn update_swap_status(&self, id: i64, status: SwapStatus) -> Result<SwapDto> {
        super::swaps::update_status(self, id, status).await
    }

    async fn add_message(&self, id: i64, text: String) -> Result<Vec<SwapMessageDto>> {
        super::swaps::add_message(self, id, text).await
    }

    async fn pending_items(&self) -> Result<Vec<ItemDto>> {
        super::admin::pending_items(self).await
    }

    async fn approve_item(&self, id: i64) -> Result<ItemDto> {
        super::admin::approve_item(self, id).await
    }

    async fn reject_item(&self, id: i64) -> Result<ItemDto> {
        super::admin::reject_item(self, id).await
    }

    async fn admin_delete_item(&self, id: i64) -> Result<()> {
        super::admin::delete_item(self, id).await
    }

    async fn list_users(&self) -> Result<Vec<UserDto>> {
        super::admin::list_users(self).await
    }

    async fn toggle_admin(&self, user_id: i64) -> Result<UserDto> {
        super::admin::toggle_admin(self, user_id).await
    }

    async fn stats(&self) -> Result<StatsResponse> {
        super::admin::stats(self).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_protected_call_requires_token() {
        let api = ApiClient::new("http://localhost:5000/");
        assert_eq!(api.url("/api/items"), "http://localhost:5000/api/items");
        assert!(matches!(
            api.authed(Method::GET, "/api/swaps"),
            Err(ClientError::NotSignedIn)
        ));

        api.set_token(Some("abc".to_string()));
        assert!(api.is_signed_in());
        assert!(api.authed(Method::GET, "/api/swaps").is_ok());
    }
}
