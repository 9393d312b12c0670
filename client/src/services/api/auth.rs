//! # Profile Endpoint

use super::client::ApiClient;
use crate::core::error::Result;
use reqwest::Method;
use shared::UserDto;

/// `GET /api/auth`
#[tracing::instrument(skip(client))]
pub async fn current_user(client: &ApiClient) -> Result<UserDto> {
    let request = client.authed(Method::GET, "/api/auth")?;
    client.send(request, "current_user").await
}
