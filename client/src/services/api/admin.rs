//! # Admin Endpoints
//!
//! All of these need a token for a user with the admin flag.

use super::client::ApiClient;
use crate::core::error::Result;
use reqwest::Method;
use shared::{ItemDto, MessageResponse, StatsResponse, UserDto};

pub async fn pending_items(client: &ApiClient) -> Result<Vec<ItemDto>> {
    let request = client.authed(Method::GET, "/api/admin/items/pending")?;
    client.send(request, "pending_items").await
}

#[tracing::instrument(skip(client))]
pub async fn approve_item(client: &ApiClient, id: i64) -> Result<ItemDto> {
    let path = format!("/api/admin/items/{}/approve", id);
    client.send(client.authed(Method::PUT, &path)?, "approve_item").await
}

#[tracing::instrument(skip(client))]
pub async fn reject_item(client: &ApiClient, id: i64) -> Result<ItemDto> {
    let path = format!("/api/admin/items/{}/reject", id);
    client.send(client.authed(Method::PUT, &path)?, "reject_item").await
}

#[tracing::instrument(skip(client))]
pub async fn delete_item(client: &ApiClient, id: i64) -> Result<()> {
    let path = format!("/api/admin/items/{}", id);
    client
        .send::<MessageResponse>(client.authed(Method::DELETE, &path)?, "admin_delete_item")
        .await?;
    Ok(())
}

pub async fn list_users(client: &ApiClient) -> Result<Vec<UserDto>> {
    let request = client.authed(Method::GET, "/api/admin/users")?;
    client.send(request, "list_users").await
}

#[tracing::instrument(skip(client))]
pub async fn toggle_admin(client: &ApiClient, user_id: i64) -> Result<UserDto> {
    let path = format!("/api/admin/users/{}/admin", user_id);
    client.send(client.authed(Method::PUT, &path)?, "toggle_admin").await
}

pub async fn stats(client: &ApiClient) -> Result<StatsResponse> {
    let request = client.authed(Method::GET, "/api/admin/stats")?;
    client.send(request, "stats").await
}
