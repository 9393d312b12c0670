//! # Item Endpoints

use super::client::ApiClient;
use crate::core::error::Result;
use reqwest::Method;
use shared::{CreateItemRequest, ItemDto, MessageResponse, UpdateItemRequest};

pub async fn list_items(client: &ApiClient) -> Result<Vec<ItemDto>> {
    client
        .send(client.public(Method::GET, "/api/items"), "list_items")
        .await
}

pub async fn get_item(client: &ApiClient, id: i64) -> Result<ItemDto> {
    let path = format!("/api/items/{}", id);
    client.send(client.public(Method::GET, &path), "get_item").await
}

pub async fn my_items(client: &ApiClient) -> Result<Vec<ItemDto>> {
    let request = client.authed(Method::GET, "/api/items/user")?;
    client.send(request, "my_items").await
}

#[tracing::instrument(skip(client, request), fields(title = %request.title))]
pub async fn create_item(client: &ApiClient, request: &CreateItemRequest) -> Result<ItemDto> {
    let builder = client.authed(Method::POST, "/api/items")?.json(request);
    client.send(builder, "create_item").await
}

#[tracing::instrument(skip(client, request))]
pub async fn update_item(
    client: &ApiClient,
    id: i64,
    request: &UpdateItemRequest,
) -> Result<ItemDto> {
    let path = format!("/api/items/{}", id);
    let builder = client.authed(Method::PUT, &path)?.json(request);
    client.send(builder, "update_item").await
}

#[tracing::instrument(skip(client))]
pub async fn delete_item(client: &ApiClient, id: i64) -> Result<()> {
    let path = format!("/api/items/{}", id);
    let request = client.authed(Method::DELETE, &path)?;
    client.send::<MessageResponse>(request, "delete_item").await?;
    Ok(())
}
