//! # Swap Endpoints

use super::client::ApiClient;
use crate::core::error::Result;
use reqwest::Method;
use shared::{
    AddMessageRequest, CreateSwapRequest, SwapDetailResponse, SwapDto, SwapMessageDto, SwapStatus,
    UpdateSwapStatusRequest,
};

pub async fn list_swaps(client: &ApiClient) -> Result<Vec<SwapDto>> {
    let request = client.authed(Method::GET, "/api/swaps")?;
    client.send(request, "list_swaps").await
}

pub async fn get_swap(client: &ApiClient, id: i64) -> Result<SwapDetailResponse> {
    let path = format!("/api/swaps/{}", id);
    let request = client.authed(Method::GET, &path)?;
    client.send(request, "get_swap").await
}

#[tracing::instrument(skip(client, request), fields(requested_item = ?request.requested_item))]
pub async fn create_swap(client: &ApiClient, request: &CreateSwapRequest) -> Result<SwapDto> {
    let builder = client.authed(Method::POST, "/api/swaps")?.json(request);
    client.send(builder, "create_swap").await
}

#[tracing::instrument(skip(client))]
pub async fn update_status(client: &ApiClient, id: i64, status: SwapStatus) -> Result<SwapDto> {
    let path = format!("/api/swaps/{}/status", id);
    let builder = client
        .authed(Method::PUT, &path)?
        .json(&UpdateSwapStatusRequest::new(status));
    client.send(builder, "update_swap_status").await
}

#[tracing::instrument(skip(client, text))]
pub async fn add_message(client: &ApiClient, id: i64, text: String) -> Result<Vec<SwapMessageDto>> {
    let path = format!("/api/swaps/{}/message", id);
    let builder = client
        .authed(Method::POST, &path)?
        .json(&AddMessageRequest { text });
    client.send(builder, "add_message").await
}
