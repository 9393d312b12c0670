//! # Service Traits
//!
//! [`ApiService`] is everything the controller needs from the backend. The
//! HTTP implementation lives in [`crate::services::api::ApiClient`]; tests
//! substitute an in-memory mock.

use super::error::Result;
use async_trait::async_trait;
use shared::{
    CreateItemRequest, CreateSwapRequest, ItemDto, StatsResponse, SwapDetailResponse, SwapDto,
    SwapMessageDto, SwapStatus, UpdateItemRequest, UserDto,
};

#[async_trait]
pub trait ApiService: Send + Sync {
    // region: --- Profile
    /// The signed-in user's profile, including the point balance.
    async fn current_user(&self) -> Result<UserDto>;
    // endregion: --- Profile

    // region: --- Items
    /// Approved listings, newest first.
    async fn list_items(&self) -> Result<Vec<ItemDto>>;

    /// The caller's own listings in every status.
    async fn my_items(&self) -> Result<Vec<ItemDto>>;

    async fn get_item(&self, id: i64) -> Result<ItemDto>;

    async fn create_item(&self, request: CreateItemRequest) -> Result<ItemDto>;

    async fn update_item(&self, id: i64, request: UpdateItemRequest) -> Result<ItemDto>;

    async fn delete_item(&self, id: i64) -> Result<()>;
    // endregion: --- Items

    // region: --- Swaps
    /// Swaps where the caller is requester or owner.
    async fn list_swaps(&self) -> Result<Vec<SwapDto>>;

    async fn get_swap(&self, id: i64) -> Result<SwapDetailResponse>;

    async fn create_swap(&self, request: CreateSwapRequest) -> Result<SwapDto>;

    async fn update_swap_status(&self, id: i64, status: SwapStatus) -> Result<SwapDto>;

    /// Append a message; returns the whole thread.
    async fn add_message(&self, id: i64, text: String) -> Result<Vec<SwapMessageDto>>;
    // endregion: --- Swaps

    // region: --- Admin
    async fn pending_items(&self) -> Result<Vec<ItemDto>>;

    async fn approve_item(&self, id: i64) -> Result<ItemDto>;

    async fn reject_item(&self, id: i64) -> Result<ItemDto>;

    async fn admin_delete_item(&self, id: i64) -> Result<()>;

    async fn list_users(&self) -> Result<Vec<UserDto>>;

    async fn toggle_admin(&self, user_id: i64) -> Result<UserDto>;

    async fn stats(&self) -> Result<StatsResponse>;
    // endregion: --- Admin
}
