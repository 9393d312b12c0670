//! # Swap Data Transfer Objects
//!
//! ## Endpoints Using These DTOs
//!
//! - `POST /api/swaps` - [`CreateSwapRequest`] -> [`SwapDto`]
//! - `GET /api/swaps` - caller's swaps -> `Vec<SwapDto>`
//! - `GET /api/swaps/{id}` - -> [`SwapDetailResponse`]
//! - `POST /api/swaps/{id}/message` - [`AddMessageRequest`] -> `Vec<SwapMessageDto>`
//! - `PUT /api/swaps/{id}/status` - [`UpdateSwapStatusRequest`] -> [`SwapDto`]
//!
//! ## Offer Shapes
//!
//! A swap is either item-for-item or item-for-points:
//!
//! ```text
//! { "requestedItem": 7, "offeredItem": 9, "isPointsSwap": false }
//! { "requestedItem": 7, "isPointsSwap": true }
//! ```
//!
//! The points amount is never taken from the client; the server copies the
//! requested listing's point value.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::dto::auth::UserSummary;
use crate::dto::items::ItemDto;
use crate::types::SwapStatus;

/// One message on a swap thread.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapMessageDto {
    pub sender_id: i64,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

/// A swap request with its message thread in send order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapDto {
    pub id: i64,
    pub requester_id: i64,
    pub owner_id: i64,
    pub requested_item_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offered_item_id: Option<i64>,
    pub is_points_swap: bool,
    pub points_amount: i64,
    pub status: SwapStatus,
    pub messages: Vec<SwapMessageDto>,
    pub created_at: DateTime<Utc>,
}

/// A swap with the listings and participants it references.
///
/// Listings are optional because an owner may delete a listing that an
/// old swap still points at.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapDetailResponse {
    #[serde(flatten)]
    pub swap: SwapDto,
    pub requested_item: Option<ItemDto>,
    pub offered_item: Option<ItemDto>,
    pub requester: UserSummary,
    pub owner: UserSummary,
}

/// Body of `POST /api/swaps`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateSwapRequest {
    pub requested_item: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offered_item: Option<i64>,
    pub is_points_swap: Option<bool>,
    /// Optional opening message from the requester
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl CreateSwapRequest {
    pub fn for_points(requested_item: i64) -> Self {
        Self {
            requested_item: Some(requested_item),
            offered_item: None,
            is_points_swap: Some(true),
            message: None,
        }
    }

    pub fn for_item(requested_item: i64, offered_item: i64) -> Self {
        Self {
            requested_item: Some(requested_item),
            offered_item: Some(offered_item),
            is_points_swap: Some(false),
            message: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

/// Body of `POST /api/swaps/{id}/message`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AddMessageRequest {
    pub text: String,
}

/// Body of `PUT /api/swaps/{id}/status`.
///
/// `status` stays a string on the wire so unknown values surface as
/// `InvalidInput` rather than a body rejection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UpdateSwapStatusRequest {
    pub status: String,
}

impl UpdateSwapStatusRequest {
    pub fn new(status: SwapStatus) -> Self {
        Self {
            status: status.to_string(),
        }
    }
}
