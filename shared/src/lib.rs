//! # Shared Data Transfer Objects Library
//!
//! This library defines the contract between the client and the backend API.
//! All DTOs use JSON serialization via `serde` for API communication.
//!
//! ## Structure
//!
//! - **[`types`]**: Domain enums (category, condition, item/swap status)
//! - **[`dto`]**: Data Transfer Objects for API communication
//!   - **[`dto::auth`]**: Current-user profile and error bodies
//!   - **[`dto::items`]**: Listing create/update/read bodies
//!   - **[`dto::swaps`]**: Swap requests, status changes, messages
//!   - **[`dto::admin`]**: Moderation and platform statistics
//!
//! ## Wire Format
//!
//! Request and response bodies use **camelCase** keys (`requestedItem`,
//! `isPointsSwap`, `pointValue`). Enums serialize to the exact labels the
//! API exposes (`"New with tags"`, `"pending"`).
//!
//! ## Usage in Backend
//!
//! ```rust,ignore
//! use shared::dto::items::{CreateItemRequest, ItemDto};
//! use axum::Json;
//!
//! async fn create(Json(request): Json<CreateItemRequest>) -> Json<ItemDto> {
//!     # todo!()
//! }
//! ```

pub mod dto;
pub mod types;

// Note: Wildcard re-exports are used here since shared is a DTO library
// where all exports are meant to be public API
pub use dto::*;
pub use types::*;
