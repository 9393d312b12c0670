//! # Data Transfer Objects (DTOs)
//!
//! This module contains all data structures used for communication between
//! the client and backend via the REST API.
//!
//! ## Module Organization
//!
//! - [`auth`] - Current user profile, error responses
//! - [`items`] - Clothing listings
//! - [`swaps`] - Swap requests and their messages
//! - [`admin`] - Moderation views and statistics
//!
//! ## Serialization Format
//!
//! - **Field naming**: camelCase (`#[serde(rename_all = "camelCase")]`)
//! - **Optional fields**: Omitted when `None` using `#[serde(skip_serializing_if = "Option::is_none")]`
//! - **Request bodies**: fields default when absent so validation can report
//!   every missing field at once instead of failing on the first one
//!
//! ## Example JSON Communication
//!
//! ```text
//! POST /api/swaps
//! Authorization: Bearer eyJhbGciOi...
//! Content-Type: application/json
//!
//! {
//!   "requestedItem": 7,
//!   "isPointsSwap": true,
//!   "message": "Would love this jacket!"
//! }
//! ```
//!
//! ```text
//! HTTP/1.1 200 OK
//!
//! {
//!   "id": 3,
//!   "requesterId": 2,
//!   "ownerId": 1,
//!   "requestedItemId": 7,
//!   "isPointsSwap": true,
//!   "pointsAmount": 50,
//!   "status": "pending",
//!   "messages": [ { "senderId": 2, "text": "Would love this jacket!", "createdAt": "..." } ],
//!   "createdAt": "..."
//! }
//! ```

pub mod admin;
pub mod auth;
pub mod items;
pub mod swaps;

pub use admin::*;
pub use auth::*;
pub use items::*;
pub use swaps::*;
