//! # Profile and Error Data Transfer Objects
//!
//! Account issuance lives outside this system; the API only exposes the
//! caller's own profile and a uniform error body.
//!
//! ## Error Body
//!
//! Every failing request answers with:
//!
//! ```text
//! {
//!   "error": "Not enough points for this swap",
//!   "code": "InsufficientFunds"
//! }
//! ```
//!
//! Form validation failures add the full list of field problems:
//!
//! ```text
//! {
//!   "error": "Validation failed",
//!   "code": "InvalidInput",
//!   "errors": [
//!     { "field": "title", "message": "Title is required" },
//!     { "field": "images", "message": "At least one image is required" }
//!   ]
//! }
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Public profile of a user as seen by the user themself or by an admin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub points: i64,
    pub is_admin: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Reduced profile embedded in swap details.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub id: i64,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

/// A single field-level validation problem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Standard error response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable message
    pub error: String,
    /// Machine-readable kind (`NotFound`, `Forbidden`, `InvalidState`, ...)
    pub code: String,
    /// Every field problem when the request failed validation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<FieldError>>,
}

/// Plain acknowledgement body (`{"msg": "Item removed"}`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub msg: String,
}

impl MessageResponse {
    pub fn new(msg: impl Into<String>) -> Self {
        Self { msg: msg.into() }
    }
}
