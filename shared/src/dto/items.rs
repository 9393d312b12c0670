//! # Listing Data Transfer Objects
//!
//! ## Endpoints Using These DTOs
//!
//! - `POST /api/items` - [`CreateItemRequest`] -> [`ItemDto`]
//! - `GET /api/items` - approved listings -> `Vec<ItemDto>`
//! - `GET /api/items/user` - caller's listings, any status -> `Vec<ItemDto>`
//! - `GET /api/items/{id}` - -> [`ItemDto`]
//! - `PUT /api/items/{id}` - [`UpdateItemRequest`] -> [`ItemDto`]
//!
//! Enumerated fields (`category`, `condition`, `gender`) travel as plain
//! strings in requests so that an unknown label is reported as a field
//! validation error alongside any other problems in the same form.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{Category, Condition, Gender, ItemStatus};

/// A clothing listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemDto {
    pub id: i64,
    pub owner_id: i64,
    pub title: String,
    pub description: String,
    pub category: Category,
    pub condition: Condition,
    pub size: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    /// Ordered image references (http(s) or data URLs), never empty
    pub images: Vec<String>,
    pub point_value: i64,
    pub status: ItemStatus,
    pub created_at: DateTime<Utc>,
}

/// Body of `POST /api/items`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateItemRequest {
    pub title: String,
    pub description: String,
    pub category: String,
    pub condition: String,
    pub size: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    pub images: Vec<String>,
    /// Defaults to the configured point value (50) when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub point_value: Option<i64>,
}

/// Body of `PUT /api/items/{id}`. Only supplied fields change; an empty
/// `gender` or `brand` clears that field.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateItemRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub point_value: Option<i64>,
}
