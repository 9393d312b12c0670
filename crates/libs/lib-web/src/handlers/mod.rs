//! # HTTP Request Handlers
//!
//! Thin axum handlers: extract, call a service, map to a DTO. Business
//! rules live in [`crate::services`].
//!
//! - **[`auth`]**: `GET /api/auth` (caller profile)
//! - **[`items`]**: listing browse and CRUD under `/api/items`
//! - **[`swaps`]**: swap requests, messages and transitions under `/api/swaps`
//! - **[`admin`]**: moderation under `/api/admin` (admin only)
//!
//! Protected handlers take the caller as `Extension<CurrentUser>`, inserted
//! by `require_auth`. Every failure is an `AppError`, so clients always see
//! the `{"error", "code"}` body, including for malformed ids and JSON.

use axum::extract::rejection::JsonRejection;
use axum::Json;
use lib_core::{AppError, Result};

pub mod admin;
pub mod auth;
pub mod items;
pub mod swaps;

#[cfg(test)]
mod tests;

/// Parse a path id, answering `InvalidInput` instead of axum's plain-text 400.
pub(crate) fn parse_id(raw: &str) -> Result<i64> {
    raw.parse::<i64>()
        .map_err(|_| AppError::InvalidInput(format!("Invalid id: {}", raw)))
}

/// Unwrap a JSON body, mapping axum's rejection to `InvalidInput`.
pub(crate) fn json_body<T>(payload: std::result::Result<Json<T>, JsonRejection>) -> Result<T> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| AppError::InvalidInput(rejection.body_text()))
}

/// Fallback for unmatched routes.
pub async fn not_found() -> AppError {
    AppError::NotFound("Route not found".to_string())
}
