//! # Auth Handlers
//!
//! Tokens are issued outside this service; the API only reports who the
//! bearer is.

use crate::middleware::CurrentUser;
use axum::{Extension, Json};
use shared::UserDto;

/// `GET /api/auth` - the caller's profile, balance and role.
pub async fn current_user(Extension(CurrentUser(user)): Extension<CurrentUser>) -> Json<UserDto> {
    Json(user.into())
}
