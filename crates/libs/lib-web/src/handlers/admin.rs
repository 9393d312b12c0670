//! # Admin Handlers
//!
//! Every route here sits behind `require_auth` and `require_admin`.

use crate::handlers::parse_id;
use crate::middleware::CurrentUser;
use crate::services::AdminService;
use axum::extract::{Path, State};
use axum::{Extension, Json};
use lib_core::Result;
use shared::{ItemDto, MessageResponse, StatsResponse, UserDto};

pub async fn pending_items(State(admin): State<AdminService>) -> Result<Json<Vec<ItemDto>>> {
    let list = admin.pending_items().await?;
    Ok(Json(list.into_iter().map(Into::into).collect()))
}

pub async fn approve_item(
    State(admin): State<AdminService>,
    Path(id): Path<String>,
) -> Result<Json<ItemDto>> {
    let item = admin.approve_item(parse_id(&id)?).await?;
    Ok(Json(item.into()))
}

pub async fn reject_item(
    State(admin): State<AdminService>,
    Path(id): Path<String>,
) -> Result<Json<ItemDto>> {
    let item = admin.reject_item(parse_id(&id)?).await?;
    Ok(Json(item.into()))
}

pub async fn delete_item(
    State(admin): State<AdminService>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>> {
    admin.delete_item(parse_id(&id)?).await?;
    Ok(Json(MessageResponse::new("Item removed")))
}

pub async fn list_users(State(admin): State<AdminService>) -> Result<Json<Vec<UserDto>>> {
    let users = admin.users().await?;
    Ok(Json(users.into_iter().map(Into::into).collect()))
}

pub async fn toggle_admin(
    State(admin): State<AdminService>,
    Extension(CurrentUser(actor)): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> Result<Json<UserDto>> {
    let user = admin.toggle_admin(actor.id, parse_id(&id)?).await?;
    Ok(Json(user.into()))
}

pub async fn stats(State(admin): State<AdminService>) -> Result<Json<StatsResponse>> {
    Ok(Json(admin.stats().await?))
}
