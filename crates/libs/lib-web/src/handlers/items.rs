//! # Item Handlers
//!
//! - `GET /api/items` - approved listings (public)
//! - `GET /api/items/{id}` - one listing (public)
//! - `POST /api/items` - create, starts `pending`
//! - `GET /api/items/user` - caller's listings, any status
//! - `PUT /api/items/{id}` - partial update by the owner
//! - `DELETE /api/items/{id}` - owner or admin

use crate::handlers::{json_body, parse_id};
use crate::middleware::CurrentUser;
use crate::services::ItemService;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::{Extension, Json};
use lib_core::Result;
use shared::{CreateItemRequest, ItemDto, MessageResponse, UpdateItemRequest};
use tracing::instrument;

pub async fn list_items(State(items): State<ItemService>) -> Result<Json<Vec<ItemDto>>> {
    let list = items.list_approved().await?;
    Ok(Json(list.into_iter().map(Into::into).collect()))
}

pub async fn get_item(
    State(items): State<ItemService>,
    Path(id): Path<String>,
) -> Result<Json<ItemDto>> {
    let item = items.get(parse_id(&id)?).await?;
    Ok(Json(item.into()))
}

#[instrument(skip_all, fields(user_id = user.id))]
pub async fn create_item(
    State(items): State<ItemService>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    payload: std::result::Result<Json<CreateItemRequest>, JsonRejection>,
) -> Result<Json<ItemDto>> {
    let req = json_body(payload)?;
    let item = items.create(user.id, req).await?;
    Ok(Json(item.into()))
}

pub async fn my_items(
    State(items): State<ItemService>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Result<Json<Vec<ItemDto>>> {
    let list = items.list_for_owner(user.id).await?;
    Ok(Json(list.into_iter().map(Into::into).collect()))
}

#[instrument(skip_all, fields(user_id = user.id, item_id = %id))]
pub async fn update_item(
    State(items): State<ItemService>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(id): Path<String>,
    payload: std::result::Result<Json<UpdateItemRequest>, JsonRejection>,
) -> Result<Json<ItemDto>> {
    let id = parse_id(&id)?;
    let req = json_body(payload)?;
    let item = items.update(user.id, id, req).await?;
    Ok(Json(item.into()))
}

#[instrument(skip_all, fields(user_id = user.id, item_id = %id))]
pub async fn delete_item(
    State(items): State<ItemService>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>> {
    items.delete(&user, parse_id(&id)?).await?;
    Ok(Json(MessageResponse::new("Item removed")))
}
