//! # Swap Handlers
//!
//! - `POST /api/swaps` - request a swap
//! - `GET /api/swaps` - caller's swaps as requester or owner
//! - `GET /api/swaps/{id}` - populated detail (participants)
//! - `POST /api/swaps/{id}/message` - append to the thread (participants)
//! - `PUT /api/swaps/{id}/status` - accept, reject, complete or cancel

use crate::handlers::{json_body, parse_id};
use crate::middleware::CurrentUser;
use crate::services::SwapService;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::{Extension, Json};
use lib_core::Result;
use shared::{
    AddMessageRequest, CreateSwapRequest, SwapDetailResponse, SwapDto, SwapMessageDto,
    UpdateSwapStatusRequest,
};
use tracing::instrument;

#[instrument(skip_all, fields(user_id = user.id))]
pub async fn create_swap(
    State(swaps): State<SwapService>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    payload: std::result::Result<Json<CreateSwapRequest>, JsonRejection>,
) -> Result<Json<SwapDto>> {
    let req = json_body(payload)?;
    let swap = swaps.create(user.id, req).await?;
    Ok(Json(swap.into()))
}

pub async fn list_swaps(
    State(swaps): State<SwapService>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Result<Json<Vec<SwapDto>>> {
    let list = swaps.list_for_user(user.id).await?;
    Ok(Json(list.into_iter().map(Into::into).collect()))
}

pub async fn get_swap(
    State(swaps): State<SwapService>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> Result<Json<SwapDetailResponse>> {
    let detail = swaps.detail(user.id, parse_id(&id)?).await?;
    Ok(Json(detail))
}

#[instrument(skip_all, fields(user_id = user.id, swap_id = %id))]
pub async fn add_message(
    State(swaps): State<SwapService>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(id): Path<String>,
    payload: std::result::Result<Json<AddMessageRequest>, JsonRejection>,
) -> Result<Json<Vec<SwapMessageDto>>> {
    let id = parse_id(&id)?;
    let req = json_body(payload)?;
    let thread = swaps.add_message(user.id, id, &req.text).await?;
    Ok(Json(thread.into_iter().map(Into::into).collect()))
}

#[instrument(skip_all, fields(user_id = user.id, swap_id = %id))]
pub async fn update_status(
    State(swaps): State<SwapService>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(id): Path<String>,
    payload: std::result::Result<Json<UpdateSwapStatusRequest>, JsonRejection>,
) -> Result<Json<SwapDto>> {
    let id = parse_id(&id)?;
    let req = json_body(payload)?;
    let swap = swaps.update_status(user.id, id, &req.status).await?;
    Ok(Json(swap.into()))
}
