//! # Request Stamping Middleware
//!
//! Gives every request an id, stored in the request extensions as a
//! [`RequestStamp`] and echoed back in the `X-Request-ID` response header.
//! A well-formed id sent by the client is kept so client and server logs
//! line up; anything else is replaced by a fresh UUID.

use axum::{extract::Request, http::HeaderValue, middleware::Next, response::Response};
use std::time::Instant;
use uuid::Uuid;

/// Header carrying the request id, in both directions.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

const MAX_CLIENT_ID_LEN: usize = 64;

/// Request metadata for tracing.
#[derive(Clone, Debug)]
pub struct RequestStamp {
    pub id: String,
    /// When the request entered the stack
    pub received_at: Instant,
}

fn client_id(req: &Request) -> Option<String> {
    let id = req.headers().get(REQUEST_ID_HEADER)?.to_str().ok()?.trim();
    let well_formed = !id.is_empty()
        && id.len() <= MAX_CLIENT_ID_LEN
        && id.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    well_formed.then(|| id.to_string())
}

pub async fn stamp_req(mut req: Request, next: Next) -> Response {
    let stamp = RequestStamp {
        id: client_id(&req).unwrap_or_else(|| Uuid::new_v4().to_string()),
        received_at: Instant::now(),
    };
    req.extensions_mut().insert(stamp.clone());

    let mut res = next.run(req).await;

    if let Ok(value) = HeaderValue::from_str(&stamp.id) {
        res.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    res
}
