//! # Request/Response Logging Middleware
//!
//! One structured line per request and one per response, correlated by the
//! request id from [`RequestStamp`]. Error responses also carry the error
//! kind (`InvalidState`, `Conflict`, ...). Credential headers are redacted.

use crate::middleware::mw_req_stamp::RequestStamp;
use axum::{extract::Request, http::HeaderMap, middleware::Next, response::Response};
use lib_core::ErrorKind;
use tracing::{debug, error, info, warn};

/// Headers whose values never reach the log.
const SENSITIVE_HEADERS: &[&str] = &["authorization", "cookie", "x-api-key", "x-auth-token"];

fn redacted(headers: &HeaderMap) -> Vec<(String, String)> {
    headers
        .iter()
        .filter_map(|(name, value)| {
            if SENSITIVE_HEADERS.contains(&name.as_str()) {
                Some((name.to_string(), "***REDACTED***".to_string()))
            } else {
                value.to_str().ok().map(|v| (name.to_string(), v.to_string()))
            }
        })
        .collect()
}

/// Request/response logging middleware. Must run inside [`super::stamp_req`].
pub async fn log_requests(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let stamp = req.extensions().get::<RequestStamp>().cloned();
    let request_id = stamp.as_ref().map_or("unknown", |s| s.id.as_str()).to_string();

    info!(request_id = %request_id, query = ?req.uri().query(), "[REQUEST] {} {}", method, path);
    debug!(request_id = %request_id, headers = ?redacted(req.headers()), "[REQUEST HEADERS]");

    let response = next.run(req).await;

    let duration_ms = stamp.map_or(0, |s| s.received_at.elapsed().as_millis());
    let status = response.status().as_u16();
    let kind = response.extensions().get::<ErrorKind>().map(|k| k.0);

    match status {
        500.. => error!(
            request_id = %request_id, status, duration_ms, kind,
            "[RESPONSE] {} {} -> {} ({}ms)", method, path, status, duration_ms
        ),
        400..=499 => warn!(
            request_id = %request_id, status, duration_ms, kind,
            "[RESPONSE] {} {} -> {} ({}ms)", method, path, status, duration_ms
        ),
        _ => info!(
            request_id = %request_id, status, duration_ms,
            "[RESPONSE] {} {} -> {} ({}ms)", method, path, status, duration_ms
        ),
    }

    response
}
