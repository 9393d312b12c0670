//! # Authentication Middleware
//!
//! [`require_auth`] resolves the `Authorization: Bearer <token>` header to a
//! stored user and injects it as [`CurrentUser`]. [`require_admin`] runs after
//! it and rejects callers without the admin flag.
//!
//! ```rust,ignore
//! let admin_routes = Router::new()
//!     .route("/api/admin/stats", get(stats))
//!     .route_layer(from_fn(require_admin))
//!     .route_layer(from_fn_with_state(state.clone(), require_auth));
//! ```
//!
//! Handlers extract the caller with `Extension(CurrentUser(user))`.

use crate::server::AppState;
use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use lib_auth::decode_jwt;
use lib_core::model::store::{User, UserRepository};
use lib_core::AppError;
use tracing::{debug, warn};

/// The authenticated caller, loaded fresh from the store on every request.
#[derive(Clone, Debug)]
pub struct CurrentUser(pub User);

/// Authentication middleware that validates bearer tokens.
///
/// A missing or malformed header, a bad or expired token, and a token for a
/// user that no longer exists all answer `401 Unauthorized`.
pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| {
            warn!("[AUTH] Missing Authorization header");
            AppError::Unauthorized("Missing bearer token".to_string())
        })?;

    let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
        warn!("[AUTH] Invalid Authorization header format");
        AppError::Unauthorized("Invalid Authorization header format".to_string())
    })?;

    let claims = decode_jwt(token, &state.config.jwt_secret).map_err(|e| {
        warn!("[AUTH] JWT validation failed: {}", e);
        AppError::Unauthorized("Invalid or expired token".to_string())
    })?;

    let user_id = claims
        .user_id()
        .map_err(|_| AppError::Unauthorized("Invalid token subject".to_string()))?;

    let user = UserRepository::find_by_id(&state.db, user_id)
        .await?
        .ok_or_else(|| {
            warn!("[AUTH] Token for unknown user {}", user_id);
            AppError::Unauthorized("User no longer exists".to_string())
        })?;

    debug!("[AUTH] Authenticated user: {} (id: {})", user.name, user.id);

    req.extensions_mut().insert(CurrentUser(user));

    Ok(next.run(req).await)
}

/// Admin gate. Must be layered inside [`require_auth`].
pub async fn require_admin(req: Request, next: Next) -> Result<Response, AppError> {
    let Some(CurrentUser(user)) = req.extensions().get::<CurrentUser>() else {
        return Err(AppError::Unauthorized("Authentication required".to_string()));
    };

    if !user.is_admin {
        warn!("[AUTH] User {} denied admin route {}", user.id, req.uri().path());
        return Err(AppError::Forbidden("Admin access required".to_string()));
    }

    Ok(next.run(req).await)
}
