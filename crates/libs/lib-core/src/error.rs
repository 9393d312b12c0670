//! # Centralized Error Handling
//!
//! [`AppError`] is the single error type shared by repositories, services and
//! handlers. Every variant maps to one HTTP status and one stable `code`:
//!
//! | Variant             | Status | `code`              |
//! |---------------------|--------|---------------------|
//! | `InvalidInput`      | 400    | `InvalidInput`      |
//! | `Validation`        | 400    | `InvalidInput`      |
//! | `Unauthorized`      | 401    | `Unauthorized`      |
//! | `Forbidden`         | 403    | `Forbidden`         |
//! | `NotFound`          | 404    | `NotFound`          |
//! | `InvalidState`      | 400    | `InvalidState`      |
//! | `InsufficientFunds` | 400    | `InsufficientFunds` |
//! | `Conflict`          | 409    | `Conflict`          |
//! | `Config`/`Internal` | 500    | `ServerFault`       |
//!
//! Server faults never leak their detail to the client; it is logged instead.
//!
//! ```rust
//! use lib_core::error::{AppError, Result};
//!
//! fn require_title(title: &str) -> Result<()> {
//!     if title.trim().is_empty() {
//!         return Err(AppError::InvalidInput("Title is required".to_string()));
//!     }
//!     Ok(())
//! }
//! ```

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use shared::{ErrorResponse, FieldError};
use thiserror::Error;

/// Convenience type alias for `Result<T, AppError>`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Application-wide error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration error during startup or environment loading.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Malformed request: bad id, unknown label, wrong shape.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// One or more form fields failed validation.
    #[error("Validation failed: {} field(s)", .0.len())]
    Validation(Vec<FieldError>),

    /// Missing, malformed or expired credential, or an unknown user.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Authenticated, but not allowed to act on this resource.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Requested resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The resource exists but is not in a state that permits the operation.
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Point balance too low for the requested debit.
    #[error("Insufficient funds: {0}")]
    InsufficientFunds(String),

    /// Lost a race against a concurrent change.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Unexpected failure (storage, serialization).
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidInput(_)
            | AppError::Validation(_)
            | AppError::InvalidState(_)
            | AppError::InsufficientFunds(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Config(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Stable machine-readable error code.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::InvalidInput(_) | AppError::Validation(_) => "InvalidInput",
            AppError::Unauthorized(_) => "Unauthorized",
            AppError::Forbidden(_) => "Forbidden",
            AppError::NotFound(_) => "NotFound",
            AppError::InvalidState(_) => "InvalidState",
            AppError::InsufficientFunds(_) => "InsufficientFunds",
            AppError::Conflict(_) => "Conflict",
            AppError::Config(_) | AppError::Internal(_) => "ServerFault",
        }
    }

    /// Get a user-friendly error message.
    ///
    /// Server faults return a generic message.
    pub fn user_message(&self) -> String {
        match self {
            AppError::InvalidInput(msg)
            | AppError::Unauthorized(msg)
            | AppError::Forbidden(msg)
            | AppError::NotFound(msg)
            | AppError::InvalidState(msg)
            | AppError::InsufficientFunds(msg)
            | AppError::Conflict(msg) => msg.clone(),
            AppError::Validation(errors) => match errors.as_slice() {
                [only] => only.message.clone(),
                _ => "Validation failed".to_string(),
            },
            AppError::Config(_) | AppError::Internal(_) => "An internal error occurred".to_string(),
        }
    }

    /// Build the JSON body sent to the client.
    pub fn to_error_response(&self) -> ErrorResponse {
        ErrorResponse {
            error: self.user_message(),
            code: self.code().to_string(),
            errors: match self {
                AppError::Validation(errors) => Some(errors.clone()),
                _ => None,
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!("Server error: {}", self);
        } else {
            tracing::debug!("Client error: {}", self);
        }

        let mut response = (status, Json(self.to_error_response())).into_response();
        response.extensions_mut().insert(ErrorKind(self.code()));
        response
    }
}

/// Error kind attached to error responses so outer middleware can log it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrorKind(pub &'static str);

/// Field failures gathered by `lib_utils::Validator`.
impl From<Vec<(String, String)>> for AppError {
    fn from(errors: Vec<(String, String)>) -> Self {
        AppError::Validation(
            errors
                .into_iter()
                .map(|(field, message)| FieldError::new(field, message))
                .collect(),
        )
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => AppError::NotFound("Database record not found".to_string()),
            sqlx::Error::Database(db_err) => {
                let message = db_err.message().to_string();
                if db_err.is_unique_violation() {
                    AppError::Conflict(format!("Duplicate record: {}", message))
                } else if db_err.is_check_violation() && message.contains("points >= 0") {
                    AppError::InsufficientFunds("Insufficient points".to_string())
                } else {
                    AppError::Internal(format!("Database error: {}", message))
                }
            }
            _ => AppError::Internal(format!("Database error: {}", err)),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for AppError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        AppError::Internal(format!("Migration error: {}", err))
    }
}

impl From<shared::ParseEnumError> for AppError {
    fn from(err: shared::ParseEnumError) -> Self {
        AppError::Internal(format!("Corrupt stored value: {}", err))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Internal(format!("JSON error: {}", err))
    }
}
