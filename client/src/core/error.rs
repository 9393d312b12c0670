//! # Client Errors
//!
//! Failures seen by the client, either before a response arrives or as the
//! server's structured error body.

use shared::{ErrorResponse, FieldError};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ClientError {
    /// Connection refused, timeout, DNS.
    #[error("Network error: {0}")]
    Network(String),

    /// The server answered with an error body.
    #[error("{message}")]
    Api {
        status: u16,
        /// Machine-readable kind, e.g. `InvalidState`
        code: String,
        message: String,
        fields: Vec<FieldError>,
    },

    /// A response that did not match the expected shape.
    #[error("Failed to parse response: {0}")]
    Decode(String),

    /// A protected call was made without a token.
    #[error("Not signed in")]
    NotSignedIn,
}

impl ClientError {
    pub fn from_response(status: u16, body: ErrorResponse) -> Self {
        ClientError::Api {
            status,
            code: body.code,
            message: body.error,
            fields: body.errors.unwrap_or_default(),
        }
    }

    /// Error kind as the server names it, if the server answered.
    pub fn code(&self) -> Option<&str> {
        match self {
            ClientError::Api { code, .. } => Some(code),
            _ => None,
        }
    }

    /// Field-level validation errors attached to the response.
    pub fn field_errors(&self) -> &[FieldError] {
        match self {
            ClientError::Api { fields, .. } => fields,
            _ => &[],
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ClientError::Decode(err.to_string())
        } else {
            ClientError::Network(err.to_string())
        }
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;
