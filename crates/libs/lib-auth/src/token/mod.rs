//! # JWT Token Management
//!
//! HS256 bearer tokens. Every token names [`ISSUER`] and a numeric user id
//! as subject; tokens from another issuer are rejected.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// `iss` claim written and required by this crate.
pub const ISSUER: &str = "rewear";

/// Failure to issue or accept a bearer token.
#[derive(Debug, Error)]
pub enum TokenError {
    #[error("Failed to encode JWT: {0}")]
    Encode(String),

    #[error("Failed to decode JWT: {0}")]
    Decode(String),

    #[error("Token subject is not a user id: {0}")]
    InvalidSubject(String),
}

/// JWT Claims structure identifying the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    /// Display name
    pub name: String,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at time (Unix timestamp)
    pub iat: i64,
    pub iss: String,
}

impl Claims {
    /// Numeric user id carried in `sub`.
    pub fn user_id(&self) -> Result<i64, TokenError> {
        self.sub
            .parse::<i64>()
            .map_err(|_| TokenError::InvalidSubject(self.sub.clone()))
    }
}

/// Encode a JWT token with user claims.
pub fn encode_jwt(
    user_id: i64,
    name: String,
    secret: &str,
    expiration_hours: i64,
) -> Result<String, TokenError> {
    let now = Utc::now();
    let exp = now + Duration::hours(expiration_hours);

    let claims = Claims {
        sub: user_id.to_string(),
        name,
        exp: exp.timestamp(),
        iat: now.timestamp(),
        iss: ISSUER.to_string(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| TokenError::Encode(e.to_string()))
}

/// Decode and validate a JWT token.
pub fn decode_jwt(token: &str, secret: &str) -> Result<Claims, TokenError> {
    let mut validation = Validation::default();
    validation.set_issuer(&[ISSUER]);

    let token_data = decode::<Claims>(token, &DecodingKey::from_secret(secret.as_bytes()), &validation)
    .map_err(|e| TokenError::Decode(e.to_string()))?;

    Ok(token_data.claims)
}
