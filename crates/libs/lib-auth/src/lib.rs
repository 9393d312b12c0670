//! # Authentication Library
//!
//! Bearer token encoding and validation. Accounts are issued by an external
//! collaborator; this crate only turns a user id into a signed token and back.

pub mod token;

// Re-export commonly used types
pub use token::{decode_jwt, encode_jwt, Claims, TokenError, ISSUER};
