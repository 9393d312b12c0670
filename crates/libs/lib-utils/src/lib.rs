//! # Utilities Library
//!
//! Shared utility functions for environment variables, time, data URLs, and form validation.

pub mod b64;
pub mod envs;
pub mod time;
pub mod validation;

// Re-export commonly used functions
pub use b64::{decode_data_url, DataUrl};
pub use envs::{get_env, get_env_or, get_env_parse, get_env_parse_or};
pub use time::now_utc;
pub use validation::{validate_image_ref, validate_not_empty, validate_positive, Validator};
