//! # Validation Utilities
//!
//! Input validation helpers. Forms report every problem at once, so the
//! single-field checks return `Result<(), String>` and [`Validator`] gathers
//! them per field instead of stopping at the first failure.

use crate::b64::decode_data_url;

/// Validate that a string is not blank.
pub fn validate_not_empty(value: &str, label: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        Err(format!("{} is required", label))
    } else {
        Ok(())
    }
}

/// Validate that a number is strictly positive.
pub fn validate_positive(value: i64, label: &str) -> Result<(), String> {
    if value > 0 {
        Ok(())
    } else {
        Err(format!("{} must be greater than 0", label))
    }
}

/// Validate an image reference: an `http(s)://` URL or a base64 `data:image/*` URL.
pub fn validate_image_ref(reference: &str) -> Result<(), String> {
    let reference = reference.trim();

    if reference.starts_with("https://") || reference.starts_with("http://") {
        return Ok(());
    }

    match decode_data_url(reference) {
        Ok(data) if data.mime.starts_with("image/") => Ok(()),
        Ok(data) => Err(format!("Unsupported image type: {}", data.mime)),
        Err(_) => Err("Image must be an http(s) URL or a base64 data URL".to_string()),
    }
}

/// Collects field-level validation failures.
#[derive(Debug, Default)]
pub struct Validator {
    errors: Vec<(String, String)>,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `result` against `field` if it failed.
    pub fn check(&mut self, field: &str, result: Result<(), String>) -> &mut Self {
        if let Err(message) = result {
            self.errors.push((field.to_string(), message));
        }
        self
    }

    /// Record a failure unconditionally.
    pub fn push(&mut self, field: &str, message: impl Into<String>) -> &mut Self {
        self.errors.push((field.to_string(), message.into()));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// `Ok(())` when nothing failed, otherwise every `(field, message)` pair in check order.
    pub fn finish(self) -> Result<(), Vec<(String, String)>> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self.errors)
        }
    }
}
