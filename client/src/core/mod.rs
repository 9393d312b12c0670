//! # Core Abstractions
//!
//! - **[`error`]**: [`ClientError`] and the `Result<T>` alias
//! - **[`service`]**: [`ApiService`], the seam between the controller and HTTP
//!
//! ```rust,ignore
//! use client::{ApiClient, ApiService, Controller};
//! use std::sync::Arc;
//!
//! // In production: the real HTTP client
//! let api: Arc<dyn ApiService> = Arc::new(ApiClient::new("http://127.0.0.1:5000"));
//! let controller = Controller::new(api);
//! ```

pub mod error;
pub mod service;

pub use error::{ClientError, Result};
pub use service::ApiService;
