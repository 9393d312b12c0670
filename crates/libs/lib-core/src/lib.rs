//! # Core Library
//!
//! Core models, database, configuration, and error handling for the application.

pub mod config;
pub mod error;
pub mod model;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, ErrorKind, Result};
pub use model::store::{create_memory_pool, create_pool, DbPool, MIGRATOR};
