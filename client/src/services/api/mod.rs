//! # Backend API
//!
//! [`ApiClient`] plus one module of endpoint functions per resource. The
//! functions take the client explicitly; the [`crate::core::ApiService`]
//! impl on `ApiClient` forwards to them.

pub mod admin;
pub mod auth;
pub mod client;
pub mod items;
pub mod swaps;

pub use client::ApiClient;
