//! # ReWear Client
//!
//! Client-side state containers for the ReWear API.
//!
//! ## Structure
//!
//! - **[`core`]**: error type and the [`core::ApiService`] trait
//! - **[`services::api`]**: reqwest-backed [`services::api::ApiClient`]
//! - **[`state`]**: one store per resource, each a plain state struct, a
//!   command enum and a pure `reduce` function
//! - **[`app`]**: [`app::Controller`], which performs fetches and mutations
//!   and feeds the results into the stores
//!
//! Nothing here is global. A front end owns a `Controller`, calls its
//! `open_*` methods on navigation and reads snapshots of the stores to render.

pub mod app;
pub mod core;
pub mod services;
pub mod state;

pub use app::Controller;
pub use core::{ApiService, ClientError, Result};
pub use services::api::ApiClient;
