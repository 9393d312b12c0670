//! # Web Library
//!
//! HTTP layer of the exchange: router, middleware, handlers and the services
//! holding the listing, swap and moderation rules.

pub mod handlers;
pub mod middleware;
pub mod server;
pub mod services;

#[cfg(test)]
pub(crate) mod test_support;

pub use server::{create_router, start_server, AppState, ServerConfig};
