//! # Services
//!
//! External I/O. Currently only the backend HTTP API.

pub mod api;
