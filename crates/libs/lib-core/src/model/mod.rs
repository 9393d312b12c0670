//! # Model Layer
//!
//! Persistence for users, listings and swaps.

pub mod store;
