//! # Application Layer
//!
//! [`Controller`] owns the stores and the API handle. Screens call it on
//! navigation (`open_*`) and on user actions; nothing fetches implicitly.

pub mod controller;

pub use controller::Controller;
