//! # Services Layer
//!
//! Business rules between the HTTP handlers and the repositories:
//!
//! ```text
//! Handlers (HTTP) → Services (rules, authorization) → Repositories (SQL)
//! ```
//!
//! - [`items`] - listing store: validation, ownership, re-review on edit
//! - [`swaps`] - swap workflow: creation checks, gated transitions, settlement
//! - [`admin`] - moderation, admin flag, aggregate counts
//!
//! Services are cheap clones over the pool and are extracted from
//! `AppState` through `FromRef`. All methods return `lib_core::Result`.

pub mod admin;
pub mod items;
pub mod swaps;

pub use admin::AdminService;
pub use items::ItemService;
pub use swaps::SwapService;
