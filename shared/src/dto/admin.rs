//! # Moderation Data Transfer Objects
//!
//! Statistics are computed on demand by the backend, never cached.

use serde::{Deserialize, Serialize};

/// Listing counts by status.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemStats {
    pub total: i64,
    pub pending: i64,
    pub approved: i64,
    pub rejected: i64,
    pub swapped: i64,
}

/// Swap counts by status.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapStats {
    pub total: i64,
    pub pending: i64,
    pub accepted: i64,
    pub rejected: i64,
    pub completed: i64,
    pub cancelled: i64,
}

/// Body of `GET /api/admin/stats`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsResponse {
    pub users: i64,
    pub items: ItemStats,
    pub swaps: SwapStats,
}
