//! # Time Utilities

use chrono::{DateTime, SubsecRound, Utc};

/// Current UTC time truncated to microseconds, the precision SQLite keeps.
pub fn now_utc() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}
