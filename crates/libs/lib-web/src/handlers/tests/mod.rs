//! # Router Tests
//!
//! Full requests through `create_router` against an in-memory store.

mod items;

use crate::test_support::*;
use axum::http::StatusCode;
use serde_json::{json, Value};
