//! # Swap Store
//!
//! The caller's swaps and the swap currently open, with its thread.
//!
//! [`available_actions`] mirrors the server's role rules so a front end only
//! offers transitions the caller may perform. The server still decides.

use super::replace_by_id;
use shared::{SwapDetailResponse, SwapDto, SwapMessageDto, SwapStatus};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SwapState {
    /// Swaps where the caller is requester or owner, newest first
    pub swaps: Vec<SwapDto>,
    pub current: Option<SwapDetailResponse>,
    pub loading: bool,
    pub error: Option<String>,
}

impl SwapState {
    /// Whether the open swap still takes messages.
    pub fn can_message(&self) -> bool {
        self.current
            .as_ref()
            .is_some_and(|d| d.swap.status.accepts_messages())
    }
}

/// Status targets `user_id` may apply to `swap` right now.
pub fn available_actions(swap: &SwapDto, user_id: i64) -> Vec<SwapStatus> {
    match swap.status {
        SwapStatus::Pending if swap.owner_id == user_id => {
            vec![SwapStatus::Accepted, SwapStatus::Rejected]
        }
        SwapStatus::Pending if swap.requester_id == user_id => vec![SwapStatus::Cancelled],
        SwapStatus::Accepted if swap.owner_id == user_id => vec![SwapStatus::Completed],
        _ => Vec::new(),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SwapCommand {
    Loading,
    SwapsLoaded(Vec<SwapDto>),
    SwapLoaded(SwapDetailResponse),
    SwapCreated(SwapDto),
    StatusUpdated(SwapDto),
    MessagesUpdated {
        swap_id: i64,
        messages: Vec<SwapMessageDto>,
    },
    ClearCurrent,
    Failed(String),
    ClearError,
}

pub fn reduce(mut state: SwapState, command: SwapCommand) -> SwapState {
    match command {
        SwapCommand::Loading => state.loading = true,
        SwapCommand::SwapsLoaded(swaps) => {
            state.swaps = swaps;
            state.loading = false;
        }
        SwapCommand::SwapLoaded(detail) => {
            replace_by_id(&mut state.swaps, &detail.swap, |s| s.id);
            state.current = Some(detail);
            state.loading = false;
        }
        SwapCommand::SwapCreated(swap) => {
            state.swaps.insert(0, swap);
            state.loading = false;
        }
        SwapCommand::StatusUpdated(swap) => {
            replace_by_id(&mut state.swaps, &swap, |s| s.id);
            if let Some(detail) = state.current.as_mut().filter(|d| d.swap.id == swap.id) {
                detail.swap = swap;
            }
            state.loading = false;
        }
        SwapCommand::MessagesUpdated { swap_id, messages } => {
            if let Some(swap) = state.swaps.iter_mut().find(|s| s.id == swap_id) {
                swap.messages = messages.clone();
            }
            if let Some(detail) = state.current.as_mut().filter(|d| d.swap.id == swap_id) {
                detail.swap.messages = messages;
            }
            state.loading = false;
        }
        SwapCommand::ClearCurrent => state.current = None,
        SwapCommand::Failed(error) => {
            state.error = Some(error);
            state.loading = false;
        }
        SwapCommand::ClearError => state.error = None,
    }
    state
}
