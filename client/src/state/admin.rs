//! # Admin Store
//!
//! Moderation queue, user list and platform counts.

use super::replace_by_id;
use shared::{ItemDto, StatsResponse, UserDto};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AdminState {
    pub pending: Vec<ItemDto>,
    pub users: Vec<UserDto>,
    pub stats: Option<StatsResponse>,
    pub loading: bool,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AdminCommand {
    Loading,
    PendingLoaded(Vec<ItemDto>),
    /// Approved or rejected; either way it leaves the queue.
    ItemModerated(ItemDto),
    ItemRemoved(i64),
    UsersLoaded(Vec<UserDto>),
    UserUpdated(UserDto),
    StatsLoaded(StatsResponse),
    Failed(String),
    ClearError,
}

pub fn reduce(mut state: AdminState, command: AdminCommand) -> AdminState {
    match command {
        AdminCommand::Loading => state.loading = true,
        AdminCommand::PendingLoaded(items) => {
            state.pending = items;
            state.loading = false;
        }
        AdminCommand::ItemModerated(item) => {
            state.pending.retain(|i| i.id != item.id);
            state.loading = false;
        }
        AdminCommand::ItemRemoved(id) => {
            state.pending.retain(|i| i.id != id);
            state.loading = false;
        }
        AdminCommand::UsersLoaded(users) => {
            state.users = users;
            state.loading = false;
        }
        AdminCommand::UserUpdated(user) => {
            replace_by_id(&mut state.users, &user, |u| u.id);
            state.loading = false;
        }
        AdminCommand::StatsLoaded(stats) => {
            state.stats = Some(stats);
            state.loading = false;
        }
        AdminCommand::Failed(error) => {
            state.error = Some(error);
            state.loading = false;
        }
        AdminCommand::ClearError => state.error = None,
    }
    state
}
