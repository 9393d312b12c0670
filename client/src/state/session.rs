//! # Session Store
//!
//! The signed-in user's profile. The point balance shown before offering
//! points comes from here.

use shared::UserDto;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionState {
    pub user: Option<UserDto>,
    pub loading: bool,
    pub error: Option<String>,
}

impl SessionState {
    pub fn points(&self) -> i64 {
        self.user.as_ref().map_or(0, |u| u.points)
    }

    pub fn is_admin(&self) -> bool {
        self.user.as_ref().is_some_and(|u| u.is_admin)
    }

    pub fn user_id(&self) -> Option<i64> {
        self.user.as_ref().map(|u| u.id)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SessionCommand {
    Loading,
    UserLoaded(UserDto),
    SignedOut,
    Failed(String),
    ClearError,
}

pub fn reduce(state: SessionState, command: SessionCommand) -> SessionState {
    match command {
        SessionCommand::Loading => SessionState { loading: true, ..state },
        SessionCommand::UserLoaded(user) => SessionState {
            user: Some(user),
            loading: false,
            ..state
        },
        SessionCommand::SignedOut => SessionState::default(),
        SessionCommand::Failed(error) => SessionState {
            error: Some(error),
            loading: false,
            ..state
        },
        SessionCommand::ClearError => SessionState { error: None, ..state },
    }
}
