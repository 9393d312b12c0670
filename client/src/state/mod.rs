//! # Client Stores
//!
//! One store per resource. Each is a plain state struct, a command enum and
//! a single pure `reduce(state, command) -> state`. Stores never perform I/O;
//! [`crate::app::Controller`] turns API results into commands.

pub mod admin;
pub mod items;
pub mod session;
pub mod swaps;

#[cfg(test)]
pub(crate) mod fixtures;

pub use admin::{AdminCommand, AdminState};
pub use items::{ItemCommand, ItemFilter, ItemState};
pub use session::{SessionCommand, SessionState};
pub use swaps::{SwapCommand, SwapState};

/// Every store the client holds.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClientState {
    pub session: SessionState,
    pub items: ItemState,
    pub swaps: SwapState,
    pub admin: AdminState,
}

/// Replace the entry with the same id, leaving order untouched.
pub(crate) fn replace_by_id<T>(list: &mut [T], value: &T, id_of: impl Fn(&T) -> i64)
where
    T: Clone,
{
    let id = id_of(value);
    if let Some(slot) = list.iter_mut().find(|entry| id_of(entry) == id) {
        *slot = value.clone();
    }
}
