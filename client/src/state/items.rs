//! # Item Store
//!
//! Browse list (approved listings), the caller's own listings, the listing
//! being viewed, and the browse filter.
//!
//! The filter is stored rather than applied once, so [`ItemState::visible`]
//! stays correct after the browse list is reloaded or mutated.

use super::replace_by_id;
use shared::{Category, Condition, Gender, ItemDto, ItemStatus};

/// Browse filter. `None` fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemFilter {
    pub category: Option<Category>,
    pub gender: Option<Gender>,
    pub size: Option<String>,
    pub condition: Option<Condition>,
    /// Case-insensitive substring of title or description
    pub search: Option<String>,
}

impl ItemFilter {
    pub fn category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    pub fn gender(mut self, gender: Gender) -> Self {
        self.gender = Some(gender);
        self
    }

    pub fn size(mut self, size: impl Into<String>) -> Self {
        self.size = Some(size.into());
        self
    }

    pub fn condition(mut self, condition: Condition) -> Self {
        self.condition = Some(condition);
        self
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    pub fn matches(&self, item: &ItemDto) -> bool {
        if self.category.is_some_and(|c| c != item.category) {
            return false;
        }
        if self.condition.is_some_and(|c| c != item.condition) {
            return false;
        }
        if self.gender.is_some() && self.gender != item.gender {
            return false;
        }
        if let Some(size) = self.size.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            if !item.size.trim().eq_ignore_ascii_case(size) {
                return false;
            }
        }
        if let Some(term) = self.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            let term = term.to_lowercase();
            if !item.title.to_lowercase().contains(&term)
                && !item.description.to_lowercase().contains(&term)
            {
                return false;
            }
        }
        true
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemState {
    /// Approved listings, newest first
    pub items: Vec<ItemDto>,
    /// The caller's listings in every status
    pub user_items: Vec<ItemDto>,
    pub current: Option<ItemDto>,
    pub filter: Option<ItemFilter>,
    pub loading: bool,
    pub error: Option<String>,
}

impl ItemState {
    /// Browse list with the filter applied.
    pub fn visible(&self) -> Vec<&ItemDto> {
        match &self.filter {
            Some(filter) => self.items.iter().filter(|i| filter.matches(i)).collect(),
            None => self.items.iter().collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ItemCommand {
    Loading,
    ItemsLoaded(Vec<ItemDto>),
    UserItemsLoaded(Vec<ItemDto>),
    ItemLoaded(ItemDto),
    ItemAdded(ItemDto),
    ItemUpdated(ItemDto),
    ItemDeleted(i64),
    Filter(ItemFilter),
    ClearFilter,
    ClearCurrent,
    Failed(String),
    ClearError,
}

pub fn reduce(mut state: ItemState, command: ItemCommand) -> ItemState {
    match command {
        ItemCommand::Loading => state.loading = true,
        ItemCommand::ItemsLoaded(items) => {
            state.items = items;
            state.loading = false;
        }
        ItemCommand::UserItemsLoaded(items) => {
            state.user_items = items;
            state.loading = false;
        }
        ItemCommand::ItemLoaded(item) => {
            state.current = Some(item);
            state.loading = false;
        }
        ItemCommand::ItemAdded(item) => {
            // New listings start pending; only approved ones are browsable.
            if item.status == ItemStatus::Approved {
                state.items.insert(0, item.clone());
            }
            state.user_items.insert(0, item);
            state.loading = false;
        }
        ItemCommand::ItemUpdated(item) => {
            if item.status == ItemStatus::Approved {
                replace_by_id(&mut state.items, &item, |i| i.id);
            } else {
                state.items.retain(|i| i.id != item.id);
            }
            replace_by_id(&mut state.user_items, &item, |i| i.id);
            if state.current.as_ref().is_some_and(|c| c.id == item.id) {
                state.current = Some(item);
            }
            state.loading = false;
        }
        ItemCommand::ItemDeleted(id) => {
            state.items.retain(|i| i.id != id);
            state.user_items.retain(|i| i.id != id);
            if state.current.as_ref().is_some_and(|c| c.id == id) {
                state.current = None;
            }
            state.loading = false;
        }
        ItemCommand::Filter(filter) => state.filter = Some(filter),
        ItemCommand::ClearFilter => state.filter = None,
        ItemCommand::ClearCurrent => state.current = None,
        ItemCommand::Failed(error) => {
            state.error = Some(error);
            state.loading = false;
        }
        ItemCommand::ClearError => state.error = None,
    }
    state
}
