//! # Controller
//!
//! Explicit fetches and mutations. Every API result becomes a store command:
//! successes update the stores, failures land in the store's `error` slot
//! and are also returned to the caller.
//!
//! The state lock is never held across an `.await`.

use crate::core::error::Result;
use crate::core::service::ApiService;
use crate::state::{
    admin, items, session, swaps, AdminCommand, ClientState, ItemCommand, ItemFilter,
    SessionCommand, SwapCommand,
};
use parking_lot::RwLock;
use shared::{CreateItemRequest, CreateSwapRequest, ItemDto, SwapDto, SwapStatus, UpdateItemRequest};
use std::sync::Arc;
use tracing::{debug, warn};

pub struct Controller {
    api: Arc<dyn ApiService>,
    state: RwLock<ClientState>,
}

impl Controller {
    pub fn new(api: Arc<dyn ApiService>) -> Self {
        Self {
            api,
            state: RwLock::new(ClientState::default()),
        }
    }

    /// Copy of every store, for rendering.
    pub fn snapshot(&self) -> ClientState {
        self.state.read().clone()
    }

    // region: --- Dispatch

    fn session(&self, command: SessionCommand) {
        let mut state = self.state.write();
        state.session = session::reduce(std::mem::take(&mut state.session), command);
    }

    fn items(&self, command: ItemCommand) {
        let mut state = self.state.write();
        state.items = items::reduce(std::mem::take(&mut state.items), command);
    }

    fn swaps(&self, command: SwapCommand) {
        let mut state = self.state.write();
        state.swaps = swaps::reduce(std::mem::take(&mut state.swaps), command);
    }

    fn admin(&self, command: AdminCommand) {
        let mut state = self.state.write();
        state.admin = admin::reduce(std::mem::take(&mut state.admin), command);
    }

    /// Route `result` into a store: `ok` on success, `Failed` on error.
    fn settle<T, C>(
        &self,
        result: Result<T>,
        dispatch: impl Fn(&Self, C),
        ok: impl FnOnce(&T) -> C,
        failed: impl FnOnce(String) -> C,
    ) -> Result<T> {
        match result {
            Ok(value) => {
                dispatch(self, ok(&value));
                Ok(value)
            }
            Err(err) => {
                warn!(error = %err, "Request failed");
                dispatch(self, failed(err.to_string()));
                Err(err)
            }
        }
    }

    // endregion: --- Dispatch

    // region: --- Navigation

    /// Browse screen: approved listings.
    pub async fn open_browse(&self) -> Result<()> {
        self.items(ItemCommand::Loading);
        let result = self.api.list_items().await;
        self.settle(
            result,
            Self::items,
            |items| ItemCommand::ItemsLoaded(items.clone()),
            ItemCommand::Failed,
        )?;
        Ok(())
    }

    /// Listing detail screen.
    pub async fn open_item(&self, id: i64) -> Result<()> {
        self.items(ItemCommand::Loading);
        let result = self.api.get_item(id).await;
        self.settle(
            result,
            Self::items,
            |item| ItemCommand::ItemLoaded(item.clone()),
            ItemCommand::Failed,
        )?;
        Ok(())
    }

    /// Dashboard: profile, own listings and swaps.
    pub async fn open_dashboard(&self) -> Result<()> {
        debug!("Opening dashboard");
        self.refresh_profile().await?;

        self.items(ItemCommand::Loading);
        let result = self.api.my_items().await;
        self.settle(
            result,
            Self::items,
            |items| ItemCommand::UserItemsLoaded(items.clone()),
            ItemCommand::Failed,
        )?;

        self.swaps(SwapCommand::Loading);
        let result = self.api.list_swaps().await;
        self.settle(
            result,
            Self::swaps,
            |swaps| SwapCommand::SwapsLoaded(swaps.clone()),
            SwapCommand::Failed,
        )?;
        Ok(())
    }

    /// Swap detail screen with its thread.
    pub async fn open_swap(&self, id: i64) -> Result<()> {
        self.swaps(SwapCommand::Loading);
        let result = self.api.get_swap(id).await;
        self.settle(
            result,
            Self::swaps,
            |detail| SwapCommand::SwapLoaded(detail.clone()),
            SwapCommand::Failed,
        )?;
        Ok(())
    }

    /// Admin panel: moderation queue, users, stats.
    pub async fn open_admin(&self) -> Result<()> {
        self.admin(AdminCommand::Loading);
        let result = self.api.pending_items().await;
        self.settle(
            result,
            Self::admin,
            |items| AdminCommand::PendingLoaded(items.clone()),
            AdminCommand::Failed,
        )?;

        let result = self.api.list_users().await;
        self.settle(
            result,
            Self::admin,
            |users| AdminCommand::UsersLoaded(users.clone()),
            AdminCommand::Failed,
        )?;

        let result = self.api.stats().await;
        self.settle(
            result,
            Self::admin,
            |stats| AdminCommand::StatsLoaded(stats.clone()),
            AdminCommand::Failed,
        )?;
        Ok(())
    }

    pub async fn refresh_profile(&self) -> Result<()> {
        self.session(SessionCommand::Loading);
        let result = self.api.current_user().await;
        self.settle(
            result,
            Self::session,
            |user| SessionCommand::UserLoaded(user.clone()),
            SessionCommand::Failed,
        )?;
        Ok(())
    }

    pub fn sign_out(&self) {
        *self.state.write() = ClientState::default();
    }

    // endregion: --- Navigation

    // region: --- Items

    pub fn filter_items(&self, filter: ItemFilter) {
        self.items(ItemCommand::Filter(filter));
    }

    pub fn clear_filter(&self) {
        self.items(ItemCommand::ClearFilter);
    }

    pub async fn create_item(&self, request: CreateItemRequest) -> Result<ItemDto> {
        let result = self.api.create_item(request).await;
        self.settle(
            result,
            Self::items,
            |item| ItemCommand::ItemAdded(item.clone()),
            ItemCommand::Failed,
        )
    }

    pub async fn update_item(&self, id: i64, request: UpdateItemRequest) -> Result<ItemDto> {
        let result = self.api.update_item(id, request).await;
        self.settle(
            result,
            Self::items,
            |item| ItemCommand::ItemUpdated(item.clone()),
            ItemCommand::Failed,
        )
    }

    pub async fn delete_item(&self, id: i64) -> Result<()> {
        let result = self.api.delete_item(id).await;
        self.settle(result, Self::items, |_| ItemCommand::ItemDeleted(id), ItemCommand::Failed)
    }

    // endregion: --- Items

    // region: --- Swaps

    pub async fn request_swap(&self, request: CreateSwapRequest) -> Result<SwapDto> {
        let result = self.api.create_swap(request).await;
        self.settle(
            result,
            Self::swaps,
            |swap| SwapCommand::SwapCreated(swap.clone()),
            SwapCommand::Failed,
        )
    }

    /// Apply a status target. Completion moves points and listings, so the
    /// profile and own listings are fetched again afterwards.
    pub async fn set_swap_status(&self, id: i64, status: SwapStatus) -> Result<SwapDto> {
        let result = self.api.update_swap_status(id, status).await;
        let swap = self.settle(
            result,
            Self::swaps,
            |swap| SwapCommand::StatusUpdated(swap.clone()),
            SwapCommand::Failed,
        )?;

        if swap.status == SwapStatus::Completed {
            self.refresh_profile().await?;
            let result = self.api.my_items().await;
            self.settle(
                result,
                Self::items,
                |items| ItemCommand::UserItemsLoaded(items.clone()),
                ItemCommand::Failed,
            )?;
        }
        Ok(swap)
    }

    pub async fn send_message(&self, id: i64, text: impl Into<String>) -> Result<()> {
        let result = self.api.add_message(id, text.into()).await;
        self.settle(
            result,
            Self::swaps,
            |messages| SwapCommand::MessagesUpdated {
                swap_id: id,
                messages: messages.clone(),
            },
            SwapCommand::Failed,
        )?;
        Ok(())
    }

    // endregion: --- Swaps

    // region: --- Admin

    pub async fn approve_item(&self, id: i64) -> Result<ItemDto> {
        let result = self.api.approve_item(id).await;
        self.settle(
            result,
            Self::admin,
            |item| AdminCommand::ItemModerated(item.clone()),
            AdminCommand::Failed,
        )
    }

    pub async fn reject_item(&self, id: i64) -> Result<ItemDto> {
        let result = self.api.reject_item(id).await;
        self.settle(
            result,
            Self::admin,
            |item| AdminCommand::ItemModerated(item.clone()),
            AdminCommand::Failed,
        )
    }

    pub async fn remove_item(&self, id: i64) -> Result<()> {
        let result = self.api.admin_delete_item(id).await;
        self.settle(result, Self::admin, |_| AdminCommand::ItemRemoved(id), AdminCommand::Failed)?;
        self.items(ItemCommand::ItemDeleted(id));
        Ok(())
    }

    pub async fn toggle_admin(&self, user_id: i64) -> Result<()> {
        let result = self.api.toggle_admin(user_id).await;
        self.settle(
            result,
            Self::admin,
            |user| AdminCommand::UserUpdated(user.clone()),
            AdminCommand::Failed,
        )?;
        Ok(())
    }

    // endregion: --- Admin

    /// Clear every store's error slot.
    pub fn clear_errors(&self) {
        self.session(SessionCommand::ClearError);
        self.items(ItemCommand::ClearError);
        self.swaps(SwapCommand::ClearError);
        self.admin(AdminCommand::ClearError);
    }
}
