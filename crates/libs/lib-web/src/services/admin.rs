//! # Admin Service
//!
//! Listing moderation, the admin flag and on-demand counts.

use lib_core::model::store::{Item, ItemRepository, SwapRepository, User, UserRepository};
use lib_core::{AppError, DbPool, Result};
use shared::{ItemStats, ItemStatus, StatsResponse, SwapStats, SwapStatus};
use tracing::{info, instrument};

use super::items::refused_delete;

/// Moderation operations. Callers are already known to be admins.
#[derive(Clone)]
pub struct AdminService {
    db: DbPool,
}

impl AdminService {
    pub fn new(db: DbPool) -> Self {
        Self { db }
    }

    /// Listings awaiting review, newest first.
    pub async fn pending_items(&self) -> Result<Vec<Item>> {
        ItemRepository::list_by_status(&self.db, ItemStatus::Pending).await
    }

    pub async fn approve_item(&self, id: i64) -> Result<Item> {
        self.moderate(id, ItemStatus::Approved).await
    }

    pub async fn reject_item(&self, id: i64) -> Result<Item> {
        self.moderate(id, ItemStatus::Rejected).await
    }

    /// Only a `pending` listing can be approved or rejected.
    #[instrument(skip(self))]
    async fn moderate(&self, id: i64, target: ItemStatus) -> Result<Item> {
        if !ItemRepository::set_status(&self.db, id, ItemStatus::Pending, target).await? {
            return Err(match ItemRepository::status_of(&self.db, id).await? {
                None => AppError::NotFound("Item not found".to_string()),
                Some(current) => AppError::InvalidState(format!(
                    "Item is {}; only pending items can be moderated",
                    current
                )),
            });
        }

        info!(item_id = id, status = %target, "Listing moderated");
        ItemRepository::get(&self.db, id).await
    }

    /// Admin override delete. Open swaps still block it.
    #[instrument(skip(self))]
    pub async fn delete_item(&self, id: i64) -> Result<()> {
        if !ItemRepository::delete(&self.db, id).await? {
            return Err(refused_delete(&self.db, id).await);
        }
        info!(item_id = id, "Listing removed by admin");
        Ok(())
    }

    /// All users, newest first.
    pub async fn users(&self) -> Result<Vec<User>> {
        UserRepository::list_all(&self.db).await
    }

    /// Flip another user's admin flag.
    #[instrument(skip(self))]
    pub async fn toggle_admin(&self, actor_id: i64, user_id: i64) -> Result<User> {
        if actor_id == user_id {
            return Err(AppError::InvalidInput(
                "You cannot change your own admin status".to_string(),
            ));
        }

        let user = UserRepository::toggle_admin(&self.db, user_id).await?;
        info!(user_id, is_admin = user.is_admin, "Admin flag changed");
        Ok(user)
    }

    /// Counts computed from the store on every call.
    pub async fn stats(&self) -> Result<StatsResponse> {
        let users = UserRepository::count(&self.db).await?;

        let mut items = ItemStats::default();
        for (status, count) in ItemRepository::count_by_status(&self.db).await? {
            items.total += count;
            match status {
                ItemStatus::Pending => items.pending = count,
                ItemStatus::Approved => items.approved = count,
                ItemStatus::Rejected => items.rejected = count,
                ItemStatus::Swapped => items.swapped = count,
            }
        }

        let mut swaps = SwapStats::default();
        for (status, count) in SwapRepository::count_by_status(&self.db).await? {
            swaps.total += count;
            match status {
                SwapStatus::Pending => swaps.pending = count,
                SwapStatus::Accepted => swaps.accepted = count,
                SwapStatus::Rejected => swaps.rejected = count,
                SwapStatus::Completed => swaps.completed = count,
                SwapStatus::Cancelled => swaps.cancelled = count,
            }
        }

        Ok(StatsResponse { users, items, swaps })
    }
}
