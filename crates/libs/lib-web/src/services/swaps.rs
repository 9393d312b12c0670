//! # Swap Service
//!
//! The swap workflow: request creation, role-gated status transitions and
//! settlement on completion.
//!
//! ## Transitions
//!
//! | target      | actor     | current   |
//! |-------------|-----------|-----------|
//! | `accepted`  | owner     | `pending` |
//! | `rejected`  | owner     | `pending` |
//! | `completed` | owner     | `accepted`|
//! | `cancelled` | requester | `pending` |
//!
//! ## Settlement
//!
//! Completion runs in one transaction: the swap moves `accepted -> completed`,
//! points move from requester to owner (points swaps), and every involved
//! listing moves `approved -> swapped`. Each step is a compare-and-set; any
//! failed step rolls the whole settlement back. A listing already taken by a
//! concurrent settlement surfaces as `Conflict`.

use lib_core::model::store::{
    Item, ItemRepository, Swap, SwapForCreate, SwapMessage, SwapRepository, SwapTerms,
    UserRepository,
};
use lib_core::{AppError, DbPool, Result};
use shared::{
    CreateSwapRequest, ItemStatus, SwapDetailResponse, SwapStatus, UserSummary,
};
use sqlx::SqliteConnection;
use tracing::{info, instrument, warn};

/// Swap workflow engine.
#[derive(Clone)]
pub struct SwapService {
    db: DbPool,
}

impl SwapService {
    pub fn new(db: DbPool) -> Self {
        Self { db }
    }

    // region: --- Create

    /// Open a `pending` swap for `requester_id`.
    ///
    /// The points amount of a points swap is the requested listing's point
    /// value at this moment; any amount from the client is ignored.
    #[instrument(skip(self, req))]
    pub async fn create(&self, requester_id: i64, req: CreateSwapRequest) -> Result<Swap> {
        let requested_id = req
            .requested_item
            .ok_or_else(|| AppError::InvalidInput("requestedItem is required".to_string()))?;

        let is_points_swap = req.is_points_swap.unwrap_or(false);
        if is_points_swap && req.offered_item.is_some() {
            return Err(AppError::InvalidInput(
                "A points swap cannot also offer an item".to_string(),
            ));
        }
        if !is_points_swap && req.offered_item.is_none() {
            return Err(AppError::InvalidInput(
                "offeredItem is required unless isPointsSwap is true".to_string(),
            ));
        }

        let requested = ItemRepository::find_by_id(&self.db, requested_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Requested item not found".to_string()))?;

        if requested.is_owned_by(requester_id) {
            return Err(AppError::Forbidden(
                "You cannot request a swap for your own item".to_string(),
            ));
        }
        ensure_offerable(&requested, "Requested item")?;

        let terms = match req.offered_item {
            None => {
                let requester = UserRepository::get(&self.db, requester_id).await?;
                if requester.points < requested.point_value {
                    return Err(AppError::InsufficientFunds(format!(
                        "This item costs {} points but you have {}",
                        requested.point_value, requester.points
                    )));
                }
                SwapTerms::Points {
                    amount: requested.point_value,
                }
            }
            Some(offered_id) => {
                let offered = ItemRepository::find_by_id(&self.db, offered_id)
                    .await?
                    .ok_or_else(|| AppError::NotFound("Offered item not found".to_string()))?;

                if !offered.is_owned_by(requester_id) {
                    return Err(AppError::Forbidden(
                        "You can only offer your own items".to_string(),
                    ));
                }
                ensure_offerable(&offered, "Offered item")?;

                SwapTerms::Item {
                    offered_item_id: offered.id,
                }
            }
        };

        let message = req
            .message
            .map(|m| m.trim().to_string())
            .filter(|m| !m.is_empty());

        let swap = SwapRepository::create(
            &self.db,
            SwapForCreate {
                requester_id,
                owner_id: requested.owner_id,
                requested_item_id: requested.id,
                terms,
                message,
            },
        )
        .await?;

        info!(swap_id = swap.id, owner_id = swap.owner_id, "Swap requested");
        Ok(swap)
    }

    // endregion: --- Create

    // region: --- Read

    /// Swaps where the user is requester or owner, newest first.
    pub async fn list_for_user(&self, user_id: i64) -> Result<Vec<Swap>> {
        SwapRepository::list_for_user(&self.db, user_id).await
    }

    /// A swap with its listings and participants. Participants only.
    #[instrument(skip(self))]
    pub async fn detail(&self, actor_id: i64, swap_id: i64) -> Result<SwapDetailResponse> {
        let swap = self.participant_swap(actor_id, swap_id).await?;

        let requested_item = ItemRepository::find_by_id(&self.db, swap.requested_item_id).await?;
        let offered_item = match swap.offered_item_id() {
            Some(id) => ItemRepository::find_by_id(&self.db, id).await?,
            None => None,
        };
        let requester = UserRepository::get(&self.db, swap.requester_id).await?;
        let owner = UserRepository::get(&self.db, swap.owner_id).await?;

        Ok(SwapDetailResponse {
            swap: swap.into(),
            requested_item: requested_item.map(Into::into),
            offered_item: offered_item.map(Into::into),
            requester: UserSummary::from(&requester),
            owner: UserSummary::from(&owner),
        })
    }

    // endregion: --- Read

    // region: --- Messages

    /// Append a message from a participant; returns the whole thread.
    ///
    /// Rejected and cancelled swaps are closed to new messages.
    #[instrument(skip(self, text))]
    pub async fn add_message(&self, actor_id: i64, swap_id: i64, text: &str) -> Result<Vec<SwapMessage>> {
        let swap = self.participant_swap(actor_id, swap_id).await?;

        let text = text.trim();
        if text.is_empty() {
            return Err(AppError::InvalidInput("Message text is required".to_string()));
        }

        if !swap.status.accepts_messages() {
            return Err(closed_thread(swap.status));
        }

        if !SwapRepository::add_message(&self.db, swap_id, actor_id, text).await? {
            // Closed between the read and the insert.
            let current = SwapRepository::get(&self.db, swap_id).await?;
            return Err(closed_thread(current.status));
        }

        SwapRepository::messages(&self.db, swap_id).await
    }

    // endregion: --- Messages

    // region: --- Transitions

    /// Move a swap to `target` on behalf of `actor_id`.
    ///
    /// The wrong actor or the wrong current status is `Forbidden`; an unknown
    /// target or `pending` is `InvalidInput`.
    #[instrument(skip(self))]
    pub async fn update_status(&self, actor_id: i64, swap_id: i64, target: &str) -> Result<Swap> {
        let target: SwapStatus = target
            .trim()
            .parse()
            .map_err(|_| AppError::InvalidInput(format!("Unknown swap status '{}'", target.trim())))?;

        let Some(required) = target.required_current() else {
            return Err(AppError::InvalidInput(
                "A swap cannot be moved back to pending".to_string(),
            ));
        };

        let swap = SwapRepository::get(&self.db, swap_id).await?;

        let (allowed_actor, role) = match target {
            SwapStatus::Cancelled => (swap.requester_id, "requester"),
            _ => (swap.owner_id, "item owner"),
        };
        if actor_id != allowed_actor {
            return Err(AppError::Forbidden(format!(
                "Only the {} can mark this swap {}",
                role, target
            )));
        }

        if swap.status != required {
            return Err(AppError::Forbidden(format!(
                "A {} swap cannot be marked {}",
                swap.status, target
            )));
        }

        if target == SwapStatus::Completed {
            self.settle(&swap).await?;
        } else if !SwapRepository::set_status(&self.db, swap_id, required, target).await? {
            return Err(AppError::Conflict(
                "Swap was updated concurrently, reload and retry".to_string(),
            ));
        }

        info!(swap_id, from = %swap.status, to = %target, "Swap status changed");
        SwapRepository::get(&self.db, swap_id).await
    }

    /// Apply completion side effects atomically.
    async fn settle(&self, swap: &Swap) -> Result<()> {
        let mut tx = self.db.begin().await?;

        if !SwapRepository::set_status(&mut *tx, swap.id, SwapStatus::Accepted, SwapStatus::Completed)
            .await?
        {
            return Err(AppError::Conflict(
                "Swap was updated concurrently, reload and retry".to_string(),
            ));
        }

        match swap.terms {
            SwapTerms::Points { amount } => {
                if !UserRepository::debit_points(&mut *tx, swap.requester_id, amount).await? {
                    warn!(swap_id = swap.id, amount, "Settlement refused, requester balance too low");
                    return Err(AppError::InsufficientFunds(
                        "The requester no longer has enough points for this swap".to_string(),
                    ));
                }
                if !UserRepository::credit_points(&mut *tx, swap.owner_id, amount).await? {
                    return Err(AppError::NotFound("Item owner no longer exists".to_string()));
                }
                mark_swapped(&mut *tx, swap.requested_item_id).await?;
            }
            SwapTerms::Item { offered_item_id } => {
                mark_swapped(&mut *tx, swap.requested_item_id).await?;
                mark_swapped(&mut *tx, offered_item_id).await?;
            }
        }

        tx.commit().await?;

        info!(
            swap_id = swap.id,
            points = swap.points_amount(),
            "Swap settled"
        );
        Ok(())
    }

    // endregion: --- Transitions

    async fn participant_swap(&self, actor_id: i64, swap_id: i64) -> Result<Swap> {
        let swap = SwapRepository::get(&self.db, swap_id).await?;
        if !swap.is_participant(actor_id) {
            return Err(AppError::Forbidden(
                "Only the swap participants can access this swap".to_string(),
            ));
        }
        Ok(swap)
    }
}

// region: --- Helpers

fn ensure_offerable(item: &Item, label: &str) -> Result<()> {
    if item.status.is_offerable() {
        Ok(())
    } else {
        Err(AppError::InvalidState(format!(
            "{} is {} and cannot be swapped",
            label, item.status
        )))
    }
}

fn closed_thread(status: SwapStatus) -> AppError {
    AppError::InvalidState(format!("Cannot message on a {} swap", status))
}

/// Compare-and-set a listing `approved -> swapped` inside the settlement.
async fn mark_swapped(conn: &mut SqliteConnection, item_id: i64) -> Result<()> {
    if ItemRepository::set_status(&mut *conn, item_id, ItemStatus::Approved, ItemStatus::Swapped).await? {
        return Ok(());
    }

    match ItemRepository::status_of(&mut *conn, item_id).await? {
        None => Err(AppError::NotFound(format!("Item {} no longer exists", item_id))),
        Some(status) => Err(AppError::Conflict(format!(
            "Item {} is already {} and cannot be swapped",
            item_id, status
        ))),
    }
}

// endregion: --- Helpers

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::*;

    #[tokio::test]
    async fn test_points_swap_full_lifecycle() {
        let ctx = TestContext::new().await;
        let u1 = ctx.user("Uma", 0).await;
        let u2 = ctx.user("Vic", 100).await;
        let item_a = ctx.approved_item(u1.id, 50).await;

        let swap = ctx
            .swaps()
            .create(u2.id, CreateSwapRequest::for_points(item_a.id))
            .await
            .unwrap();
        assert_eq!(swap.status, SwapStatus::Pending);
        assert_eq!(swap.points_amount(), 50);
        assert_eq!(swap.owner_id, u1.id);

        let swap = ctx.swaps().update_status(u1.id, swap.id, "accepted").await.unwrap();
        assert_eq!(swap.status, SwapStatus::Accepted);

        let swap = ctx.swaps().update_status(u1.id, swap.id, "completed").await.unwrap();
        assert_eq!(swap.status, SwapStatus::Completed);

        assert_eq!(ctx.points_of(u2.id).await, 50);
        assert_eq!(ctx.points_of(u1.id).await, 50);
        assert_eq!(ctx.status_of(item_a.id).await, ItemStatus::Swapped);

        // The swapped item can no longer be requested.
        let err = ctx
            .swaps()
            .create(u2.id, CreateSwapRequest::for_points(item_a.id))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidState(_)));
    }

    #[tokio::test]
    async fn test_self_swap_is_forbidden_even_when_not_approved() {
        let ctx = TestContext::new().await;
        let u1 = ctx.user("Uma", 500).await;
        let approved = ctx.approved_item(u1.id, 50).await;
        let pending = ctx.items().create(u1.id, jacket_request()).await.unwrap();

        for item_id in [approved.id, pending.id] {
            let err = ctx
                .swaps()
                .create(u1.id, CreateSwapRequest::for_points(item_id))
                .await
                .unwrap_err();
            assert!(matches!(err, AppError::Forbidden(_)), "item {item_id}: {err:?}");
        }
    }

    #[tokio::test]
    async fn test_points_swap_requires_balance_and_leaves_it_untouched() {
        let ctx = TestContext::new().await;
        let u1 = ctx.user("Uma", 0).await;
        let u2 = ctx.user("Vic", 49).await;
        let item = ctx.approved_item(u1.id, 50).await;

        let err = ctx
            .swaps()
            .create(u2.id, CreateSwapRequest::for_points(item.id))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::InsufficientFunds(_)));
        assert_eq!(ctx.points_of(u2.id).await, 49);
        assert!(ctx.swaps().list_for_user(u2.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_balance_is_rechecked_at_completion() {
        let ctx = TestContext::new().await;
        let u1 = ctx.user("Uma", 0).await;
        let u2 = ctx.user("Vic", 60).await;
        let u3 = ctx.user("Wes", 0).await;
        let first = ctx.approved_item(u1.id, 50).await;
        let second = ctx.approved_item(u3.id, 50).await;

        let a = ctx.swaps().create(u2.id, CreateSwapRequest::for_points(first.id)).await.unwrap();
        let b = ctx.swaps().create(u2.id, CreateSwapRequest::for_points(second.id)).await.unwrap();
        ctx.swaps().update_status(u1.id, a.id, "accepted").await.unwrap();
        ctx.swaps().update_status(u3.id, b.id, "accepted").await.unwrap();

        ctx.swaps().update_status(u1.id, a.id, "completed").await.unwrap();
        let err = ctx.swaps().update_status(u3.id, b.id, "completed").await.unwrap_err();

        assert!(matches!(err, AppError::InsufficientFunds(_)));
        // Nothing from the failed settlement persisted.
        assert_eq!(ctx.points_of(u2.id).await, 10);
        assert_eq!(ctx.points_of(u3.id).await, 0);
        assert_eq!(ctx.status_of(second.id).await, ItemStatus::Approved);
        let b = SwapRepository::get(&ctx.db, b.id).await.unwrap();
        assert_eq!(b.status, SwapStatus::Accepted);
    }

    #[tokio::test]
    async fn test_item_swap_marks_both_items_swapped() {
        let ctx = TestContext::new().await;
        let u1 = ctx.user("Uma", 0).await;
        let u2 = ctx.user("Vic", 0).await;
        let wanted = ctx.approved_item(u1.id, 50).await;
        let offered = ctx.approved_item(u2.id, 40).await;

        let swap = ctx
            .swaps()
            .create(u2.id, CreateSwapRequest::for_item(wanted.id, offered.id))
            .await
            .unwrap();
        assert_eq!(swap.points_amount(), 0);
        assert_eq!(swap.offered_item_id(), Some(offered.id));

        ctx.swaps().update_status(u1.id, swap.id, "accepted").await.unwrap();
        ctx.swaps().update_status(u1.id, swap.id, "completed").await.unwrap();

        assert_eq!(ctx.status_of(wanted.id).await, ItemStatus::Swapped);
        assert_eq!(ctx.status_of(offered.id).await, ItemStatus::Swapped);
        assert_eq!(ctx.points_of(u1.id).await, 0);
        assert_eq!(ctx.points_of(u2.id).await, 0);

        // Neither item can be referenced by a new swap.
        let u3 = ctx.user("Wes", 500).await;
        let third = ctx.approved_item(u3.id, 10).await;
        let err = ctx
            .swaps()
            .create(u3.id, CreateSwapRequest::for_points(wanted.id))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidState(_)));
        let err = ctx
            .swaps()
            .create(u2.id, CreateSwapRequest::for_item(third.id, offered.id))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidState(_)));
    }

    #[tokio::test]
    async fn test_offered_item_checks() {
        let ctx = TestContext::new().await;
        let u1 = ctx.user("Uma", 0).await;
        let u2 = ctx.user("Vic", 0).await;
        let wanted = ctx.approved_item(u1.id, 50).await;
        let not_mine = ctx.approved_item(u1.id, 50).await;
        let unreviewed = ctx.items().create(u2.id, jacket_request()).await.unwrap();

        let err = ctx
            .swaps()
            .create(u2.id, CreateSwapRequest::for_item(wanted.id, 999))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));

        let err = ctx
            .swaps()
            .create(u2.id, CreateSwapRequest::for_item(wanted.id, not_mine.id))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));

        let err = ctx
            .swaps()
            .create(u2.id, CreateSwapRequest::for_item(wanted.id, unreviewed.id))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidState(_)));
    }

    #[tokio::test]
    async fn test_missing_requested_item_is_not_found() {
        let ctx = TestContext::new().await;
        let u2 = ctx.user("Vic", 100).await;

        let err = ctx
            .swaps()
            .create(u2.id, CreateSwapRequest::for_points(404))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));

        let err = ctx
            .swaps()
            .create(u2.id, CreateSwapRequest::default())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_transition_roles() {
        let ctx = TestContext::new().await;
        let u1 = ctx.user("Uma", 0).await;
        let u2 = ctx.user("Vic", 100).await;
        let item = ctx.approved_item(u1.id, 50).await;
        let swap = ctx.swaps().create(u2.id, CreateSwapRequest::for_points(item.id)).await.unwrap();

        // Requester cannot accept or reject.
        for target in ["accepted", "rejected"] {
            let err = ctx.swaps().update_status(u2.id, swap.id, target).await.unwrap_err();
            assert!(matches!(err, AppError::Forbidden(_)), "{target}");
        }
        // Owner cannot cancel.
        let err = ctx.swaps().update_status(u1.id, swap.id, "cancelled").await.unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));

        // Completing straight from pending is a state violation.
        let err = ctx.swaps().update_status(u1.id, swap.id, "completed").await.unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));

        let swap = ctx.swaps().update_status(u2.id, swap.id, "cancelled").await.unwrap();
        assert_eq!(swap.status, SwapStatus::Cancelled);

        // Terminal: nothing else applies.
        let err = ctx.swaps().update_status(u1.id, swap.id, "accepted").await.unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));
    }

    #[tokio::test]
    async fn test_unknown_or_pending_target_is_invalid_input() {
        let ctx = TestContext::new().await;
        let u1 = ctx.user("Uma", 0).await;
        let u2 = ctx.user("Vic", 100).await;
        let item = ctx.approved_item(u1.id, 50).await;
        let swap = ctx.swaps().create(u2.id, CreateSwapRequest::for_points(item.id)).await.unwrap();

        for target in ["pending", "teleported"] {
            let err = ctx.swaps().update_status(u1.id, swap.id, target).await.unwrap_err();
            assert!(matches!(err, AppError::InvalidInput(_)), "{target}");
        }
    }

    #[tokio::test]
    async fn test_second_completion_on_same_item_conflicts() {
        let ctx = TestContext::new().await;
        let u1 = ctx.user("Uma", 0).await;
        let u2 = ctx.user("Vic", 100).await;
        let u3 = ctx.user("Wes", 100).await;
        let item = ctx.approved_item(u1.id, 50).await;

        let a = ctx.swaps().create(u2.id, CreateSwapRequest::for_points(item.id)).await.unwrap();
        let b = ctx.swaps().create(u3.id, CreateSwapRequest::for_points(item.id)).await.unwrap();
        ctx.swaps().update_status(u1.id, a.id, "accepted").await.unwrap();
        ctx.swaps().update_status(u1.id, b.id, "accepted").await.unwrap();

        ctx.swaps().update_status(u1.id, a.id, "completed").await.unwrap();
        let err = ctx.swaps().update_status(u1.id, b.id, "completed").await.unwrap_err();

        assert!(matches!(err, AppError::Conflict(_)));
        // Loser's points were not moved.
        assert_eq!(ctx.points_of(u3.id).await, 100);
        assert_eq!(ctx.points_of(u1.id).await, 50);
        let b = SwapRepository::get(&ctx.db, b.id).await.unwrap();
        assert_eq!(b.status, SwapStatus::Accepted);
    }

    #[tokio::test]
    async fn test_item_swap_rolls_back_when_offered_item_is_gone() {
        let ctx = TestContext::new().await;
        let u1 = ctx.user("Uma", 0).await;
        let u2 = ctx.user("Vic", 0).await;
        let u3 = ctx.user("Wes", 100).await;
        let wanted = ctx.approved_item(u1.id, 50).await;
        let offered = ctx.approved_item(u2.id, 40).await;

        let trade = ctx
            .swaps()
            .create(u2.id, CreateSwapRequest::for_item(wanted.id, offered.id))
            .await
            .unwrap();
        ctx.swaps().update_status(u1.id, trade.id, "accepted").await.unwrap();

        // The offered listing is bought out first.
        let buyout = ctx.swaps().create(u3.id, CreateSwapRequest::for_points(offered.id)).await.unwrap();
        ctx.swaps().update_status(u2.id, buyout.id, "accepted").await.unwrap();
        ctx.swaps().update_status(u2.id, buyout.id, "completed").await.unwrap();

        let err = ctx.swaps().update_status(u1.id, trade.id, "completed").await.unwrap_err();

        assert!(matches!(err, AppError::Conflict(_)), "{err:?}");
        // The requested listing was flipped inside the transaction, then undone.
        assert_eq!(ctx.status_of(wanted.id).await, ItemStatus::Approved);
        let trade = SwapRepository::get(&ctx.db, trade.id).await.unwrap();
        assert_eq!(trade.status, SwapStatus::Accepted);
    }

    #[tokio::test]
    async fn test_open_swap_blocks_listing_delete() {
        let ctx = TestContext::new().await;
        let u1 = ctx.user("Uma", 0).await;
        let u2 = ctx.user("Vic", 100).await;
        let admin = ctx.admin("Ada").await;
        let item = ctx.approved_item(u1.id, 50).await;

        let swap = ctx.swaps().create(u2.id, CreateSwapRequest::for_points(item.id)).await.unwrap();
        ctx.swaps().update_status(u1.id, swap.id, "accepted").await.unwrap();

        let err = ctx.items().delete(&u1, item.id).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidState(_)), "{err:?}");
        let err = ctx.admin_service().delete_item(item.id).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidState(_)), "{err:?}");
        let err = ctx.items().delete(&admin, item.id).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidState(_)), "{err:?}");

        // The accepted swap can still finish.
        let swap = ctx.swaps().update_status(u1.id, swap.id, "completed").await.unwrap();
        assert_eq!(swap.status, SwapStatus::Completed);
        assert_eq!(ctx.points_of(u1.id).await, 50);

        // Once closed, the listing can go.
        ctx.items().delete(&u1, item.id).await.unwrap();
        let err = ctx.items().delete(&u1, item.id).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_cancelled_swap_releases_listing() {
        let ctx = TestContext::new().await;
        let u1 = ctx.user("Uma", 0).await;
        let u2 = ctx.user("Vic", 100).await;
        let item = ctx.approved_item(u1.id, 50).await;

        let swap = ctx.swaps().create(u2.id, CreateSwapRequest::for_points(item.id)).await.unwrap();
        let err = ctx.items().delete(&u1, item.id).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidState(_)));

        ctx.swaps().update_status(u2.id, swap.id, "cancelled").await.unwrap();
        ctx.admin_service().delete_item(item.id).await.unwrap();
        assert!(ctx.items().list_for_owner(u1.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_points_are_conserved() {
        let ctx = TestContext::new().await;
        let u1 = ctx.user("Uma", 20).await;
        let u2 = ctx.user("Vic", 300).await;
        let item = ctx.approved_item(u1.id, 120).await;

        let before = ctx.points_of(u1.id).await + ctx.points_of(u2.id).await;

        let swap = ctx.swaps().create(u2.id, CreateSwapRequest::for_points(item.id)).await.unwrap();
        ctx.swaps().update_status(u1.id, swap.id, "accepted").await.unwrap();
        ctx.swaps().update_status(u1.id, swap.id, "completed").await.unwrap();

        let after = ctx.points_of(u1.id).await + ctx.points_of(u2.id).await;
        assert_eq!(before, after);
        assert_eq!(ctx.points_of(u2.id).await, 180);
    }

    #[tokio::test]
    async fn test_messages_and_opening_message() {
        let ctx = TestContext::new().await;
        let u1 = ctx.user("Uma", 0).await;
        let u2 = ctx.user("Vic", 100).await;
        let outsider = ctx.user("Wes", 0).await;
        let item = ctx.approved_item(u1.id, 50).await;

        let swap = ctx
            .swaps()
            .create(
                u2.id,
                CreateSwapRequest::for_points(item.id).with_message("Would love this jacket"),
            )
            .await
            .unwrap();
        assert_eq!(swap.messages.len(), 1);

        let thread = ctx.swaps().add_message(u1.id, swap.id, "It's yours").await.unwrap();
        assert_eq!(thread.len(), 2);
        assert_eq!(thread[1].sender_id, u1.id);

        let err = ctx.swaps().add_message(outsider.id, swap.id, "hi").await.unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));

        let err = ctx.swaps().add_message(u2.id, swap.id, "   ").await.unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));

        ctx.swaps().update_status(u1.id, swap.id, "rejected").await.unwrap();
        let err = ctx.swaps().add_message(u2.id, swap.id, "Why?").await.unwrap_err();
        assert!(matches!(err, AppError::InvalidState(_)));
    }

    #[tokio::test]
    async fn test_detail_is_populated_and_participant_only() {
        let ctx = TestContext::new().await;
        let u1 = ctx.user("Uma", 0).await;
        let u2 = ctx.user("Vic", 0).await;
        let outsider = ctx.user("Wes", 0).await;
        let wanted = ctx.approved_item(u1.id, 50).await;
        let offered = ctx.approved_item(u2.id, 50).await;
        let swap = ctx
            .swaps()
            .create(u2.id, CreateSwapRequest::for_item(wanted.id, offered.id))
            .await
            .unwrap();

        let detail = ctx.swaps().detail(u1.id, swap.id).await.unwrap();
        assert_eq!(detail.swap.id, swap.id);
        assert_eq!(detail.requested_item.unwrap().id, wanted.id);
        assert_eq!(detail.offered_item.unwrap().id, offered.id);
        assert_eq!(detail.requester.name, "Vic");
        assert_eq!(detail.owner.name, "Uma");

        let err = ctx.swaps().detail(outsider.id, swap.id).await.unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));
    }
}
