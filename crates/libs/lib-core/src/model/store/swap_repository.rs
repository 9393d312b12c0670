//! # Swap Repository
//!
//! Swap requests and their message threads.
//!
//! A swap row and its opening message are written in one transaction.
//! Status changes are compare-and-set on the current status; settlement
//! composes [`SwapRepository::set_status`] with the user and item
//! repositories inside a caller-owned transaction.

use super::models::{Swap, SwapForCreate, SwapMessage, SwapRow, SwapTerms};
use super::DbPool;
use crate::error::{AppError, Result};
use lib_utils::now_utc;
use shared::SwapStatus;
use sqlx::{query_as, Executor, Sqlite};
use std::collections::HashMap;

/// Swap repository for database operations.
pub struct SwapRepository;

impl SwapRepository {
    /// Insert a `pending` swap and, if given, its opening message.
    pub async fn create(pool: &DbPool, data: SwapForCreate) -> Result<Swap> {
        let now = now_utc();
        let (is_points_swap, points_amount, offered_item_id) = match data.terms {
            SwapTerms::Points { amount } => (true, amount, None),
            SwapTerms::Item { offered_item_id } => (false, 0, Some(offered_item_id)),
        };

        let mut tx = pool.begin().await?;

        let result = sqlx::query(
            r#"
            INSERT INTO swaps (
                requester_id, owner_id, requested_item_id, offered_item_id,
                is_points_swap, points_amount, status, created_at, updated_at
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(data.requester_id)
        .bind(data.owner_id)
        .bind(data.requested_item_id)
        .bind(offered_item_id)
        .bind(is_points_swap)
        .bind(points_amount)
        .bind(SwapStatus::Pending.as_str())
        .bind(now)
        .bind(now)
        .execute(&mut *tx)
        .await?;

        let id = result.last_insert_rowid();

        if let Some(text) = data.message.as_deref() {
            sqlx::query(
                "INSERT INTO swap_messages (swap_id, sender_id, text, created_at) VALUES (?, ?, ?, ?)",
            )
            .bind(id)
            .bind(data.requester_id)
            .bind(text)
            .bind(now)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Self::get(pool, id).await
    }

    /// Find a swap with its thread.
    pub async fn find_by_id(pool: &DbPool, id: i64) -> Result<Option<Swap>> {
        let Some(row) = query_as::<_, SwapRow>("SELECT * FROM swaps WHERE id = ?")
            .bind(id)
            .fetch_optional(pool)
            .await?
        else {
            return Ok(None);
        };

        let messages = Self::messages(pool, id).await?;
        Swap::from_row(row, messages).map(Some)
    }

    /// Find a swap, failing with `NotFound` when absent.
    pub async fn get(pool: &DbPool, id: i64) -> Result<Swap> {
        Self::find_by_id(pool, id)
            .await?
            .ok_or_else(|| AppError::NotFound("Swap not found".to_string()))
    }

    /// Swaps where `user_id` is requester or owner, newest first.
    pub async fn list_for_user(pool: &DbPool, user_id: i64) -> Result<Vec<Swap>> {
        let rows = query_as::<_, SwapRow>(
            "SELECT * FROM swaps WHERE requester_id = ? OR owner_id = ? ORDER BY id DESC",
        )
        .bind(user_id)
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        let messages = query_as::<_, SwapMessage>(
            r#"
            SELECT m.* FROM swap_messages m
            JOIN swaps s ON s.id = m.swap_id
            WHERE s.requester_id = ? OR s.owner_id = ?
            ORDER BY m.id
            "#,
        )
        .bind(user_id)
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        let mut threads: HashMap<i64, Vec<SwapMessage>> = HashMap::new();
        for message in messages {
            threads.entry(message.swap_id).or_default().push(message);
        }

        rows.into_iter()
            .map(|row| {
                let thread = threads.remove(&row.id).unwrap_or_default();
                Swap::from_row(row, thread)
            })
            .collect()
    }

    /// Thread of one swap in send order.
    pub async fn messages(pool: &DbPool, swap_id: i64) -> Result<Vec<SwapMessage>> {
        let messages = query_as::<_, SwapMessage>(
            "SELECT * FROM swap_messages WHERE swap_id = ? ORDER BY id",
        )
        .bind(swap_id)
        .fetch_all(pool)
        .await?;
        Ok(messages)
    }

    /// Append a message if the swap still accepts messages.
    ///
    /// The status check and the insert are a single statement, so a message
    /// cannot slip in after a concurrent reject or cancel. Returns `false`
    /// when the swap is gone or closed to messages.
    pub async fn add_message(pool: &DbPool, swap_id: i64, sender_id: i64, text: &str) -> Result<bool> {
        let closed: Vec<&str> = SwapStatus::ALL
            .iter()
            .filter(|s| !s.accepts_messages())
            .map(|s| s.as_str())
            .collect();
        let placeholders = vec!["?"; closed.len()].join(", ");

        let query_str = format!(
            r#"
            INSERT INTO swap_messages (swap_id, sender_id, text, created_at)
            SELECT id, ?, ?, ? FROM swaps WHERE id = ? AND status NOT IN ({})
            "#,
            placeholders
        );

        let mut query = sqlx::query(&query_str)
            .bind(sender_id)
            .bind(text)
            .bind(now_utc())
            .bind(swap_id);
        for status in closed {
            query = query.bind(status);
        }

        let result = query.execute(pool).await?;
        Ok(result.rows_affected() > 0)
    }

    /// Move a swap from `from` to `to`.
    ///
    /// Returns `false` when the swap is gone or no longer in `from`.
    pub async fn set_status<'e, E>(executor: E, id: i64, from: SwapStatus, to: SwapStatus) -> Result<bool>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let result = sqlx::query(
            "UPDATE swaps SET status = ?, updated_at = ? WHERE id = ? AND status = ?",
        )
        .bind(to.as_str())
        .bind(now_utc())
        .bind(id)
        .bind(from.as_str())
        .execute(executor)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Swap count per status. Statuses with no swaps are omitted.
    pub async fn count_by_status(pool: &DbPool) -> Result<Vec<(SwapStatus, i64)>> {
        let rows: Vec<(String, i64)> =
            query_as("SELECT status, COUNT(*) FROM swaps GROUP BY status")
                .fetch_all(pool)
                .await?;

        rows.into_iter()
            .map(|(status, count)| -> Result<(SwapStatus, i64)> {
                Ok((status.parse::<SwapStatus>()?, count))
            })
            .collect()
    }
}
