//! # Item Repository
//!
//! Listings and their ordered image references.
//!
//! Every status change is a compare-and-set on the current status, so two
//! writers racing on the same listing cannot both win. Callers decide whether
//! a lost race means `NotFound` or `Conflict` via [`ItemRepository::status_of`].

use super::models::{Item, ItemForCreate, ItemForUpdate, ItemRow};
use super::DbPool;
use crate::error::{AppError, Result};
use lib_utils::now_utc;
use shared::{ItemStatus, SwapStatus};
use sqlx::{query_as, Executor, Sqlite};

/// Item repository for database operations.
pub struct ItemRepository;

impl ItemRepository {
    /// Insert a listing in `pending` status.
    pub async fn create(pool: &DbPool, data: ItemForCreate) -> Result<Item> {
        let now = now_utc();
        let images = serde_json::to_string(&data.images)?;

        let result = sqlx::query(
            r#"
            INSERT INTO items (
                owner_id, title, description, category, condition, size, gender, brand,
                images, point_value, status, created_at, updated_at
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(data.owner_id)
        .bind(&data.title)
        .bind(&data.description)
        .bind(data.category.as_str())
        .bind(data.condition.as_str())
        .bind(&data.size)
        .bind(data.gender.map(|g| g.as_str()))
        .bind(&data.brand)
        .bind(images)
        .bind(data.point_value)
        .bind(ItemStatus::Pending.as_str())
        .bind(now)
        .bind(now)
        .execute(pool)
        .await?;

        Self::get(pool, result.last_insert_rowid()).await
    }

    /// Find a listing by id.
    pub async fn find_by_id<'e, E>(executor: E, id: i64) -> Result<Option<Item>>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        query_as::<_, ItemRow>("SELECT * FROM items WHERE id = ?")
            .bind(id)
            .fetch_optional(executor)
            .await?
            .map(Item::try_from)
            .transpose()
    }

    /// Find a listing by id, failing with `NotFound` when absent.
    pub async fn get(pool: &DbPool, id: i64) -> Result<Item> {
        Self::find_by_id(pool, id)
            .await?
            .ok_or_else(|| AppError::NotFound("Item not found".to_string()))
    }

    /// Listings in `status`, newest first.
    pub async fn list_by_status(pool: &DbPool, status: ItemStatus) -> Result<Vec<Item>> {
        let rows = query_as::<_, ItemRow>("SELECT * FROM items WHERE status = ? ORDER BY id DESC")
            .bind(status.as_str())
            .fetch_all(pool)
            .await?;
        rows.into_iter().map(Item::try_from).collect()
    }

    /// Every listing owned by `owner_id`, any status, newest first.
    pub async fn list_by_owner(pool: &DbPool, owner_id: i64) -> Result<Vec<Item>> {
        let rows = query_as::<_, ItemRow>("SELECT * FROM items WHERE owner_id = ? ORDER BY id DESC")
            .bind(owner_id)
            .fetch_all(pool)
            .await?;
        rows.into_iter().map(Item::try_from).collect()
    }

    /// Apply `changes` if the listing still holds `expected` status.
    ///
    /// Returns `false` when the listing is gone or its status moved.
    pub async fn update(
        pool: &DbPool,
        id: i64,
        expected: ItemStatus,
        changes: ItemForUpdate,
    ) -> Result<bool> {
        if changes.is_empty() {
            return Ok(Self::status_of(pool, id).await? == Some(expected));
        }

        let mut updates = Vec::new();

        if changes.title.is_some() {
            updates.push("title = ?");
        }
        if changes.description.is_some() {
            updates.push("description = ?");
        }
        if changes.category.is_some() {
            updates.push("category = ?");
        }
        if changes.condition.is_some() {
            updates.push("condition = ?");
        }
        if changes.size.is_some() {
            updates.push("size = ?");
        }
        if changes.gender.is_some() {
            updates.push("gender = ?");
        }
        if changes.brand.is_some() {
            updates.push("brand = ?");
        }
        if changes.images.is_some() {
            updates.push("images = ?");
        }
        if changes.point_value.is_some() {
            updates.push("point_value = ?");
        }
        if changes.status.is_some() {
            updates.push("status = ?");
        }
        updates.push("updated_at = ?");

        let query_str = format!(
            "UPDATE items SET {} WHERE id = ? AND status = ?",
            updates.join(", ")
        );

        let mut query = sqlx::query(&query_str);

        if let Some(title) = changes.title {
            query = query.bind(title);
        }
        if let Some(description) = changes.description {
            query = query.bind(description);
        }
        if let Some(category) = changes.category {
            query = query.bind(category.as_str());
        }
        if let Some(condition) = changes.condition {
            query = query.bind(condition.as_str());
        }
        if let Some(size) = changes.size {
            query = query.bind(size);
        }
        if let Some(gender) = changes.gender {
            query = query.bind(gender.map(|g| g.as_str()));
        }
        if let Some(brand) = changes.brand {
            query = query.bind(brand);
        }
        if let Some(images) = changes.images {
            query = query.bind(serde_json::to_string(&images)?);
        }
        if let Some(point_value) = changes.point_value {
            query = query.bind(point_value);
        }
        if let Some(status) = changes.status {
            query = query.bind(status.as_str());
        }

        let result = query
            .bind(now_utc())
            .bind(id)
            .bind(expected.as_str())
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Move a listing from `from` to `to`.
    ///
    /// Returns `false` when the listing is gone or no longer in `from`.
    pub async fn set_status<'e, E>(
        executor: E,
        id: i64,
        from: ItemStatus,
        to: ItemStatus,
    ) -> Result<bool>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let result = sqlx::query(
            "UPDATE items SET status = ?, updated_at = ? WHERE id = ? AND status = ?",
        )
        .bind(to.as_str())
        .bind(now_utc())
        .bind(id)
        .bind(from.as_str())
        .execute(executor)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Current status, or `None` when the listing does not exist.
    pub async fn status_of<'e, E>(executor: E, id: i64) -> Result<Option<ItemStatus>>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let status: Option<(String,)> = query_as("SELECT status FROM items WHERE id = ?")
            .bind(id)
            .fetch_optional(executor)
            .await?;

        Ok(status.map(|(s,)| s.parse::<ItemStatus>()).transpose()?)
    }

    /// Remove a listing unless a `pending` or `accepted` swap still names it.
    ///
    /// Returns `false` when the listing is gone or still referenced; tell the
    /// two apart with [`ItemRepository::status_of`].
    pub async fn delete(pool: &DbPool, id: i64) -> Result<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM items
            WHERE id = ?
              AND NOT EXISTS (
                  SELECT 1 FROM swaps
                  WHERE (requested_item_id = ? OR offered_item_id = ?)
                    AND status IN (?, ?)
              )
            "#,
        )
        .bind(id)
        .bind(id)
        .bind(id)
        .bind(SwapStatus::Pending.as_str())
        .bind(SwapStatus::Accepted.as_str())
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Listing count per status. Statuses with no listings are omitted.
    pub async fn count_by_status(pool: &DbPool) -> Result<Vec<(ItemStatus, i64)>> {
        let rows: Vec<(String, i64)> =
            query_as("SELECT status, COUNT(*) FROM items GROUP BY status")
                .fetch_all(pool)
                .await?;

        rows.into_iter()
            .map(|(status, count)| -> Result<(ItemStatus, i64)> {
                Ok((status.parse::<ItemStatus>()?, count))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::store::{create_memory_pool, SwapForCreate, SwapRepository, SwapTerms};
    use shared::{Category, Condition, Gender};

    async fn setup_test_db() -> DbPool {
        create_memory_pool()
            .await
            .expect("Failed to create test database")
    }

    fn jacket(owner_id: i64) -> ItemForCreate {
        ItemForCreate {
            owner_id,
            title: "Denim jacket".to_string(),
            description: "Barely worn".to_string(),
            category: Category::Outerwear,
            condition: Condition::LikeNew,
            size: "M".to_string(),
            gender: Some(Gender::Unisex),
            brand: None,
            images: vec![
                "https://img.example.com/front.jpg".to_string(),
                "https://img.example.com/back.jpg".to_string(),
            ],
            point_value: 50,
        }
    }

    #[tokio::test]
    async fn test_create_starts_pending_and_keeps_image_order() {
        let pool = setup_test_db().await;

        let item = ItemRepository::create(&pool, jacket(1)).await.unwrap();

        assert_eq!(item.status, ItemStatus::Pending);
        assert_eq!(item.category, Category::Outerwear);
        assert_eq!(item.gender, Some(Gender::Unisex));
        assert_eq!(item.images[0], "https://img.example.com/front.jpg");
        assert_eq!(item.images.len(), 2);
    }

    #[tokio::test]
    async fn test_set_status_is_compare_and_set() {
        let pool = setup_test_db().await;
        let item = ItemRepository::create(&pool, jacket(1)).await.unwrap();

        assert!(
            ItemRepository::set_status(&pool, item.id, ItemStatus::Pending, ItemStatus::Approved)
                .await
                .unwrap()
        );
        // Second writer expecting `pending` loses.
        assert!(
            !ItemRepository::set_status(&pool, item.id, ItemStatus::Pending, ItemStatus::Rejected)
                .await
                .unwrap()
        );
        assert_eq!(
            ItemRepository::status_of(&pool, item.id).await.unwrap(),
            Some(ItemStatus::Approved)
        );
        assert_eq!(ItemRepository::status_of(&pool, 404).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_update_applies_only_given_fields() {
        let pool = setup_test_db().await;
        let item = ItemRepository::create(&pool, jacket(1)).await.unwrap();

        let changes = ItemForUpdate {
            title: Some("Denim jacket (washed)".to_string()),
            point_value: Some(80),
            ..Default::default()
        };
        assert!(ItemRepository::update(&pool, item.id, ItemStatus::Pending, changes)
            .await
            .unwrap());

        let updated = ItemRepository::get(&pool, item.id).await.unwrap();
        assert_eq!(updated.title, "Denim jacket (washed)");
        assert_eq!(updated.point_value, 80);
        assert_eq!(updated.description, "Barely worn");
        assert_eq!(updated.images, item.images);
    }

    #[tokio::test]
    async fn test_update_clears_optional_columns() {
        let pool = setup_test_db().await;
        let item = ItemRepository::create(
            &pool,
            ItemForCreate {
                brand: Some("Levi's".to_string()),
                ..jacket(1)
            },
        )
        .await
        .unwrap();

        let changes = ItemForUpdate {
            gender: Some(None),
            brand: Some(None),
            ..Default::default()
        };
        assert!(ItemRepository::update(&pool, item.id, ItemStatus::Pending, changes)
            .await
            .unwrap());

        let updated = ItemRepository::get(&pool, item.id).await.unwrap();
        assert_eq!(updated.gender, None);
        assert_eq!(updated.brand, None);
        assert_eq!(updated.title, item.title);
    }

    #[tokio::test]
    async fn test_update_fails_when_status_moved() {
        let pool = setup_test_db().await;
        let item = ItemRepository::create(&pool, jacket(1)).await.unwrap();

        let changes = ItemForUpdate {
            size: Some("L".to_string()),
            ..Default::default()
        };
        assert!(!ItemRepository::update(&pool, item.id, ItemStatus::Approved, changes)
            .await
            .unwrap());
        assert_eq!(ItemRepository::get(&pool, item.id).await.unwrap().size, "M");
    }

    #[tokio::test]
    async fn test_listing_queries() {
        let pool = setup_test_db().await;
        let first = ItemRepository::create(&pool, jacket(1)).await.unwrap();
        let second = ItemRepository::create(&pool, jacket(1)).await.unwrap();
        let other = ItemRepository::create(&pool, jacket(2)).await.unwrap();

        ItemRepository::set_status(&pool, first.id, ItemStatus::Pending, ItemStatus::Approved)
            .await
            .unwrap();
        ItemRepository::set_status(&pool, other.id, ItemStatus::Pending, ItemStatus::Approved)
            .await
            .unwrap();

        let approved: Vec<i64> = ItemRepository::list_by_status(&pool, ItemStatus::Approved)
            .await
            .unwrap()
            .iter()
            .map(|i| i.id)
            .collect();
        assert_eq!(approved, vec![other.id, first.id]);

        let mine: Vec<i64> = ItemRepository::list_by_owner(&pool, 1)
            .await
            .unwrap()
            .iter()
            .map(|i| i.id)
            .collect();
        assert_eq!(mine, vec![second.id, first.id]);

        let mut counts = ItemRepository::count_by_status(&pool).await.unwrap();
        counts.sort_by_key(|(s, _)| s.as_str());
        assert_eq!(
            counts,
            vec![(ItemStatus::Approved, 2), (ItemStatus::Pending, 1)]
        );
    }

    #[tokio::test]
    async fn test_delete() {
        let pool = setup_test_db().await;
        let item = ItemRepository::create(&pool, jacket(1)).await.unwrap();

        assert!(ItemRepository::delete(&pool, item.id).await.unwrap());
        assert!(!ItemRepository::delete(&pool, item.id).await.unwrap());
        assert!(ItemRepository::find_by_id(&pool, item.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_refused_while_open_swap_references_item() {
        let pool = setup_test_db().await;
        let wanted = ItemRepository::create(&pool, jacket(1)).await.unwrap();
        let offered = ItemRepository::create(&pool, jacket(2)).await.unwrap();

        let swap = SwapRepository::create(
            &pool,
            SwapForCreate {
                requester_id: 2,
                owner_id: 1,
                requested_item_id: wanted.id,
                terms: SwapTerms::Item { offered_item_id: offered.id },
                message: None,
            },
        )
        .await
        .unwrap();

        // Pending and accepted swaps both hold on to either side.
        assert!(!ItemRepository::delete(&pool, wanted.id).await.unwrap());
        assert!(!ItemRepository::delete(&pool, offered.id).await.unwrap());

        SwapRepository::set_status(&pool, swap.id, SwapStatus::Pending, SwapStatus::Accepted)
            .await
            .unwrap();
        assert!(!ItemRepository::delete(&pool, wanted.id).await.unwrap());
        assert!(ItemRepository::find_by_id(&pool, wanted.id).await.unwrap().is_some());

        // A closed swap no longer blocks.
        SwapRepository::set_status(&pool, swap.id, SwapStatus::Accepted, SwapStatus::Completed)
            .await
            .unwrap();
        assert!(ItemRepository::delete(&pool, wanted.id).await.unwrap());
        assert!(ItemRepository::delete(&pool, offered.id).await.unwrap());
    }
}
