//! # Item Service
//!
//! Listing CRUD. Create and edit forms are validated field by field and all
//! problems are returned together. Editing an approved listing sends it back
//! to moderation.

use lib_core::model::store::{Item, ItemForCreate, ItemForUpdate, ItemRepository, User};
use lib_core::{AppError, DbPool, Result};
use lib_utils::{validate_image_ref, validate_not_empty, validate_positive, Validator};
use shared::{Category, Condition, CreateItemRequest, Gender, ItemStatus, UpdateItemRequest};
use std::str::FromStr;
use tracing::{info, instrument};

/// Listing store.
#[derive(Clone)]
pub struct ItemService {
    db: DbPool,
    default_point_value: i64,
}

impl ItemService {
    pub fn new(db: DbPool, default_point_value: i64) -> Self {
        Self {
            db,
            default_point_value,
        }
    }

    /// Create a `pending` listing owned by `owner_id`.
    #[instrument(skip(self, req))]
    pub async fn create(&self, owner_id: i64, req: CreateItemRequest) -> Result<Item> {
        let mut v = Validator::new();

        v.check("title", validate_not_empty(&req.title, "Title"))
            .check("description", validate_not_empty(&req.description, "Description"))
            .check("size", validate_not_empty(&req.size, "Size"));

        let category = parse_label::<Category>(&mut v, "category", "Category", Some(req.category.as_str()));
        let condition =
            parse_label::<Condition>(&mut v, "condition", "Condition", Some(req.condition.as_str()));
        let gender = parse_label::<Gender>(&mut v, "gender", "Gender", req.gender.as_deref());

        check_images(&mut v, &req.images);

        let point_value = req.point_value.unwrap_or(self.default_point_value);
        v.check("pointValue", validate_positive(point_value, "Point value"));

        v.finish()?;

        let (Some(category), Some(condition)) = (category, condition) else {
            return Err(AppError::Internal("validated labels missing".to_string()));
        };

        let item = ItemRepository::create(
            &self.db,
            ItemForCreate {
                owner_id,
                title: req.title.trim().to_string(),
                description: req.description.trim().to_string(),
                category,
                condition,
                size: req.size.trim().to_string(),
                gender,
                brand: non_blank(req.brand),
                images: trimmed(req.images),
                point_value,
            },
        )
        .await?;

        info!(item_id = item.id, "Listing created, awaiting review");
        Ok(item)
    }

    /// Approved listings for public browsing, newest first.
    pub async fn list_approved(&self) -> Result<Vec<Item>> {
        ItemRepository::list_by_status(&self.db, ItemStatus::Approved).await
    }

    /// Every listing of `owner_id`, any status, newest first.
    pub async fn list_for_owner(&self, owner_id: i64) -> Result<Vec<Item>> {
        ItemRepository::list_by_owner(&self.db, owner_id).await
    }

    pub async fn get(&self, id: i64) -> Result<Item> {
        ItemRepository::get(&self.db, id).await
    }

    /// Partial update by the owner.
    ///
    /// Only supplied fields change. A blank `gender` or `brand` clears it.
    /// An approved listing returns to `pending`.
    #[instrument(skip(self, req))]
    pub async fn update(&self, actor_id: i64, id: i64, req: UpdateItemRequest) -> Result<Item> {
        let item = ItemRepository::get(&self.db, id).await?;

        if !item.is_owned_by(actor_id) {
            return Err(AppError::Forbidden(
                "Only the owner can edit this item".to_string(),
            ));
        }

        if item.status == ItemStatus::Swapped {
            return Err(AppError::InvalidState(
                "Swapped items can no longer be edited".to_string(),
            ));
        }

        let mut v = Validator::new();

        if let Some(title) = &req.title {
            v.check("title", validate_not_empty(title, "Title"));
        }
        if let Some(description) = &req.description {
            v.check("description", validate_not_empty(description, "Description"));
        }
        if let Some(size) = &req.size {
            v.check("size", validate_not_empty(size, "Size"));
        }
        let category = parse_label::<Category>(&mut v, "category", "Category", req.category.as_deref());
        let condition =
            parse_label::<Condition>(&mut v, "condition", "Condition", req.condition.as_deref());
        let gender = match req.gender.as_deref().map(str::trim) {
            None => None,
            Some("") => Some(None),
            Some(label) => parse_label::<Gender>(&mut v, "gender", "Gender", Some(label)).map(Some),
        };
        if let Some(images) = &req.images {
            check_images(&mut v, images);
        }
        if let Some(point_value) = req.point_value {
            v.check("pointValue", validate_positive(point_value, "Point value"));
        }

        v.finish()?;

        let mut changes = ItemForUpdate {
            title: req.title.map(|s| s.trim().to_string()),
            description: req.description.map(|s| s.trim().to_string()),
            category,
            condition,
            size: req.size.map(|s| s.trim().to_string()),
            gender,
            brand: req.brand.map(|brand| non_blank(Some(brand))),
            images: req.images.map(trimmed),
            point_value: req.point_value,
            status: None,
        };

        if item.status == ItemStatus::Approved && !changes.is_empty() {
            changes = changes.status(ItemStatus::Pending);
        }

        if !ItemRepository::update(&self.db, id, item.status, changes).await? {
            return Err(lost_race(&self.db, id).await);
        }

        let updated = ItemRepository::get(&self.db, id).await?;
        if updated.status != item.status {
            info!(item_id = id, "Approved listing edited, back to review");
        }
        Ok(updated)
    }

    /// Delete a listing. Allowed for its owner or any admin, and only while
    /// no `pending` or `accepted` swap refers to it.
    #[instrument(skip(self, actor), fields(actor_id = actor.id))]
    pub async fn delete(&self, actor: &User, id: i64) -> Result<()> {
        let item = ItemRepository::get(&self.db, id).await?;

        if !item.is_owned_by(actor.id) && !actor.is_admin {
            return Err(AppError::Forbidden(
                "Only the owner or an admin can delete this item".to_string(),
            ));
        }

        if !ItemRepository::delete(&self.db, id).await? {
            return Err(refused_delete(&self.db, id).await);
        }

        info!(item_id = id, "Listing deleted");
        Ok(())
    }
}

// region: --- Helpers

/// Parse an optional enum label, recording a field error for unknown values.
///
/// A required label is passed as `Some`, so blank input is reported too.
fn parse_label<T>(v: &mut Validator, field: &str, label: &str, value: Option<&str>) -> Option<T>
where
    T: FromStr + Copy,
{
    let value = value?;
    if value.trim().is_empty() {
        v.push(field, format!("{} is required", label));
        return None;
    }
    match value.trim().parse::<T>() {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            v.push(field, format!("{} '{}' is not recognised", label, value.trim()));
            None
        }
    }
}

fn check_images(v: &mut Validator, images: &[String]) {
    if images.iter().all(|i| i.trim().is_empty()) {
        v.push("images", "At least one image is required");
        return;
    }
    for (idx, image) in images.iter().enumerate() {
        if let Err(message) = validate_image_ref(image) {
            v.push(&format!("images[{}]", idx), message);
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn trimmed(images: Vec<String>) -> Vec<String> {
    images.into_iter().map(|i| i.trim().to_string()).collect()
}

/// Classify a failed compare-and-set on a listing.
async fn lost_race(db: &DbPool, id: i64) -> AppError {
    match ItemRepository::status_of(db, id).await {
        Ok(None) => AppError::NotFound("Item not found".to_string()),
        Ok(Some(_)) => AppError::Conflict("Item was modified concurrently, reload and retry".to_string()),
        Err(e) => e,
    }
}

/// Classify a delete that removed nothing.
pub(crate) async fn refused_delete(db: &DbPool, id: i64) -> AppError {
    match ItemRepository::status_of(db, id).await {
        Ok(None) => AppError::NotFound("Item not found".to_string()),
        Ok(Some(_)) => AppError::InvalidState(
            "Item is part of an open swap; resolve the swap first".to_string(),
        ),
        Err(e) => e,
    }
}

// endregion: --- Helpers
