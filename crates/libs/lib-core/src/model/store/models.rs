//! # Store Models
//!
//! Row types read from SQLite and the domain structs built from them.
//! Enum columns are stored as their wire labels and parsed on the way out.

use crate::error::AppError;
use chrono::{DateTime, Utc};
use shared::{
    Category, Condition, Gender, ItemDto, ItemStatus, SwapDto, SwapMessageDto, SwapStatus,
    UserDto, UserSummary,
};
use sqlx::FromRow;

// region: --- User

/// User record. Profiles are issued outside the API; only `points` and
/// `is_admin` change through it.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub points: i64,
    pub is_admin: bool,
    pub location: Option<String>,
    pub avatar: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            points: user.points,
            is_admin: user.is_admin,
            location: user.location,
            avatar: user.avatar,
            created_at: user.created_at,
        }
    }
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            avatar: user.avatar.clone(),
            location: user.location.clone(),
        }
    }
}

/// Data for creating a user.
#[derive(Debug, Clone)]
pub struct UserForCreate {
    pub name: String,
    pub email: String,
    pub points: i64,
    pub is_admin: bool,
    pub location: Option<String>,
    pub avatar: Option<String>,
}

impl UserForCreate {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            points: 0,
            is_admin: false,
            location: None,
            avatar: None,
        }
    }

    /// Set the starting balance.
    pub fn points(mut self, points: i64) -> Self {
        self.points = points;
        self
    }

    /// Grant the admin role.
    pub fn admin(mut self, is_admin: bool) -> Self {
        self.is_admin = is_admin;
        self
    }

    pub fn location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }
}

// endregion: --- User

// region: --- Item

/// Raw `items` row.
#[derive(Debug, Clone, FromRow)]
pub struct ItemRow {
    pub id: i64,
    pub owner_id: i64,
    pub title: String,
    pub description: String,
    pub category: String,
    pub condition: String,
    pub size: String,
    pub gender: Option<String>,
    pub brand: Option<String>,
    pub images: String,
    pub point_value: i64,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A clothing listing.
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    pub id: i64,
    pub owner_id: i64,
    pub title: String,
    pub description: String,
    pub category: Category,
    pub condition: Condition,
    pub size: String,
    pub gender: Option<Gender>,
    pub brand: Option<String>,
    /// Ordered image references; the first is the cover.
    pub images: Vec<String>,
    pub point_value: i64,
    pub status: ItemStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Item {
    pub fn is_owned_by(&self, user_id: i64) -> bool {
        self.owner_id == user_id
    }
}

impl TryFrom<ItemRow> for Item {
    type Error = AppError;

    fn try_from(row: ItemRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            owner_id: row.owner_id,
            title: row.title,
            description: row.description,
            category: row.category.parse()?,
            condition: row.condition.parse()?,
            size: row.size,
            gender: row.gender.map(|g| g.parse::<Gender>()).transpose()?,
            brand: row.brand,
            images: serde_json::from_str(&row.images)?,
            point_value: row.point_value,
            status: row.status.parse()?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

impl From<Item> for ItemDto {
    fn from(item: Item) -> Self {
        Self {
            id: item.id,
            owner_id: item.owner_id,
            title: item.title,
            description: item.description,
            category: item.category,
            condition: item.condition,
            size: item.size,
            gender: item.gender,
            brand: item.brand,
            images: item.images,
            point_value: item.point_value,
            status: item.status,
            created_at: item.created_at,
        }
    }
}

/// Validated data for a new listing. Listings always start `pending`.
#[derive(Debug, Clone)]
pub struct ItemForCreate {
    pub owner_id: i64,
    pub title: String,
    pub description: String,
    pub category: Category,
    pub condition: Condition,
    pub size: String,
    pub gender: Option<Gender>,
    pub brand: Option<String>,
    pub images: Vec<String>,
    pub point_value: i64,
}

/// Partial listing update. Only `Some` fields are written.
#[derive(Debug, Clone, Default)]
pub struct ItemForUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<Category>,
    pub condition: Option<Condition>,
    pub size: Option<String>,
    /// `Some(None)` clears the column.
    pub gender: Option<Option<Gender>>,
    /// `Some(None)` clears the column.
    pub brand: Option<Option<String>>,
    pub images: Option<Vec<String>>,
    pub point_value: Option<i64>,
    pub status: Option<ItemStatus>,
}

impl ItemForUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the listing status alongside the field changes.
    pub fn status(mut self, status: ItemStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.category.is_none()
            && self.condition.is_none()
            && self.size.is_none()
            && self.gender.is_none()
            && self.brand.is_none()
            && self.images.is_none()
            && self.point_value.is_none()
            && self.status.is_none()
    }
}

// endregion: --- Item

// region: --- Swap

/// Raw `swaps` row.
#[derive(Debug, Clone, FromRow)]
pub struct SwapRow {
    pub id: i64,
    pub requester_id: i64,
    pub owner_id: i64,
    pub requested_item_id: i64,
    pub offered_item_id: Option<i64>,
    pub is_points_swap: bool,
    pub points_amount: i64,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// What the requester gives in return for the requested item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwapTerms {
    /// Pay the requested item's point value, captured at creation.
    Points { amount: i64 },
    /// Hand over one of the requester's own approved listings.
    Item { offered_item_id: i64 },
}

/// One message in a swap thread.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct SwapMessage {
    pub id: i64,
    pub swap_id: i64,
    pub sender_id: i64,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

impl From<SwapMessage> for SwapMessageDto {
    fn from(message: SwapMessage) -> Self {
        Self {
            sender_id: message.sender_id,
            text: message.text,
            created_at: message.created_at,
        }
    }
}

/// A swap request with its message thread in send order.
#[derive(Debug, Clone, PartialEq)]
pub struct Swap {
    pub id: i64,
    pub requester_id: i64,
    pub owner_id: i64,
    pub requested_item_id: i64,
    pub terms: SwapTerms,
    pub status: SwapStatus,
    pub messages: Vec<SwapMessage>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Swap {
    /// Build from a row and its already-loaded thread.
    pub fn from_row(row: SwapRow, messages: Vec<SwapMessage>) -> Result<Self, AppError> {
        let terms = match (row.is_points_swap, row.offered_item_id) {
            (true, None) => SwapTerms::Points {
                amount: row.points_amount,
            },
            (false, Some(offered_item_id)) => SwapTerms::Item { offered_item_id },
            _ => {
                return Err(AppError::Internal(format!(
                    "Swap {} has inconsistent terms",
                    row.id
                )))
            }
        };

        Ok(Self {
            id: row.id,
            requester_id: row.requester_id,
            owner_id: row.owner_id,
            requested_item_id: row.requested_item_id,
            terms,
            status: row.status.parse()?,
            messages,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }

    /// Requester or owner.
    pub fn is_participant(&self, user_id: i64) -> bool {
        self.requester_id == user_id || self.owner_id == user_id
    }

    pub fn offered_item_id(&self) -> Option<i64> {
        match self.terms {
            SwapTerms::Item { offered_item_id } => Some(offered_item_id),
            SwapTerms::Points { .. } => None,
        }
    }

    pub fn points_amount(&self) -> i64 {
        match self.terms {
            SwapTerms::Points { amount } => amount,
            SwapTerms::Item { .. } => 0,
        }
    }
}

impl From<Swap> for SwapDto {
    fn from(swap: Swap) -> Self {
        let offered_item_id = swap.offered_item_id();
        let points_amount = swap.points_amount();
        Self {
            id: swap.id,
            requester_id: swap.requester_id,
            owner_id: swap.owner_id,
            requested_item_id: swap.requested_item_id,
            offered_item_id,
            is_points_swap: matches!(swap.terms, SwapTerms::Points { .. }),
            points_amount,
            status: swap.status,
            messages: swap.messages.into_iter().map(Into::into).collect(),
            created_at: swap.created_at,
        }
    }
}

/// Data for a new swap request. Swaps always start `pending`.
#[derive(Debug, Clone)]
pub struct SwapForCreate {
    pub requester_id: i64,
    pub owner_id: i64,
    pub requested_item_id: i64,
    pub terms: SwapTerms,
    /// Opening message, stored as the first entry of the thread.
    pub message: Option<String>,
}

// endregion: --- Swap
