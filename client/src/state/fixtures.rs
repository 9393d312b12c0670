//! DTO builders for store and controller tests.

use chrono::{TimeZone, Utc};
use shared::{
    Category, Condition, ItemDto, ItemStatus, SwapDetailResponse, SwapDto, SwapMessageDto,
    SwapStatus, UserDto, UserSummary,
};

pub const OWNER: i64 = 1;
pub const REQUESTER: i64 = 2;

fn at() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
}

pub fn user(id: i64, points: i64, is_admin: bool) -> UserDto {
    UserDto {
        id,
        name: format!("user{}", id),
        email: format!("user{}@rewear.test", id),
        points,
        is_admin,
        location: None,
        avatar: None,
        created_at: at(),
    }
}

pub fn item(id: i64, status: ItemStatus) -> ItemDto {
    ItemDto {
        id,
        owner_id: OWNER,
        title: "Denim jacket".to_string(),
        description: "Classic fit".to_string(),
        category: Category::Outerwear,
        condition: Condition::LikeNew,
        size: "M".to_string(),
        gender: None,
        brand: None,
        images: vec!["https://cdn.rewear.test/1.jpg".to_string()],
        point_value: 50,
        status,
        created_at: at(),
    }
}

pub fn swap(id: i64, status: SwapStatus) -> SwapDto {
    SwapDto {
        id,
        requester_id: REQUESTER,
        owner_id: OWNER,
        requested_item_id: 100 + id,
        offered_item_id: None,
        is_points_swap: true,
        points_amount: 50,
        status,
        messages: Vec::new(),
        created_at: at(),
    }
}

pub fn detail(swap: SwapDto) -> SwapDetailResponse {
    let summary = |id: i64| UserSummary {
        id,
        name: format!("user{}", id),
        avatar: None,
        location: None,
    };
    SwapDetailResponse {
        requested_item: Some(item(swap.requested_item_id, ItemStatus::Approved)),
        offered_item: None,
        requester: summary(swap.requester_id),
        owner: summary(swap.owner_id),
        swap,
    }
}

pub fn message(sender_id: i64, text: &str) -> SwapMessageDto {
    SwapMessageDto {
        sender_id,
        text: text.to_string(),
        created_at: at(),
    }
}
