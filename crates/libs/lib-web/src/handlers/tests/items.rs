use super::*;
use shared::{ItemDto, ItemStatus};

fn jacket_json() -> Value {
    json!({
        "title": "Wool coat",
        "description": "Warm, knee length",
        "category": "Outerwear",
        "condition": "Good",
        "size": "L",
        "images": ["data:image/png;base64,iVBORw0KGgo="]
    })
}

#[tokio::test]
async fn test_create_then_browse_after_approval() {
    let ctx = TestContext::new().await;
    let owner = ctx.user("Uma", 0).await;
    let admin = ctx.admin("Ada").await;
    let token = ctx.token(&owner);

    let (status, body) = ctx.call("POST", "/api/items", Some(&token), Some(jacket_json())).await;
    assert_eq!(status, StatusCode::OK);
    let item: ItemDto = parse(body);
    assert_eq!(item.status, ItemStatus::Pending);
    assert_eq!(item.point_value, 50);

    // Pending listings are not browsable.
    let (_, body) = ctx.call("GET", "/api/items", None, None).await;
    assert_eq!(parse::<Vec<ItemDto>>(body).len(), 0);

    let uri = format!("/api/admin/items/{}/approve", item.id);
    let (status, _) = ctx.call("PUT", &uri, Some(&ctx.token(&admin)), None).await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = ctx.call("GET", "/api/items", None, None).await;
    let browse: Vec<ItemDto> = parse(body);
    assert_eq!(browse.len(), 1);
    assert_eq!(browse[0].id, item.id);

    let (status, body) = ctx.call("GET", &format!("/api/items/{}", item.id), None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["pointValue"], 50);
}

#[tokio::test]
async fn test_create_requires_auth() {
    let ctx = TestContext::new().await;

    let (status, _) = ctx.call("POST", "/api/items", None, Some(jacket_json())).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_validation_errors_are_returned_together() {
    let ctx = TestContext::new().await;
    let owner = ctx.user("Uma", 0).await;

    let (status, body) = ctx
        .call(
            "POST",
            "/api/items",
            Some(&ctx.token(&owner)),
            Some(json!({ "title": "Scarf", "images": [] })),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "InvalidInput");
    let fields: Vec<&str> = body["errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["field"].as_str().unwrap())
        .collect();
    assert_eq!(fields, vec!["description", "size", "category", "condition", "images"]);
}

#[tokio::test]
async fn test_malformed_json_and_id() {
    let ctx = TestContext::new().await;
    let owner = ctx.user("Uma", 0).await;

    let (status, body) = ctx
        .call("POST", "/api/items", Some(&ctx.token(&owner)), Some(json!({ "images": "nope" })))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "InvalidInput");

    let (status, body) = ctx.call("GET", "/api/items/abc", None, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "InvalidInput");

    let (status, _) = ctx.call("GET", "/api/items/9999", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_owner_edit_and_delete() {
    let ctx = TestContext::new().await;
    let owner = ctx.user("Uma", 0).await;
    let other = ctx.user("Vic", 0).await;
    let item = ctx.approved_item(owner.id, 50).await;
    let uri = format!("/api/items/{}", item.id);

    let (status, body) = ctx
        .call("PUT", &uri, Some(&ctx.token(&other)), Some(json!({ "size": "S" })))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], "Forbidden");

    let (status, body) = ctx
        .call("PUT", &uri, Some(&ctx.token(&owner)), Some(json!({ "size": "S" })))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["size"], "S");
    assert_eq!(body["status"], "pending");

    let (_, body) = ctx.call("GET", "/api/items/user", Some(&ctx.token(&owner)), None).await;
    assert_eq!(parse::<Vec<ItemDto>>(body).len(), 1);

    let (status, _) = ctx.call("DELETE", &uri, Some(&ctx.token(&other)), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = ctx.call("DELETE", &uri, Some(&ctx.token(&owner)), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["msg"], "Item removed");

    let (status, _) = ctx.call("GET", &uri, None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
