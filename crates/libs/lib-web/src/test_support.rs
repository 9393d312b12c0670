//! Fixtures shared by service and router tests.

use crate::server::{create_router, AppState};
use crate::services::{AdminService, ItemService, SwapService};
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use lib_auth::encode_jwt;
use lib_core::model::store::{Item, ItemRepository, User, UserForCreate, UserRepository};
use lib_core::{create_memory_pool, Config, DbPool};
use serde::de::DeserializeOwned;
use serde_json::Value;
use shared::{CreateItemRequest, ItemStatus};
use tower::ServiceExt;

pub fn test_config() -> Config {
    Config {
        database_url: "sqlite::memory:".to_string(),
        jwt_secret: "test-secret-key-must-be-at-least-32-characters-long!".to_string(),
        jwt_expiration_hours: 24,
        default_point_value: 50,
    }
}

pub fn jacket_request() -> CreateItemRequest {
    CreateItemRequest {
        title: "Denim jacket".to_string(),
        description: "Worn twice, no marks".to_string(),
        category: "Outerwear".to_string(),
        condition: "Like new".to_string(),
        size: "M".to_string(),
        gender: Some("Unisex".to_string()),
        brand: Some("Levi's".to_string()),
        images: vec!["https://img.rewear.test/jacket-front.jpg".to_string()],
        point_value: None,
    }
}

/// In-memory database plus shortcuts for seeding it.
pub struct TestContext {
    pub db: DbPool,
    pub config: Config,
}

impl TestContext {
    pub async fn new() -> Self {
        Self {
            db: create_memory_pool()
                .await
                .expect("Failed to create test database"),
            config: test_config(),
        }
    }

    pub fn items(&self) -> ItemService {
        ItemService::new(self.db.clone(), self.config.default_point_value)
    }

    pub fn swaps(&self) -> SwapService {
        SwapService::new(self.db.clone())
    }

    pub fn admin_service(&self) -> AdminService {
        AdminService::new(self.db.clone())
    }

    pub async fn user(&self, name: &str, points: i64) -> User {
        UserRepository::create(
            &self.db,
            UserForCreate::new(name, format!("{}@rewear.test", name.to_lowercase())).points(points),
        )
        .await
        .expect("Failed to create user")
    }

    pub async fn admin(&self, name: &str) -> User {
        UserRepository::create(
            &self.db,
            UserForCreate::new(name, format!("{}@rewear.test", name.to_lowercase())).admin(true),
        )
        .await
        .expect("Failed to create admin")
    }

    pub async fn points_of(&self, user_id: i64) -> i64 {
        UserRepository::get(&self.db, user_id).await.unwrap().points
    }

    pub async fn status_of(&self, item_id: i64) -> ItemStatus {
        ItemRepository::get(&self.db, item_id).await.unwrap().status
    }

    /// A listing that already passed moderation.
    pub async fn approved_item(&self, owner_id: i64, point_value: i64) -> Item {
        let req = CreateItemRequest {
            point_value: Some(point_value),
            ..jacket_request()
        };
        let item = self.items().create(owner_id, req).await.unwrap();
        ItemRepository::set_status(&self.db, item.id, ItemStatus::Pending, ItemStatus::Approved)
            .await
            .unwrap();
        ItemRepository::get(&self.db, item.id).await.unwrap()
    }

    pub fn token(&self, user: &User) -> String {
        encode_jwt(user.id, user.name.clone(), &self.config.jwt_secret, 1).unwrap()
    }

    pub fn router(&self) -> Router {
        create_router(AppState::new(self.db.clone(), self.config.clone()), &[])
    }

    /// Send one request through a fresh router.
    pub async fn call(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header("authorization", format!("Bearer {}", token));
        }
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, value)
    }
}

pub fn parse<T: DeserializeOwned>(value: Value) -> T {
    serde_json::from_value(value).expect("Unexpected response shape")
}
