//! # Server Setup
//!
//! Server initialization, route registration, and HTTP server startup.

// region: --- Imports
use crate::handlers::{self, admin, auth, items, swaps};
use crate::middleware::{log_requests, require_admin, require_auth, stamp_req, RequestStamp};
use crate::services::{AdminService, ItemService, SwapService};
use axum::{
    extract::FromRef,
    http::{header, HeaderValue, Method},
    middleware::{from_fn, from_fn_with_state},
    routing::{get, post, put},
    Router,
};
use lib_core::config::init_config;
use lib_core::{create_pool, AppError, Config, DbPool, MIGRATOR};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;
// endregion: --- Imports

// region: --- AppState
/// Application state shared across all routes
#[derive(Clone)]
pub struct AppState {
    pub db: DbPool,
    pub config: Config,
}

impl AppState {
    pub fn new(db: DbPool, config: Config) -> Self {
        Self { db, config }
    }
}

impl FromRef<AppState> for DbPool {
    fn from_ref(state: &AppState) -> Self {
        state.db.clone()
    }
}

impl FromRef<AppState> for Config {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}

impl FromRef<AppState> for ItemService {
    fn from_ref(state: &AppState) -> Self {
        ItemService::new(state.db.clone(), state.config.default_point_value)
    }
}

impl FromRef<AppState> for SwapService {
    fn from_ref(state: &AppState) -> Self {
        SwapService::new(state.db.clone())
    }
}

impl FromRef<AppState> for AdminService {
    fn from_ref(state: &AppState) -> Self {
        AdminService::new(state.db.clone())
    }
}
// endregion: --- AppState

// region: --- Server Configuration
/// Server configuration
pub struct ServerConfig {
    /// Bind address (e.g., "127.0.0.1:5000")
    pub bind_address: String,
    /// Allowed CORS origins
    pub allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:5000".to_string(),
            allowed_origins: vec![
                "http://localhost:3000".to_string(),
                "http://127.0.0.1:3000".to_string(),
                "http://localhost:5173".to_string(),
                "http://127.0.0.1:5173".to_string(),
            ],
        }
    }
}
// endregion: --- Server Configuration

// region: --- Server Setup
/// Initialize and start the HTTP server.
///
/// # Errors
///
/// Fails if configuration is invalid, the database cannot be opened or
/// migrated, or the listener cannot bind.
pub async fn start_server(config: ServerConfig) -> anyhow::Result<()> {
    let log_level = std::env::var("LOG_LEVEL")
        .unwrap_or_else(|_| "info".to_string())
        .to_lowercase();

    let filter = match log_level.as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => {
            tracing_subscriber::EnvFilter::new(log_level.as_str())
        }
        _ => tracing_subscriber::EnvFilter::new("info"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_line_number(true)
        .with_file(true)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to set global tracing subscriber: {}", e))?;

    info!("REWEAR BACKEND STARTING");
    info!("Log level: {}", log_level);

    info!("Loading configuration...");
    let app_config = init_config().map_err(AppError::Config)?.clone();
    info!("Database URL: {}", app_config.database_url);

    info!("Connecting to database...");
    let pool = create_pool(&app_config.database_url).await?;

    info!("Running database migrations");
    MIGRATOR.run(&pool).await?;
    info!("Migrations complete");

    let state = AppState::new(pool, app_config);
    let app = create_router(state, &config.allowed_origins);

    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    info!("SERVER READY: http://{}", config.bind_address);
    log_server_info();

    axum::serve(listener, app).await?;

    Ok(())
}

/// Build the application router with all routes and middleware.
pub fn create_router(state: AppState, allowed_origins: &[String]) -> Router {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    info!("[ROUTE SETUP] Registering HTTP routes...");

    let public = Router::new()
        .route("/api/items", get(items::list_items))
        .route("/api/items/{id}", get(items::get_item));

    let authenticated = Router::new()
        .route("/api/auth", get(auth::current_user))
        .route("/api/items", post(items::create_item))
        .route("/api/items/user", get(items::my_items))
        .route(
            "/api/items/{id}",
            put(items::update_item).delete(items::delete_item),
        )
        .route("/api/swaps", post(swaps::create_swap).get(swaps::list_swaps))
        .route("/api/swaps/{id}", get(swaps::get_swap))
        .route("/api/swaps/{id}/message", post(swaps::add_message))
        .route("/api/swaps/{id}/status", put(swaps::update_status))
        .route_layer(from_fn_with_state(state.clone(), require_auth));

    // Layers run bottom-up: authenticate first, then check the role.
    let admin_only = Router::new()
        .route("/api/admin/items/pending", get(admin::pending_items))
        .route("/api/admin/items/{id}/approve", put(admin::approve_item))
        .route("/api/admin/items/{id}/reject", put(admin::reject_item))
        .route("/api/admin/items/{id}", axum::routing::delete(admin::delete_item))
        .route("/api/admin/users", get(admin::list_users))
        .route("/api/admin/users/{id}/admin", put(admin::toggle_admin))
        .route("/api/admin/stats", get(admin::stats))
        .route_layer(from_fn(require_admin))
        .route_layer(from_fn_with_state(state.clone(), require_auth));

    Router::new()
        .merge(public)
        .merge(authenticated)
        .merge(admin_only)
        .route("/health", get(|| async { "OK" }))
        .fallback(handlers::not_found)
        .with_state(state)
        .layer(from_fn(log_requests))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                let request_id = request
                    .extensions()
                    .get::<RequestStamp>()
                    .map(|s| s.id.clone())
                    .unwrap_or_else(|| "unknown".to_string());

                tracing::info_span!(
                    "http_request",
                    request_id = %request_id,
                    method = %request.method(),
                    uri = %request.uri(),
                )
            }),
        )
        // Outermost so the id exists for the span and the request log.
        .layer(from_fn(stamp_req))
        .layer(cors)
}

/// Log the route table.
fn log_server_info() {
    info!(" ITEMS:");
    info!("   • GET    /api/items");
    info!("   • GET    /api/items/{{id}}");
    info!("   • POST   /api/items               (auth)");
    info!("   • GET    /api/items/user          (auth)");
    info!("   • PUT    /api/items/{{id}}          (auth, owner)");
    info!("   • DELETE /api/items/{{id}}          (auth, owner or admin)");
    info!(" SWAPS:");
    info!("   • POST   /api/swaps               (auth)");
    info!("   • GET    /api/swaps               (auth)");
    info!("   • GET    /api/swaps/{{id}}          (auth, participant)");
    info!("   • POST   /api/swaps/{{id}}/message  (auth, participant)");
    info!("   • PUT    /api/swaps/{{id}}/status   (auth)");
    info!(" ADMIN:");
    info!("   • GET    /api/admin/items/pending");
    info!("   • PUT    /api/admin/items/{{id}}/approve | reject");
    info!("   • DELETE /api/admin/items/{{id}}");
    info!("   • GET    /api/admin/users");
    info!("   • PUT    /api/admin/users/{{id}}/admin");
    info!("   • GET    /api/admin/stats");
    info!(" AUTH:");
    info!("   • GET    /api/auth                (auth)");
    info!(" HEALTH:");
    info!("   • GET    /health");
}
// endregion: --- Server Setup
