//! # Database Store
//!
//! Connection pool, embedded migrations and repository implementations.
//!
//! Repositories are stateless unit structs. Methods that take part in a
//! multi-step transaction are generic over [`sqlx::Executor`] so they run
//! against either the pool or `&mut *tx`.

// region: --- Modules
pub mod item_repository;
pub mod models;
pub mod swap_repository;
pub mod user_repository;
// endregion: --- Modules

// region: --- Re-exports
pub use item_repository::ItemRepository;
pub use models::*;
pub use swap_repository::SwapRepository;
pub use user_repository::UserRepository;
// endregion: --- Re-exports

// region: --- Types and Functions
use sqlx::migrate::Migrator;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;
use std::time::Duration;

/// Type alias for SQLite connection pool.
pub type DbPool = SqlitePool;

/// Schema migrations compiled into the binary.
pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Create a SQLite connection pool, creating the database file if missing.
pub async fn create_pool(database_url: &str) -> anyhow::Result<DbPool> {
    ensure_parent_dir(database_url)?;

    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(Duration::from_secs(5));

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    Ok(pool)
}

// SQLite creates the file but not its parent directory.
fn ensure_parent_dir(database_url: &str) -> std::io::Result<()> {
    let Some(db_path) = database_url.strip_prefix("sqlite:") else {
        return Ok(());
    };
    let db_path = db_path.trim_start_matches("//");
    let db_path = db_path.split('?').next().unwrap_or(db_path);
    if db_path.starts_with(":memory:") {
        return Ok(());
    }

    if let Some(parent) = std::path::Path::new(db_path).parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
            tracing::info!("Created database directory: {:?}", parent);
        }
    }
    Ok(())
}

/// Create a migrated in-memory database.
///
/// A single connection that never expires, since every `:memory:`
/// connection is its own database.
pub async fn create_memory_pool() -> anyhow::Result<DbPool> {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await?;

    MIGRATOR.run(&pool).await?;

    Ok(pool)
}
// endregion: --- Types and Functions
