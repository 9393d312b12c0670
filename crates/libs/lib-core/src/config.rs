//! # Application Configuration
//!
//! Configuration is loaded from environment variables (and a `.env` file when
//! present) and validated on startup, so a misconfigured server never binds.
//!
//! ## Global Config Access
//!
//! ```rust,no_run
//! use lib_core::config::{core_config, init_config};
//!
//! init_config().expect("invalid configuration");
//! let db_url = &core_config().database_url;
//! ```

use lib_utils::{get_env, get_env_or, get_env_parse_or};
use std::sync::OnceLock;

/// Default store location when `DATABASE_URL` is unset.
pub const DEFAULT_DATABASE_URL: &str = "sqlite:data/rewear.db";

/// Application configuration loaded from environment variables.
#[derive(Clone, Debug)]
pub struct Config {
    /// SQLite database connection URL
    pub database_url: String,

    /// Secret key for token signing and verification.
    ///
    /// **Must be at least 32 characters long.**
    pub jwt_secret: String,

    /// Token validity period in hours (1-720).
    pub jwt_expiration_hours: i64,

    /// Point value assigned to a listing created without one.
    pub default_point_value: i64,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, String> {
        let database_url = get_env_or("DATABASE_URL", DEFAULT_DATABASE_URL);

        let jwt_secret =
            get_env("JWT_SECRET").map_err(|_| "JWT_SECRET must be set in environment")?;

        let jwt_expiration_hours = get_env_parse_or("JWT_EXPIRATION_HOURS", 24)
            .map_err(|e| format!("JWT_EXPIRATION_HOURS must be a valid number: {}", e))?;

        let default_point_value = get_env_parse_or("DEFAULT_POINT_VALUE", 50)
            .map_err(|e| format!("DEFAULT_POINT_VALUE must be a valid number: {}", e))?;

        Ok(Self {
            database_url,
            jwt_secret,
            jwt_expiration_hours,
            default_point_value,
        })
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), String> {
        if self.jwt_secret.len() < 32 {
            return Err("JWT_SECRET must be at least 32 characters long".to_string());
        }

        if self.jwt_expiration_hours < 1 || self.jwt_expiration_hours > 720 {
            return Err("JWT_EXPIRATION_HOURS must be between 1 and 720 (30 days)".to_string());
        }

        if self.default_point_value <= 0 {
            return Err("DEFAULT_POINT_VALUE must be greater than 0".to_string());
        }

        Ok(())
    }
}

/// Global configuration instance (initialized once at startup).
static CONFIG: OnceLock<Config> = OnceLock::new();

/// Load, validate and install the global configuration.
///
/// Fails if the environment is invalid or the config was already initialized.
pub fn init_config() -> Result<&'static Config, String> {
    dotenvy::dotenv().ok();

    let config = Config::from_env()?;
    config.validate()?;

    CONFIG
        .set(config)
        .map_err(|_| "Config has already been initialized".to_string())?;

    Ok(core_config())
}

/// Get a reference to the global configuration.
///
/// # Panics
///
/// Panics if [`init_config()`] has not been called yet.
pub fn core_config() -> &'static Config {
    CONFIG
        .get()
        .expect("Config must be initialized with init_config() before use")
}
