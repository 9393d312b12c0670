//! # Backend Service
//!
//! Thin entry point that delegates to lib-web for server setup.

use lib_utils::get_env_or;
use lib_web::{start_server, ServerConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let mut config = ServerConfig {
        bind_address: get_env_or("BIND_ADDRESS", "127.0.0.1:5000"),
        ..Default::default()
    };

    // Comma separated; falls back to the local dev origins.
    let origins = get_env_or("ALLOWED_ORIGINS", "");
    if !origins.trim().is_empty() {
        config.allowed_origins = origins
            .split(',')
            .map(|o| o.trim().to_string())
            .filter(|o| !o.is_empty())
            .collect();
    }

    start_server(config).await
}
