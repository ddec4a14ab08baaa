//! Classbook HTTP Server Binary
//!
//! This is the main entry point for the classbook REST API server. It
//! initializes the repository, sets up the HTTP router, and starts serving
//! requests.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin classbook-server
//!
//! # With a configuration file
//! CLASSBOOK_CONFIG=classbook.toml cargo run --bin classbook-server
//! ```
//!
//! # Environment Variables
//!
//! - `HOST`: Server host (default: 0.0.0.0)
//! - `PORT`: Server port (default: 8080)
//! - `REPOSITORY_TYPE`: Storage backend ("local")
//! - `CLASSBOOK_CONFIG`: Optional path to a TOML configuration file
//! - `RUST_LOG`: Log level (default: info)

use std::env;
use std::net::SocketAddr;

use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use classbook::db::{RepositoryConfig, RepositoryFactory};
use classbook::http::{create_router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    FmtSubscriber::builder()
        .with_max_level(
            env::var("RUST_LOG")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(Level::INFO),
        )
        .with_target(true)
        .with_thread_ids(true)
        .init();

    info!("Starting classbook HTTP server");

    // Optional TOML config; environment variables win where set
    let config = match env::var("CLASSBOOK_CONFIG") {
        Ok(path) => RepositoryConfig::from_file(&path)
            .map_err(|e| anyhow::anyhow!("config error: {}", e))?,
        Err(_) => RepositoryConfig::default(),
    };

    // Repository backend: REPOSITORY_TYPE overrides the config file
    let repository = match env::var("REPOSITORY_TYPE") {
        Ok(_) => RepositoryFactory::create_from_env(),
        Err(_) => RepositoryFactory::create_from_config(&config),
    }
    .map_err(|e| anyhow::anyhow!("repository init failed: {}", e))?;
    info!("Repository initialized successfully");

    // Create application state
    let state =
        AppState::new(repository).with_directory_batch_size(config.server.directory_batch_size);

    // Create router with all endpoints
    let app = create_router(state);

    // Determine bind address
    let host = env::var("HOST").unwrap_or(config.server.host);
    let port: u16 = env::var("PORT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(config.server.port);
    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;

    info!("Server listening on http://{}", addr);

    // Start the server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
