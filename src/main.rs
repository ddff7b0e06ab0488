//! parleyd - the parley chat/account daemon
//!
//! A minimal TCP service speaking the parley framed protocol. State is
//! volatile: the account store lives in memory and vanishes on exit.

use parley_server::{AccountStore, Config, Server, ServerConfig};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration (from file if PARLEY_CONFIG is set, then env
    // overrides). Load only fails when a config file was explicitly
    // specified, so a failure is fatal.
    let config = match Config::load() {
        Ok(c) => {
            if let Ok(path) = std::env::var("PARLEY_CONFIG") {
                tracing::info!("Loaded config from {}", path);
            }
            c
        }
        Err(e) => {
            tracing::error!("Failed to load config: {}", e);
            return Err(e.into());
        }
    };

    tracing::info!("Starting parley server");
    tracing::info!("  Bind address: {}", config.network.bind_addr);

    let accounts = Arc::new(AccountStore::new());
    let server_config = ServerConfig::new(config.network.bind_addr);
    let server = Arc::new(Server::new(server_config, accounts));

    // Spawn shutdown signal handler
    let shutdown_server = server.clone();
    tokio::spawn(async move {
        tokio::signal::ctrl_c().await.ok();
        tracing::info!("Received shutdown signal, stopping server...");
        shutdown_server.shutdown();
    });

    // Run server (blocks until shutdown)
    server.run().await?;

    tracing::info!("Server stopped");
    Ok(())
}
