//! Gatehouse Server: email/password authentication with server-side sessions.
//!
//! Main entry point that wires all crates together and starts the server.

use tracing_subscriber::{EnvFilter, fmt};

use gatehouse_auth::{MemoryStore, Stores};
use gatehouse_core::config::{AppConfig, StoreBackend};
use gatehouse_core::error::AppError;
use gatehouse_database::DatabasePool;

#[tokio::main]
async fn main() {
    let env = std::env::var("GATEHOUSE_ENV").unwrap_or_else(|_| "development".to_string());

    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);
    tracing::info!(env = %env, "Configuration loaded");

    if let Err(e) = run(config).await {
        tracing::error!(error = %e, "Server error");
        std::process::exit(1);
    }
}

/// Initialize tracing/logging. `RUST_LOG` overrides the configured level.
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Select the storage backend, then serve until shutdown.
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting Gatehouse v{}", env!("CARGO_PKG_VERSION"));

    match config.database.backend {
        StoreBackend::Postgres => {
            let db_pool = DatabasePool::connect(&config.database).await?;
            gatehouse_database::migration::run_migrations(db_pool.pool()).await?;

            let stores = Stores::postgres(&db_pool);
            let result = gatehouse_api::run_server(config, stores).await;
            db_pool.close().await;
            result
        }
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory store; all users and sessions are lost on restart");
            gatehouse_api::run_server(config, Stores::memory(MemoryStore::new())).await
        }
    }
}
