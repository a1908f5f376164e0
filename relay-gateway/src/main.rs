//! Entry point for the `relay-gateway` HTTP server.

use std::sync::Arc;

use relay_adapters::{HttpBodyFetcher, MemoryUserRepository};
use relay_core::User;
use relay_gateway::{
    config::GatewayConfig,
    error::GatewayError,
    pool::WorkerPool,
    routes::{create_router, AppState},
};
use tracing::info;
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "relay_gateway=info,relay_adapters=info,relay_core=info,tower_http=info";

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();

    let config = match GatewayConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            tracing::error!(error = %e, "failed to load configuration");
            std::process::exit(1);
        }
    };

    let state = match build_state(&config) {
        Ok(s) => s,
        Err(e) => {
            tracing::error!(error = %e, "failed to initialise collaborators");
            std::process::exit(1);
        }
    };
    let app = create_router(state);

    let listener = match tokio::net::TcpListener::bind(&config.listen_addr).await {
        Ok(l) => l,
        Err(e) => {
            tracing::error!(addr = %config.listen_addr, error = %e, "failed to bind");
            std::process::exit(1);
        }
    };

    info!(
        addr = %config.listen_addr,
        upstream = %config.upstream_url,
        workers = config.worker_pool_size,
        "relay-gateway listening"
    );

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!(error = %e, "server error");
        std::process::exit(1);
    }
}

fn build_state(config: &GatewayConfig) -> Result<AppState, GatewayError> {
    let fetcher = HttpBodyFetcher::new(&config.fetch_config())?;
    let users = if config.seed_users {
        let seed = [User::new("abid", 30)?, User::new("jeba", 30)?];
        info!(count = seed.len(), "seeding demo users");
        MemoryUserRepository::with_users(seed)
    } else {
        MemoryUserRepository::new()
    };
    let pool = WorkerPool::new(config.worker_pool_size)?;
    Ok(AppState::new(Arc::new(fetcher), Arc::new(users), pool, config))
}
