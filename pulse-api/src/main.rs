//! CryptoPulse API Server
//!
//! Serves live market data with provider fallback, plus the cached home page
//! snapshot kept fresh by background refresh jobs.

mod config;
mod routes;

use std::net::SocketAddr;
use std::sync::Arc;

use pulse_providers::{CredentialStatus, ProviderConfig, ProviderSet};
use pulse_services::{
    scheduler, MarketDataService, RefreshJobs, SnapshotCache, SnapshotStore,
};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::ServerConfig;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub market_service: Arc<MarketDataService>,
    pub cache: Arc<SnapshotCache>,
    pub credentials: CredentialStatus,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env.local file
    if let Err(e) = dotenvy::from_filename(".env.local") {
        // Not an error if the file doesn't exist
        if !matches!(e, dotenvy::Error::Io(_)) {
            eprintln!("Warning: Failed to load .env.local: {}", e);
        }
    }

    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,pulse_api=debug")),
        )
        .init();

    info!("Starting CryptoPulse API");

    let server_config = ServerConfig::from_env()?;
    let providers = ProviderSet::new(&ProviderConfig::from_env())?;

    info!("Loading snapshot from {}", server_config.data_file.display());
    let store = SnapshotStore::new(server_config.data_file.clone());
    let cache = Arc::new(SnapshotCache::load(store).await);

    // Fill the snapshot before accepting connections
    let jobs = Arc::new(RefreshJobs::from_providers(&providers, cache.clone()));
    jobs.run_startup().await;
    let scheduler = scheduler::spawn(jobs, server_config.intervals);

    let state = AppState {
        market_service: Arc::new(MarketDataService::from_providers(&providers)),
        cache,
        credentials: providers.credentials(),
    };
    let app = routes::app(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], server_config.port));
    info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    scheduler.shutdown();
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, stopping");
}
