//! Family Travel Tracker server
//!
//! Serves a single page where family members pick themselves from a roster,
//! mark the countries they have visited, and see the map for the selected
//! member. The selection is kept per client in a cookie.

pub mod api;
pub mod config;
pub mod error;
pub mod services;
pub mod state;
pub mod view;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tower_http::{services::ServeDir, trace::TraceLayer};
use visit_store::{
    MemoryVisitStore, PostgresVisitStore, SqliteVisitStore, StoreResult, VisitStore, catalog,
};

use crate::config::{Config, DatabaseKind};
use crate::state::{AppState, create_shared_state};

/// Creates the application router with all routes configured.
///
/// Paths without a route fall through to the static directory.
pub fn create_app<S: VisitStore + 'static>(state: Arc<AppState<S>>) -> Router {
    let static_files = ServeDir::new(&state.config.static_dir);

    api::create_router()
        .fallback_service(static_files)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// Creates the application state with the given configuration and store.
pub fn create_state<S: VisitStore>(config: Config, store: S) -> Arc<AppState<S>> {
    create_shared_state(config, store)
}

/// Seeds the bundled country catalog, returning the number of new rows.
pub async fn seed_catalog<S: VisitStore + ?Sized>(store: &S) -> StoreResult<usize> {
    let inserted = store.seed_countries(&catalog::countries()).await?;
    tracing::info!(inserted, "Country catalog seeded");
    Ok(inserted)
}

/// Initializes tracing with the given log level.
pub fn init_tracing(log_level: &str) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();
}

/// Opens the configured store and serves until shutdown.
pub async fn run(config: Config) -> anyhow::Result<()> {
    let retry = config.retry_policy();
    match config.database_kind() {
        Some(DatabaseKind::Memory) => {
            tracing::warn!("Using in-memory store, data is lost on restart");
            serve(config, MemoryVisitStore::new()).await
        }
        Some(DatabaseKind::Sqlite) => {
            let store = SqliteVisitStore::connect(&config.database_url, retry).await?;
            serve(config, store).await
        }
        Some(DatabaseKind::Postgres) => {
            let store = PostgresVisitStore::connect(&config.database_url, retry).await?;
            serve(config, store).await
        }
        None => anyhow::bail!("Unsupported DATABASE_URL"),
    }
}

async fn serve<S: VisitStore + 'static>(config: Config, store: S) -> anyhow::Result<()> {
    if config.seed_catalog {
        seed_catalog(&store).await?;
    }

    let addr: SocketAddr = config.server_addr().parse()?;
    let state = create_state(config, store);
    let app = create_app(state);

    tracing::info!(addr = %addr, "Server listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
