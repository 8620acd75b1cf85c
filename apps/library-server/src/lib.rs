//! Library Server
//!
//! HTTP service for the library: account sign-up, the book catalogue and
//! its admin endpoints, and signed parameters for browser uploads to the
//! image host.

pub mod api;
pub mod config;
pub mod error;
pub mod services;
pub mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use auth::{BcryptHasher, PasswordHasher};
use axum::{
    Router,
    http::{Method, header},
};
use library_store::LibraryStore;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::config::Config;
use crate::services::{imagekit::ImageKitAuth, workflow::WorkflowClient};
use crate::state::{AppState, SharedState};

/// Creates the application router with all routes configured.
///
/// The CORS layer mirrors the caller's origin and allows credentials, so
/// the browser upload widget can fetch signed parameters cross-origin.
pub fn create_app<S: LibraryStore + 'static>(state: Arc<AppState<S>>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::mirror_request())
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_credentials(true);

    api::create_router()
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// Creates the application state with the given configuration and store.
pub fn create_state<S: LibraryStore>(config: &Config, store: S) -> anyhow::Result<SharedState<S>> {
    let imagekit = ImageKitAuth::from_config(config)
        .map_err(|e| anyhow::anyhow!("Invalid image host private key: {}", e))?;
    let workflow = WorkflowClient::from_config(config);

    tracing::info!(
        imagekit = imagekit.is_some(),
        workflow = workflow.is_some(),
        "Integrations configured"
    );

    let hasher: Arc<dyn PasswordHasher> = Arc::new(BcryptHasher::default());

    Ok(Arc::new(AppState::new(store, hasher, imagekit, workflow)))
}

/// Serves the application on the configured address until shutdown.
pub async fn serve<S: LibraryStore + 'static>(config: Config, store: S) -> anyhow::Result<()> {
    let addr: SocketAddr = config.server_addr().parse()?;
    let state = create_state(&config, store)?;
    let app = create_app(state);

    tracing::info!(addr = %addr, "Server listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
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
