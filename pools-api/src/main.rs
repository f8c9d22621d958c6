//! DEX Pool Yield Aggregator API Server
//!
//! Serves the highest-yield liquidity pools across several DEXes as JSON,
//! next to the static frontend.

mod config;
mod routes;

use axum::http::{header, Method};
use pools_services::PoolService;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::ApiConfig;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub pool_service: Arc<PoolService>,
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
                .unwrap_or_else(|_| EnvFilter::new("info,pools_api=debug")),
        )
        .init();

    info!("Starting DEX Pool Yield Aggregator API");

    let config = ApiConfig::from_env()?;
    info!(
        "Sources: {:?}, serving top {} pools",
        config.aggregator.sources, config.aggregator.top_n
    );

    let client = pools_sources::http_client()?;
    let pool_service = PoolService::new(&config.aggregator, client);

    let state = AppState {
        pool_service: Arc::new(pool_service),
    };

    // Configure CORS for frontend
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    info!("Serving static files from: {}", config.static_dir.display());
    let app = routes::build_router(state, &config.static_dir)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
