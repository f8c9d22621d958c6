//! Pool data endpoint

use axum::{extract::State, response::Json, routing::get, Router};
use pools_core::PresentedPool;
use tracing::info;

use crate::AppState;

/// Top pools across all sources
///
/// Always answers 200: failing sources only shrink the list.
async fn list_pools(State(state): State<AppState>) -> Json<Vec<PresentedPool>> {
    let pools = state.pool_service.display_pools().await;
    info!("Returning {} pools", pools.len());
    Json(pools)
}

/// Create pool routes
pub fn routes() -> Router<AppState> {
    Router::new().route("/data", get(list_pools))
}
