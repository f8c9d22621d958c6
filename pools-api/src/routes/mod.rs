//! Route definitions

mod pools;

use axum::Router;
use std::path::Path;
use tower_http::services::{ServeDir, ServeFile};

use crate::AppState;

/// Page served for any path that matches neither a route nor a file
pub const NOT_FOUND_PAGE: &str = "404.html";

/// Create the application router
///
/// API routes take precedence, everything else is looked up in
/// `static_dir` and falls back to its not-found page.
pub fn build_router(state: AppState, static_dir: &Path) -> Router {
    let static_files =
        ServeDir::new(static_dir).fallback(ServeFile::new(static_dir.join(NOT_FOUND_PAGE)));

    Router::new()
        .merge(pools::routes())
        .fallback_service(static_files)
        .with_state(state)
}
