//! Route configuration.
//!
//! Configures the Axum router with the path-exploration endpoints.

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use super::handlers::{expand, submit, tree, AppState};

/// Creates the application router.
///
/// Routes:
/// - `POST /submit` - generate a fresh tree from a described situation
/// - `POST /expand` - expand a clicked scenario into three further outcomes
/// - `GET /tree` - read the current session snapshot
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/submit", post(submit))
        .route("/expand", post(expand))
        .route("/tree", get(tree))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
