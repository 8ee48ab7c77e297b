pub mod health;

use axum::routing::{get, post};
use axum::Router;
use tower_http::timeout::TimeoutLayer;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /search                                          catalog search (GET ?q=&page=)
/// /download                                        package selection as zip (POST)
/// ```
///
/// Only `/search` is wrapped in `timeout`. An archive batch is bounded by
/// its per-call provider timeouts and always runs over every item.
pub fn api_routes(timeout: TimeoutLayer) -> Router<AppState> {
    Router::new()
        .route("/search", get(handlers::search::search_photos).layer(timeout))
        .route("/download", post(handlers::download::download_selection))
}
