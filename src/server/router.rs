//! Router builder utilities for search routes

use crate::server::handlers::{AppState, show_search, submit_search, view_card};
use axum::{Router, routing::get};

/// Build the search routes
///
/// - GET /search - Blank search page
/// - POST /search - Run a basic or advanced search
/// - GET /cards/{card_id} - Card page with the cards referencing it
pub fn build_search_routes(state: AppState) -> Router {
    Router::new()
        .route("/search", get(show_search).post(submit_search))
        .route("/cards/{card_id}", get(view_card))
        .with_state(state)
}
