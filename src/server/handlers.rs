//! HTTP handlers for the search pages

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::Response,
};
use std::sync::Arc;

use crate::core::error::CardbaseError;
use crate::core::validation::Submitted;
use crate::server::host::ServerHost;
use crate::server::presenter::{prefers_html, respond};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub host: Arc<ServerHost>,
}

/// Blank search page
///
/// GET /search
pub async fn show_search(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, CardbaseError> {
    let page = state.host.search.search(None).await?;
    let presenter = state.host.presenter(prefers_html(&headers));

    Ok(respond(presenter, StatusCode::OK, presenter.search_page(&page)?))
}

/// Run a submitted search
///
/// POST /search
///
/// A rejected form comes back as the page with its field errors and a
/// 422 status.
pub async fn submit_search(
    State(state): State<AppState>,
    headers: HeaderMap,
    Submitted(submission): Submitted,
) -> Result<Response, CardbaseError> {
    let page = state.host.search.search(Some(submission)).await?;
    let presenter = state.host.presenter(prefers_html(&headers));

    let status = if page.has_errors() {
        tracing::warn!(fields = ?page.errors.fields().collect::<Vec<_>>(), "Invalid search submission");
        StatusCode::UNPROCESSABLE_ENTITY
    } else {
        StatusCode::OK
    };

    Ok(respond(presenter, status, presenter.search_page(&page)?))
}

/// Single card with the cards referencing it
///
/// GET /cards/{card_id}
pub async fn view_card(
    State(state): State<AppState>,
    Path(card_id): Path<String>,
    headers: HeaderMap,
) -> Result<Response, CardbaseError> {
    let page = state.host.search.view_card(&card_id).await?;
    let presenter = state.host.presenter(prefers_html(&headers));

    Ok(respond(presenter, StatusCode::OK, presenter.card_page(&page)?))
}
