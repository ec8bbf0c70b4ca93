//! Typed error handling for cardbase
//!
//! Errors are grouped by category so callers can tell a missing card apart
//! from a misconfigured sort option or a catalog outage.
//!
//! # Error Categories
//!
//! - [`CardError`]: single-card lookups
//! - [`SearchError`]: engine misconfiguration surfaced while searching
//! - [`ConfigError`]: configuration parsing and validation
//! - [`CatalogError`]: catalog store failures
//! - [`RequestError`]: malformed HTTP requests
//!
//! Validation failures of submitted criteria are not errors: they are
//! reported inside the search page so the form can be corrected.
//!
//! # Example
//!
//! ```rust,ignore
//! match service.view_card("CMF-999").await {
//!     Ok(page) => println!("{}", page.card.name),
//!     Err(CardbaseError::Card(CardError::NotFound { card_id })) => {
//!         println!("no card {}", card_id);
//!     }
//!     Err(e) => eprintln!("other error: {}", e),
//! }
//! ```

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

/// The main error type for cardbase
#[derive(Debug, Error)]
pub enum CardbaseError {
    /// Single-card lookup errors
    #[error(transparent)]
    Card(#[from] CardError),

    /// Search engine errors
    #[error(transparent)]
    Search(#[from] SearchError),

    /// Configuration errors
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Catalog store errors
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// HTTP/Request errors
    #[error(transparent)]
    Request(#[from] RequestError),
}

/// Error response structure for HTTP responses
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl CardbaseError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            CardbaseError::Card(e) => e.status_code(),
            CardbaseError::Search(_) => StatusCode::INTERNAL_SERVER_ERROR,
            CardbaseError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            CardbaseError::Catalog(_) => StatusCode::INTERNAL_SERVER_ERROR,
            CardbaseError::Request(e) => e.status_code(),
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            CardbaseError::Card(e) => e.error_code(),
            CardbaseError::Search(e) => e.error_code(),
            CardbaseError::Config(_) => "CONFIG_ERROR",
            CardbaseError::Catalog(_) => "CATALOG_ERROR",
            CardbaseError::Request(e) => e.error_code(),
        }
    }

    /// Convert to an error response
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            code: self.error_code().to_string(),
            message: self.to_string(),
            details: self.details(),
        }
    }

    /// Get additional details for the error
    fn details(&self) -> Option<serde_json::Value> {
        match self {
            CardbaseError::Card(CardError::NotFound { card_id }) => {
                Some(serde_json::json!({ "card_id": card_id }))
            }
            CardbaseError::Search(SearchError::UnsupportedSortKey { sort_by }) => {
                Some(serde_json::json!({ "sort_by": sort_by }))
            }
            _ => None,
        }
    }
}

impl IntoResponse for CardbaseError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(self.to_response());
        (status, body).into_response()
    }
}

impl From<anyhow::Error> for CardbaseError {
    fn from(err: anyhow::Error) -> Self {
        let err = match err.downcast::<ConfigError>() {
            Ok(config) => return CardbaseError::Config(config),
            Err(err) => err,
        };
        match err.downcast::<CatalogError>() {
            Ok(catalog) => CardbaseError::Catalog(catalog),
            Err(err) => CardbaseError::Catalog(CatalogError::QueryFailed {
                message: format!("{:#}", err),
            }),
        }
    }
}

// =============================================================================
// Card Errors
// =============================================================================

/// Errors related to single-card lookups and card data
#[derive(Debug, Error)]
pub enum CardError {
    /// No card carries this identifier
    #[error("Card '{card_id}' not found")]
    NotFound { card_id: String },

    /// A cost string could not be parsed
    #[error("Invalid cost '{cost}': {message}")]
    InvalidCost { cost: String, message: String },
}

impl CardError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            CardError::NotFound { .. } => StatusCode::NOT_FOUND,
            CardError::InvalidCost { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            CardError::NotFound { .. } => "CARD_NOT_FOUND",
            CardError::InvalidCost { .. } => "INVALID_COST",
        }
    }
}

// =============================================================================
// Search Errors
// =============================================================================

/// Errors raised by the search engine itself
///
/// These indicate a mismatch between what the forms offer and what the
/// engine supports, never a user-input problem.
#[derive(Debug, Error)]
pub enum SearchError {
    /// The sort key is not backed by a sort strategy
    #[error("Unsupported sort key '{sort_by}'")]
    UnsupportedSortKey { sort_by: String },
}

impl SearchError {
    pub fn error_code(&self) -> &'static str {
        match self {
            SearchError::UnsupportedSortKey { .. } => "UNSUPPORTED_SORT_KEY",
        }
    }
}

// =============================================================================
// Config Errors
// =============================================================================

/// Errors related to configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to parse configuration
    #[error("Failed to parse config{}: {message}", .file.as_ref().map(|f| format!(" file '{}'", f)).unwrap_or_default())]
    ParseError {
        file: Option<String>,
        message: String,
    },

    /// Missing required field in configuration
    #[error("Missing required field '{field}' in {context}")]
    MissingField { field: String, context: String },

    /// Invalid value in configuration
    #[error("Invalid value '{value}' for field '{field}': {message}")]
    InvalidValue {
        field: String,
        value: String,
        message: String,
    },

    /// Configuration file not found
    #[error("Configuration file not found: {path}")]
    FileNotFound { path: String },

    /// IO error while reading configuration
    #[error("IO error: {message}")]
    IoError { message: String },
}

// =============================================================================
// Catalog Errors
// =============================================================================

/// Errors related to the catalog store
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The catalog could not be loaded
    #[error("Failed to load catalog from '{source_name}': {message}")]
    LoadFailed {
        source_name: String,
        message: String,
    },

    /// Two records share an identifier
    #[error("Duplicate card identifier '{card_id}'")]
    DuplicateCard { card_id: String },

    /// A query against the catalog failed
    #[error("Catalog query failed: {message}")]
    QueryFailed { message: String },
}

// =============================================================================
// Request Errors
// =============================================================================

/// Errors related to HTTP requests
#[derive(Debug, Error)]
pub enum RequestError {
    /// The request body could not be decoded
    #[error("Invalid request body: {message}")]
    InvalidBody { message: String },

    /// The presentation layer failed to render a page
    #[error("Failed to render '{template}': {message}")]
    RenderFailed { template: String, message: String },
}

impl RequestError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            RequestError::InvalidBody { .. } => StatusCode::BAD_REQUEST,
            RequestError::RenderFailed { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            RequestError::InvalidBody { .. } => "INVALID_REQUEST_BODY",
            RequestError::RenderFailed { .. } => "RENDER_FAILED",
        }
    }
}
