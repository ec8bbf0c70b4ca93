//! Axum extractor for submitted search forms
//!
//! This module provides the `Submitted` extractor that decodes a JSON search
//! submission and turns decoding failures into typed request errors.

use super::forms::SearchSubmission;
use crate::core::error::{CardbaseError, RequestError};
use axum::{
    Json,
    extract::{FromRequest, Request},
};

/// Axum extractor for a tagged search submission
///
/// # Usage
///
/// ```rust,ignore
/// pub async fn post_search(
///     Submitted(submission): Submitted,
/// ) -> Result<Response, CardbaseError> {
///     // submission is a decoded SearchSubmission, not yet validated
/// }
/// ```
pub struct Submitted(pub SearchSubmission);

impl<S> FromRequest<S> for Submitted
where
    S: Send + Sync,
{
    type Rejection = CardbaseError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<SearchSubmission>::from_request(req, state).await {
            Ok(Json(submission)) => Ok(Submitted(submission)),
            Err(rejection) => {
                tracing::warn!(error = %rejection.body_text(), "Rejected search submission");
                Err(RequestError::InvalidBody {
                    message: rejection.body_text(),
                }
                .into())
            }
        }
    }
}
