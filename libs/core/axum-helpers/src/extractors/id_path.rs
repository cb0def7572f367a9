//! Integer path parameter extractor.

use crate::errors::AppError;
use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Extractor for positive integer ids in the path.
///
/// Only plain decimal digits are accepted. Signs, letters and other text
/// cannot address a resource and are rejected with a 404 [`AppError::NotFound`].
/// Digit strings too large for `i32` get their own rejection variant so a
/// domain can treat them as an id with no matching row.
///
/// # Example
/// ```ignore
/// use axum::Router;
/// use axum::routing::get;
/// use axum_helpers::extractors::IdPath;
///
/// async fn get_item(IdPath(id): IdPath) -> String {
///     format!("Item ID: {}", id)
/// }
///
/// let app = Router::new().route("/items/{id}", get(get_item));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdPath(pub i32);

/// Rejection returned by [`IdPath`].
#[derive(Debug, Error)]
pub enum IdPathRejection {
    #[error("{0}")]
    MissingPath(String),

    #[error("No resource found for id '{0}'")]
    NotAnId(String),

    #[error("No resource found for id '{0}'")]
    OutOfRange(String),
}

impl From<IdPathRejection> for AppError {
    fn from(rejection: IdPathRejection) -> Self {
        match rejection {
            IdPathRejection::MissingPath(msg) => AppError::BadRequest(msg),
            e @ (IdPathRejection::NotAnId(_) | IdPathRejection::OutOfRange(_)) => {
                AppError::NotFound(e.to_string())
            }
        }
    }
}

impl IntoResponse for IdPathRejection {
    fn into_response(self) -> Response {
        AppError::from(self).into_response()
    }
}

impl<S> FromRequestParts<S> for IdPath
where
    S: Send + Sync,
{
    type Rejection = IdPathRejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| IdPathRejection::MissingPath(e.body_text()))?;

        parse_id(&raw).map(IdPath)
    }
}

fn parse_id(raw: &str) -> Result<i32, IdPathRejection> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(IdPathRejection::NotAnId(raw.to_string()));
    }
    // Only overflow can fail once every byte is a digit
    raw.parse().map_err(|_| IdPathRejection::OutOfRange(raw.to_string()))
}
