//! Untyped JSON body extractor.

use crate::errors::AppError;
use axum::{
    body::Bytes,
    extract::{FromRequest, Request, rejection::BytesRejection},
    http::{HeaderMap, header},
    response::{IntoResponse, Response},
};
use serde_json::Value;
use thiserror::Error;

/// JSON body extracted as a raw [`serde_json::Value`].
///
/// Unlike `axum::Json<T>`, this leaves field-level checking to the handler so
/// that every problem in a payload can be reported at once. The request must
/// declare a JSON content type (`application/json` or `application/*+json`).
///
/// Take it as `Result<JsonPayload, JsonPayloadRejection>` when the handler
/// needs to decide for itself when a bad body is reported.
///
/// # Example
/// ```ignore
/// use axum::Router;
/// use axum::routing::post;
/// use axum_helpers::extractors::JsonPayload;
///
/// async fn create(JsonPayload(body): JsonPayload) -> String {
///     body.to_string()
/// }
///
/// let app = Router::new().route("/items", post(create));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct JsonPayload(pub Value);

#[derive(Debug, Error)]
pub enum JsonPayloadRejection {
    #[error("Expected request with a JSON content type")]
    MissingJsonContentType,

    #[error("{0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error(transparent)]
    Body(#[from] BytesRejection),
}

impl From<JsonPayloadRejection> for AppError {
    fn from(rejection: JsonPayloadRejection) -> Self {
        match rejection {
            JsonPayloadRejection::MissingJsonContentType => AppError::UnsupportedContentType(
                "Expected request with a JSON content type".to_string(),
            ),
            JsonPayloadRejection::InvalidJson(e) => {
                AppError::InvalidJson(format!("Failed to decode JSON body: {}", e))
            }
            JsonPayloadRejection::Body(e) => AppError::BadRequest(e.body_text()),
        }
    }
}

impl IntoResponse for JsonPayloadRejection {
    fn into_response(self) -> Response {
        AppError::from(self).into_response()
    }
}

impl<S> FromRequest<S> for JsonPayload
where
    S: Send + Sync,
{
    type Rejection = JsonPayloadRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if !has_json_content_type(req.headers()) {
            return Err(JsonPayloadRejection::MissingJsonContentType);
        }

        let bytes = Bytes::from_request(req, state).await?;
        let value = serde_json::from_slice(&bytes)?;

        Ok(JsonPayload(value))
    }
}

/// Whether the `Content-Type` header declares a JSON body.
///
/// Parameters such as `charset` are ignored and the comparison is
/// case-insensitive.
pub fn has_json_content_type(headers: &HeaderMap) -> bool {
    let Some(content_type) = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
    else {
        return false;
    };

    let media_type = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    media_type == "application/json"
        || (media_type.starts_with("application/") && media_type.ends_with("+json"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Router, body::Body, http::Request, http::StatusCode, routing::post};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    fn headers_with(content_type: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::CONTENT_TYPE, content_type.parse().unwrap());
        headers
    }

    #[test]
    fn test_json_content_types() {
        assert!(has_json_content_type(&headers_with("application/json")));
        assert!(has_json_content_type(&headers_with(
            "application/json; charset=utf-8"
        )));
        assert!(has_json_content_type(&headers_with("Application/JSON")));
        assert!(has_json_content_type(&headers_with(
            "application/merge-patch+json"
        )));
    }

    #[test]
    fn test_non_json_content_types() {
        assert!(!has_json_content_type(&HeaderMap::new()));
        assert!(!has_json_content_type(&headers_with("text/plain")));
        assert!(!has_json_content_type(&headers_with("text/json")));
        assert!(!has_json_content_type(&headers_with(
            "application/x-www-form-urlencoded"
        )));
    }

    fn app() -> Router {
        async fn echo(JsonPayload(body): JsonPayload) -> String {
            body.to_string()
        }

        Router::new().route("/echo", post(echo))
    }

    async fn send(content_type: Option<&str>, body: &'static str) -> (StatusCode, String) {
        let mut builder = Request::builder().method("POST").uri("/echo");
        if let Some(content_type) = content_type {
            builder = builder.header(header::CONTENT_TYPE, content_type);
        }

        let response = app()
            .oneshot(builder.body(Body::from(body)).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_extracts_any_json_value() {
        let (status, body) = send(Some("application/json"), r#"[1, "two"]"#).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, r#"[1,"two"]"#);
    }

    #[tokio::test]
    async fn test_missing_content_type_is_rejected() {
        let (status, body) = send(None, r#"{"a":1}"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.contains("UNSUPPORTED_CONTENT_TYPE"));
    }

    #[tokio::test]
    async fn test_malformed_json_is_rejected() {
        let (status, body) = send(Some("application/json"), "{not json").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.contains("Failed to decode JSON body"));
    }

    #[tokio::test]
    async fn test_empty_body_is_malformed() {
        let (status, _) = send(Some("application/json"), "").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
