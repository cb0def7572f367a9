use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_helpers::{AppError, IdPathRejection, JsonPayloadRejection};
use sea_orm::DbErr;
use thiserror::Error;

use crate::models::{ErrorBody, TASK_NOT_FOUND};
use crate::schema::FieldErrors;

#[derive(Debug, Error)]
pub enum TaskError {
    #[error("Task not found: {0}")]
    NotFound(i32),

    /// All-digit id too large to be stored; no row can match it
    #[error("Task not found: {0}")]
    IdOutOfRange(String),

    #[error(transparent)]
    InvalidId(IdPathRejection),

    #[error("Invalid input: {0}")]
    Validation(FieldErrors),

    #[error("Invalid content type, JSON expected")]
    UnsupportedContentType,

    #[error("Failed to decode JSON body: {0}")]
    MalformedJson(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type TaskResult<T> = Result<T, TaskError>;

/// Convert TaskError to AppError for the standardized error envelope
impl From<TaskError> for AppError {
    fn from(err: TaskError) -> Self {
        match err {
            TaskError::NotFound(_) | TaskError::IdOutOfRange(_) => {
                AppError::NotFound(TASK_NOT_FOUND.to_string())
            }
            TaskError::InvalidId(rejection) => AppError::from(rejection),
            TaskError::Validation(errors) => AppError::BadRequest(errors.to_string()),
            e @ TaskError::UnsupportedContentType => AppError::UnsupportedContentType(e.to_string()),
            e @ TaskError::MalformedJson(_) => AppError::InvalidJson(e.to_string()),
            TaskError::Database(msg) => AppError::Database(DbErr::Custom(msg)),
            TaskError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for TaskError {
    fn into_response(self) -> Response {
        match self {
            TaskError::NotFound(id) => {
                tracing::info!(task_id = id, "Task not found");
                (StatusCode::NOT_FOUND, Json(ErrorBody::new(TASK_NOT_FOUND))).into_response()
            }
            TaskError::IdOutOfRange(raw) => {
                tracing::info!(task_id = %raw, "Task not found");
                (StatusCode::NOT_FOUND, Json(ErrorBody::new(TASK_NOT_FOUND))).into_response()
            }
            TaskError::InvalidId(rejection) => rejection.into_response(),
            TaskError::Validation(errors) => {
                tracing::info!(%errors, "Task payload rejected");
                (StatusCode::BAD_REQUEST, Json(errors)).into_response()
            }
            e @ (TaskError::UnsupportedContentType | TaskError::MalformedJson(_)) => {
                tracing::info!(error = %e, "Task payload rejected");
                (StatusCode::BAD_REQUEST, Json(ErrorBody::new(e.to_string()))).into_response()
            }
            // Server-side failures use the standard envelope
            e @ (TaskError::Database(_) | TaskError::Internal(_)) => {
                AppError::from(e).into_response()
            }
        }
    }
}

impl From<DbErr> for TaskError {
    fn from(err: DbErr) -> Self {
        TaskError::Database(err.to_string())
    }
}

impl From<IdPathRejection> for TaskError {
    fn from(rejection: IdPathRejection) -> Self {
        match rejection {
            IdPathRejection::OutOfRange(raw) => TaskError::IdOutOfRange(raw),
            other => TaskError::InvalidId(other),
        }
    }
}

impl From<JsonPayloadRejection> for TaskError {
    fn from(rejection: JsonPayloadRejection) -> Self {
        match rejection {
            JsonPayloadRejection::MissingJsonContentType => TaskError::UnsupportedContentType,
            JsonPayloadRejection::InvalidJson(e) => TaskError::MalformedJson(e.to_string()),
            JsonPayloadRejection::Body(e) => TaskError::MalformedJson(e.body_text()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use serde_json::{Value, json};

    async fn response_parts(err: TaskError) -> (StatusCode, Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_not_found_body() {
        let (status, body) = response_parts(TaskError::NotFound(42)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({"error": "Task not found"}));
    }

    #[tokio::test]
    async fn test_validation_body_is_field_map() {
        let mut errors = FieldErrors::new();
        errors.add("title", "Missing data for required field.");

        let (status, body) = response_parts(TaskError::Validation(errors)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"title": ["Missing data for required field."]}));
    }

    #[tokio::test]
    async fn test_content_type_body() {
        let (status, body) = response_parts(TaskError::UnsupportedContentType).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"error": "Invalid content type, JSON expected"}));
    }

    #[tokio::test]
    async fn test_malformed_json_body() {
        let (status, body) =
            response_parts(TaskError::MalformedJson("EOF while parsing".to_string())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body,
            json!({"error": "Failed to decode JSON body: EOF while parsing"})
        );
    }

    #[tokio::test]
    async fn test_database_error_uses_envelope() {
        let (status, body) =
            response_parts(TaskError::Database("connection reset".to_string())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["code"], 2003);
        assert_eq!(body["error"], "DATABASE_ERROR");
    }

    #[tokio::test]
    async fn test_internal_error_uses_envelope() {
        let (status, body) = response_parts(TaskError::Internal("boom".to_string())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["code"], 1005);
    }

    #[test]
    fn test_rejection_mapping() {
        let err: TaskError = JsonPayloadRejection::MissingJsonContentType.into();
        assert!(matches!(err, TaskError::UnsupportedContentType));

        let parse_err = serde_json::from_str::<Value>("{").unwrap_err();
        let err: TaskError = JsonPayloadRejection::InvalidJson(parse_err).into();
        assert!(err.to_string().starts_with("Failed to decode JSON body: "));
    }

    #[tokio::test]
    async fn test_oversized_id_is_task_not_found() {
        let err: TaskError = IdPathRejection::OutOfRange("3000000000".to_string()).into();
        let (status, body) = response_parts(err).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({"error": "Task not found"}));
    }

    #[tokio::test]
    async fn test_non_digit_id_keeps_envelope() {
        let err: TaskError = IdPathRejection::NotAnId("abc".to_string()).into();
        let (status, body) = response_parts(err).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "NOT_FOUND");
        assert_eq!(body["message"], "No resource found for id 'abc'");
    }

    #[test]
    fn test_app_error_status() {
        assert_eq!(
            AppError::from(TaskError::NotFound(1)).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::from(TaskError::UnsupportedContentType).status(),
            StatusCode::BAD_REQUEST
        );
    }
}
