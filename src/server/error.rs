use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::dictionary::{DictionaryError, LookupError};
use crate::storage::StorageError;

/// Error returned by API handlers, rendered as `{"error": message}`
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            log::error!("API error {}: {}", self.status, self.message);
        }
        let body = serde_json::json!({ "error": self.message });
        (self.status, Json(body)).into_response()
    }
}

impl From<StorageError> for ApiError {
    fn from(err: StorageError) -> Self {
        let status = if err.is_not_found() {
            StatusCode::NOT_FOUND
        } else if err.is_invalid_input() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };
        Self::new(status, err.to_string())
    }
}

impl From<LookupError> for ApiError {
    fn from(err: LookupError) -> Self {
        match err {
            LookupError::EmptyQuery => Self::bad_request(err.to_string()),
            LookupError::Dictionary(DictionaryError::NotFound(_)) => {
                Self::new(StatusCode::NOT_FOUND, err.to_string())
            }
            LookupError::Dictionary(_) => Self::new(StatusCode::BAD_GATEWAY, err.to_string()),
            LookupError::Storage(inner) => inner.into(),
            LookupError::LockPoisoned => Self::internal(err.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_storage_error_status() {
        let not_found: ApiError = StorageError::GroupNotFound(Uuid::new_v4()).into();
        assert_eq!(not_found.status, StatusCode::NOT_FOUND);

        let duplicate: ApiError = StorageError::DuplicateGroup("Verbs".to_string()).into();
        assert_eq!(duplicate.status, StatusCode::BAD_REQUEST);
        assert_eq!(duplicate.message, "Group with this name already exists: Verbs");

        let io: ApiError = StorageError::Io(std::io::Error::other("disk full")).into();
        assert_eq!(io.status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_lookup_error_status() {
        let empty: ApiError = LookupError::EmptyQuery.into();
        assert_eq!(empty.status, StatusCode::BAD_REQUEST);

        let missing: ApiError =
            LookupError::Dictionary(DictionaryError::NotFound("qwzx".to_string())).into();
        assert_eq!(missing.status, StatusCode::NOT_FOUND);

        let upstream: ApiError =
            LookupError::Dictionary(DictionaryError::Server { status: 503 }).into();
        assert_eq!(upstream.status, StatusCode::BAD_GATEWAY);
    }
}
