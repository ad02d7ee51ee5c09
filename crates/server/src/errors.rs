use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

use store::StoreError;

/// Errors a handler can surface to the client. Storage errors keep their
/// message; the status code is derived from the error kind.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("body is empty")]
    EmptyBody,
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::Store(StoreError::DatabaseExists(_)) => StatusCode::CONFLICT,
            ApiError::Store(StoreError::DatabaseNotFound(_))
            | ApiError::Store(StoreError::KeyNotFound(_)) => StatusCode::NOT_FOUND,
            ApiError::Store(StoreError::Io(_)) | ApiError::Store(StoreError::Codec(_)) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ApiError::EmptyBody => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        (status, Json(serde_json::json!({ "error": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_follow_error_kind() {
        let conflict = ApiError::Store(StoreError::DatabaseExists("x".into()));
        assert_eq!(conflict.status(), StatusCode::CONFLICT);

        let missing_db = ApiError::Store(StoreError::DatabaseNotFound("x".into()));
        assert_eq!(missing_db.status(), StatusCode::NOT_FOUND);

        let missing_key = ApiError::Store(StoreError::KeyNotFound("x".into()));
        assert_eq!(missing_key.status(), StatusCode::NOT_FOUND);

        assert_eq!(ApiError::EmptyBody.status(), StatusCode::BAD_REQUEST);
    }
}
