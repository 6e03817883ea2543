//! HTTP error mapping.
//!
//! Client-visible failures are always `{"error": "<fixed message>"}` with a
//! matching status code. Internal causes are logged, never returned.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use log::error;
use readinglist_core::BookServiceError;
use serde::Serialize;

pub const VALIDATION_MESSAGE: &str = "title and author are required";
pub const NOT_FOUND_MESSAGE: &str = "not found";
pub const INTERNAL_MESSAGE: &str = "internal server error";

#[derive(Debug)]
pub enum ApiError {
    Validation,
    NotFound,
    Internal(String),
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: &'static str,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn message(&self) -> &'static str {
        match self {
            Self::Validation => VALIDATION_MESSAGE,
            Self::NotFound => NOT_FOUND_MESSAGE,
            Self::Internal(_) => INTERNAL_MESSAGE,
        }
    }
}

impl From<BookServiceError> for ApiError {
    fn from(value: BookServiceError) -> Self {
        match value {
            BookServiceError::Validation(_) => Self::Validation,
            BookServiceError::NotFound(_) => Self::NotFound,
            BookServiceError::Repo(err) => Self::Internal(err.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let Self::Internal(cause) = &self {
            error!("event=http_error module=server status=error error_code=internal error={cause}");
        }
        let body = ErrorBody {
            error: self.message(),
        };
        (self.status(), Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::ApiError;
    use axum::http::StatusCode;
    use readinglist_core::{BookServiceError, BookValidationError, RepoError};

    #[test]
    fn service_errors_map_to_client_and_server_statuses() {
        let validation: ApiError =
            BookServiceError::Validation(BookValidationError::MissingTitle).into();
        assert_eq!(validation.status(), StatusCode::BAD_REQUEST);

        let not_found: ApiError = BookServiceError::NotFound(3).into();
        assert_eq!(not_found.status(), StatusCode::NOT_FOUND);

        let internal: ApiError =
            BookServiceError::Repo(RepoError::MissingRequiredTable("books")).into();
        assert_eq!(internal.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
