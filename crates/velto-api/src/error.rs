//! Error types for velto-api

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use velto_core::error::{ErrorCode, ErrorDetails};
use velto_core::{CoreError, DefaultErrorLogger, ErrorContext, ErrorLogger};

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Bad request: {message}")]
    BadRequest { message: String },

    #[error("Unauthorized")]
    Unauthorized,

    #[error(transparent)]
    Core(#[from] CoreError),
}

impl ApiError {
    /// Log a core error with its context and wrap it for the response
    pub fn report(error: CoreError, context: &ErrorContext) -> Self {
        DefaultErrorLogger.log_error(&error, context);
        ApiError::Core(error)
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::Core(error) => match error.code() {
                ErrorCode::RequestNotFound => StatusCode::NOT_FOUND,
                ErrorCode::ValidationError => StatusCode::BAD_REQUEST,
                ErrorCode::DuplicateEntry => StatusCode::CONFLICT,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }

    fn details(&self) -> ErrorDetails {
        match self {
            ApiError::Core(error) => error.to_details(),
            ApiError::BadRequest { .. } => {
                ErrorDetails::new(ErrorCode::ValidationError, self.to_string())
            }
            ApiError::Unauthorized => ErrorDetails::new(ErrorCode::Unauthorized, self.to_string())
                .with_suggestion("Sign in at /sign-in first.".to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let details = self.details();
        let body = serde_json::json!({
            "error": details.message,
            "code": details.code,
            "suggestions": details.suggestions,
        });
        (status, axum::Json(body)).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let not_found: ApiError = CoreError::RequestNotFound { id: "9".to_string() }.into();
        assert_eq!(not_found.status(), StatusCode::NOT_FOUND);

        let invalid: ApiError = CoreError::ValidationError {
            message: "Amount must be greater than 0".to_string(),
        }
        .into();
        assert_eq!(invalid.status(), StatusCode::BAD_REQUEST);

        assert_eq!(ApiError::Unauthorized.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            ApiError::BadRequest { message: "x".to_string() }.status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_core_error_keeps_suggestions() {
        let error: ApiError = CoreError::RequestNotFound { id: "9".to_string() }.into();
        let details = error.details();
        assert_eq!(details.message, "Payment request not found: 9");
        assert!(!details.suggestions.is_empty());
    }

    #[test]
    fn test_unauthorized_has_own_code() {
        let details = ApiError::Unauthorized.details();
        assert_eq!(details.code, ErrorCode::Unauthorized);
        assert_eq!(serde_json::to_value(details.code).unwrap(), "UNAUTHORIZED");
    }
}
