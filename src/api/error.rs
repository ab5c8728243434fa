use actix_web::http::{header::ContentType, StatusCode};
use actix_web::{HttpResponse, ResponseError};

use super::payload::FieldErrors;
use crate::domain::customer::CustomerError;
use crate::metrics::Outcome;

pub const UNEXPECTED_ERROR: &str = "An unexpected error occurred.";

// ============================================================================
// API Errors - mapping onto HTTP responses
// ============================================================================
//
// | Condition                 | Status | Body                          |
// |---------------------------|--------|-------------------------------|
// | Field validation failure  | 400    | JSON object field → message   |
// | Duplicate email           | 400    | plain message                 |
// | Customer not found        | 404    | plain message                 |
// | Anything else             | 500    | generic message, no detail    |
//
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("validation failed for {} field(s)", .0.len())]
    Validation(FieldErrors),

    /// A request the framework could not decode (body or path)
    #[error("unreadable request: {0}")]
    Unexpected(String),

    #[error(transparent)]
    Customer(#[from] CustomerError),
}

impl ApiError {
    pub fn outcome(&self) -> Outcome {
        match self.status_code() {
            StatusCode::NOT_FOUND => Outcome::NotFound,
            status if status.is_client_error() => Outcome::ClientError,
            _ => Outcome::ServerError,
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::Customer(CustomerError::DuplicateEmail(_)) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::Customer(CustomerError::NotFound(_)) => StatusCode::NOT_FOUND,
            ApiError::Unexpected(_) | ApiError::Customer(CustomerError::Storage(_)) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let mut response = HttpResponse::build(self.status_code());

        match self {
            ApiError::Validation(fields) => response.json(fields),
            ApiError::Customer(CustomerError::Storage(e)) => {
                tracing::error!(error = ?e, "Unhandled storage failure");
                response
                    .insert_header(ContentType::plaintext())
                    .body(UNEXPECTED_ERROR)
            }
            ApiError::Unexpected(detail) => {
                tracing::error!(error = %detail, "Unhandled request failure");
                response
                    .insert_header(ContentType::plaintext())
                    .body(UNEXPECTED_ERROR)
            }
            other => response
                .insert_header(ContentType::plaintext())
                .body(other.to_string()),
        }
    }
}
