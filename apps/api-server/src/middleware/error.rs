//! Error handling - every failure leaves the server as an `ErrorResponse`.

use std::fmt;

use actix_web::error::{InternalError, JsonPayloadError, PathError, QueryPayloadError};
use actix_web::{HttpMessage, HttpRequest, HttpResponse, ResponseError, http::StatusCode};
use whisper_core::DomainError;
use whisper_core::domain::{Category, ReactionKind};
use whisper_shared::ErrorResponse;

use crate::observability::RequestId;

/// Application-level error type.
#[derive(Debug)]
pub enum AppError {
    NotFound(String),
    BadRequest(String),
    Forbidden(String),
    Internal(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            AppError::Forbidden(msg) => write!(f, "Forbidden: {}", msg),
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let error = match self {
            AppError::NotFound(msg) => ErrorResponse::not_found(msg),
            AppError::BadRequest(msg) => ErrorResponse::bad_request(msg),
            AppError::Forbidden(msg) => ErrorResponse::forbidden(msg),
            AppError::Internal(detail) => {
                // Logged here, never sent
                tracing::error!("Internal error: {}", detail);
                ErrorResponse::internal_error()
            }
        };

        HttpResponse::build(self.status_code()).json(error)
    }
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::NotFound { entity_type, .. } => {
                AppError::NotFound(format!("{} not found.", entity_type))
            }
            DomainError::Validation(msg) => AppError::BadRequest(msg),
            DomainError::InvalidCategory(value) => AppError::BadRequest(format!(
                "Invalid category '{}'. Must be one of: {}",
                value,
                Category::NAMES.join(", ")
            )),
            DomainError::InvalidKind(value) => AppError::BadRequest(format!(
                "Invalid reaction type '{}'. Must be one of: {}",
                value,
                ReactionKind::ALL.map(|k| k.as_str()).join(", ")
            )),
            DomainError::Forbidden => AppError::Forbidden(err.to_string()),
            DomainError::Internal(msg) => AppError::Internal(msg),
        }
    }
}

/// Result type alias for handlers.
pub type AppResult<T> = Result<T, AppError>;

/// Malformed or missing JSON bodies.
pub fn json_error_handler(err: JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    let body = ErrorResponse::bad_request(format!("Invalid request body: {}", err));
    extractor_error(err, req, body)
}

/// Path segments that do not parse (e.g. a post id that is not a UUID).
/// Such a resource cannot exist, so this answers 404.
pub fn path_error_handler(err: PathError, req: &HttpRequest) -> actix_web::Error {
    extractor_error(err, req, ErrorResponse::not_found("Post not found."))
}

pub fn query_error_handler(err: QueryPayloadError, req: &HttpRequest) -> actix_web::Error {
    let body = ErrorResponse::bad_request(format!("Invalid query string: {}", err));
    extractor_error(err, req, body)
}

fn extractor_error<E>(err: E, req: &HttpRequest, body: ErrorResponse) -> actix_web::Error
where
    E: fmt::Debug + fmt::Display + 'static,
{
    let body = match req.extensions().get::<RequestId>() {
        Some(id) => body.with_request_id(id.as_str()),
        None => body,
    };
    let status = StatusCode::from_u16(body.status).unwrap_or(StatusCode::BAD_REQUEST);

    tracing::debug!(status = body.status, error = %err, "Rejected request input");
    InternalError::from_response(err, HttpResponse::build(status).json(body)).into()
}
