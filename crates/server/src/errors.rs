use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use service::auth::errors::AuthError;
use service::errors::ServiceError;

const CHECK_LOGS: &str = "Please check server logs";

/// Uniform HTTP error body: `{ statusCode, error, message }`.
#[derive(Debug, Clone, PartialEq)]
pub struct JsonApiError {
    pub status: StatusCode,
    pub message: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ErrorBody<'a> {
    status_code: u16,
    error: &'a str,
    message: &'a str,
}

impl JsonApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self { status, message: message.into() }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, message)
    }

    pub fn internal() -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, CHECK_LOGS)
    }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            status_code: self.status.as_u16(),
            error: self.status.canonical_reason().unwrap_or("Error"),
            message: &self.message,
        };
        (self.status, Json(body)).into_response()
    }
}

impl From<ServiceError> for JsonApiError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::Validation(m) => Self::bad_request(m),
            ServiceError::Conflict(detail) => Self::bad_request(detail),
            ServiceError::NotFound(m) => Self::new(StatusCode::NOT_FOUND, m),
            other => {
                error!(err = %other, "unhandled service error");
                Self::internal()
            }
        }
    }
}

impl From<AuthError> for JsonApiError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::Validation(m) => Self::bad_request(m),
            AuthError::Conflict(detail) => Self::bad_request(detail),
            AuthError::MissingUser => Self::bad_request(AuthError::MissingUser.to_string()),
            AuthError::Unauthorized(m) => Self::unauthorized(m),
            AuthError::Forbidden(m) => Self::new(StatusCode::FORBIDDEN, m),
            other => {
                error!(err = %other, code = other.code(), "unhandled auth error");
                Self::internal()
            }
        }
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("runtime check failed: {0}")]
    Runtime(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_errors_map_to_status() {
        let cases = [
            (ServiceError::Validation("bad".into()), StatusCode::BAD_REQUEST),
            (ServiceError::Conflict("Key (title)=(x) already exists.".into()), StatusCode::BAD_REQUEST),
            (ServiceError::not_found("Product", "abc"), StatusCode::NOT_FOUND),
            (ServiceError::Db("connection reset".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, status) in cases {
            assert_eq!(JsonApiError::from(err).status, status);
        }
    }

    #[test]
    fn internal_errors_hide_details() {
        let err = JsonApiError::from(AuthError::Repository("password authentication failed".into()));
        assert_eq!(err.message, "Please check server logs");
        let err = JsonApiError::from(AuthError::Forbidden("User X need a valid role: [admin]".into()));
        assert_eq!(err.status, StatusCode::FORBIDDEN);
    }
}
