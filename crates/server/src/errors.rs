use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;
use tracing::error;

use models::errors::ModelError;
use service::auth::errors::AuthError;
use service::errors::ServiceError;

/// Error body rendered as `{"error": ..., "message": ...}`.
#[derive(Debug)]
pub struct JsonApiError {
    pub status: StatusCode,
    pub error: String,
    pub message: Option<String>,
}

impl JsonApiError {
    pub fn new(status: StatusCode, error: impl Into<String>, message: Option<String>) -> Self {
        Self { status, error: error.into(), message }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "Validation Error", Some(message.into()))
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, "Unauthorized", Some(message.into()))
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(StatusCode::FORBIDDEN, "Forbidden", Some(message.into()))
    }

    fn internal(detail: String) -> Self {
        error!(error = %detail, "request failed");
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error", Some("Server error".into()))
    }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({ "error": self.error, "message": self.message });
        (self.status, Json(body)).into_response()
    }
}

impl From<ServiceError> for JsonApiError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::Validation(m) | ServiceError::Model(ModelError::Validation(m)) => Self::bad_request(m),
            ServiceError::NotFound(m) => Self::new(StatusCode::NOT_FOUND, "Not Found", Some(m)),
            ServiceError::Conflict(m) => Self::new(StatusCode::CONFLICT, "Conflict", Some(m)),
            ServiceError::Forbidden(m) => Self::forbidden(m),
            other => Self::internal(other.to_string()),
        }
    }
}

impl From<AuthError> for JsonApiError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::Validation(m) => Self::bad_request(m),
            AuthError::Unauthorized | AuthError::InvalidUsername | AuthError::InvalidPin => {
                Self::unauthorized(e.to_string())
            }
            other => Self::internal(format!("auth error {}: {other}", other.code())),
        }
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("database setup failed: {0}")]
    Database(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_errors_map_to_statuses() {
        let cases = [
            (ServiceError::validation("bad"), StatusCode::BAD_REQUEST),
            (ServiceError::Model(ModelError::validation("bad role")), StatusCode::BAD_REQUEST),
            (ServiceError::not_found("order"), StatusCode::NOT_FOUND),
            (ServiceError::conflict("dup"), StatusCode::CONFLICT),
            (ServiceError::forbidden("no"), StatusCode::FORBIDDEN),
            (ServiceError::Db("boom".into()), StatusCode::INTERNAL_SERVER_ERROR),
            (ServiceError::Internal("boom".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, status) in cases {
            assert_eq!(JsonApiError::from(err).status, status);
        }
    }

    #[test]
    fn internal_details_are_not_leaked() {
        let e = JsonApiError::from(ServiceError::Db("password=hunter2".into()));
        assert_eq!(e.message.as_deref(), Some("Server error"));
    }

    #[test]
    fn login_failures_are_unauthorized() {
        assert_eq!(JsonApiError::from(AuthError::InvalidPin).status, StatusCode::UNAUTHORIZED);
        assert_eq!(JsonApiError::from(AuthError::InvalidUsername).message.as_deref(), Some("invalid username"));
        assert_eq!(JsonApiError::from(AuthError::Validation("x".into())).status, StatusCode::BAD_REQUEST);
    }

    #[test]
    fn startup_errors_surface_through_anyhow() {
        let err: anyhow::Error = StartupError::Database("connection refused".into()).into();
        assert_eq!(err.to_string(), "database setup failed: connection refused");
        assert!(matches!(err.downcast_ref::<StartupError>(), Some(StartupError::Database(_))));
    }
}
