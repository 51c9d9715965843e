use thiserror::Error;

/// Business errors for auth workflows
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("validation failed: {0}")]
    Validation(String),
    #[error("invalid or missing token")]
    Unauthorized,
    #[error("invalid username")]
    InvalidUsername,
    #[error("invalid security pin")]
    InvalidPin,
    #[error("hashing error: {0}")]
    HashError(String),
    #[error("token error: {0}")]
    TokenError(String),
    #[error("repository error: {0}")]
    Repository(String),
}

impl AuthError {
    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            AuthError::Validation(_) => 1001,
            AuthError::Unauthorized => 1004,
            AuthError::InvalidUsername => 1005,
            AuthError::InvalidPin => 1006,
            AuthError::HashError(_) => 1101,
            AuthError::TokenError(_) => 1102,
            AuthError::Repository(_) => 1200,
        }
    }
}

impl From<AuthError> for crate::errors::ServiceError {
    fn from(e: AuthError) -> Self {
        use crate::errors::ServiceError;
        match e {
            AuthError::Validation(m) => ServiceError::Validation(m),
            AuthError::Repository(m) => ServiceError::Db(m),
            other => ServiceError::Internal(other.to_string()),
        }
    }
}
