//! Login Error Types
//!
//! This module provides login-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.
//!
//! Client-facing messages are fixed strings. The four categories a client can
//! observe are validation, CSRF, invalid credentials and a generic
//! infrastructure failure.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use platform::password::PasswordHashError;
use thiserror::Error;

/// Login-specific result type alias
pub type LoginResult<T> = Result<T, LoginError>;

/// Message shown for every infrastructure failure
pub const INFRASTRUCTURE_MESSAGE: &str = "Error attempting to log in, please try again later.";

/// Login-specific error variants
#[derive(Debug, Error)]
pub enum LoginError {
    /// A credential field was empty after sanitization
    #[error("Please fill in all fields.")]
    Validation,

    /// Submitted CSRF token missing or not equal to the session's
    #[error("Invalid CSRF token.")]
    Csrf,

    /// Unknown identity or wrong password (deliberately merged)
    #[error("Invalid credentials.")]
    InvalidCredentials,

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Stored data breaks an invariant the store should enforce
    #[error("Data integrity violation: {0}")]
    DataIntegrity(String),

    /// Stored password hash cannot be used
    #[error("Stored password hash unusable: {0}")]
    PasswordHash(#[from] PasswordHashError),

    /// Page rendering failed
    #[error("Template error: {0}")]
    Template(#[from] askama::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl LoginError {
    /// Whether this failure is an infrastructure problem
    pub fn is_infrastructure(&self) -> bool {
        !matches!(
            self,
            LoginError::Validation | LoginError::Csrf | LoginError::InvalidCredentials
        )
    }

    /// Message safe to send to the client
    pub fn client_message(&self) -> &'static str {
        match self {
            LoginError::Validation => "Please fill in all fields.",
            LoginError::Csrf => "Invalid CSRF token.",
            LoginError::InvalidCredentials => "Invalid credentials.",
            _ => INFRASTRUCTURE_MESSAGE,
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            LoginError::Validation => ErrorKind::BadRequest,
            LoginError::Csrf => ErrorKind::Forbidden,
            LoginError::InvalidCredentials => ErrorKind::Unauthorized,
            LoginError::Database(
                sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_),
            ) => ErrorKind::ServiceUnavailable,
            LoginError::Database(_)
            | LoginError::DataIntegrity(_)
            | LoginError::PasswordHash(_)
            | LoginError::Template(_)
            | LoginError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Convert to AppError (client-safe message only)
    pub fn to_app_error(&self) -> AppError {
        AppError::new(self.kind(), self.client_message())
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            LoginError::Database(e) => {
                tracing::error!(error = %e, "Database query error");
            }
            LoginError::DataIntegrity(msg) => {
                tracing::error!(message = %msg, "Login data integrity violation");
            }
            LoginError::PasswordHash(e) => {
                tracing::error!(error = %e, "Unusable password hash in users table");
            }
            LoginError::Template(e) => {
                tracing::error!(error = %e, "Login page rendering failed");
            }
            LoginError::Internal(msg) => {
                tracing::error!(message = %msg, "Login internal error");
            }
            LoginError::Csrf => {
                tracing::warn!("CSRF token mismatch");
            }
            LoginError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            LoginError::Validation => {
                tracing::debug!(error = %self, "Login validation error");
            }
        }
    }
}

impl IntoResponse for LoginError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}
