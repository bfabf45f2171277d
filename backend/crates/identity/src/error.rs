//! Identity Error Types
//!
//! Identity-specific error variants. Each variant is classified into a
//! `kernel::error::kind::ErrorKind`; turning that into a transport status is
//! left to the presentation layer.

use axum::extract::rejection::JsonRejection;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use platform::password::PasswordHashError;
use thiserror::Error;

/// Identity result type alias
pub type AuthResult<T> = Result<T, AuthError>;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("User not found")]
    UserNotFound,

    /// Email already registered
    #[error("User already exists")]
    UserExists,

    /// Wrong password for an existing account
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Provider does not recognize the access token
    #[error("Provider access token is invalid")]
    BadProviderToken,

    /// Provider reports the access token's session as expired
    #[error("Provider access token is expired")]
    ProviderTokenExpired,

    /// Launch params signature or user id did not check out
    #[error("Launch params are invalid")]
    BadLaunchParams,

    #[error("Session token is expired")]
    TokenExpired,

    /// Unparseable token or signature mismatch
    #[error("Session token is invalid")]
    TokenMalformed,

    /// No Authorization header
    #[error("Access denied. No token provided")]
    MissingToken,

    /// Authorization header present but not `Bearer <token>`
    #[error("Invalid token format")]
    BadTokenFormat,

    /// Role outside the route's allowed set
    #[error("Access denied")]
    Forbidden,

    /// Authorization ran without authentication in front of it
    #[error("Role not found in request context")]
    RoleContextMissing,

    #[error("Password hashing failed: {0}")]
    HashingFailure(String),

    /// Malformed input (email, password policy, ids)
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Opaque failure talking to the social provider
    #[error("Provider error: {0}")]
    Provider(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::UserNotFound => ErrorKind::NotFound,
            AuthError::UserExists => ErrorKind::Conflict,
            AuthError::InvalidCredentials
            | AuthError::ProviderTokenExpired
            | AuthError::TokenExpired
            | AuthError::TokenMalformed
            | AuthError::MissingToken
            | AuthError::BadTokenFormat => ErrorKind::Unauthorized,
            AuthError::BadProviderToken
            | AuthError::BadLaunchParams
            | AuthError::Validation(_) => ErrorKind::BadRequest,
            AuthError::Forbidden => ErrorKind::Forbidden,
            AuthError::Provider(_) => ErrorKind::BadGateway,
            AuthError::RoleContextMissing
            | AuthError::HashingFailure(_)
            | AuthError::Database(_)
            | AuthError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError
    ///
    /// Server-side details stay out of the message shown to clients.
    pub fn to_app_error(&self) -> AppError {
        let kind = self.kind();
        if kind.is_server_error() && !matches!(self, AuthError::Provider(_)) {
            return AppError::new(kind, "Identity service problems");
        }
        match self {
            AuthError::Provider(_) => AppError::new(kind, "Identity provider is unavailable")
                .with_action("Please try again later"),
            AuthError::TokenExpired => {
                AppError::new(kind, self.to_string()).with_action("Please sign in again")
            }
            _ => AppError::new(kind, self.to_string()),
        }
    }

    /// Log the error with appropriate level
    pub(crate) fn log(&self) {
        match self {
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Identity database error");
            }
            AuthError::Internal(msg) | AuthError::HashingFailure(msg) => {
                tracing::error!(message = %msg, "Identity internal error");
            }
            AuthError::Provider(msg) => {
                tracing::error!(message = %msg, "Identity provider failure");
            }
            AuthError::RoleContextMissing => {
                tracing::error!("Role gate mounted without authentication gate");
            }
            AuthError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            AuthError::BadLaunchParams => {
                tracing::warn!("Launch params rejected");
            }
            _ => {
                tracing::debug!(error = %self, "Identity error");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<PasswordHashError> for AuthError {
    fn from(err: PasswordHashError) -> Self {
        match err {
            PasswordHashError::HashingFailed(msg) => AuthError::HashingFailure(msg),
            PasswordHashError::InvalidHashFormat => {
                AuthError::Internal("Stored password hash is malformed".to_string())
            }
        }
    }
}

impl From<AppError> for AuthError {
    fn from(err: AppError) -> Self {
        if err.is_server_error() {
            AuthError::Internal(err.to_string())
        } else {
            AuthError::Validation(err.message().to_string())
        }
    }
}

impl From<JsonRejection> for AuthError {
    fn from(rejection: JsonRejection) -> Self {
        AuthError::Validation(rejection.body_text())
    }
}

impl From<reqwest::Error> for AuthError {
    fn from(err: reqwest::Error) -> Self {
        AuthError::Provider(err.to_string())
    }
}
