//! Error types shared by the session, transport and navigation layers.
//!
//! Messages carried by these variants may reach the user, so they are built from
//! sanitized server bodies and never include tokens or passwords.

use thiserror::Error;

/// Message shown when the backend rejects a username/password pair.
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid username or password. Please try again.";

/// Coarse classification of an [`AuthError`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AuthErrorKind {
    InvalidCredentials,
    Network,
    Server,
    Config,
    Validation,
}

/// Failure of a session operation that is surfaced to the caller.
///
/// Only `login` surfaces these; logout and refresh absorb their failures.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum AuthError {
    #[error("Invalid credentials: {0}")]
    InvalidCredentials(String),
    #[error("Network error: {0}")]
    Network(String),
    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },
    #[error("Config error: {0}")]
    Config(String),
    #[error("Validation error: {0}")]
    Validation(String),
}

impl AuthError {
    #[must_use]
    pub fn kind(&self) -> AuthErrorKind {
        match self {
            AuthError::InvalidCredentials(_) => AuthErrorKind::InvalidCredentials,
            AuthError::Network(_) => AuthErrorKind::Network,
            AuthError::Server { .. } => AuthErrorKind::Server,
            AuthError::Config(_) => AuthErrorKind::Config,
            AuthError::Validation(_) => AuthErrorKind::Validation,
        }
    }

    /// Text suitable for a login form.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            AuthError::InvalidCredentials(_) => INVALID_CREDENTIALS_MESSAGE.to_string(),
            AuthError::Network(_) => "Unable to reach the server. Please try again.".to_string(),
            AuthError::Server { .. } => {
                "The server could not complete the request. Please try again later.".to_string()
            }
            AuthError::Config(message) | AuthError::Validation(message) => message.clone(),
        }
    }
}

impl From<ApiError> for AuthError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Network(message) | ApiError::Timeout(message) => AuthError::Network(message),
            ApiError::Unauthorized(message)
            | ApiError::Forbidden(message)
            | ApiError::NotFound(message) => AuthError::InvalidCredentials(message),
            ApiError::Http { status, message } if (400..500).contains(&status) => {
                AuthError::InvalidCredentials(message)
            }
            ApiError::Http { status, message } => AuthError::Server { status, message },
            ApiError::Decode(message) => AuthError::Server {
                status: 200,
                message,
            },
            ApiError::Request(message) => AuthError::Config(message),
        }
    }
}

/// Failure of a call made through [`crate::transport::ApiClient`].
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum ApiError {
    #[error("Request error: {0}")]
    Request(String),
    #[error("Network error: {0}")]
    Network(String),
    #[error("Timeout: {0}")]
    Timeout(String),
    #[error("Unauthorized: {0}")]
    Unauthorized(String),
    #[error("Forbidden: {0}")]
    Forbidden(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Request failed ({status}): {message}")]
    Http { status: u16, message: String },
    #[error("Response error: {0}")]
    Decode(String),
}

impl ApiError {
    /// Maps a non-success status and sanitized body to a variant.
    #[must_use]
    pub fn from_status(status: u16, message: String) -> Self {
        match status {
            401 => ApiError::Unauthorized(message),
            403 => ApiError::Forbidden(message),
            404 => ApiError::NotFound(message),
            _ => ApiError::Http { status, message },
        }
    }
}
