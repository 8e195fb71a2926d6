//! Error types for the fice-data crate.

use thiserror::Error;

/// Errors returned by the mock database.
///
/// Each variant maps onto the HTTP status the real backend would answer
/// with, see [`DataError::code`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DataError {
    /// Unknown email or wrong password.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// The account exists but is blocked.
    #[error("User is blocked")]
    UserBlocked,

    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("Session not found: {0}")]
    SessionNotFound(String),

    /// The user owns no financial identity.
    #[error("Financial identity not found for user: {0}")]
    IdentityNotFound(String),
}

impl DataError {
    /// HTTP-like status code for this error.
    pub fn code(&self) -> u16 {
        match self {
            DataError::InvalidCredentials => 401,
            DataError::UserBlocked => 403,
            DataError::UserNotFound(_)
            | DataError::SessionNotFound(_)
            | DataError::IdentityNotFound(_) => 404,
        }
    }
}

/// Errors that can occur when calling a backend over HTTP.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The base URL for the named backend is not configured.
    #[error("{0} base URL is not configured")]
    MissingBaseUrl(&'static str),

    /// Network or transport failure.
    #[error("Network error: {0}")]
    Network(String),

    /// Non-2xx response; `message` is extracted from the body when possible.
    #[error("{message}")]
    Status { code: u16, message: String },

    /// The response body could not be decoded into the expected type.
    #[error("Failed to decode response: {0}")]
    Decode(String),
}
