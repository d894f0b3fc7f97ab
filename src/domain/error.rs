//! Error types for the ABTube client.
//!
//! This module defines the centralized error type [`ClientError`], the
//! login-specific [`AuthError`], and a [`Result`] alias used throughout the
//! crate. Every failure is scoped to the single user action that caused it;
//! there is no fatal class.
//!
//! Variants carry rendered messages rather than source errors so that results
//! can travel through the dispatcher and be compared in tests.

use thiserror::Error;

/// Failures of the session holder's login operation.
///
/// Converts into [`ClientError::Auth`] so it can be propagated with `?`
/// from any client operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// The backend rejected the username/password pair.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// The login request did not complete or the server failed.
    #[error("login request failed: {0}")]
    Network(String),

    /// The returned token could not be written to the local store.
    #[error("could not persist session token: {0}")]
    Storage(String),

    /// The action requires a logged-in session and none exists, or the
    /// backend no longer accepts the stored token.
    #[error("not authenticated: {0}")]
    NotAuthenticated(String),
}

/// The main error type for client operations.
///
/// # Examples
///
/// ```
/// use abtube::domain::ClientError;
///
/// fn require_title(title: &str) -> Result<(), ClientError> {
///     if title.trim().is_empty() {
///         return Err(ClientError::Validation("title is required".to_string()));
///     }
///     Ok(())
/// }
///
/// assert!(require_title("  ").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// The request failed to complete, or the server answered with a 5xx.
    #[error("Network error: {0}")]
    Network(String),

    /// Authentication failed or is missing.
    #[error("Authentication error: {0}")]
    Auth(#[from] AuthError),

    /// A client-side required-field check failed, or the backend rejected
    /// the submitted fields (HTTP 400/422).
    #[error("Validation error: {0}")]
    Validation(String),

    /// The referenced video or comment does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The backend refused an operation on a resource owned by someone else.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Reading from or writing to the local store failed.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Configuration is invalid or could not be read.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<std::io::Error> for ClientError {
    fn from(err: std::io::Error) -> Self {
        Self::Storage(err.to_string())
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        Self::Network(err.to_string())
    }
}

impl ClientError {
    /// Maps a non-success HTTP status and its `detail` message onto the
    /// error taxonomy.
    #[must_use]
    pub fn from_status(status: u16, detail: String) -> Self {
        match status {
            401 => Self::Auth(AuthError::NotAuthenticated(detail)),
            403 => Self::Forbidden(detail),
            404 => Self::NotFound(detail),
            400..=499 => Self::Validation(detail),
            _ => Self::Network(format!("server returned {status}: {detail}")),
        }
    }
}

/// A specialized `Result` type for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;
