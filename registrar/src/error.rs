//! Registrar error types
//!
//! Per-participant failures are never errors here; they end up as data in a
//! `RegistrationReport`. These variants cover what aborts a whole call.

use shared::SharedError;
use thiserror::Error;

/// Result type for registrar operations
pub type RegistrarResult<T> = Result<T, RegistrarError>;

#[derive(Error, Debug)]
pub enum RegistrarError {
    /// No bearer token could be obtained
    #[error("Zoom authentication failed: {message}")]
    AuthFailure { message: String },

    /// The caller's request is malformed; nothing was sent to Zoom
    #[error("Validation failed: {message}")]
    ValidationFailure { message: String },

    /// Zoom refused a call that has no per-participant fallback
    #[error("Zoom rejected the request with status {status}: {detail}")]
    UpstreamRejected { status: u16, detail: String },

    /// Zoom could not be reached for a call that has no per-participant fallback
    #[error("Zoom request failed: {message}")]
    Transport { message: String },

    #[error("HTTP client setup failed: {0}")]
    HttpClient(#[from] reqwest::Error),
}

impl RegistrarError {
    pub fn auth(message: impl Into<String>) -> Self {
        Self::AuthFailure {
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationFailure {
            message: message.into(),
        }
    }
}

impl From<SharedError> for RegistrarError {
    fn from(err: SharedError) -> Self {
        match err {
            SharedError::InvalidRequest { message } => Self::ValidationFailure { message },
            other => Self::ValidationFailure {
                message: other.to_string(),
            },
        }
    }
}
