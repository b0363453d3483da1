//! Shared error types for the registration relay

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SharedError {
    #[error("Missing required configuration: {keys}")]
    MissingConfig { keys: String },

    #[error("Invalid configuration: {field} = {value} ({reason})")]
    InvalidConfig {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Invalid request: {message}")]
    InvalidRequest { message: String },
}

impl SharedError {
    pub fn invalid_config(field: &str, value: &str, reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            field: field.to_string(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest {
            message: message.into(),
        }
    }
}

pub type SharedResult<T> = Result<T, SharedError>;
