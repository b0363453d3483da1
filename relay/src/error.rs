//! Relay-specific error types

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use registrar::RegistrarError;
use serde_json::json;
use shared::{Component, SharedError, component_error, component_warn};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RelayError {
    #[error("HTTP server startup failed on {addr}: {message}")]
    ServerStartupFailed { addr: String, message: String },

    #[error("Invalid request format: {details}")]
    InvalidRequest { details: String },

    #[error(transparent)]
    Registrar(#[from] RegistrarError),

    #[error(transparent)]
    Shared(#[from] SharedError),
}

pub type RelayResult<T> = Result<T, RelayError>;

impl RelayError {
    pub fn invalid_request(details: impl Into<String>) -> Self {
        Self::InvalidRequest {
            details: details.into(),
        }
    }

    /// HTTP status this error is answered with
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidRequest { .. } | Self::Shared(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Registrar(err) => match err {
                RegistrarError::ValidationFailure { .. } => StatusCode::UNPROCESSABLE_ENTITY,
                RegistrarError::UpstreamRejected { .. } => StatusCode::BAD_REQUEST,
                RegistrarError::AuthFailure { .. } | RegistrarError::Transport { .. } => StatusCode::BAD_GATEWAY,
                RegistrarError::HttpClient(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::ServerStartupFailed { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Text placed in the `detail` field of the error body
    pub fn detail(&self) -> String {
        match self {
            Self::Registrar(RegistrarError::UpstreamRejected { detail, .. }) => detail.clone(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            component_error!(Component::Relay, status = status.as_u16(), error = %self, "Request failed");
        } else {
            component_warn!(Component::Relay, status = status.as_u16(), error = %self, "Request rejected");
        }

        (status, Json(json!({ "status": "error", "detail": self.detail() }))).into_response()
    }
}
