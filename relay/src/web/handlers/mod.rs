//! Request handlers, one module per caller-facing endpoint

pub mod health;
pub mod join_links;
pub mod registrations;
pub mod webinars;

use axum::Json;
use axum::extract::rejection::JsonRejection;

use crate::error::RelayError;

/// Unwrap a JSON body, answering malformed input with the relay's error body
pub(crate) fn json_body<T>(body: Result<Json<T>, JsonRejection>) -> Result<T, RelayError> {
    body.map(|Json(value)| value)
        .map_err(|rejection| RelayError::invalid_request(rejection.body_text()))
}
