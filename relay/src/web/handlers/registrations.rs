//! Bulk registration endpoint

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use shared::{BulkRegistrationRequest, BulkRegistrationResponse, Component, component_info};

use super::json_body;
use crate::error::RelayResult;
use crate::state::AppState;

/// `POST /update-webinar`
///
/// Per-participant failures are part of a 200 response; only a rejected
/// request or a failed token exchange produce an error status.
pub async fn update_webinar(
    State(state): State<AppState>,
    body: Result<Json<BulkRegistrationRequest>, JsonRejection>,
) -> RelayResult<Json<BulkRegistrationResponse>> {
    let request = json_body(body)?;
    component_info!(
        Component::Relay,
        webinar_id = request.webinar_id(),
        emails = request.emails.len(),
        "Bulk registration requested"
    );

    let response = state.registrar.register_participants(request).await?;
    Ok(Json(response))
}
