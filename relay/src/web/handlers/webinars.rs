//! Webinar creation and upcoming listing endpoints

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use shared::{Component, CreateWebinarRequest, CreateWebinarResponse, UpcomingWebinarsResponse, component_info};

use super::json_body;
use crate::error::RelayResult;
use crate::state::AppState;

/// `POST /create-webinar`
pub async fn create_webinar(
    State(state): State<AppState>,
    body: Result<Json<CreateWebinarRequest>, JsonRejection>,
) -> RelayResult<Json<CreateWebinarResponse>> {
    let request = json_body(body)?;
    component_info!(Component::Relay, name = %request.name, start_time = %request.start_time, "Webinar creation requested");

    let response = state.registrar.create_webinar(request).await?;
    Ok(Json(response))
}

/// `POST /fetch-upcoming-webinars`
///
/// Zoom refusing the listing is still answered with 200 and an error body.
pub async fn fetch_upcoming_webinars(State(state): State<AppState>) -> RelayResult<Json<UpcomingWebinarsResponse>> {
    let response = state.registrar.upcoming_webinars().await?;
    Ok(Json(response))
}
