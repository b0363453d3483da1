//! Join-link lookup endpoint

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use shared::{JoinUrlRequest, JoinUrlResponse};

use super::json_body;
use crate::error::RelayResult;
use crate::state::AppState;

/// `POST /get-join-urls`
pub async fn get_join_urls(
    State(state): State<AppState>,
    body: Result<Json<JoinUrlRequest>, JsonRejection>,
) -> RelayResult<Json<JoinUrlResponse>> {
    let request = json_body(body)?;
    let response = state.registrar.join_urls(request).await?;
    Ok(Json(response))
}
