//! Liveness endpoint

use axum::Json;
use shared::StatusResponse;

/// `GET /` and `POST /`
pub async fn health_check() -> Json<StatusResponse> {
    Json(StatusResponse::ok())
}
