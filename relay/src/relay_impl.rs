//! Main relay implementation
//!
//! Wires the registration service into an axum router and serves it until
//! the shutdown future resolves.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use registrar::RegistrationService;
use shared::logging::log_startup;
use shared::{Component, component_info};
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::error::{RelayError, RelayResult};
use crate::state::AppState;
use crate::web::handlers::{health, join_links, registrations, webinars};

/// HTTP relay between the intake forms and Zoom
#[derive(Clone)]
pub struct Relay {
    state: AppState,
}

impl Relay {
    /// Create a relay backed by any registration service
    pub fn new(registrar: Arc<dyn RegistrationService>) -> Self {
        Self {
            state: AppState::new(registrar),
        }
    }

    /// Build the Axum router with all routes
    pub fn build_router(&self) -> Router {
        Router::new()
            .route("/", get(health::health_check).post(health::health_check))
            .route("/update-webinar", post(registrations::update_webinar))
            .route("/get-join-urls", post(join_links::get_join_urls))
            .route("/create-webinar", post(webinars::create_webinar))
            .route("/fetch-upcoming-webinars", post(webinars::fetch_upcoming_webinars))
            .layer(
                ServiceBuilder::new()
                    .layer(TraceLayer::new_for_http())
                    // Forms post from another origin
                    .layer(CorsLayer::permissive())
                    .into_inner(),
            )
            .with_state(self.state.clone())
    }

    /// Serve on `addr` until `shutdown` resolves
    pub async fn run<F>(&self, addr: SocketAddr, shutdown: F) -> RelayResult<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| RelayError::ServerStartupFailed {
                addr: addr.to_string(),
                message: e.to_string(),
            })?;

        log_startup(Component::Relay, &format!("HTTP relay on http://{}", addr));

        axum::serve(listener, self.build_router())
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(|e| RelayError::ServerStartupFailed {
                addr: addr.to_string(),
                message: e.to_string(),
            })?;

        component_info!(Component::Relay, uptime_seconds = self.state.uptime_seconds(), "HTTP server stopped");
        Ok(())
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }
}
