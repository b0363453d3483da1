//! Registrar with dependency injection
//!
//! Glues the token provider, the Zoom services and the orchestrator together
//! behind `RegistrationService`. A token is fetched once per call and shared
//! read-only by everything that call does.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use shared::logging::log_success;
use shared::{
    BulkRegistrationRequest, BulkRegistrationResponse, Component, CreateWebinarRequest, CreateWebinarResponse,
    JoinUrlRequest, JoinUrlResponse, RegistrationReport, RelayConfig, UpcomingWebinarsResponse, component_info,
    component_warn,
};

use crate::core::{RegistrationOrchestrator, lookup_join_urls, schedule_webinar, upcoming_webinars};
use crate::error::{RegistrarError, RegistrarResult};
use crate::services::{RealTokenProvider, RealZoomClient, TokioSleeper, build_http_client};
use crate::traits::{RegistrantApi, RegistrationService, Sleeper, TokenProvider, WebinarApi};

/// Registrar wired to the live Zoom services
pub type LiveRegistrar = Registrar<RealTokenProvider, RealZoomClient, RealZoomClient, TokioSleeper>;

pub struct Registrar<T: ?Sized, A: ?Sized, W: ?Sized, S: ?Sized> {
    token_provider: Arc<T>,
    registrants: Arc<A>,
    webinars: Arc<W>,
    orchestrator: RegistrationOrchestrator<A, S>,
}

impl<T, A, W, S> Registrar<T, A, W, S>
where
    T: TokenProvider + ?Sized + 'static,
    A: RegistrantApi + ?Sized + 'static,
    W: WebinarApi + ?Sized + 'static,
    S: Sleeper + ?Sized + 'static,
{
    pub fn new(
        token_provider: Arc<T>,
        registrants: Arc<A>,
        webinars: Arc<W>,
        orchestrator: RegistrationOrchestrator<A, S>,
    ) -> Self {
        Self {
            token_provider,
            registrants,
            webinars,
            orchestrator,
        }
    }

    pub fn orchestrator(&self) -> &RegistrationOrchestrator<A, S> {
        &self.orchestrator
    }

    /// Validate, fetch a token and run the bulk registration
    ///
    /// Mismatched lists are rejected and a missing webinar id short-circuits,
    /// both before any network call.
    pub async fn update_webinar(&self, request: &BulkRegistrationRequest) -> RegistrarResult<RegistrationReport> {
        let participants = request.participants()?;
        let webinar_id = request.webinar_id().trim();

        if webinar_id.is_empty() {
            return Ok(RegistrationReport::webinar_not_found(webinar_id, participants.len()));
        }

        let token = self.token_provider.get_token().await?;
        let report = self.orchestrator.register_all(&token, webinar_id, participants).await;

        component_info!(
            Component::Registrar,
            webinar_id,
            registered = report.registered(),
            failed = report.errors.len(),
            "Bulk registration complete"
        );
        Ok(report)
    }
}

impl LiveRegistrar {
    /// Build the registrar and its Zoom services from configuration
    pub fn from_config(config: &RelayConfig) -> RegistrarResult<Self> {
        let client = build_http_client(config.http_timeout)?;
        let token_provider = Arc::new(RealTokenProvider::new(
            client.clone(),
            config.oauth_url.clone(),
            config.credentials.clone(),
        ));
        let zoom = Arc::new(RealZoomClient::new(client, config.api_base.clone()));
        let orchestrator = RegistrationOrchestrator::new(Arc::clone(&zoom), Arc::new(TokioSleeper), &config.registration);

        Ok(Self::new(token_provider, Arc::clone(&zoom), zoom, orchestrator))
    }
}

#[async_trait]
impl<T, A, W, S> RegistrationService for Registrar<T, A, W, S>
where
    T: TokenProvider + ?Sized + 'static,
    A: RegistrantApi + ?Sized + 'static,
    W: WebinarApi + ?Sized + 'static,
    S: Sleeper + ?Sized + 'static,
{
    async fn register_participants(&self, request: BulkRegistrationRequest) -> RegistrarResult<BulkRegistrationResponse> {
        Ok(self.update_webinar(&request).await?.into())
    }

    async fn join_urls(&self, request: JoinUrlRequest) -> RegistrarResult<JoinUrlResponse> {
        let webinar_id = request.webinar_id.as_deref().map(str::trim).unwrap_or_default();
        if webinar_id.is_empty() {
            return Err(RegistrarError::validation("webinar_id is required"));
        }

        let token = self.token_provider.get_token().await?;
        let response = lookup_join_urls(self.registrants.as_ref(), &token, webinar_id, &request.emails).await;

        component_info!(
            Component::Registrar,
            webinar_id,
            found = response.success.len(),
            missing = response.errors.len(),
            "Join-link lookup complete"
        );
        Ok(response)
    }

    async fn create_webinar(&self, request: CreateWebinarRequest) -> RegistrarResult<CreateWebinarResponse> {
        let token = self.token_provider.get_token().await?;
        let created = schedule_webinar(self.webinars.as_ref(), &token, &request).await?;

        log_success(Component::Registrar, &format!("Webinar '{}' created with id {}", request.name, created.id));
        Ok(CreateWebinarResponse::ok(created.id))
    }

    async fn upcoming_webinars(&self) -> RegistrarResult<UpcomingWebinarsResponse> {
        let token = self.token_provider.get_token().await?;
        let response = upcoming_webinars(self.webinars.as_ref(), &token, Utc::now()).await;

        match &response {
            UpcomingWebinarsResponse::Ok { count, .. } => {
                component_info!(Component::Registrar, count = *count, "Upcoming webinars listed");
            }
            UpcomingWebinarsResponse::Error { zoom_status, .. } => {
                component_warn!(Component::Registrar, zoom_status = *zoom_status, "Zoom refused the webinar listing");
            }
        }
        Ok(response)
    }
}
