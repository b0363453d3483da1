//! Registrar trait definitions for dependency injection

use std::time::Duration;

use async_trait::async_trait;
use shared::{
    BulkRegistrationRequest, BulkRegistrationResponse, CreateWebinarRequest, CreateWebinarResponse, JoinUrlRequest,
    JoinUrlResponse, RegistrantPage, UpcomingWebinarsResponse,
};

use crate::error::RegistrarResult;
use crate::types::{ApiFailure, CreatedRegistrant, CreatedWebinar, RegistrantPayload, WebinarPage, WebinarPayload};

/// Source of short-lived bearer tokens
#[mockall::automock]
#[async_trait]
pub trait TokenProvider: Send + Sync {
    /// Exchange the configured credentials for a bearer token
    ///
    /// Fails with `RegistrarError::AuthFailure`; callers treat that as fatal.
    async fn get_token(&self) -> RegistrarResult<String>;
}

/// Registrant endpoints of a webinar
#[mockall::automock]
#[async_trait]
pub trait RegistrantApi: Send + Sync {
    /// Create one registrant; succeeds only on 201 Created
    async fn create_registrant(
        &self,
        token: &str,
        webinar_id: &str,
        registrant: &RegistrantPayload,
    ) -> Result<CreatedRegistrant, ApiFailure>;

    /// Fetch one page of registrants, starting from `page_token` when given
    async fn list_registrants(
        &self,
        token: &str,
        webinar_id: &str,
        page_token: Option<String>,
    ) -> Result<RegistrantPage, ApiFailure>;
}

/// Webinar management endpoints
#[mockall::automock]
#[async_trait]
pub trait WebinarApi: Send + Sync {
    /// Schedule a webinar on the token owner's account
    async fn create_webinar(&self, token: &str, webinar: &WebinarPayload) -> Result<CreatedWebinar, ApiFailure>;

    /// Fetch one page of the token owner's upcoming webinars
    async fn list_upcoming(&self, token: &str, page_token: Option<String>) -> Result<WebinarPage, ApiFailure>;
}

/// Pause between retries, swappable so tests need not wait
#[mockall::automock]
#[async_trait]
pub trait Sleeper: Send + Sync {
    async fn sleep(&self, duration: Duration);
}

/// Everything the HTTP surface needs from the registrar
#[mockall::automock]
#[async_trait]
pub trait RegistrationService: Send + Sync {
    /// Bulk-register participants against a webinar
    async fn register_participants(&self, request: BulkRegistrationRequest) -> RegistrarResult<BulkRegistrationResponse>;

    /// Look up join links of already-registered participants
    async fn join_urls(&self, request: JoinUrlRequest) -> RegistrarResult<JoinUrlResponse>;

    /// Schedule a new webinar
    async fn create_webinar(&self, request: CreateWebinarRequest) -> RegistrarResult<CreateWebinarResponse>;

    /// List webinars that have not started yet
    async fn upcoming_webinars(&self) -> RegistrarResult<UpcomingWebinarsResponse>;
}
