//! Reqwest-backed client for Zoom's webinar and registrant endpoints

use std::fmt;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use shared::{Component, Registrant, RegistrantPage, component_warn};

use crate::traits::{RegistrantApi, WebinarApi};
use crate::types::{
    ApiFailure, CreatedRegistrant, CreatedWebinar, RegistrantPayload, ScheduledWebinar, WebinarPage, WebinarPayload,
};

/// Largest page Zoom serves for registrant and webinar listings
pub const REGISTRANT_PAGE_SIZE: u32 = 300;

/// Zoom's structured error body
#[derive(Debug, Deserialize)]
struct ZoomErrorBody {
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ZoomRegistrant {
    id: Option<String>,
    email: String,
    join_url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ZoomRegistrantList {
    #[serde(default)]
    registrants: Vec<ZoomRegistrant>,
    next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ZoomWebinar {
    id: serde_json::Value,
}

#[derive(Debug, Default, Deserialize)]
struct ZoomWebinarSettings {
    auto_recording: Option<String>,
    registration_type: Option<u8>,
}

#[derive(Debug, Deserialize)]
struct ZoomWebinarSummary {
    id: serde_json::Value,
    topic: Option<String>,
    start_time: Option<String>,
    duration: Option<u32>,
    #[serde(default)]
    settings: Option<ZoomWebinarSettings>,
}

#[derive(Debug, Deserialize)]
struct ZoomWebinarList {
    #[serde(default)]
    webinars: Vec<ZoomWebinarSummary>,
    next_page_token: Option<String>,
}

/// Zoom sends webinar ids as numbers
fn webinar_id_text(id: serde_json::Value) -> String {
    match id {
        serde_json::Value::String(id) => id,
        other => other.to_string(),
    }
}

/// Extract Zoom's `message` from an error body, falling back to the raw text
pub fn extract_error_message(body: &str) -> String {
    serde_json::from_str::<ZoomErrorBody>(body)
        .ok()
        .and_then(|parsed| parsed.message)
        .unwrap_or_else(|| body.to_string())
}

/// Read a 201 body into the created registrant
///
/// Zoom has already registered the participant at this point, so an unreadable
/// or unparseable body only loses the join link.
pub fn created_registrant<E: fmt::Display>(email: &str, body: Result<String, E>) -> CreatedRegistrant {
    let parsed = body
        .map_err(|e| e.to_string())
        .and_then(|body| serde_json::from_str(&body).map_err(|e| e.to_string()));

    parsed.unwrap_or_else(|error| {
        component_warn!(
            Component::ZoomClient,
            email,
            error = %error,
            "Registrant created but response body was not understood"
        );
        CreatedRegistrant::default()
    })
}

/// Zoom REST client sharing one connection pool
#[derive(Clone)]
pub struct RealZoomClient {
    client: reqwest::Client,
    api_base: String,
}

impl RealZoomClient {
    pub fn new(client: reqwest::Client, api_base: impl Into<String>) -> Self {
        Self {
            client,
            api_base: api_base.into().trim_end_matches('/').to_string(),
        }
    }

    fn registrants_url(&self, webinar_id: &str) -> String {
        format!("{}/webinars/{}/registrants", self.api_base, webinar_id)
    }

    /// Read the body of an unexpected response into a failure
    async fn status_failure(response: reqwest::Response) -> ApiFailure {
        let status = response.status().as_u16();
        match response.text().await {
            Ok(body) => ApiFailure::Status { status, message: body },
            Err(e) => ApiFailure::Status {
                status,
                message: e.to_string(),
            },
        }
    }
}

#[async_trait]
impl RegistrantApi for RealZoomClient {
    async fn create_registrant(
        &self,
        token: &str,
        webinar_id: &str,
        registrant: &RegistrantPayload,
    ) -> Result<CreatedRegistrant, ApiFailure> {
        let response = self
            .client
            .post(self.registrants_url(webinar_id))
            .bearer_auth(token)
            .json(registrant)
            .send()
            .await
            .map_err(|e| ApiFailure::transport(e.to_string()))?;

        if response.status() != StatusCode::CREATED {
            let failure = Self::status_failure(response).await;
            return Err(match failure {
                ApiFailure::Status { status, message } => ApiFailure::Status {
                    status,
                    message: extract_error_message(&message),
                },
                other => other,
            });
        }

        Ok(created_registrant(&registrant.email, response.text().await))
    }

    async fn list_registrants(
        &self,
        token: &str,
        webinar_id: &str,
        page_token: Option<String>,
    ) -> Result<RegistrantPage, ApiFailure> {
        let response = self
            .client
            .get(self.registrants_url(webinar_id))
            .bearer_auth(token)
            .query(&[
                ("page_size", REGISTRANT_PAGE_SIZE.to_string()),
                ("next_page_token", page_token.unwrap_or_default()),
            ])
            .send()
            .await
            .map_err(|e| ApiFailure::transport(e.to_string()))?;

        if response.status() != StatusCode::OK {
            return Err(Self::status_failure(response).await);
        }

        let list: ZoomRegistrantList = response
            .json()
            .await
            .map_err(|e| ApiFailure::transport(e.to_string()))?;

        Ok(RegistrantPage {
            registrants: list
                .registrants
                .into_iter()
                .map(|r| Registrant {
                    id: r.id,
                    email: r.email,
                    join_url: r.join_url,
                })
                .collect(),
            next_page_token: list.next_page_token.filter(|t| !t.is_empty()),
        })
    }
}

#[async_trait]
impl WebinarApi for RealZoomClient {
    async fn create_webinar(&self, token: &str, webinar: &WebinarPayload) -> Result<CreatedWebinar, ApiFailure> {
        let response = self
            .client
            .post(format!("{}/users/me/webinars", self.api_base))
            .bearer_auth(token)
            .json(webinar)
            .send()
            .await
            .map_err(|e| ApiFailure::transport(e.to_string()))?;

        if response.status() != StatusCode::CREATED {
            return Err(Self::status_failure(response).await);
        }

        let created: ZoomWebinar = response
            .json()
            .await
            .map_err(|e| ApiFailure::transport(e.to_string()))?;

        Ok(CreatedWebinar {
            id: webinar_id_text(created.id),
        })
    }

    async fn list_upcoming(&self, token: &str, page_token: Option<String>) -> Result<WebinarPage, ApiFailure> {
        let response = self
            .client
            .get(format!("{}/users/me/webinars", self.api_base))
            .bearer_auth(token)
            .query(&[
                ("type", "upcoming".to_string()),
                ("page_size", REGISTRANT_PAGE_SIZE.to_string()),
                ("next_page_token", page_token.unwrap_or_default()),
            ])
            .send()
            .await
            .map_err(|e| ApiFailure::transport(e.to_string()))?;

        if response.status() != StatusCode::OK {
            return Err(Self::status_failure(response).await);
        }

        let list: ZoomWebinarList = response
            .json()
            .await
            .map_err(|e| ApiFailure::transport(e.to_string()))?;

        Ok(WebinarPage {
            webinars: list
                .webinars
                .into_iter()
                .map(|w| {
                    let settings = w.settings.unwrap_or_default();
                    ScheduledWebinar {
                        id: webinar_id_text(w.id),
                        topic: w.topic,
                        start_time: w.start_time,
                        duration: w.duration,
                        auto_recording: settings.auto_recording,
                        registration_type: settings.registration_type,
                    }
                })
                .collect(),
            next_page_token: list.next_page_token.filter(|t| !t.is_empty()),
        })
    }
}
