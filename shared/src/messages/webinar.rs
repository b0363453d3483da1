//! Webinar creation and listing for the intake form

use serde::{Deserialize, Serialize};

use crate::errors::{SharedError, SharedResult};

/// Diffusion value meaning attendees must register
pub const DIFFUSION_REGISTRATION: &str = "Sur inscription";

/// Diffusion value for webinars anyone can join
pub const DIFFUSION_PUBLIC: &str = "Public";

/// Recording value meaning the webinar is recorded to the cloud
pub const RECORDING_ENABLED: &str = "Oui";
pub const RECORDING_DISABLED: &str = "Non";

/// Webinar length, sent by the form as either a number or a numeric string
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WebinarDuration {
    Minutes(u32),
    Text(String),
}

impl WebinarDuration {
    pub fn minutes(&self) -> SharedResult<u32> {
        match self {
            WebinarDuration::Minutes(minutes) => Ok(*minutes),
            WebinarDuration::Text(text) => text
                .trim()
                .parse()
                .map_err(|_| SharedError::invalid_request(format!("duration '{text}' is not a number of minutes"))),
        }
    }
}

/// Body of `POST /create-webinar`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateWebinarRequest {
    /// Webinar topic
    pub name: String,
    /// Start time as understood by Zoom, e.g. `2026-11-05T18:00:00`
    pub start_time: String,
    pub duration: WebinarDuration,
    /// "Sur inscription" or anything else for a public webinar
    pub diffusion: String,
    /// "Oui" to record to the cloud
    pub recording: String,
}

impl CreateWebinarRequest {
    pub fn requires_registration(&self) -> bool {
        self.diffusion == DIFFUSION_REGISTRATION
    }

    pub fn records_to_cloud(&self) -> bool {
        self.recording == RECORDING_ENABLED
    }
}

/// Response of `POST /create-webinar`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateWebinarResponse {
    pub status: String,
    pub webinar_id: String,
}

impl CreateWebinarResponse {
    pub fn ok(webinar_id: impl Into<String>) -> Self {
        Self {
            status: "ok".to_string(),
            webinar_id: webinar_id.into(),
        }
    }
}

/// An upcoming webinar as the intake sheet lists it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpcomingWebinar {
    #[serde(rename = "Name")]
    pub name: Option<String>,
    #[serde(rename = "Webinar ID")]
    pub webinar_id: String,
    /// Paris local start, `dd/mm/yyyy HH:MM`
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "Duration")]
    pub duration: Option<u32>,
    #[serde(rename = "Recording")]
    pub recording: String,
    #[serde(rename = "Diffusion")]
    pub diffusion: String,
}

/// Response of `POST /fetch-upcoming-webinars`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum UpcomingWebinarsResponse {
    Ok {
        count: usize,
        webinars: Vec<UpcomingWebinar>,
    },
    /// Zoom refused a listing page; its status and raw body are passed through
    Error { zoom_status: u16, zoom_response: String },
}

impl UpcomingWebinarsResponse {
    pub fn ok(webinars: Vec<UpcomingWebinar>) -> Self {
        Self::Ok {
            count: webinars.len(),
            webinars,
        }
    }
}
