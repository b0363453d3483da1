//! Wire types for the relay's HTTP surface
//!
//! - `registration`: bulk registration requests and reports
//! - `join_links`: join-link lookup for existing registrants
//! - `webinar`: webinar creation and the upcoming-webinar listing

pub mod join_links;
pub mod registration;
pub mod webinar;

pub use join_links::{JoinUrlEntry, JoinUrlError, JoinUrlRequest, JoinUrlResponse};
pub use registration::{BulkRegistrationRequest, BulkRegistrationResponse};
pub use webinar::{
    CreateWebinarRequest, CreateWebinarResponse, UpcomingWebinar, UpcomingWebinarsResponse, WebinarDuration,
};

use serde::{Deserialize, Deserializer, Serialize};

/// Body returned by the health check
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: String,
}

impl StatusResponse {
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
        }
    }
}

/// Accept a webinar id sent either as a JSON string or a JSON number
pub(crate) fn deserialize_webinar_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(u64),
    }

    Ok(Option::<RawId>::deserialize(deserializer)?.map(|raw| match raw {
        RawId::Text(text) => text.trim().to_string(),
        RawId::Number(number) => number.to_string(),
    }))
}
