//! Join-link lookup for participants that are already registered

use serde::{Deserialize, Serialize};

/// Body of `POST /get-join-urls`
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct JoinUrlRequest {
    #[serde(default, alias = "resource_id", deserialize_with = "super::deserialize_webinar_id")]
    pub webinar_id: Option<String>,
    #[serde(default)]
    pub emails: Vec<String>,
}

/// A requested email that matched a registrant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JoinUrlEntry {
    pub email: String,
    pub join_url: Option<String>,
    pub registrant_id: Option<String>,
}

/// A lookup failure, either for one email or for the listing as a whole
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JoinUrlError {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub status_code: u16,
    pub error: String,
}

/// Response of `POST /get-join-urls`
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct JoinUrlResponse {
    pub success: Vec<JoinUrlEntry>,
    pub errors: Vec<JoinUrlError>,
}

impl JoinUrlResponse {
    /// Response for a listing that failed before any email could be matched
    pub fn listing_failed(status_code: u16, error: impl Into<String>) -> Self {
        Self {
            success: Vec::new(),
            errors: vec![JoinUrlError {
                email: None,
                status_code,
                error: error.into(),
            }],
        }
    }
}
