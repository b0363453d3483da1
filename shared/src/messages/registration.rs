//! Bulk registration request and report

use serde::{Deserialize, Serialize};

use crate::errors::{SharedError, SharedResult};
use crate::types::{FailedRegistration, Participant, RegisteredParticipant, RegistrationReport};

/// Body of `POST /update-webinar`
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BulkRegistrationRequest {
    #[serde(default, alias = "resource_id", deserialize_with = "super::deserialize_webinar_id")]
    pub webinar_id: Option<String>,
    #[serde(default)]
    pub emails: Vec<String>,
    #[serde(default)]
    pub names: Vec<String>,
}

impl BulkRegistrationRequest {
    /// Webinar id, empty when absent
    pub fn webinar_id(&self) -> &str {
        self.webinar_id.as_deref().unwrap_or_default()
    }

    /// Pair emails with names positionally
    ///
    /// Fails when the two lists differ in length, before any work is done.
    pub fn participants(&self) -> SharedResult<Vec<Participant>> {
        if self.emails.len() != self.names.len() {
            return Err(SharedError::invalid_request(format!(
                "emails and names must have the same length (got {} emails, {} names)",
                self.emails.len(),
                self.names.len()
            )));
        }

        Ok(self
            .emails
            .iter()
            .zip(&self.names)
            .map(|(email, name)| Participant::new(email.clone(), name.clone()))
            .collect())
    }
}

/// Response of `POST /update-webinar`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum BulkRegistrationResponse {
    Ok {
        webinar_id: String,
        success: Vec<RegisteredParticipant>,
        errors: Vec<FailedRegistration>,
    },
    WebinarNotFound {
        webinar_id: String,
        registered: usize,
        requested: usize,
    },
}

impl From<RegistrationReport> for BulkRegistrationResponse {
    fn from(report: RegistrationReport) -> Self {
        if report.webinar_found {
            BulkRegistrationResponse::Ok {
                webinar_id: report.webinar_id,
                success: report.success,
                errors: report.errors,
            }
        } else {
            BulkRegistrationResponse::WebinarNotFound {
                registered: report.registered(),
                webinar_id: report.webinar_id,
                requested: report.requested,
            }
        }
    }
}
