//! Core shared types for the registration relay

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Status code Zoom returns when the caller exceeds its request rate
pub const THROTTLE_STATUS: u16 = 429;

/// Synthetic status recorded when the registrant call never got a response
pub const TRANSPORT_FAILURE_STATUS: u16 = 500;

/// Identifier for one bulk registration run, used to correlate log lines
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RunId(Uuid);

impl RunId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RunId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Components that emit log lines, used as the `component` field in traces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Component {
    Relay,
    Registrar,
    ZoomClient,
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Component::Relay => write!(f, "relay"),
            Component::Registrar => write!(f, "registrar"),
            Component::ZoomClient => write!(f, "zoom_client"),
        }
    }
}

/// A person to register, as submitted by the intake form
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Participant {
    pub email: String,
    pub name: String,
}

impl Participant {
    pub fn new(email: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            name: name.into(),
        }
    }

    /// Email in the form used for comparisons (trimmed, lower-cased)
    pub fn normalized_email(&self) -> String {
        normalize_email(&self.email)
    }
}

/// Lower-case and trim an email so lookups ignore casing differences
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// First and last name as sent to Zoom
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameParts {
    pub first_name: String,
    pub last_name: String,
}

impl NameParts {
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
        }
    }
}

/// How names with three or more tokens are split into first/last name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NameSplitMode {
    /// Second and third tokens glued together with no separator; later tokens dropped
    #[default]
    Legacy,
    /// Every token after the first, joined by a single space
    Joined,
}

impl std::str::FromStr for NameSplitMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "legacy" => Ok(NameSplitMode::Legacy),
            "joined" => Ok(NameSplitMode::Joined),
            other => Err(format!("Unknown name split mode '{other}'. Valid options: legacy, joined")),
        }
    }
}

/// Terminal result of registering one participant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RegistrationOutcome {
    Success {
        email: String,
        name: String,
        join_url: Option<String>,
    },
    Failure {
        email: String,
        name: String,
        status_code: u16,
        error: String,
    },
}

impl RegistrationOutcome {
    pub fn email(&self) -> &str {
        match self {
            RegistrationOutcome::Success { email, .. } | RegistrationOutcome::Failure { email, .. } => email,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            RegistrationOutcome::Success { name, .. } | RegistrationOutcome::Failure { name, .. } => name,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, RegistrationOutcome::Success { .. })
    }

    /// Zoom asked us to slow down; the only failure worth retrying
    pub fn is_throttled(&self) -> bool {
        matches!(
            self,
            RegistrationOutcome::Failure {
                status_code: THROTTLE_STATUS,
                ..
            }
        )
    }
}

/// A participant Zoom accepted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisteredParticipant {
    pub email: String,
    pub name: String,
    pub join_url: Option<String>,
}

/// A participant that could not be registered
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailedRegistration {
    pub email: String,
    pub name: String,
    pub status_code: u16,
    pub error: String,
}

/// Aggregated result of one bulk registration run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationReport {
    pub webinar_id: String,
    pub requested: usize,
    /// False when the run was skipped because no webinar id was supplied
    pub webinar_found: bool,
    pub success: Vec<RegisteredParticipant>,
    pub errors: Vec<FailedRegistration>,
}

impl RegistrationReport {
    pub fn new(webinar_id: impl Into<String>, requested: usize) -> Self {
        Self {
            webinar_id: webinar_id.into(),
            requested,
            webinar_found: true,
            success: Vec::with_capacity(requested),
            errors: Vec::new(),
        }
    }

    /// Report for a run that was short-circuited before any registration
    pub fn webinar_not_found(webinar_id: impl Into<String>, requested: usize) -> Self {
        Self {
            webinar_id: webinar_id.into(),
            requested,
            webinar_found: false,
            success: Vec::new(),
            errors: Vec::new(),
        }
    }

    /// Fold one terminal outcome into the report
    pub fn record(&mut self, outcome: RegistrationOutcome) {
        match outcome {
            RegistrationOutcome::Success { email, name, join_url } => {
                self.success.push(RegisteredParticipant { email, name, join_url });
            }
            RegistrationOutcome::Failure { email, name, status_code, error } => {
                self.errors.push(FailedRegistration { email, name, status_code, error });
            }
        }
    }

    pub fn registered(&self) -> usize {
        self.success.len()
    }

    pub fn completed(&self) -> usize {
        self.success.len() + self.errors.len()
    }

    /// Every requested participant has exactly one recorded outcome
    pub fn is_complete(&self) -> bool {
        !self.webinar_found || self.completed() == self.requested
    }
}

/// One registrant as listed by Zoom
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registrant {
    pub id: Option<String>,
    pub email: String,
    pub join_url: Option<String>,
}

/// One page of the registrant listing
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RegistrantPage {
    pub registrants: Vec<Registrant>,
    /// Empty or absent when this is the last page
    pub next_page_token: Option<String>,
}
