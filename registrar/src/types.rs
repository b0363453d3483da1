//! Registrar-specific data types

use std::fmt;

use serde::{Deserialize, Serialize};
use shared::{CreateWebinarRequest, NameParts, THROTTLE_STATUS, TRANSPORT_FAILURE_STATUS};

/// Why a single Zoom API call did not succeed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiFailure {
    /// No response was received (connection error, timeout, unreadable body)
    Transport { message: String },
    /// Zoom answered with an unexpected status
    Status { status: u16, message: String },
}

impl ApiFailure {
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Status to report, with the synthetic marker for transport failures
    pub fn status_code(&self) -> u16 {
        match self {
            ApiFailure::Transport { .. } => TRANSPORT_FAILURE_STATUS,
            ApiFailure::Status { status, .. } => *status,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            ApiFailure::Transport { message } | ApiFailure::Status { message, .. } => message,
        }
    }

    pub fn is_throttled(&self) -> bool {
        matches!(self, ApiFailure::Status { status, .. } if *status == THROTTLE_STATUS)
    }
}

impl fmt::Display for ApiFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiFailure::Transport { message } => write!(f, "transport error: {message}"),
            ApiFailure::Status { status, message } => write!(f, "HTTP {status}: {message}"),
        }
    }
}

/// Body of the registrant-creation call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrantPayload {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

impl RegistrantPayload {
    pub fn new(email: impl Into<String>, name: NameParts) -> Self {
        Self {
            email: email.into(),
            first_name: name.first_name,
            last_name: name.last_name,
        }
    }
}

/// What Zoom returns for a created registrant
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CreatedRegistrant {
    #[serde(default)]
    pub join_url: Option<String>,
    #[serde(default)]
    pub registrant_id: Option<String>,
}

/// What Zoom returns for a created webinar
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedWebinar {
    pub id: String,
}

/// One entry of the account's upcoming-webinar listing
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ScheduledWebinar {
    pub id: String,
    pub topic: Option<String>,
    /// UTC start as Zoom sends it, e.g. `2026-11-05T17:00:00Z`
    pub start_time: Option<String>,
    pub duration: Option<u32>,
    pub auto_recording: Option<String>,
    pub registration_type: Option<u8>,
}

/// One page of upcoming webinars
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WebinarPage {
    pub webinars: Vec<ScheduledWebinar>,
    pub next_page_token: Option<String>,
}

/// Scheduled (non-recurring) webinar
const WEBINAR_TYPE_SCHEDULED: u8 = 5;
const WEBINAR_TIMEZONE: &str = "Europe/Paris";
const EMAIL_LANGUAGE: &str = "fr-FR";

/// Zoom's registration_type: attendees register once for all occurrences
pub const REGISTRATION_REQUIRED: u8 = 1;
/// Zoom's auto_recording value for cloud recording
pub const AUTO_RECORDING_CLOUD: &str = "cloud";
const AUTO_RECORDING_NONE: &str = "none";

/// Zoom's registration_type used for public webinars
const REGISTRATION_OPEN: u8 = 3;

/// Body of the webinar-creation call
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WebinarPayload {
    pub topic: String,
    #[serde(rename = "type")]
    pub webinar_type: u8,
    pub start_time: String,
    pub duration: u32,
    pub timezone: String,
    pub settings: WebinarSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WebinarSettings {
    pub approval_type: u8,
    pub registration_type: u8,
    pub registrants_confirmation_email: bool,
    pub registrants_email_notification: bool,
    pub send_1080p_video_to_attendees: bool,
    pub auto_recording: String,
    pub attendees_and_panelists_reminder_email_notification: ReminderSettings,
    pub request_permission_to_unmute_participants: bool,
    pub allow_host_control_participant_mute_state: bool,
    pub email_in_attendee_report: bool,
    pub add_watermark: bool,
    pub email_language: String,
    pub question_and_answer: QuestionAndAnswerSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReminderSettings {
    pub enable: bool,
    #[serde(rename = "type")]
    pub reminder_type: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuestionAndAnswerSettings {
    pub allow_submit_questions: bool,
    pub allow_anonymous_questions: bool,
    pub answer_questions: String,
    pub attendees_can_comment: bool,
    pub attendees_can_upvote: bool,
    pub allow_auto_reply: bool,
    pub enable: bool,
}

impl WebinarPayload {
    /// Build the Zoom payload for a form submission with an already-parsed duration
    pub fn from_request(request: &CreateWebinarRequest, duration: u32) -> Self {
        Self {
            topic: request.name.clone(),
            webinar_type: WEBINAR_TYPE_SCHEDULED,
            start_time: request.start_time.clone(),
            duration,
            timezone: WEBINAR_TIMEZONE.to_string(),
            settings: WebinarSettings {
                approval_type: 0,
                registration_type: if request.requires_registration() {
                    REGISTRATION_REQUIRED
                } else {
                    REGISTRATION_OPEN
                },
                registrants_confirmation_email: true,
                registrants_email_notification: true,
                send_1080p_video_to_attendees: true,
                auto_recording: if request.records_to_cloud() {
                    AUTO_RECORDING_CLOUD
                } else {
                    AUTO_RECORDING_NONE
                }
                .to_string(),
                attendees_and_panelists_reminder_email_notification: ReminderSettings {
                    enable: true,
                    reminder_type: 0,
                },
                request_permission_to_unmute_participants: true,
                allow_host_control_participant_mute_state: true,
                email_in_attendee_report: true,
                add_watermark: true,
                email_language: EMAIL_LANGUAGE.to_string(),
                question_and_answer: QuestionAndAnswerSettings {
                    allow_submit_questions: true,
                    allow_anonymous_questions: true,
                    answer_questions: "all".to_string(),
                    attendees_can_comment: true,
                    attendees_can_upvote: true,
                    allow_auto_reply: true,
                    enable: true,
                },
            },
        }
    }
}
