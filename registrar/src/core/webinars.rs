//! Scheduling webinars from intake form submissions and listing upcoming ones

use chrono::{DateTime, Utc};
use chrono_tz::Europe::Paris;
use shared::messages::webinar::{DIFFUSION_PUBLIC, DIFFUSION_REGISTRATION, RECORDING_DISABLED, RECORDING_ENABLED};
use shared::{Component, CreateWebinarRequest, UpcomingWebinar, UpcomingWebinarsResponse, component_warn};
use tracing::debug;

use crate::error::{RegistrarError, RegistrarResult};
use crate::traits::WebinarApi;
use crate::types::{
    AUTO_RECORDING_CLOUD, ApiFailure, CreatedWebinar, REGISTRATION_REQUIRED, ScheduledWebinar, WebinarPayload,
};

/// Display format of the listing's `Date` column
pub const UPCOMING_DATE_FORMAT: &str = "%d/%m/%Y %H:%M";

/// Validate the submission, build Zoom's payload and create the webinar
pub async fn schedule_webinar<W>(api: &W, token: &str, request: &CreateWebinarRequest) -> RegistrarResult<CreatedWebinar>
where
    W: WebinarApi + ?Sized,
{
    if request.name.trim().is_empty() {
        return Err(RegistrarError::validation("webinar name must not be empty"));
    }
    let duration = request.duration.minutes()?;
    let payload = WebinarPayload::from_request(request, duration);

    api.create_webinar(token, &payload).await.map_err(|failure| match failure {
        ApiFailure::Status { status, message } => RegistrarError::UpstreamRejected { status, detail: message },
        ApiFailure::Transport { message } => RegistrarError::Transport { message },
    })
}

/// List every upcoming webinar that starts at or after `now`
///
/// A refused page ends the listing with Zoom's status and body.
pub async fn upcoming_webinars<W>(api: &W, token: &str, now: DateTime<Utc>) -> UpcomingWebinarsResponse
where
    W: WebinarApi + ?Sized,
{
    let mut upcoming = Vec::new();
    let mut page_token: Option<String> = None;

    loop {
        let page = match api.list_upcoming(token, page_token.take()).await {
            Ok(page) => page,
            Err(failure) => {
                return UpcomingWebinarsResponse::Error {
                    zoom_status: failure.status_code(),
                    zoom_response: failure.message().to_string(),
                };
            }
        };
        debug!(count = page.webinars.len(), "Fetched upcoming webinar page");
        upcoming.extend(page.webinars.iter().filter_map(|webinar| upcoming_entry(webinar, now)));

        match page.next_page_token.filter(|t| !t.is_empty()) {
            Some(next) => page_token = Some(next),
            None => break,
        }
    }

    UpcomingWebinarsResponse::ok(upcoming)
}

/// Convert one listed webinar, dropping it when it already started
///
/// Webinars without a readable start time are skipped.
pub fn upcoming_entry(webinar: &ScheduledWebinar, now: DateTime<Utc>) -> Option<UpcomingWebinar> {
    let raw_start = webinar.start_time.as_deref()?;
    let start = match DateTime::parse_from_rfc3339(raw_start) {
        Ok(start) => start.with_timezone(&Utc),
        Err(e) => {
            component_warn!(
                Component::ZoomClient,
                webinar_id = %webinar.id,
                start_time = raw_start,
                error = %e,
                "Skipping webinar with unreadable start time"
            );
            return None;
        }
    };
    if start < now {
        return None;
    }

    let recording = if webinar.auto_recording.as_deref() == Some(AUTO_RECORDING_CLOUD) {
        RECORDING_ENABLED
    } else {
        RECORDING_DISABLED
    };
    let diffusion = if webinar.registration_type == Some(REGISTRATION_REQUIRED) {
        DIFFUSION_REGISTRATION
    } else {
        DIFFUSION_PUBLIC
    };

    Some(UpcomingWebinar {
        name: webinar.topic.clone(),
        webinar_id: webinar.id.clone(),
        date: start.with_timezone(&Paris).format(UPCOMING_DATE_FORMAT).to_string(),
        duration: webinar.duration,
        recording: recording.to_string(),
        diffusion: diffusion.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::MockWebinarApi;
    use crate::types::WebinarPage;
    use shared::WebinarDuration;

    fn request(duration: WebinarDuration) -> CreateWebinarRequest {
        CreateWebinarRequest {
            name: "Atelier budget".to_string(),
            start_time: "2026-11-05T18:00:00".to_string(),
            duration,
            diffusion: "Sur inscription".to_string(),
            recording: "Non".to_string(),
        }
    }

    #[tokio::test]
    async fn test_creates_webinar_with_parsed_duration() {
        let mut api = MockWebinarApi::new();
        api.expect_create_webinar()
            .withf(|token, payload| token == "tok" && payload.duration == 90 && payload.topic == "Atelier budget")
            .times(1)
            .returning(|_, _| Ok(CreatedWebinar { id: "81234567890".to_string() }));

        let created = schedule_webinar(&api, "tok", &request(WebinarDuration::Text("90".to_string())))
            .await
            .unwrap();
        assert_eq!(created.id, "81234567890");
    }

    #[tokio::test]
    async fn test_bad_duration_is_rejected_before_calling_zoom() {
        let mut api = MockWebinarApi::new();
        api.expect_create_webinar().times(0);

        let err = schedule_webinar(&api, "tok", &request(WebinarDuration::Text("soon".to_string())))
            .await
            .unwrap_err();
        assert!(matches!(err, RegistrarError::ValidationFailure { .. }));
    }

    #[tokio::test]
    async fn test_zoom_rejection_keeps_status_and_body() {
        let mut api = MockWebinarApi::new();
        api.expect_create_webinar().returning(|_, _| {
            Err(ApiFailure::Status {
                status: 300,
                message: "{\"code\":300,\"message\":\"Invalid start_time\"}".to_string(),
            })
        });

        let err = schedule_webinar(&api, "tok", &request(WebinarDuration::Minutes(60)))
            .await
            .unwrap_err();
        match err {
            RegistrarError::UpstreamRejected { status, detail } => {
                assert_eq!(status, 300);
                assert!(detail.contains("Invalid start_time"));
            }
            other => panic!("expected upstream rejection, got {:?}", other),
        }
    }

    fn listed(id: &str, start_time: &str) -> ScheduledWebinar {
        ScheduledWebinar {
            id: id.to_string(),
            topic: Some(format!("Atelier {id}")),
            start_time: Some(start_time.to_string()),
            duration: Some(60),
            auto_recording: Some("cloud".to_string()),
            registration_type: Some(1),
        }
    }

    fn now() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2026-10-18T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    #[test]
    fn test_entry_converts_to_paris_time_and_sheet_values() {
        // 17:00 UTC is 18:00 in Paris once winter time applies
        let entry = upcoming_entry(&listed("1", "2026-11-05T17:00:00Z"), now()).unwrap();
        assert_eq!(entry.date, "05/11/2026 18:00");
        assert_eq!(entry.webinar_id, "1");
        assert_eq!(entry.name.as_deref(), Some("Atelier 1"));
        assert_eq!(entry.recording, "Oui");
        assert_eq!(entry.diffusion, "Sur inscription");

        // Summer time: UTC+2
        let summer = upcoming_entry(&listed("2", "2026-10-20T08:30:00Z"), now()).unwrap();
        assert_eq!(summer.date, "20/10/2026 10:30");

        let public = ScheduledWebinar {
            auto_recording: Some("none".to_string()),
            registration_type: Some(3),
            ..listed("3", "2026-11-05T17:00:00Z")
        };
        let entry = upcoming_entry(&public, now()).unwrap();
        assert_eq!(entry.recording, "Non");
        assert_eq!(entry.diffusion, "Public");
    }

    #[test]
    fn test_entry_drops_past_and_unreadable_starts() {
        assert!(upcoming_entry(&listed("1", "2026-10-18T11:59:00Z"), now()).is_none());
        assert!(upcoming_entry(&listed("2", "2026-10-18T12:00:00Z"), now()).is_some());
        assert!(upcoming_entry(&listed("3", "next tuesday"), now()).is_none());

        let undated = ScheduledWebinar {
            start_time: None,
            ..listed("4", "")
        };
        assert!(upcoming_entry(&undated, now()).is_none());
    }

    #[tokio::test]
    async fn test_upcoming_follows_pages() {
        let mut api = MockWebinarApi::new();
        api.expect_list_upcoming()
            .withf(|token, page| token == "tok" && page.is_none())
            .times(1)
            .returning(|_, _| {
                Ok(WebinarPage {
                    webinars: vec![listed("1", "2026-11-05T17:00:00Z"), listed("2", "2026-01-01T09:00:00Z")],
                    next_page_token: Some("page-2".to_string()),
                })
            });
        api.expect_list_upcoming()
            .withf(|_, page| page.as_deref() == Some("page-2"))
            .times(1)
            .returning(|_, _| {
                Ok(WebinarPage {
                    webinars: vec![listed("3", "2026-12-01T09:00:00Z")],
                    next_page_token: Some(String::new()),
                })
            });

        match upcoming_webinars(&api, "tok", now()).await {
            UpcomingWebinarsResponse::Ok { count, webinars } => {
                assert_eq!(count, 2);
                let ids: Vec<&str> = webinars.iter().map(|w| w.webinar_id.as_str()).collect();
                assert_eq!(ids, vec!["1", "3"]);
            }
            other => panic!("expected ok listing, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_refused_page_passes_zoom_status_through() {
        let mut api = MockWebinarApi::new();
        api.expect_list_upcoming().times(1).returning(|_, _| {
            Err(ApiFailure::Status {
                status: 401,
                message: "{\"code\":124,\"message\":\"Invalid access token.\"}".to_string(),
            })
        });

        assert_eq!(
            upcoming_webinars(&api, "tok", now()).await,
            UpcomingWebinarsResponse::Error {
                zoom_status: 401,
                zoom_response: "{\"code\":124,\"message\":\"Invalid access token.\"}".to_string(),
            }
        );
    }
}
