//! Router tests driving the relay through `tower::ServiceExt::oneshot`

use std::sync::Arc;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Method, Request, StatusCode, header};
use registrar::{MockRegistrationService, RegistrarError};
use relay::Relay;
use serde_json::{Value, json};
use shared::{
    BulkRegistrationResponse, CreateWebinarResponse, FailedRegistration, JoinUrlEntry, JoinUrlResponse,
    RegisteredParticipant, UpcomingWebinar, UpcomingWebinarsResponse,
};
use tokio_test::assert_ok;
use tower::ServiceExt;

fn router(service: MockRegistrationService) -> Router {
    Relay::new(Arc::new(service)).build_router()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn send(router: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = assert_ok!(router.oneshot(request).await);
    let status = response.status();
    let bytes = assert_ok!(to_bytes(response.into_body(), usize::MAX).await);
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_health_check_get_and_post() {
    for method in [Method::GET, Method::POST] {
        let request = Request::builder().method(method).uri("/").body(Body::empty()).unwrap();
        let (status, body) = send(router(MockRegistrationService::new()), request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"status": "ok"}));
    }
}

#[tokio::test]
async fn test_update_webinar_returns_report() {
    let mut service = MockRegistrationService::new();
    service
        .expect_register_participants()
        .withf(|request| {
            request.webinar_id() == "123"
                && request.emails == vec!["a@example.com", "b@example.com"]
                && request.names == vec!["Alice Martin", "Bob"]
        })
        .times(1)
        .returning(|_| {
            Ok(BulkRegistrationResponse::Ok {
                webinar_id: "123".to_string(),
                success: vec![RegisteredParticipant {
                    email: "a@example.com".to_string(),
                    name: "Alice Martin".to_string(),
                    join_url: Some("https://zoom.us/w/123?tk=a".to_string()),
                }],
                errors: vec![FailedRegistration {
                    email: "b@example.com".to_string(),
                    name: "Bob".to_string(),
                    status_code: 429,
                    error: "Too many requests.".to_string(),
                }],
            })
        });

    let (status, body) = send(
        router(service),
        post_json(
            "/update-webinar",
            json!({
                "webinar_id": 123,
                "emails": ["a@example.com", "b@example.com"],
                "names": ["Alice Martin", "Bob"]
            }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["webinar_id"], "123");
    assert_eq!(body["success"][0]["join_url"], "https://zoom.us/w/123?tk=a");
    assert_eq!(body["errors"][0]["status_code"], 429);
    assert_eq!(body["errors"][0]["name"], "Bob");
}

#[tokio::test]
async fn test_update_webinar_accepts_resource_id_alias() {
    let mut service = MockRegistrationService::new();
    service
        .expect_register_participants()
        .withf(|request| request.webinar_id() == "987")
        .times(1)
        .returning(|_| {
            Ok(BulkRegistrationResponse::Ok {
                webinar_id: "987".to_string(),
                success: Vec::new(),
                errors: Vec::new(),
            })
        });

    let (status, _) = send(
        router(service),
        post_json("/update-webinar", json!({"resource_id": "987", "emails": [], "names": []})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_update_webinar_not_found_shape() {
    let mut service = MockRegistrationService::new();
    service.expect_register_participants().returning(|_| {
        Ok(BulkRegistrationResponse::WebinarNotFound {
            webinar_id: String::new(),
            registered: 0,
            requested: 2,
        })
    });

    let (status, body) = send(
        router(service),
        post_json("/update-webinar", json!({"emails": ["a@example.com", "b@example.com"], "names": ["A", "B"]})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"status": "webinar_not_found", "webinar_id": "", "registered": 0, "requested": 2})
    );
}

#[tokio::test]
async fn test_validation_failure_is_422() {
    let mut service = MockRegistrationService::new();
    service
        .expect_register_participants()
        .returning(|_| Err(RegistrarError::validation("2 emails but 1 names")));

    let (status, body) = send(
        router(service),
        post_json(
            "/update-webinar",
            json!({"webinar_id": "123", "emails": ["a@example.com", "b@example.com"], "names": ["A"]}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["status"], "error");
    assert!(body["detail"].as_str().unwrap().contains("2 emails but 1 names"));
}

#[tokio::test]
async fn test_auth_failure_is_502() {
    let mut service = MockRegistrationService::new();
    service
        .expect_register_participants()
        .returning(|_| Err(RegistrarError::auth("HTTP 401: invalid_client")));

    let (status, body) = send(
        router(service),
        post_json("/update-webinar", json!({"webinar_id": "123", "emails": ["a@example.com"], "names": ["A"]})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["status"], "error");
}

#[tokio::test]
async fn test_malformed_body_never_reaches_service() {
    let mut service = MockRegistrationService::new();
    service.expect_register_participants().times(0);

    let request = Request::builder()
        .method(Method::POST)
        .uri("/update-webinar")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let (status, body) = send(router(service), request).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["status"], "error");
}

#[tokio::test]
async fn test_get_join_urls() {
    let mut service = MockRegistrationService::new();
    service
        .expect_join_urls()
        .withf(|request| request.webinar_id.as_deref() == Some("123") && request.emails.len() == 1)
        .returning(|_| {
            Ok(JoinUrlResponse {
                success: vec![JoinUrlEntry {
                    email: "a@example.com".to_string(),
                    join_url: Some("https://zoom.us/w/123?tk=a".to_string()),
                    registrant_id: Some("r1".to_string()),
                }],
                errors: Vec::new(),
            })
        });

    let (status, body) = send(
        router(service),
        post_json("/get-join-urls", json!({"webinar_id": "123", "emails": ["A@example.com"]})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"][0]["registrant_id"], "r1");
    assert_eq!(body["errors"], json!([]));
}

#[tokio::test]
async fn test_create_webinar_success_and_upstream_rejection() {
    let mut service = MockRegistrationService::new();
    let mut seq = mockall::Sequence::new();
    service
        .expect_create_webinar()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_| Ok(CreateWebinarResponse::ok("81234567890")));
    service
        .expect_create_webinar()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_| {
            Err(RegistrarError::UpstreamRejected {
                status: 400,
                detail: "Invalid start_time".to_string(),
            })
        });

    let router = router(service);
    let payload = json!({
        "name": "Atelier",
        "start_time": "2026-11-05T18:00:00",
        "duration": "90",
        "diffusion": "Sur inscription",
        "recording": "Oui"
    });

    let (status, body) = send(router.clone(), post_json("/create-webinar", payload.clone())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "ok", "webinar_id": "81234567890"}));

    let (status, body) = send(router, post_json("/create-webinar", payload)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"status": "error", "detail": "Invalid start_time"}));
}

#[tokio::test]
async fn test_fetch_upcoming_webinars_lists_sheet_rows() {
    let mut service = MockRegistrationService::new();
    service.expect_upcoming_webinars().times(1).returning(|| {
        Ok(UpcomingWebinarsResponse::ok(vec![UpcomingWebinar {
            name: Some("Atelier".to_string()),
            webinar_id: "81234567890".to_string(),
            date: "05/11/2026 18:00".to_string(),
            duration: Some(90),
            recording: "Oui".to_string(),
            diffusion: "Sur inscription".to_string(),
        }]))
    });

    let request = Request::builder()
        .method(Method::POST)
        .uri("/fetch-upcoming-webinars")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(router(service), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "status": "ok",
            "count": 1,
            "webinars": [{
                "Name": "Atelier",
                "Webinar ID": "81234567890",
                "Date": "05/11/2026 18:00",
                "Duration": 90,
                "Recording": "Oui",
                "Diffusion": "Sur inscription"
            }]
        })
    );
}

#[tokio::test]
async fn test_fetch_upcoming_webinars_passes_zoom_refusal_through() {
    let mut service = MockRegistrationService::new();
    service.expect_upcoming_webinars().times(1).returning(|| {
        Ok(UpcomingWebinarsResponse::Error {
            zoom_status: 401,
            zoom_response: r#"{"code":124,"message":"Invalid access token."}"#.to_string(),
        })
    });

    let request = Request::builder()
        .method(Method::POST)
        .uri("/fetch-upcoming-webinars")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(router(service), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "error");
    assert_eq!(body["zoom_status"], 401);
    assert_eq!(body["zoom_response"], r#"{"code":124,"message":"Invalid access token."}"#);
}

#[tokio::test]
async fn test_fetch_upcoming_webinars_credential_failure_is_502() {
    let mut service = MockRegistrationService::new();
    service
        .expect_upcoming_webinars()
        .returning(|| Err(RegistrarError::auth("HTTP 401: invalid_client")));

    let request = Request::builder()
        .method(Method::POST)
        .uri("/fetch-upcoming-webinars")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(router(service), request).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["status"], "error");
}
