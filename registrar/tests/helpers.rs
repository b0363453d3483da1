//! Test helper utilities for registrar integration tests

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use registrar::{ApiFailure, CreatedRegistrant, RegistrantApi, RegistrantPayload, Sleeper};
use shared::{Participant, RegistrantPage, RelayConfig};

/// Build a relay config pointing both Zoom endpoints at a mock server
pub fn config_for(server_uri: &str, extra: &[(&str, &str)]) -> RelayConfig {
    let mut vars: HashMap<String, String> = HashMap::new();
    vars.insert("ZOOM_ACCOUNT_ID".into(), "acct-1".into());
    vars.insert("ZOOM_CLIENT_ID".into(), "client".into());
    vars.insert("ZOOM_CLIENT_SECRET".into(), "secret".into());
    vars.insert("ZOOM_API_BASE".into(), server_uri.to_string());
    vars.insert("ZOOM_OAUTH_URL".into(), format!("{}/oauth/token", server_uri));
    vars.insert("REGISTRATION_BACKOFF_MS".into(), "5".into());
    vars.insert("HTTP_TIMEOUT_SECS".into(), "5".into());
    for (key, value) in extra {
        vars.insert(key.to_string(), value.to_string());
    }

    RelayConfig::from_lookup(|key| vars.get(key).cloned()).unwrap()
}

/// `count` distinct participants
pub fn participants(count: usize) -> Vec<Participant> {
    (0..count)
        .map(|i| Participant::new(format!("user{i}@example.com"), format!("User Number{i}")))
        .collect()
}

/// Local-part prefixes that make `JitteryRegistrantApi` misbehave
pub const REJECTED_PREFIX: &str = "bad";
/// Throttled twice, then accepted
pub const FLAKY_PREFIX: &str = "flaky";
/// Throttled on every call
pub const BUSY_PREFIX: &str = "busy";
pub const FLAKY_THROTTLES: usize = 2;

/// `per_kind` participants of each kind: accepted, rejected, flaky and busy
pub fn mixed_participants(per_kind: usize) -> Vec<Participant> {
    (0..per_kind)
        .flat_map(|i| {
            ["ok", REJECTED_PREFIX, FLAKY_PREFIX, BUSY_PREFIX]
                .into_iter()
                .map(move |kind| Participant::new(format!("{kind}{i}@example.com"), format!("{kind} Person{i}")))
        })
        .collect()
}

/// Registrant API that answers after a small, uneven delay and records how
/// many calls are in flight at once
///
/// Emails starting with `REJECTED_PREFIX` get a 400, `FLAKY_PREFIX` a 429 on
/// the first `FLAKY_THROTTLES` calls and `BUSY_PREFIX` a 429 every time.
/// Everyone else is accepted.
#[derive(Default)]
pub struct JitteryRegistrantApi {
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
    calls: Mutex<HashMap<String, usize>>,
}

impl JitteryRegistrantApi {
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    /// Number of calls received per email
    pub fn calls(&self) -> HashMap<String, usize> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl RegistrantApi for JitteryRegistrantApi {
    async fn create_registrant(
        &self,
        _token: &str,
        _webinar_id: &str,
        registrant: &RegistrantPayload,
    ) -> Result<CreatedRegistrant, ApiFailure> {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        let call = {
            let mut calls = self.calls.lock().unwrap();
            let count = calls.entry(registrant.email.clone()).or_insert(0);
            *count += 1;
            *count
        };

        let jitter = registrant.email.bytes().map(u64::from).sum::<u64>() % 5;
        tokio::time::sleep(Duration::from_millis(jitter)).await;

        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        let email = registrant.email.as_str();
        let throttled = email.starts_with(BUSY_PREFIX) || (email.starts_with(FLAKY_PREFIX) && call <= FLAKY_THROTTLES);
        if throttled {
            return Err(ApiFailure::Status {
                status: 429,
                message: "Too many requests.".to_string(),
            });
        }
        if email.starts_with(REJECTED_PREFIX) {
            return Err(ApiFailure::Status {
                status: 400,
                message: "Invalid field.".to_string(),
            });
        }
        Ok(CreatedRegistrant {
            join_url: Some(format!("https://zoom.us/w/123?tk={}", registrant.email)),
            registrant_id: None,
        })
    }

    async fn list_registrants(
        &self,
        _token: &str,
        _webinar_id: &str,
        _page_token: Option<String>,
    ) -> Result<RegistrantPage, ApiFailure> {
        Ok(RegistrantPage::default())
    }
}

/// Sleeper that returns immediately and counts requested pauses
#[derive(Default)]
pub struct CountingSleeper {
    pub sleeps: AtomicUsize,
}

#[async_trait]
impl Sleeper for CountingSleeper {
    async fn sleep(&self, _duration: Duration) {
        self.sleeps.fetch_add(1, Ordering::SeqCst);
    }
}
