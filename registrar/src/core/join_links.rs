//! Join-link lookup for participants that are already registered

use std::collections::HashMap;

use shared::{JoinUrlEntry, JoinUrlError, JoinUrlResponse, Registrant, normalize_email};
use tracing::debug;

use crate::traits::RegistrantApi;

/// Status reported for a requested email with no matching registrant
pub const REGISTRANT_NOT_FOUND_STATUS: u16 = 404;
pub const REGISTRANT_NOT_FOUND: &str = "Registrant not found";

/// Fetch every registrant page of a webinar
pub async fn fetch_all_registrants<A>(
    api: &A,
    token: &str,
    webinar_id: &str,
) -> Result<Vec<Registrant>, crate::types::ApiFailure>
where
    A: RegistrantApi + ?Sized,
{
    let mut registrants = Vec::new();
    let mut page_token: Option<String> = None;

    loop {
        let page = api.list_registrants(token, webinar_id, page_token.take()).await?;
        debug!(webinar_id, count = page.registrants.len(), "Fetched registrant page");
        registrants.extend(page.registrants);

        match page.next_page_token.filter(|t| !t.is_empty()) {
            Some(next) => page_token = Some(next),
            None => break,
        }
    }

    Ok(registrants)
}

/// Match requested emails against the webinar's registrants, ignoring case
///
/// A failed page aborts the lookup and is reported as a single error entry.
pub async fn lookup_join_urls<A>(api: &A, token: &str, webinar_id: &str, emails: &[String]) -> JoinUrlResponse
where
    A: RegistrantApi + ?Sized,
{
    let registrants = match fetch_all_registrants(api, token, webinar_id).await {
        Ok(registrants) => registrants,
        Err(failure) => return JoinUrlResponse::listing_failed(failure.status_code(), failure.message()),
    };

    let by_email: HashMap<String, Registrant> = registrants
        .into_iter()
        .map(|r| (normalize_email(&r.email), r))
        .collect();

    let mut response = JoinUrlResponse::default();
    for email in emails.iter().map(|e| normalize_email(e)) {
        match by_email.get(&email) {
            Some(registrant) => response.success.push(JoinUrlEntry {
                email,
                join_url: registrant.join_url.clone(),
                registrant_id: registrant.id.clone(),
            }),
            None => response.errors.push(JoinUrlError {
                email: Some(email),
                status_code: REGISTRANT_NOT_FOUND_STATUS,
                error: REGISTRANT_NOT_FOUND.to_string(),
            }),
        }
    }
    response
}
