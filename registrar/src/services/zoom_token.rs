//! Zoom server-to-server OAuth token provider

use async_trait::async_trait;
use serde::Deserialize;
use shared::{Component, ZoomCredentials, component_debug, component_error};

use crate::error::{RegistrarError, RegistrarResult};
use crate::traits::TokenProvider;

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// Token provider using Zoom's `account_credentials` grant
pub struct RealTokenProvider {
    client: reqwest::Client,
    oauth_url: String,
    credentials: ZoomCredentials,
}

impl RealTokenProvider {
    pub fn new(client: reqwest::Client, oauth_url: impl Into<String>, credentials: ZoomCredentials) -> Self {
        Self {
            client,
            oauth_url: oauth_url.into(),
            credentials,
        }
    }
}

#[async_trait]
impl TokenProvider for RealTokenProvider {
    async fn get_token(&self) -> RegistrarResult<String> {
        component_debug!(Component::ZoomClient, account_id = %self.credentials.account_id, "Requesting Zoom access token");

        let response = self
            .client
            .post(&self.oauth_url)
            .query(&[
                ("grant_type", "account_credentials"),
                ("account_id", self.credentials.account_id.as_str()),
            ])
            .basic_auth(&self.credentials.client_id, Some(&self.credentials.client_secret))
            .send()
            .await
            .map_err(|e| {
                component_error!(Component::ZoomClient, error = %e, "Zoom OAuth endpoint unreachable");
                RegistrarError::auth(format!("token request failed: {e}"))
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            component_error!(Component::ZoomClient, status = status.as_u16(), "Zoom refused the credentials");
            return Err(RegistrarError::auth(format!("HTTP {}: {}", status.as_u16(), body)));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| RegistrarError::auth(format!("unreadable token response: {e}")))?;
        Ok(token.access_token)
    }
}
