//! Registrar services implementations

pub mod sleeper;
pub mod zoom_client;
pub mod zoom_token;

#[cfg(test)]
pub mod tests;

pub use sleeper::*;
pub use zoom_client::*;
pub use zoom_token::*;

use std::time::Duration;

/// Build the HTTP client shared by every Zoom service
pub fn build_http_client(timeout: Duration) -> reqwest::Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(timeout)
        .user_agent(concat!("webinar-relay/", env!("CARGO_PKG_VERSION")))
        .build()
}
