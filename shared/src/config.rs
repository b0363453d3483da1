//! Environment-based configuration for the relay
//!
//! Values are loaded from:
//! 1. `.env` file in the current directory or parent directories (if present)
//! 2. System environment variables
//!
//! Environment variables take precedence over .env file values.
//!
//! ## Required Keys
//! - `ZOOM_ACCOUNT_ID`, `ZOOM_CLIENT_ID`, `ZOOM_CLIENT_SECRET`: server-to-server OAuth app
//!
//! ## Optional Keys
//! - `ZOOM_API_BASE`, `ZOOM_OAUTH_URL`: endpoint overrides
//! - `REGISTRATION_WORKERS`: concurrent registrant calls (default 8)
//! - `REGISTRATION_MAX_RETRIES`: retries on a throttled call (default 3)
//! - `REGISTRATION_BACKOFF_MS`: pause before a retry (default 1500)
//! - `REGISTRATION_BACKOFF`: `fixed` or `exponential`
//! - `NAME_SPLIT_MODE`: `legacy` or `joined`
//! - `HTTP_TIMEOUT_SECS`: per-request timeout for Zoom calls (default 20)

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::errors::{SharedError, SharedResult};
use crate::types::NameSplitMode;

pub const DEFAULT_ZOOM_API_BASE: &str = "https://api.zoom.us/v2";
pub const DEFAULT_ZOOM_OAUTH_URL: &str = "https://zoom.us/oauth/token";

/// 5 to 10 keeps us under Zoom's registrant rate limit
pub const DEFAULT_WORKERS: usize = 8;
pub const DEFAULT_MAX_RETRIES: u32 = 3;
pub const DEFAULT_BACKOFF_MS: u64 = 1500;
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 20;

/// Zoom server-to-server OAuth credentials
#[derive(Clone, PartialEq, Eq)]
pub struct ZoomCredentials {
    pub account_id: String,
    pub client_id: String,
    pub client_secret: String,
}

impl fmt::Debug for ZoomCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ZoomCredentials")
            .field("account_id", &self.account_id)
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .finish()
    }
}

/// Shape of the pause between throttled attempts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackoffKind {
    #[default]
    Fixed,
    Exponential,
}

impl FromStr for BackoffKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "fixed" => Ok(BackoffKind::Fixed),
            "exponential" => Ok(BackoffKind::Exponential),
            other => Err(format!("Unknown backoff '{other}'. Valid options: fixed, exponential")),
        }
    }
}

/// Tuning for the bulk registration worker pool
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationSettings {
    pub workers: usize,
    pub max_retries: u32,
    pub backoff: BackoffKind,
    pub backoff_base: Duration,
    pub name_split: NameSplitMode,
}

impl Default for RegistrationSettings {
    fn default() -> Self {
        Self {
            workers: DEFAULT_WORKERS,
            max_retries: DEFAULT_MAX_RETRIES,
            backoff: BackoffKind::Fixed,
            backoff_base: Duration::from_millis(DEFAULT_BACKOFF_MS),
            name_split: NameSplitMode::Legacy,
        }
    }
}

/// Full relay configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayConfig {
    pub credentials: ZoomCredentials,
    pub api_base: String,
    pub oauth_url: String,
    pub http_timeout: Duration,
    pub registration: RegistrationSettings,
}

impl RelayConfig {
    const REQUIRED_KEYS: &'static [&'static str] = &["ZOOM_ACCOUNT_ID", "ZOOM_CLIENT_ID", "ZOOM_CLIENT_SECRET"];

    /// Load configuration from `.env` and the process environment
    pub fn from_env() -> SharedResult<Self> {
        // Silently skipped when there is no .env file
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> SharedResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let missing: Vec<&str> = Self::REQUIRED_KEYS
            .iter()
            .copied()
            .filter(|key| get(key).is_none())
            .collect();
        if !missing.is_empty() {
            return Err(SharedError::MissingConfig {
                keys: missing.join(", "),
            });
        }

        let credentials = ZoomCredentials {
            account_id: get("ZOOM_ACCOUNT_ID").unwrap_or_default(),
            client_id: get("ZOOM_CLIENT_ID").unwrap_or_default(),
            client_secret: get("ZOOM_CLIENT_SECRET").unwrap_or_default(),
        };

        let workers: usize = parse_or("REGISTRATION_WORKERS", get("REGISTRATION_WORKERS"), DEFAULT_WORKERS)?;
        if workers == 0 {
            return Err(SharedError::invalid_config("REGISTRATION_WORKERS", "0", "must be at least 1"));
        }

        let registration = RegistrationSettings {
            workers,
            max_retries: parse_or("REGISTRATION_MAX_RETRIES", get("REGISTRATION_MAX_RETRIES"), DEFAULT_MAX_RETRIES)?,
            backoff: parse_or("REGISTRATION_BACKOFF", get("REGISTRATION_BACKOFF"), BackoffKind::Fixed)?,
            backoff_base: Duration::from_millis(parse_or(
                "REGISTRATION_BACKOFF_MS",
                get("REGISTRATION_BACKOFF_MS"),
                DEFAULT_BACKOFF_MS,
            )?),
            name_split: parse_or("NAME_SPLIT_MODE", get("NAME_SPLIT_MODE"), NameSplitMode::Legacy)?,
        };

        Ok(Self {
            credentials,
            api_base: get("ZOOM_API_BASE").unwrap_or_else(|| DEFAULT_ZOOM_API_BASE.to_string()),
            oauth_url: get("ZOOM_OAUTH_URL").unwrap_or_else(|| DEFAULT_ZOOM_OAUTH_URL.to_string()),
            http_timeout: Duration::from_secs(parse_or(
                "HTTP_TIMEOUT_SECS",
                get("HTTP_TIMEOUT_SECS"),
                DEFAULT_HTTP_TIMEOUT_SECS,
            )?),
            registration,
        })
    }
}

fn parse_or<T>(field: &str, raw: Option<String>, default: T) -> SharedResult<T>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    match raw {
        Some(value) => value
            .parse()
            .map_err(|e: T::Err| SharedError::invalid_config(field, &value, e.to_string())),
        None => Ok(default),
    }
}
