//! Shared types for the webinar registration relay
//!
//! Contains the domain types exchanged between the registrar core and the
//! HTTP relay, plus configuration loading and logging setup.

pub mod config;
pub mod errors;
pub mod logging;
pub mod messages;
pub mod types;

pub use config::{BackoffKind, RegistrationSettings, RelayConfig, ZoomCredentials};
pub use errors::*;
pub use types::*;

pub use messages::{
    // Bulk registration
    BulkRegistrationRequest, BulkRegistrationResponse,

    // Join-link lookup
    JoinUrlEntry, JoinUrlError, JoinUrlRequest, JoinUrlResponse,

    // Webinar creation
    CreateWebinarRequest, CreateWebinarResponse, WebinarDuration,

    // Upcoming webinars
    UpcomingWebinar, UpcomingWebinarsResponse,

    StatusResponse,
};
