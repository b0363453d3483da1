//! Relay library for the webinar registration service
//!
//! Exposes the intake-form contract over HTTP and hands each request to a
//! `RegistrationService`.

pub mod error;
pub mod relay_impl;
pub mod state;
pub mod web;

// Re-export main types
pub use error::{RelayError, RelayResult};
pub use relay_impl::Relay;
pub use state::AppState;
