//! Registrar library for the webinar relay
//!
//! Talks to the Zoom API on behalf of the relay: token exchange, bulk
//! registrant creation through a bounded worker pool with throttle retries,
//! join-link lookup and webinar scheduling.

pub mod core;
pub mod error;
pub mod registrar_impl;
pub mod services;
pub mod traits;
pub mod types;

// Re-export main types
pub use core::{Backoff, RegistrationOrchestrator, RetryDecision, RetryPolicy, normalize};
pub use error::{RegistrarError, RegistrarResult};
pub use registrar_impl::{LiveRegistrar, Registrar};
pub use services::*;
pub use traits::*;
pub use types::*;
