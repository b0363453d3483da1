//! Registrar core business logic

pub mod join_links;
pub mod names;
pub mod orchestrator;
pub mod registration;
pub mod retry;
pub mod webinars;

pub use join_links::{fetch_all_registrants, lookup_join_urls};
pub use names::normalize;
pub use orchestrator::RegistrationOrchestrator;
pub use registration::register_participant;
pub use retry::{Backoff, RetryDecision, RetryPolicy};
pub use webinars::{schedule_webinar, upcoming_entry, upcoming_webinars};
