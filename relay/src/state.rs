//! Shared state handed to every request handler

use std::sync::Arc;
use std::time::Instant;

use registrar::RegistrationService;

/// Application state cloned into each handler
#[derive(Clone)]
pub struct AppState {
    pub registrar: Arc<dyn RegistrationService>,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(registrar: Arc<dyn RegistrationService>) -> Self {
        Self {
            registrar,
            started_at: Instant::now(),
        }
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}
