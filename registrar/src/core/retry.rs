//! Retry policy for throttled registrant calls
//!
//! A participant moves through `Attempting -> Success | Retrying(n) -> Failure`.
//! Only throttling sends it back to `Attempting`; every other failure is
//! terminal straight away.

use std::time::Duration;

use shared::{BackoffKind, RegistrationOutcome, RegistrationSettings};

/// Upper bound for exponential backoff
const MAX_EXPONENTIAL_DELAY: Duration = Duration::from_secs(30);

/// Delay before re-attempting a throttled call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backoff {
    Fixed(Duration),
    /// `base * 2^(retry - 1)`, capped at `max`
    Exponential { base: Duration, max: Duration },
}

impl Backoff {
    /// Delay before retry number `retry` (1-based)
    pub fn delay(&self, retry: u32) -> Duration {
        match *self {
            Backoff::Fixed(delay) => delay,
            Backoff::Exponential { base, max } => {
                let factor = 2u32.saturating_pow(retry.saturating_sub(1));
                base.checked_mul(factor).map_or(max, |delay| delay.min(max))
            }
        }
    }
}

/// What to do after an attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RetryDecision {
    /// Sleep for `delay`, then make attempt number `retry + 1`
    Retry { retry: u32, delay: Duration },
    /// The outcome is final
    Finish(RegistrationOutcome),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub backoff: Backoff,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from_settings(&RegistrationSettings::default())
    }
}

impl RetryPolicy {
    pub fn new(max_retries: u32, backoff: Backoff) -> Self {
        Self { max_retries, backoff }
    }

    pub fn from_settings(settings: &RegistrationSettings) -> Self {
        let backoff = match settings.backoff {
            BackoffKind::Fixed => Backoff::Fixed(settings.backoff_base),
            BackoffKind::Exponential => Backoff::Exponential {
                base: settings.backoff_base,
                max: MAX_EXPONENTIAL_DELAY,
            },
        };
        Self::new(settings.max_retries, backoff)
    }

    /// Decide the next step given how many retries were already spent
    pub fn decide(&self, retries_so_far: u32, outcome: RegistrationOutcome) -> RetryDecision {
        if outcome.is_throttled() && retries_so_far < self.max_retries {
            let retry = retries_so_far + 1;
            RetryDecision::Retry {
                retry,
                delay: self.backoff.delay(retry),
            }
        } else {
            RetryDecision::Finish(outcome)
        }
    }
}
