//! Bulk registration through a bounded worker pool
//!
//! `workers` tasks pull participants from a shared queue. Each one runs the
//! retry state machine for its participant and sends the terminal outcome to
//! a single channel, which the orchestrator drains into the report. A
//! participant is popped from the queue exactly once and produces exactly one
//! outcome, so the report always accounts for every input.

use std::collections::VecDeque;
use std::sync::Arc;

use shared::logging::log_progress;
use shared::{
    Component, NameSplitMode, Participant, RegistrationOutcome, RegistrationReport, RegistrationSettings, RunId,
    component_error, component_info, component_warn,
};
use tokio::sync::{Mutex, mpsc};
use tokio::task::JoinSet;
use tracing::{Instrument, debug};

use crate::core::registration::register_participant;
use crate::core::retry::{RetryDecision, RetryPolicy};
use crate::traits::{RegistrantApi, Sleeper};

/// Read-only context shared by every worker of one run
struct RunContext<A: ?Sized, S: ?Sized> {
    api: Arc<A>,
    sleeper: Arc<S>,
    token: String,
    webinar_id: String,
    policy: RetryPolicy,
    name_split: NameSplitMode,
}

/// Drives concurrent registrant creation for one webinar
pub struct RegistrationOrchestrator<A: ?Sized, S: ?Sized> {
    api: Arc<A>,
    sleeper: Arc<S>,
    workers: usize,
    policy: RetryPolicy,
    name_split: NameSplitMode,
}

impl<A: ?Sized, S: ?Sized> Clone for RegistrationOrchestrator<A, S> {
    fn clone(&self) -> Self {
        Self {
            api: Arc::clone(&self.api),
            sleeper: Arc::clone(&self.sleeper),
            workers: self.workers,
            policy: self.policy,
            name_split: self.name_split,
        }
    }
}

impl<A, S> RegistrationOrchestrator<A, S>
where
    A: RegistrantApi + ?Sized + 'static,
    S: Sleeper + ?Sized + 'static,
{
    pub fn new(api: Arc<A>, sleeper: Arc<S>, settings: &RegistrationSettings) -> Self {
        Self {
            api,
            sleeper,
            workers: settings.workers.max(1),
            policy: RetryPolicy::from_settings(settings),
            name_split: settings.name_split,
        }
    }

    /// Override the worker count
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    /// Override the retry policy
    pub fn with_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    pub fn policy(&self) -> RetryPolicy {
        self.policy
    }

    /// Register every participant against `webinar_id` with `token`
    ///
    /// An empty webinar id short-circuits: nothing is sent and the report is
    /// marked not found with the requested count preserved.
    pub async fn register_all(&self, token: &str, webinar_id: &str, participants: Vec<Participant>) -> RegistrationReport {
        let requested = participants.len();
        let webinar_id = webinar_id.trim();

        if webinar_id.is_empty() {
            component_warn!(
                Component::Registrar,
                requested,
                "No webinar id supplied, skipping registration"
            );
            return RegistrationReport::webinar_not_found(webinar_id, requested);
        }

        let run_id = RunId::new();
        let span = tracing::info_span!("registration_run", run_id = %run_id, webinar_id = %webinar_id);

        self.run(token, webinar_id, participants).instrument(span).await
    }

    async fn run(&self, token: &str, webinar_id: &str, participants: Vec<Participant>) -> RegistrationReport {
        let requested = participants.len();
        let mut report = RegistrationReport::new(webinar_id, requested);
        if requested == 0 {
            return report;
        }

        let worker_count = self.workers.min(requested);
        component_info!(
            Component::Registrar,
            requested,
            workers = worker_count,
            "Registering participants"
        );

        let context = Arc::new(RunContext {
            api: Arc::clone(&self.api),
            sleeper: Arc::clone(&self.sleeper),
            token: token.to_string(),
            webinar_id: webinar_id.to_string(),
            policy: self.policy,
            name_split: self.name_split,
        });
        let queue = Arc::new(Mutex::new(VecDeque::from(participants)));
        let (outcome_tx, mut outcome_rx) = mpsc::unbounded_channel::<RegistrationOutcome>();

        let mut workers = JoinSet::new();
        for worker_id in 0..worker_count {
            let context = Arc::clone(&context);
            let queue = Arc::clone(&queue);
            let outcome_tx = outcome_tx.clone();
            workers.spawn(
                async move { worker_loop(worker_id, context, queue, outcome_tx).await }.in_current_span(),
            );
        }
        // Only workers hold senders now; the channel closes when the last one exits
        drop(outcome_tx);

        while let Some(outcome) = outcome_rx.recv().await {
            report.record(outcome);
        }

        while let Some(joined) = workers.join_next().await {
            if let Err(e) = joined {
                component_error!(Component::Registrar, error = %e, "Registration worker aborted");
            }
        }

        if !report.is_complete() {
            component_error!(
                Component::Registrar,
                requested,
                completed = report.completed(),
                "Registration run lost participants"
            );
        }

        log_progress(
            Component::Registrar,
            "Registration run finished",
            &format!("{} registered, {} failed", report.success.len(), report.errors.len()),
        );
        report
    }
}

/// Pull participants until the queue is empty
async fn worker_loop<A, S>(
    worker_id: usize,
    context: Arc<RunContext<A, S>>,
    queue: Arc<Mutex<VecDeque<Participant>>>,
    outcomes: mpsc::UnboundedSender<RegistrationOutcome>,
) where
    A: RegistrantApi + ?Sized,
    S: Sleeper + ?Sized,
{
    loop {
        // Guard is dropped at the end of this statement, before any network call
        let next = queue.lock().await.pop_front();
        let Some(participant) = next else {
            break;
        };

        let outcome = register_with_retry(&context, &participant).await;
        if outcomes.send(outcome).is_err() {
            component_warn!(Component::Registrar, worker_id, "Outcome receiver dropped, stopping worker");
            break;
        }
    }
    debug!(worker_id, "Registration worker finished");
}

/// Run the retry state machine for one participant
async fn register_with_retry<A, S>(context: &RunContext<A, S>, participant: &Participant) -> RegistrationOutcome
where
    A: RegistrantApi + ?Sized,
    S: Sleeper + ?Sized,
{
    let mut retries = 0;
    loop {
        let outcome = register_participant(
            context.api.as_ref(),
            &context.token,
            &context.webinar_id,
            participant,
            context.name_split,
        )
        .await;

        match context.policy.decide(retries, outcome) {
            RetryDecision::Retry { retry, delay } => {
                debug!(
                    email = %participant.email,
                    retry,
                    delay_ms = delay.as_millis() as u64,
                    "Throttled by Zoom, backing off"
                );
                retries = retry;
                context.sleeper.sleep(delay).await;
            }
            RetryDecision::Finish(outcome) => return outcome,
        }
    }
}
