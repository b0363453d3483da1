//! Registering a single participant

use shared::{NameSplitMode, Participant, RegistrationOutcome};
use tracing::debug;

use crate::core::names::normalize;
use crate::traits::RegistrantApi;
use crate::types::RegistrantPayload;

/// Make one registrant-creation call and turn the result into an outcome
///
/// Never returns an error: transport problems and Zoom refusals both become
/// `RegistrationOutcome::Failure`.
pub async fn register_participant<A>(
    api: &A,
    token: &str,
    webinar_id: &str,
    participant: &Participant,
    mode: NameSplitMode,
) -> RegistrationOutcome
where
    A: RegistrantApi + ?Sized,
{
    let payload = RegistrantPayload::new(participant.email.clone(), normalize(&participant.name, mode));

    match api.create_registrant(token, webinar_id, &payload).await {
        Ok(created) => RegistrationOutcome::Success {
            email: participant.email.clone(),
            name: participant.name.clone(),
            join_url: created.join_url,
        },
        Err(failure) => {
            debug!(email = %participant.email, %failure, "Registrant call failed");
            RegistrationOutcome::Failure {
                email: participant.email.clone(),
                name: participant.name.clone(),
                status_code: failure.status_code(),
                error: failure.message().to_string(),
            }
        }
    }
}
