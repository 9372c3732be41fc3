//! Flight application form submission

use tracing::{info, warn};

use crate::domain::{DomainError, FlightApplication, FlightDraft, RepositoryProvider};
use crate::notifications::{NewNotification, NotificationQueue};
use crate::session::SessionStore;

const CREATED_MESSAGE: &str = "Flight application created";
const SIGNED_OUT_MESSAGE: &str = "Sign in to file a flight application";

/// Validate `draft`, file it on behalf of the signed-in user, and report the
/// outcome as one notification.
pub async fn submit_flight(
    session: &SessionStore,
    repos: &dyn RepositoryProvider,
    notifications: &NotificationQueue,
    draft: FlightDraft,
) -> Option<FlightApplication> {
    let Some(user) = session.current_user() else {
        notifications.add(NewNotification::error(SIGNED_OUT_MESSAGE));
        return None;
    };

    match file(repos, draft, &user.id).await {
        Ok(created) => {
            info!(flight_id = %created.id, pilot_id = %user.id, "Flight application filed");
            notifications.add(NewNotification::success(CREATED_MESSAGE));
            Some(created)
        }
        Err(e) => {
            warn!(error = %e, "Flight application refused");
            notifications.add(NewNotification::error(user_message(&e)));
            None
        }
    }
}

async fn file(
    repos: &dyn RepositoryProvider,
    draft: FlightDraft,
    pilot_id: &str,
) -> Result<FlightApplication, DomainError> {
    let application = draft.submit(pilot_id)?;
    repos.drones().get(&application.drone_id).await?;
    repos.flights().create(application).await
}

fn user_message(error: &DomainError) -> String {
    match error {
        DomainError::Validation(msg) | DomainError::Conflict(msg) => msg.clone(),
        DomainError::NotFound { entity, value, .. } => format!("Unknown {entity} '{value}'"),
    }
}
