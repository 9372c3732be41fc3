//! Login and registration form submission
//!
//! Every submission ends in exactly one notification. Invalid input is
//! rejected here and never reaches the session store.

use tracing::debug;
use validator::Validate;

use super::dto::{form_error, LoginForm, RegisterForm};
use crate::domain::User;
use crate::notifications::{NewNotification, NotificationQueue};
use crate::session::SessionStore;
use crate::shared::SessionError;

const LOGIN_SUCCESS_MESSAGE: &str = "You have signed in successfully";
const REGISTER_SUCCESS_MESSAGE: &str = "You have registered successfully";

pub async fn submit_login(
    session: &SessionStore,
    notifications: &NotificationQueue,
    form: LoginForm,
) -> Result<User, SessionError> {
    if let Err(errors) = form.validate() {
        return Err(reject(notifications, form_error(&errors)));
    }

    report(
        notifications,
        session.login(&form.email, &form.password).await,
        LOGIN_SUCCESS_MESSAGE,
    )
}

pub async fn submit_register(
    session: &SessionStore,
    notifications: &NotificationQueue,
    form: RegisterForm,
) -> Result<User, SessionError> {
    if let Err(errors) = form.validate() {
        return Err(reject(notifications, form_error(&errors)));
    }

    report(
        notifications,
        session
            .register(&form.name, &form.email, &form.password)
            .await,
        REGISTER_SUCCESS_MESSAGE,
    )
}

fn reject(notifications: &NotificationQueue, message: &'static str) -> SessionError {
    debug!(message, "Form rejected before submission");
    notifications.add(NewNotification::error(message));
    SessionError::Validation(message.into())
}

fn report(
    notifications: &NotificationQueue,
    result: Result<User, SessionError>,
    success: &str,
) -> Result<User, SessionError> {
    match &result {
        Ok(_) => notifications.add(NewNotification::success(success)),
        Err(e) => notifications.add(NewNotification::error(e.to_string())),
    };
    result
}
