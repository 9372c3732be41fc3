use serde::Deserialize;
use validator::{Validate, ValidationErrors};

use crate::shared::validations::EMPTY_FIELDS_MESSAGE;

pub(crate) const PASSWORD_MISMATCH_MESSAGE: &str = "Passwords do not match";

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct LoginForm {
    #[validate(length(min = 1))]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterForm {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(length(min = 1))]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
    #[validate(length(min = 1), must_match(other = "password"))]
    pub confirm_password: String,
}

/// Reduce validator output to the single message shown to the user.
/// Missing input is reported before a mismatch.
pub(crate) fn form_error(errors: &ValidationErrors) -> &'static str {
    let missing = errors
        .field_errors()
        .values()
        .flat_map(|errs| errs.iter())
        .any(|e| e.code == "length");
    if missing {
        EMPTY_FIELDS_MESSAGE
    } else {
        PASSWORD_MISMATCH_MESSAGE
    }
}
