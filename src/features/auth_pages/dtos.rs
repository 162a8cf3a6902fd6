use serde::Deserialize;
use validator::{Validate, ValidationErrors};

use crate::shared::constants::MIN_PASSWORD_LEN;

#[derive(Debug, Deserialize, Validate)]
pub struct LoginForm {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterForm {
    #[validate(length(min = 1, max = 100, message = "Name is required"))]
    pub name: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = MIN_PASSWORD_LEN, message = "Password must be at least 8 characters long"))]
    pub password: String,

    pub confirm_password: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ForgotPasswordForm {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ResetPasswordForm {
    #[validate(length(min = 1, message = "Invalid or missing reset token"))]
    pub token: String,

    #[validate(length(min = MIN_PASSWORD_LEN, message = "Password must be at least 8 characters long"))]
    pub password: String,

    pub confirm_password: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ResendVerificationForm {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
}

/// The first human-readable message out of a validation failure.
pub fn first_validation_message(errors: &ValidationErrors) -> String {
    errors
        .field_errors()
        .values()
        .flat_map(|errs| errs.iter())
        .find_map(|err| err.message.as_ref().map(|m| m.to_string()))
        .unwrap_or_else(|| "Invalid input".to_string())
}
