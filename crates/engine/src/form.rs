//! Account form data and validation rules.
//!
//! Validation never throws and never short-circuits: every rule is checked
//! independently and all applicable errors are reported together, so the
//! visitor sees every problem at once.
//!
//! The email rule is deliberately weak (contains `@` and a `.` somewhere
//! after it). The product has not decided on a stricter rule, so this module
//! must not substitute one.

use serde::{Deserialize, Serialize};

/// User-entered account fields on the subscribe page.
///
/// Created empty at page start, mutated field-by-field by user input, and
/// cleared only on successful submission. Failed submissions preserve the
/// input so the visitor can correct and retry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountFormData {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub agreed_to_terms: bool,
}

impl AccountFormData {
    /// Reset every field to its initial empty state.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// A single failed validation rule.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
    #[error("name is required")]
    NameRequired,
    #[error("enter a valid email address")]
    EmailInvalid,
    #[error("password is required")]
    PasswordRequired,
    #[error("passwords do not match")]
    PasswordMismatch,
    #[error("you must agree to the terms of service")]
    TermsNotAccepted,
}

/// Validate an account form, reporting all applicable errors together.
///
/// Rules:
/// - `name` must be non-empty after trimming whitespace
/// - `email` must be non-empty, contain `@`, and contain `.` after the `@`
/// - `password` must be non-empty
/// - `confirm_password` must equal `password` byte-for-byte
/// - `agreed_to_terms` must be true
///
/// # Errors
///
/// Returns every [`FieldError`] that applies, in field order.
pub fn validate(form: &AccountFormData) -> Result<(), Vec<FieldError>> {
    let mut errors = Vec::new();

    if form.name.trim().is_empty() {
        errors.push(FieldError::NameRequired);
    }

    if !email_is_plausible(&form.email) {
        errors.push(FieldError::EmailInvalid);
    }

    if form.password.is_empty() {
        errors.push(FieldError::PasswordRequired);
    }

    if form.confirm_password != form.password {
        errors.push(FieldError::PasswordMismatch);
    }

    if !form.agreed_to_terms {
        errors.push(FieldError::TermsNotAccepted);
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

/// The source product's email check: an `@` with a `.` somewhere after it.
fn email_is_plausible(email: &str) -> bool {
    email
        .find('@')
        .is_some_and(|at| email.get(at + 1..).is_some_and(|domain| domain.contains('.')))
}
