//! Checkout intent state machine for the subscribe page.
//!
//! [`CheckoutController`] owns the account form and a tri-state-plus-idle
//! submission status: `Idle -> Submitting -> {Success, Error}`. `Success`
//! and `Error` are display states, not terminal; the next submit attempt
//! re-enters `Submitting`.
//!
//! Submission is gated on form validity and a complete plan selection, and
//! the injected [`Submitter`] is invoked at most once per attempt. A submit
//! issued while one is already in flight is silently ignored: that reflects
//! a double click, not a user mistake, so it is not an error state.
//!
//! The controller handle is cheaply cloneable; all clones share one status
//! and form. The interior lock is only ever held synchronously, never
//! across the submitter await.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use alphafolio_core::{PlanId, ProductId};

use crate::form::{self, AccountFormData, FieldError};
use crate::selection::SelectionState;

/// Failure reported by the external submission backend.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SubmitError {
    /// The backend rejected the request.
    #[error("submission rejected: {0}")]
    Rejected(String),
    /// The backend could not be reached.
    #[error("subscription service unreachable")]
    Unreachable,
}

/// The external operation that persists an account/subscription request.
///
/// Given validated form data plus the resolved product and plan ids, it
/// eventually resolves to success or a failure reason. The engine never
/// talks to a network itself and imposes no timeout; callers needing one
/// must wrap their implementation.
pub trait Submitter: Send + Sync {
    /// Submit a subscription request.
    fn submit(
        &self,
        form: &AccountFormData,
        product_id: &ProductId,
        plan_id: &PlanId,
    ) -> impl Future<Output = Result<(), SubmitError>> + Send;
}

/// Why a submit attempt ended in the `Error` display state.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmissionError {
    /// One or more form fields failed validation. The submitter was never
    /// invoked and the form is untouched.
    #[error("please fix the highlighted fields")]
    ValidationFailed(Vec<FieldError>),
    /// No complete (product, plan) pair was selected. The submitter was
    /// never invoked.
    #[error("select a portfolio and plan before subscribing")]
    NoPlanSelected,
    /// The backend reported failure. The form is preserved so the visitor
    /// can retry without re-typing.
    #[error("we could not process your request, please try again")]
    SubmissionFailed(String),
}

/// Submission status owned exclusively by the controller.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SubmissionStatus {
    #[default]
    Idle,
    Submitting,
    Success,
    Error(SubmissionError),
}

impl SubmissionStatus {
    /// Whether this is a `Success`/`Error` display state that a caller may
    /// dismiss (on a timer or on the next edit).
    #[must_use]
    pub const fn is_outcome(&self) -> bool {
        matches!(self, Self::Success | Self::Error(_))
    }
}

#[derive(Debug, Default)]
struct CheckoutInner {
    status: SubmissionStatus,
    form: AccountFormData,
}

/// Owner of the account form and the submission state machine.
///
/// Each subscribe page owns one controller; there is no shared state across
/// controller instances.
#[derive(Debug, Clone, Default)]
pub struct CheckoutController {
    inner: Arc<Mutex<CheckoutInner>>,
}

impl CheckoutController {
    /// Create a controller with an empty form in the `Idle` state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, CheckoutInner> {
        // A poisoned lock means a panic elsewhere; the state itself is
        // still coherent because every transition is a single assignment.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Current submission status.
    #[must_use]
    pub fn status(&self) -> SubmissionStatus {
        self.lock().status.clone()
    }

    /// Snapshot of the current form contents.
    #[must_use]
    pub fn form(&self) -> AccountFormData {
        self.lock().form.clone()
    }

    /// Field errors from the most recent failed validation, if the
    /// controller is currently displaying one.
    #[must_use]
    pub fn field_errors(&self) -> Vec<FieldError> {
        match &self.lock().status {
            SubmissionStatus::Error(SubmissionError::ValidationFailed(errors)) => errors.clone(),
            _ => Vec::new(),
        }
    }

    /// Dismiss a `Success`/`Error` display state back to `Idle`.
    ///
    /// No-op while `Idle` or `Submitting`. Callers preferring a timed
    /// dismissal run their own timer and call this when it fires.
    pub fn dismiss_outcome(&self) {
        let mut inner = self.lock();
        if inner.status.is_outcome() {
            inner.status = SubmissionStatus::Idle;
        }
    }

    pub fn set_name(&self, name: impl Into<String>) {
        self.edit(|form| form.name = name.into());
    }

    pub fn set_email(&self, email: impl Into<String>) {
        self.edit(|form| form.email = email.into());
    }

    pub fn set_password(&self, password: impl Into<String>) {
        self.edit(|form| form.password = password.into());
    }

    pub fn set_confirm_password(&self, confirm_password: impl Into<String>) {
        self.edit(|form| form.confirm_password = confirm_password.into());
    }

    pub fn set_agreed_to_terms(&self, agreed: bool) {
        self.edit(|form| form.agreed_to_terms = agreed);
    }

    /// Apply a field edit. Editing dismisses any displayed outcome.
    fn edit(&self, apply: impl FnOnce(&mut AccountFormData)) {
        let mut inner = self.lock();
        apply(&mut inner.form);
        if inner.status.is_outcome() {
            inner.status = SubmissionStatus::Idle;
        }
    }

    /// Run one submit attempt against the current form and selection.
    ///
    /// Transitions per the state machine: an in-flight attempt makes this a
    /// no-op; an invalid form or incomplete selection moves straight to
    /// `Error` without invoking the submitter; otherwise the submitter is
    /// invoked exactly once and its result decides `Success` or `Error`.
    /// On success the form is cleared; the selection is left untouched.
    pub async fn submit<S>(&self, selection: &SelectionState, submitter: &S)
    where
        S: Submitter + ?Sized,
    {
        let (form, product_id, plan_id) = {
            let mut inner = self.lock();

            if inner.status == SubmissionStatus::Submitting {
                tracing::debug!("Ignoring submit while a submission is in flight");
                return;
            }

            if let Err(errors) = form::validate(&inner.form) {
                tracing::debug!(errors = errors.len(), "Submit blocked by form validation");
                inner.status =
                    SubmissionStatus::Error(SubmissionError::ValidationFailed(errors));
                return;
            }

            let Some((product, plan)) = selection.selected_details() else {
                tracing::debug!("Submit blocked: no complete plan selection");
                inner.status = SubmissionStatus::Error(SubmissionError::NoPlanSelected);
                return;
            };

            inner.status = SubmissionStatus::Submitting;
            (inner.form.clone(), product.id.clone(), plan.id.clone())
        };

        tracing::info!(product = %product_id, plan = %plan_id, "Submitting subscription request");
        let result = submitter.submit(&form, &product_id, &plan_id).await;

        let mut inner = self.lock();
        match result {
            Ok(()) => {
                inner.form.clear();
                inner.status = SubmissionStatus::Success;
                tracing::info!(product = %product_id, plan = %plan_id, "Subscription request accepted");
            }
            Err(err) => {
                tracing::warn!(error = %err, "Subscription request failed");
                inner.status =
                    SubmissionStatus::Error(SubmissionError::SubmissionFailed(err.to_string()));
            }
        }
    }
}
