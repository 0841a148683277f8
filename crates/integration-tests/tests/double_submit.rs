//! The at-most-one-in-flight invariant.
//!
//! A click while a submission is in flight must not trigger a second
//! backend call. The gated submitter holds the first attempt open so the
//! test can issue a second one against a controller that is genuinely in
//! the `Submitting` state.

use std::sync::Arc;

use alphafolio_core::ProductId;
use alphafolio_engine::checkout::{CheckoutController, SubmissionStatus};
use alphafolio_engine::selection::SelectionState;
use alphafolio_integration_tests::{GatedSubmitter, sample_catalog};

#[tokio::test]
async fn test_submit_while_in_flight_is_ignored() {
    let mut selection = SelectionState::new(sample_catalog());
    selection.select_product(&ProductId::new("10x-alphas"));

    let controller = CheckoutController::new();
    controller.set_name("Ada Lovelace");
    controller.set_email("ada@example.com");
    controller.set_password("hunter22");
    controller.set_confirm_password("hunter22");
    controller.set_agreed_to_terms(true);

    let submitter = Arc::new(GatedSubmitter::new());

    let in_flight = tokio::spawn({
        let controller = controller.clone();
        let selection = selection.clone();
        let submitter = Arc::clone(&submitter);
        async move {
            controller.submit(&selection, submitter.as_ref()).await;
        }
    });

    // Let the spawned attempt reach its suspension point
    while controller.status() != SubmissionStatus::Submitting {
        tokio::task::yield_now().await;
    }
    assert_eq!(submitter.calls(), 1);

    // The double click: returns immediately, invokes nothing
    controller.submit(&selection, submitter.as_ref()).await;
    assert_eq!(submitter.calls(), 1);
    assert_eq!(controller.status(), SubmissionStatus::Submitting);

    // Only the original attempt completes
    submitter.release();
    in_flight.await.expect("in-flight submit task completes");
    assert_eq!(submitter.calls(), 1);
    assert_eq!(controller.status(), SubmissionStatus::Success);
}

#[tokio::test]
async fn test_edits_during_flight_do_not_disturb_submitting() {
    let mut selection = SelectionState::new(sample_catalog());
    selection.select_product(&ProductId::new("blue-chip-core"));

    let controller = CheckoutController::new();
    controller.set_name("Ada Lovelace");
    controller.set_email("ada@example.com");
    controller.set_password("hunter22");
    controller.set_confirm_password("hunter22");
    controller.set_agreed_to_terms(true);

    let submitter = Arc::new(GatedSubmitter::new());
    let in_flight = tokio::spawn({
        let controller = controller.clone();
        let selection = selection.clone();
        let submitter = Arc::clone(&submitter);
        async move {
            controller.submit(&selection, submitter.as_ref()).await;
        }
    });

    while controller.status() != SubmissionStatus::Submitting {
        tokio::task::yield_now().await;
    }

    // Edit-dismissal only applies to display states, never to Submitting
    controller.set_email("edited@example.com");
    assert_eq!(controller.status(), SubmissionStatus::Submitting);

    submitter.release();
    in_flight.await.expect("in-flight submit task completes");
    assert_eq!(controller.status(), SubmissionStatus::Success);
}
