//! End-to-end subscribe-page scenarios.
//!
//! These tests drive the engine the way the subscribe page does: load the
//! shipped catalog, browse and select a portfolio plan, fill the account
//! form, and submit against a fake backend.

use alphafolio_core::{PlanId, ProductId};
use alphafolio_engine::checkout::{
    CheckoutController, SubmissionError, SubmissionStatus, SubmitError,
};
use alphafolio_engine::selection::SelectionState;
use alphafolio_integration_tests::{RecordingSubmitter, sample_catalog};

fn fill_valid_form(controller: &CheckoutController) {
    controller.set_name("Ada Lovelace");
    controller.set_email("ada@example.com");
    controller.set_password("hunter22");
    controller.set_confirm_password("hunter22");
    controller.set_agreed_to_terms(true);
}

// =============================================================================
// Catalog and Selection
// =============================================================================

#[test]
fn test_shipped_catalog_loads_in_display_order() {
    let catalog = sample_catalog();
    let ids: Vec<&str> = catalog
        .products()
        .iter()
        .map(|product| product.id.as_str())
        .collect();
    assert_eq!(ids, ["10x-alphas", "blue-chip-core", "defi-yield"]);
}

#[test]
fn test_selecting_a_product_defaults_to_its_first_plan() {
    let mut selection = SelectionState::new(sample_catalog());
    assert!(selection.select_product(&ProductId::new("10x-alphas")));

    // First in the list, not the best-value 12-month plan
    let (product, plan) = selection.selected_details().expect("selection resolves");
    assert_eq!(product.id, "10x-alphas");
    assert_eq!(plan.id, "10x-3m");
    assert_eq!(plan.price_total.minor_units(), 99_900);
    assert!(!plan.is_best_value);
}

#[test]
fn test_coming_soon_product_is_never_selectable() {
    let mut selection = SelectionState::new(sample_catalog());
    selection.select_product(&ProductId::new("blue-chip-core"));

    assert!(!selection.select_product(&ProductId::new("defi-yield")));
    assert_eq!(
        selection.selected_product_id().expect("prior selection kept"),
        &ProductId::new("blue-chip-core")
    );
    assert!(selection.is_complete());
}

// =============================================================================
// Checkout Scenarios
// =============================================================================

#[tokio::test]
async fn test_successful_submit_clears_form_but_keeps_selection() {
    let mut selection = SelectionState::new(sample_catalog());
    selection.select_product(&ProductId::new("10x-alphas"));
    selection.select_plan(&PlanId::new("10x-12m"));

    let controller = CheckoutController::new();
    fill_valid_form(&controller);
    assert_eq!(controller.status(), SubmissionStatus::Idle);

    let submitter = RecordingSubmitter::succeeding();
    controller.submit(&selection, &submitter).await;

    assert_eq!(submitter.calls(), 1);
    assert_eq!(controller.status(), SubmissionStatus::Success);

    // Identity and credential fields are cleared; the plan choice persists
    assert_eq!(controller.form().email, "");
    assert_eq!(controller.form().password, "");
    assert_eq!(
        selection.selected_plan_id().expect("selection untouched"),
        &PlanId::new("10x-12m")
    );
}

#[tokio::test]
async fn test_submit_without_a_selection_never_calls_the_backend() {
    let selection = SelectionState::new(sample_catalog());

    let controller = CheckoutController::new();
    fill_valid_form(&controller);

    let submitter = RecordingSubmitter::succeeding();
    controller.submit(&selection, &submitter).await;

    assert_eq!(submitter.calls(), 0);
    assert_eq!(
        controller.status(),
        SubmissionStatus::Error(SubmissionError::NoPlanSelected)
    );
}

#[tokio::test]
async fn test_failed_submit_preserves_input_for_retry() {
    let mut selection = SelectionState::new(sample_catalog());
    selection.select_product(&ProductId::new("blue-chip-core"));

    let controller = CheckoutController::new();
    fill_valid_form(&controller);

    let failing = RecordingSubmitter::failing(SubmitError::Unreachable);
    controller.submit(&selection, &failing).await;

    assert_eq!(failing.calls(), 1);
    assert!(matches!(
        controller.status(),
        SubmissionStatus::Error(SubmissionError::SubmissionFailed(_))
    ));
    assert_eq!(controller.form().email, "ada@example.com");

    // Retry without re-typing anything
    let succeeding = RecordingSubmitter::succeeding();
    controller.submit(&selection, &succeeding).await;
    assert_eq!(succeeding.calls(), 1);
    assert_eq!(controller.status(), SubmissionStatus::Success);
}

#[tokio::test]
async fn test_full_visitor_journey() {
    let catalog = sample_catalog();
    let mut selection = SelectionState::new(catalog);
    let controller = CheckoutController::new();

    // Browse: tapping the coming-soon card does nothing
    assert!(!selection.select_product(&ProductId::new("defi-yield")));
    assert!(selection.summary().is_none());

    // Pick a portfolio, then upgrade to the best-value plan
    selection.select_product(&ProductId::new("10x-alphas"));
    selection.select_plan(&PlanId::new("10x-12m"));
    let summary = selection.summary().expect("summary resolves");
    assert_eq!(summary.product_name, "10x Alphas");
    assert_eq!(summary.price_label, "$2999.00");
    assert_eq!(summary.savings_label.as_deref(), Some("Save 25%"));

    // A premature submit surfaces every form problem at once
    controller.set_email("bad");
    controller.submit(&selection, &RecordingSubmitter::succeeding()).await;
    assert!(controller.field_errors().len() >= 3);

    // Fixing a field dismisses the error display
    fill_valid_form(&controller);
    assert_eq!(controller.status(), SubmissionStatus::Idle);

    let submitter = RecordingSubmitter::succeeding();
    controller.submit(&selection, &submitter).await;
    assert_eq!(submitter.calls(), 1);
    assert_eq!(controller.status(), SubmissionStatus::Success);
}
