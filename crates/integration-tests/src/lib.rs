//! Integration tests for Alphafolio.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p alphafolio-integration-tests
//! ```
//!
//! This crate holds shared fixtures: the sample catalog shipped in
//! `content/catalog.json` and fake [`Submitter`] implementations used by the
//! scenario tests in `tests/`.

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

use tokio::sync::Notify;

use alphafolio_core::{PlanId, ProductId};
use alphafolio_engine::catalog::Catalog;
use alphafolio_engine::checkout::{SubmitError, Submitter};
use alphafolio_engine::form::AccountFormData;

/// Load the sample catalog shipped with the repository.
///
/// # Panics
///
/// Panics if the sample catalog file is missing or invalid; tests depend on
/// it being well-formed.
#[must_use]
pub fn sample_catalog() -> Catalog {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../content/catalog.json");
    Catalog::load(&path).expect("sample catalog should load")
}

/// A submitter that records its invocations and resolves immediately.
#[derive(Default)]
pub struct RecordingSubmitter {
    calls: AtomicUsize,
    failure: Option<SubmitError>,
}

impl RecordingSubmitter {
    /// A submitter that always succeeds.
    #[must_use]
    pub fn succeeding() -> Self {
        Self::default()
    }

    /// A submitter that always fails with the given error.
    #[must_use]
    pub fn failing(error: SubmitError) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            failure: Some(error),
        }
    }

    /// Number of times `submit` has been invoked.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Submitter for RecordingSubmitter {
    async fn submit(
        &self,
        _form: &AccountFormData,
        _product_id: &ProductId,
        _plan_id: &PlanId,
    ) -> Result<(), SubmitError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.failure {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }
}

/// A submitter that blocks until released, for exercising the in-flight
/// guard.
#[derive(Default)]
pub struct GatedSubmitter {
    gate: Notify,
    calls: AtomicUsize,
}

impl GatedSubmitter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of times `submit` has been invoked.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Allow one in-flight `submit` call to complete.
    pub fn release(&self) {
        self.gate.notify_one();
    }
}

impl Submitter for GatedSubmitter {
    async fn submit(
        &self,
        _form: &AccountFormData,
        _product_id: &ProductId,
        _plan_id: &PlanId,
    ) -> Result<(), SubmitError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.gate.notified().await;
        Ok(())
    }
}
