//! Plan selection state for the subscribe page.
//!
//! Tracks which product and which plan within that product a visitor has
//! currently chosen, and derives the display values (total price, per-month
//! rate, savings) from the shared [`Catalog`].
//!
//! Invariants:
//! - A selected product always exists in the catalog and has at least one
//!   plan; zero-plan "coming soon" products can never become selected.
//! - A selected plan always belongs to the selected product.
//! - Whenever the selected product changes, the plan resets to that
//!   product's first plan by insertion order.
//!
//! Invalid selections are silently rejected: the mutation is a no-op and the
//! prior state is retained. Reads are pure and never mutate.

use alphafolio_core::{PlanId, ProductId};

use crate::catalog::{Catalog, Plan, Product};

/// The (product, plan) pair a visitor has currently chosen.
#[derive(Debug, Clone)]
pub struct SelectionState {
    catalog: Catalog,
    product_id: Option<ProductId>,
    plan_id: Option<PlanId>,
}

/// Derived display bundle for the current selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionSummary {
    pub product_name: String,
    pub duration_label: String,
    /// Full-duration price, e.g. `"$2999.00"`.
    pub price_label: String,
    /// Effective per-month rate, e.g. `"$249.92/mo"`.
    pub monthly_label: String,
    pub savings_label: Option<String>,
}

impl SelectionState {
    /// Create an empty selection over a shared catalog handle.
    #[must_use]
    pub const fn new(catalog: Catalog) -> Self {
        Self {
            catalog,
            product_id: None,
            plan_id: None,
        }
    }

    /// The catalog this selection reads from.
    #[must_use]
    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Currently selected product id, if any.
    #[must_use]
    pub const fn selected_product_id(&self) -> Option<&ProductId> {
        self.product_id.as_ref()
    }

    /// Currently selected plan id, if any.
    #[must_use]
    pub const fn selected_plan_id(&self) -> Option<&PlanId> {
        self.plan_id.as_ref()
    }

    /// Select a product and default its plan to the first by insertion
    /// order.
    ///
    /// A no-op when the product does not exist or has no plans (a "coming
    /// soon" card). Returns whether the selection was applied.
    pub fn select_product(&mut self, product_id: &ProductId) -> bool {
        let Some(product) = self.catalog.find_product(product_id) else {
            tracing::debug!(product = %product_id, "Ignoring selection of unknown product");
            return false;
        };

        let Some(default_plan) = product.default_plan() else {
            tracing::debug!(product = %product_id, "Ignoring selection of product with no plans");
            return false;
        };

        self.plan_id = Some(default_plan.id.clone());
        self.product_id = Some(product_id.clone());
        true
    }

    /// Select a plan within the currently selected product.
    ///
    /// A no-op when no product is selected or the plan does not belong to
    /// the selected product. Returns whether the selection was applied.
    pub fn select_plan(&mut self, plan_id: &PlanId) -> bool {
        let Some(product_id) = &self.product_id else {
            tracing::debug!(plan = %plan_id, "Ignoring plan selection with no product selected");
            return false;
        };

        if self.catalog.find_plan(product_id, plan_id).is_none() {
            tracing::debug!(
                product = %product_id,
                plan = %plan_id,
                "Ignoring selection of plan outside the selected product"
            );
            return false;
        }

        self.plan_id = Some(plan_id.clone());
        true
    }

    /// Resolve the selected (product, plan) pair.
    ///
    /// Returns `None` if either id is unset or, defensively, no longer
    /// resolves against the catalog.
    #[must_use]
    pub fn selected_details(&self) -> Option<(&Product, &Plan)> {
        let product_id = self.product_id.as_ref()?;
        let plan_id = self.plan_id.as_ref()?;

        let product = self.catalog.find_product(product_id)?;
        let plan = product.find_plan(plan_id)?;
        Some((product, plan))
    }

    /// Whether a complete (product, plan) pair is selected and resolves.
    ///
    /// This is the single source of truth for whether checkout may proceed.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.selected_details().is_some()
    }

    /// Derived display values for the current selection.
    #[must_use]
    pub fn summary(&self) -> Option<SelectionSummary> {
        let (product, plan) = self.selected_details()?;
        Some(SelectionSummary {
            product_name: product.name.clone(),
            duration_label: plan.duration_label.clone(),
            price_label: plan.price_label(),
            monthly_label: format!("{}/mo", plan.monthly_rate().display()),
            savings_label: plan.savings_label.clone(),
        })
    }
}
