//! The sellable catalog: portfolios and their subscription plans.
//!
//! The catalog is loaded once at startup from a JSON file, validated, and
//! immutable thereafter. It is held behind an `Arc` so that selection state
//! and any number of presentation handles share one copy that cannot drift.
//!
//! A portfolio with zero plans is a valid "coming soon" entry: it renders,
//! but it can never be selected.

use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use alphafolio_core::{Money, PlanId, ProductId};

/// Errors that can occur when loading or validating a [`Catalog`].
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("IO error: {0}")]
    Io(String),
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("duplicate product id: {0}")]
    DuplicateProduct(ProductId),
    #[error("duplicate plan id {plan} in product {product}")]
    DuplicatePlan { product: ProductId, plan: PlanId },
    #[error("product {0} has more than one best-value plan")]
    MultipleBestValue(ProductId),
    #[error("plan {plan} in product {product} has a zero-month duration")]
    ZeroDuration { product: ProductId, plan: PlanId },
}

/// A specific duration/price combination under a [`Product`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Plan {
    /// Identifier, unique within the parent product.
    pub id: PlanId,
    /// Human-readable term, e.g. "3 Months".
    pub duration_label: String,
    /// Term length in months, used to derive the per-month rate.
    pub duration_months: u32,
    /// Total price for the full duration, in minor currency units.
    pub price_total: Money,
    /// At most one plan per product carries this flag.
    #[serde(default)]
    pub is_best_value: bool,
    /// Display string such as "Save 25%", only meaningful on the
    /// best-value plan.
    #[serde(default)]
    pub savings_label: Option<String>,
}

impl Plan {
    /// Display string for the full-duration price, e.g. `"$999.00"`.
    #[must_use]
    pub fn price_label(&self) -> String {
        self.price_total.display()
    }

    /// The effective per-month rate, rounded to whole minor units.
    ///
    /// Returns the total price unchanged if the duration is zero months,
    /// which [`Catalog::new`] rejects at load time.
    #[must_use]
    pub fn monthly_rate(&self) -> Money {
        self.price_total
            .per_period(self.duration_months)
            .unwrap_or(self.price_total)
    }
}

/// A sellable portfolio offering with zero or more plans.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    /// Identifier, unique within the catalog.
    pub id: ProductId,
    /// Display name, e.g. "10x Alphas".
    pub name: String,
    /// Marketing description.
    pub description: String,
    /// Plans in display order; insertion order is the default order.
    #[serde(default)]
    pub plans: Vec<Plan>,
    /// Opaque styling hint for the presentation layer. Engine logic never
    /// branches on it.
    #[serde(default)]
    pub theme: String,
}

impl Product {
    /// Whether this product can be selected (has at least one plan).
    #[must_use]
    pub fn is_selectable(&self) -> bool {
        !self.plans.is_empty()
    }

    /// The default plan: first by insertion order, not lowest-price or
    /// best-value.
    #[must_use]
    pub fn default_plan(&self) -> Option<&Plan> {
        self.plans.first()
    }

    /// Find a plan of this product by id.
    #[must_use]
    pub fn find_plan(&self, plan_id: &PlanId) -> Option<&Plan> {
        self.plans.iter().find(|plan| &plan.id == plan_id)
    }
}

/// Wire form of the catalog file.
#[derive(Debug, Deserialize)]
struct CatalogFile {
    products: Vec<Product>,
}

/// The immutable set of sellable products.
///
/// Cheaply cloneable; all clones share the same underlying product list.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Arc<Vec<Product>>,
}

impl Catalog {
    /// Build a catalog from an ordered product list, validating structural
    /// invariants.
    ///
    /// # Errors
    ///
    /// Returns an error on duplicate product ids, duplicate plan ids within
    /// a product, more than one best-value plan per product, or a plan with
    /// a zero-month duration.
    pub fn new(products: Vec<Product>) -> Result<Self, CatalogError> {
        for (index, product) in products.iter().enumerate() {
            if products
                .iter()
                .take(index)
                .any(|earlier| earlier.id == product.id)
            {
                return Err(CatalogError::DuplicateProduct(product.id.clone()));
            }

            validate_plans(product)?;

            if product.plans.is_empty() {
                tracing::info!(product = %product.id, "Catalog product has no plans (coming soon)");
            }
        }

        Ok(Self {
            products: Arc::new(products),
        })
    }

    /// Load and validate a catalog from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if
    /// validation fails.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let raw = std::fs::read_to_string(path).map_err(|e| CatalogError::Io(e.to_string()))?;
        let file: CatalogFile =
            serde_json::from_str(&raw).map_err(|e| CatalogError::Parse(e.to_string()))?;

        let catalog = Self::new(file.products)?;
        tracing::info!(
            path = %path.display(),
            products = catalog.products.len(),
            "Loaded catalog"
        );
        Ok(catalog)
    }

    /// All products in display order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Find a product by id. Not-found is a normal return, not an error.
    #[must_use]
    pub fn find_product(&self, product_id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|product| &product.id == product_id)
    }

    /// Find a plan by product and plan id.
    #[must_use]
    pub fn find_plan(&self, product_id: &ProductId, plan_id: &PlanId) -> Option<&Plan> {
        self.find_product(product_id)
            .and_then(|product| product.find_plan(plan_id))
    }
}

/// Validate the per-product plan invariants.
fn validate_plans(product: &Product) -> Result<(), CatalogError> {
    for (index, plan) in product.plans.iter().enumerate() {
        if product
            .plans
            .iter()
            .take(index)
            .any(|earlier| earlier.id == plan.id)
        {
            return Err(CatalogError::DuplicatePlan {
                product: product.id.clone(),
                plan: plan.id.clone(),
            });
        }

        if plan.duration_months == 0 {
            return Err(CatalogError::ZeroDuration {
                product: product.id.clone(),
                plan: plan.id.clone(),
            });
        }
    }

    let best_value_count = product.plans.iter().filter(|plan| plan.is_best_value).count();
    if best_value_count > 1 {
        return Err(CatalogError::MultipleBestValue(product.id.clone()));
    }

    Ok(())
}
