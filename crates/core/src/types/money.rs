//! Minor-unit money representation using decimal arithmetic for display.
//!
//! Amounts are stored as non-negative integers in the smallest currency unit
//! (cents for USD) to avoid floating-point error. `rust_decimal` is used only
//! at the display/derivation boundary (formatting, per-period rates).

use core::fmt;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

/// Errors that can occur when constructing a [`Money`] value.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum MoneyError {
    /// The amount is negative.
    #[error("money amount cannot be negative (got {0})")]
    NegativeAmount(i64),
}

/// A monetary amount in minor currency units.
///
/// ## Constraints
///
/// - `minor_units` is non-negative (enforced at construction and
///   deserialization; there is no unchecked path)
/// - All supported currencies use two decimal places
///
/// ## Examples
///
/// ```
/// use alphafolio_core::{CurrencyCode, Money};
///
/// let price = Money::new(99_900, CurrencyCode::USD).unwrap();
/// assert_eq!(price.display(), "$999.00");
/// assert!(Money::new(-1, CurrencyCode::USD).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawMoney", into = "RawMoney")]
pub struct Money {
    minor_units: i64,
    currency: CurrencyCode,
}

/// Wire form of [`Money`], used to enforce the non-negative invariant on
/// deserialization.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct RawMoney {
    amount: i64,
    #[serde(default)]
    currency: CurrencyCode,
}

impl TryFrom<RawMoney> for Money {
    type Error = MoneyError;

    fn try_from(raw: RawMoney) -> Result<Self, Self::Error> {
        Self::new(raw.amount, raw.currency)
    }
}

impl From<Money> for RawMoney {
    fn from(money: Money) -> Self {
        Self {
            amount: money.minor_units,
            currency: money.currency,
        }
    }
}

impl Money {
    /// Create a new amount from minor currency units.
    ///
    /// # Errors
    ///
    /// Returns [`MoneyError::NegativeAmount`] if `minor_units` is negative.
    pub const fn new(minor_units: i64, currency: CurrencyCode) -> Result<Self, MoneyError> {
        if minor_units < 0 {
            return Err(MoneyError::NegativeAmount(minor_units));
        }
        Ok(Self {
            minor_units,
            currency,
        })
    }

    /// A zero amount in the given currency.
    #[must_use]
    pub const fn zero(currency: CurrencyCode) -> Self {
        Self {
            minor_units: 0,
            currency,
        }
    }

    /// The amount in minor currency units.
    #[must_use]
    pub const fn minor_units(&self) -> i64 {
        self.minor_units
    }

    /// The currency of this amount.
    #[must_use]
    pub const fn currency(&self) -> CurrencyCode {
        self.currency
    }

    /// The amount in standard units as a decimal (e.g. `999.00`).
    #[must_use]
    pub fn to_decimal(&self) -> Decimal {
        Decimal::new(self.minor_units, 2)
    }

    /// Divide the amount evenly over `periods`, rounding half away from zero
    /// to whole minor units.
    ///
    /// Returns `None` when `periods` is zero.
    #[must_use]
    pub fn per_period(&self, periods: u32) -> Option<Self> {
        if periods == 0 {
            return None;
        }

        let rate = Decimal::from(self.minor_units) / Decimal::from(periods);
        let rounded = rate.round_dp_with_strategy(
            0,
            rust_decimal::RoundingStrategy::MidpointAwayFromZero,
        );

        // Rounding a non-negative i64 quotient always fits back into i64.
        let minor_units = rounded.to_i64()?;
        Some(Self {
            minor_units,
            currency: self.currency,
        })
    }

    /// Format for display (e.g. `"$999.00"`).
    #[must_use]
    pub fn display(&self) -> String {
        format!("{}{:.2}", self.currency.symbol(), self.to_decimal())
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

/// ISO 4217 currency codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    USD,
    EUR,
    GBP,
    CAD,
    AUD,
}

impl CurrencyCode {
    /// The display symbol for this currency.
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::USD | Self::CAD | Self::AUD => "$",
            Self::EUR => "\u{20ac}",
            Self::GBP => "\u{a3}",
        }
    }

    /// The ISO 4217 code for this currency.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::USD => "USD",
            Self::EUR => "EUR",
            Self::GBP => "GBP",
            Self::CAD => "CAD",
            Self::AUD => "AUD",
        }
    }
}
