//! # Currency and Money
//!
//! Validated ISO 4217 currency codes and a decimal money type.
//!
//! All prices in the engine are [`Money`] values: a `rust_decimal` amount
//! paired with its currency. Arithmetic is checked and refuses to combine
//! amounts in different currencies; rounding to quote precision (two
//! decimal places) is explicit via [`Money::rounded`].
//!
//! # Examples
//!
//! ```
//! use autohaul::domain::value_objects::currency::{CurrencyCode, Money};
//! use rust_decimal::Decimal;
//!
//! let eur = CurrencyCode::new("eur").unwrap();
//! let price = Money::new(Decimal::new(5499, 1), eur); // 549.9 EUR
//! assert_eq!(price.rounded().amount(), Decimal::new(54990, 2));
//! ```

use crate::domain::errors::{DomainError, DomainResult};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;

/// An ISO 4217 alpha-3 currency code, uppercase-normalized.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CurrencyCode(String);

impl CurrencyCode {
    /// Creates a validated currency code.
    ///
    /// The input is trimmed and uppercased. Exactly three ASCII letters are
    /// accepted.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidCurrencyCode` if the input is not three
    /// ASCII letters.
    pub fn new(code: impl AsRef<str>) -> DomainResult<Self> {
        let trimmed = code.as_ref().trim();
        if trimmed.len() != 3 || !trimmed.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(DomainError::InvalidCurrencyCode(trimmed.to_string()));
        }
        Ok(Self(trimmed.to_ascii_uppercase()))
    }

    /// Creates a code from a compile-time-known literal, skipping validation.
    ///
    /// Used for crate-internal defaults; callers go through [`Self::new`].
    pub(crate) fn known(code: &'static str) -> Self {
        debug_assert!(code.len() == 3 && code.chars().all(|c| c.is_ascii_uppercase()));
        Self(code.to_string())
    }

    /// Returns the code as a string slice.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for CurrencyCode {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<CurrencyCode> for String {
    fn from(code: CurrencyCode) -> Self {
        code.0
    }
}

/// Number of decimal places carried by quoted prices.
pub const QUOTE_PRECISION: u32 = 2;

/// A monetary amount in a specific currency.
///
/// # Invariants
///
/// - Arithmetic never mixes currencies; mismatches are
///   `DomainError::CurrencyMismatch`.
/// - Amounts are arbitrary-precision decimals; callers round explicitly
///   when a value becomes customer-facing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Money {
    amount: Decimal,
    currency: CurrencyCode,
}

impl Money {
    /// Creates a monetary amount.
    #[must_use]
    pub fn new(amount: Decimal, currency: CurrencyCode) -> Self {
        Self { amount, currency }
    }

    /// Creates a zero amount in the given currency.
    #[must_use]
    pub fn zero(currency: CurrencyCode) -> Self {
        Self {
            amount: Decimal::ZERO,
            currency,
        }
    }

    /// Returns the amount.
    #[inline]
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.amount
    }

    /// Returns the currency.
    #[inline]
    #[must_use]
    pub const fn currency(&self) -> &CurrencyCode {
        &self.currency
    }

    /// Returns true if the amount is strictly positive.
    #[inline]
    #[must_use]
    pub fn is_positive(&self) -> bool {
        self.amount > Decimal::ZERO
    }

    /// Adds another amount in the same currency.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::CurrencyMismatch` for differing currencies and
    /// `DomainError::ArithmeticOverflow` if the sum overflows.
    pub fn checked_add(&self, other: &Self) -> DomainResult<Self> {
        if self.currency != other.currency {
            return Err(DomainError::CurrencyMismatch {
                expected: self.currency.clone(),
                actual: other.currency.clone(),
            });
        }
        let amount = self
            .amount
            .checked_add(other.amount)
            .ok_or(DomainError::ArithmeticOverflow("money addition"))?;
        Ok(Self::new(amount, self.currency.clone()))
    }

    /// Multiplies the amount by a scalar factor.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::ArithmeticOverflow` if the product overflows.
    pub fn checked_mul(&self, factor: Decimal) -> DomainResult<Self> {
        let amount = self
            .amount
            .checked_mul(factor)
            .ok_or(DomainError::ArithmeticOverflow("money multiplication"))?;
        Ok(Self::new(amount, self.currency.clone()))
    }

    /// Returns the amount rounded to quote precision, midpoint away from
    /// zero (commercial rounding).
    #[must_use]
    pub fn rounded(&self) -> Self {
        Self::new(
            self.amount
                .round_dp_with_strategy(QUOTE_PRECISION, RoundingStrategy::MidpointAwayFromZero),
            self.currency.clone(),
        )
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.amount, self.currency)
    }
}
