//! # Currency Exchange
//!
//! Port for the marketplace's shared exchange-rate table and an in-memory
//! implementation.
//!
//! Rate seeding and scheduled refresh belong to the surrounding
//! application; this crate only converts. The quote engine treats every
//! conversion failure as recoverable and falls back to the provider's
//! rate currency.

use crate::domain::value_objects::CurrencyCode;
use async_trait::async_trait;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;
use tokio::sync::RwLock;

/// Error type for currency conversion.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExchangeError {
    /// The currency is unknown to the rate table or inactive.
    #[error("currency not found: {0}")]
    CurrencyNotFound(CurrencyCode),

    /// The stored rate cannot be used (zero or out of range).
    #[error("invalid exchange rate for {0}")]
    InvalidRate(CurrencyCode),
}

/// Result type for currency conversion.
pub type ExchangeResult<T> = Result<T, ExchangeError>;

/// A successful conversion: the converted amount and the rate applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Conversion {
    /// The amount in the target currency, unrounded.
    pub converted_amount: Decimal,
    /// Units of target currency per unit of source currency.
    pub exchange_rate: Decimal,
}

/// Port for converting amounts between currencies.
#[async_trait]
pub trait CurrencyConverter: Send + Sync + fmt::Debug {
    /// Converts an amount between two currency codes.
    ///
    /// # Errors
    ///
    /// Returns `ExchangeError::CurrencyNotFound` when either code is
    /// unknown or inactive.
    async fn convert(
        &self,
        amount: Decimal,
        from: &CurrencyCode,
        to: &CurrencyCode,
    ) -> ExchangeResult<Conversion>;
}

/// In-memory exchange-rate table.
///
/// Rates are stored as units of each currency per one unit of the base
/// currency; cross-currency conversions go through the base. The same
/// table converting X to Y and back returns the original amount up to
/// decimal precision.
#[derive(Debug)]
pub struct InMemoryExchangeRates {
    base: CurrencyCode,
    rates: RwLock<HashMap<CurrencyCode, Decimal>>,
}

impl InMemoryExchangeRates {
    /// Creates a table with only the base currency at rate 1.
    #[must_use]
    pub fn new(base: CurrencyCode) -> Self {
        let mut rates = HashMap::new();
        rates.insert(base.clone(), Decimal::ONE);
        Self {
            base,
            rates: RwLock::new(rates),
        }
    }

    /// Adds a rate: units of `currency` per one unit of the base.
    #[must_use]
    pub fn with_rate(mut self, currency: CurrencyCode, per_base: Decimal) -> Self {
        self.rates.get_mut().insert(currency, per_base);
        self
    }

    /// Returns the base currency.
    #[inline]
    #[must_use]
    pub fn base(&self) -> &CurrencyCode {
        &self.base
    }

    /// Inserts or replaces a rate at runtime.
    pub async fn set_rate(&self, currency: CurrencyCode, per_base: Decimal) {
        self.rates.write().await.insert(currency, per_base);
    }
}

#[async_trait]
impl CurrencyConverter for InMemoryExchangeRates {
    async fn convert(
        &self,
        amount: Decimal,
        from: &CurrencyCode,
        to: &CurrencyCode,
    ) -> ExchangeResult<Conversion> {
        if from == to {
            return Ok(Conversion {
                converted_amount: amount,
                exchange_rate: Decimal::ONE,
            });
        }

        let rates = self.rates.read().await;
        let from_rate = rates
            .get(from)
            .copied()
            .ok_or_else(|| ExchangeError::CurrencyNotFound(from.clone()))?;
        let to_rate = rates
            .get(to)
            .copied()
            .ok_or_else(|| ExchangeError::CurrencyNotFound(to.clone()))?;

        if from_rate <= Decimal::ZERO {
            return Err(ExchangeError::InvalidRate(from.clone()));
        }

        let exchange_rate = to_rate
            .checked_div(from_rate)
            .ok_or_else(|| ExchangeError::InvalidRate(from.clone()))?;
        let converted_amount = amount
            .checked_mul(exchange_rate)
            .ok_or_else(|| ExchangeError::InvalidRate(to.clone()))?;

        Ok(Conversion {
            converted_amount,
            exchange_rate,
        })
    }
}
