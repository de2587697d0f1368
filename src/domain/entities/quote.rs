//! # Transport Quote Entity
//!
//! Represents a priced transport offer from one provider.
//!
//! Quotes are produced in batches by the quote engine; each carries the
//! converted, rounded price, the default lead-time estimate, the
//! provider's insurance options, the fixed add-on service catalog, and a
//! validity window after which it should no longer be honored.
//!
//! # Examples
//!
//! ```
//! use autohaul::domain::entities::quote::TransportQuote;
//! use autohaul::domain::value_objects::{CurrencyCode, Money, Timestamp};
//! use rust_decimal::Decimal;
//!
//! let quote = TransportQuote::new(
//!     "prov-1",
//!     "Adria Motors Logistics",
//!     Money::new(Decimal::new(55000, 2), CurrencyCode::new("EUR").unwrap()),
//!     7,
//!     Timestamp::now().add_days(7),
//! );
//!
//! assert!(!quote.is_expired());
//! assert_eq!(quote.estimated_days(), 7);
//! ```

use crate::domain::entities::provider::InsuranceOption;
use crate::domain::value_objects::{Money, ProviderId, ServiceKind, Timestamp};
use serde::{Deserialize, Serialize};
use std::fmt;

/// An optional add-on service offered with a quote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdditionalService {
    /// Which service is offered.
    pub kind: ServiceKind,
    /// Price of the service in the quote's requested currency.
    pub price: Money,
}

impl AdditionalService {
    /// Creates an add-on service offer.
    #[must_use]
    pub fn new(kind: ServiceKind, price: Money) -> Self {
        Self { kind, price }
    }
}

/// A priced transport offer from one provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransportQuote {
    /// The quoting provider.
    provider_id: ProviderId,
    /// The provider's display name.
    provider_name: String,
    /// Final price after fees, surcharges, conversion, and rounding.
    price: Money,
    /// Default lead-time estimate in days.
    estimated_days: u32,
    /// The provider's insurance options, passed through unchanged.
    insurance_options: Vec<InsuranceOption>,
    /// Fixed catalog of optional add-on services.
    additional_services: Vec<AdditionalService>,
    /// When the quote stops being honored.
    valid_until: Timestamp,
}

impl TransportQuote {
    /// Creates a quote without insurance options or add-on services.
    #[must_use]
    pub fn new(
        provider_id: impl Into<ProviderId>,
        provider_name: impl Into<String>,
        price: Money,
        estimated_days: u32,
        valid_until: Timestamp,
    ) -> Self {
        Self {
            provider_id: provider_id.into(),
            provider_name: provider_name.into(),
            price,
            estimated_days,
            insurance_options: Vec::new(),
            additional_services: Vec::new(),
            valid_until,
        }
    }

    /// Attaches the provider's insurance options.
    #[must_use]
    pub fn with_insurance_options(mut self, options: Vec<InsuranceOption>) -> Self {
        self.insurance_options = options;
        self
    }

    /// Attaches the add-on service catalog.
    #[must_use]
    pub fn with_additional_services(mut self, services: Vec<AdditionalService>) -> Self {
        self.additional_services = services;
        self
    }

    /// Returns the quoting provider.
    #[inline]
    #[must_use]
    pub fn provider_id(&self) -> &ProviderId {
        &self.provider_id
    }

    /// Returns the provider's display name.
    #[inline]
    #[must_use]
    pub fn provider_name(&self) -> &str {
        &self.provider_name
    }

    /// Returns the final price.
    #[inline]
    #[must_use]
    pub fn price(&self) -> &Money {
        &self.price
    }

    /// Returns the lead-time estimate in days.
    #[inline]
    #[must_use]
    pub fn estimated_days(&self) -> u32 {
        self.estimated_days
    }

    /// Returns the insurance options.
    #[inline]
    #[must_use]
    pub fn insurance_options(&self) -> &[InsuranceOption] {
        &self.insurance_options
    }

    /// Returns the add-on services.
    #[inline]
    #[must_use]
    pub fn additional_services(&self) -> &[AdditionalService] {
        &self.additional_services
    }

    /// Returns the end of the validity window.
    #[inline]
    #[must_use]
    pub fn valid_until(&self) -> Timestamp {
        self.valid_until
    }

    /// Returns true if the validity window has passed.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.valid_until.is_expired()
    }
}

impl fmt::Display for TransportQuote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Quote[{}] {} price={} days={}",
            self.provider_id, self.provider_name, self.price, self.estimated_days
        )
    }
}
