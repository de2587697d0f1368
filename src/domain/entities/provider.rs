//! # Transport Provider Entity
//!
//! Represents a logistics provider in the catalog.
//!
//! A provider carries its operating-country coverage, a list of
//! route/vehicle-type base rates, an **ordered** list of additional fees
//! (order matters for pricing, see
//! [`pricing`](crate::domain::services::pricing)), and the insurance
//! options it offers.
//!
//! # Examples
//!
//! ```
//! use autohaul::domain::entities::provider::{BaseRate, TransportProvider};
//! use autohaul::domain::value_objects::{CountryCode, CurrencyCode, Money, VehicleType};
//! use rust_decimal::Decimal;
//!
//! let de = CountryCode::new("DE").unwrap();
//! let rs = CountryCode::new("RS").unwrap();
//! let eur = CurrencyCode::new("EUR").unwrap();
//!
//! let provider = TransportProvider::builder("prov-1", "Adria Motors Logistics")
//!     .operating_country(de.clone())
//!     .operating_country(rs.clone())
//!     .base_rate(BaseRate::new(
//!         de.clone(),
//!         rs.clone(),
//!         VehicleType::Sedan,
//!         Money::new(Decimal::new(500, 0), eur),
//!     ))
//!     .build();
//!
//! assert!(provider.is_eligible_for(&de, &rs, VehicleType::Sedan));
//! assert!(!provider.is_eligible_for(&de, &rs, VehicleType::Truck));
//! ```

use crate::domain::value_objects::{
    CountryCode, FeeKind, Money, PriceUnit, ProviderId, VehicleType,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// A provider's price for one (origin, destination, vehicle type) tuple.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseRate {
    /// Origin country.
    pub from_country: CountryCode,
    /// Destination country.
    pub to_country: CountryCode,
    /// Vehicle body class this rate applies to.
    pub vehicle_type: VehicleType,
    /// The price in the provider's rate currency.
    pub price: Money,
    /// How the price is denominated.
    pub price_unit: PriceUnit,
    /// Optional floor applied before fee accumulation.
    pub min_price: Option<Decimal>,
}

impl BaseRate {
    /// Creates a flat base rate with no minimum.
    #[must_use]
    pub fn new(
        from_country: CountryCode,
        to_country: CountryCode,
        vehicle_type: VehicleType,
        price: Money,
    ) -> Self {
        Self {
            from_country,
            to_country,
            vehicle_type,
            price,
            price_unit: PriceUnit::Flat,
            min_price: None,
        }
    }

    /// Sets the price unit.
    #[must_use]
    pub fn with_price_unit(mut self, unit: PriceUnit) -> Self {
        self.price_unit = unit;
        self
    }

    /// Sets the minimum price floor.
    #[must_use]
    pub fn with_min_price(mut self, min: Decimal) -> Self {
        self.min_price = Some(min);
        self
    }

    /// Returns true if this rate covers the given route and vehicle type.
    #[must_use]
    pub fn matches(&self, from: &CountryCode, to: &CountryCode, vehicle_type: VehicleType) -> bool {
        &self.from_country == from && &self.to_country == to && self.vehicle_type == vehicle_type
    }
}

/// An additional fee a provider applies on top of its base rate.
///
/// Fees live in an **ordered list**: percentage fees are evaluated against
/// the running accumulated price, so reordering the list changes the
/// final quote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdditionalFee {
    /// Fee label shown in the quote breakdown.
    pub name: String,
    /// Constant amount for `Fixed`, percentage points for `Percentage`.
    pub amount: Decimal,
    /// How the fee is computed.
    pub kind: FeeKind,
}

impl AdditionalFee {
    /// Creates a fixed fee.
    #[must_use]
    pub fn fixed(name: impl Into<String>, amount: Decimal) -> Self {
        Self {
            name: name.into(),
            amount,
            kind: FeeKind::Fixed,
        }
    }

    /// Creates a percentage fee.
    #[must_use]
    pub fn percentage(name: impl Into<String>, amount: Decimal) -> Self {
        Self {
            name: name.into(),
            amount,
            kind: FeeKind::Percentage,
        }
    }
}

/// An insurance product a provider offers alongside transport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsuranceOption {
    /// Product name.
    pub name: String,
    /// Maximum covered vehicle value.
    pub coverage_limit: Decimal,
    /// Premium.
    pub price: Money,
}

impl InsuranceOption {
    /// Creates an insurance option.
    #[must_use]
    pub fn new(name: impl Into<String>, coverage_limit: Decimal, price: Money) -> Self {
        Self {
            name: name.into(),
            coverage_limit,
            price,
        }
    }
}

/// A logistics provider in the catalog.
///
/// # Invariants
///
/// - At most one base rate per (from, to, vehicle type) tuple is intended;
///   [`base_rate_for`](Self::base_rate_for) returns the first match if the
///   list carries duplicates (first-match-wins).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransportProvider {
    /// Unique identifier.
    id: ProviderId,
    /// Display name.
    name: String,
    /// Countries the provider operates in.
    operating_countries: BTreeSet<CountryCode>,
    /// Route/vehicle-type rates.
    base_rates: Vec<BaseRate>,
    /// Ordered fee list applied on top of the base rate.
    additional_fees: Vec<AdditionalFee>,
    /// Insurance products offered with transport.
    insurance_options: Vec<InsuranceOption>,
    /// Whether the provider currently accepts bookings.
    is_active: bool,
    /// Whether the provider is ranked ahead of non-preferred ones.
    is_preferred: bool,
    /// Average customer rating, 0.0 to 5.0.
    average_rating: f64,
}

impl TransportProvider {
    /// Returns a builder for constructing a provider.
    #[must_use]
    pub fn builder(id: impl Into<ProviderId>, name: impl Into<String>) -> TransportProviderBuilder {
        TransportProviderBuilder::new(id, name)
    }

    /// Returns the provider identifier.
    #[inline]
    #[must_use]
    pub fn id(&self) -> &ProviderId {
        &self.id
    }

    /// Returns the display name.
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the operating countries.
    #[inline]
    #[must_use]
    pub fn operating_countries(&self) -> &BTreeSet<CountryCode> {
        &self.operating_countries
    }

    /// Returns the base rates.
    #[inline]
    #[must_use]
    pub fn base_rates(&self) -> &[BaseRate] {
        &self.base_rates
    }

    /// Returns the ordered additional-fee list.
    #[inline]
    #[must_use]
    pub fn additional_fees(&self) -> &[AdditionalFee] {
        &self.additional_fees
    }

    /// Returns the insurance options.
    #[inline]
    #[must_use]
    pub fn insurance_options(&self) -> &[InsuranceOption] {
        &self.insurance_options
    }

    /// Returns true if the provider currently accepts bookings.
    #[inline]
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.is_active
    }

    /// Returns true if the provider is preferred.
    #[inline]
    #[must_use]
    pub fn is_preferred(&self) -> bool {
        self.is_preferred
    }

    /// Returns the average customer rating.
    #[inline]
    #[must_use]
    pub fn average_rating(&self) -> f64 {
        self.average_rating
    }

    /// Returns true if the provider operates in the given country.
    #[must_use]
    pub fn operates_in(&self, country: &CountryCode) -> bool {
        self.operating_countries.contains(country)
    }

    /// Returns the first base rate matching the exact route and vehicle
    /// type, if any (first-match-wins when duplicates exist).
    #[must_use]
    pub fn base_rate_for(
        &self,
        from: &CountryCode,
        to: &CountryCode,
        vehicle_type: VehicleType,
    ) -> Option<&BaseRate> {
        self.base_rates
            .iter()
            .find(|r| r.matches(from, to, vehicle_type))
    }

    /// Returns true if the provider qualifies to quote the given route:
    /// active, operating in both countries, and holding a matching rate.
    #[must_use]
    pub fn is_eligible_for(
        &self,
        from: &CountryCode,
        to: &CountryCode,
        vehicle_type: VehicleType,
    ) -> bool {
        self.is_active
            && self.operates_in(from)
            && self.operates_in(to)
            && self.base_rate_for(from, to, vehicle_type).is_some()
    }
}

impl fmt::Display for TransportProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Provider[{}] {} countries={} rates={} active={}",
            self.id,
            self.name,
            self.operating_countries.len(),
            self.base_rates.len(),
            self.is_active
        )
    }
}

/// Builder for [`TransportProvider`].
#[derive(Debug, Clone)]
pub struct TransportProviderBuilder {
    id: ProviderId,
    name: String,
    operating_countries: BTreeSet<CountryCode>,
    base_rates: Vec<BaseRate>,
    additional_fees: Vec<AdditionalFee>,
    insurance_options: Vec<InsuranceOption>,
    is_active: bool,
    is_preferred: bool,
    average_rating: f64,
}

impl TransportProviderBuilder {
    /// Creates a builder for an active, non-preferred, unrated provider.
    #[must_use]
    pub fn new(id: impl Into<ProviderId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            operating_countries: BTreeSet::new(),
            base_rates: Vec::new(),
            additional_fees: Vec::new(),
            insurance_options: Vec::new(),
            is_active: true,
            is_preferred: false,
            average_rating: 0.0,
        }
    }

    /// Adds an operating country.
    #[must_use]
    pub fn operating_country(mut self, country: CountryCode) -> Self {
        self.operating_countries.insert(country);
        self
    }

    /// Adds a base rate.
    #[must_use]
    pub fn base_rate(mut self, rate: BaseRate) -> Self {
        self.base_rates.push(rate);
        self
    }

    /// Appends an additional fee (order is preserved and significant).
    #[must_use]
    pub fn additional_fee(mut self, fee: AdditionalFee) -> Self {
        self.additional_fees.push(fee);
        self
    }

    /// Adds an insurance option.
    #[must_use]
    pub fn insurance_option(mut self, option: InsuranceOption) -> Self {
        self.insurance_options.push(option);
        self
    }

    /// Sets whether the provider accepts bookings.
    #[must_use]
    pub fn active(mut self, active: bool) -> Self {
        self.is_active = active;
        self
    }

    /// Marks the provider as preferred.
    #[must_use]
    pub fn preferred(mut self, preferred: bool) -> Self {
        self.is_preferred = preferred;
        self
    }

    /// Sets the average customer rating.
    #[must_use]
    pub fn rating(mut self, rating: f64) -> Self {
        self.average_rating = rating;
        self
    }

    /// Builds the provider.
    #[must_use]
    pub fn build(self) -> TransportProvider {
        TransportProvider {
            id: self.id,
            name: self.name,
            operating_countries: self.operating_countries,
            base_rates: self.base_rates,
            additional_fees: self.additional_fees,
            insurance_options: self.insurance_options,
            is_active: self.is_active,
            is_preferred: self.is_preferred,
            average_rating: self.average_rating,
        }
    }
}
