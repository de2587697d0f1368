//! # Autohaul
//!
//! Cross-border vehicle transport quoting and booking engine for auction
//! marketplaces.
//!
//! The crate is a library-level service boundary with no wire protocol of
//! its own: it resolves eligible logistics providers for a route, prices
//! each one across heterogeneous fee structures and currencies, and owns
//! the multi-stage booking lifecycle with its customs-clearance sub-flow
//! and append-only tracking ledger.
//!
//! # Architecture
//!
//! - [`domain`]: value objects, the booking aggregate with its enforced
//!   state machine, providers, quotes, and pure pricing rules
//! - [`application`]: the [`QuoteEngine`](application::services::QuoteEngine)
//!   and [`BookingService`](application::services::BookingService),
//!   constructor-injected over ports
//! - [`infrastructure`]: repository ports with in-memory implementations,
//!   the exchange-rate table, and the customs reference
//!
//! # Example
//!
//! ```no_run
//! use autohaul::application::services::{QuoteEngine, QuoteRequest};
//! use autohaul::domain::value_objects::{CountryCode, CurrencyCode, VehicleType};
//! use autohaul::infrastructure::customs::InMemoryCustomsReference;
//! use autohaul::infrastructure::exchange::InMemoryExchangeRates;
//! use autohaul::infrastructure::persistence::in_memory::InMemoryProviderCatalog;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let engine = QuoteEngine::with_defaults(
//!     Arc::new(InMemoryProviderCatalog::new()),
//!     Arc::new(InMemoryExchangeRates::new(CurrencyCode::new("EUR")?)),
//!     Arc::new(InMemoryCustomsReference::new()),
//! );
//!
//! let request = QuoteRequest::new(
//!     CountryCode::new("DE")?,
//!     "Berlin",
//!     CountryCode::new("RS")?,
//!     "Belgrade",
//!     VehicleType::Sedan,
//! );
//! let quotes = engine.quote(&request).await?;
//! println!("{} offers", quotes.len());
//! # Ok(())
//! # }
//! ```

pub mod application;
pub mod domain;
pub mod infrastructure;
