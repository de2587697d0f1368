//! # Repository Traits
//!
//! Port definitions for persistence abstraction.
//!
//! This module defines the repository traits (ports) the application
//! services are constructed against. Implementations can use different
//! backends; the crate ships in-memory implementations suitable for tests
//! and for embedding.
//!
//! # Available Ports
//!
//! - [`BookingRepository`]: persistence for the booking aggregate, with
//!   optimistic versioning
//! - [`ProviderCatalog`]: the provider store and its single eligibility
//!   query contract

use crate::domain::entities::booking::TransportBooking;
use crate::domain::entities::provider::TransportProvider;
use crate::domain::value_objects::{BookingId, CountryCode, PartyId, ProviderId, VehicleType};
use async_trait::async_trait;
use std::fmt;
use thiserror::Error;

/// Error type for repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Entity not found.
    #[error("entity not found: {entity_type} with id {id}")]
    NotFound {
        /// Type of entity.
        entity_type: &'static str,
        /// Entity identifier.
        id: String,
    },

    /// Optimistic locking conflict: another writer got there first.
    #[error("version conflict: {entity_type} with id {id} expected v{expected}, got v{actual}")]
    VersionConflict {
        /// Type of entity.
        entity_type: &'static str,
        /// Entity identifier.
        id: String,
        /// Version the store would have accepted.
        expected: u64,
        /// Version actually submitted.
        actual: u64,
    },

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Internal error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl RepositoryError {
    /// Creates a not found error.
    #[must_use]
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    /// Creates a version conflict error.
    #[must_use]
    pub fn version_conflict(
        entity_type: &'static str,
        id: impl Into<String>,
        expected: u64,
        actual: u64,
    ) -> Self {
        Self::VersionConflict {
            entity_type,
            id: id.into(),
            expected,
            actual,
        }
    }

    /// Creates a serialization error.
    #[must_use]
    pub fn serialization(msg: impl Into<String>) -> Self {
        Self::Serialization(msg.into())
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Returns true if this is a not found error.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Returns true if this is a version conflict error.
    #[must_use]
    pub fn is_version_conflict(&self) -> bool {
        matches!(self, Self::VersionConflict { .. })
    }
}

/// Result type for repository operations.
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Eligibility query against the provider catalog: one route, one
/// vehicle type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteQuery {
    /// Origin country.
    pub from: CountryCode,
    /// Destination country.
    pub to: CountryCode,
    /// Vehicle body class.
    pub vehicle_type: VehicleType,
}

impl RouteQuery {
    /// Creates a route query.
    #[must_use]
    pub fn new(from: CountryCode, to: CountryCode, vehicle_type: VehicleType) -> Self {
        Self {
            from,
            to,
            vehicle_type,
        }
    }
}

/// Repository for the booking aggregate.
///
/// The booking is the unit of consistency: [`save`](Self::save) must
/// reject stale writes via the aggregate's version so concurrent callers
/// cannot silently drop each other's ledger entries. Terminal states are
/// the logical deletion; no physical delete is exposed.
#[async_trait]
pub trait BookingRepository: Send + Sync + fmt::Debug {
    /// Persists a booking.
    ///
    /// A new booking must arrive at version 1; an update must arrive at
    /// exactly the stored version plus one (the aggregate bumps its
    /// version on every operation).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::VersionConflict` if the submitted version
    /// does not line up with the stored one.
    async fn save(&self, booking: &TransportBooking) -> RepositoryResult<()>;

    /// Gets a booking by ID.
    ///
    /// Returns `None` if the booking does not exist.
    async fn get(&self, id: &BookingId) -> RepositoryResult<Option<TransportBooking>>;

    /// Finds all bookings for a buyer.
    async fn find_by_buyer(&self, buyer_id: &PartyId) -> RepositoryResult<Vec<TransportBooking>>;

    /// Finds all bookings that have not reached a terminal state.
    async fn find_active(&self) -> RepositoryResult<Vec<TransportBooking>>;

    /// Counts all bookings.
    async fn count(&self) -> RepositoryResult<u64>;
}

/// The provider catalog: provider storage plus the single eligibility
/// query the quote engine runs.
#[async_trait]
pub trait ProviderCatalog: Send + Sync + fmt::Debug {
    /// Saves a provider (insert or replace).
    async fn save(&self, provider: &TransportProvider) -> RepositoryResult<()>;

    /// Gets a provider by ID.
    ///
    /// Returns `None` if the provider does not exist.
    async fn get(&self, id: &ProviderId) -> RepositoryResult<Option<TransportProvider>>;

    /// Finds providers eligible for the route: active, operating in both
    /// countries, holding a base rate for the exact (from, to, vehicle
    /// type) tuple.
    ///
    /// The result is ordered preferred-first, then by average rating
    /// descending, then by provider ID — stable for a given catalog
    /// snapshot.
    async fn find_eligible(&self, query: &RouteQuery) -> RepositoryResult<Vec<TransportProvider>>;

    /// Counts all providers.
    async fn count(&self) -> RepositoryResult<u64>;
}
