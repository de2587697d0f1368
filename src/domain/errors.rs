//! # Domain Errors
//!
//! Error types for domain rule violations.
//!
//! These errors represent broken invariants inside the domain layer:
//! invalid value-object inputs, disallowed lifecycle transitions, and
//! precondition failures on the booking aggregate.

use crate::domain::value_objects::booking_status::BookingStatus;
use crate::domain::value_objects::currency::CurrencyCode;
use thiserror::Error;

/// Error type for domain operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// A country code failed ISO 3166-1 alpha-2 validation.
    #[error("invalid country code: {0}")]
    InvalidCountryCode(String),

    /// A currency code failed ISO 4217 alpha-3 validation.
    #[error("invalid currency code: {0}")]
    InvalidCurrencyCode(String),

    /// Two monetary amounts in different currencies were combined.
    #[error("currency mismatch: expected {expected}, got {actual}")]
    CurrencyMismatch {
        /// The currency the operation expected.
        expected: CurrencyCode,
        /// The currency actually supplied.
        actual: CurrencyCode,
    },

    /// A checked monetary computation overflowed.
    #[error("arithmetic overflow in {0}")]
    ArithmeticOverflow(&'static str),

    /// A booking status transition not allowed by the lifecycle table.
    #[error("invalid status transition: {from} -> {to}")]
    InvalidStatusTransition {
        /// The booking's current status.
        from: BookingStatus,
        /// The requested target status.
        to: BookingStatus,
    },

    /// Customs operations requested on a booking without a customs sub-flow.
    #[error("customs clearance not required")]
    CustomsNotRequired,

    /// Generic validation failure with a human-readable reason.
    #[error("validation error: {0}")]
    Validation(String),
}

impl DomainError {
    /// Creates a validation error.
    #[must_use]
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Returns true if this error is a precondition failure: the operation
    /// was well-formed but the aggregate is not in a state that permits it.
    #[must_use]
    pub fn is_precondition_failed(&self) -> bool {
        matches!(
            self,
            Self::InvalidStatusTransition { .. } | Self::CustomsNotRequired
        )
    }
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
