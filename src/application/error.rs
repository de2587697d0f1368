//! # Application Errors
//!
//! Error types for the application layer.
//!
//! These wrap the domain and repository errors behind one surface for
//! callers of the quote engine and booking service.
//!
//! # Error Taxonomy
//!
//! ```text
//! ApplicationError
//! ├── Domain(DomainError)          - precondition failures, validation
//! ├── Repository(RepositoryError)  - persistence failures, version races
//! ├── NotFound                     - referenced provider/booking missing
//! └── Validation(String)           - input validation at the service edge
//! ```
//!
//! Currency-conversion failures never appear here: the quote engine
//! absorbs them per provider and degrades to the source currency.

use crate::domain::errors::DomainError;
use crate::infrastructure::persistence::traits::RepositoryError;
use thiserror::Error;

/// Error type for application-service operations.
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// A domain rule rejected the operation.
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// The persistence layer failed.
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    /// A referenced entity does not exist.
    #[error("{entity_type} not found: {id}")]
    NotFound {
        /// Type of entity.
        entity_type: &'static str,
        /// Entity identifier.
        id: String,
    },

    /// Input validation failed at the service edge.
    #[error("validation error: {0}")]
    Validation(String),
}

impl ApplicationError {
    /// Creates a not found error.
    #[must_use]
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    /// Creates a validation error.
    #[must_use]
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Returns true if the operation failed because something referenced
    /// does not exist.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::NotFound { .. } => true,
            Self::Repository(err) => err.is_not_found(),
            _ => false,
        }
    }

    /// Returns true if the operation was rejected because the aggregate is
    /// not in a state that permits it.
    #[must_use]
    pub fn is_precondition_failed(&self) -> bool {
        matches!(self, Self::Domain(err) if err.is_precondition_failed())
    }

    /// Returns true if a concurrent writer won the race; the caller should
    /// re-read and retry.
    #[must_use]
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Repository(err) if err.is_version_conflict())
    }
}

/// Result type for application-service operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_predicate() {
        let err = ApplicationError::not_found("TransportProvider", "prov-9");
        assert!(err.is_not_found());
        assert!(!err.is_precondition_failed());
        assert!(err.to_string().contains("prov-9"));
    }

    #[test]
    fn domain_precondition_is_surfaced() {
        let err = ApplicationError::from(DomainError::CustomsNotRequired);
        assert!(err.is_precondition_failed());
        assert_eq!(err.to_string(), "customs clearance not required");
    }

    #[test]
    fn version_conflict_predicate() {
        let err = ApplicationError::from(RepositoryError::version_conflict(
            "TransportBooking",
            "bkg-1",
            2,
            1,
        ));
        assert!(err.is_conflict());
        assert!(!err.is_not_found());
    }

    #[test]
    fn repository_not_found_passes_through() {
        let err =
            ApplicationError::from(RepositoryError::not_found("TransportBooking", "bkg-404"));
        assert!(err.is_not_found());
    }
}
