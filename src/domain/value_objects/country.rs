//! # Country Code Value Object
//!
//! Validated ISO 3166-1 alpha-2 country codes.
//!
//! Routes, provider coverage, and customs requirements are all keyed by
//! country code, so the code is validated once at the boundary and treated
//! as opaque afterwards.
//!
//! # Examples
//!
//! ```
//! use autohaul::domain::value_objects::country::CountryCode;
//!
//! let de = CountryCode::new("de").unwrap();
//! assert_eq!(de.as_str(), "DE");
//! assert!(CountryCode::new("DEU").is_err());
//! ```

use crate::domain::errors::{DomainError, DomainResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// An ISO 3166-1 alpha-2 country code, uppercase-normalized.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CountryCode(String);

impl CountryCode {
    /// Creates a validated country code.
    ///
    /// The input is trimmed and uppercased. Exactly two ASCII letters are
    /// accepted.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidCountryCode` if the input is not two
    /// ASCII letters.
    pub fn new(code: impl AsRef<str>) -> DomainResult<Self> {
        let trimmed = code.as_ref().trim();
        if trimmed.len() != 2 || !trimmed.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(DomainError::InvalidCountryCode(trimmed.to_string()));
        }
        Ok(Self(trimmed.to_ascii_uppercase()))
    }

    /// Returns the code as a string slice.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CountryCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for CountryCode {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<CountryCode> for String {
    fn from(code: CountryCode) -> Self {
        code.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn accepts_and_normalizes_two_letter_codes() {
        assert_eq!(CountryCode::new("de").unwrap().as_str(), "DE");
        assert_eq!(CountryCode::new(" rs ").unwrap().as_str(), "RS");
    }

    #[test]
    fn rejects_wrong_length() {
        assert!(CountryCode::new("").is_err());
        assert!(CountryCode::new("D").is_err());
        assert!(CountryCode::new("DEU").is_err());
    }

    #[test]
    fn rejects_non_alphabetic() {
        assert!(CountryCode::new("D1").is_err());
        assert!(CountryCode::new("--").is_err());
    }

    #[test]
    fn serde_validates_on_deserialize() {
        let ok: Result<CountryCode, _> = serde_json::from_str("\"ch\"");
        assert_eq!(ok.unwrap().as_str(), "CH");

        let bad: Result<CountryCode, _> = serde_json::from_str("\"123\"");
        assert!(bad.is_err());
    }
}
