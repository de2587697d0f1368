//! # Customs Status
//!
//! State of the customs-clearance sub-flow nested inside cross-border
//! bookings. Unlike the booking lifecycle this small machine is advisory:
//! the aggregate drives it from booking transitions and customs
//! operations, so no transition table is enforced here.

use serde::{Deserialize, Serialize};
use std::fmt;

/// State of a booking's customs-clearance sub-flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(u8)]
pub enum CustomsStatus {
    /// Clearance has not begun.
    #[default]
    NotStarted = 0,

    /// Paperwork is with the customs office.
    InProgress = 1,

    /// Goods cleared.
    Completed = 2,

    /// Clearance blocked, broker attention needed.
    Issues = 3,
}

impl CustomsStatus {
    /// Returns true if the goods have cleared customs.
    #[inline]
    #[must_use]
    pub const fn is_cleared(&self) -> bool {
        matches!(self, Self::Completed)
    }

    /// Returns true if clearance is blocked.
    #[inline]
    #[must_use]
    pub const fn has_issues(&self) -> bool {
        matches!(self, Self::Issues)
    }
}

impl fmt::Display for CustomsStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::NotStarted => "NOT_STARTED",
            Self::InProgress => "IN_PROGRESS",
            Self::Completed => "COMPLETED",
            Self::Issues => "ISSUES",
        };
        write!(f, "{s}")
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn default_is_not_started() {
        assert_eq!(CustomsStatus::default(), CustomsStatus::NotStarted);
    }

    #[test]
    fn predicates() {
        assert!(CustomsStatus::Completed.is_cleared());
        assert!(!CustomsStatus::InProgress.is_cleared());
        assert!(CustomsStatus::Issues.has_issues());
    }

    #[test]
    fn serde_roundtrip() {
        for status in [
            CustomsStatus::NotStarted,
            CustomsStatus::InProgress,
            CustomsStatus::Completed,
            CustomsStatus::Issues,
        ] {
            let json = serde_json::to_string(&status).unwrap();
            let back: CustomsStatus = serde_json::from_str(&json).unwrap();
            assert_eq!(back, status);
        }
    }
}
