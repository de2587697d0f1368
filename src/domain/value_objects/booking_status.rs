//! # Booking Status
//!
//! Transport booking lifecycle state machine.
//!
//! This module provides the [`BookingStatus`] enum representing the
//! lifecycle of a transport booking from quote request to delivery.
//!
//! # State Machine
//!
//! ```text
//! Draft → QuoteRequested → Quoted → Booked → PickupScheduled → InTransit
//!                                      │            │             │  ↑
//!                                      └────────────┴──→ InTransit │  │
//!                                                          │       ↓  │
//!                                                          ├→ CustomsClearance
//!                                                          ├→ Delivered
//!                                                          └→ Failed
//! Cancelled is reachable from every pre-transit state.
//! ```
//!
//! # Examples
//!
//! ```
//! use autohaul::domain::value_objects::booking_status::BookingStatus;
//!
//! let status = BookingStatus::InTransit;
//! assert!(status.can_transition_to(BookingStatus::CustomsClearance));
//! assert!(!status.can_transition_to(BookingStatus::Booked));
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// Transport booking lifecycle state.
///
/// Transitions are enforced via
/// [`can_transition_to`](BookingStatus::can_transition_to); the aggregate
/// rejects anything outside the table below.
///
/// # Terminal States
///
/// - [`Delivered`](BookingStatus::Delivered) — vehicle handed over
/// - [`Cancelled`](BookingStatus::Cancelled) — called off before transit
/// - [`Failed`](BookingStatus::Failed) — transport could not be completed
///
/// Terminal states are the logical deletion of a booking; there is no
/// physical delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(u8)]
pub enum BookingStatus {
    /// Booking is being drafted, no provider chosen yet.
    #[default]
    Draft = 0,

    /// Quote requested from the chosen provider (initial state on creation).
    QuoteRequested = 1,

    /// Provider returned a quote.
    Quoted = 2,

    /// Quote accepted, transport booked.
    Booked = 3,

    /// Pickup appointment agreed.
    PickupScheduled = 4,

    /// Vehicle is on the road.
    InTransit = 5,

    /// Vehicle is held at a border pending customs clearance.
    CustomsClearance = 6,

    /// Vehicle delivered (terminal).
    Delivered = 7,

    /// Booking cancelled before transit (terminal).
    Cancelled = 8,

    /// Transport failed (terminal).
    Failed = 9,
}

impl BookingStatus {
    /// Returns true if this is a terminal state.
    ///
    /// # Examples
    ///
    /// ```
    /// use autohaul::domain::value_objects::booking_status::BookingStatus;
    ///
    /// assert!(!BookingStatus::InTransit.is_terminal());
    /// assert!(BookingStatus::Delivered.is_terminal());
    /// ```
    #[inline]
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Delivered | Self::Cancelled | Self::Failed)
    }

    /// Returns true if this is an active (non-terminal) state.
    #[inline]
    #[must_use]
    pub const fn is_active(&self) -> bool {
        !self.is_terminal()
    }

    /// Returns true if this state can transition to the target state.
    ///
    /// The pickup appointment is optional: `Booked` may go straight to
    /// `InTransit`. `CustomsClearance` and `InTransit` may alternate, one
    /// hold per border crossing.
    ///
    /// # Examples
    ///
    /// ```
    /// use autohaul::domain::value_objects::booking_status::BookingStatus;
    ///
    /// assert!(BookingStatus::Booked.can_transition_to(BookingStatus::InTransit));
    /// assert!(!BookingStatus::Delivered.can_transition_to(BookingStatus::InTransit));
    /// ```
    #[must_use]
    pub const fn can_transition_to(&self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Draft, Self::QuoteRequested)
                | (Self::Draft, Self::Cancelled)
                | (Self::QuoteRequested, Self::Quoted)
                | (Self::QuoteRequested, Self::Cancelled)
                | (Self::Quoted, Self::Booked)
                | (Self::Quoted, Self::Cancelled)
                | (Self::Booked, Self::PickupScheduled)
                | (Self::Booked, Self::InTransit)
                | (Self::Booked, Self::Cancelled)
                | (Self::Booked, Self::Failed)
                | (Self::PickupScheduled, Self::InTransit)
                | (Self::PickupScheduled, Self::Cancelled)
                | (Self::PickupScheduled, Self::Failed)
                | (Self::InTransit, Self::CustomsClearance)
                | (Self::InTransit, Self::Delivered)
                | (Self::InTransit, Self::Failed)
                | (Self::CustomsClearance, Self::InTransit)
                | (Self::CustomsClearance, Self::Delivered)
                | (Self::CustomsClearance, Self::Failed)
        )
    }

    /// Returns the valid next states from this state.
    #[must_use]
    pub fn valid_transitions(&self) -> Vec<Self> {
        match self {
            Self::Draft => vec![Self::QuoteRequested, Self::Cancelled],
            Self::QuoteRequested => vec![Self::Quoted, Self::Cancelled],
            Self::Quoted => vec![Self::Booked, Self::Cancelled],
            Self::Booked => vec![
                Self::PickupScheduled,
                Self::InTransit,
                Self::Cancelled,
                Self::Failed,
            ],
            Self::PickupScheduled => vec![Self::InTransit, Self::Cancelled, Self::Failed],
            Self::InTransit => vec![Self::CustomsClearance, Self::Delivered, Self::Failed],
            Self::CustomsClearance => vec![Self::InTransit, Self::Delivered, Self::Failed],
            Self::Delivered | Self::Cancelled | Self::Failed => vec![],
        }
    }

    /// Returns true if the vehicle is physically moving or held en route.
    #[inline]
    #[must_use]
    pub const fn is_underway(&self) -> bool {
        matches!(self, Self::InTransit | Self::CustomsClearance)
    }

    /// Returns the numeric value of this status.
    #[inline]
    #[must_use]
    pub const fn as_u8(&self) -> u8 {
        *self as u8
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Draft => "DRAFT",
            Self::QuoteRequested => "QUOTE_REQUESTED",
            Self::Quoted => "QUOTED",
            Self::Booked => "BOOKED",
            Self::PickupScheduled => "PICKUP_SCHEDULED",
            Self::InTransit => "IN_TRANSIT",
            Self::CustomsClearance => "CUSTOMS_CLEARANCE",
            Self::Delivered => "DELIVERED",
            Self::Cancelled => "CANCELLED",
            Self::Failed => "FAILED",
        };
        write!(f, "{s}")
    }
}

/// Error returned when converting an invalid u8 to [`BookingStatus`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidBookingStatusError(
    /// The invalid u8 value.
    pub u8,
);

impl fmt::Display for InvalidBookingStatusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid booking status value: {}", self.0)
    }
}

impl std::error::Error for InvalidBookingStatusError {}

impl TryFrom<u8> for BookingStatus {
    type Error = InvalidBookingStatusError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Draft),
            1 => Ok(Self::QuoteRequested),
            2 => Ok(Self::Quoted),
            3 => Ok(Self::Booked),
            4 => Ok(Self::PickupScheduled),
            5 => Ok(Self::InTransit),
            6 => Ok(Self::CustomsClearance),
            7 => Ok(Self::Delivered),
            8 => Ok(Self::Cancelled),
            9 => Ok(Self::Failed),
            _ => Err(InvalidBookingStatusError(value)),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const ALL: [BookingStatus; 10] = [
        BookingStatus::Draft,
        BookingStatus::QuoteRequested,
        BookingStatus::Quoted,
        BookingStatus::Booked,
        BookingStatus::PickupScheduled,
        BookingStatus::InTransit,
        BookingStatus::CustomsClearance,
        BookingStatus::Delivered,
        BookingStatus::Cancelled,
        BookingStatus::Failed,
    ];

    mod terminal {
        use super::*;

        #[test]
        fn exactly_three_terminal_states() {
            let terminal: Vec<_> = ALL.iter().filter(|s| s.is_terminal()).collect();
            assert_eq!(terminal.len(), 3);
        }

        #[test]
        fn terminal_states_have_no_transitions() {
            for state in [
                BookingStatus::Delivered,
                BookingStatus::Cancelled,
                BookingStatus::Failed,
            ] {
                assert!(state.valid_transitions().is_empty());
                for target in ALL {
                    assert!(!state.can_transition_to(target));
                }
            }
        }
    }

    mod transitions {
        use super::*;

        #[test]
        fn forward_path_is_allowed() {
            let path = [
                BookingStatus::Draft,
                BookingStatus::QuoteRequested,
                BookingStatus::Quoted,
                BookingStatus::Booked,
                BookingStatus::PickupScheduled,
                BookingStatus::InTransit,
                BookingStatus::CustomsClearance,
                BookingStatus::Delivered,
            ];
            for pair in path.windows(2) {
                assert!(
                    pair[0].can_transition_to(pair[1]),
                    "{} -> {} should be allowed",
                    pair[0],
                    pair[1]
                );
            }
        }

        #[test]
        fn pickup_appointment_is_optional() {
            assert!(BookingStatus::Booked.can_transition_to(BookingStatus::InTransit));
        }

        #[test]
        fn customs_hold_returns_to_transit() {
            assert!(BookingStatus::CustomsClearance.can_transition_to(BookingStatus::InTransit));
            assert!(BookingStatus::InTransit.can_transition_to(BookingStatus::CustomsClearance));
        }

        #[test]
        fn no_self_transitions() {
            for state in ALL {
                assert!(!state.can_transition_to(state));
            }
        }

        #[test]
        fn no_backwards_jumps() {
            assert!(!BookingStatus::InTransit.can_transition_to(BookingStatus::Booked));
            assert!(!BookingStatus::Delivered.can_transition_to(BookingStatus::InTransit));
            assert!(!BookingStatus::Booked.can_transition_to(BookingStatus::QuoteRequested));
        }

        #[test]
        fn cancellation_stops_at_transit() {
            assert!(BookingStatus::PickupScheduled.can_transition_to(BookingStatus::Cancelled));
            assert!(!BookingStatus::InTransit.can_transition_to(BookingStatus::Cancelled));
        }

        #[test]
        fn valid_transitions_agree_with_table() {
            for state in ALL {
                for target in ALL {
                    assert_eq!(
                        state.valid_transitions().contains(&target),
                        state.can_transition_to(target),
                        "{state} -> {target}"
                    );
                }
            }
        }
    }

    mod display {
        use super::*;

        #[test]
        fn display_formats() {
            assert_eq!(BookingStatus::QuoteRequested.to_string(), "QUOTE_REQUESTED");
            assert_eq!(
                BookingStatus::CustomsClearance.to_string(),
                "CUSTOMS_CLEARANCE"
            );
        }
    }

    mod try_from {
        use super::*;

        #[test]
        fn roundtrips_all_values() {
            for state in ALL {
                assert_eq!(BookingStatus::try_from(state.as_u8()).unwrap(), state);
            }
        }

        #[test]
        fn invalid_value() {
            assert!(matches!(
                BookingStatus::try_from(10u8),
                Err(InvalidBookingStatusError(10))
            ));
        }
    }

    mod serde {
        use super::*;

        #[test]
        fn serde_roundtrip() {
            for state in ALL {
                let json = serde_json::to_string(&state).unwrap();
                let back: BookingStatus = serde_json::from_str(&json).unwrap();
                assert_eq!(back, state);
            }
        }
    }

    mod helpers {
        use super::*;

        #[test]
        fn is_underway() {
            assert!(BookingStatus::InTransit.is_underway());
            assert!(BookingStatus::CustomsClearance.is_underway());
            assert!(!BookingStatus::Booked.is_underway());
        }

        #[test]
        fn default_is_draft() {
            assert_eq!(BookingStatus::default(), BookingStatus::Draft);
        }
    }
}
