//! # Domain Enums
//!
//! Enumeration types for transport-domain concepts:
//!
//! - [`VehicleType`] - vehicle body class a rate applies to
//! - [`RunningCondition`] - whether the vehicle moves under its own power
//! - [`PriceUnit`] - how a base rate is denominated
//! - [`FeeKind`] - fixed vs percentage additional fees
//! - [`WaypointKind`] - route waypoint classification
//! - [`ServiceKind`] - optional add-on services attached to quotes

use serde::{Deserialize, Serialize};
use std::fmt;

/// Vehicle body class used to match base rates.
///
/// # Examples
///
/// ```
/// use autohaul::domain::value_objects::enums::VehicleType;
///
/// assert_eq!(VehicleType::Sedan.to_string(), "SEDAN");
/// assert_eq!(VehicleType::try_from(0u8).unwrap(), VehicleType::Sedan);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(u8)]
pub enum VehicleType {
    /// Passenger sedan.
    Sedan = 0,
    /// Sport utility vehicle.
    Suv = 1,
    /// Passenger or cargo van.
    Van = 2,
    /// Pickup truck.
    Pickup = 3,
    /// Commercial truck.
    Truck = 4,
    /// Motorcycle.
    Motorcycle = 5,
}

impl fmt::Display for VehicleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Sedan => "SEDAN",
            Self::Suv => "SUV",
            Self::Van => "VAN",
            Self::Pickup => "PICKUP",
            Self::Truck => "TRUCK",
            Self::Motorcycle => "MOTORCYCLE",
        };
        write!(f, "{s}")
    }
}

/// Error returned when converting an invalid u8 to [`VehicleType`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidVehicleTypeError(
    /// The invalid u8 value.
    pub u8,
);

impl fmt::Display for InvalidVehicleTypeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid vehicle type value: {}", self.0)
    }
}

impl std::error::Error for InvalidVehicleTypeError {}

impl TryFrom<u8> for VehicleType {
    type Error = InvalidVehicleTypeError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Sedan),
            1 => Ok(Self::Suv),
            2 => Ok(Self::Van),
            3 => Ok(Self::Pickup),
            4 => Ok(Self::Truck),
            5 => Ok(Self::Motorcycle),
            _ => Err(InvalidVehicleTypeError(value)),
        }
    }
}

/// Whether the vehicle moves under its own power.
///
/// Non-running vehicles need winching equipment and attract a flat
/// surcharge on the quoted price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(u8)]
pub enum RunningCondition {
    /// Vehicle drives onto the transporter.
    #[default]
    Running = 0,
    /// Vehicle must be winched or craned.
    NonRunning = 1,
}

impl RunningCondition {
    /// Returns true if the vehicle is running.
    #[inline]
    #[must_use]
    pub const fn is_running(&self) -> bool {
        matches!(self, Self::Running)
    }
}

impl fmt::Display for RunningCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Running => "RUNNING",
            Self::NonRunning => "NON_RUNNING",
        };
        write!(f, "{s}")
    }
}

/// Denomination of a provider base rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(u8)]
pub enum PriceUnit {
    /// One flat price for the whole route.
    #[default]
    Flat = 0,
    /// Price per kilometre driven.
    PerKilometer = 1,
}

impl fmt::Display for PriceUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Flat => "FLAT",
            Self::PerKilometer => "PER_KILOMETER",
        };
        write!(f, "{s}")
    }
}

/// How an additional provider fee is computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(u8)]
pub enum FeeKind {
    /// Adds a constant amount.
    Fixed = 0,
    /// Adds a percentage of the running accumulated price.
    Percentage = 1,
}

impl fmt::Display for FeeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Fixed => "FIXED",
            Self::Percentage => "PERCENTAGE",
        };
        write!(f, "{s}")
    }
}

/// Classification of a route waypoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(u8)]
pub enum WaypointKind {
    /// Vehicle collection point.
    Pickup = 0,
    /// Customs/border processing point.
    Customs = 1,
    /// Carrier-to-carrier handover.
    Handover = 2,
    /// Intermediate storage yard.
    Storage = 3,
    /// Inspection stop.
    Inspection = 4,
    /// Final delivery point.
    Delivery = 5,
}

impl fmt::Display for WaypointKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Pickup => "PICKUP",
            Self::Customs => "CUSTOMS",
            Self::Handover => "HANDOVER",
            Self::Storage => "STORAGE",
            Self::Inspection => "INSPECTION",
            Self::Delivery => "DELIVERY",
        };
        write!(f, "{s}")
    }
}

/// Optional add-on services offered alongside every quote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(u8)]
pub enum ServiceKind {
    /// Broker-managed customs paperwork.
    CustomsHandling = 0,
    /// Door-to-door pickup and delivery instead of terminal drop.
    DoorToDoor = 1,
    /// Priority scheduling.
    Expedited = 2,
}

impl ServiceKind {
    /// Human-readable service name.
    #[must_use]
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::CustomsHandling => "Customs handling",
            Self::DoorToDoor => "Door-to-door",
            Self::Expedited => "Expedited transport",
        }
    }
}

impl fmt::Display for ServiceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
