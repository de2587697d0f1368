//! # Value Objects
//!
//! Immutable types with validation and domain semantics.
//!
//! ## Identity Types
//!
//! - [`BookingId`]: UUID-based booking identifier
//! - [`ProviderId`], [`VehicleId`], [`PartyId`], [`AuctionId`]: string-based
//!   identifiers owned by the surrounding marketplace
//!
//! ## Monetary Types
//!
//! - [`Money`]: decimal amount paired with its [`CurrencyCode`], with
//!   checked arithmetic and explicit quote-precision rounding
//!
//! ## Geographic Types
//!
//! - [`CountryCode`]: validated ISO 3166-1 alpha-2 code
//!
//! ## Lifecycle Types
//!
//! - [`BookingStatus`]: booking state machine with an enforced table
//! - [`CustomsStatus`]: customs sub-flow state
//!
//! ## Domain Enums
//!
//! - `VehicleType`, `RunningCondition`, `PriceUnit`, `FeeKind`,
//!   `WaypointKind`, `ServiceKind`

pub mod booking_status;
pub mod country;
pub mod currency;
pub mod customs_status;
pub mod enums;
pub mod ids;
pub mod timestamp;

pub use booking_status::BookingStatus;
pub use country::CountryCode;
pub use currency::{CurrencyCode, Money};
pub use customs_status::CustomsStatus;
pub use enums::{FeeKind, PriceUnit, RunningCondition, ServiceKind, VehicleType, WaypointKind};
pub use ids::{AuctionId, BookingId, PartyId, ProviderId, VehicleId};
pub use timestamp::Timestamp;
