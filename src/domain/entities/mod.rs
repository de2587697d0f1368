//! # Domain Entities
//!
//! Aggregate roots and entities representing core business concepts.
//!
//! ## Aggregates
//!
//! - [`TransportBooking`]: booking aggregate with state machine, tracking
//!   ledger, and customs sub-flow
//!
//! ## Entities
//!
//! - [`TransportProvider`]: logistics provider with rates and fees
//! - [`TransportQuote`]: priced offer from one provider

pub mod booking;
pub mod provider;
pub mod quote;

pub use booking::{
    BookingDocument, BookingNote, BookingRequest, CustomsClearance, CustomsCompletion, Dimensions,
    FeeLine, Pricing, RouteDetails, StatusTransition, StatusUpdate, TrackingEntry, TrackingInfo,
    TrackingUpdate, TransferPoint, TransportBooking, VehicleDetails, Waypoint,
};
pub use provider::{
    AdditionalFee, BaseRate, InsuranceOption, TransportProvider, TransportProviderBuilder,
};
pub use quote::{AdditionalService, TransportQuote};
