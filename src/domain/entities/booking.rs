//! # Transport Booking Aggregate
//!
//! The aggregate root for a vehicle transport booking: lifecycle status,
//! pickup/delivery details, pricing, the append-only tracking ledger, and
//! the optional customs-clearance sub-flow.
//!
//! Every operation is **pure**: it borrows the current booking value and
//! returns a new one with `version + 1`, leaving storage concerns to the
//! repository. Disallowed lifecycle transitions and customs operations on
//! bookings without a customs sub-flow fail without producing a new value.
//!
//! # Examples
//!
//! ```
//! use autohaul::domain::entities::booking::{
//!     BookingRequest, StatusTransition, TransferPoint, TransportBooking, VehicleDetails,
//! };
//! use autohaul::domain::value_objects::{BookingStatus, CountryCode, CurrencyCode, Money};
//! use rust_decimal::Decimal;
//!
//! let booking = TransportBooking::create(BookingRequest::new(
//!     "veh-1",
//!     "buyer-1",
//!     "seller-1",
//!     "prov-1",
//!     TransferPoint::new("Kurfürstendamm 1", "Berlin", CountryCode::new("DE").unwrap(), "H. Brandt"),
//!     TransferPoint::new("Bulevar kralja Aleksandra 2", "Belgrade", CountryCode::new("RS").unwrap(), "M. Petrović"),
//!     VehicleDetails::new("Volkswagen", "Golf", 2019, "WVWZZZ1KZAW000001"),
//!     Money::new(Decimal::new(550, 0), CurrencyCode::new("EUR").unwrap()),
//!     "buyer-1",
//! ))
//! .unwrap();
//!
//! assert_eq!(booking.status(), BookingStatus::QuoteRequested);
//! assert!(booking.customs().is_some_and(|c| c.required()));
//!
//! let quoted = booking
//!     .apply_status(&StatusTransition::to(BookingStatus::Quoted))
//!     .unwrap();
//! assert_eq!(quoted.version(), booking.version() + 1);
//! ```

use crate::domain::entities::provider::InsuranceOption;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::value_objects::{
    AuctionId, BookingId, BookingStatus, CountryCode, CustomsStatus, Money, PartyId, ProviderId,
    RunningCondition, Timestamp, VehicleId, WaypointKind,
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A pickup or delivery endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferPoint {
    /// Street address.
    pub address: String,
    /// City name.
    pub city: String,
    /// Country the endpoint lies in.
    pub country: CountryCode,
    /// Contact person at the endpoint.
    pub contact_name: String,
    /// Optional contact phone number.
    pub contact_phone: Option<String>,
    /// Agreed date, once scheduled.
    pub scheduled_date: Option<Timestamp>,
}

impl TransferPoint {
    /// Creates an endpoint without phone or schedule.
    #[must_use]
    pub fn new(
        address: impl Into<String>,
        city: impl Into<String>,
        country: CountryCode,
        contact_name: impl Into<String>,
    ) -> Self {
        Self {
            address: address.into(),
            city: city.into(),
            country,
            contact_name: contact_name.into(),
            contact_phone: None,
            scheduled_date: None,
        }
    }

    /// Sets the contact phone.
    #[must_use]
    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.contact_phone = Some(phone.into());
        self
    }

    /// Sets the scheduled date.
    #[must_use]
    pub fn scheduled_at(mut self, date: Timestamp) -> Self {
        self.scheduled_date = Some(date);
        self
    }
}

/// Physical vehicle dimensions, centimetres and kilograms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    /// Overall length in centimetres.
    pub length_cm: u32,
    /// Overall width in centimetres.
    pub width_cm: u32,
    /// Overall height in centimetres.
    pub height_cm: u32,
    /// Curb weight in kilograms.
    pub weight_kg: u32,
}

/// The vehicle being transported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleDetails {
    /// Manufacturer.
    pub make: String,
    /// Model name.
    pub model: String,
    /// Model year.
    pub year: u16,
    /// Vehicle identification number.
    pub vin: String,
    /// Measured dimensions, when known.
    pub dimensions: Option<Dimensions>,
    /// Whether the vehicle moves under its own power.
    pub running_condition: RunningCondition,
}

impl VehicleDetails {
    /// Creates vehicle details for a running vehicle without dimensions.
    #[must_use]
    pub fn new(
        make: impl Into<String>,
        model: impl Into<String>,
        year: u16,
        vin: impl Into<String>,
    ) -> Self {
        Self {
            make: make.into(),
            model: model.into(),
            year,
            vin: vin.into(),
            dimensions: None,
            running_condition: RunningCondition::Running,
        }
    }

    /// Sets the dimensions.
    #[must_use]
    pub fn with_dimensions(mut self, dimensions: Dimensions) -> Self {
        self.dimensions = Some(dimensions);
        self
    }

    /// Sets the running condition.
    #[must_use]
    pub fn with_condition(mut self, condition: RunningCondition) -> Self {
        self.running_condition = condition;
        self
    }
}

/// One stop on the planned route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Waypoint {
    /// What happens at this stop.
    pub kind: WaypointKind,
    /// Where the stop is.
    pub location: String,
}

impl Waypoint {
    /// Creates a waypoint.
    #[must_use]
    pub fn new(kind: WaypointKind, location: impl Into<String>) -> Self {
        Self {
            kind,
            location: location.into(),
        }
    }
}

/// Planned route information.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RouteDetails {
    /// Route length, when computed by the carrier.
    pub distance_km: Option<u32>,
    /// Carrier-estimated duration in days.
    pub estimated_days: Option<u32>,
    /// Border crossings along the route, `"XX -> YY"` form.
    pub border_crossings: Vec<String>,
    /// Ordered stops.
    pub waypoints: Vec<Waypoint>,
}

impl RouteDetails {
    /// Builds the 3-waypoint skeleton seeded for cross-border bookings:
    /// pickup, one border crossing between the endpoint countries, delivery.
    #[must_use]
    pub fn border_skeleton(pickup: &TransferPoint, delivery: &TransferPoint) -> Self {
        let crossing = format!("{} -> {}", pickup.country, delivery.country);
        Self {
            distance_km: None,
            estimated_days: None,
            border_crossings: vec![crossing.clone()],
            waypoints: vec![
                Waypoint::new(
                    WaypointKind::Pickup,
                    format!("{}, {}", pickup.city, pickup.country),
                ),
                Waypoint::new(WaypointKind::Customs, format!("Border crossing {crossing}")),
                Waypoint::new(
                    WaypointKind::Delivery,
                    format!("{}, {}", delivery.city, delivery.country),
                ),
            ],
        }
    }
}

/// One line in the quote's fee breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeLine {
    /// Fee label.
    pub name: String,
    /// Fee amount.
    pub amount: Money,
}

impl FeeLine {
    /// Creates a fee line.
    #[must_use]
    pub fn new(name: impl Into<String>, amount: Money) -> Self {
        Self {
            name: name.into(),
            amount,
        }
    }
}

/// Booking price information.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pricing {
    /// The price quoted when the booking was created.
    quote_amount: Money,
    /// The final invoiced price, once known.
    actual_amount: Option<Money>,
    /// Itemized fees behind the quote.
    fee_breakdown: Vec<FeeLine>,
    /// Whether payment has been recorded.
    paid: bool,
}

impl Pricing {
    fn new(quote_amount: Money, fee_breakdown: Vec<FeeLine>) -> Self {
        Self {
            quote_amount,
            actual_amount: None,
            fee_breakdown,
            paid: false,
        }
    }

    /// Returns the quoted amount.
    #[inline]
    #[must_use]
    pub fn quote_amount(&self) -> &Money {
        &self.quote_amount
    }

    /// Returns the final invoiced amount, if recorded.
    #[inline]
    #[must_use]
    pub fn actual_amount(&self) -> Option<&Money> {
        self.actual_amount.as_ref()
    }

    /// Returns the itemized fee breakdown.
    #[inline]
    #[must_use]
    pub fn fee_breakdown(&self) -> &[FeeLine] {
        &self.fee_breakdown
    }

    /// Returns true if payment has been recorded.
    #[inline]
    #[must_use]
    pub fn is_paid(&self) -> bool {
        self.paid
    }
}

/// One immutable entry in the tracking ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackingEntry {
    /// Status label: a lifecycle status name or a synthetic event such as
    /// `"Booking created"`.
    pub status: String,
    /// Where the event happened, when known.
    pub location: Option<String>,
    /// When the event was recorded.
    pub timestamp: Timestamp,
    /// Free-text notes.
    pub notes: Option<String>,
}

impl TrackingEntry {
    /// Creates an entry without location or notes.
    #[must_use]
    pub fn new(status: impl Into<String>, timestamp: Timestamp) -> Self {
        Self {
            status: status.into(),
            location: None,
            timestamp,
            notes: None,
        }
    }

    /// Sets the location.
    #[must_use]
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Sets the notes.
    #[must_use]
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}

/// Tracking state: carrier references, delivery estimates, and the
/// append-only status ledger with denormalized "current" fields.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TrackingInfo {
    /// Carrier tracking number.
    tracking_number: Option<String>,
    /// Carrier tracking page.
    tracking_url: Option<String>,
    /// Estimated delivery date.
    estimated_delivery: Option<Timestamp>,
    /// Actual delivery date, stamped on the `Delivered` transition.
    actual_delivery: Option<Timestamp>,
    /// Mirror of the latest ledger entry's status.
    current_status: Option<String>,
    /// Mirror of the latest known location.
    current_location: Option<String>,
    /// The append-only ledger. Entries are never mutated or removed.
    history: Vec<TrackingEntry>,
}

impl TrackingInfo {
    /// Appends a ledger entry and refreshes the denormalized mirrors.
    ///
    /// `current_location` is only overwritten when the entry carries a
    /// location, so sparse carrier updates do not erase the last position.
    fn append_entry(&mut self, entry: TrackingEntry) {
        self.current_status = Some(entry.status.clone());
        if entry.location.is_some() {
            self.current_location = entry.location.clone();
        }
        self.history.push(entry);
    }

    /// Returns the carrier tracking number.
    #[inline]
    #[must_use]
    pub fn tracking_number(&self) -> Option<&str> {
        self.tracking_number.as_deref()
    }

    /// Returns the carrier tracking page URL.
    #[inline]
    #[must_use]
    pub fn tracking_url(&self) -> Option<&str> {
        self.tracking_url.as_deref()
    }

    /// Returns the estimated delivery date.
    #[inline]
    #[must_use]
    pub fn estimated_delivery(&self) -> Option<Timestamp> {
        self.estimated_delivery
    }

    /// Returns the actual delivery date.
    #[inline]
    #[must_use]
    pub fn actual_delivery(&self) -> Option<Timestamp> {
        self.actual_delivery
    }

    /// Returns the mirrored latest status label.
    #[inline]
    #[must_use]
    pub fn current_status(&self) -> Option<&str> {
        self.current_status.as_deref()
    }

    /// Returns the mirrored latest location.
    #[inline]
    #[must_use]
    pub fn current_location(&self) -> Option<&str> {
        self.current_location.as_deref()
    }

    /// Returns the ledger, oldest first.
    #[inline]
    #[must_use]
    pub fn history(&self) -> &[TrackingEntry] {
        &self.history
    }
}

/// The customs-clearance sub-flow, present only on cross-border bookings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomsClearance {
    /// Whether clearance is required (always true when the sub-flow
    /// exists; kept explicit for the persisted document).
    required: bool,
    /// Clearance progress.
    status: CustomsStatus,
    /// When the goods cleared.
    clearance_date: Option<Timestamp>,
    /// Customs office handling the clearance.
    office: Option<String>,
    /// Broker or agent of record.
    agent: Option<String>,
    /// Customs document references.
    documents: Vec<String>,
    /// Duties charged, recorded not computed.
    duties: Option<Money>,
    /// Free-text notes.
    notes: Option<String>,
}

impl CustomsClearance {
    fn new_required() -> Self {
        Self {
            required: true,
            status: CustomsStatus::NotStarted,
            clearance_date: None,
            office: None,
            agent: None,
            documents: Vec::new(),
            duties: None,
            notes: None,
        }
    }

    /// Returns true if clearance is required.
    #[inline]
    #[must_use]
    pub fn required(&self) -> bool {
        self.required
    }

    /// Returns the clearance progress.
    #[inline]
    #[must_use]
    pub fn status(&self) -> CustomsStatus {
        self.status
    }

    /// Returns the clearance date.
    #[inline]
    #[must_use]
    pub fn clearance_date(&self) -> Option<Timestamp> {
        self.clearance_date
    }

    /// Returns the customs office.
    #[inline]
    #[must_use]
    pub fn office(&self) -> Option<&str> {
        self.office.as_deref()
    }

    /// Returns the agent of record.
    #[inline]
    #[must_use]
    pub fn agent(&self) -> Option<&str> {
        self.agent.as_deref()
    }

    /// Returns the customs document references.
    #[inline]
    #[must_use]
    pub fn documents(&self) -> &[String] {
        &self.documents
    }

    /// Returns the recorded duties.
    #[inline]
    #[must_use]
    pub fn duties(&self) -> Option<&Money> {
        self.duties.as_ref()
    }

    /// Returns the notes.
    #[inline]
    #[must_use]
    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }
}

/// A document attached to the booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingDocument {
    /// Document kind, e.g. `"cmr"`, `"invoice"`, `"power_of_attorney"`.
    pub kind: String,
    /// Original filename.
    pub filename: String,
    /// Storage URL.
    pub url: String,
    /// Upload time.
    pub uploaded_at: Timestamp,
}

impl BookingDocument {
    /// Creates a document stamped with the current time.
    #[must_use]
    pub fn new(
        kind: impl Into<String>,
        filename: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            kind: kind.into(),
            filename: filename.into(),
            url: url.into(),
            uploaded_at: Timestamp::now(),
        }
    }
}

/// A note attached to the booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingNote {
    /// Who wrote the note.
    pub author: PartyId,
    /// When the note was written.
    pub date: Timestamp,
    /// Note body.
    pub content: String,
    /// Whether buyer and seller can see the note (default true).
    pub is_public: bool,
}

impl BookingNote {
    /// Creates a public note stamped with the current time.
    #[must_use]
    pub fn new(author: impl Into<PartyId>, content: impl Into<String>) -> Self {
        Self {
            author: author.into(),
            date: Timestamp::now(),
            content: content.into(),
            is_public: true,
        }
    }

    /// Restricts the note to internal staff.
    #[must_use]
    pub fn restricted(mut self) -> Self {
        self.is_public = false;
        self
    }
}

/// Input for creating a booking: every recognized option is an explicit
/// field, so omitted and defaulted are never ambiguous.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingRequest {
    /// The vehicle listing being transported.
    pub vehicle_id: VehicleId,
    /// The buying party.
    pub buyer_id: PartyId,
    /// The selling party.
    pub seller_id: PartyId,
    /// The auction the sale originated from, if any.
    pub auction_id: Option<AuctionId>,
    /// The chosen provider.
    pub provider_id: ProviderId,
    /// Pickup endpoint.
    pub pickup: TransferPoint,
    /// Delivery endpoint.
    pub delivery: TransferPoint,
    /// The vehicle being moved.
    pub vehicle: VehicleDetails,
    /// The accepted quote amount.
    pub quote_amount: Money,
    /// Itemized fees behind the quote.
    pub fee_breakdown: Vec<FeeLine>,
    /// The user creating the booking.
    pub created_by: PartyId,
}

impl BookingRequest {
    /// Creates a request without auction linkage or fee breakdown.
    #[allow(clippy::too_many_arguments)]
    #[must_use]
    pub fn new(
        vehicle_id: impl Into<VehicleId>,
        buyer_id: impl Into<PartyId>,
        seller_id: impl Into<PartyId>,
        provider_id: impl Into<ProviderId>,
        pickup: TransferPoint,
        delivery: TransferPoint,
        vehicle: VehicleDetails,
        quote_amount: Money,
        created_by: impl Into<PartyId>,
    ) -> Self {
        Self {
            vehicle_id: vehicle_id.into(),
            buyer_id: buyer_id.into(),
            seller_id: seller_id.into(),
            auction_id: None,
            provider_id: provider_id.into(),
            pickup,
            delivery,
            vehicle,
            quote_amount,
            fee_breakdown: Vec::new(),
            created_by: created_by.into(),
        }
    }

    /// Links the booking to an auction.
    #[must_use]
    pub fn with_auction(mut self, auction_id: impl Into<AuctionId>) -> Self {
        self.auction_id = Some(auction_id.into());
        self
    }

    /// Attaches the quote's fee breakdown.
    #[must_use]
    pub fn with_fee_breakdown(mut self, fees: Vec<FeeLine>) -> Self {
        self.fee_breakdown = fees;
        self
    }
}

/// A lifecycle status transition request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusTransition {
    /// Target status.
    pub status: BookingStatus,
    /// Where the vehicle is at transition time.
    pub location: Option<String>,
    /// Free-text note for the ledger entry.
    pub note: Option<String>,
}

impl StatusTransition {
    /// Creates a bare transition to the target status.
    #[must_use]
    pub fn to(status: BookingStatus) -> Self {
        Self {
            status,
            location: None,
            note: None,
        }
    }

    /// Sets the location.
    #[must_use]
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Sets the note.
    #[must_use]
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }
}

/// Input for completing customs clearance.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CustomsCompletion {
    /// Clearance date; defaults to now when omitted.
    pub clearance_date: Option<Timestamp>,
    /// Customs office that processed the clearance.
    pub office: Option<String>,
    /// Broker or agent of record.
    pub agent: Option<String>,
    /// Duties charged.
    pub duties: Option<Money>,
    /// Customs document references to attach.
    pub documents: Vec<String>,
    /// Free-text notes.
    pub notes: Option<String>,
}

impl CustomsCompletion {
    /// Sets the office.
    #[must_use]
    pub fn with_office(mut self, office: impl Into<String>) -> Self {
        self.office = Some(office.into());
        self
    }

    /// Sets the agent.
    #[must_use]
    pub fn with_agent(mut self, agent: impl Into<String>) -> Self {
        self.agent = Some(agent.into());
        self
    }

    /// Sets the duties.
    #[must_use]
    pub fn with_duties(mut self, duties: Money) -> Self {
        self.duties = Some(duties);
        self
    }

    /// Adds a customs document reference.
    #[must_use]
    pub fn with_document(mut self, document: impl Into<String>) -> Self {
        self.documents.push(document.into());
        self
    }

    /// Sets the notes.
    #[must_use]
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}

/// A carrier-supplied status fact, nested inside [`TrackingUpdate`].
///
/// Distinct from [`StatusTransition`]: it never touches the booking's
/// lifecycle status, only the ledger and its mirrors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusUpdate {
    /// Carrier status label.
    pub status: String,
    /// Where the vehicle is.
    pub location: Option<String>,
    /// Free-text notes.
    pub notes: Option<String>,
}

impl StatusUpdate {
    /// Creates a bare status fact.
    #[must_use]
    pub fn new(status: impl Into<String>) -> Self {
        Self {
            status: status.into(),
            location: None,
            notes: None,
        }
    }

    /// Sets the location.
    #[must_use]
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Sets the notes.
    #[must_use]
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}

/// Partial tracking update: only supplied fields are overwritten.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TrackingUpdate {
    /// New carrier tracking number.
    pub tracking_number: Option<String>,
    /// New carrier tracking page URL.
    pub tracking_url: Option<String>,
    /// New estimated delivery date.
    pub estimated_delivery: Option<Timestamp>,
    /// New current location.
    pub current_location: Option<String>,
    /// Optional ledger append, composable with the fields above.
    pub status_update: Option<StatusUpdate>,
}

impl TrackingUpdate {
    /// Sets the tracking number.
    #[must_use]
    pub fn with_tracking_number(mut self, number: impl Into<String>) -> Self {
        self.tracking_number = Some(number.into());
        self
    }

    /// Sets the tracking URL.
    #[must_use]
    pub fn with_tracking_url(mut self, url: impl Into<String>) -> Self {
        self.tracking_url = Some(url.into());
        self
    }

    /// Sets the estimated delivery date.
    #[must_use]
    pub fn with_estimated_delivery(mut self, date: Timestamp) -> Self {
        self.estimated_delivery = Some(date);
        self
    }

    /// Sets the current location.
    #[must_use]
    pub fn with_current_location(mut self, location: impl Into<String>) -> Self {
        self.current_location = Some(location.into());
        self
    }

    /// Attaches a ledger append.
    #[must_use]
    pub fn with_status_update(mut self, update: StatusUpdate) -> Self {
        self.status_update = Some(update);
        self
    }
}

/// Ledger label for the synthetic entry seeded at creation.
const CREATED_ENTRY: &str = "Booking created";

/// Transport booking aggregate root.
///
/// # Invariants
///
/// - `status` only changes through [`apply_status`](Self::apply_status)
///   (table-enforced) or the customs auto-advance in
///   [`complete_customs`](Self::complete_customs).
/// - `tracking.history` is append-only; every mutation producing a ledger
///   entry appends exactly one.
/// - `customs` is `Some` exactly when pickup and delivery countries
///   differ.
/// - Every operation returns a new value with `version + 1`; the stored
///   booking is never mutated in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransportBooking {
    /// Unique identifier.
    id: BookingId,
    /// The vehicle listing being transported.
    vehicle_id: VehicleId,
    /// The buying party.
    buyer_id: PartyId,
    /// The selling party.
    seller_id: PartyId,
    /// The auction the sale originated from, if any.
    auction_id: Option<AuctionId>,
    /// The chosen provider.
    provider_id: ProviderId,
    /// Lifecycle status.
    status: BookingStatus,
    /// Pickup endpoint.
    pickup: TransferPoint,
    /// Delivery endpoint.
    delivery: TransferPoint,
    /// The vehicle being moved.
    vehicle: VehicleDetails,
    /// Planned route, seeded for cross-border bookings.
    route: Option<RouteDetails>,
    /// Price information.
    pricing: Pricing,
    /// Tracking ledger and carrier references.
    tracking: TrackingInfo,
    /// Customs sub-flow, present only for cross-border routes.
    customs: Option<CustomsClearance>,
    /// Selected insurance option, if any.
    insurance: Option<InsuranceOption>,
    /// Attached documents.
    documents: Vec<BookingDocument>,
    /// Attached notes.
    notes: Vec<BookingNote>,
    /// The user who created the booking.
    created_by: PartyId,
    /// Creation time.
    created_at: Timestamp,
    /// Last mutation time.
    updated_at: Timestamp,
    /// Optimistic-locking version, bumped by every operation.
    version: u64,
}

impl TransportBooking {
    /// Creates a booking in `QuoteRequested` with a seeded tracking ledger.
    ///
    /// Cross-border requests (pickup country differs from delivery
    /// country) additionally get a required customs sub-flow and the
    /// 3-waypoint route skeleton.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the quote amount is not
    /// positive.
    pub fn create(request: BookingRequest) -> DomainResult<Self> {
        if !request.quote_amount.is_positive() {
            return Err(DomainError::validation("quote amount must be positive"));
        }

        let now = Timestamp::now();
        let cross_border = request.pickup.country != request.delivery.country;

        let mut tracking = TrackingInfo::default();
        tracking.append_entry(TrackingEntry::new(CREATED_ENTRY, now));

        let customs = cross_border.then(CustomsClearance::new_required);
        let route =
            cross_border.then(|| RouteDetails::border_skeleton(&request.pickup, &request.delivery));

        Ok(Self {
            id: BookingId::new_v4(),
            vehicle_id: request.vehicle_id,
            buyer_id: request.buyer_id,
            seller_id: request.seller_id,
            auction_id: request.auction_id,
            provider_id: request.provider_id,
            status: BookingStatus::QuoteRequested,
            pickup: request.pickup,
            delivery: request.delivery,
            vehicle: request.vehicle,
            route,
            pricing: Pricing::new(request.quote_amount, request.fee_breakdown),
            tracking,
            customs,
            insurance: None,
            documents: Vec::new(),
            notes: Vec::new(),
            created_by: request.created_by,
            created_at: now,
            updated_at: now,
            version: 1,
        })
    }

    /// Clones the booking with a bumped version and fresh `updated_at`.
    fn advanced(&self) -> Self {
        let mut next = self.clone();
        next.version = self.version.saturating_add(1);
        next.updated_at = Timestamp::now();
        next
    }

    // ========== Accessors ==========

    /// Returns the booking identifier.
    #[inline]
    #[must_use]
    pub fn id(&self) -> BookingId {
        self.id
    }

    /// Returns the vehicle listing identifier.
    #[inline]
    #[must_use]
    pub fn vehicle_id(&self) -> &VehicleId {
        &self.vehicle_id
    }

    /// Returns the buyer.
    #[inline]
    #[must_use]
    pub fn buyer_id(&self) -> &PartyId {
        &self.buyer_id
    }

    /// Returns the seller.
    #[inline]
    #[must_use]
    pub fn seller_id(&self) -> &PartyId {
        &self.seller_id
    }

    /// Returns the originating auction, if any.
    #[inline]
    #[must_use]
    pub fn auction_id(&self) -> Option<&AuctionId> {
        self.auction_id.as_ref()
    }

    /// Returns the chosen provider.
    #[inline]
    #[must_use]
    pub fn provider_id(&self) -> &ProviderId {
        &self.provider_id
    }

    /// Returns the lifecycle status.
    #[inline]
    #[must_use]
    pub fn status(&self) -> BookingStatus {
        self.status
    }

    /// Returns the pickup endpoint.
    #[inline]
    #[must_use]
    pub fn pickup(&self) -> &TransferPoint {
        &self.pickup
    }

    /// Returns the delivery endpoint.
    #[inline]
    #[must_use]
    pub fn delivery(&self) -> &TransferPoint {
        &self.delivery
    }

    /// Returns the vehicle details.
    #[inline]
    #[must_use]
    pub fn vehicle(&self) -> &VehicleDetails {
        &self.vehicle
    }

    /// Returns the planned route, if any.
    #[inline]
    #[must_use]
    pub fn route(&self) -> Option<&RouteDetails> {
        self.route.as_ref()
    }

    /// Returns the price information.
    #[inline]
    #[must_use]
    pub fn pricing(&self) -> &Pricing {
        &self.pricing
    }

    /// Returns the tracking state.
    #[inline]
    #[must_use]
    pub fn tracking(&self) -> &TrackingInfo {
        &self.tracking
    }

    /// Returns the customs sub-flow, present only for cross-border routes.
    #[inline]
    #[must_use]
    pub fn customs(&self) -> Option<&CustomsClearance> {
        self.customs.as_ref()
    }

    /// Returns the selected insurance option, if any.
    #[inline]
    #[must_use]
    pub fn insurance(&self) -> Option<&InsuranceOption> {
        self.insurance.as_ref()
    }

    /// Returns the attached documents.
    #[inline]
    #[must_use]
    pub fn documents(&self) -> &[BookingDocument] {
        &self.documents
    }

    /// Returns the attached notes.
    #[inline]
    #[must_use]
    pub fn notes(&self) -> &[BookingNote] {
        &self.notes
    }

    /// Returns the creating user.
    #[inline]
    #[must_use]
    pub fn created_by(&self) -> &PartyId {
        &self.created_by
    }

    /// Returns the creation time.
    #[inline]
    #[must_use]
    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    /// Returns the last mutation time.
    #[inline]
    #[must_use]
    pub fn updated_at(&self) -> Timestamp {
        self.updated_at
    }

    /// Returns the optimistic-locking version.
    #[inline]
    #[must_use]
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Returns true if the booking has reached a terminal state.
    #[inline]
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// Returns true if the route crosses a border.
    #[must_use]
    pub fn is_cross_border(&self) -> bool {
        self.pickup.country != self.delivery.country
    }

    // ========== Operations ==========

    /// Applies a lifecycle status transition.
    ///
    /// Appends exactly one ledger entry, refreshes the `current_*`
    /// mirrors, stamps `actual_delivery` on `Delivered`, and moves the
    /// customs sub-flow to `InProgress` on `CustomsClearance`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidStatusTransition` if the target is not
    /// allowed from the current status; the booking is unchanged.
    pub fn apply_status(&self, transition: &StatusTransition) -> DomainResult<Self> {
        if !self.status.can_transition_to(transition.status) {
            return Err(DomainError::InvalidStatusTransition {
                from: self.status,
                to: transition.status,
            });
        }

        let mut next = self.advanced();
        next.status = transition.status;

        let mut entry = TrackingEntry::new(transition.status.to_string(), Timestamp::now());
        entry.location = transition.location.clone();
        entry.notes = transition.note.clone();
        next.tracking.append_entry(entry);

        match transition.status {
            BookingStatus::Delivered => {
                next.tracking.actual_delivery = Some(Timestamp::now());
            }
            BookingStatus::CustomsClearance => {
                if let Some(customs) = next.customs.as_mut() {
                    customs.status = CustomsStatus::InProgress;
                }
            }
            _ => {}
        }

        Ok(next)
    }

    /// Completes the customs clearance sub-flow.
    ///
    /// Records the completion details and, when the booking currently sits
    /// in `CustomsClearance`, auto-advances it to `InTransit` with a
    /// corresponding ledger entry — the only automatic downstream state
    /// change in the lifecycle.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::CustomsNotRequired` when the booking has no
    /// required customs sub-flow; the booking is unchanged.
    pub fn complete_customs(&self, completion: &CustomsCompletion) -> DomainResult<Self> {
        if !self.customs.as_ref().is_some_and(CustomsClearance::required) {
            return Err(DomainError::CustomsNotRequired);
        }

        let mut next = self.advanced();
        if let Some(customs) = next.customs.as_mut() {
            customs.status = CustomsStatus::Completed;
            customs.clearance_date = Some(completion.clearance_date.unwrap_or_else(Timestamp::now));
            if completion.office.is_some() {
                customs.office = completion.office.clone();
            }
            if completion.agent.is_some() {
                customs.agent = completion.agent.clone();
            }
            if completion.duties.is_some() {
                customs.duties = completion.duties.clone();
            }
            if completion.notes.is_some() {
                customs.notes = completion.notes.clone();
            }
            customs.documents.extend(completion.documents.iter().cloned());
        }

        if self.status == BookingStatus::CustomsClearance {
            next.status = BookingStatus::InTransit;
            next.tracking.append_entry(
                TrackingEntry::new(BookingStatus::InTransit.to_string(), Timestamp::now())
                    .with_notes("Customs clearance completed"),
            );
        }

        Ok(next)
    }

    /// Marks the customs sub-flow as blocked.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::CustomsNotRequired` when the booking has no
    /// required customs sub-flow.
    pub fn flag_customs_issue(&self, note: impl Into<String>) -> DomainResult<Self> {
        if !self.customs.as_ref().is_some_and(CustomsClearance::required) {
            return Err(DomainError::CustomsNotRequired);
        }

        let mut next = self.advanced();
        if let Some(customs) = next.customs.as_mut() {
            customs.status = CustomsStatus::Issues;
            customs.notes = Some(note.into());
        }
        Ok(next)
    }

    /// Applies a partial tracking update.
    ///
    /// Only supplied fields are overwritten. A nested
    /// [`StatusUpdate`] additionally appends one ledger entry without
    /// touching the lifecycle status.
    #[must_use]
    pub fn apply_tracking(&self, update: &TrackingUpdate) -> Self {
        let mut next = self.advanced();

        if let Some(number) = &update.tracking_number {
            next.tracking.tracking_number = Some(number.clone());
        }
        if let Some(url) = &update.tracking_url {
            next.tracking.tracking_url = Some(url.clone());
        }
        if let Some(estimate) = update.estimated_delivery {
            next.tracking.estimated_delivery = Some(estimate);
        }
        if let Some(location) = &update.current_location {
            next.tracking.current_location = Some(location.clone());
        }

        if let Some(status_update) = &update.status_update {
            let mut entry = TrackingEntry::new(status_update.status.clone(), Timestamp::now());
            entry.location = status_update.location.clone();
            entry.notes = status_update.notes.clone();
            next.tracking.append_entry(entry);
        }

        next
    }

    /// Attaches a document.
    #[must_use]
    pub fn with_document(&self, document: BookingDocument) -> Self {
        let mut next = self.advanced();
        next.documents.push(document);
        next
    }

    /// Attaches a note.
    #[must_use]
    pub fn with_note(&self, note: BookingNote) -> Self {
        let mut next = self.advanced();
        next.notes.push(note);
        next
    }

    /// Records the final invoiced price.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the amount is not positive.
    pub fn record_actual_price(&self, amount: Money) -> DomainResult<Self> {
        if !amount.is_positive() {
            return Err(DomainError::validation("actual amount must be positive"));
        }
        let mut next = self.advanced();
        next.pricing.actual_amount = Some(amount);
        Ok(next)
    }

    /// Records that payment was received.
    #[must_use]
    pub fn mark_paid(&self) -> Self {
        let mut next = self.advanced();
        next.pricing.paid = true;
        next
    }

    /// Attaches the selected insurance option.
    #[must_use]
    pub fn select_insurance(&self, option: InsuranceOption) -> Self {
        let mut next = self.advanced();
        next.insurance = Some(option);
        next
    }
}

impl fmt::Display for TransportBooking {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Booking[{}] {} -> {} status={} provider={} v{}",
            self.id,
            self.pickup.country,
            self.delivery.country,
            self.status,
            self.provider_id,
            self.version
        )
    }
}
