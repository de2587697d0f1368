//! # Booking Service
//!
//! Orchestrates the booking lifecycle over the repository.
//!
//! Every operation is a read-modify-write against one booking: load the
//! current value, apply a pure aggregate operation, persist the result.
//! The repository's optimistic versioning serializes concurrent writers
//! per booking; a loser gets a version conflict and should re-read and
//! retry, so no ledger entry is ever silently dropped.

use crate::application::error::{ApplicationError, ApplicationResult};
use crate::domain::entities::booking::{
    BookingDocument, BookingNote, BookingRequest, CustomsCompletion, StatusTransition,
    TrackingUpdate, TransportBooking,
};
use crate::domain::entities::provider::InsuranceOption;
use crate::domain::value_objects::{BookingId, Money};
use crate::infrastructure::persistence::traits::{BookingRepository, ProviderCatalog};
use std::sync::Arc;
use tracing::info;

/// Application service owning the booking lifecycle.
#[derive(Debug)]
pub struct BookingService {
    bookings: Arc<dyn BookingRepository>,
    catalog: Arc<dyn ProviderCatalog>,
}

impl BookingService {
    /// Creates a new service.
    #[must_use]
    pub fn new(bookings: Arc<dyn BookingRepository>, catalog: Arc<dyn ProviderCatalog>) -> Self {
        Self { bookings, catalog }
    }

    /// Creates a booking for a chosen provider and route.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::NotFound` when the provider does not
    /// exist, or a domain error when the request is invalid.
    pub async fn create(&self, request: BookingRequest) -> ApplicationResult<TransportBooking> {
        let provider_id = request.provider_id.clone();
        if self.catalog.get(&provider_id).await?.is_none() {
            return Err(ApplicationError::not_found(
                "TransportProvider",
                provider_id.to_string(),
            ));
        }

        let booking = TransportBooking::create(request)?;
        self.bookings.save(&booking).await?;
        info!(booking = %booking.id(), provider = %provider_id, "booking created");
        Ok(booking)
    }

    /// Gets a booking by ID.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::NotFound` for unknown bookings.
    pub async fn get(&self, id: &BookingId) -> ApplicationResult<TransportBooking> {
        self.bookings
            .get(id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("TransportBooking", id.to_string()))
    }

    /// Applies a lifecycle status transition.
    ///
    /// # Errors
    ///
    /// `NotFound` for unknown bookings, a precondition failure for
    /// transitions outside the lifecycle table, or a version conflict
    /// when a concurrent writer got there first.
    pub async fn update_status(
        &self,
        id: &BookingId,
        transition: &StatusTransition,
    ) -> ApplicationResult<TransportBooking> {
        let booking = self.get(id).await?;
        let next = booking.apply_status(transition)?;
        self.bookings.save(&next).await?;
        info!(booking = %id, status = %next.status(), "booking status updated");
        Ok(next)
    }

    /// Completes the customs-clearance sub-flow, auto-advancing a booking
    /// held in customs back to transit.
    ///
    /// # Errors
    ///
    /// `NotFound` for unknown bookings, a precondition failure when the
    /// booking has no required customs sub-flow, or a version conflict.
    pub async fn complete_customs_clearance(
        &self,
        id: &BookingId,
        completion: &CustomsCompletion,
    ) -> ApplicationResult<TransportBooking> {
        let booking = self.get(id).await?;
        let next = booking.complete_customs(completion)?;
        self.bookings.save(&next).await?;
        info!(booking = %id, status = %next.status(), "customs clearance completed");
        Ok(next)
    }

    /// Flags the customs sub-flow as blocked.
    ///
    /// # Errors
    ///
    /// `NotFound`, a precondition failure without a customs sub-flow, or a
    /// version conflict.
    pub async fn flag_customs_issue(
        &self,
        id: &BookingId,
        note: impl Into<String> + Send,
    ) -> ApplicationResult<TransportBooking> {
        let booking = self.get(id).await?;
        let next = booking.flag_customs_issue(note)?;
        self.bookings.save(&next).await?;
        Ok(next)
    }

    /// Applies a partial tracking update.
    ///
    /// # Errors
    ///
    /// `NotFound` for unknown bookings or a version conflict.
    pub async fn update_tracking(
        &self,
        id: &BookingId,
        update: &TrackingUpdate,
    ) -> ApplicationResult<TransportBooking> {
        let booking = self.get(id).await?;
        let next = booking.apply_tracking(update);
        self.bookings.save(&next).await?;
        Ok(next)
    }

    /// Attaches a document.
    ///
    /// # Errors
    ///
    /// `NotFound` for unknown bookings or a version conflict.
    pub async fn add_document(
        &self,
        id: &BookingId,
        document: BookingDocument,
    ) -> ApplicationResult<TransportBooking> {
        let booking = self.get(id).await?;
        let next = booking.with_document(document);
        self.bookings.save(&next).await?;
        Ok(next)
    }

    /// Attaches a note.
    ///
    /// # Errors
    ///
    /// `NotFound` for unknown bookings or a version conflict.
    pub async fn add_note(
        &self,
        id: &BookingId,
        note: BookingNote,
    ) -> ApplicationResult<TransportBooking> {
        let booking = self.get(id).await?;
        let next = booking.with_note(note);
        self.bookings.save(&next).await?;
        Ok(next)
    }

    /// Records the final invoiced price.
    ///
    /// # Errors
    ///
    /// `NotFound`, a domain validation error, or a version conflict.
    pub async fn record_actual_price(
        &self,
        id: &BookingId,
        amount: Money,
    ) -> ApplicationResult<TransportBooking> {
        let booking = self.get(id).await?;
        let next = booking.record_actual_price(amount)?;
        self.bookings.save(&next).await?;
        Ok(next)
    }

    /// Records that payment was received.
    ///
    /// # Errors
    ///
    /// `NotFound` for unknown bookings or a version conflict.
    pub async fn mark_paid(&self, id: &BookingId) -> ApplicationResult<TransportBooking> {
        let booking = self.get(id).await?;
        let next = booking.mark_paid();
        self.bookings.save(&next).await?;
        Ok(next)
    }

    /// Attaches one of the provider's insurance options to the booking.
    ///
    /// # Errors
    ///
    /// `NotFound` when the booking, its provider, or the named option does
    /// not exist; or a version conflict.
    pub async fn select_insurance(
        &self,
        id: &BookingId,
        option_name: &str,
    ) -> ApplicationResult<TransportBooking> {
        let booking = self.get(id).await?;
        let provider = self
            .catalog
            .get(booking.provider_id())
            .await?
            .ok_or_else(|| {
                ApplicationError::not_found(
                    "TransportProvider",
                    booking.provider_id().to_string(),
                )
            })?;
        let option: InsuranceOption = provider
            .insurance_options()
            .iter()
            .find(|o| o.name == option_name)
            .cloned()
            .ok_or_else(|| ApplicationError::not_found("InsuranceOption", option_name))?;

        let next = booking.select_insurance(option);
        self.bookings.save(&next).await?;
        Ok(next)
    }
}
