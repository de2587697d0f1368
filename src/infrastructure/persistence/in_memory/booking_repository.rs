//! # In-Memory Booking Repository
//!
//! In-memory implementation of [`BookingRepository`] with real optimistic
//! versioning, suitable for tests and embedded use.

use crate::domain::entities::booking::TransportBooking;
use crate::domain::value_objects::{BookingId, PartyId};
use crate::infrastructure::persistence::traits::{
    BookingRepository, RepositoryError, RepositoryResult,
};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// In-memory implementation of [`BookingRepository`].
///
/// Uses a thread-safe `HashMap` for storage. Version checks are enforced
/// exactly as a database-backed implementation would: a stale write loses
/// the race and gets `RepositoryError::VersionConflict`.
#[derive(Debug, Clone, Default)]
pub struct InMemoryBookingRepository {
    storage: Arc<RwLock<HashMap<BookingId, TransportBooking>>>,
}

impl InMemoryBookingRepository {
    /// Creates a new empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears all bookings.
    pub async fn clear(&self) {
        self.storage.write().await.clear();
    }
}

#[async_trait]
impl BookingRepository for InMemoryBookingRepository {
    async fn save(&self, booking: &TransportBooking) -> RepositoryResult<()> {
        let mut storage = self.storage.write().await;
        let expected = storage
            .get(&booking.id())
            .map_or(1, |stored| stored.version() + 1);

        if booking.version() != expected {
            return Err(RepositoryError::version_conflict(
                "TransportBooking",
                booking.id().to_string(),
                expected,
                booking.version(),
            ));
        }

        storage.insert(booking.id(), booking.clone());
        Ok(())
    }

    async fn get(&self, id: &BookingId) -> RepositoryResult<Option<TransportBooking>> {
        let storage = self.storage.read().await;
        Ok(storage.get(id).cloned())
    }

    async fn find_by_buyer(&self, buyer_id: &PartyId) -> RepositoryResult<Vec<TransportBooking>> {
        let storage = self.storage.read().await;
        Ok(storage
            .values()
            .filter(|b| b.buyer_id() == buyer_id)
            .cloned()
            .collect())
    }

    async fn find_active(&self) -> RepositoryResult<Vec<TransportBooking>> {
        let storage = self.storage.read().await;
        Ok(storage
            .values()
            .filter(|b| !b.is_terminal())
            .cloned()
            .collect())
    }

    async fn count(&self) -> RepositoryResult<u64> {
        let storage = self.storage.read().await;
        Ok(storage.len() as u64)
    }
}
