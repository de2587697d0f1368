//! # In-Memory Provider Catalog
//!
//! In-memory implementation of [`ProviderCatalog`] backing the quote
//! engine in tests and embedded deployments.

use crate::domain::entities::provider::TransportProvider;
use crate::domain::value_objects::ProviderId;
use crate::infrastructure::persistence::traits::{
    ProviderCatalog, RepositoryResult, RouteQuery,
};
use async_trait::async_trait;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// In-memory implementation of [`ProviderCatalog`].
///
/// The eligibility query is a filter plus sort over the provider map:
/// preferred providers first, then by average rating descending, with the
/// provider ID as the final tiebreak so the ordering is deterministic for
/// a given catalog snapshot.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProviderCatalog {
    storage: Arc<RwLock<HashMap<ProviderId, TransportProvider>>>,
}

impl InMemoryProviderCatalog {
    /// Creates a new empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a provider and returns the catalog, for test setup chains.
    pub async fn seeded(self, provider: TransportProvider) -> Self {
        self.storage
            .write()
            .await
            .insert(provider.id().clone(), provider);
        self
    }
}

#[async_trait]
impl ProviderCatalog for InMemoryProviderCatalog {
    async fn save(&self, provider: &TransportProvider) -> RepositoryResult<()> {
        let mut storage = self.storage.write().await;
        storage.insert(provider.id().clone(), provider.clone());
        Ok(())
    }

    async fn get(&self, id: &ProviderId) -> RepositoryResult<Option<TransportProvider>> {
        let storage = self.storage.read().await;
        Ok(storage.get(id).cloned())
    }

    async fn find_eligible(&self, query: &RouteQuery) -> RepositoryResult<Vec<TransportProvider>> {
        let storage = self.storage.read().await;
        let mut eligible: Vec<TransportProvider> = storage
            .values()
            .filter(|p| p.is_eligible_for(&query.from, &query.to, query.vehicle_type))
            .cloned()
            .collect();

        eligible.sort_by(|a, b| {
            b.is_preferred()
                .cmp(&a.is_preferred())
                .then_with(|| {
                    b.average_rating()
                        .partial_cmp(&a.average_rating())
                        .unwrap_or(Ordering::Equal)
                })
                .then_with(|| a.id().cmp(b.id()))
        });

        Ok(eligible)
    }

    async fn count(&self) -> RepositoryResult<u64> {
        let storage = self.storage.read().await;
        Ok(storage.len() as u64)
    }
}
