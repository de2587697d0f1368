//! # Customs Reference
//!
//! Port for per-country import requirements.
//!
//! The reference only feeds default lead-time estimates and informational
//! notes; it never computes duties. A country missing from the reference
//! means "no special requirement", so the lookup returns `Option` rather
//! than an error.

use crate::domain::value_objects::CountryCode;
use async_trait::async_trait;
use std::collections::HashMap;
use std::fmt;

/// Import requirements for one destination country.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountryCustomsInfo {
    /// Human-readable country name.
    pub country_name: String,
    /// Whether a transit document (carnet) is required, which extends the
    /// default cross-border lead time.
    pub carnet_required: bool,
    /// Informational notes shown to the booking agent.
    pub notes: Option<String>,
}

impl CountryCustomsInfo {
    /// Creates an entry without notes.
    #[must_use]
    pub fn new(country_name: impl Into<String>, carnet_required: bool) -> Self {
        Self {
            country_name: country_name.into(),
            carnet_required,
            notes: None,
        }
    }

    /// Sets the informational notes.
    #[must_use]
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}

/// Port for looking up per-country import requirements.
#[async_trait]
pub trait CustomsReference: Send + Sync + fmt::Debug {
    /// Looks up the requirements for a destination country.
    ///
    /// `None` means the country has no special requirement on record.
    async fn lookup(&self, country: &CountryCode) -> Option<CountryCustomsInfo>;
}

/// In-memory customs reference, seeded once at construction.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCustomsReference {
    entries: HashMap<CountryCode, CountryCustomsInfo>,
}

impl InMemoryCustomsReference {
    /// Creates an empty reference (every lookup misses).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds an entry.
    #[must_use]
    pub fn with_entry(mut self, country: CountryCode, info: CountryCustomsInfo) -> Self {
        self.entries.insert(country, info);
        self
    }
}

#[async_trait]
impl CustomsReference for InMemoryCustomsReference {
    async fn lookup(&self, country: &CountryCode) -> Option<CountryCustomsInfo> {
        self.entries.get(country).cloned()
    }
}
