//! In-memory refresh token storage.

use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use time::OffsetDateTime;
use tokenward_issuance::IssuanceResult;
use tokenward_issuance::error::IssuanceError;
use tokenward_issuance::storage::RefreshTokenStorage;
use tokenward_issuance::types::RefreshTokenRecord;

/// Refresh token records keyed by handle.
#[derive(Debug, Default)]
pub struct InMemoryRefreshTokenStorage {
    records: DashMap<String, RefreshTokenRecord>,
}

impl InMemoryRefreshTokenStorage {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty store with room for `capacity` records.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            records: DashMap::with_capacity(capacity),
        }
    }

    /// Returns the number of stored records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if no records are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Drops every record that has expired at `now`. Returns the number of
    /// records removed.
    pub fn remove_expired(&self, now: OffsetDateTime) -> usize {
        let before = self.records.len();
        self.records.retain(|_, record| !record.is_expired(now));
        let removed = before.saturating_sub(self.records.len());
        if removed > 0 {
            tracing::debug!(removed, "expired refresh tokens removed");
        }
        removed
    }
}

#[async_trait]
impl RefreshTokenStorage for InMemoryRefreshTokenStorage {
    async fn store(&self, handle: &str, record: &RefreshTokenRecord) -> IssuanceResult<()> {
        match self.records.entry(handle.to_string()) {
            Entry::Occupied(_) => {
                tracing::warn!(client_id = %record.client_id, "refresh token handle collision");
                Err(IssuanceError::storage("refresh token handle already exists"))
            }
            Entry::Vacant(slot) => {
                slot.insert(record.clone());
                Ok(())
            }
        }
    }

    async fn get(&self, handle: &str) -> IssuanceResult<Option<RefreshTokenRecord>> {
        Ok(self.records.get(handle).map(|r| r.value().clone()))
    }

    async fn remove(&self, handle: &str) -> IssuanceResult<bool> {
        Ok(self.records.remove(handle).is_some())
    }
}
