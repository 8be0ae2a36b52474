//! In-memory reference token storage.

use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use time::OffsetDateTime;
use tokenward_issuance::IssuanceResult;
use tokenward_issuance::error::IssuanceError;
use tokenward_issuance::storage::TokenHandleStorage;
use tokenward_issuance::types::Token;

/// Reference access tokens keyed by handle.
#[derive(Debug, Default)]
pub struct InMemoryTokenHandleStorage {
    tokens: DashMap<String, Token>,
}

impl InMemoryTokenHandleStorage {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored tokens.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Returns `true` if no tokens are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Drops every token that has expired at `now`.
    pub fn remove_expired(&self, now: OffsetDateTime) -> usize {
        let before = self.tokens.len();
        self.tokens.retain(|_, token| token.expires_at() > now);
        before.saturating_sub(self.tokens.len())
    }
}

#[async_trait]
impl TokenHandleStorage for InMemoryTokenHandleStorage {
    async fn store(&self, handle: &str, token: &Token) -> IssuanceResult<()> {
        match self.tokens.entry(handle.to_string()) {
            Entry::Occupied(_) => Err(IssuanceError::storage("token handle already exists")),
            Entry::Vacant(slot) => {
                slot.insert(token.clone());
                Ok(())
            }
        }
    }

    async fn get(&self, handle: &str) -> IssuanceResult<Option<Token>> {
        Ok(self.tokens.get(handle).map(|t| t.value().clone()))
    }

    async fn remove(&self, handle: &str) -> IssuanceResult<bool> {
        Ok(self.tokens.remove(handle).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use time::Duration;
    use time::macros::datetime;
    use tokenward_issuance::types::{AccessTokenType, Client, RequestParameters, TokenKind};

    fn token(lifetime: u32) -> Token {
        Token {
            kind: TokenKind::AccessToken,
            issuer: "https://idp.example.com".to_string(),
            audience: "https://idp.example.com/resources".to_string(),
            subject: None,
            client: Client::new("svc").with_access_token_type(AccessTokenType::Reference),
            scopes: vec!["api1".to_string()],
            lifetime,
            creation_time: datetime!(2024-03-01 08:00 UTC),
            claims: BTreeMap::new(),
            raw: RequestParameters::new(),
        }
    }

    #[tokio::test]
    async fn test_store_get_remove() {
        let storage = InMemoryTokenHandleStorage::new();
        storage.store("ref-1", &token(60)).await.unwrap();

        assert_eq!(storage.get("ref-1").await.unwrap(), Some(token(60)));
        assert!(storage.remove("ref-1").await.unwrap());
        assert!(storage.is_empty());
    }

    #[tokio::test]
    async fn test_duplicate_handle_is_rejected() {
        let storage = InMemoryTokenHandleStorage::new();
        storage.store("ref-1", &token(60)).await.unwrap();

        let err = storage.store("ref-1", &token(120)).await.unwrap_err();

        assert!(matches!(err, IssuanceError::Storage { .. }));
        assert_eq!(storage.len(), 1);
    }

    #[tokio::test]
    async fn test_remove_expired() {
        let storage = InMemoryTokenHandleStorage::new();
        storage.store("a", &token(10)).await.unwrap();
        storage.store("b", &token(100)).await.unwrap();

        let now = datetime!(2024-03-01 08:00 UTC) + Duration::seconds(10);
        let removed = storage.remove_expired(now);

        assert_eq!(removed, 1);
        assert!(storage.get("b").await.unwrap().is_some());
    }
}
