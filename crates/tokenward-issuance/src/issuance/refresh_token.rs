//! Refresh token lifecycle: handle generation, record construction and
//! persistence.

use std::sync::Arc;

use crate::IssuanceResult;
use crate::clock::Clock;
use crate::handle::HandleGenerator;
use crate::storage::refresh_token::RefreshTokenStorage;
use crate::types::client::Client;
use crate::types::refresh_token::RefreshTokenRecord;
use crate::types::token::Token;

/// Issues refresh tokens bound to an access token context.
pub struct RefreshTokenIssuer {
    storage: Arc<dyn RefreshTokenStorage>,
    handles: Arc<dyn HandleGenerator>,
    clock: Arc<dyn Clock>,
}

impl RefreshTokenIssuer {
    /// Creates a new refresh token issuer.
    #[must_use]
    pub fn new(
        storage: Arc<dyn RefreshTokenStorage>,
        handles: Arc<dyn HandleGenerator>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            storage,
            handles,
            clock,
        }
    }

    /// Generates a handle and persists its record.
    ///
    /// The record (and with it the handle) is returned only after the store
    /// acknowledged the write.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the record cannot be persisted.
    pub async fn issue(
        &self,
        client: &Client,
        access_token: &Token,
    ) -> IssuanceResult<RefreshTokenRecord> {
        let handle = self.handles.generate();

        let record = RefreshTokenRecord {
            handle: handle.clone(),
            client_id: client.client_id.clone(),
            creation_time: self.clock.now(),
            lifetime: client.refresh_token_lifetime,
            access_token: access_token.clone(),
        };

        self.storage
            .store(&handle, &record)
            .await
            .map_err(|e| e.into_storage())?;

        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::error::IssuanceError;
    use crate::types::request::RequestParameters;
    use crate::types::token::TokenKind;
    use async_trait::async_trait;
    use std::collections::{BTreeMap, HashMap};
    use std::sync::RwLock;
    use time::macros::datetime;

    struct MockRefreshTokenStorage {
        records: RwLock<HashMap<String, RefreshTokenRecord>>,
        error: Option<fn() -> IssuanceError>,
    }

    #[async_trait]
    impl RefreshTokenStorage for MockRefreshTokenStorage {
        async fn store(&self, handle: &str, record: &RefreshTokenRecord) -> IssuanceResult<()> {
            if let Some(error) = self.error {
                return Err(error());
            }
            self.records
                .write()
                .unwrap()
                .insert(handle.to_string(), record.clone());
            Ok(())
        }

        async fn get(&self, handle: &str) -> IssuanceResult<Option<RefreshTokenRecord>> {
            Ok(self.records.read().unwrap().get(handle).cloned())
        }

        async fn remove(&self, handle: &str) -> IssuanceResult<bool> {
            Ok(self.records.write().unwrap().remove(handle).is_some())
        }
    }

    struct FixedHandle(&'static str);

    impl HandleGenerator for FixedHandle {
        fn generate(&self) -> String {
            self.0.to_string()
        }
    }

    fn access_token(client: &Client) -> Token {
        Token {
            kind: TokenKind::AccessToken,
            issuer: "https://idp.example.com".to_string(),
            audience: "https://idp.example.com/resources".to_string(),
            subject: Some("alice".to_string()),
            client: client.clone(),
            scopes: vec!["api1".to_string(), "offline_access".to_string()],
            lifetime: client.access_token_lifetime,
            creation_time: datetime!(2024-02-02 09:00 UTC),
            claims: BTreeMap::new(),
            raw: RequestParameters::new(),
        }
    }

    fn issuer(storage: Arc<MockRefreshTokenStorage>) -> RefreshTokenIssuer {
        RefreshTokenIssuer::new(
            storage,
            Arc::new(FixedHandle("handle-1")),
            Arc::new(FixedClock::new(datetime!(2024-02-02 09:00:01 UTC))),
        )
    }

    #[tokio::test]
    async fn test_issue_persists_record() {
        let storage = Arc::new(MockRefreshTokenStorage {
            records: RwLock::new(HashMap::new()),
            error: None,
        });
        let client = Client::new("web").with_refresh_token_lifetime(7200);
        let token = access_token(&client);

        let record = issuer(storage.clone()).issue(&client, &token).await.unwrap();

        assert_eq!(record.handle, "handle-1");
        let stored = storage.get("handle-1").await.unwrap().unwrap();
        assert_eq!(stored, record);
        assert_eq!(stored.client_id, "web");
        assert_eq!(stored.lifetime, 7200);
        assert_eq!(stored.creation_time, datetime!(2024-02-02 09:00:01 UTC));
        assert_eq!(stored.access_token, token);
    }

    #[tokio::test]
    async fn test_store_failure_is_storage_error() {
        let storage = Arc::new(MockRefreshTokenStorage {
            records: RwLock::new(HashMap::new()),
            error: Some(|| IssuanceError::internal("connection reset")),
        });
        let client = Client::new("web");

        let err = issuer(storage.clone())
            .issue(&client, &access_token(&client))
            .await
            .unwrap_err();

        assert!(matches!(err, IssuanceError::Storage { .. }));
        assert!(storage.records.read().unwrap().is_empty());
    }
}
