//! Token handle storage trait.
//!
//! Reference access tokens are not self-contained: the client receives an
//! opaque handle and the token content lives in this store, where a
//! resource server (or introspection endpoint) looks it up.

use async_trait::async_trait;

use crate::IssuanceResult;
use crate::types::token::Token;

/// Storage trait for reference access tokens.
#[async_trait]
pub trait TokenHandleStorage: Send + Sync {
    /// Stores a token under `handle`.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the token cannot be written.
    async fn store(&self, handle: &str, token: &Token) -> IssuanceResult<()>;

    /// Finds a token by handle.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    async fn get(&self, handle: &str) -> IssuanceResult<Option<Token>>;

    /// Removes a token. Returns `true` if one was removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    async fn remove(&self, handle: &str) -> IssuanceResult<bool>;
}
