//! Refresh token storage trait.
//!
//! This module defines the storage interface for refresh token records.
//!
//! # Consistency Requirements
//!
//! - `store` must be atomic per handle and must not return before the write
//!   is durable; the issuance engine hands the handle to the client only
//!   after `store` returns `Ok`
//! - A write for a handle that already exists must fail rather than
//!   overwrite the existing record
//! - Expired records may be reclaimed at any time

use async_trait::async_trait;

use crate::IssuanceResult;
use crate::types::refresh_token::RefreshTokenRecord;

/// Storage trait for refresh token records.
///
/// # Implementations
///
/// Implementations are provided in separate crates:
/// - `tokenward-memory` - concurrent in-memory store
#[async_trait]
pub trait RefreshTokenStorage: Send + Sync {
    /// Stores a new refresh token record under `handle`.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the record cannot be written (duplicate
    /// handle, storage unavailable).
    async fn store(&self, handle: &str, record: &RefreshTokenRecord) -> IssuanceResult<()>;

    /// Finds a refresh token record by handle.
    ///
    /// Returns records regardless of expiration; callers check
    /// [`RefreshTokenRecord::is_expired`].
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    async fn get(&self, handle: &str) -> IssuanceResult<Option<RefreshTokenRecord>>;

    /// Removes a refresh token record.
    ///
    /// Returns `true` if a record was removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    async fn remove(&self, handle: &str) -> IssuanceResult<bool>;
}
