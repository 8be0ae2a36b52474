//! Refresh token record.
//!
//! This module defines the record persisted for every issued refresh token.
//!
//! # Invariants
//!
//! - A record exists for every handle ever returned to a client; the record is
//!   written before the handle leaves the issuance engine
//! - The record embeds the access token it was derived from, so a later
//!   refresh can re-mint an equivalent access token without replaying the
//!   original grant

use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};

use super::token::Token;

/// Refresh token persisted in the refresh token store.
///
/// The record is keyed by its opaque handle, which is the value handed to
/// the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshTokenRecord {
    /// Opaque handle (primary key in the refresh token store).
    pub handle: String,

    /// Client ID that this token was issued to.
    pub client_id: String,

    /// When this token was created.
    #[serde(with = "time::serde::rfc3339")]
    pub creation_time: OffsetDateTime,

    /// Lifetime in seconds, taken from the client's policy.
    pub lifetime: u32,

    /// Access token context the refresh token was derived from.
    pub access_token: Token,
}

impl RefreshTokenRecord {
    /// Returns the instant this token expires.
    #[must_use]
    pub fn expires_at(&self) -> OffsetDateTime {
        self.creation_time + Duration::seconds(i64::from(self.lifetime))
    }

    /// Returns `true` if this token has expired at `now`.
    #[must_use]
    pub fn is_expired(&self, now: OffsetDateTime) -> bool {
        now >= self.expires_at()
    }

    /// Returns the resource owner of the embedded access token.
    #[must_use]
    pub fn subject(&self) -> Option<&str> {
        self.access_token.subject.as_deref()
    }

    /// Returns the scopes of the embedded access token.
    #[must_use]
    pub fn scopes(&self) -> &[String] {
        &self.access_token.scopes
    }
}
