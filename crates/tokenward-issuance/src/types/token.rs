//! Unsigned token model.
//!
//! A [`Token`] is the semantic content of an access or identity token before
//! it is serialized by the token service. Refresh token records embed the
//! access [`Token`] they were derived from.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};

use super::client::Client;
use super::request::RequestParameters;

/// What a token is used for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    /// OAuth 2.0 access token.
    AccessToken,
    /// OpenID Connect identity token.
    IdentityToken,
}

/// Token content before signing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Token {
    /// Token kind.
    pub kind: TokenKind,

    /// Issuer URL.
    pub issuer: String,

    /// Audience (resource URL for access tokens, client ID for identity tokens).
    pub audience: String,

    /// Resource owner. Absent for client credentials tokens.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,

    /// Client the token is issued to.
    pub client: Client,

    /// Scopes bound to the token.
    pub scopes: Vec<String>,

    /// Lifetime in seconds.
    pub lifetime: u32,

    /// When the token was created.
    #[serde(with = "time::serde::rfc3339")]
    pub creation_time: OffsetDateTime,

    /// Additional claims.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub claims: BTreeMap<String, serde_json::Value>,

    /// Raw request parameters the token was created from.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub raw: RequestParameters,
}

impl Token {
    /// Returns the instant this token expires.
    #[must_use]
    pub fn expires_at(&self) -> OffsetDateTime {
        self.creation_time + Duration::seconds(i64::from(self.lifetime))
    }

    /// Returns the ID of the client the token is issued to.
    #[must_use]
    pub fn client_id(&self) -> &str {
        &self.client.client_id
    }

    /// Returns the scopes as a space-separated string.
    #[must_use]
    pub fn scope_string(&self) -> String {
        self.scopes.join(" ")
    }
}
