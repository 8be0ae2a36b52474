//! Authenticated client as seen by the issuance engine.
//!
//! Client authentication happens upstream. By the time a request reaches the
//! issuance engine only the client's identity and its token policy matter.

use serde::{Deserialize, Serialize};

/// Default access token lifetime in seconds (1 hour).
pub const DEFAULT_ACCESS_TOKEN_LIFETIME: u32 = 3600;

/// Default refresh token lifetime in seconds (30 days).
pub const DEFAULT_REFRESH_TOKEN_LIFETIME: u32 = 2_592_000;

/// How access tokens issued to a client are serialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessTokenType {
    /// Self-contained signed JWT.
    #[default]
    Jwt,
    /// Opaque handle pointing at a token kept in the token handle store.
    Reference,
}

/// OAuth 2.0 client and its token lifetime policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    /// Unique client identifier used in OAuth flows.
    pub client_id: String,

    /// Access token lifetime in seconds.
    pub access_token_lifetime: u32,

    /// Refresh token lifetime in seconds.
    pub refresh_token_lifetime: u32,

    /// Access token serialization.
    #[serde(default)]
    pub access_token_type: AccessTokenType,
}

impl Client {
    /// Creates a client with default lifetimes and JWT access tokens.
    #[must_use]
    pub fn new(client_id: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            access_token_lifetime: DEFAULT_ACCESS_TOKEN_LIFETIME,
            refresh_token_lifetime: DEFAULT_REFRESH_TOKEN_LIFETIME,
            access_token_type: AccessTokenType::Jwt,
        }
    }

    /// Sets the access token lifetime in seconds.
    #[must_use]
    pub fn with_access_token_lifetime(mut self, seconds: u32) -> Self {
        self.access_token_lifetime = seconds;
        self
    }

    /// Sets the refresh token lifetime in seconds.
    #[must_use]
    pub fn with_refresh_token_lifetime(mut self, seconds: u32) -> Self {
        self.refresh_token_lifetime = seconds;
        self
    }

    /// Sets the access token serialization.
    #[must_use]
    pub fn with_access_token_type(mut self, token_type: AccessTokenType) -> Self {
        self.access_token_type = token_type;
        self
    }
}
