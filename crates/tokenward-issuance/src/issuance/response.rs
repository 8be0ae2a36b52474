//! Token endpoint response.
//!
//! # Example Response
//!
//! ```json
//! {
//!   "access_token": "eyJhbG...",
//!   "token_type": "Bearer",
//!   "expires_in": 3600,
//!   "refresh_token": "q8mZ...",
//!   "id_token": "eyJhbG..."
//! }
//! ```

use serde::Serialize;

use super::access_token::IssuedAccessToken;

/// Successful token response.
///
/// Optional fields are omitted from the JSON body when absent; their
/// presence is meaningful to the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenResponse {
    /// The access token.
    pub access_token: String,

    /// Token type, always "Bearer".
    pub token_type: String,

    /// Access token lifetime in seconds.
    pub expires_in: u64,

    /// Refresh token handle (if offline_access was granted).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,

    /// Identity token (OpenID Connect authorization code exchanges only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id_token: Option<String>,
}

impl TokenResponse {
    /// Creates a new token response with required fields.
    #[must_use]
    pub fn new(access_token: String, expires_in: u64) -> Self {
        Self {
            access_token,
            token_type: "Bearer".to_string(),
            expires_in,
            refresh_token: None,
            id_token: None,
        }
    }

    /// Sets the refresh token.
    #[must_use]
    pub fn with_refresh_token(mut self, token: String) -> Self {
        self.refresh_token = Some(token);
        self
    }

    /// Sets the ID token.
    #[must_use]
    pub fn with_id_token(mut self, token: String) -> Self {
        self.id_token = Some(token);
        self
    }

    /// Assembles the response from the issued artifacts.
    #[must_use]
    pub fn compose(
        access_token: IssuedAccessToken,
        access_token_lifetime: u32,
        identity_token: Option<String>,
    ) -> Self {
        let IssuedAccessToken {
            signed_access_token,
            refresh_token,
        } = access_token;

        let mut response = Self::new(signed_access_token, u64::from(access_token_lifetime));
        if let Some(record) = refresh_token {
            response = response.with_refresh_token(record.handle);
        }
        if let Some(id_token) = identity_token {
            response = response.with_id_token(id_token);
        }
        response
    }
}
