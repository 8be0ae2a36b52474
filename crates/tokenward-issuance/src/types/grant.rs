//! OAuth 2.0 grant types and well-known scope values.

use serde::{Deserialize, Serialize};

/// Scope whose presence signals that the client wants a refresh token.
pub const OFFLINE_ACCESS_SCOPE: &str = "offline_access";

/// Scope that turns an OAuth 2.0 request into an OpenID Connect request.
pub const OPENID_SCOPE: &str = "openid";

/// OAuth 2.0 grant types known to the identity provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrantType {
    /// Authorization Code flow.
    AuthorizationCode,
    /// Client Credentials flow (confidential clients only).
    ClientCredentials,
    /// Resource Owner Password Credentials flow.
    Password,
    /// Refresh Token flow.
    RefreshToken,
}

impl GrantType {
    /// Returns the OAuth 2.0 grant_type parameter value.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AuthorizationCode => "authorization_code",
            Self::ClientCredentials => "client_credentials",
            Self::Password => "password",
            Self::RefreshToken => "refresh_token",
        }
    }

    /// Parses a grant_type parameter value.
    ///
    /// Returns `None` for extension grants and unknown values.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "authorization_code" => Some(Self::AuthorizationCode),
            "client_credentials" => Some(Self::ClientCredentials),
            "password" => Some(Self::Password),
            "refresh_token" => Some(Self::RefreshToken),
            _ => None,
        }
    }
}

impl std::fmt::Display for GrantType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_grants() {
        for grant in [
            GrantType::AuthorizationCode,
            GrantType::ClientCredentials,
            GrantType::Password,
            GrantType::RefreshToken,
        ] {
            assert_eq!(GrantType::parse(grant.as_str()), Some(grant));
        }
    }

    #[test]
    fn test_parse_unknown_grant() {
        assert_eq!(GrantType::parse("unknown-grant-xyz"), None);
        assert_eq!(
            GrantType::parse("urn:ietf:params:oauth:grant-type:jwt-bearer"),
            None
        );
        assert_eq!(GrantType::parse("Authorization_Code"), None);
    }

    #[test]
    fn test_serde_snake_case() {
        let json = serde_json::to_string(&GrantType::ClientCredentials).unwrap();
        assert_eq!(json, "\"client_credentials\"");
    }
}
