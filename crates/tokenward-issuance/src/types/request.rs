//! Validated token request and authorization code record.
//!
//! Both are produced by upstream validation (client authentication, grant,
//! scope and redirect checks) and are read-only to the issuance engine.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::client::Client;
use super::grant::{GrantType, OFFLINE_ACCESS_SCOPE, OPENID_SCOPE};

/// Raw request parameters forwarded to token creation for claims enrichment
/// and auditing.
pub type RequestParameters = BTreeMap<String, String>;

/// Scopes approved by scope validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatedScopes {
    /// The subset of requested scopes actually granted.
    pub granted: Vec<String>,
}

impl ValidatedScopes {
    /// Creates a scope set from granted scope values.
    #[must_use]
    pub fn new<I, S>(granted: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            granted: granted.into_iter().map(Into::into).collect(),
        }
    }

    /// Parses a space-separated scope string.
    #[must_use]
    pub fn from_scope_string(scope: &str) -> Self {
        Self::new(scope.split_whitespace())
    }

    /// Returns `true` if the given scope was granted.
    #[must_use]
    pub fn contains(&self, scope: &str) -> bool {
        self.granted.iter().any(|s| s == scope)
    }

    /// Returns `true` if `offline_access` was granted.
    #[must_use]
    pub fn contains_offline_access(&self) -> bool {
        self.contains(OFFLINE_ACCESS_SCOPE)
    }
}

/// Authorization code consumed upstream for this exchange.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorizationCode {
    /// Resource owner that approved the authorization request.
    pub subject: String,

    /// Client the code was issued to.
    pub client: Client,

    /// Scopes requested at authorization time.
    pub requested_scopes: Vec<String>,

    /// Whether the authorization request carried the `openid` scope.
    pub is_openid: bool,

    /// Raw parameters of the authorization request.
    #[serde(default)]
    pub raw: RequestParameters,
}

impl AuthorizationCode {
    /// Creates a code record, deriving `is_openid` from the requested scopes.
    #[must_use]
    pub fn new<I, S>(subject: impl Into<String>, client: Client, requested_scopes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let requested_scopes: Vec<String> =
            requested_scopes.into_iter().map(Into::into).collect();
        let is_openid = requested_scopes.iter().any(|s| s == OPENID_SCOPE);
        Self {
            subject: subject.into(),
            client,
            requested_scopes,
            is_openid,
            raw: RequestParameters::new(),
        }
    }

    /// Sets the raw authorization request parameters.
    #[must_use]
    pub fn with_raw(mut self, raw: RequestParameters) -> Self {
        self.raw = raw;
        self
    }
}

/// A token request that passed client authentication and grant validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidatedTokenRequest {
    /// The grant_type parameter as sent by the client.
    pub grant_type: String,

    /// Consumed authorization code (authorization_code grant only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authorization_code: Option<AuthorizationCode>,

    /// Resource owner for direct grants (None for client credentials).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,

    /// The authenticated client.
    pub client: Client,

    /// Scopes granted by validation.
    pub scopes: ValidatedScopes,

    /// Extension grant assertion, if one was presented.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assertion: Option<String>,

    /// Raw token request parameters.
    #[serde(default)]
    pub raw: RequestParameters,
}

impl ValidatedTokenRequest {
    /// Creates an authorization code exchange request.
    ///
    /// The client is inherited from the code record.
    #[must_use]
    pub fn authorization_code(code: AuthorizationCode, scopes: ValidatedScopes) -> Self {
        Self {
            grant_type: GrantType::AuthorizationCode.as_str().to_string(),
            client: code.client.clone(),
            subject: Some(code.subject.clone()),
            authorization_code: Some(code),
            scopes,
            assertion: None,
            raw: RequestParameters::new(),
        }
    }

    /// Creates a client credentials request.
    #[must_use]
    pub fn client_credentials(client: Client, scopes: ValidatedScopes) -> Self {
        Self::direct(GrantType::ClientCredentials.as_str(), None, client, scopes)
    }

    /// Creates a resource owner password request.
    #[must_use]
    pub fn password(subject: impl Into<String>, client: Client, scopes: ValidatedScopes) -> Self {
        Self::direct(
            GrantType::Password.as_str(),
            Some(subject.into()),
            client,
            scopes,
        )
    }

    /// Creates an extension grant request carrying an assertion.
    #[must_use]
    pub fn assertion(
        grant_type: impl Into<String>,
        assertion: impl Into<String>,
        subject: Option<String>,
        client: Client,
        scopes: ValidatedScopes,
    ) -> Self {
        let mut request = Self::direct(grant_type, subject, client, scopes);
        request.assertion = Some(assertion.into());
        request
    }

    /// Creates a direct grant request with an arbitrary grant type value.
    #[must_use]
    pub fn direct(
        grant_type: impl Into<String>,
        subject: Option<String>,
        client: Client,
        scopes: ValidatedScopes,
    ) -> Self {
        Self {
            grant_type: grant_type.into(),
            authorization_code: None,
            subject,
            client,
            scopes,
            assertion: None,
            raw: RequestParameters::new(),
        }
    }

    /// Sets the raw request parameters.
    #[must_use]
    pub fn with_raw(mut self, raw: RequestParameters) -> Self {
        self.raw = raw;
        self
    }

    /// Returns `true` if an extension grant assertion is present.
    #[must_use]
    pub fn has_assertion(&self) -> bool {
        self.assertion.as_deref().is_some_and(|a| !a.trim().is_empty())
    }
}
