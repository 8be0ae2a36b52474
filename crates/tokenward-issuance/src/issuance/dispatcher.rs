//! Flow classification.
//!
//! Classification is a precondition of issuance: an unrecognized grant is
//! rejected here, before any token service call or store write.

use crate::IssuanceResult;
use crate::error::IssuanceError;
use crate::types::grant::GrantType;
use crate::types::request::{AuthorizationCode, ValidatedTokenRequest};

/// Composition path for a validated request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow<'a> {
    /// Authorization code exchange, carrying the consumed code record.
    AuthorizationCode(&'a AuthorizationCode),
    /// Client credentials, resource owner password, or extension grant.
    DirectGrant,
}

impl<'a> Flow<'a> {
    /// Classifies a request by grant type and assertion presence.
    ///
    /// # Errors
    ///
    /// - `UnsupportedGrantType` if the grant is not an issuance flow and no
    ///   assertion is present
    /// - `Internal` if an authorization code grant carries no code record
    pub fn classify(request: &'a ValidatedTokenRequest) -> IssuanceResult<Self> {
        match GrantType::parse(&request.grant_type) {
            Some(GrantType::AuthorizationCode) => request
                .authorization_code
                .as_ref()
                .map(Flow::AuthorizationCode)
                .ok_or_else(|| {
                    IssuanceError::internal(
                        "authorization_code request carries no authorization code record",
                    )
                }),
            Some(GrantType::ClientCredentials | GrantType::Password) => Ok(Flow::DirectGrant),
            _ if request.has_assertion() => Ok(Flow::DirectGrant),
            _ => Err(IssuanceError::unsupported_grant_type(&request.grant_type)),
        }
    }

    /// Returns the flow name used in audit events.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Flow::AuthorizationCode(_) => "authorization_code",
            Flow::DirectGrant => "direct_grant",
        }
    }

    /// Returns the code record for authorization code exchanges.
    #[must_use]
    pub fn authorization_code(&self) -> Option<&'a AuthorizationCode> {
        match self {
            Flow::AuthorizationCode(code) => Some(code),
            Flow::DirectGrant => None,
        }
    }
}
