//! Access token assembly.
//!
//! The access token is bound to the authorization code record when one is
//! present (the code is the authoritative grant for the exchange) and to the
//! request itself otherwise. A refresh token is only issued after the access
//! token has been signed, so a signing failure never leaves a stored record
//! behind.

use std::sync::Arc;

use crate::IssuanceResult;
use crate::issuance::refresh_token::RefreshTokenIssuer;
use crate::token::service::TokenService;
use crate::types::refresh_token::RefreshTokenRecord;
use crate::types::request::ValidatedTokenRequest;

/// Signed access token and the refresh token issued alongside it.
#[derive(Debug, Clone, PartialEq)]
pub struct IssuedAccessToken {
    /// Serialized access token.
    pub signed_access_token: String,

    /// Persisted refresh token, when offline access was granted.
    pub refresh_token: Option<RefreshTokenRecord>,
}

impl IssuedAccessToken {
    /// Returns the refresh token handle, if one was issued.
    #[must_use]
    pub fn refresh_handle(&self) -> Option<&str> {
        self.refresh_token.as_ref().map(|r| r.handle.as_str())
    }
}

/// Builds, signs and optionally pairs access tokens with refresh tokens.
pub struct AccessTokenAssembler {
    token_service: Arc<dyn TokenService>,
    refresh_tokens: RefreshTokenIssuer,
}

impl AccessTokenAssembler {
    /// Creates a new assembler.
    #[must_use]
    pub fn new(token_service: Arc<dyn TokenService>, refresh_tokens: RefreshTokenIssuer) -> Self {
        Self {
            token_service,
            refresh_tokens,
        }
    }

    /// Creates the access token for `request`.
    ///
    /// `issue_refresh_token` is the offline access decision computed once
    /// per request by the caller.
    ///
    /// # Errors
    ///
    /// - `TokenCreation` if the token service fails to build or sign
    /// - `Storage` if the refresh token record cannot be persisted
    pub async fn create(
        &self,
        request: &ValidatedTokenRequest,
        issue_refresh_token: bool,
    ) -> IssuanceResult<IssuedAccessToken> {
        let token = match &request.authorization_code {
            Some(code) => {
                self.token_service
                    .create_access_token(
                        Some(&code.subject),
                        &code.client,
                        &code.requested_scopes,
                        &request.raw,
                    )
                    .await
            }
            None => {
                self.token_service
                    .create_access_token(
                        request.subject.as_deref(),
                        &request.client,
                        &request.scopes.granted,
                        &request.raw,
                    )
                    .await
            }
        }
        .map_err(|e| e.into_token_creation())?;

        let signed_access_token = self
            .token_service
            .create_security_token(&token)
            .await
            .map_err(|e| e.into_token_creation())?;

        let refresh_token = if issue_refresh_token {
            Some(self.refresh_tokens.issue(&request.client, &token).await?)
        } else {
            None
        };

        Ok(IssuedAccessToken {
            signed_access_token,
            refresh_token,
        })
    }
}
