//! Token response generation.
//!
//! [`TokenResponseGenerator::process`] is the entry point used by the token
//! endpoint handler once a request has been validated:
//!
//! 1. Classify the request ([`Flow::classify`]); unknown grants stop here
//! 2. Create and sign the access token
//! 3. Persist a refresh token when `offline_access` was granted
//! 4. Create an identity token for OpenID Connect code exchanges
//! 5. Compose the response
//!
//! # Usage
//!
//! ```ignore
//! use tokenward_issuance::TokenResponseGenerator;
//!
//! let generator = TokenResponseGenerator::builder(token_service, refresh_storage).build();
//! let response = generator.process(&request).await?;
//! ```

use std::sync::Arc;

use crate::IssuanceResult;
use crate::audit::{IssuanceAudit, TracingAudit};
use crate::clock::{Clock, SystemClock};
use crate::handle::{HandleGenerator, RandomHandleGenerator};
use crate::issuance::access_token::AccessTokenAssembler;
use crate::issuance::dispatcher::Flow;
use crate::issuance::identity_token::IdentityTokenAssembler;
use crate::issuance::refresh_token::RefreshTokenIssuer;
use crate::issuance::response::TokenResponse;
use crate::storage::refresh_token::RefreshTokenStorage;
use crate::token::service::TokenService;
use crate::types::request::ValidatedTokenRequest;

/// Turns validated token requests into token responses.
///
/// A generator holds no per-request state and can serve any number of
/// concurrent requests.
pub struct TokenResponseGenerator {
    access_tokens: AccessTokenAssembler,
    identity_tokens: IdentityTokenAssembler,
    audit: Arc<dyn IssuanceAudit>,
}

/// Builder for [`TokenResponseGenerator`].
pub struct TokenResponseGeneratorBuilder {
    token_service: Arc<dyn TokenService>,
    refresh_token_storage: Arc<dyn RefreshTokenStorage>,
    clock: Arc<dyn Clock>,
    handles: Arc<dyn HandleGenerator>,
    audit: Arc<dyn IssuanceAudit>,
}

impl TokenResponseGeneratorBuilder {
    /// Sets the clock used for refresh token creation times.
    #[must_use]
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Sets the refresh token handle generator.
    #[must_use]
    pub fn handle_generator(mut self, handles: Arc<dyn HandleGenerator>) -> Self {
        self.handles = handles;
        self
    }

    /// Sets the audit sink.
    #[must_use]
    pub fn audit(mut self, audit: Arc<dyn IssuanceAudit>) -> Self {
        self.audit = audit;
        self
    }

    /// Builds the generator.
    #[must_use]
    pub fn build(self) -> TokenResponseGenerator {
        let refresh_tokens =
            RefreshTokenIssuer::new(self.refresh_token_storage, self.handles, self.clock);

        TokenResponseGenerator {
            access_tokens: AccessTokenAssembler::new(self.token_service.clone(), refresh_tokens),
            identity_tokens: IdentityTokenAssembler::new(self.token_service),
            audit: self.audit,
        }
    }
}

impl TokenResponseGenerator {
    /// Starts building a generator.
    ///
    /// Defaults: [`SystemClock`], [`RandomHandleGenerator`], [`TracingAudit`].
    #[must_use]
    pub fn builder(
        token_service: Arc<dyn TokenService>,
        refresh_token_storage: Arc<dyn RefreshTokenStorage>,
    ) -> TokenResponseGeneratorBuilder {
        TokenResponseGeneratorBuilder {
            token_service,
            refresh_token_storage,
            clock: Arc::new(SystemClock),
            handles: Arc::new(RandomHandleGenerator),
            audit: Arc::new(TracingAudit),
        }
    }

    /// Issues the tokens for a validated request.
    ///
    /// # Errors
    ///
    /// - `UnsupportedGrantType` before any token is created
    /// - `TokenCreation` if the token service fails
    /// - `Storage` if the refresh token record cannot be persisted
    ///
    /// No partial response is ever returned.
    pub async fn process(&self, request: &ValidatedTokenRequest) -> IssuanceResult<TokenResponse> {
        self.audit.issuance_started(request);

        match self.issue(request).await {
            Ok((flow, response)) => {
                self.audit.issuance_completed(request, &flow, &response);
                Ok(response)
            }
            Err(e) => {
                self.audit.issuance_failed(request, &e);
                Err(e)
            }
        }
    }

    async fn issue<'a>(
        &self,
        request: &'a ValidatedTokenRequest,
    ) -> IssuanceResult<(Flow<'a>, TokenResponse)> {
        let flow = Flow::classify(request)?;
        let issue_refresh_token = request.scopes.contains_offline_access();

        let access_token = self
            .access_tokens
            .create(request, issue_refresh_token)
            .await?;
        if let Some(record) = &access_token.refresh_token {
            self.audit.refresh_token_stored(record);
        }

        let identity_token = match flow {
            Flow::AuthorizationCode(code) => {
                self.identity_tokens.maybe_create(code, &request.raw).await?
            }
            Flow::DirectGrant => None,
        };

        let response = TokenResponse::compose(
            access_token,
            request.client.access_token_lifetime,
            identity_token,
        );
        Ok((flow, response))
    }
}
