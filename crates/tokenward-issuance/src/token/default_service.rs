//! JWT-backed token service.
//!
//! Access tokens are serialized according to the client's
//! [`AccessTokenType`]: signed JWTs, or opaque handles whose content is kept
//! in the [`TokenHandleStorage`]. Identity tokens are always signed JWTs.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;

use crate::IssuanceResult;
use crate::clock::Clock;
use crate::config::IssuanceConfig;
use crate::error::IssuanceError;
use crate::handle::HandleGenerator;
use crate::storage::token_handle::TokenHandleStorage;
use crate::token::jwt::{JwtService, SigningKey};
use crate::token::service::TokenService;
use crate::types::client::{AccessTokenType, Client};
use crate::types::request::RequestParameters;
use crate::types::token::{Token, TokenKind};

/// Request parameter echoed into identity tokens.
const NONCE_PARAMETER: &str = "nonce";

/// Token service producing JWT and reference tokens.
pub struct DefaultTokenService {
    issuer: String,
    audience: String,
    identity_token_lifetime: u32,
    jwt_service: Arc<JwtService>,
    token_handles: Arc<dyn TokenHandleStorage>,
    handles: Arc<dyn HandleGenerator>,
    clock: Arc<dyn Clock>,
}

impl DefaultTokenService {
    /// Creates a new token service.
    ///
    /// # Arguments
    ///
    /// * `config` - Issuer, audience and identity token lifetime
    /// * `jwt_service` - Service for signing tokens
    /// * `token_handles` - Storage for reference access tokens
    /// * `handles` - Generator for reference token handles
    /// * `clock` - Source of token creation times
    #[must_use]
    pub fn new(
        config: &IssuanceConfig,
        jwt_service: Arc<JwtService>,
        token_handles: Arc<dyn TokenHandleStorage>,
        handles: Arc<dyn HandleGenerator>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let identity_token_lifetime =
            u32::try_from(config.identity_token_lifetime.as_secs()).unwrap_or(u32::MAX);

        Self {
            issuer: config.issuer.clone(),
            audience: config.access_token_audience(),
            identity_token_lifetime,
            jwt_service,
            token_handles,
            handles,
            clock,
        }
    }

    /// Creates a token service whose signing key is loaded from `config`.
    ///
    /// # Errors
    ///
    /// Returns `Configuration` if the configuration is invalid or the signing
    /// key cannot be loaded.
    pub fn from_config(
        config: &IssuanceConfig,
        token_handles: Arc<dyn TokenHandleStorage>,
        handles: Arc<dyn HandleGenerator>,
        clock: Arc<dyn Clock>,
    ) -> IssuanceResult<Self> {
        config.validate()?;
        let signing_key = SigningKey::from_config(&config.signing)
            .map_err(|e| IssuanceError::configuration(e.to_string()))?;
        let jwt_service = Arc::new(JwtService::new(signing_key));

        tracing::info!(
            issuer = %config.issuer,
            kid = jwt_service.current_kid(),
            algorithm = %jwt_service.algorithm(),
            "token service initialized"
        );

        Ok(Self::new(config, jwt_service, token_handles, handles, clock))
    }

    /// Returns the JWT service used for signing.
    #[must_use]
    pub fn jwt_service(&self) -> &Arc<JwtService> {
        &self.jwt_service
    }
}

#[async_trait]
impl TokenService for DefaultTokenService {
    async fn create_access_token(
        &self,
        subject: Option<&str>,
        client: &Client,
        scopes: &[String],
        raw: &RequestParameters,
    ) -> IssuanceResult<Token> {
        Ok(Token {
            kind: TokenKind::AccessToken,
            issuer: self.issuer.clone(),
            audience: self.audience.clone(),
            subject: subject.map(str::to_string),
            client: client.clone(),
            scopes: scopes.to_vec(),
            lifetime: client.access_token_lifetime,
            creation_time: self.clock.now(),
            claims: BTreeMap::new(),
            raw: raw.clone(),
        })
    }

    async fn create_identity_token(
        &self,
        subject: &str,
        client: &Client,
        scopes: &[String],
        include_all_claims: bool,
        raw: &RequestParameters,
    ) -> IssuanceResult<Token> {
        let mut claims = BTreeMap::new();
        if let Some(nonce) = raw.get(NONCE_PARAMETER) {
            claims.insert(NONCE_PARAMETER.to_string(), serde_json::json!(nonce));
        }
        if include_all_claims {
            claims.insert("scope".to_string(), serde_json::json!(scopes));
        }

        Ok(Token {
            kind: TokenKind::IdentityToken,
            issuer: self.issuer.clone(),
            audience: client.client_id.clone(),
            subject: Some(subject.to_string()),
            client: client.clone(),
            scopes: scopes.to_vec(),
            lifetime: self.identity_token_lifetime,
            creation_time: self.clock.now(),
            claims,
            raw: raw.clone(),
        })
    }

    async fn create_security_token(&self, token: &Token) -> IssuanceResult<String> {
        if token.kind == TokenKind::AccessToken
            && token.client.access_token_type == AccessTokenType::Reference
        {
            let handle = self.handles.generate();
            self.token_handles.store(&handle, token).await?;
            tracing::debug!(client_id = %token.client_id(), "reference access token stored");
            return Ok(handle);
        }

        Ok(self.jwt_service.encode_token(token)?)
    }
}
