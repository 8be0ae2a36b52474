//! Identity token assembly for authorization code exchanges.

use std::sync::Arc;

use crate::IssuanceResult;
use crate::token::service::TokenService;
use crate::types::request::{AuthorizationCode, RequestParameters};

/// Builds identity tokens from authorization code records.
pub struct IdentityTokenAssembler {
    token_service: Arc<dyn TokenService>,
}

impl IdentityTokenAssembler {
    /// Creates a new assembler.
    #[must_use]
    pub fn new(token_service: Arc<dyn TokenService>) -> Self {
        Self { token_service }
    }

    /// Creates a signed identity token if the code was issued for an OpenID
    /// Connect request, `None` otherwise.
    ///
    /// The token carries every scope requested at authorization time, not
    /// only those bound to the access token. `raw` is the token request's
    /// parameter set, the same one the access token is created from.
    ///
    /// # Errors
    ///
    /// Returns `TokenCreation` if the token service fails.
    pub async fn maybe_create(
        &self,
        code: &AuthorizationCode,
        raw: &RequestParameters,
    ) -> IssuanceResult<Option<String>> {
        if !code.is_openid {
            return Ok(None);
        }

        let token = self
            .token_service
            .create_identity_token(
                &code.subject,
                &code.client,
                &code.requested_scopes,
                false,
                raw,
            )
            .await
            .map_err(|e| e.into_token_creation())?;

        let signed = self
            .token_service
            .create_security_token(&token)
            .await
            .map_err(|e| e.into_token_creation())?;

        Ok(Some(signed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::IssuanceError;
    use crate::types::client::Client;
    use crate::types::token::{Token, TokenKind};
    use async_trait::async_trait;
    use std::collections::BTreeMap;
    use std::sync::Mutex;
    use time::macros::datetime;

    /// Token service remembering the raw parameters it was handed.
    #[derive(Default)]
    struct RecordingTokenService {
        raw: Mutex<Option<RequestParameters>>,
    }

    #[async_trait]
    impl TokenService for RecordingTokenService {
        async fn create_access_token(
            &self,
            _subject: Option<&str>,
            _client: &Client,
            _scopes: &[String],
            _raw: &RequestParameters,
        ) -> IssuanceResult<Token> {
            Err(IssuanceError::internal("not used"))
        }

        async fn create_identity_token(
            &self,
            subject: &str,
            client: &Client,
            scopes: &[String],
            _include_all_claims: bool,
            raw: &RequestParameters,
        ) -> IssuanceResult<Token> {
            *self.raw.lock().unwrap() = Some(raw.clone());
            Ok(Token {
                kind: TokenKind::IdentityToken,
                issuer: "https://idp.example.com".to_string(),
                audience: client.client_id.clone(),
                subject: Some(subject.to_string()),
                client: client.clone(),
                scopes: scopes.to_vec(),
                lifetime: 300,
                creation_time: datetime!(2024-01-01 00:00 UTC),
                claims: BTreeMap::new(),
                raw: raw.clone(),
            })
        }

        async fn create_security_token(&self, token: &Token) -> IssuanceResult<String> {
            Ok(format!("id:{}", token.subject.as_deref().unwrap_or("-")))
        }
    }

    fn params(pairs: &[(&str, &str)]) -> RequestParameters {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[tokio::test]
    async fn test_uses_token_request_parameters() {
        let service = Arc::new(RecordingTokenService::default());
        let assembler = IdentityTokenAssembler::new(service.clone());
        let code = AuthorizationCode::new("alice", Client::new("web"), ["openid"])
            .with_raw(params(&[("nonce", "from-authorize")]));
        let raw = params(&[("nonce", "from-token-request"), ("code", "c1")]);

        let signed = assembler.maybe_create(&code, &raw).await.unwrap();

        assert_eq!(signed.as_deref(), Some("id:alice"));
        assert_eq!(service.raw.lock().unwrap().as_ref(), Some(&raw));
    }

    #[tokio::test]
    async fn test_skips_non_openid_codes() {
        let service = Arc::new(RecordingTokenService::default());
        let assembler = IdentityTokenAssembler::new(service.clone());
        let code = AuthorizationCode::new("alice", Client::new("web"), ["api1"]);

        let signed = assembler
            .maybe_create(&code, &RequestParameters::new())
            .await
            .unwrap();

        assert_eq!(signed, None);
        assert!(service.raw.lock().unwrap().is_none());
    }
}
