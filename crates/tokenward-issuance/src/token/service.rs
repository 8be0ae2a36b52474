//! Token service collaborator contract.
//!
//! The issuance engine decides *which* tokens to mint; the token service
//! decides *what* goes into them and how they are serialized.

use async_trait::async_trait;

use crate::IssuanceResult;
use crate::types::client::Client;
use crate::types::request::RequestParameters;
use crate::types::token::Token;

/// Creates and serializes tokens.
///
/// Any error returned from these methods is reported by the issuance engine
/// as a token creation failure.
#[async_trait]
pub trait TokenService: Send + Sync {
    /// Builds an unsigned access token.
    ///
    /// `subject` is `None` for client credentials requests.
    async fn create_access_token(
        &self,
        subject: Option<&str>,
        client: &Client,
        scopes: &[String],
        raw: &RequestParameters,
    ) -> IssuanceResult<Token>;

    /// Builds an unsigned identity token.
    async fn create_identity_token(
        &self,
        subject: &str,
        client: &Client,
        scopes: &[String],
        include_all_claims: bool,
        raw: &RequestParameters,
    ) -> IssuanceResult<Token>;

    /// Serializes (signs, or stores as a reference) a token.
    async fn create_security_token(&self, token: &Token) -> IssuanceResult<String>;
}
