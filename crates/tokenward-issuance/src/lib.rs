//! # tokenward-issuance
//!
//! Token response generation for an OAuth 2.0 / OpenID Connect identity
//! provider.
//!
//! Given a token request that already passed client authentication and grant
//! validation, this crate produces the token response:
//! - A signed access token, always
//! - A refresh token when `offline_access` was granted
//! - An identity token for OpenID Connect authorization code exchanges
//!
//! ## Modules
//!
//! - [`config`] - Issuer and signing configuration
//! - [`issuance`] - Flow classification and response composition
//! - [`token`] - Token creation, JWT signing and reference tokens
//! - [`storage`] - Storage traits for refresh and reference tokens
//! - [`types`] - Requests, clients, tokens and refresh token records
//! - [`audit`] - Issuance lifecycle events
//! - [`clock`] - Time source
//! - [`handle`] - Refresh token handle generation

pub mod audit;
pub mod clock;
pub mod config;
pub mod error;
pub mod handle;
pub mod issuance;
pub mod storage;
pub mod token;
pub mod types;

pub use audit::{IssuanceAudit, NoopAudit, TracingAudit};
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{ConfigError, IssuanceConfig, SigningConfig};
pub use error::{ErrorCategory, IssuanceError};
pub use handle::{HandleGenerator, RandomHandleGenerator};
pub use issuance::{Flow, TokenResponse, TokenResponseGenerator, TokenResponseGeneratorBuilder};
pub use storage::{RefreshTokenStorage, TokenHandleStorage};
pub use token::{DefaultTokenService, JwtService, SigningAlgorithm, SigningKey, TokenService};
pub use types::{
    AccessTokenType, AuthorizationCode, Client, GrantType, RefreshTokenRecord, RequestParameters,
    Token, TokenKind, ValidatedScopes, ValidatedTokenRequest,
};

/// Type alias for issuance results.
pub type IssuanceResult<T> = Result<T, IssuanceError>;

/// Prelude module for convenient imports.
///
/// ```ignore
/// use tokenward_issuance::prelude::*;
/// ```
pub mod prelude {
    pub use crate::IssuanceResult;
    pub use crate::audit::{IssuanceAudit, NoopAudit, TracingAudit};
    pub use crate::clock::{Clock, SystemClock};
    pub use crate::config::{ConfigError, IssuanceConfig};
    pub use crate::error::{ErrorCategory, IssuanceError};
    pub use crate::handle::{HandleGenerator, RandomHandleGenerator};
    pub use crate::issuance::{TokenResponse, TokenResponseGenerator};
    pub use crate::storage::{RefreshTokenStorage, TokenHandleStorage};
    pub use crate::token::{DefaultTokenService, JwtService, SigningKey, TokenService};
    pub use crate::types::{
        AuthorizationCode, Client, RefreshTokenRecord, Token, ValidatedScopes,
        ValidatedTokenRequest,
    };
}
