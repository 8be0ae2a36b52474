//! Domain types shared by the issuance engine and its collaborators.
//!
//! ## Domain Types
//!
//! - [`ValidatedTokenRequest`] - Token request that passed upstream validation
//! - [`AuthorizationCode`] - Consumed authorization code record
//! - [`Client`] - Authenticated client and its token policy
//! - [`Token`] - Unsigned access or identity token
//! - [`RefreshTokenRecord`] - Persisted refresh token

pub mod client;
pub mod grant;
pub mod refresh_token;
pub mod request;
pub mod token;

pub use client::{AccessTokenType, Client};
pub use grant::{GrantType, OFFLINE_ACCESS_SCOPE, OPENID_SCOPE};
pub use refresh_token::RefreshTokenRecord;
pub use request::{AuthorizationCode, RequestParameters, ValidatedScopes, ValidatedTokenRequest};
pub use token::{Token, TokenKind};
