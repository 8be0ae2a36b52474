//! Token response issuance.
//!
//! This module composes the issuance pipeline:
//!
//! - [`Flow`] - Classifies a validated request into a composition path
//! - [`AccessTokenAssembler`] - Creates and signs access tokens
//! - [`RefreshTokenIssuer`] - Generates and persists refresh tokens
//! - [`IdentityTokenAssembler`] - Creates identity tokens for code exchanges
//! - [`TokenResponseGenerator`] - Runs the whole pipeline for one request

pub mod access_token;
pub mod dispatcher;
pub mod generator;
pub mod identity_token;
pub mod refresh_token;
pub mod response;

pub use access_token::{AccessTokenAssembler, IssuedAccessToken};
pub use dispatcher::Flow;
pub use generator::{TokenResponseGenerator, TokenResponseGeneratorBuilder};
pub use identity_token::IdentityTokenAssembler;
pub use refresh_token::RefreshTokenIssuer;
pub use response::TokenResponse;
