//! Token creation and serialization.
//!
//! This module provides:
//!
//! - The [`TokenService`] collaborator contract
//! - [`DefaultTokenService`], which signs JWTs and stores reference tokens
//! - JWT encoding and signing keys

pub mod default_service;
pub mod jwt;
pub mod service;

pub use default_service::DefaultTokenService;
pub use jwt::{
    AccessTokenClaims, IdTokenClaims, JwtError, JwtService, SigningAlgorithm, SigningKey,
};
pub use service::TokenService;
