//! Storage traits for issuance data.
//!
//! This module defines storage interfaces for:
//!
//! - Refresh token records
//! - Reference access tokens
//!
//! Authorization codes are consumed by upstream validation and never touched
//! here.
//!
//! # Implementations
//!
//! Storage implementations are provided in separate crates:
//!
//! - `tokenward-memory` - in-memory storage backend

pub mod refresh_token;
pub mod token_handle;

pub use refresh_token::RefreshTokenStorage;
pub use token_handle::TokenHandleStorage;
