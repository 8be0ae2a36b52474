//! In-memory token stores for tokenward.
//!
//! This crate provides in-memory implementations of the storage traits from
//! `tokenward-issuance`, backed by `DashMap` for concurrent access. Both
//! stores reject writes to an existing handle instead of replacing the
//! stored value.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use tokenward_issuance::TokenResponseGenerator;
//! use tokenward_memory::InMemoryRefreshTokenStorage;
//!
//! let refresh_tokens = Arc::new(InMemoryRefreshTokenStorage::new());
//! let generator = TokenResponseGenerator::builder(token_service, refresh_tokens).build();
//! ```

pub mod refresh_token;
pub mod token_handle;

pub use refresh_token::InMemoryRefreshTokenStorage;
pub use token_handle::InMemoryTokenHandleStorage;

// Re-export the storage traits for convenience
pub use tokenward_issuance::storage::{RefreshTokenStorage, TokenHandleStorage};
