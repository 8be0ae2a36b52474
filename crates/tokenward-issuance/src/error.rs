//! Token issuance error types.
//!
//! This module defines the error taxonomy of the issuance pipeline. Every
//! error is surfaced to the token endpoint handler, which maps it onto the
//! wire-level OAuth 2.0 error response via [`IssuanceError::oauth_error_code`].

use std::fmt;

/// Errors that can occur while issuing tokens.
#[derive(Debug, thiserror::Error)]
pub enum IssuanceError {
    /// The grant type is not handled by the issuance engine and no
    /// extension-grant assertion is present.
    #[error("Unsupported grant type: {grant_type}")]
    UnsupportedGrantType {
        /// The unsupported grant type.
        grant_type: String,
    },

    /// The token service could not create or sign a token.
    #[error("Token creation failed: {message}")]
    TokenCreation {
        /// Description of the failure.
        message: String,
    },

    /// A store write did not succeed.
    #[error("Storage error: {message}")]
    Storage {
        /// Description of the storage error.
        message: String,
    },

    /// The issuance configuration is invalid.
    #[error("Configuration error: {message}")]
    Configuration {
        /// Description of the configuration error.
        message: String,
    },

    /// An unexpected internal error occurred.
    #[error("Internal error: {message}")]
    Internal {
        /// Description of the internal error.
        message: String,
    },
}

impl IssuanceError {
    /// Creates a new `UnsupportedGrantType` error.
    #[must_use]
    pub fn unsupported_grant_type(grant_type: impl Into<String>) -> Self {
        Self::UnsupportedGrantType {
            grant_type: grant_type.into(),
        }
    }

    /// Creates a new `TokenCreation` error.
    #[must_use]
    pub fn token_creation(message: impl Into<String>) -> Self {
        Self::TokenCreation {
            message: message.into(),
        }
    }

    /// Creates a new `Storage` error.
    #[must_use]
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    /// Creates a new `Configuration` error.
    #[must_use]
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Creates a new `Internal` error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Normalizes an error raised by the token service.
    ///
    /// Whatever went wrong inside the token service (signing key missing,
    /// serialization, a reference-token write), the pipeline reports it as
    /// a token creation failure.
    #[must_use]
    pub fn into_token_creation(self) -> Self {
        match self {
            Self::TokenCreation { .. } => self,
            other => Self::token_creation(other.to_string()),
        }
    }

    /// Normalizes an error raised by a store.
    #[must_use]
    pub fn into_storage(self) -> Self {
        match self {
            Self::Storage { .. } => self,
            other => Self::storage(other.to_string()),
        }
    }

    /// Returns `true` if this is a client error (4xx category).
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::UnsupportedGrantType { .. })
    }

    /// Returns `true` if this is a server error (5xx category).
    #[must_use]
    pub fn is_server_error(&self) -> bool {
        !self.is_client_error()
    }

    /// Returns the error category for logging/monitoring purposes.
    #[must_use]
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::UnsupportedGrantType { .. } => ErrorCategory::Validation,
            Self::TokenCreation { .. } => ErrorCategory::Token,
            Self::Storage { .. } => ErrorCategory::Infrastructure,
            Self::Configuration { .. } => ErrorCategory::Configuration,
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }

    /// Returns the OAuth 2.0 error code for this error.
    #[must_use]
    pub fn oauth_error_code(&self) -> &'static str {
        match self {
            Self::UnsupportedGrantType { .. } => "unsupported_grant_type",
            Self::TokenCreation { .. } => "server_error",
            Self::Storage { .. } => "server_error",
            Self::Configuration { .. } => "server_error",
            Self::Internal { .. } => "server_error",
        }
    }
}

/// Categories of issuance errors for logging and monitoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Request validation errors.
    Validation,
    /// Token creation and signing errors.
    Token,
    /// Infrastructure/storage errors.
    Infrastructure,
    /// Configuration errors.
    Configuration,
    /// Internal server errors.
    Internal,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Validation => write!(f, "validation"),
            Self::Token => write!(f, "token"),
            Self::Infrastructure => write!(f, "infrastructure"),
            Self::Configuration => write!(f, "configuration"),
            Self::Internal => write!(f, "internal"),
        }
    }
}
