//! JWT serialization of access and identity tokens.
//!
//! ## Supported Algorithms
//!
//! - **HS256**: HMAC with SHA-256 (shared secret, development and tests)
//! - **RS256** / **RS384**: RSA with SHA-256 / SHA-384
//! - **ES256** / **ES384**: ECDSA with P-256 / P-384
//!
//! ## Example
//!
//! ```ignore
//! use tokenward_issuance::token::jwt::{JwtService, SigningKey};
//!
//! let key = SigningKey::from_secret("k1", b"secret");
//! let jwt = JwtService::new(key);
//! let signed = jwt.encode_token(&token)?;
//! ```

use std::collections::BTreeMap;
use std::fmt;

use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::SigningConfig;
use crate::error::IssuanceError;
use crate::types::token::{Token, TokenKind};

// ============================================================================
// Error Types
// ============================================================================

/// Errors that can occur during JWT operations.
#[derive(Debug, thiserror::Error)]
pub enum JwtError {
    /// Failed to encode a token.
    #[error("Failed to encode token: {message}")]
    EncodingError {
        /// Description of the encoding error.
        message: String,
    },

    /// Invalid key format or data.
    #[error("Invalid key: {message}")]
    InvalidKey {
        /// Description of why the key is invalid.
        message: String,
    },

    /// The algorithm is not supported.
    #[error("Unsupported signing algorithm: {algorithm}")]
    UnsupportedAlgorithm {
        /// The rejected algorithm name.
        algorithm: String,
    },
}

impl JwtError {
    /// Creates a new `EncodingError`.
    #[must_use]
    pub fn encoding_error(message: impl Into<String>) -> Self {
        Self::EncodingError {
            message: message.into(),
        }
    }

    /// Creates a new `InvalidKey` error.
    #[must_use]
    pub fn invalid_key(message: impl Into<String>) -> Self {
        Self::InvalidKey {
            message: message.into(),
        }
    }
}

impl From<JwtError> for IssuanceError {
    fn from(err: JwtError) -> Self {
        IssuanceError::token_creation(err.to_string())
    }
}

// ============================================================================
// Signing Algorithm
// ============================================================================

/// Supported signing algorithms for JWT tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SigningAlgorithm {
    /// HMAC with SHA-256.
    HS256,
    /// RSA with SHA-256.
    RS256,
    /// RSA with SHA-384.
    RS384,
    /// ECDSA with P-256.
    ES256,
    /// ECDSA with P-384.
    ES384,
}

impl SigningAlgorithm {
    /// Parses an algorithm name as used in JWT headers.
    ///
    /// # Errors
    ///
    /// Returns `JwtError::UnsupportedAlgorithm` for unknown names.
    pub fn parse(name: &str) -> Result<Self, JwtError> {
        match name {
            "HS256" => Ok(Self::HS256),
            "RS256" => Ok(Self::RS256),
            "RS384" => Ok(Self::RS384),
            "ES256" => Ok(Self::ES256),
            "ES384" => Ok(Self::ES384),
            other => Err(JwtError::UnsupportedAlgorithm {
                algorithm: other.to_string(),
            }),
        }
    }

    /// Converts to the `jsonwebtoken` Algorithm type.
    #[must_use]
    pub fn to_jwt_algorithm(self) -> Algorithm {
        match self {
            Self::HS256 => Algorithm::HS256,
            Self::RS256 => Algorithm::RS256,
            Self::RS384 => Algorithm::RS384,
            Self::ES256 => Algorithm::ES256,
            Self::ES384 => Algorithm::ES384,
        }
    }

    /// Returns the algorithm name as used in JWT headers.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::HS256 => "HS256",
            Self::RS256 => "RS256",
            Self::RS384 => "RS384",
            Self::ES256 => "ES256",
            Self::ES384 => "ES384",
        }
    }

    /// Returns `true` if this is an RSA-based algorithm.
    #[must_use]
    pub fn is_rsa(&self) -> bool {
        matches!(self, Self::RS256 | Self::RS384)
    }

    /// Returns `true` if this is an EC-based algorithm.
    #[must_use]
    pub fn is_ec(&self) -> bool {
        matches!(self, Self::ES256 | Self::ES384)
    }
}

impl fmt::Display for SigningAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// Token Claims
// ============================================================================

/// Access token claims.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AccessTokenClaims {
    /// Issuer.
    pub iss: String,

    /// Subject (resource owner). Absent for client credentials tokens.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,

    /// Audience (resource URL).
    pub aud: String,

    /// Expiration time (Unix timestamp).
    pub exp: i64,

    /// Issued at (Unix timestamp).
    pub iat: i64,

    /// JWT ID.
    pub jti: String,

    /// Space-separated scopes.
    pub scope: String,

    /// OAuth client ID.
    pub client_id: String,

    /// Additional claims.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

/// ID token claims for OpenID Connect.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IdTokenClaims {
    /// Issuer.
    pub iss: String,

    /// Subject (user ID).
    pub sub: String,

    /// Audience (client ID).
    pub aud: String,

    /// Expiration time (Unix timestamp).
    pub exp: i64,

    /// Issued at (Unix timestamp).
    pub iat: i64,

    /// Additional claims (`nonce`, scope-derived claims).
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl AccessTokenClaims {
    /// Builds access token claims from an unsigned token.
    #[must_use]
    pub fn from_token(token: &Token) -> Self {
        Self {
            iss: token.issuer.clone(),
            sub: token.subject.clone(),
            aud: token.audience.clone(),
            exp: token.expires_at().unix_timestamp(),
            iat: token.creation_time.unix_timestamp(),
            jti: Uuid::new_v4().to_string(),
            scope: token.scope_string(),
            client_id: token.client_id().to_string(),
            extra: token.claims.clone(),
        }
    }
}

impl IdTokenClaims {
    /// Builds identity token claims from an unsigned token.
    ///
    /// # Errors
    ///
    /// Returns `JwtError::EncodingError` if the token has no subject.
    pub fn from_token(token: &Token) -> Result<Self, JwtError> {
        let sub = token
            .subject
            .clone()
            .ok_or_else(|| JwtError::encoding_error("identity token requires a subject"))?;

        Ok(Self {
            iss: token.issuer.clone(),
            sub,
            aud: token.audience.clone(),
            exp: token.expires_at().unix_timestamp(),
            iat: token.creation_time.unix_timestamp(),
            extra: token.claims.clone(),
        })
    }
}

// ============================================================================
// Signing Key
// ============================================================================

/// Private key material used to sign tokens.
#[derive(Clone)]
pub struct SigningKey {
    /// Key ID placed in the JWT header.
    pub kid: String,

    /// Signing algorithm.
    pub algorithm: SigningAlgorithm,

    encoding_key: EncodingKey,
}

impl fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigningKey")
            .field("kid", &self.kid)
            .field("algorithm", &self.algorithm)
            .finish_non_exhaustive()
    }
}

impl SigningKey {
    /// Creates an HS256 key from a shared secret.
    #[must_use]
    pub fn from_secret(kid: impl Into<String>, secret: &[u8]) -> Self {
        Self {
            kid: kid.into(),
            algorithm: SigningAlgorithm::HS256,
            encoding_key: EncodingKey::from_secret(secret),
        }
    }

    /// Creates a key from a PEM-encoded RSA or EC private key.
    ///
    /// # Errors
    ///
    /// Returns `JwtError::InvalidKey` if the PEM cannot be parsed or the
    /// algorithm is not asymmetric.
    pub fn from_pem(
        kid: impl Into<String>,
        algorithm: SigningAlgorithm,
        pem: &[u8],
    ) -> Result<Self, JwtError> {
        let parsed = if algorithm.is_rsa() {
            EncodingKey::from_rsa_pem(pem)
        } else if algorithm.is_ec() {
            EncodingKey::from_ec_pem(pem)
        } else {
            return Err(JwtError::invalid_key(format!(
                "{} does not use a PEM key",
                algorithm
            )));
        };
        let encoding_key = parsed.map_err(|e| JwtError::invalid_key(e.to_string()))?;

        Ok(Self {
            kid: kid.into(),
            algorithm,
            encoding_key,
        })
    }

    /// Builds a key from signing configuration, reading the PEM file if the
    /// algorithm needs one.
    ///
    /// # Errors
    ///
    /// Returns an error if the algorithm is unsupported or the key material
    /// is missing or invalid.
    pub fn from_config(config: &SigningConfig) -> Result<Self, JwtError> {
        let algorithm = SigningAlgorithm::parse(&config.algorithm)?;

        if algorithm == SigningAlgorithm::HS256 {
            let secret = config
                .secret
                .as_deref()
                .ok_or_else(|| JwtError::invalid_key("signing.secret is not set"))?;
            return Ok(Self::from_secret(config.key_id.clone(), secret.as_bytes()));
        }

        let path = config
            .key_file
            .as_ref()
            .ok_or_else(|| JwtError::invalid_key("signing.key_file is not set"))?;
        let pem = std::fs::read(path).map_err(|e| {
            JwtError::invalid_key(format!("cannot read {}: {}", path.display(), e))
        })?;

        Self::from_pem(config.key_id.clone(), algorithm, &pem)
    }
}

// ============================================================================
// JWT Service
// ============================================================================

/// Service for encoding tokens as signed JWTs.
///
/// This service is thread-safe (`Send + Sync`) and can be shared across
/// async tasks.
#[derive(Debug, Clone)]
pub struct JwtService {
    signing_key: SigningKey,
}

impl JwtService {
    /// Creates a new JWT service.
    #[must_use]
    pub fn new(signing_key: SigningKey) -> Self {
        Self { signing_key }
    }

    /// Encodes claims into a JWT string.
    ///
    /// # Errors
    /// Returns an error if encoding fails.
    pub fn encode<T: Serialize>(&self, claims: &T) -> Result<String, JwtError> {
        let mut header = Header::new(self.signing_key.algorithm.to_jwt_algorithm());
        header.kid = Some(self.signing_key.kid.clone());

        encode(&header, claims, &self.signing_key.encoding_key)
            .map_err(|e| JwtError::encoding_error(e.to_string()))
    }

    /// Encodes an unsigned token with the claim set matching its kind.
    ///
    /// # Errors
    /// Returns an error if the claims cannot be built or encoding fails.
    pub fn encode_token(&self, token: &Token) -> Result<String, JwtError> {
        match token.kind {
            TokenKind::AccessToken => self.encode(&AccessTokenClaims::from_token(token)),
            TokenKind::IdentityToken => self.encode(&IdTokenClaims::from_token(token)?),
        }
    }

    /// Returns the current signing key ID.
    #[must_use]
    pub fn current_kid(&self) -> &str {
        &self.signing_key.kid
    }

    /// Returns the signing algorithm.
    #[must_use]
    pub fn algorithm(&self) -> SigningAlgorithm {
        self.signing_key.algorithm
    }
}

// ============================================================================
// Tests
// ============================================================================
