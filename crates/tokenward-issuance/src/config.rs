//! Issuance configuration.
//!
//! # Example (TOML)
//!
//! ```toml
//! issuer = "https://idp.example.com"
//! identity_token_lifetime = "5m"
//!
//! [signing]
//! algorithm = "RS256"
//! key_id = "2024-01"
//! key_file = "/etc/tokenward/signing.pem"
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Root issuance configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct IssuanceConfig {
    /// Issuer URL (token `iss` claim).
    pub issuer: String,

    /// Access token audience. Defaults to `{issuer}/resources`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audience: Option<String>,

    /// Identity token lifetime.
    #[serde(with = "humantime_serde")]
    pub identity_token_lifetime: Duration,

    /// Token signing configuration.
    pub signing: SigningConfig,
}

impl Default for IssuanceConfig {
    fn default() -> Self {
        Self {
            issuer: "http://localhost:8080".to_string(),
            audience: None,
            identity_token_lifetime: Duration::from_secs(300), // 5 minutes
            signing: SigningConfig::default(),
        }
    }
}

/// Token signing configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SigningConfig {
    /// Signing algorithm.
    /// Supported: "HS256", "RS256", "RS384", "ES256", "ES384"
    pub algorithm: String,

    /// Key ID placed in the JWT header.
    pub key_id: String,

    /// PEM file holding the private key (RSA/EC algorithms).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_file: Option<PathBuf>,

    /// Shared secret (HS256 only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret: Option<String>,
}

impl Default for SigningConfig {
    fn default() -> Self {
        Self {
            algorithm: "RS256".to_string(),
            key_id: "default".to_string(),
            key_file: None,
            secret: None,
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// An invalid configuration value was provided.
    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),

    /// A required configuration value is missing.
    #[error("Missing required configuration: {0}")]
    Missing(String),

    /// The configuration file could not be read.
    #[error("Failed to read configuration: {0}")]
    Io(#[from] std::io::Error),

    /// The configuration file is not valid TOML.
    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),
}

impl From<ConfigError> for crate::error::IssuanceError {
    fn from(err: ConfigError) -> Self {
        crate::error::IssuanceError::configuration(err.to_string())
    }
}

impl IssuanceConfig {
    /// Parses and validates a TOML document.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be parsed or fails validation.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads and validates a TOML configuration file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or validated.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }

    /// Returns the access token audience.
    #[must_use]
    pub fn access_token_audience(&self) -> String {
        self.audience
            .clone()
            .unwrap_or_else(|| format!("{}/resources", self.issuer.trim_end_matches('/')))
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` or `ConfigError::Missing` if:
    /// - `issuer` is empty
    /// - `identity_token_lifetime` is zero
    /// - the signing algorithm is unsupported
    /// - the key material required by the algorithm is absent
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.issuer.is_empty() {
            return Err(ConfigError::InvalidValue(
                "issuer cannot be empty".to_string(),
            ));
        }

        if self.identity_token_lifetime.is_zero() {
            return Err(ConfigError::InvalidValue(
                "identity_token_lifetime must be > 0".to_string(),
            ));
        }

        match self.signing.algorithm.as_str() {
            "HS256" => {
                if self.signing.secret.as_deref().is_none_or(str::is_empty) {
                    return Err(ConfigError::Missing("signing.secret".to_string()));
                }
            }
            "RS256" | "RS384" | "ES256" | "ES384" => {
                if self.signing.key_file.is_none() {
                    return Err(ConfigError::Missing("signing.key_file".to_string()));
                }
            }
            other => {
                return Err(ConfigError::InvalidValue(format!(
                    "Invalid signing algorithm: '{}'. Must be HS256, RS256, RS384, ES256, or ES384",
                    other
                )));
            }
        }

        Ok(())
    }
}
