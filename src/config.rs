//! Runtime configuration for the EcoRota services.
//!
//! Configuration is plain data with sensible defaults. It can be built in code
//! with the `with_*` methods, loaded from JSON, or read from `ECOROTA_*`
//! environment variables. Every loader validates before returning.
//!
//! | Variable | Field |
//! |---|---|
//! | `ECOROTA_TOKEN_SECRET` | `token.secret` |
//! | `ECOROTA_TOKEN_TTL_SECONDS` | `token.ttl_seconds` |
//! | `ECOROTA_TOKEN_ISSUER` | `token.issuer` |
//! | `ECOROTA_HASH_COST` | `hashing.cost` |
//! | `ECOROTA_PROTOCOL_MAX_RETRIES` | `protocol.max_retries` |
//!
//! # Example
//!
//! ```rust
//! use ecorota::config::EcoRotaConfig;
//!
//! let config = EcoRotaConfig::default()
//!     .with_token_secret("a-long-enough-signing-secret")
//!     .with_token_ttl_seconds(3600)
//!     .with_protocol_max_retries(5);
//! assert!(config.validate().is_ok());
//! ```

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

/// Shortest signing secret accepted, in bytes.
pub const MIN_SECRET_LENGTH: usize = 16;

/// Range of bcrypt work factors accepted.
pub const MIN_HASH_COST: u32 = 4;
pub const MAX_HASH_COST: u32 = 31;

/// Errors raised while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },

    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

impl ConfigError {
    fn invalid(field: &str, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}

/// Token signing settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenConfig {
    /// HS256 signing secret. Defaults to a random value, so tokens do not survive a restart
    /// unless a secret is configured.
    pub secret: String,
    /// Lifetime of issued tokens. Defaults to one day.
    pub ttl_seconds: u64,
    pub issuer: String,
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            secret: format!("{}{}", Uuid::new_v4().simple(), Uuid::new_v4().simple()),
            ttl_seconds: 24 * 60 * 60,
            issuer: "ecorota".to_string(),
        }
    }
}

/// Password hashing settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HashingConfig {
    /// bcrypt work factor; each step doubles the hashing time.
    pub cost: u32,
}

impl Default for HashingConfig {
    fn default() -> Self {
        Self {
            cost: bcrypt::DEFAULT_COST,
        }
    }
}

/// Problem report numbering settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProtocolConfig {
    /// Extra attempts with a fresh protocol after a protocol conflict.
    pub max_retries: u32,
}

impl Default for ProtocolConfig {
    fn default() -> Self {
        Self { max_retries: 3 }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EcoRotaConfig {
    pub token: TokenConfig,
    pub hashing: HashingConfig,
    pub protocol: ProtocolConfig,
}

impl EcoRotaConfig {
    pub fn with_token_secret(mut self, secret: impl Into<String>) -> Self {
        self.token.secret = secret.into();
        self
    }

    pub fn with_token_ttl_seconds(mut self, ttl_seconds: u64) -> Self {
        self.token.ttl_seconds = ttl_seconds;
        self
    }

    pub fn with_token_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.token.issuer = issuer.into();
        self
    }

    pub fn with_hash_cost(mut self, cost: u32) -> Self {
        self.hashing.cost = cost;
        self
    }

    pub fn with_protocol_max_retries(mut self, max_retries: u32) -> Self {
        self.protocol.max_retries = max_retries;
        self
    }

    /// Parse a JSON document. Missing sections and fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read overrides from the process environment on top of the defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(std::env::vars())
    }

    /// Apply `ECOROTA_*` overrides from any set of variables.
    pub fn from_vars<I, K, V>(vars: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut config = Self::default();
        for (key, value) in vars {
            let value = value.as_ref();
            match key.as_ref() {
                "ECOROTA_TOKEN_SECRET" => config.token.secret = value.to_string(),
                "ECOROTA_TOKEN_TTL_SECONDS" => {
                    config.token.ttl_seconds = parse_number("token.ttl_seconds", value)?
                }
                "ECOROTA_TOKEN_ISSUER" => config.token.issuer = value.trim().to_string(),
                "ECOROTA_HASH_COST" => config.hashing.cost = parse_number("hashing.cost", value)?,
                "ECOROTA_PROTOCOL_MAX_RETRIES" => {
                    config.protocol.max_retries = parse_number("protocol.max_retries", value)?
                }
                _ => {}
            }
        }
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.token.secret.len() < MIN_SECRET_LENGTH {
            return Err(ConfigError::invalid(
                "token.secret",
                format!("must be at least {} bytes long", MIN_SECRET_LENGTH),
            ));
        }
        if self.token.ttl_seconds == 0 {
            return Err(ConfigError::invalid("token.ttl_seconds", "must be positive"));
        }
        if self.token.issuer.trim().is_empty() {
            return Err(ConfigError::invalid("token.issuer", "must not be blank"));
        }
        if !(MIN_HASH_COST..=MAX_HASH_COST).contains(&self.hashing.cost) {
            return Err(ConfigError::invalid(
                "hashing.cost",
                format!("must be between {} and {}", MIN_HASH_COST, MAX_HASH_COST),
            ));
        }
        Ok(())
    }
}

fn parse_number<T: FromStr>(field: &str, value: &str) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::invalid(field, format!("'{}' is not a valid number", value)))
}
