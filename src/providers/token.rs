//! Signed access tokens.
//!
//! [`JwtTokenProvider`] issues `HS256` JSON Web Tokens through `jsonwebtoken`.
//! Verification checks the signature, the algorithm, the issuer and the expiry.
//!
//! # Example
//!
//! ```rust
//! use ecorota::config::TokenConfig;
//! use ecorota::providers::{JwtTokenProvider, TokenProvider, TokenSubject};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let provider = JwtTokenProvider::from_config(&TokenConfig::default())?;
//! let subject = TokenSubject::new(1, "ana@ecorota.com", "Ana");
//!
//! let token = provider.generate(&subject, None)?;
//! let claims = provider.verify(&token)?;
//! assert_eq!(claims.sub, 1);
//! # Ok(())
//! # }
//! ```

use crate::config::{MIN_SECRET_LENGTH, TokenConfig};
use crate::providers::ProviderError;
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::errors::ErrorKind as JwtErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

const ALGORITHM: Algorithm = Algorithm::HS256;

/// Who a token is issued to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenSubject {
    pub sub: u64,
    pub email: String,
    pub name: String,
}

impl TokenSubject {
    pub fn new(sub: u64, email: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            sub,
            email: email.into(),
            name: name.into(),
        }
    }
}

/// Everything a verified token asserts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    pub sub: u64,
    pub email: String,
    pub name: String,
    pub iss: String,
    /// Issued at, seconds since the Unix epoch.
    pub iat: i64,
    /// Expires at, seconds since the Unix epoch.
    pub exp: i64,
    /// Unique token id.
    pub jti: String,
}

impl TokenClaims {
    pub fn subject(&self) -> TokenSubject {
        TokenSubject::new(self.sub, self.email.clone(), self.name.clone())
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp, 0)
    }
}

/// Issues and verifies access tokens.
pub trait TokenProvider: Send + Sync {
    /// Sign a token for `subject`, valid for `ttl` or the provider's default.
    fn generate(
        &self,
        subject: &TokenSubject,
        ttl: Option<Duration>,
    ) -> Result<String, ProviderError>;

    /// Check a token and return its claims.
    ///
    /// Malformed, tampered, foreign or expired tokens fail with `InvalidToken`.
    fn verify(&self, token: &str) -> Result<TokenClaims, ProviderError>;
}

/// HS256 JWT provider.
#[derive(Clone)]
pub struct JwtTokenProvider {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    issuer: String,
    default_ttl: Duration,
}

impl std::fmt::Debug for JwtTokenProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtTokenProvider")
            .field("secret", &"<redacted>")
            .field("issuer", &self.issuer)
            .field("default_ttl", &self.default_ttl)
            .finish()
    }
}

impl JwtTokenProvider {
    pub fn new(
        secret: impl AsRef<[u8]>,
        issuer: impl Into<String>,
        default_ttl: Duration,
    ) -> Result<Self, ProviderError> {
        let secret = secret.as_ref();
        if secret.len() < MIN_SECRET_LENGTH {
            return Err(ProviderError::provider(format!(
                "token secret must be at least {} bytes long",
                MIN_SECRET_LENGTH
            )));
        }
        if default_ttl <= Duration::zero() {
            return Err(ProviderError::provider("token lifetime must be positive"));
        }
        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            issuer: issuer.into(),
            default_ttl,
        })
    }

    pub fn from_config(config: &TokenConfig) -> Result<Self, ProviderError> {
        let ttl = i64::try_from(config.ttl_seconds)
            .ok()
            .and_then(Duration::try_seconds)
            .ok_or_else(|| ProviderError::provider("token lifetime is out of range"))?;
        Self::new(&config.secret, config.issuer.clone(), ttl)
    }

    /// Sign a token as if the current time were `now`.
    pub fn generate_at(
        &self,
        subject: &TokenSubject,
        ttl: Option<Duration>,
        now: DateTime<Utc>,
    ) -> Result<String, ProviderError> {
        let ttl = ttl.unwrap_or(self.default_ttl);
        if ttl <= Duration::zero() {
            return Err(ProviderError::provider("token lifetime must be positive"));
        }
        let expires_at = now
            .checked_add_signed(ttl)
            .ok_or_else(|| ProviderError::provider("token expiry is out of range"))?;

        let claims = TokenClaims {
            sub: subject.sub,
            email: subject.email.clone(),
            name: subject.name.clone(),
            iss: self.issuer.clone(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
            jti: Uuid::new_v4().to_string(),
        };

        jsonwebtoken::encode(&Header::new(ALGORITHM), &claims, &self.encoding_key).map_err(|e| {
            ProviderError::provider_with_source("failed to sign token", Box::new(e))
        })
    }

    /// Verify a token as if the current time were `now`.
    ///
    /// Expiry is checked here against `now` rather than by `jsonwebtoken`,
    /// which only knows the wall clock and applies a leeway.
    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<TokenClaims, ProviderError> {
        let validation = self.validation();
        let claims = jsonwebtoken::decode::<TokenClaims>(token, &self.decoding_key, &validation)
            .map_err(|e| {
                let message = match e.kind() {
                    JwtErrorKind::InvalidIssuer => "token was issued by someone else",
                    JwtErrorKind::InvalidSignature => "token signature does not match",
                    JwtErrorKind::InvalidAlgorithm => "unsupported token algorithm",
                    JwtErrorKind::MissingRequiredClaim(_) => "token is missing a required claim",
                    _ => "token is malformed",
                };
                ProviderError::invalid_token_with_source(message, Box::new(e))
            })?
            .claims;

        if now.timestamp() >= claims.exp {
            return Err(ProviderError::invalid_token("token expired"));
        }
        Ok(claims)
    }

    fn validation(&self) -> Validation {
        let mut validation = Validation::new(ALGORITHM);
        validation.set_issuer(&[&self.issuer]);
        validation.set_required_spec_claims(&["exp", "iss"]);
        validation.validate_exp = false;
        validation
    }
}

impl TokenProvider for JwtTokenProvider {
    fn generate(
        &self,
        subject: &TokenSubject,
        ttl: Option<Duration>,
    ) -> Result<String, ProviderError> {
        self.generate_at(subject, ttl, Utc::now())
    }

    fn verify(&self, token: &str) -> Result<TokenClaims, ProviderError> {
        self.verify_at(token, Utc::now())
    }
}
