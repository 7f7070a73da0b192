//! Error types for infrastructure providers (hashing, token signing).
//!
//! Provider errors wrap technical failures of external collaborators. Each variant
//! keeps the original error, when one exists, for diagnostics.

use crate::error::ErrorKind;
use thiserror::Error;

type BoxedSource = Box<dyn std::error::Error + Send + Sync>;

/// Errors raised by hash and token providers.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Generating or comparing a hash failed.
    #[error("Hashing failed: {message}")]
    Hashing {
        message: String,
        #[source]
        source: Option<BoxedSource>,
    },

    /// A token is malformed, has a bad signature or has expired.
    #[error("Invalid token: {message}")]
    InvalidToken {
        message: String,
        #[source]
        source: Option<BoxedSource>,
    },

    /// Any other provider failure.
    #[error("Provider error: {message}")]
    Provider {
        message: String,
        #[source]
        source: Option<BoxedSource>,
    },
}

impl ProviderError {
    /// Create a hashing error.
    pub fn hashing(message: impl Into<String>) -> Self {
        Self::Hashing {
            message: message.into(),
            source: None,
        }
    }

    /// Create a hashing error keeping the underlying cause.
    pub fn hashing_with_source(message: impl Into<String>, source: BoxedSource) -> Self {
        Self::Hashing {
            message: message.into(),
            source: Some(source),
        }
    }

    /// Create an invalid token error.
    pub fn invalid_token(message: impl Into<String>) -> Self {
        Self::InvalidToken {
            message: message.into(),
            source: None,
        }
    }

    /// Create an invalid token error keeping the underlying cause.
    pub fn invalid_token_with_source(message: impl Into<String>, source: BoxedSource) -> Self {
        Self::InvalidToken {
            message: message.into(),
            source: Some(source),
        }
    }

    /// Create a generic provider error.
    pub fn provider(message: impl Into<String>) -> Self {
        Self::Provider {
            message: message.into(),
            source: None,
        }
    }

    /// Create a generic provider error keeping the underlying cause.
    pub fn provider_with_source(message: impl Into<String>, source: BoxedSource) -> Self {
        Self::Provider {
            message: message.into(),
            source: Some(source),
        }
    }

    /// Check if this error is caused by a bad token rather than a broken provider.
    pub fn is_invalid_token(&self) -> bool {
        matches!(self, ProviderError::InvalidToken { .. })
    }

    /// Classify this error for adapters.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ProviderError::InvalidToken { .. } => ErrorKind::Unauthorized,
            ProviderError::Hashing { .. } | ProviderError::Provider { .. } => ErrorKind::Internal,
        }
    }
}
