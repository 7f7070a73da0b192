//! Password hashing.
//!
//! [`BcryptHashProvider`] stores hashes in the modular crypt format
//! (`$2b$<cost>$<salt+digest>`). The salt is random per hash, so hashing the
//! same password twice yields different strings that both verify. bcrypt is
//! deliberately slow, so the work runs on tokio's blocking pool.

use crate::config::{HashingConfig, MAX_HASH_COST, MIN_HASH_COST};
use crate::providers::ProviderError;
use std::future::Future;
use tokio::task;

/// One-way hashing of secrets.
pub trait HashProvider: Send + Sync {
    /// Hash `payload` with a fresh salt.
    fn generate_hash(
        &self,
        payload: &str,
    ) -> impl Future<Output = Result<String, ProviderError>> + Send;

    /// Whether `payload` matches `hashed`. A hash this provider cannot read is an
    /// error, not a mismatch.
    fn compare_hash(
        &self,
        payload: &str,
        hashed: &str,
    ) -> impl Future<Output = Result<bool, ProviderError>> + Send;
}

/// bcrypt with a configurable work factor.
#[derive(Debug, Clone)]
pub struct BcryptHashProvider {
    cost: u32,
}

impl BcryptHashProvider {
    pub fn new(cost: u32) -> Result<Self, ProviderError> {
        if !(MIN_HASH_COST..=MAX_HASH_COST).contains(&cost) {
            return Err(ProviderError::hashing(format!(
                "bcrypt cost must be between {} and {}, got {}",
                MIN_HASH_COST, MAX_HASH_COST, cost
            )));
        }
        Ok(Self { cost })
    }

    pub fn from_config(config: &HashingConfig) -> Result<Self, ProviderError> {
        Self::new(config.cost)
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }
}

impl Default for BcryptHashProvider {
    fn default() -> Self {
        Self {
            cost: HashingConfig::default().cost,
        }
    }
}

impl HashProvider for BcryptHashProvider {
    async fn generate_hash(&self, payload: &str) -> Result<String, ProviderError> {
        let payload = payload.to_owned();
        let cost = self.cost;
        task::spawn_blocking(move || bcrypt::hash(payload, cost))
            .await
            .map_err(|e| ProviderError::hashing_with_source("hashing task failed", Box::new(e)))?
            .map_err(|e| ProviderError::hashing_with_source("could not hash payload", Box::new(e)))
    }

    async fn compare_hash(&self, payload: &str, hashed: &str) -> Result<bool, ProviderError> {
        let payload = payload.to_owned();
        let hashed = hashed.to_owned();
        task::spawn_blocking(move || bcrypt::verify(payload, &hashed))
            .await
            .map_err(|e| ProviderError::hashing_with_source("hashing task failed", Box::new(e)))?
            .map_err(|e| {
                ProviderError::hashing_with_source("hash is not a bcrypt hash", Box::new(e))
            })
    }
}
