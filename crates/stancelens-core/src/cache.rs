//! Result cache seam
//!
//! The engine is a pure function of its inputs, so any key-value store can
//! memoize it. Eviction and expiry belong to the store; this module only
//! fixes the key derivation and the interface.

use crate::{ClassificationResult, Result};
use async_trait::async_trait;
use sha2::{Digest, Sha256};
use std::fmt;
use std::time::Duration;

/// Deterministic cache key derived from a content hash of the request
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CacheKey(String);

impl CacheKey {
    /// Key for a sentiment request
    pub fn sentiment(text: &str) -> Self {
        let digest = Sha256::digest(text.as_bytes());
        Self(format!("sentiment:{:x}", digest))
    }

    /// Key for a stance request.
    ///
    /// The text length is hashed first so `("a|b", "c")` and `("a", "b|c")`
    /// cannot collide.
    pub fn stance(text: &str, target: &str) -> Self {
        let mut hasher = Sha256::new();
        hasher.update((text.len() as u64).to_le_bytes());
        hasher.update(text.as_bytes());
        hasher.update(target.as_bytes());
        Self(format!("stance:{:x}", hasher.finalize()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// External result store
#[async_trait]
pub trait ResultCache: Send + Sync {
    /// Look up a previously stored result
    async fn get(&self, key: &CacheKey) -> Result<Option<ClassificationResult>>;

    /// Store a result for at most `ttl`
    async fn set(&self, key: &CacheKey, value: &ClassificationResult, ttl: Duration) -> Result<()>;
}

/// Cache that stores nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopCache;

#[async_trait]
impl ResultCache for NoopCache {
    async fn get(&self, _key: &CacheKey) -> Result<Option<ClassificationResult>> {
        Ok(None)
    }

    async fn set(&self, _key: &CacheKey, _value: &ClassificationResult, _ttl: Duration) -> Result<()> {
        Ok(())
    }
}
