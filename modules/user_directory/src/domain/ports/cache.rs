use std::time::Duration;

use async_trait::async_trait;

/// Key-value store with per-entry expiry. Values are opaque encoded bytes;
/// typed encoding lives with the caller (see `domain::cache`).
#[async_trait]
pub trait CachePort: Send + Sync {
    /// `Ok(None)` when the key is absent or expired.
    async fn get(&self, key: &str) -> anyhow::Result<Option<Vec<u8>>>;
    async fn set(&self, key: &str, value: Vec<u8>, ttl: Duration) -> anyhow::Result<()>;
    async fn delete(&self, key: &str) -> anyhow::Result<()>;
}
