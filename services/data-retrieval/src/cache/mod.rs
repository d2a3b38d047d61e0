// In-process TTL cache shielding rate-limited upstream APIs
use std::collections::HashMap;
use std::future::Future;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tracing::debug;

struct CacheEntry<V> {
    stored_at: Instant,
    value: V,
}

/// Keyed store of `{timestamp, value}` with a per-call TTL
///
/// Entries are never evicted; a stale entry is overwritten by the next
/// successful refetch. Concurrent misses for one key are not deduplicated,
/// each caller runs its own producer.
pub struct TtlCache<V> {
    entries: RwLock<HashMap<String, CacheEntry<V>>>,
}

impl<V: Clone> TtlCache<V> {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Value stored under `key` if it is younger than `ttl`
    pub async fn get_fresh(&self, key: &str, ttl: Duration) -> Option<V> {
        let entries = self.entries.read().await;
        entries
            .get(key)
            .filter(|entry| entry.stored_at.elapsed() < ttl)
            .map(|entry| entry.value.clone())
    }

    async fn insert_at(&self, key: &str, value: V, stored_at: Instant) {
        let mut entries = self.entries.write().await;
        entries.insert(key.to_string(), CacheEntry { stored_at, value });
    }

    /// Return the fresh value for `key`, or run `producer` and store its result
    ///
    /// The entry is stamped with the time the lookup started. A failing
    /// producer leaves the previous entry (if any) untouched.
    pub async fn get_or_compute<F, Fut, E>(
        &self,
        key: &str,
        ttl: Duration,
        producer: F,
    ) -> Result<V, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        let started = Instant::now();
        if let Some(hit) = self.get_fresh(key, ttl).await {
            debug!(key, "cache hit");
            return Ok(hit);
        }

        debug!(key, "cache miss");
        let value = producer().await?;
        self.insert_at(key, value.clone(), started).await;
        Ok(value)
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

impl<V: Clone> Default for TtlCache<V> {
    fn default() -> Self {
        Self::new()
    }
}
