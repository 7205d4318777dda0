//! A small TTL cache with absolute per-entry expiry.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::time::Instant;

/// Map-backed cache whose entries expire a fixed duration after insertion.
///
/// Expiry is absolute: refreshing requires a new `set`. Uses
/// `tokio::time::Instant` so tests can drive expiry with paused time.
#[derive(Debug, Clone)]
pub struct TtlCache<K, V> {
    entries: Arc<RwLock<HashMap<K, (V, Instant)>>>,
    ttl: Duration,
}

impl<K, V> TtlCache<K, V>
where
    K: Eq + Hash + Clone + Send + Sync,
    V: Clone + Send + Sync,
{
    /// Creates an empty cache with the given time-to-live.
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
            ttl,
        }
    }

    /// Returns the cached value for `key` if present and not expired.
    pub async fn get(&self, key: &K) -> Option<V> {
        let now = Instant::now();
        {
            let entries = self.entries.read().await;
            match entries.get(key) {
                Some((value, expires_at)) if *expires_at > now => return Some(value.clone()),
                Some(_) => {}
                None => return None,
            }
        }
        // Entry expired; drop it so the map doesn't accumulate stale rows.
        self.entries.write().await.remove(key);
        None
    }

    /// Stores `value` under `key`, replacing any previous entry and
    /// restarting its TTL.
    pub async fn set(&self, key: K, value: V) {
        let expires_at = Instant::now() + self.ttl;
        self.entries.write().await.insert(key, (value, expires_at));
    }

    /// Removes the entry for `key`, if any.
    pub async fn invalidate(&self, key: &K) {
        self.entries.write().await.remove(key);
    }

    /// Returns the number of entries currently held, expired or not.
    pub async fn entry_count(&self) -> usize {
        self.entries.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn entries_survive_until_the_ttl() {
        let cache = TtlCache::new(Duration::from_secs(600));
        cache.set("k", 1).await;

        tokio::time::advance(Duration::from_secs(599)).await;
        assert_eq!(cache.get(&"k").await, Some(1));
    }

    #[tokio::test(start_paused = true)]
    async fn entries_expire_after_the_ttl() {
        let cache = TtlCache::new(Duration::from_secs(600));
        cache.set("k", 1).await;

        tokio::time::advance(Duration::from_secs(601)).await;
        assert_eq!(cache.get(&"k").await, None);
        // The expired entry was pruned, not just hidden.
        assert_eq!(cache.entry_count().await, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn set_restarts_the_ttl() {
        let cache = TtlCache::new(Duration::from_secs(10));
        cache.set("k", 1).await;

        tokio::time::advance(Duration::from_secs(8)).await;
        cache.set("k", 2).await;

        tokio::time::advance(Duration::from_secs(8)).await;
        assert_eq!(cache.get(&"k").await, Some(2));
    }

    #[tokio::test]
    async fn invalidate_removes_the_entry() {
        let cache = TtlCache::new(Duration::from_secs(600));
        cache.set("k", 1).await;
        cache.invalidate(&"k").await;
        assert_eq!(cache.get(&"k").await, None);
    }

    #[tokio::test]
    async fn missing_keys_are_none() {
        let cache: TtlCache<&str, i32> = TtlCache::new(Duration::from_secs(600));
        assert_eq!(cache.get(&"absent").await, None);
    }
}
