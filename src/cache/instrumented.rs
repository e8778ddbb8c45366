//! Instrumented Store Module
//!
//! Wraps a [`TtlStore`] and counts every delegated operation.

use std::time::Duration;

use crate::cache::{CacheStatistics, CacheStats, TtlStore};

// == Instrumented Store ==
/// Statistics decorator around an inner [`TtlStore`].
///
/// Deletes are counted once per call, not once per key.
#[derive(Debug)]
pub struct InstrumentedStore<V> {
    inner: TtlStore<V>,
    stats: CacheStats,
}

impl<V: Clone> Default for InstrumentedStore<V> {
    fn default() -> Self {
        Self::new(TtlStore::new())
    }
}

impl<V: Clone> InstrumentedStore<V> {
    pub fn new(inner: TtlStore<V>) -> Self {
        Self {
            inner,
            stats: CacheStats::new(),
        }
    }

    /// Delegates to [`TtlStore::get`], recording a hit or a miss.
    pub fn get(&mut self, key: &str) -> Option<V> {
        let value = self.inner.get(key);
        match value {
            Some(_) => self.stats.record_hit(),
            None => self.stats.record_miss(),
        }
        value
    }

    pub fn set(&mut self, key: impl Into<String>, value: V, ttl: Duration) {
        self.stats.record_set();
        self.inner.set(key, value, ttl);
    }

    pub fn delete<K: AsRef<str>>(&mut self, keys: &[K]) -> usize {
        self.stats.record_delete();
        self.inner.delete(keys)
    }

    pub fn keys(&self) -> Vec<String> {
        self.inner.keys()
    }

    pub fn live_keys(&self) -> Vec<String> {
        self.inner.live_keys()
    }

    /// Live-entry check that leaves statistics untouched.
    pub fn contains_live(&self, key: &str) -> bool {
        self.inner.contains_live(key)
    }

    /// Empties the inner store. Statistics are left untouched.
    pub fn flush_all(&mut self) {
        self.inner.flush_all();
    }

    pub fn purge_expired(&mut self) -> usize {
        self.inner.purge_expired()
    }

    // == Stats ==
    /// Returns the counters plus the live key count.
    pub fn stats(&self) -> CacheStatistics {
        self.stats.snapshot(self.inner.live_len())
    }

    pub fn reset_stats(&mut self) {
        self.stats = CacheStats::new();
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    const TTL: Duration = Duration::from_secs(60);

    #[test]
    fn test_misses_then_hits() {
        let mut store = InstrumentedStore::default();

        for _ in 0..3 {
            assert!(store.get("page").is_none());
        }
        store.set("page", "<p>hi</p>".to_string(), TTL);
        for _ in 0..5 {
            assert!(store.get("page").is_some());
        }

        let stats = store.stats();
        assert_eq!(stats.misses, 3);
        assert_eq!(stats.hits, 5);
        assert_eq!(stats.sets, 1);
        assert_eq!(stats.hit_rate, 5.0 / 8.0);
        assert_eq!(stats.key_count, 1);
    }

    #[test]
    fn test_delete_counts_once_per_call() {
        let mut store = InstrumentedStore::default();
        store.set("a", 1u8, TTL);
        store.set("b", 2u8, TTL);

        assert_eq!(store.delete(&["a", "b", "c"]), 2);
        assert_eq!(store.stats().deletes, 1);

        // Deleting nothing is still a call
        assert_eq!(store.delete(&["a"]), 0);
        assert_eq!(store.stats().deletes, 2);
    }

    #[test]
    fn test_flush_keeps_statistics() {
        let mut store = InstrumentedStore::default();
        store.set("a", 1u8, TTL);
        store.get("a");

        store.flush_all();

        let stats = store.stats();
        assert_eq!(stats.key_count, 0);
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.sets, 1);
    }

    #[test]
    fn test_reset_stats_keeps_entries() {
        let mut store = InstrumentedStore::default();
        store.set("a", 1u8, TTL);
        store.get("a");
        store.get("b");

        store.reset_stats();

        let stats = store.stats();
        assert_eq!((stats.hits, stats.misses, stats.sets, stats.deletes), (0, 0, 0, 0));
        assert_eq!(stats.key_count, 1);
    }

    #[test]
    fn test_contains_live_is_not_counted() {
        let mut store = InstrumentedStore::default();
        store.set("a", 1u8, TTL);

        assert!(store.contains_live("a"));
        assert!(!store.contains_live("b"));

        let stats = store.stats();
        assert_eq!((stats.hits, stats.misses), (0, 0));
    }

    #[tokio::test(start_paused = true)]
    async fn test_key_count_excludes_expired() {
        let mut store = InstrumentedStore::default();
        store.set("short", 1u8, Duration::from_secs(1));
        store.set("long", 2u8, TTL);

        tokio::time::advance(Duration::from_secs(2)).await;

        assert_eq!(store.keys().len(), 2);
        assert_eq!(store.stats().key_count, 1);
    }
}
