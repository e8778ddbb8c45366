//! Cache Statistics Module
//!
//! Tracks cache performance metrics: hits, misses, sets and deletes.

use serde::Serialize;

// == Cache Stats ==
/// Raw process-wide counters, mutated by every instrumented store operation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Number of successful cache retrievals
    pub hits: u64,
    /// Number of failed cache retrievals (key not found or expired)
    pub misses: u64,
    /// Number of insert/overwrite operations
    pub sets: u64,
    /// Number of delete calls (one per call, regardless of key count)
    pub deletes: u64,
}

impl CacheStats {
    // == Constructor ==
    /// Creates a new CacheStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Returns hits / (hits + misses), or 0.0 if no reads have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    pub fn record_set(&mut self) {
        self.sets += 1;
    }

    pub fn record_delete(&mut self) {
        self.deletes += 1;
    }

    // == Snapshot ==
    /// Freezes the counters into a reportable snapshot.
    pub fn snapshot(&self, key_count: usize) -> CacheStatistics {
        CacheStatistics {
            hits: self.hits,
            misses: self.misses,
            sets: self.sets,
            deletes: self.deletes,
            hit_rate: self.hit_rate(),
            key_count,
        }
    }
}

// == Cache Statistics ==
/// Point-in-time statistics as reported to administrators.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CacheStatistics {
    pub hits: u64,
    pub misses: u64,
    pub sets: u64,
    pub deletes: u64,
    /// hits / (hits + misses), 0.0 when nothing was read
    pub hit_rate: f64,
    /// Number of live (non-expired) keys
    pub key_count: usize,
}
