//! Cache Module
//!
//! Process-local response cache for forum views: a TTL store, a statistics
//! decorator around it, typed keys and invalidation patterns, and the
//! [`CacheService`] that ties them to forum reads and writes.

mod entry;
mod instrumented;
pub mod keys;
mod pattern;
mod policy;
mod service;
mod stats;
mod store;


// Re-export public types
pub use entry::CacheEntry;
pub use instrumented::InstrumentedStore;
pub use keys::{ForumKey, Namespace};
pub use pattern::{InvalidationRequest, KeyMatcher, KeyPattern, PATTERN_SIZE_LIMIT};
pub use policy::ForumMutation;
pub use service::{CacheService, Cacheable, RequestContext};
pub use stats::{CacheStatistics, CacheStats};
pub use store::TtlStore;
