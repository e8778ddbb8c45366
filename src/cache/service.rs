//! Cache Service Module
//!
//! Read-through caching and invalidation for forum views.
//!
//! One [`CacheService`] is built at startup and shared by every handler
//! through the application state.

use std::future::Future;
use std::time::Duration;

use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::cache::keys::{
    categories_key, category_threads_pattern, search_pattern, thread_key, user_profile_key,
};
use crate::cache::{
    CacheStatistics, ForumKey, ForumMutation, InstrumentedStore, InvalidationRequest, KeyPattern,
    TtlStore,
};
use crate::config::CacheSettings;
use crate::error::CacheError;

// == Cacheable ==
/// Success predicate deciding whether a freshly produced value may be stored.
pub trait Cacheable {
    fn is_cacheable(&self) -> bool;
}

// == Request Context ==
/// Identity of the request being served.
///
/// Authenticated requests always see live data and never touch the cache.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestContext {
    session_user: Option<String>,
}

impl RequestContext {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn authenticated(username: impl Into<String>) -> Self {
        Self {
            session_user: Some(username.into()),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.session_user.is_some()
    }

    pub fn username(&self) -> Option<&str> {
        self.session_user.as_deref()
    }
}

// == Cache Service ==
/// Coordinates forum reads and writes with the shared store.
#[derive(Debug)]
pub struct CacheService<V> {
    store: RwLock<InstrumentedStore<V>>,
    settings: CacheSettings,
}

impl<V> CacheService<V>
where
    V: Cacheable + Clone + Send + Sync,
{
    pub fn new(settings: CacheSettings) -> Self {
        Self {
            store: RwLock::new(InstrumentedStore::new(TtlStore::new())),
            settings,
        }
    }

    pub fn settings(&self) -> &CacheSettings {
        &self.settings
    }

    // == Read Through ==
    /// Serves `key` from the cache, or runs `producer` and stores its result.
    ///
    /// The TTL comes from the key's namespace.
    pub async fn cache_read<F, Fut, E>(
        &self,
        ctx: &RequestContext,
        key: &ForumKey,
        producer: F,
    ) -> Result<V, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        let ttl = self.settings.ttl_for(key.namespace());
        self.cache_read_with_ttl(ctx, &key.to_string(), ttl, producer)
            .await
    }

    /// Read-through with an explicit TTL.
    ///
    /// - authenticated `ctx`: `producer` runs, nothing is read or written
    /// - hit: the stored value is returned and `producer` is never called
    /// - miss: `producer` runs; an `Err` is returned untouched, an `Ok` is
    ///   stored only when it is [`Cacheable`]
    ///
    /// The store lock is not held while `producer` runs.
    pub async fn cache_read_with_ttl<F, Fut, E>(
        &self,
        ctx: &RequestContext,
        key: &str,
        ttl: Duration,
        producer: F,
    ) -> Result<V, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        if ctx.is_authenticated() {
            debug!(cache = "response", outcome = "bypass", key, "authenticated request");
            return producer().await;
        }

        if let Some(value) = self.store.write().await.get(key) {
            debug!(cache = "response", outcome = "hit", key, "serving cached value");
            return Ok(value);
        }

        debug!(cache = "response", outcome = "miss", key, "producing fresh value");
        let value = producer().await?;

        if value.is_cacheable() {
            self.store.write().await.set(key, value.clone(), ttl);
        } else {
            debug!(cache = "response", key, "result not cacheable, skipping store");
        }

        Ok(value)
    }

    // == Direct Access ==

    pub async fn get(&self, key: &str) -> Option<V> {
        self.store.write().await.get(key)
    }

    pub async fn set(&self, key: &str, value: V, ttl: Duration) {
        self.store.write().await.set(key, value, ttl);
    }

    /// Returns whether a live entry exists, without touching statistics.
    pub async fn contains(&self, key: &str) -> bool {
        self.store.read().await.contains_live(key)
    }

    // == Invalidation ==

    /// Applies one invalidation request. Never fails.
    ///
    /// A pattern that cannot be compiled is logged and skipped; the affected
    /// entries then expire with their TTL.
    pub async fn invalidate(&self, request: &InvalidationRequest) -> usize {
        match request {
            InvalidationRequest::Key(key) => self.store.write().await.delete(&[key]),
            InvalidationRequest::Pattern(pattern) => match self.invalidate_pattern(pattern).await
            {
                Ok(removed) => removed,
                Err(err) => {
                    warn!(%pattern, error = %err, "cache invalidation failed");
                    0
                }
            },
        }
    }

    /// Deletes every currently held key matching `pattern`.
    ///
    /// Resolved against the key set at call time, so pages cached since the
    /// last invalidation are included. Returns the number of entries removed.
    pub async fn invalidate_pattern(&self, pattern: &KeyPattern) -> Result<usize, CacheError> {
        let matcher = pattern.compile()?;

        let mut store = self.store.write().await;
        let matching: Vec<String> = store
            .keys()
            .into_iter()
            .filter(|key| matcher.matches(key))
            .collect();

        if matching.is_empty() {
            return Ok(0);
        }
        let removed = store.delete(&matching);
        debug!(%pattern, removed, "invalidated cache pattern");
        Ok(removed)
    }

    /// Purges every listing page of `category` and the home page category list.
    pub async fn invalidate_category(&self, category: &str) {
        self.invalidate(&category_threads_pattern(category).into())
            .await;
        self.invalidate(&InvalidationRequest::Key(categories_key().to_string()))
            .await;
    }

    pub async fn invalidate_thread(&self, slug: &str) {
        self.invalidate(&InvalidationRequest::Key(thread_key(slug).to_string()))
            .await;
    }

    pub async fn invalidate_user(&self, username: &str) {
        self.invalidate(&InvalidationRequest::Key(
            user_profile_key(username).to_string(),
        ))
        .await;
    }

    pub async fn invalidate_search(&self) {
        self.invalidate(&search_pattern().into()).await;
    }

    /// Drops every view made stale by `mutation`.
    ///
    /// Call after the write has committed and before responding.
    pub async fn apply_mutation(&self, mutation: &ForumMutation) {
        let mut removed = 0;
        for request in mutation.invalidations() {
            removed += self.invalidate(&request).await;
        }
        debug!(?mutation, removed, "applied cache invalidation policy");
    }

    // == Administration ==

    pub async fn statistics(&self) -> CacheStatistics {
        self.store.read().await.stats()
    }

    pub async fn reset_statistics(&self) {
        self.store.write().await.reset_stats();
    }

    /// Empties the cache. Statistics are kept.
    pub async fn flush_all(&self) {
        self.store.write().await.flush_all();
    }

    /// Physically removes expired entries. Returns how many were dropped.
    pub async fn purge_expired(&self) -> usize {
        self.store.write().await.purge_expired()
    }
}
