//! Expiry Sweep Task
//!
//! Background task that periodically removes expired cache entries.
//!
//! Reads never depend on the sweep; it only reclaims memory held by entries
//! nobody asked for again.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::{CacheService, Cacheable};

/// Spawns a background task that purges expired entries every
/// `sweep_interval_secs` seconds.
///
/// An interval of 0 disables the sweep; expired entries are then only
/// dropped when read.
///
/// # Returns
/// A JoinHandle for the spawned task, or `None` when disabled; abort it
/// during graceful shutdown.
///
/// # Example
/// ```ignore
/// let cache = Arc::new(CacheService::<CachedPage>::new(CacheSettings::default()));
/// let sweep_handle = spawn_sweep_task(cache.clone(), 60);
/// // Later, during shutdown:
/// if let Some(handle) = sweep_handle {
///     handle.abort();
/// }
/// ```
pub fn spawn_sweep_task<V>(
    cache: Arc<CacheService<V>>,
    sweep_interval_secs: u64,
) -> Option<JoinHandle<()>>
where
    V: Cacheable + Clone + Send + Sync + 'static,
{
    if sweep_interval_secs == 0 {
        info!("Cache expiry sweep disabled (interval is 0)");
        return None;
    }
    let interval = Duration::from_secs(sweep_interval_secs);

    Some(tokio::spawn(async move {
        info!(
            "Starting cache expiry sweep with interval of {} seconds",
            sweep_interval_secs
        );

        loop {
            tokio::time::sleep(interval).await;

            let removed = cache.purge_expired().await;

            if removed > 0 {
                info!("Cache sweep: removed {} expired entries", removed);
            } else {
                debug!("Cache sweep: no expired entries found");
            }
        }
    }))
}
