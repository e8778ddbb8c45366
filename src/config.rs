//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::cache::Namespace;

/// Per-namespace TTLs, in seconds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheSettings {
    /// Home page category list (rarely changes)
    pub categories_ttl: u64,
    /// Category thread listings and thread pages (moderate activity)
    pub threads_ttl: u64,
    /// User profiles (occasional updates)
    pub user_profile_ttl: u64,
    /// Search results (frequently changing)
    pub search_results_ttl: u64,
}

impl CacheSettings {
    /// Returns the TTL for keys of `namespace`.
    pub fn ttl_for(&self, namespace: Namespace) -> Duration {
        let secs = match namespace {
            Namespace::Categories => self.categories_ttl,
            Namespace::CategoryThreads | Namespace::Thread => self.threads_ttl,
            Namespace::UserProfile => self.user_profile_ttl,
            Namespace::SearchResults => self.search_results_ttl,
        };
        Duration::from_secs(secs)
    }
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            categories_ttl: 600,
            threads_ttl: 180,
            user_profile_ttl: 300,
            search_results_ttl: 120,
        }
    }
}

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// Interval in seconds between expiry sweeps; 0 disables the sweep
    pub sweep_interval: u64,
    /// Threads per category page and results per search page
    pub page_size: usize,
    /// Namespace TTLs
    pub cache: CacheSettings,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `CACHE_SWEEP_INTERVAL` - Expiry sweep frequency in seconds, 0 disables it (default: 60)
    /// - `FORUM_PAGE_SIZE` - Listing page size (default: 20)
    /// - `CACHE_TTL_CATEGORIES` - Category list TTL (default: 600)
    /// - `CACHE_TTL_THREADS` - Listing and thread TTL (default: 180)
    /// - `CACHE_TTL_USER_PROFILE` - Profile TTL (default: 300)
    /// - `CACHE_TTL_SEARCH_RESULTS` - Search results TTL (default: 120)
    ///
    /// Unparseable values fall back to the default.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            server_port: env_or("SERVER_PORT", defaults.server_port),
            sweep_interval: env_or("CACHE_SWEEP_INTERVAL", defaults.sweep_interval),
            page_size: env_or("FORUM_PAGE_SIZE", defaults.page_size),
            cache: CacheSettings {
                categories_ttl: env_or("CACHE_TTL_CATEGORIES", defaults.cache.categories_ttl),
                threads_ttl: env_or("CACHE_TTL_THREADS", defaults.cache.threads_ttl),
                user_profile_ttl: env_or(
                    "CACHE_TTL_USER_PROFILE",
                    defaults.cache.user_profile_ttl,
                ),
                search_results_ttl: env_or(
                    "CACHE_TTL_SEARCH_RESULTS",
                    defaults.cache.search_results_ttl,
                ),
            },
        }
    }
}

fn env_or<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 3000,
            sweep_interval: 60,
            page_size: 20,
            cache: CacheSettings::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.server_port, 3000);
        assert_eq!(config.sweep_interval, 60);
        assert_eq!(config.page_size, 20);
        assert_eq!(config.cache.categories_ttl, 600);
        assert_eq!(config.cache.threads_ttl, 180);
        assert_eq!(config.cache.user_profile_ttl, 300);
        assert_eq!(config.cache.search_results_ttl, 120);
    }

    #[test]
    fn test_ttl_for_namespace() {
        let settings = CacheSettings::default();
        assert_eq!(
            settings.ttl_for(Namespace::Categories),
            Duration::from_secs(600)
        );
        assert_eq!(
            settings.ttl_for(Namespace::CategoryThreads),
            Duration::from_secs(180)
        );
        assert_eq!(settings.ttl_for(Namespace::Thread), Duration::from_secs(180));
        assert_eq!(
            settings.ttl_for(Namespace::UserProfile),
            Duration::from_secs(300)
        );
        assert_eq!(
            settings.ttl_for(Namespace::SearchResults),
            Duration::from_secs(120)
        );
    }

    #[test]
    fn test_env_or_parses_and_falls_back() {
        env::set_var("FORUM_CACHE_TEST_GOOD", "42");
        env::set_var("FORUM_CACHE_TEST_BAD", "forty-two");

        assert_eq!(env_or("FORUM_CACHE_TEST_GOOD", 7u64), 42);
        assert_eq!(env_or("FORUM_CACHE_TEST_BAD", 7u64), 7);
        assert_eq!(env_or("FORUM_CACHE_TEST_MISSING", 7u64), 7);

        env::remove_var("FORUM_CACHE_TEST_GOOD");
        env::remove_var("FORUM_CACHE_TEST_BAD");
    }
}
