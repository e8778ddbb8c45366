//! Response DTOs for the forum API
//!
//! JSON bodies returned by write and admin endpoints. Pages are HTML and
//! travel as [`CachedPage`](super::CachedPage).

use serde::Serialize;

use crate::cache::CacheStatistics;

/// Response body for every forum write and admin action.
#[derive(Debug, Clone, Serialize)]
pub struct MutationResponse {
    pub message: String,
    /// Slug of the affected category, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Slug of the affected thread, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thread: Option<String>,
    /// Id of the affected post, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post: Option<u64>,
}

impl MutationResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            category: None,
            thread: None,
            post: None,
        }
    }

    pub fn with_category(mut self, slug: impl Into<String>) -> Self {
        self.category = Some(slug.into());
        self
    }

    pub fn with_thread(mut self, slug: impl Into<String>) -> Self {
        self.thread = Some(slug.into());
        self
    }

    pub fn with_post(mut self, id: u64) -> Self {
        self.post = Some(id);
        self
    }
}

/// Response body for GET /admin/cache/stats
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    pub hits: u64,
    pub misses: u64,
    pub sets: u64,
    pub deletes: u64,
    /// hits / (hits + misses), 0 when no reads happened
    pub hit_rate: f64,
    /// Live entries currently held
    pub key_count: usize,
}

impl From<CacheStatistics> for StatsResponse {
    fn from(stats: CacheStatistics) -> Self {
        Self {
            hits: stats.hits,
            misses: stats.misses,
            sets: stats.sets,
            deletes: stats.deletes,
            hit_rate: stats.hit_rate,
            key_count: stats.key_count,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}
