//! Durable store interface.
//!
//! The cache never owns forum records; it reads through this trait on a miss
//! and is told by the write path which identifiers changed.

use async_trait::async_trait;

use super::models::{
    CategorySummary, Paginated, Post, PostRemoval, RemovedThread, Thread, ThreadDetail,
    ThreadSummary, UserProfile,
};
use super::Category;
use crate::error::Result;

/// Forum persistence consumed by the HTTP layer.
///
/// Lookups of unknown records fail with [`AppError::NotFound`](crate::error::AppError::NotFound).
#[async_trait]
pub trait ForumStore: Send + Sync {
    /// All categories in display order, with thread and post counts.
    async fn categories(&self) -> Result<Vec<CategorySummary>>;

    /// Creates a category after the existing ones, slugged from `name`.
    async fn create_category(&self, name: &str, description: &str) -> Result<Category>;

    /// One page of a category's threads: pinned first, then most recent activity.
    async fn category_threads(
        &self,
        category_slug: &str,
        page: u32,
    ) -> Result<(Category, Paginated<ThreadSummary>)>;

    async fn thread(&self, slug: &str) -> Result<ThreadDetail>;

    async fn user_profile(&self, username: &str) -> Result<UserProfile>;

    /// Threads whose title or posts contain `query`, ignoring case.
    async fn search(&self, query: &str, page: u32) -> Result<Paginated<Thread>>;

    async fn create_thread(
        &self,
        category_slug: &str,
        author: &str,
        title: &str,
        body: &str,
    ) -> Result<Thread>;

    async fn create_reply(&self, thread_slug: &str, author: &str, body: &str)
        -> Result<(Thread, Post)>;

    async fn edit_post(&self, post_id: u64, body: &str) -> Result<(Thread, Post)>;

    /// Deletes a post. Deleting the opening post deletes the whole thread.
    async fn delete_post(&self, post_id: u64) -> Result<PostRemoval>;

    /// Deletes a thread and its posts, reporting everyone who had posted in it.
    async fn delete_thread(&self, slug: &str) -> Result<RemovedThread>;
}
