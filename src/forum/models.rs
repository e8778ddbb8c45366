//! Forum domain records returned by a [`ForumStore`](super::ForumStore).

use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Category {
    pub id: u64,
    pub slug: String,
    pub name: String,
    pub description: String,
    pub display_order: u32,
}

/// A category with the counts shown on the home page.
#[derive(Debug, Clone, Serialize)]
pub struct CategorySummary {
    pub category: Category,
    pub thread_count: usize,
    pub post_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Thread {
    pub id: u64,
    pub slug: String,
    pub title: String,
    pub category_slug: String,
    pub author: String,
    pub pinned: bool,
    pub created_at: DateTime<Utc>,
    pub last_activity_at: DateTime<Utc>,
}

/// A thread as listed inside its category.
#[derive(Debug, Clone, Serialize)]
pub struct ThreadSummary {
    pub thread: Thread,
    pub reply_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Post {
    pub id: u64,
    pub thread_id: u64,
    pub author: String,
    pub body: String,
    /// The opening post; deleting it deletes the thread
    pub is_first: bool,
    pub created_at: DateTime<Utc>,
    pub edited_at: Option<DateTime<Utc>>,
}

/// A thread with all of its posts in creation order.
#[derive(Debug, Clone, Serialize)]
pub struct ThreadDetail {
    pub thread: Thread,
    pub category: Category,
    pub posts: Vec<Post>,
}

#[derive(Debug, Clone, Serialize)]
pub struct UserProfile {
    pub username: String,
    pub joined_at: DateTime<Utc>,
    pub thread_count: usize,
    pub post_count: usize,
    pub recent_threads: Vec<Thread>,
}

/// One page of a longer listing. Pages are 1-based.
#[derive(Debug, Clone, Serialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub page: u32,
    pub total_pages: u32,
    pub total_items: usize,
}

impl<T> Paginated<T> {
    /// Slices `all` to `page` of size `page_size`. Page 0 is treated as 1.
    pub fn from_vec(all: Vec<T>, page: u32, page_size: usize) -> Self {
        let page_size = page_size.max(1);
        let page = page.max(1);
        let total_items = all.len();
        let total_pages = total_items.div_ceil(page_size).max(1) as u32;
        let items = all
            .into_iter()
            .skip((page as usize - 1) * page_size)
            .take(page_size)
            .collect();

        Self {
            items,
            page,
            total_pages,
            total_items,
        }
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

/// A thread deleted together with all of its posts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemovedThread {
    pub thread: Thread,
    /// Distinct authors of the removed posts, sorted
    pub authors: Vec<String>,
}

/// Outcome of deleting a post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostRemoval {
    /// A reply was removed; the thread remains
    Reply { thread: Thread, author: String },
    /// The opening post was removed, taking the thread with it
    Thread(RemovedThread),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paginates() {
        let page = Paginated::from_vec((1..=45).collect::<Vec<_>>(), 2, 20);
        assert_eq!(page.items.first(), Some(&21));
        assert_eq!(page.items.len(), 20);
        assert_eq!(page.total_pages, 3);
        assert!(page.has_previous());
        assert!(page.has_next());
    }

    #[test]
    fn empty_listing_has_one_page() {
        let page: Paginated<u8> = Paginated::from_vec(Vec::new(), 1, 20);
        assert_eq!(page.total_pages, 1);
        assert!(!page.has_next());
    }

    #[test]
    fn page_zero_is_first_page() {
        let page = Paginated::from_vec(vec![1, 2, 3], 0, 2);
        assert_eq!(page.page, 1);
        assert_eq!(page.items, vec![1, 2]);
    }

    #[test]
    fn page_past_end_is_empty() {
        let page = Paginated::from_vec(vec![1, 2, 3], 9, 2);
        assert!(page.items.is_empty());
        assert_eq!(page.total_pages, 2);
    }
}
