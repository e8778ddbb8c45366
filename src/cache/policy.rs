//! Invalidation policy.
//!
//! Maps each forum write to the cached views it makes stale.

use crate::cache::keys::{
    categories_key, category_threads_pattern, search_pattern, thread_key, user_profile_key,
};
use crate::cache::InvalidationRequest;

/// A committed write against the forum's durable store.
///
/// Categories are identified by the same slug used to build their listing
/// keys, so a purge always reaches the pages it targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ForumMutation {
    ThreadCreated { category: String },
    ReplyCreated { thread: String, category: String },
    /// Any post edit, including the opening post. Counts and activity
    /// ordering are unchanged, so listings stay valid.
    PostEdited { thread: String },
    /// Deletion of a reply. Deleting the opening post deletes the thread.
    PostDeleted { thread: String, category: String },
    ThreadDeleted { thread: String, category: String },
    /// A category was created, renamed or removed.
    CategoryChanged { category: String },
    ProfileChanged { username: String },
}

impl ForumMutation {
    /// Returns the invalidations for this mutation, in issue order.
    pub fn invalidations(&self) -> Vec<InvalidationRequest> {
        let thread = |slug: &str| InvalidationRequest::Key(thread_key(slug).to_string());
        let listings = |category: &str| InvalidationRequest::from(category_threads_pattern(category));
        let categories = || InvalidationRequest::Key(categories_key().to_string());
        let search = || InvalidationRequest::from(search_pattern());

        match self {
            Self::ThreadCreated { category } => vec![listings(category), categories(), search()],
            Self::ReplyCreated { thread: slug, category }
            | Self::PostDeleted { thread: slug, category }
            | Self::ThreadDeleted { thread: slug, category } => {
                vec![thread(slug), listings(category), search()]
            }
            Self::PostEdited { thread: slug } => vec![thread(slug), search()],
            Self::CategoryChanged { category } => vec![listings(category), categories()],
            Self::ProfileChanged { username } => vec![InvalidationRequest::Key(
                user_profile_key(username).to_string(),
            )],
        }
    }
}
