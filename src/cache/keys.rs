//! Cache key definitions.
//!
//! Every cacheable forum view maps to one [`ForumKey`]; its `Display` form is
//! the string stored in the [`TtlStore`](crate::cache::TtlStore).

use std::fmt;

use crate::cache::KeyPattern;

/// TTL class of a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Namespace {
    Categories,
    CategoryThreads,
    Thread,
    UserProfile,
    SearchResults,
}

/// A cacheable forum view.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ForumKey {
    /// Home page category list
    Categories,
    /// One page of a category's thread listing
    CategoryThreads { category: String, page: u32 },
    /// A thread with its posts
    Thread { slug: String },
    /// A user's public profile
    UserProfile { username: String },
    /// One page of search results for the raw query text
    SearchResults { query: String, page: u32 },
}

impl ForumKey {
    pub fn namespace(&self) -> Namespace {
        match self {
            Self::Categories => Namespace::Categories,
            Self::CategoryThreads { .. } => Namespace::CategoryThreads,
            Self::Thread { .. } => Namespace::Thread,
            Self::UserProfile { .. } => Namespace::UserProfile,
            Self::SearchResults { .. } => Namespace::SearchResults,
        }
    }
}

impl fmt::Display for ForumKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Categories => f.write_str("categories:all"),
            Self::CategoryThreads { category, page } => {
                write!(f, "category:{category}:threads:page:{page}")
            }
            Self::Thread { slug } => write!(f, "thread:{slug}"),
            Self::UserProfile { username } => write!(f, "user:{username}:profile"),
            Self::SearchResults { query, page } => write!(f, "search:{query}:page:{page}"),
        }
    }
}

// == Key Builders ==

pub fn categories_key() -> ForumKey {
    ForumKey::Categories
}

pub fn category_threads_key(category: &str, page: u32) -> ForumKey {
    ForumKey::CategoryThreads {
        category: category.to_string(),
        page,
    }
}

pub fn thread_key(slug: &str) -> ForumKey {
    ForumKey::Thread {
        slug: slug.to_string(),
    }
}

pub fn user_profile_key(username: &str) -> ForumKey {
    ForumKey::UserProfile {
        username: username.to_string(),
    }
}

/// The query is used verbatim: `"Foo"` and `"foo"` are distinct entries.
pub fn search_results_key(query: &str, page: u32) -> ForumKey {
    ForumKey::SearchResults {
        query: query.to_string(),
        page,
    }
}

// == Patterns ==
// Bulk invalidation only; never used for lookups.

/// Every paginated thread listing of one category.
///
/// A prefix, so a `*` inside the slug stays literal.
pub fn category_threads_pattern(category: &str) -> KeyPattern {
    KeyPattern::prefix(format!("category:{category}:threads:"))
}

/// Every cached search results page.
pub fn search_pattern() -> KeyPattern {
    KeyPattern::glob("search:*")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_shapes() {
        assert_eq!(categories_key().to_string(), "categories:all");
        assert_eq!(
            category_threads_key("general", 1).to_string(),
            "category:general:threads:page:1"
        );
        assert_eq!(thread_key("hello-world").to_string(), "thread:hello-world");
        assert_eq!(user_profile_key("alice").to_string(), "user:alice:profile");
        assert_eq!(
            search_results_key("rust async", 3).to_string(),
            "search:rust async:page:3"
        );
    }

    #[test]
    fn search_keys_are_not_normalized() {
        assert_ne!(
            search_results_key("Foo", 1).to_string(),
            search_results_key("foo", 1).to_string()
        );
    }

    #[test]
    fn namespaces() {
        assert_eq!(categories_key().namespace(), Namespace::Categories);
        assert_eq!(
            category_threads_key("x", 2).namespace(),
            Namespace::CategoryThreads
        );
        assert_eq!(thread_key("x").namespace(), Namespace::Thread);
        assert_eq!(user_profile_key("x").namespace(), Namespace::UserProfile);
        assert_eq!(
            search_results_key("x", 1).namespace(),
            Namespace::SearchResults
        );
    }

    #[test]
    fn category_pattern_covers_every_page_of_that_category_only() {
        let matcher = category_threads_pattern("general").compile().unwrap();

        assert!(matcher.matches(&category_threads_key("general", 1).to_string()));
        assert!(matcher.matches(&category_threads_key("general", 42).to_string()));
        assert!(!matcher.matches(&category_threads_key("off-topic", 1).to_string()));
        assert!(!matcher.matches(&thread_key("general").to_string()));
    }

    #[test]
    fn category_pattern_treats_star_in_slug_literally() {
        let matcher = category_threads_pattern("a*").compile().unwrap();

        assert!(matcher.matches(&category_threads_key("a*", 1).to_string()));
        assert!(!matcher.matches(&category_threads_key("ab", 1).to_string()));
        assert!(!matcher.matches(&category_threads_key("a", 1).to_string()));
    }

    #[test]
    fn search_pattern_covers_all_queries() {
        let matcher = search_pattern().compile().unwrap();

        assert!(matcher.matches(&search_results_key("a", 1).to_string()));
        assert!(matcher.matches(&search_results_key("", 9).to_string()));
        assert!(!matcher.matches(&categories_key().to_string()));
    }
}
