//! HTML views.
//!
//! Each render function turns forum records into a [`CachedPage`] ready to be
//! stored by the response cache.

use askama::Template;

use super::models::{
    Category, CategorySummary, Paginated, Thread, ThreadDetail, ThreadSummary, UserProfile,
};
use crate::error::Result;
use crate::models::CachedPage;

/// Previous/next links for a paginated listing.
#[derive(Debug, Clone)]
pub struct Pager {
    pub page: u32,
    pub total_pages: u32,
    pub previous: Option<String>,
    pub next: Option<String>,
}

impl Pager {
    fn new<T>(listing: &Paginated<T>, href: impl Fn(u32) -> String) -> Self {
        Self {
            page: listing.page,
            total_pages: listing.total_pages,
            previous: listing.has_previous().then(|| href(listing.page - 1)),
            next: listing.has_next().then(|| href(listing.page + 1)),
        }
    }
}

#[derive(Template)]
#[template(path = "home.html")]
struct HomeTemplate<'a> {
    categories: &'a [CategorySummary],
}

#[derive(Template)]
#[template(path = "category.html")]
struct CategoryTemplate<'a> {
    category: &'a Category,
    threads: &'a [ThreadSummary],
    pager: Pager,
}

#[derive(Template)]
#[template(path = "thread.html")]
struct ThreadTemplate<'a> {
    detail: &'a ThreadDetail,
}

#[derive(Template)]
#[template(path = "profile.html")]
struct ProfileTemplate<'a> {
    profile: &'a UserProfile,
}

#[derive(Template)]
#[template(path = "search.html")]
struct SearchTemplate<'a> {
    query: &'a str,
    results: Option<&'a [Thread]>,
    total: usize,
    pager: Option<Pager>,
}

#[derive(Template)]
#[template(path = "not_found.html")]
struct NotFoundTemplate<'a> {
    what: &'a str,
}

pub fn render_home(categories: &[CategorySummary]) -> Result<CachedPage> {
    let body = HomeTemplate { categories }.render()?;
    Ok(CachedPage::html(body))
}

pub fn render_category(
    category: &Category,
    threads: &Paginated<ThreadSummary>,
) -> Result<CachedPage> {
    let pager = Pager::new(threads, |page| format!("/c/{}?page={page}", category.slug));
    let body = CategoryTemplate {
        category,
        threads: &threads.items,
        pager,
    }
    .render()?;
    Ok(CachedPage::html(body))
}

pub fn render_thread(detail: &ThreadDetail) -> Result<CachedPage> {
    let body = ThreadTemplate { detail }.render()?;
    Ok(CachedPage::html(body))
}

pub fn render_profile(profile: &UserProfile) -> Result<CachedPage> {
    let body = ProfileTemplate { profile }.render()?;
    Ok(CachedPage::html(body))
}

/// Renders the search page. `results` is `None` when no query was given.
pub fn render_search(query: &str, results: Option<&Paginated<Thread>>) -> Result<CachedPage> {
    let encoded = urlencoding::encode(query);
    let pager = results.map(|r| Pager::new(r, |page| format!("/search?q={encoded}&page={page}")));
    let body = SearchTemplate {
        query,
        results: results.map(|r| r.items.as_slice()),
        total: results.map_or(0, |r| r.total_items),
        pager,
    }
    .render()?;
    Ok(CachedPage::html(body))
}

/// Renders a 404 page. The result is never cached.
pub fn render_not_found(what: &str) -> Result<CachedPage> {
    let body = NotFoundTemplate { what }.render()?;
    Ok(CachedPage::not_found(body))
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::cache::Cacheable;
    use crate::forum::Post;

    fn category() -> Category {
        Category {
            id: 1,
            slug: "general".into(),
            name: "General".into(),
            description: "Chat".into(),
            display_order: 0,
        }
    }

    fn thread(slug: &str, title: &str) -> Thread {
        Thread {
            id: 2,
            slug: slug.into(),
            title: title.into(),
            category_slug: "general".into(),
            author: "alice".into(),
            pinned: false,
            created_at: Utc::now(),
            last_activity_at: Utc::now(),
        }
    }

    #[test]
    fn test_home_lists_categories() {
        let page = render_home(&[CategorySummary {
            category: category(),
            thread_count: 3,
            post_count: 7,
        }])
        .unwrap();

        assert!(page.is_cacheable());
        assert!(page.body.contains("href=\"/c/general\""));
        assert!(page.body.contains("General"));
    }

    #[test]
    fn test_category_pagination_links() {
        let threads: Vec<ThreadSummary> = (0..3)
            .map(|i| ThreadSummary {
                thread: thread(&format!("t{i}"), "Title"),
                reply_count: 0,
            })
            .collect();
        let listing = Paginated::from_vec(threads, 2, 1);

        let page = render_category(&category(), &listing).unwrap();

        assert!(page.body.contains("/c/general?page=1"));
        assert!(page.body.contains("/c/general?page=3"));
    }

    #[test]
    fn test_thread_escapes_post_body() {
        let detail = ThreadDetail {
            thread: thread("hello", "Hello"),
            category: category(),
            posts: vec![Post {
                id: 3,
                thread_id: 2,
                author: "alice".into(),
                body: "<script>alert(1)</script>".into(),
                is_first: true,
                created_at: Utc::now(),
                edited_at: None,
            }],
        };

        let page = render_thread(&detail).unwrap();
        assert!(!page.body.contains("<script>"));
    }

    #[test]
    fn test_search_encodes_query_in_links() {
        let results = Paginated::from_vec(vec![thread("a", "A"), thread("b", "B")], 1, 1);
        let page = render_search("rust & go", Some(&results)).unwrap();

        assert!(page.body.contains("/search?q=rust%20%26%20go&amp;page=2")
            || page.body.contains("/search?q=rust%20%26%20go&#38;page=2"));
    }

    #[test]
    fn test_search_without_query() {
        let page = render_search("", None).unwrap();
        assert!(page.is_cacheable());
        assert!(page.body.contains("<form"));
    }

    #[test]
    fn test_not_found_is_not_cacheable() {
        let page = render_not_found("thread 'nope'").unwrap();
        assert_eq!(page.status, 404);
        assert!(!page.is_cacheable());
    }
}
