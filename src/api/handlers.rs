//! API Handlers
//!
//! HTTP request handlers for forum pages, forum writes and cache
//! administration.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use axum_extra::extract::cookie::CookieJar;
use tracing::info;

use crate::cache::keys::{
    categories_key, category_threads_key, search_results_key, thread_key, user_profile_key,
};
use crate::cache::{CacheService, ForumMutation, RequestContext};
use crate::config::Config;
use crate::error::{AppError, Result};
use crate::forum::views::{
    render_category, render_home, render_not_found, render_profile, render_search, render_thread,
};
use crate::forum::{request_context, ForumStore, InMemoryForum, PostRemoval, RemovedThread};
use crate::models::{
    CachedPage, EditPostRequest, HealthResponse, MutationResponse, NewCategoryRequest,
    NewReplyRequest, NewThreadRequest, PageQuery, SearchQuery, StatsResponse,
};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Rendered page cache
    pub cache: Arc<CacheService<CachedPage>>,
    /// Durable forum records
    pub forum: Arc<dyn ForumStore>,
}

impl AppState {
    pub fn new(cache: CacheService<CachedPage>, forum: impl ForumStore + 'static) -> Self {
        Self {
            cache: Arc::new(cache),
            forum: Arc::new(forum),
        }
    }

    /// Creates a new AppState from configuration, backed by a seeded
    /// in-memory forum.
    pub async fn from_config(config: &Config) -> Result<Self> {
        let forum = InMemoryForum::seeded(config.page_size).await?;
        Ok(Self::new(CacheService::new(config.cache.clone()), forum))
    }
}

/// Turns a missing record into a rendered, uncacheable 404 page.
fn or_not_found(result: Result<CachedPage>) -> Result<CachedPage> {
    match result {
        Err(AppError::NotFound(what)) => render_not_found(&what),
        other => other,
    }
}

/// Picks the author of a write: the session user, else the one named in
/// the request body.
fn resolve_author(ctx: &RequestContext, named: Option<String>) -> Result<String> {
    ctx.username()
        .map(str::to_string)
        .or(named.filter(|name| !name.trim().is_empty()))
        .ok_or_else(|| AppError::InvalidRequest("An author or session is required".to_string()))
}

/// Mutations for a deleted thread: its own views plus the profile of
/// everyone who had posted in it.
fn thread_removed(removed: &RemovedThread) -> Vec<ForumMutation> {
    let mut mutations = vec![ForumMutation::ThreadDeleted {
        thread: removed.thread.slug.clone(),
        category: removed.thread.category_slug.clone(),
    }];
    mutations.extend(
        removed
            .authors
            .iter()
            .map(|username| ForumMutation::ProfileChanged {
                username: username.clone(),
            }),
    );
    mutations
}

async fn apply_all(cache: &CacheService<CachedPage>, mutations: &[ForumMutation]) {
    for mutation in mutations {
        cache.apply_mutation(mutation).await;
    }
}

// == Pages ==

/// Handler for GET /
pub async fn home_handler(State(state): State<AppState>, jar: CookieJar) -> Result<CachedPage> {
    let forum = &state.forum;
    state
        .cache
        .cache_read(&request_context(&jar), &categories_key(), || async {
            render_home(&forum.categories().await?)
        })
        .await
}

/// Handler for GET /c/:slug?page=
pub async fn category_handler(
    State(state): State<AppState>,
    jar: CookieJar,
    Path(slug): Path<String>,
    Query(query): Query<PageQuery>,
) -> Result<CachedPage> {
    let page = query.page();
    let forum = &state.forum;
    state
        .cache
        .cache_read(
            &request_context(&jar),
            &category_threads_key(&slug, page),
            || async {
                or_not_found(async {
                    let (category, threads) = forum.category_threads(&slug, page).await?;
                    render_category(&category, &threads)
                }
                .await)
            },
        )
        .await
}

/// Handler for GET /t/:slug
pub async fn thread_handler(
    State(state): State<AppState>,
    jar: CookieJar,
    Path(slug): Path<String>,
) -> Result<CachedPage> {
    let forum = &state.forum;
    state
        .cache
        .cache_read(&request_context(&jar), &thread_key(&slug), || async {
            or_not_found(async { render_thread(&forum.thread(&slug).await?) }.await)
        })
        .await
}

/// Handler for GET /u/:username
pub async fn profile_handler(
    State(state): State<AppState>,
    jar: CookieJar,
    Path(username): Path<String>,
) -> Result<CachedPage> {
    let forum = &state.forum;
    state
        .cache
        .cache_read(&request_context(&jar), &user_profile_key(&username), || async {
            or_not_found(async { render_profile(&forum.user_profile(&username).await?) }.await)
        })
        .await
}

/// Handler for GET /search?q=&page=
///
/// Without a query the bare search form is rendered and nothing is cached.
pub async fn search_handler(
    State(state): State<AppState>,
    jar: CookieJar,
    Query(query): Query<SearchQuery>,
) -> Result<CachedPage> {
    let Some(text) = query.query() else {
        return render_search("", None);
    };
    let page = query.page();
    let forum = &state.forum;
    state
        .cache
        .cache_read(
            &request_context(&jar),
            &search_results_key(text, page),
            || async {
                let results = forum.search(text, page).await?;
                render_search(text, Some(&results))
            },
        )
        .await
}

// == Writes ==

/// Handler for POST /categories
pub async fn create_category_handler(
    State(state): State<AppState>,
    Json(req): Json<NewCategoryRequest>,
) -> Result<(StatusCode, Json<MutationResponse>)> {
    if let Some(error_msg) = req.validate() {
        return Err(AppError::InvalidRequest(error_msg));
    }

    let category = state
        .forum
        .create_category(req.name.trim(), &req.description)
        .await?;

    state
        .cache
        .apply_mutation(&ForumMutation::CategoryChanged {
            category: category.slug.clone(),
        })
        .await;

    info!(category = %category.slug, "category created");
    Ok((
        StatusCode::CREATED,
        Json(MutationResponse::new("Category created").with_category(category.slug)),
    ))
}

/// Handler for POST /c/:slug/threads
pub async fn create_thread_handler(
    State(state): State<AppState>,
    jar: CookieJar,
    Path(category): Path<String>,
    Json(req): Json<NewThreadRequest>,
) -> Result<(StatusCode, Json<MutationResponse>)> {
    if let Some(error_msg) = req.validate() {
        return Err(AppError::InvalidRequest(error_msg));
    }
    let author = resolve_author(&request_context(&jar), req.author)?;

    let thread = state
        .forum
        .create_thread(&category, &author, &req.title, &req.body)
        .await?;

    state
        .cache
        .apply_mutation(&ForumMutation::ThreadCreated {
            category: thread.category_slug.clone(),
        })
        .await;
    state
        .cache
        .apply_mutation(&ForumMutation::ProfileChanged { username: author })
        .await;

    info!(thread = %thread.slug, category = %thread.category_slug, "thread created");
    Ok((
        StatusCode::CREATED,
        Json(MutationResponse::new("Thread created").with_thread(thread.slug)),
    ))
}

/// Handler for POST /t/:slug/replies
pub async fn create_reply_handler(
    State(state): State<AppState>,
    jar: CookieJar,
    Path(slug): Path<String>,
    Json(req): Json<NewReplyRequest>,
) -> Result<(StatusCode, Json<MutationResponse>)> {
    if let Some(error_msg) = req.validate() {
        return Err(AppError::InvalidRequest(error_msg));
    }
    let author = resolve_author(&request_context(&jar), req.author)?;

    let (thread, post) = state.forum.create_reply(&slug, &author, &req.body).await?;

    state
        .cache
        .apply_mutation(&ForumMutation::ReplyCreated {
            thread: thread.slug.clone(),
            category: thread.category_slug.clone(),
        })
        .await;
    state
        .cache
        .apply_mutation(&ForumMutation::ProfileChanged { username: author })
        .await;

    Ok((
        StatusCode::CREATED,
        Json(
            MutationResponse::new("Reply created")
                .with_thread(thread.slug)
                .with_post(post.id),
        ),
    ))
}

/// Handler for PUT /posts/:id
pub async fn edit_post_handler(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Json(req): Json<EditPostRequest>,
) -> Result<Json<MutationResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(AppError::InvalidRequest(error_msg));
    }

    let (thread, post) = state.forum.edit_post(id, &req.body).await?;

    state
        .cache
        .apply_mutation(&ForumMutation::PostEdited {
            thread: thread.slug.clone(),
        })
        .await;

    Ok(Json(
        MutationResponse::new("Post updated")
            .with_thread(thread.slug)
            .with_post(post.id),
    ))
}

/// Handler for DELETE /posts/:id
///
/// Deleting a thread's opening post removes the thread.
pub async fn delete_post_handler(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<MutationResponse>> {
    let (mutations, response) = match state.forum.delete_post(id).await? {
        PostRemoval::Reply { thread, author } => (
            vec![
                ForumMutation::PostDeleted {
                    thread: thread.slug.clone(),
                    category: thread.category_slug,
                },
                ForumMutation::ProfileChanged { username: author },
            ],
            MutationResponse::new("Post deleted").with_thread(thread.slug),
        ),
        PostRemoval::Thread(removed) => (
            thread_removed(&removed),
            MutationResponse::new("Thread deleted").with_thread(removed.thread.slug),
        ),
    };

    apply_all(&state.cache, &mutations).await;
    Ok(Json(response.with_post(id)))
}

/// Handler for DELETE /t/:slug
pub async fn delete_thread_handler(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<MutationResponse>> {
    let removed = state.forum.delete_thread(&slug).await?;

    apply_all(&state.cache, &thread_removed(&removed)).await;

    info!(thread = %removed.thread.slug, authors = removed.authors.len(), "thread deleted");
    Ok(Json(
        MutationResponse::new("Thread deleted").with_thread(removed.thread.slug),
    ))
}

// == Cache Administration ==

/// Handler for GET /admin/cache/stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(state.cache.statistics().await.into())
}

/// Handler for POST /admin/cache/stats/reset
pub async fn reset_stats_handler(State(state): State<AppState>) -> Json<MutationResponse> {
    state.cache.reset_statistics().await;
    info!("cache statistics reset");
    Json(MutationResponse::new("Cache statistics reset"))
}

/// Handler for POST /admin/cache/flush
pub async fn flush_handler(State(state): State<AppState>) -> Json<MutationResponse> {
    state.cache.flush_all().await;
    info!("cache flushed");
    Json(MutationResponse::new("Cache flushed"))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

#[cfg(test)]
mod tests {
    use axum_extra::extract::cookie::Cookie;

    use super::*;
    use crate::cache::Cacheable;
    use crate::config::CacheSettings;
    use crate::forum::SESSION_COOKIE;

    async fn state() -> AppState {
        let forum = InMemoryForum::new(20);
        forum.add_category("general", "General", "Chat").await;
        forum
            .create_thread("general", "alice", "Hello", "First post")
            .await
            .unwrap();
        AppState::new(CacheService::new(CacheSettings::default()), forum)
    }

    fn session(user: &'static str) -> CookieJar {
        CookieJar::new().add(Cookie::new(SESSION_COOKIE, user))
    }

    #[tokio::test]
    async fn test_home_is_cached_for_anonymous() {
        let state = state().await;

        let first = home_handler(State(state.clone()), CookieJar::new()).await.unwrap();
        let second = home_handler(State(state.clone()), CookieJar::new()).await.unwrap();

        assert_eq!(first, second);
        let stats = state.cache.statistics().await;
        assert_eq!((stats.hits, stats.misses, stats.sets), (1, 1, 1));
    }

    #[tokio::test]
    async fn test_session_bypasses_cache() {
        let state = state().await;

        thread_handler(State(state.clone()), session("bob"), Path("hello".into()))
            .await
            .unwrap();

        let stats = state.cache.statistics().await;
        assert_eq!((stats.hits, stats.misses, stats.sets), (0, 0, 0));
    }

    #[tokio::test]
    async fn test_missing_thread_renders_uncached_404() {
        let state = state().await;

        let page = thread_handler(State(state.clone()), CookieJar::new(), Path("nope".into()))
            .await
            .unwrap();

        assert_eq!(page.status, 404);
        assert!(!page.is_cacheable());
        assert_eq!(state.cache.statistics().await.key_count, 0);
    }

    #[tokio::test]
    async fn test_blank_search_renders_form_without_caching() {
        let state = state().await;

        let page = search_handler(State(state.clone()), CookieJar::new(), Query(SearchQuery::default()))
            .await
            .unwrap();

        assert_eq!(page.status, 200);
        assert_eq!(state.cache.statistics().await.misses, 0);
    }

    #[tokio::test]
    async fn test_reply_purges_thread_page() {
        let state = state().await;
        thread_handler(State(state.clone()), CookieJar::new(), Path("hello".into()))
            .await
            .unwrap();
        assert!(state.cache.contains("thread:hello").await);

        let req = NewReplyRequest {
            body: "Welcome!".into(),
            author: None,
        };
        let (status, _) = create_reply_handler(
            State(state.clone()),
            session("bob"),
            Path("hello".into()),
            Json(req),
        )
        .await
        .unwrap();

        assert_eq!(status, StatusCode::CREATED);
        assert!(!state.cache.contains("thread:hello").await);
    }

    #[tokio::test]
    async fn test_new_category_refreshes_home() {
        let state = state().await;
        home_handler(State(state.clone()), CookieJar::new()).await.unwrap();
        assert!(state.cache.contains("categories:all").await);

        let req = NewCategoryRequest {
            name: "Events".into(),
            description: "Meetups".into(),
        };
        let (status, response) = create_category_handler(State(state.clone()), Json(req))
            .await
            .unwrap();

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(response.category.as_deref(), Some("events"));
        assert!(!state.cache.contains("categories:all").await);

        let page = home_handler(State(state), CookieJar::new()).await.unwrap();
        assert!(page.body.contains("/c/events"));
    }

    #[tokio::test]
    async fn test_write_without_author_is_rejected() {
        let state = state().await;
        let req = NewThreadRequest {
            title: "Anon".into(),
            body: "text".into(),
            author: None,
        };

        let result = create_thread_handler(
            State(state),
            CookieJar::new(),
            Path("general".into()),
            Json(req),
        )
        .await;

        assert!(matches!(result, Err(AppError::InvalidRequest(_))));
    }

    #[tokio::test]
    async fn test_flush_keeps_statistics() {
        let state = state().await;
        home_handler(State(state.clone()), CookieJar::new()).await.unwrap();

        flush_handler(State(state.clone())).await;

        let stats = stats_handler(State(state)).await;
        assert_eq!(stats.key_count, 0);
        assert_eq!(stats.sets, 1);
    }

    #[tokio::test]
    async fn test_health_handler() {
        let response = health_handler().await;
        assert_eq!(response.status, "healthy");
    }
}
