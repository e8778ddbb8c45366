//! API Routes
//!
//! Configures the Axum router with forum pages, forum writes and cache
//! administration.

use axum::{
    http::{header, HeaderValue},
    routing::{get, post, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    set_header::SetResponseHeaderLayer,
    trace::TraceLayer,
};

use super::handlers::{
    category_handler, create_category_handler, create_reply_handler, create_thread_handler,
    delete_post_handler, delete_thread_handler, edit_post_handler, flush_handler, health_handler,
    home_handler, profile_handler, reset_stats_handler, search_handler, stats_handler,
    thread_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /`, `GET /c/:slug`, `GET /t/:slug`, `GET /u/:username`,
///   `GET /search` - cached HTML pages
/// - `POST /categories`, `POST /c/:slug/threads`, `POST /t/:slug/replies`,
///   `PUT /posts/:id`, `DELETE /posts/:id`, `DELETE /t/:slug` - writes that invalidate
/// - `/admin/cache/*` - statistics, reset and flush, never cached downstream
/// - `GET /health` - Health check endpoint
pub fn create_router(state: AppState) -> Router {
    // Configure CORS middleware
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let admin = Router::new()
        .route("/stats", get(stats_handler))
        .route("/stats/reset", post(reset_stats_handler))
        .route("/flush", post(flush_handler))
        .layer(SetResponseHeaderLayer::overriding(
            header::CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ));

    Router::new()
        .route("/", get(home_handler))
        .route("/categories", post(create_category_handler))
        .route("/c/:slug", get(category_handler))
        .route("/c/:slug/threads", post(create_thread_handler))
        .route("/t/:slug", get(thread_handler).delete(delete_thread_handler))
        .route("/t/:slug/replies", post(create_reply_handler))
        .route("/u/:username", get(profile_handler))
        .route("/search", get(search_handler))
        .route("/posts/:id", put(edit_post_handler).delete(delete_post_handler))
        .nest("/admin/cache", admin)
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
