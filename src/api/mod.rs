//! API Module
//!
//! HTTP handlers and routing for the forum and its cache administration.
//!
//! # Endpoints
//! - `GET /`, `/c/:slug`, `/t/:slug`, `/u/:username`, `/search` - forum pages
//! - `POST /categories`, `POST /c/:slug/threads`, `POST /t/:slug/replies` - new content
//! - `PUT /posts/:id`, `DELETE /posts/:id`, `DELETE /t/:slug` - edits and removals
//! - `/admin/cache/stats`, `/admin/cache/stats/reset`, `/admin/cache/flush`
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
