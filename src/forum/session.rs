//! Session lookup.
//!
//! A request carrying a non-empty `session` cookie belongs to a logged-in
//! user and is served live.

use axum_extra::extract::cookie::CookieJar;

use crate::cache::RequestContext;

/// Name of the cookie holding the signed-in username.
pub const SESSION_COOKIE: &str = "session";

/// Builds the cache context for a request from its cookies.
pub fn request_context(jar: &CookieJar) -> RequestContext {
    match jar.get(SESSION_COOKIE).map(|c| c.value().trim()) {
        Some(username) if !username.is_empty() => RequestContext::authenticated(username),
        _ => RequestContext::anonymous(),
    }
}
