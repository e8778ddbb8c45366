//! Rendered page
//!
//! The value the response cache stores: a fully rendered HTTP body with its
//! status and content type.

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};

use crate::cache::Cacheable;

const HTML: &str = "text/html; charset=utf-8";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedPage {
    pub status: u16,
    pub content_type: String,
    pub body: String,
}

impl CachedPage {
    /// A successful HTML page.
    pub fn html(body: impl Into<String>) -> Self {
        Self {
            status: StatusCode::OK.as_u16(),
            content_type: HTML.to_string(),
            body: body.into(),
        }
    }

    /// An HTML "not found" page.
    pub fn not_found(body: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND.as_u16(),
            content_type: HTML.to_string(),
            body: body.into(),
        }
    }
}

impl Cacheable for CachedPage {
    /// Only successful HTML pages are stored.
    fn is_cacheable(&self) -> bool {
        self.status == StatusCode::OK.as_u16() && self.content_type.contains("text/html")
    }
}

impl IntoResponse for CachedPage {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, [(header::CONTENT_TYPE, self.content_type)], self.body).into_response()
    }
}
