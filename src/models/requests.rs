//! Request DTOs for the forum API
//!
//! Defines the structure of incoming request bodies and query strings.

use serde::Deserialize;

const MAX_NAME_LEN: usize = 100;
const MAX_TITLE_LEN: usize = 200;
const MAX_BODY_LEN: usize = 20_000;

fn check_body(body: &str) -> Option<String> {
    if body.trim().is_empty() {
        return Some("Body cannot be empty".to_string());
    }
    if body.len() > MAX_BODY_LEN {
        return Some(format!(
            "Body exceeds maximum length of {MAX_BODY_LEN} characters"
        ));
    }
    None
}

/// Request body for POST /categories
#[derive(Debug, Clone, Deserialize)]
pub struct NewCategoryRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

impl NewCategoryRequest {
    pub fn validate(&self) -> Option<String> {
        if self.name.trim().is_empty() {
            return Some("Name cannot be empty".to_string());
        }
        if self.name.len() > MAX_NAME_LEN {
            return Some(format!(
                "Name exceeds maximum length of {MAX_NAME_LEN} characters"
            ));
        }
        None
    }
}

/// Request body for POST /c/:slug/threads
///
/// `author` is only consulted when the request carries no session.
#[derive(Debug, Clone, Deserialize)]
pub struct NewThreadRequest {
    pub title: String,
    pub body: String,
    #[serde(default)]
    pub author: Option<String>,
}

impl NewThreadRequest {
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.title.trim().is_empty() {
            return Some("Title cannot be empty".to_string());
        }
        if self.title.len() > MAX_TITLE_LEN {
            return Some(format!(
                "Title exceeds maximum length of {MAX_TITLE_LEN} characters"
            ));
        }
        check_body(&self.body)
    }
}

/// Request body for POST /t/:slug/replies
#[derive(Debug, Clone, Deserialize)]
pub struct NewReplyRequest {
    pub body: String,
    #[serde(default)]
    pub author: Option<String>,
}

impl NewReplyRequest {
    pub fn validate(&self) -> Option<String> {
        check_body(&self.body)
    }
}

/// Request body for PUT /posts/:id
#[derive(Debug, Clone, Deserialize)]
pub struct EditPostRequest {
    pub body: String,
}

impl EditPostRequest {
    pub fn validate(&self) -> Option<String> {
        check_body(&self.body)
    }
}

/// `?page=` on paginated listings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageQuery {
    #[serde(default)]
    pub page: Option<u32>,
}

impl PageQuery {
    /// The requested page, defaulting to the first.
    pub fn page(&self) -> u32 {
        self.page.unwrap_or(1).max(1)
    }
}

/// `?q=&page=` on the search page.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: Option<String>,
    #[serde(default)]
    pub page: Option<u32>,
}

impl SearchQuery {
    /// The search text, or `None` when absent or blank.
    pub fn query(&self) -> Option<&str> {
        self.q.as_deref().filter(|q| !q.trim().is_empty())
    }

    pub fn page(&self) -> u32 {
        self.page.unwrap_or(1).max(1)
    }
}
