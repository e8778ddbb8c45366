//! Request and response models for the forum API
//!
//! DTOs for JSON bodies and query strings, plus the rendered page type the
//! response cache stores.

pub mod page;
pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use page::CachedPage;
pub use requests::{
    EditPostRequest, NewCategoryRequest, NewReplyRequest, NewThreadRequest, PageQuery, SearchQuery,
};
pub use responses::{HealthResponse, MutationResponse, StatsResponse};
