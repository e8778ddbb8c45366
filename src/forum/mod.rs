//! Forum Module
//!
//! The host application whose rendered pages are cached: domain records,
//! the durable store interface, session handling and HTML views.

mod memory;
pub mod models;
mod session;
mod store;
pub mod views;

pub use memory::InMemoryForum;
pub use models::{
    Category, CategorySummary, Paginated, Post, PostRemoval, RemovedThread, Thread, ThreadDetail,
    ThreadSummary, UserProfile,
};
pub use session::{request_context, SESSION_COOKIE};
pub use store::ForumStore;
