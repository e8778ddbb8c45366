//! Forum Cache - read-through HTML response cache for a server-rendered forum
//!
//! Caches rendered pages under structured keys with per-namespace TTLs, and
//! drops exactly the stale pages when the forum is written to.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod forum;
pub mod models;
pub mod tasks;

pub use api::{create_router, AppState};
pub use config::Config;
pub use tasks::spawn_sweep_task;
