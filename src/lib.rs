//! Category Cache - A categorized in-memory cache engine
//!
//! Stores values under a (category, key) pair with capacity-bound LRU
//! eviction, lazy TTL expiration and manual deletion, behind a single lock.
//! An optional HTTP surface exposes the engine over JSON.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;

pub use api::AppState;
pub use cache::CacheEngine;
pub use config::Config;
pub use error::{CacheError, Result};
