//! Response DTOs for the cache HTTP API

use serde::Serialize;
use serde_json::Value;

use crate::cache::CacheStats;

/// Response body for `GET /cache/:category/:key`
#[derive(Debug, Clone, Serialize)]
pub struct GetResponse {
    pub category: String,
    pub key: String,
    /// The stored value
    pub value: Value,
}

impl GetResponse {
    pub fn new(category: impl Into<String>, key: impl Into<String>, value: Value) -> Self {
        Self {
            category: category.into(),
            key: key.into(),
            value,
        }
    }
}

/// Response body for `PUT /cache/:category/:key`
#[derive(Debug, Clone, Serialize)]
pub struct SetResponse {
    /// Success message
    pub message: String,
    pub category: String,
    pub key: String,
}

impl SetResponse {
    pub fn new(category: impl Into<String>, key: impl Into<String>) -> Self {
        let category = category.into();
        let key = key.into();
        Self {
            message: format!("Key '{}/{}' set successfully", category, key),
            category,
            key,
        }
    }
}

/// Response body for `DELETE /cache/:category/:key`
///
/// Deleting an absent key succeeds with `removed: false`.
#[derive(Debug, Clone, Serialize)]
pub struct DeleteResponse {
    pub message: String,
    pub category: String,
    pub key: String,
    /// Whether an entry was actually removed
    pub removed: bool,
}

impl DeleteResponse {
    pub fn new(category: impl Into<String>, key: impl Into<String>, removed: bool) -> Self {
        let category = category.into();
        let key = key.into();
        let message = if removed {
            format!("Key '{}/{}' deleted successfully", category, key)
        } else {
            format!("Key '{}/{}' was not present", category, key)
        };
        Self {
            message,
            category,
            key,
            removed,
        }
    }
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    pub hits: u64,
    pub misses: u64,
    /// Entries purged by an expired read
    pub expirations: u64,
    /// Entries dropped by LRU eviction
    pub evictions: u64,
    pub total_entries: usize,
    /// hits / (hits + misses)
    pub hit_rate: f64,
    pub capacity: Option<usize>,
    pub ttl_secs: Option<u64>,
}

impl StatsResponse {
    pub fn new(stats: &CacheStats, capacity: Option<usize>, ttl_secs: Option<u64>) -> Self {
        Self {
            hits: stats.hits,
            misses: stats.misses,
            expirations: stats.expirations,
            evictions: stats.evictions,
            total_entries: stats.total_entries,
            hit_rate: stats.hit_rate(),
            capacity,
            ttl_secs,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
