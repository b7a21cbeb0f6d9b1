//! Configuration Module
//!
//! Loads engine policies and server settings from environment variables.

use std::env;
use std::time::Duration;

/// Engine and server configuration.
///
/// `capacity` and `ttl_secs` are each optional; leaving both unset yields a
/// plain unbounded map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Maximum number of live entries (LRU eviction beyond it)
    pub capacity: Option<usize>,
    /// Entry time-to-live in seconds
    pub ttl_secs: Option<u64>,
    /// HTTP server port
    pub server_port: u16,
}

impl Config {
    /// Creates a new Config from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_CAPACITY` - Maximum live entries (default: unset, no eviction)
    /// - `CACHE_TTL_SECS` - Entry TTL in seconds (default: unset, no expiration)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    pub fn from_env() -> Self {
        Self {
            capacity: parse_var("CACHE_CAPACITY"),
            ttl_secs: parse_var("CACHE_TTL_SECS"),
            server_port: parse_var("SERVER_PORT").unwrap_or(3000),
        }
    }

    pub fn ttl(&self) -> Option<Duration> {
        self.ttl_secs.map(Duration::from_secs)
    }

    /// True if at least one invalidation policy is configured.
    pub fn has_policy(&self) -> bool {
        self.capacity.is_some() || self.ttl_secs.is_some()
    }
}

fn parse_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.trim().parse().ok())
}

impl Default for Config {
    fn default() -> Self {
        Self {
            capacity: Some(1000),
            ttl_secs: Some(300),
            server_port: 3000,
        }
    }
}
