//! Cache Entry Module
//!
//! Defines a single cached value and its bookkeeping.

use std::time::Instant;

use crate::cache::NodeHandle;

// == Cache Entry ==
/// One cached value addressed by (category, key).
#[derive(Debug, Clone)]
pub struct Entry<V> {
    /// Top-level namespace of the entry
    pub category: String,
    /// Key within the category
    pub key: String,
    /// The stored value
    pub value: V,
    /// Time of the last write
    pub created_at: Instant,
    /// Position of this entry in the recency index
    pub recency: NodeHandle,
}

impl<V> Entry<V> {
    // == Constructor ==
    pub fn new(
        category: String,
        key: String,
        value: V,
        created_at: Instant,
        recency: NodeHandle,
    ) -> Self {
        Self {
            category,
            key,
            value,
            created_at,
            recency,
        }
    }

    // == Overwrite ==
    /// Replaces the value and restarts the entry's age.
    pub fn overwrite(&mut self, value: V, now: Instant) {
        self.value = value;
        self.created_at = now;
    }

    /// Returns how long ago the entry was last written.
    pub fn age(&self, now: Instant) -> std::time::Duration {
        now.saturating_duration_since(self.created_at)
    }
}
