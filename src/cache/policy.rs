//! Invalidation Policies
//!
//! Eviction decides what to drop when a new key arrives. Expiration decides
//! whether a stored entry is stale when it is read.

use std::fmt::Debug;
use std::time::{Duration, Instant};

use crate::cache::{EntryId, RecencyIndex};

// == Eviction ==
/// Strategy consulted after a new key has been added.
pub trait EvictionPolicy: Debug + Send + Sync {
    /// Returns the entry to evict given the new total entry count, or None.
    ///
    /// Only called for new keys, never for overwrites.
    fn on_insert(&self, total: usize, recency: &RecencyIndex<EntryId>) -> Option<EntryId>;

    /// Upper bound on live entries, if the policy imposes one.
    fn capacity(&self) -> Option<usize> {
        None
    }
}

/// Evicts the least recently used entry once the count exceeds `capacity`.
///
/// With `capacity == 0` every new entry is evicted immediately.
#[derive(Debug, Clone, Copy)]
pub struct CapacityPolicy {
    capacity: usize,
}

impl CapacityPolicy {
    pub fn new(capacity: usize) -> Self {
        Self { capacity }
    }
}

impl EvictionPolicy for CapacityPolicy {
    fn on_insert(&self, total: usize, recency: &RecencyIndex<EntryId>) -> Option<EntryId> {
        if total > self.capacity {
            recency.back().copied()
        } else {
            None
        }
    }

    fn capacity(&self) -> Option<usize> {
        Some(self.capacity)
    }
}

/// Never evicts.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unbounded;

impl EvictionPolicy for Unbounded {
    fn on_insert(&self, _total: usize, _recency: &RecencyIndex<EntryId>) -> Option<EntryId> {
        None
    }
}

// == Expiration ==
/// Strategy consulted on every read of an existing entry.
pub trait ExpirationPolicy: Debug + Send + Sync {
    fn is_expired(&self, created_at: Instant, now: Instant) -> bool;

    fn ttl(&self) -> Option<Duration> {
        None
    }
}

/// Entry is stale once strictly more than `ttl` has passed since its last write.
#[derive(Debug, Clone, Copy)]
pub struct TtlPolicy {
    ttl: Duration,
}

impl TtlPolicy {
    pub fn new(ttl: Duration) -> Self {
        Self { ttl }
    }
}

impl ExpirationPolicy for TtlPolicy {
    fn is_expired(&self, created_at: Instant, now: Instant) -> bool {
        now.saturating_duration_since(created_at) > self.ttl
    }

    fn ttl(&self) -> Option<Duration> {
        Some(self.ttl)
    }
}

/// Entries never go stale.
#[derive(Debug, Clone, Copy, Default)]
pub struct NeverExpires;

impl ExpirationPolicy for NeverExpires {
    fn is_expired(&self, _created_at: Instant, _now: Instant) -> bool {
        false
    }
}
