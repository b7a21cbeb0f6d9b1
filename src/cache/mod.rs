//! Cache Module
//!
//! Categorized in-memory caching with LRU eviction and lazy TTL expiration.

mod clock;
mod engine;
mod entry;
mod policy;
mod recency;
mod stats;
mod store;


// Re-export public types
pub use clock::{Clock, ManualClock, SystemClock};
pub use engine::CacheEngine;
pub use entry::Entry;
pub use policy::{
    CapacityPolicy, EvictionPolicy, ExpirationPolicy, NeverExpires, TtlPolicy, Unbounded,
};
pub use recency::{Iter as RecencyIter, NodeHandle, RecencyIndex};
pub use stats::CacheStats;
pub use store::{EntryId, Store};
