//! Cache Engine Module
//!
//! Combines the [`Store`], the [`RecencyIndex`] and the two invalidation
//! policies behind a single lock.
//!
//! Every public operation holds the lock for its whole duration, so all
//! calls are linearizable and no caller ever sees the store and the recency
//! index disagree. All categories share that one lock. Tracing events are
//! emitted after the lock has been released.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tracing::{debug, info};

use crate::cache::{
    CacheStats, CapacityPolicy, Clock, Entry, EntryId, EvictionPolicy, ExpirationPolicy,
    NeverExpires, RecencyIndex, Store, SystemClock, TtlPolicy, Unbounded,
};
use crate::config::Config;
use crate::error::{CacheError, Result};

// == Engine State ==
/// Everything guarded by the engine lock.
#[derive(Debug)]
struct EngineState<V> {
    store: Store<V>,
    recency: RecencyIndex<EntryId>,
    stats: CacheStats,
}

impl<V> EngineState<V> {
    fn new() -> Self {
        Self {
            store: Store::new(),
            recency: RecencyIndex::new(),
            stats: CacheStats::new(),
        }
    }

    /// Removes an entry from both structures.
    fn unlink(&mut self, id: EntryId) -> Option<Entry<V>> {
        let entry = self.store.remove_id(id)?;
        self.recency.remove(entry.recency);
        self.stats.set_total_entries(self.store.len());
        Some(entry)
    }
}

/// What a `set` did, logged once the lock is released.
enum SetOutcome {
    Added { evicted: Vec<(String, String)> },
    Updated,
}

// == Cache Engine ==
/// Thread-safe categorized cache.
///
/// Share it between threads with `Arc<CacheEngine<V>>`.
pub struct CacheEngine<V> {
    state: Mutex<EngineState<V>>,
    eviction: Box<dyn EvictionPolicy>,
    expiration: Box<dyn ExpirationPolicy>,
    clock: Arc<dyn Clock>,
}

impl<V> fmt::Debug for CacheEngine<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CacheEngine")
            .field("eviction", &self.eviction)
            .field("expiration", &self.expiration)
            .field("len", &self.len())
            .finish()
    }
}

impl<V: Clone> CacheEngine<V> {
    // == Constructors ==
    /// Creates an engine with the given optional capacity and TTL.
    ///
    /// With neither set the engine is a plain unbounded map.
    pub fn new(capacity: Option<usize>, ttl: Option<Duration>) -> Self {
        Self::with_clock(capacity, ttl, Arc::new(SystemClock))
    }

    /// Same as [`new`](Self::new) but reads time from `clock`.
    pub fn with_clock(
        capacity: Option<usize>,
        ttl: Option<Duration>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let eviction: Box<dyn EvictionPolicy> = match capacity {
            Some(capacity) => Box::new(CapacityPolicy::new(capacity)),
            None => Box::new(Unbounded),
        };
        let expiration: Box<dyn ExpirationPolicy> = match ttl {
            Some(ttl) => Box::new(TtlPolicy::new(ttl)),
            None => Box::new(NeverExpires),
        };
        Self::with_policies(eviction, expiration, clock)
    }

    /// Creates an engine from arbitrary policy implementations.
    pub fn with_policies(
        eviction: Box<dyn EvictionPolicy>,
        expiration: Box<dyn ExpirationPolicy>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        info!(
            capacity = ?eviction.capacity(),
            ttl = ?expiration.ttl(),
            "Cache engine created"
        );
        Self {
            state: Mutex::new(EngineState::new()),
            eviction,
            expiration,
            clock,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.capacity, config.ttl())
    }

    // == Set ==
    /// Stores `value` under (category, key).
    ///
    /// An existing entry is overwritten, its age reset and its recency
    /// promoted. A new entry may trigger eviction of the least recently
    /// used one.
    pub fn set(&self, category: &str, key: &str, value: V) {
        let outcome = {
            let mut guard = self.state.lock();
            let state = &mut *guard;
            let now = self.clock.now();

            match state.store.lookup(category, key) {
                Some(id) => {
                    if let Some(entry) = state.store.get_mut(id) {
                        entry.overwrite(value, now);
                        state.recency.move_to_front(entry.recency);
                    }
                    SetOutcome::Updated
                }
                None => {
                    let recency = &mut state.recency;
                    state
                        .store
                        .insert_with(category, key, value, now, |id| recency.push_front(id));

                    let mut evicted = Vec::new();
                    while let Some(victim) =
                        self.eviction.on_insert(state.store.len(), &state.recency)
                    {
                        let Some(entry) = state.unlink(victim) else {
                            break;
                        };
                        state.stats.record_eviction();
                        evicted.push((entry.category, entry.key));
                    }
                    state.stats.set_total_entries(state.store.len());
                    SetOutcome::Added { evicted }
                }
            }
        };

        match outcome {
            SetOutcome::Updated => debug!(category, key, "Updated entry"),
            SetOutcome::Added { evicted } => {
                debug!(category, key, "Added entry");
                for (victim_category, victim_key) in evicted {
                    debug!(
                        category = %victim_category,
                        key = %victim_key,
                        "Evicted least recently used entry"
                    );
                }
            }
        }
    }

    // == Get ==
    /// Returns the value under (category, key), or None if absent or expired.
    pub fn get(&self, category: &str, key: &str) -> Option<V> {
        self.lookup(category, key).ok()
    }

    // == Lookup ==
    /// Like [`get`](Self::get), but reports why nothing was returned.
    ///
    /// An expired entry is purged from the cache and is not promoted.
    pub fn lookup(&self, category: &str, key: &str) -> Result<V> {
        let mut purged_age = None;
        let result = {
            let mut guard = self.state.lock();
            let state = &mut *guard;
            let now = self.clock.now();

            match state.store.locate(category, key) {
                Err(miss) => {
                    state.stats.record_miss();
                    Err(miss)
                }
                Ok(id) => match state.store.get(id) {
                    Some(entry) if self.expiration.is_expired(entry.created_at, now) => {
                        purged_age = Some(entry.age(now));
                        state.unlink(id);
                        state.stats.record_expiration();
                        Err(CacheError::Expired {
                            category: category.to_string(),
                            key: key.to_string(),
                        })
                    }
                    Some(entry) => {
                        let value = entry.value.clone();
                        state.recency.move_to_front(entry.recency);
                        state.stats.record_hit();
                        Ok(value)
                    }
                    None => {
                        state.stats.record_miss();
                        Err(CacheError::KeyNotFound {
                            category: category.to_string(),
                            key: key.to_string(),
                        })
                    }
                },
            }
        };

        if let Some(age) = purged_age {
            debug!(category, key, age = ?age, "Purged expired entry");
        }
        result
    }

    // == Delete ==
    /// Removes (category, key) if present. Returns whether anything was removed.
    pub fn delete(&self, category: &str, key: &str) -> bool {
        let removed = {
            let mut guard = self.state.lock();
            let state = &mut *guard;
            match state.store.remove(category, key) {
                Some(entry) => {
                    state.recency.remove(entry.recency);
                    state.stats.set_total_entries(state.store.len());
                    true
                }
                None => false,
            }
        };

        if removed {
            debug!(category, key, "Deleted entry");
        } else {
            debug!(category, key, "Delete of absent entry ignored");
        }
        removed
    }
}

impl<V> CacheEngine<V> {
    // == Introspection ==
    /// Number of resident entries, including stale ones not yet read.
    pub fn len(&self) -> usize {
        self.state.lock().store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of resident entries in one category.
    pub fn category_len(&self, category: &str) -> usize {
        self.state.lock().store.category_count(category)
    }

    pub fn stats(&self) -> CacheStats {
        let state = self.state.lock();
        let mut stats = state.stats.clone();
        stats.set_total_entries(state.store.len());
        stats
    }

    pub fn capacity(&self) -> Option<usize> {
        self.eviction.capacity()
    }

    pub fn ttl(&self) -> Option<Duration> {
        self.expiration.ttl()
    }

    /// Keys from most to least recently used.
    pub fn recency_order(&self) -> Vec<(String, String)> {
        let state = self.state.lock();
        state
            .recency
            .iter()
            .filter_map(|(_, id)| state.store.get(*id))
            .map(|entry| (entry.category.clone(), entry.key.clone()))
            .collect()
    }

    /// Checks that the store and the recency index mirror each other.
    ///
    /// Every store entry must own a live recency node pointing back at it,
    /// and every recency node must point at a live store entry. The category
    /// buckets must index exactly the live entries.
    pub fn is_consistent(&self) -> bool {
        let state = self.state.lock();
        if state.store.len() != state.recency.len() || !state.store.is_consistent() {
            return false;
        }

        let forward = state.store.iter().all(|(id, entry)| {
            state.recency.get(entry.recency) == Some(&id)
                && state.store.lookup(&entry.category, &entry.key) == Some(id)
        });
        let backward = state.recency.iter().all(|(handle, id)| {
            state
                .store
                .get(*id)
                .is_some_and(|entry| entry.recency == handle)
        });

        forward && backward
    }
}
