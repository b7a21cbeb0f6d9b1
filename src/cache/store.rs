//! Cache Store Module
//!
//! Two-level (category, key) storage backed by an index-stable entry arena.
//! The store does no locking of its own; the engine owns it behind its lock.

use std::collections::HashMap;
use std::time::Instant;

use crate::cache::{Entry, NodeHandle};
use crate::error::{CacheError, Result};

// == Entry Id ==
/// Stable handle to an entry in the [`Store`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntryId {
    index: usize,
    generation: u64,
}

#[derive(Debug)]
struct EntrySlot<V> {
    generation: u64,
    entry: Option<Entry<V>>,
}

// == Store ==
/// Category buckets mapping keys to entry handles.
#[derive(Debug)]
pub struct Store<V> {
    /// Entry arena
    slots: Vec<EntrySlot<V>>,
    /// Recycled arena slots
    free: Vec<usize>,
    /// category -> key -> entry
    categories: HashMap<String, HashMap<String, EntryId>>,
    /// Number of live entries
    len: usize,
}

impl<V> Default for Store<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> Store<V> {
    // == Constructor ==
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            categories: HashMap::new(),
            len: 0,
        }
    }

    // == Lookup ==
    /// Finds the entry stored under (category, key).
    pub fn lookup(&self, category: &str, key: &str) -> Option<EntryId> {
        self.categories.get(category)?.get(key).copied()
    }

    // == Locate ==
    /// Like [`lookup`](Self::lookup), but says which level of the keyspace missed.
    pub fn locate(&self, category: &str, key: &str) -> Result<EntryId> {
        let bucket = self
            .categories
            .get(category)
            .ok_or_else(|| CacheError::CategoryNotFound(category.to_string()))?;

        bucket
            .get(key)
            .copied()
            .ok_or_else(|| CacheError::KeyNotFound {
                category: category.to_string(),
                key: key.to_string(),
            })
    }

    // == Insert ==
    /// Creates or overwrites the entry under (category, key).
    ///
    /// For a new key, `link` receives the id of the fresh entry and must
    /// return its recency handle. It is not called when overwriting.
    pub fn insert_with<F>(
        &mut self,
        category: &str,
        key: &str,
        value: V,
        now: Instant,
        link: F,
    ) -> EntryId
    where
        F: FnOnce(EntryId) -> NodeHandle,
    {
        if let Some(id) = self.lookup(category, key) {
            if let Some(entry) = self.get_mut(id) {
                entry.overwrite(value, now);
            }
            return id;
        }

        let index = match self.free.pop() {
            Some(index) => index,
            None => {
                self.slots.push(EntrySlot {
                    generation: 0,
                    entry: None,
                });
                self.slots.len() - 1
            }
        };
        let id = EntryId {
            index,
            generation: self.slots[index].generation,
        };

        let recency = link(id);
        self.slots[index].entry = Some(Entry::new(
            category.to_string(),
            key.to_string(),
            value,
            now,
            recency,
        ));
        self.categories
            .entry(category.to_string())
            .or_default()
            .insert(key.to_string(), id);
        self.len += 1;

        id
    }

    // == Access ==
    pub fn get(&self, id: EntryId) -> Option<&Entry<V>> {
        let slot = self.slots.get(id.index)?;
        if slot.generation != id.generation {
            return None;
        }
        slot.entry.as_ref()
    }

    pub fn get_mut(&mut self, id: EntryId) -> Option<&mut Entry<V>> {
        let slot = self.slots.get_mut(id.index)?;
        if slot.generation != id.generation {
            return None;
        }
        slot.entry.as_mut()
    }

    // == Remove ==
    /// Removes (category, key). No-op if absent.
    pub fn remove(&mut self, category: &str, key: &str) -> Option<Entry<V>> {
        let id = self.lookup(category, key)?;
        self.remove_id(id)
    }

    /// Removes the entry behind `id`, pruning its bucket once empty.
    pub fn remove_id(&mut self, id: EntryId) -> Option<Entry<V>> {
        let slot = self.slots.get_mut(id.index)?;
        if slot.generation != id.generation {
            return None;
        }
        let entry = slot.entry.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.index);
        self.len -= 1;

        if let Some(bucket) = self.categories.get_mut(&entry.category) {
            bucket.remove(&entry.key);
            if bucket.is_empty() {
                self.categories.remove(&entry.category);
            }
        }

        Some(entry)
    }

    // == Length ==
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of live keys in a category.
    pub fn category_count(&self, category: &str) -> usize {
        self.categories.get(category).map_or(0, HashMap::len)
    }

    /// Checks that the category buckets index exactly the live entries.
    ///
    /// Bucket sizes must add up to `len`, and every bucket id must resolve
    /// to a live entry stored under that same (category, key).
    pub fn is_consistent(&self) -> bool {
        let indexed: usize = self.categories.values().map(HashMap::len).sum();
        if indexed != self.len || self.categories.values().any(HashMap::is_empty) {
            return false;
        }

        self.categories.iter().all(|(category, bucket)| {
            bucket.iter().all(|(key, id)| {
                self.get(*id)
                    .is_some_and(|entry| &entry.category == category && &entry.key == key)
            })
        })
    }

    /// Iterates every live entry with its id, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (EntryId, &Entry<V>)> {
        self.slots.iter().enumerate().filter_map(|(index, slot)| {
            slot.entry.as_ref().map(|entry| {
                (
                    EntryId {
                        index,
                        generation: slot.generation,
                    },
                    entry,
                )
            })
        })
    }
}
