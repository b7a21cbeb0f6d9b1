//! Recency Index Module
//!
//! Doubly-linked recency ordering stored in an index-stable arena.

// == Node Handle ==
/// Stable reference to a node in a [`RecencyIndex`].
///
/// A handle carries the generation of the slot it was issued for. Once the
/// node is removed the slot generation moves on and the handle goes stale,
/// so later calls with it are silent no-ops.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeHandle {
    index: usize,
    generation: u64,
}

#[derive(Debug)]
struct Node<T> {
    value: T,
    prev: Option<usize>,
    next: Option<usize>,
}

#[derive(Debug)]
struct Slot<T> {
    generation: u64,
    node: Option<Node<T>>,
}

// == Recency Index ==
/// Tracks touch order for LRU eviction.
///
/// - Front = Most recently used
/// - Back = Least recently used
///
/// Every operation is O(1). Removed slots are recycled through a free list.
#[derive(Debug)]
pub struct RecencyIndex<T> {
    slots: Vec<Slot<T>>,
    free: Vec<usize>,
    head: Option<usize>,
    tail: Option<usize>,
    len: usize,
}

impl<T> Default for RecencyIndex<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> RecencyIndex<T> {
    // == Constructor ==
    /// Creates a new empty index.
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            head: None,
            tail: None,
            len: 0,
        }
    }

    // == Push Front ==
    /// Inserts `value` as the most recently used node.
    pub fn push_front(&mut self, value: T) -> NodeHandle {
        let node = Node {
            value,
            prev: None,
            next: None,
        };

        let index = match self.free.pop() {
            Some(index) => {
                self.slots[index].node = Some(node);
                index
            }
            None => {
                self.slots.push(Slot {
                    generation: 0,
                    node: Some(node),
                });
                self.slots.len() - 1
            }
        };

        self.link_front(index);
        self.len += 1;

        NodeHandle {
            index,
            generation: self.slots[index].generation,
        }
    }

    // == Move To Front ==
    /// Promotes a node to most recently used.
    ///
    /// Returns false if the handle is stale.
    pub fn move_to_front(&mut self, handle: NodeHandle) -> bool {
        let Some(index) = self.resolve(handle) else {
            return false;
        };
        if self.head != Some(index) {
            self.unlink(index);
            self.link_front(index);
        }
        true
    }

    // == Remove ==
    /// Detaches a node and returns its value.
    ///
    /// Removing twice with the same handle returns None the second time.
    pub fn remove(&mut self, handle: NodeHandle) -> Option<T> {
        let index = self.resolve(handle)?;
        self.unlink(index);

        let slot = &mut self.slots[index];
        let node = slot.node.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(index);
        self.len -= 1;

        Some(node.value)
    }

    // == Back ==
    /// Returns the least recently used value without removing it.
    pub fn back(&self) -> Option<&T> {
        self.tail.and_then(|index| self.value_at(index))
    }

    // == Front ==
    /// Returns the most recently used value.
    #[cfg(test)]
    pub fn front(&self) -> Option<&T> {
        self.head.and_then(|index| self.value_at(index))
    }

    /// Returns the value behind a live handle.
    pub fn get(&self, handle: NodeHandle) -> Option<&T> {
        self.resolve(handle).and_then(|index| self.value_at(index))
    }

    /// Returns true if the handle still points at a live node.
    #[cfg(test)]
    pub fn contains(&self, handle: NodeHandle) -> bool {
        self.resolve(handle).is_some()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    // == Iteration ==
    /// Walks the index from most to least recently used.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            index: self,
            cursor: self.head,
        }
    }

    // == Internal Helpers ==
    fn resolve(&self, handle: NodeHandle) -> Option<usize> {
        let slot = self.slots.get(handle.index)?;
        (slot.generation == handle.generation && slot.node.is_some()).then_some(handle.index)
    }

    fn value_at(&self, index: usize) -> Option<&T> {
        self.slots[index].node.as_ref().map(|node| &node.value)
    }

    fn node_mut(&mut self, index: usize) -> Option<&mut Node<T>> {
        self.slots[index].node.as_mut()
    }

    fn link_front(&mut self, index: usize) {
        let old_head = self.head;
        if let Some(node) = self.node_mut(index) {
            node.prev = None;
            node.next = old_head;
        }
        match old_head {
            Some(head) => {
                if let Some(node) = self.node_mut(head) {
                    node.prev = Some(index);
                }
            }
            None => self.tail = Some(index),
        }
        self.head = Some(index);
    }

    fn unlink(&mut self, index: usize) {
        let (prev, next) = match self.slots[index].node.as_ref() {
            Some(node) => (node.prev, node.next),
            None => return,
        };

        match prev {
            Some(prev) => {
                if let Some(node) = self.node_mut(prev) {
                    node.next = next;
                }
            }
            None => self.head = next,
        }
        match next {
            Some(next) => {
                if let Some(node) = self.node_mut(next) {
                    node.prev = prev;
                }
            }
            None => self.tail = prev,
        }

        if let Some(node) = self.node_mut(index) {
            node.prev = None;
            node.next = None;
        }
    }
}

// == Iterator ==
/// Front-to-back iterator yielding each live handle with its value.
pub struct Iter<'a, T> {
    index: &'a RecencyIndex<T>,
    cursor: Option<usize>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = (NodeHandle, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.cursor?;
        let slot = &self.index.slots[index];
        let node = slot.node.as_ref()?;
        self.cursor = node.next;
        Some((
            NodeHandle {
                index,
                generation: slot.generation,
            },
            &node.value,
        ))
    }
}
