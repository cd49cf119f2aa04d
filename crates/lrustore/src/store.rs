//! LRU store implementation
//!
//! Entries live in a slot arena; the recency chain is threaded through the
//! arena as slot indices, so promotion and eviction never touch pointers.

use std::collections::HashMap;

use ahash::RandomState;

use crate::error::{Error, Result};
use crate::stats::StoreStats;

/// Entry in the recency chain
struct Entry {
    key: i64,
    value: i64,
    prev: Option<usize>,
    next: Option<usize>,
}

/// Fixed-capacity key-value store with least-recently-used eviction
///
/// The key index maps each resident key to its slot in the arena. Slot
/// indices are stable for the lifetime of an entry, so promotion reorders
/// the chain without rewriting the index. Vacated slots are recycled
/// through a free list; the arena never grows past `capacity` slots.
pub struct LruStore {
    index: HashMap<i64, usize, RandomState>,
    slots: Vec<Option<Entry>>,
    mru: Option<usize>,
    lru: Option<usize>,
    free: Vec<usize>,
    capacity: usize,
    stats: StoreStats,
}

impl LruStore {
    /// Create an empty store holding at most `capacity` entries
    ///
    /// # Arguments
    /// * `capacity` - Maximum number of resident entries, at least 1
    ///
    /// # Returns
    /// * `Result<LruStore>` - The store, or `Error::InvalidCapacity`
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(Error::InvalidCapacity(capacity));
        }

        Ok(Self {
            index: HashMap::with_capacity_and_hasher(capacity, RandomState::new()),
            slots: Vec::with_capacity(capacity),
            mru: None,
            lru: None,
            free: Vec::new(),
            capacity,
            stats: StoreStats::default(),
        })
    }

    /// Look up a key, promoting it to most-recently-used on a hit
    ///
    /// A hit is a side-effecting read: it changes future eviction order
    /// even though the value is untouched. A miss leaves the store exactly
    /// as it was.
    pub fn get(&mut self, key: i64) -> Option<i64> {
        match self.index.get(&key) {
            Some(&idx) => {
                self.promote(idx);
                self.stats.record_hit();
                self.slots[idx].as_ref().map(|entry| entry.value)
            }
            None => {
                self.stats.record_miss();
                None
            }
        }
    }

    /// Insert a key-value pair, or update and promote an existing key
    ///
    /// Updating an existing key never evicts, regardless of how full the
    /// store is. Inserting a new key into a full store first evicts the
    /// least-recently-used entry, so the entry count never exceeds
    /// capacity.
    pub fn put(&mut self, key: i64, value: i64) {
        if let Some(&idx) = self.index.get(&key) {
            if let Some(entry) = &mut self.slots[idx] {
                entry.value = value;
            }
            self.promote(idx);
            self.stats.record_update();
        } else {
            if self.index.len() == self.capacity {
                self.evict_lru();
            }

            let idx = self.acquire_slot();
            self.slots[idx] = Some(Entry {
                key,
                value,
                prev: None,
                next: self.mru,
            });

            if let Some(mru_idx) = self.mru {
                if let Some(front) = &mut self.slots[mru_idx] {
                    front.prev = Some(idx);
                }
            }

            self.mru = Some(idx);
            if self.lru.is_none() {
                self.lru = Some(idx);
            }

            self.index.insert(key, idx);
            self.stats.record_insert();
        }
    }

    /// Number of resident entries
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Check if the store holds no entries
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Maximum number of resident entries
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Snapshot of the operation counters
    pub fn stats(&self) -> StoreStats {
        self.stats
    }

    fn promote(&mut self, idx: usize) {
        if self.mru == Some(idx) {
            return; // Already most recent
        }

        self.detach(idx);

        if let Some(entry) = &mut self.slots[idx] {
            entry.prev = None;
            entry.next = self.mru;
        }

        if let Some(mru_idx) = self.mru {
            if let Some(front) = &mut self.slots[mru_idx] {
                front.prev = Some(idx);
            }
        }

        self.mru = Some(idx);
    }

    fn detach(&mut self, idx: usize) {
        let (prev, next) = match &self.slots[idx] {
            Some(entry) => (entry.prev, entry.next),
            None => return,
        };

        match prev {
            Some(prev_idx) => {
                if let Some(entry) = &mut self.slots[prev_idx] {
                    entry.next = next;
                }
            }
            None => {
                self.mru = next;
            }
        }

        match next {
            Some(next_idx) => {
                if let Some(entry) = &mut self.slots[next_idx] {
                    entry.prev = prev;
                }
            }
            None => {
                self.lru = prev;
            }
        }
    }

    // Detach while the slot is still occupied: neighbor patching reads the
    // entry's links.
    fn evict_lru(&mut self) {
        if let Some(idx) = self.lru {
            self.detach(idx);
            if let Some(entry) = self.slots[idx].take() {
                self.index.remove(&entry.key);
            }
            self.release_slot(idx);
            self.stats.record_eviction();
        }
    }

    fn acquire_slot(&mut self) -> usize {
        if let Some(idx) = self.free.pop() {
            idx
        } else {
            let idx = self.slots.len();
            self.slots.push(None);
            idx
        }
    }

    fn release_slot(&mut self, idx: usize) {
        self.free.push(idx);
    }
}

#[cfg(test)]
impl LruStore {
    /// Resident keys in recency order, most recent first
    fn keys_by_recency(&self) -> Vec<i64> {
        let mut keys = Vec::with_capacity(self.index.len());
        let mut cursor = self.mru;
        while let Some(idx) = cursor {
            let entry = self.slots[idx]
                .as_ref()
                .expect("recency chain points at occupied slots");
            keys.push(entry.key);
            cursor = entry.next;
        }
        keys
    }

    /// Panic if the index, the recency chain, and the arena disagree
    fn check_coherence(&self) {
        let forward = self.keys_by_recency();
        assert_eq!(forward.len(), self.index.len());
        for key in &forward {
            let idx = self.index[key];
            assert_eq!(self.slots[idx].as_ref().map(|e| e.key), Some(*key));
        }

        let mut backward = Vec::with_capacity(forward.len());
        let mut cursor = self.lru;
        while let Some(idx) = cursor {
            let entry = self.slots[idx].as_ref().unwrap();
            backward.push(entry.key);
            cursor = entry.prev;
        }
        backward.reverse();
        assert_eq!(forward, backward);

        assert_eq!(self.index.len() + self.free.len(), self.slots.len());
    }
}
