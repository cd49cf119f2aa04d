//! # lrustore
//!
//! Bounded LRU key-value store with O(1) lookup, insertion, and eviction.
//!
//! ## Architecture
//! - **Key index**: AHash map from key to slot index (O(1) lookup)
//! - **Recency chain**: doubly-linked order threaded through a slot arena
//!   as stable indices (O(1) promotion and eviction)
//! - **Slot arena**: entries live in a recycled slot vector, never more
//!   than capacity slots
//!
//! Single-threaded by design: the store is mutated through `&mut self`
//! and carries no internal locking.

#![warn(missing_docs)]

mod error;
mod stats;
mod store;

pub use error::{Error, Result};
pub use stats::StoreStats;
pub use store::LruStore;

#[cfg(test)]
mod tests {
    use crate::LruStore;

    #[test]
    fn public_surface_smoke() {
        let mut store = LruStore::new(2).unwrap();
        store.put(1, 10);
        assert_eq!(store.get(1), Some(10));
        assert_eq!(store.get(2), None);
    }
}
