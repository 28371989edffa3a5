//! In-process cache holding the most recently fetched index collection.
//!
//! The cache holds exactly one [`IndexCollection`] behind an `Arc`. A load
//! swaps the pointer in a single assignment under the write lock, so readers
//! observe either the previous collection or the new one, never a mix.
//! Readers take a snapshot and release the lock before scanning.

use std::sync::{Arc, RwLock};

use crate::document::{DocumentRecord, IndexCollection};

/// Holds the latest index collection for one session.
#[derive(Debug, Default)]
pub struct IndexCache {
    slot: RwLock<Slot>,
}

#[derive(Debug, Default)]
struct Slot {
    collection: Arc<IndexCollection>,
    generation: u64,
}

impl IndexCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the cached collection wholesale.
    pub fn load(&self, items: Vec<DocumentRecord>, count: u64) {
        self.replace(IndexCollection::new(items, count));
    }

    /// Replaces the cached collection with an already assembled one.
    pub fn replace(&self, collection: IndexCollection) {
        let next = Arc::new(collection);
        let mut slot = self
            .slot
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        slot.collection = next;
        slot.generation += 1;
        tracing::debug!(
            generation = slot.generation,
            items = slot.collection.len(),
            count = slot.collection.count,
            "index cache loaded"
        );
    }

    /// Returns a snapshot of the current collection.
    ///
    /// Empty until the first load.
    #[must_use]
    pub fn current(&self) -> Arc<IndexCollection> {
        self.slot
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .collection
            .clone()
    }

    /// Number of loads performed so far; zero means never loaded.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.slot
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .generation
    }
}
