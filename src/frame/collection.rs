//! Ordered Frame Collection
//!
//! Maps frame keys to entries while preserving insertion order. Supports the
//! positional operations the manager needs for trimming (index lookup and
//! range removal). Semantic ordering is the caller's job: the manager always
//! inserts at the sorted position, which keeps the collection chronological.

use crate::error::FrameError;
use crate::types::FrameKey;
use indexmap::IndexMap;

/// Insertion-ordered map from [`FrameKey`] to entry
#[derive(Debug)]
pub struct FrameCollection<V> {
    entries: IndexMap<FrameKey, V>,
}

impl<V> Default for FrameCollection<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> FrameCollection<V> {
    pub fn new() -> Self {
        FrameCollection {
            entries: IndexMap::new(),
        }
    }

    pub fn get(&self, key: &FrameKey) -> Option<&V> {
        self.entries.get(key)
    }

    pub fn get_mut(&mut self, key: &FrameKey) -> Option<&mut V> {
        self.entries.get_mut(key)
    }

    pub fn contains(&self, key: &FrameKey) -> bool {
        self.entries.contains_key(key)
    }

    /// Append a new entry at the end.
    ///
    /// Fails with [`FrameError::DuplicateKey`] if the key is already present;
    /// the collection is left unchanged in that case.
    pub fn set(&mut self, key: FrameKey, value: V) -> Result<(), FrameError> {
        let index = self.entries.len();
        self.insert_at(index, key, value)
    }

    /// Insert a new entry at `index` (clamped to the current length),
    /// shifting later entries back by one.
    pub fn insert_at(&mut self, index: usize, key: FrameKey, value: V) -> Result<(), FrameError> {
        if self.entries.contains_key(&key) {
            return Err(FrameError::DuplicateKey(key));
        }
        let index = index.min(self.entries.len());
        self.entries.shift_insert(index, key, value);
        Ok(())
    }

    /// Index at which `key` would keep the collection sorted by key.
    pub fn position_for(&self, key: &FrameKey) -> usize {
        self.entries
            .keys()
            .position(|existing| existing > key)
            .unwrap_or(self.entries.len())
    }

    pub fn index_of(&self, key: &FrameKey) -> Option<usize> {
        self.entries.get_index_of(key)
    }

    /// Remove `count` entries starting at `start` and return them in order.
    ///
    /// The range is clamped to the collection; out-of-range requests remove
    /// fewer entries (possibly none) instead of panicking.
    pub fn remove_range(&mut self, start: usize, count: usize) -> Vec<(FrameKey, V)> {
        let len = self.entries.len();
        let start = start.min(len);
        let end = start.saturating_add(count).min(len);
        self.entries.drain(start..end).collect()
    }

    pub fn remove(&mut self, key: &FrameKey) -> Option<V> {
        self.entries.shift_remove(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &FrameKey> {
        self.entries.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&FrameKey, &V)> {
        self.entries.iter()
    }

    pub(crate) fn drain_all(&mut self) -> Vec<(FrameKey, V)> {
        self.entries.drain(..).collect()
    }
}
