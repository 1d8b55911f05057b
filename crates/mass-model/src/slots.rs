//! Sparse, index-addressed slot storage.
//!
//! Sections on a node and influences within a section live in sparse
//! slots: removing an entry leaves a gap, and new entries take the lowest
//! unoccupied index. Occupied indices are discovered by scanning.

use std::collections::BTreeMap;

/// Sparse slot array keyed by `usize` index.
#[derive(Debug, Clone, PartialEq)]
pub struct SparseSlots<T> {
    slots: BTreeMap<usize, T>,
}

impl<T> Default for SparseSlots<T> {
    fn default() -> Self {
        Self {
            slots: BTreeMap::new(),
        }
    }
}

impl<T> SparseSlots<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lowest index with nothing stored in it.
    pub fn first_free(&self) -> usize {
        let mut counter = 0;
        while self.slots.contains_key(&counter) {
            counter += 1;
        }
        counter
    }

    /// Store `value` in the lowest free slot and return its index.
    pub fn insert_first_free(&mut self, value: T) -> usize {
        let index = self.first_free();
        self.slots.insert(index, value);
        index
    }

    /// Store `value` at `index`, returning whatever occupied it before.
    pub fn insert_at(&mut self, index: usize, value: T) -> Option<T> {
        self.slots.insert(index, value)
    }

    pub fn remove(&mut self, index: usize) -> Option<T> {
        self.slots.remove(&index)
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.slots.get(&index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.slots.get_mut(&index)
    }

    pub fn contains(&self, index: usize) -> bool {
        self.slots.contains_key(&index)
    }

    /// Occupied indices in ascending order.
    pub fn indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.slots.keys().copied()
    }

    /// `(index, value)` pairs in ascending index order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &T)> {
        self.slots.iter().map(|(i, v)| (*i, v))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (usize, &mut T)> {
        self.slots.iter_mut().map(|(i, v)| (*i, v))
    }

    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.slots.values()
    }

    /// Drop every slot for which `keep` returns false. Returns how many
    /// slots were freed.
    pub fn retain(&mut self, mut keep: impl FnMut(usize, &T) -> bool) -> usize {
        let before = self.slots.len();
        self.slots.retain(|i, v| keep(*i, v));
        before - self.slots.len()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}
