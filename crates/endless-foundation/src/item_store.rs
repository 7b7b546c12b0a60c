//! Ordered, append-only collection of fetched records.

use endless_core::{PaginationError, PaginationResult};

/// Records fetched so far, in arrival order.
///
/// The store only grows, except for [`ItemStore::reset`]. Every mutation bumps
/// [`ItemStore::version`] and raises a pending "data changed" flag that the
/// owner drains with [`ItemStore::take_changed`] and forwards to the host once
/// its own borrows are released.
#[derive(Debug, Clone)]
pub struct ItemStore<T> {
    items: Vec<T>,
    version: u64,
    changed: bool,
}

impl<T> Default for ItemStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> ItemStore<T> {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            version: 0,
            changed: false,
        }
    }

    /// Creates a store seeded with `items`. Seeding counts as a change.
    pub fn from_items(items: Vec<T>) -> Self {
        Self {
            items,
            version: 1,
            changed: true,
        }
    }

    /// Appends `new_items` after the existing ones and returns how many were added.
    ///
    /// No deduplication happens here; callers that can receive overlapping
    /// pages must filter them first.
    pub fn append(&mut self, new_items: impl IntoIterator<Item = T>) -> usize {
        let before = self.items.len();
        self.items.extend(new_items);
        self.mark_changed();
        self.items.len() - before
    }

    /// Removes every item.
    pub fn reset(&mut self) {
        self.items.clear();
        self.mark_changed();
    }

    /// Replaces the whole content, as when a list is re-initialized with seed data.
    pub fn replace(&mut self, items: Vec<T>) {
        self.items = items;
        self.mark_changed();
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> PaginationResult<&T> {
        self.items.get(index).ok_or(PaginationError::OutOfRange {
            index,
            len: self.items.len(),
        })
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    /// Number of mutations since creation.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Returns whether the store changed since the last call, clearing the flag.
    pub fn take_changed(&mut self) -> bool {
        std::mem::take(&mut self.changed)
    }

    fn mark_changed(&mut self) {
        self.version = self.version.wrapping_add(1);
        self.changed = true;
    }
}

impl<'a, T> IntoIterator for &'a ItemStore<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
