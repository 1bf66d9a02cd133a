//! Ranked retention storage.
//!
//! [`SortedBuffer`] keeps its elements sorted ascending under an explicit
//! comparator supplied at construction. It deliberately does NOT enforce a
//! capacity bound: the owner decides the eviction policy (see
//! [`crate::sampling`], which evicts the minimum before inserting when full).
//!
//! Not thread-safe; a single logical owner mutates it.

use std::cmp::Ordering;

use crate::error::{RepasoError, Result};

/// A sequence kept sorted ascending by a caller-supplied comparator.
///
/// Insertion position is found by binary search (O(log n)); the insert
/// itself shifts the tail (O(n)). Element 0 is always the minimum.
///
/// # Example
///
/// ```
/// use repaso::buffer::SortedBuffer;
///
/// let mut buf: SortedBuffer<f64> = SortedBuffer::new(f64::total_cmp);
/// buf.insert_sorted(3.0);
/// buf.insert_sorted(1.0);
/// buf.insert_sorted(2.0);
/// assert_eq!(*buf.get(0).unwrap(), 1.0);
/// assert_eq!(buf.pop_min().unwrap(), 1.0);
/// assert_eq!(buf.len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct SortedBuffer<T> {
    items: Vec<T>,
    cmp: fn(&T, &T) -> Ordering,
}

impl<T> SortedBuffer<T> {
    /// Create an empty buffer ordered by `cmp`.
    #[must_use]
    pub fn new(cmp: fn(&T, &T) -> Ordering) -> Self {
        Self {
            items: Vec::new(),
            cmp,
        }
    }

    /// Create an empty buffer with pre-allocated room for `capacity` elements.
    #[must_use]
    pub fn with_capacity(capacity: usize, cmp: fn(&T, &T) -> Ordering) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
            cmp,
        }
    }

    /// Insert `item` at its sorted position.
    ///
    /// Equal elements are placed after the existing run of equals
    /// (upper-bound search), so ties keep a stable, consistent order.
    pub fn insert_sorted(&mut self, item: T) {
        let pos = self
            .items
            .partition_point(|probe| (self.cmp)(probe, &item) != Ordering::Greater);
        self.items.insert(pos, item);
    }

    /// Remove and return the minimum element (position 0).
    ///
    /// # Errors
    ///
    /// Returns [`RepasoError::EmptyBuffer`] if the buffer has no elements.
    pub fn pop_min(&mut self) -> Result<T> {
        if self.items.is_empty() {
            return Err(RepasoError::EmptyBuffer);
        }
        Ok(self.items.remove(0))
    }

    /// Remove and return the element at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`RepasoError::IndexOutOfBounds`] if `index >= len`.
    pub fn pop_at(&mut self, index: usize) -> Result<T> {
        if index >= self.items.len() {
            return Err(RepasoError::IndexOutOfBounds {
                index,
                len: self.items.len(),
            });
        }
        Ok(self.items.remove(index))
    }

    /// Read the element at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`RepasoError::IndexOutOfBounds`] if `index >= len`.
    pub fn get(&self, index: usize) -> Result<&T> {
        self.items.get(index).ok_or(RepasoError::IndexOutOfBounds {
            index,
            len: self.items.len(),
        })
    }

    /// Number of elements currently held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True when no elements are held.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterate elements in ascending order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }
}

impl<'a, T> IntoIterator for &'a SortedBuffer<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
