//! The [`FixedVec`] type: a sequence with a capacity fixed at construction.
//!
//! Each slot is either occupied or empty. Iteration skips empty slots, so a
//! `FixedVec` behaves like its [`compact`](FixedVec::compact)ed form when
//! read sequentially.

use crate::error::ContainerError;

/// A fixed-capacity sequence of optional slots.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FixedVec<T> {
    slots: Vec<Option<T>>,
}

impl<T> FixedVec<T> {
    /// Create a sequence with `capacity` empty slots.
    pub fn new(capacity: usize) -> Self {
        let mut slots = Vec::with_capacity(capacity);
        slots.resize_with(capacity, || None);
        Self { slots }
    }

    /// Create a full sequence holding `items` in order.
    pub fn from_vec(items: Vec<T>) -> Self {
        Self {
            slots: items.into_iter().map(Some).collect(),
        }
    }

    /// Create a sequence from raw slots. The capacity is `slots.len()`.
    pub fn from_slots(slots: Vec<Option<T>>) -> Self {
        Self { slots }
    }

    /// Number of slots, occupied or not.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of occupied slots.
    pub fn occupied(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    /// Whether every slot is occupied. A zero-capacity sequence is full.
    pub fn is_full(&self) -> bool {
        self.slots.iter().all(Option::is_some)
    }

    /// Whether no slot is occupied.
    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    #[inline]
    fn check(&self, index: usize) -> Result<(), ContainerError> {
        if index < self.slots.len() {
            Ok(())
        } else {
            Err(ContainerError::OutOfRange {
                index,
                len: self.slots.len(),
            })
        }
    }

    /// Read slot `index`. `Ok(None)` means the slot is empty.
    pub fn get(&self, index: usize) -> Result<Option<&T>, ContainerError> {
        self.check(index)?;
        Ok(self.slots[index].as_ref())
    }

    /// Store `value` in slot `index`, returning the previous occupant.
    pub fn set(&mut self, index: usize, value: T) -> Result<Option<T>, ContainerError> {
        self.check(index)?;
        Ok(self.slots[index].replace(value))
    }

    /// Empty slot `index`, returning its previous occupant.
    pub fn take(&mut self, index: usize) -> Result<Option<T>, ContainerError> {
        self.check(index)?;
        Ok(self.slots[index].take())
    }

    /// Place `value` in the first empty slot and return that slot's index.
    ///
    /// Fails with [`ContainerError::Full`] when no slot is free; the value
    /// is dropped in that case.
    pub fn add(&mut self, value: T) -> Result<usize, ContainerError> {
        match self.slots.iter().position(Option::is_none) {
            Some(i) => {
                self.slots[i] = Some(value);
                Ok(i)
            }
            None => Err(ContainerError::Full {
                capacity: self.slots.len(),
            }),
        }
    }

    /// Drop the empty slots.
    ///
    /// A full sequence is returned as is. Otherwise the result is a full
    /// sequence of the occupied elements in their original order, which has
    /// zero capacity when nothing was occupied.
    pub fn compact(self) -> Self {
        if self.is_full() {
            return self;
        }
        Self {
            slots: self.slots.into_iter().filter(Option::is_some).collect(),
        }
    }

    /// Iterate over the occupied elements in slot order.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            inner: self.slots.iter(),
        }
    }
}

impl<T> FromIterator<T> for FixedVec<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            slots: iter.into_iter().map(Some).collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// Iterators
// ---------------------------------------------------------------------------

/// Borrowing iterator over the occupied slots of a [`FixedVec`].
pub struct Iter<'a, T> {
    inner: std::slice::Iter<'a, Option<T>>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.by_ref().find_map(Option::as_ref)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.inner.size_hint().1)
    }
}

/// Owning iterator over the occupied slots of a [`FixedVec`].
pub struct IntoIter<T> {
    inner: std::vec::IntoIter<Option<T>>,
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.inner.by_ref().flatten().next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.inner.size_hint().1)
    }
}

impl<T> IntoIterator for FixedVec<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> IntoIter<T> {
        IntoIter {
            inner: self.slots.into_iter(),
        }
    }
}

impl<'a, T> IntoIterator for &'a FixedVec<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}
