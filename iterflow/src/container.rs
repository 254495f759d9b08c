//! Backing containers.
//!
//! Both containers are immutable once built and share their storage through
//! an `Arc`, so handing a clone to a producer thread never copies elements.

use std::collections::{hash_set, HashSet};
use std::iter::Copied;
use std::slice;
use std::sync::Arc;

/// A fixed collection that can be traversed any number of times.
///
/// Traversal order is whatever [`Container::iter`] yields; it is stable for
/// [`Sequence`] and unspecified for [`KeySet`].
pub trait Container: Clone + Send + Sync + 'static {
    /// Item iterator borrowed from the container.
    type Iter<'a>: Iterator<Item = i64> + Send
    where
        Self: 'a;

    /// Returns the number of items.
    fn len(&self) -> usize;

    /// Returns true if there are no items.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterates over every item once.
    fn iter(&self) -> Self::Iter<'_>;

    /// Calls `visit` on each item until it returns `false`.
    ///
    /// Returns true if every item was visited.
    fn traverse<F>(&self, visit: F) -> bool
    where
        F: FnMut(i64) -> bool,
    {
        self.iter().all(visit)
    }
}

/// An ordered, fixed-length list of integers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sequence {
    items: Arc<[i64]>,
}

impl Sequence {
    /// Creates the sequence `0, 1, ..., len - 1`.
    #[must_use]
    pub fn iota(len: usize) -> Self {
        (0..len as i64).collect()
    }

    /// Returns the items as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[i64] {
        &self.items
    }

    /// Returns the item at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<i64> {
        self.items.get(index).copied()
    }
}

impl From<Vec<i64>> for Sequence {
    fn from(items: Vec<i64>) -> Self {
        Self { items: items.into() }
    }
}

impl FromIterator<i64> for Sequence {
    fn from_iter<I: IntoIterator<Item = i64>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl Container for Sequence {
    type Iter<'a> = Copied<slice::Iter<'a, i64>>;

    fn len(&self) -> usize {
        self.items.len()
    }

    fn iter(&self) -> Self::Iter<'_> {
        self.items.iter().copied()
    }
}

/// An unordered set of unique integers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeySet {
    keys: Arc<HashSet<i64>>,
}

impl KeySet {
    /// Creates the set `{0, 1, ..., len - 1}`.
    #[must_use]
    pub fn iota(len: usize) -> Self {
        (0..len as i64).collect()
    }

    /// Returns true if `key` is in the set.
    #[must_use]
    pub fn contains(&self, key: i64) -> bool {
        self.keys.contains(&key)
    }
}

impl From<HashSet<i64>> for KeySet {
    fn from(keys: HashSet<i64>) -> Self {
        Self { keys: Arc::new(keys) }
    }
}

impl FromIterator<i64> for KeySet {
    fn from_iter<I: IntoIterator<Item = i64>>(iter: I) -> Self {
        iter.into_iter().collect::<HashSet<_>>().into()
    }
}

impl Container for KeySet {
    type Iter<'a> = Copied<hash_set::Iter<'a, i64>>;

    fn len(&self) -> usize {
        self.keys.len()
    }

    fn iter(&self) -> Self::Iter<'_> {
        self.keys.iter().copied()
    }
}
