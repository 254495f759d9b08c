//! Shared read-only fixtures.

use crate::container::{KeySet, Sequence};

/// Universe size used by the standard fixture and the benches.
pub const STANDARD_SIZE: usize = 16 << 10;

/// A fixed universe `0..size`, available both as a [`Sequence`] and a
/// [`KeySet`].
///
/// Built explicitly and passed to each traversal; clones share storage.
#[derive(Debug, Clone)]
pub struct Universe {
    size: usize,
    sequence: Sequence,
    keys: KeySet,
}

impl Universe {
    /// Creates a universe of `size` items.
    #[must_use]
    pub fn new(size: usize) -> Self {
        Self {
            size,
            sequence: Sequence::iota(size),
            keys: KeySet::iota(size),
        }
    }

    /// Creates a universe of [`STANDARD_SIZE`] items.
    #[must_use]
    pub fn standard() -> Self {
        Self::new(STANDARD_SIZE)
    }

    /// Number of items.
    #[must_use]
    pub fn size(&self) -> usize {
        self.size
    }

    /// The universe as an ordered sequence.
    #[must_use]
    pub fn sequence(&self) -> &Sequence {
        &self.sequence
    }

    /// The universe as an unordered key set.
    #[must_use]
    pub fn keys(&self) -> &KeySet {
        &self.keys
    }
}

impl Default for Universe {
    fn default() -> Self {
        Self::standard()
    }
}
