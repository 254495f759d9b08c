//! Error types for iterflow.
//!
//! Well-formed traversals cannot fail. The only errors are the ones the
//! runtime surfaces around background producers, plus the coverage
//! mismatches reported by [`crate::verify`].

use std::any::Any;
use thiserror::Error;

/// The main error type for iterflow operations.
#[derive(Debug, Error)]
pub enum IterError {
    /// The OS refused to start a producer thread.
    #[error("Failed to spawn producer thread: {0}")]
    Spawn(#[from] std::io::Error),

    /// A producer thread panicked before it could report.
    #[error("Producer thread panicked: {0}")]
    ProducerPanicked(String),

    /// An async producer task was aborted or panicked.
    #[error("Producer task aborted: {0}")]
    ProducerAborted(String),
}

impl IterError {
    /// Builds a [`IterError::ProducerPanicked`] from a thread join payload.
    pub(crate) fn from_panic(payload: &(dyn Any + Send)) -> Self {
        let message = payload
            .downcast_ref::<&str>()
            .map(|s| (*s).to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "unknown panic payload".to_string());
        Self::ProducerPanicked(message)
    }
}

/// Result alias used throughout the crate.
pub type Result<T, E = IterError> = std::result::Result<T, E>;

/// Why a collected result is not a permutation of its universe.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoverageError {
    /// Items were missing or duplicated in bulk.
    #[error("Expected {expected} items, collected {actual}")]
    Length {
        /// Size of the universe.
        expected: usize,
        /// Number of collected items.
        actual: usize,
    },

    /// After sorting, a position held the wrong value.
    #[error("Sorted position {position} holds {value}")]
    Mismatch {
        /// First offending position in sorted order.
        position: usize,
        /// The value found there.
        value: i64,
    },
}
