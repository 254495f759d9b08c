//! Continuation-passing iteration.
//!
//! A traversal starts with an `Option` of a cursor. Calling
//! [`Continuation::next`] consumes the cursor and yields one item together
//! with the cursor for the rest, or `None` once the item was the last one.
//! Cursors are not `Clone`: each one can be invoked exactly once.
//!
//! ```rust,ignore
//! let mut next = continuation::start(&sequence);
//! while let Some(cursor) = next {
//!     let (item, rest) = cursor.next();
//!     next = rest;
//! }
//! ```

use crate::cancellation::CancellationToken;
use crate::config::TraversalConfig;
use crate::container::{Container, KeySet, Sequence};
use crate::errors::Result;
use crate::producer::{self, ProducerReport};
use crossbeam::channel::Receiver;
use std::thread::JoinHandle;
use tracing::{debug, warn};

/// A single-use cursor over the rest of a traversal.
pub trait Continuation: Sized {
    /// Yields the current item and the continuation for the rest.
    fn next(self) -> (i64, Option<Self>);

    /// Abandons the traversal, releasing whatever the cursor holds.
    fn stop(self) {}

    /// Two-phase step: `more == true` behaves like [`next`](Self::next);
    /// `more == false` stops the traversal and returns `None`.
    fn advance(self, more: bool) -> Option<(i64, Option<Self>)> {
        if more {
            Some(self.next())
        } else {
            self.stop();
            None
        }
    }
}

/// Starts a traversal of `sequence` in index order.
///
/// Returns `None` for an empty sequence.
pub fn start(sequence: &Sequence) -> Option<SliceCursor<'_>> {
    SliceCursor::new(sequence.as_slice())
}

/// Cursor over a slice: the slice and the index of the next item.
#[derive(Debug)]
pub struct SliceCursor<'a> {
    items: &'a [i64],
    position: usize,
}

impl<'a> SliceCursor<'a> {
    /// Creates a cursor at the start of `items`, or `None` if it is empty.
    #[must_use]
    pub fn new(items: &'a [i64]) -> Option<Self> {
        (!items.is_empty()).then_some(Self { items, position: 0 })
    }

    /// Index of the item the next call yields.
    #[must_use]
    pub fn position(&self) -> usize {
        self.position
    }
}

impl Continuation for SliceCursor<'_> {
    fn next(self) -> (i64, Option<Self>) {
        let item = self.items[self.position];
        let position = self.position + 1;
        let rest = (position < self.items.len()).then_some(Self {
            items: self.items,
            position,
        });
        (item, rest)
    }
}

/// Starts a traversal of `keys` in unspecified order.
///
/// See [`start_keys_with_config`].
pub fn start_keys(keys: &KeySet) -> Result<Option<KeyCursor>> {
    start_keys_with_config(keys, &TraversalConfig::default())
}

/// Starts a traversal of `keys` backed by a producer thread.
///
/// Blocks until the first item is available. Returns `Ok(None)` for an
/// empty set without spawning anything.
pub fn start_keys_with_config(
    keys: &KeySet,
    config: &TraversalConfig,
) -> Result<Option<KeyCursor>> {
    if keys.is_empty() {
        return Ok(None);
    }

    let cancel = CancellationToken::new();
    let (rx, handle) = producer::spawn(keys.clone(), Some(cancel.clone()), config)?;
    match rx.recv() {
        Ok(lookahead) => Ok(Some(KeyCursor {
            lookahead,
            rx,
            cancel,
            handle: Some(handle),
        })),
        Err(_) => {
            // Closed before the first item: only a panicking producer does that.
            let report = producer::join(handle)?;
            debug!(sent = report.sent, "Key producer closed before first item");
            Ok(None)
        }
    }
}

/// Cursor over a [`KeySet`], fed by a producer thread.
///
/// The cursor always holds the next item in its lookahead slot, so it knows
/// an item is the last one before handing it out. Dropping the cursor, or
/// calling [`Continuation::stop`], cancels the producer and joins it.
pub struct KeyCursor {
    lookahead: i64,
    rx: Receiver<i64>,
    cancel: CancellationToken,
    handle: Option<JoinHandle<ProducerReport>>,
}

impl KeyCursor {
    fn release(&mut self) {
        let Some(handle) = self.handle.take() else {
            return;
        };
        self.cancel.cancel("key cursor released");
        match producer::join(handle) {
            Ok(report) => debug!(sent = report.sent, reason = ?report.reason, "Key cursor released"),
            Err(e) => warn!(error = %e, "Key producer failed"),
        }
    }
}

impl Continuation for KeyCursor {
    fn next(mut self) -> (i64, Option<Self>) {
        let item = self.lookahead;
        match self.rx.recv() {
            Ok(lookahead) => {
                self.lookahead = lookahead;
                (item, Some(self))
            }
            Err(_) => (item, None),
        }
    }

    fn stop(self) {
        drop(self);
    }
}

impl Drop for KeyCursor {
    fn drop(&mut self) {
        self.release();
    }
}

impl std::fmt::Debug for KeyCursor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyCursor")
            .field("lookahead", &self.lookahead)
            .field("cancelled", &self.cancel.is_cancelled())
            .finish_non_exhaustive()
    }
}
