//! Cancellation token for cooperative cancellation.

use crossbeam::channel::{self, Receiver, Sender};
use parking_lot::{Mutex, RwLock};
use std::convert::Infallible;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::Notify;

struct Inner {
    /// Whether cancellation has been requested.
    cancelled: AtomicBool,
    /// The reason for cancellation (first one wins).
    reason: RwLock<Option<String>>,
    /// Dropped on cancellation, which disconnects `signal`.
    gate: Mutex<Option<Sender<Infallible>>>,
    /// Never carries a value; only ever observed as disconnected.
    signal: Receiver<Infallible>,
    /// Wakes async waiters.
    notify: Notify,
}

/// A write-once gate for cooperative cancellation.
///
/// Clones share the same gate. Cancellation is idempotent - only the first
/// cancellation reason is kept. Producers observe it either by polling
/// [`is_cancelled`](Self::is_cancelled), by selecting on the signal channel,
/// or by awaiting [`cancelled`](Self::cancelled).
#[derive(Clone)]
pub struct CancellationToken {
    inner: Arc<Inner>,
}

impl CancellationToken {
    /// Creates a new, open token.
    #[must_use]
    pub fn new() -> Self {
        let (gate, signal) = channel::bounded(0);
        Self {
            inner: Arc::new(Inner {
                cancelled: AtomicBool::new(false),
                reason: RwLock::new(None),
                gate: Mutex::new(Some(gate)),
                signal,
                notify: Notify::new(),
            }),
        }
    }

    /// Requests cancellation with a reason.
    ///
    /// This is idempotent - only the first reason is kept.
    pub fn cancel(&self, reason: impl Into<String>) {
        {
            let mut slot = self.inner.reason.write();
            if self.inner.cancelled.load(Ordering::SeqCst) {
                return;
            }
            *slot = Some(reason.into());
            self.inner.cancelled.store(true, Ordering::SeqCst);
        }

        // Closing the gate disconnects every select waiting on `signal`.
        self.inner.gate.lock().take();
        self.inner.notify.notify_waiters();
    }

    /// Returns whether cancellation has been requested.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.inner.cancelled.load(Ordering::SeqCst)
    }

    /// Returns the cancellation reason, if any.
    #[must_use]
    pub fn reason(&self) -> Option<String> {
        self.inner.reason.read().clone()
    }

    /// Completes once the token is cancelled.
    pub async fn cancelled(&self) {
        loop {
            let notified = self.inner.notify.notified();
            if self.is_cancelled() {
                return;
            }
            notified.await;
        }
    }

    /// Channel that becomes disconnected when the token is cancelled.
    pub(crate) fn signal(&self) -> &Receiver<Infallible> {
        &self.inner.signal
    }
}

impl Default for CancellationToken {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for CancellationToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CancellationToken")
            .field("cancelled", &self.is_cancelled())
            .field("reason", &self.reason())
            .finish()
    }
}
