//! Channel iteration backed by a producer thread.
//!
//! The producer sends every item through a zero-capacity channel, so it is
//! never more than one item ahead of the consumer. With a
//! [`CancellationToken`] the producer races each send against the token and
//! gives up as soon as it is cancelled.
//!
//! Without a token the producer only stops when the container is exhausted
//! or the [`ItemReceiver`] is dropped. A consumer that keeps the receiver but
//! stops reading leaves that producer parked on its send.

use crate::cancellation::CancellationToken;
use crate::config::TraversalConfig;
use crate::container::Container;
use crate::errors::Result;
use crate::producer::{self, ProducerReport};
use crossbeam::channel::Receiver;
use std::thread::JoinHandle;

/// Streams every item of `container` through a rendezvous channel.
///
/// Pass `None` for an uncancellable stream.
pub fn stream<C: Container>(container: C, cancel: Option<CancellationToken>) -> Result<ItemReceiver> {
    stream_with_config(container, cancel, &TraversalConfig::default())
}

/// Like [`stream`], with explicit producer configuration.
pub fn stream_with_config<C: Container>(
    container: C,
    cancel: Option<CancellationToken>,
    config: &TraversalConfig,
) -> Result<ItemReceiver> {
    let (rx, handle) = producer::spawn(container, cancel.clone(), config)?;
    Ok(ItemReceiver {
        rx,
        cancel,
        handle,
    })
}

/// Receiving end of a channel traversal.
///
/// Iterating yields items until the producer closes the channel. Once the
/// token is cancelled no further items are yielded.
pub struct ItemReceiver {
    rx: Receiver<i64>,
    cancel: Option<CancellationToken>,
    handle: JoinHandle<ProducerReport>,
}

impl ItemReceiver {
    /// Returns the token this stream observes, if any.
    #[must_use]
    pub fn cancel_token(&self) -> Option<&CancellationToken> {
        self.cancel.as_ref()
    }

    /// Returns true once the producer thread has exited.
    #[must_use]
    pub fn is_producer_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Stops receiving and waits for the producer to exit.
    ///
    /// Remaining items are abandoned; an uncancelled producer sees the
    /// channel disconnect.
    pub fn finish(self) -> Result<ProducerReport> {
        let Self { rx, handle, .. } = self;
        drop(rx);
        producer::join(handle)
    }
}

impl Iterator for ItemReceiver {
    type Item = i64;

    fn next(&mut self) -> Option<i64> {
        if self.cancel.as_ref().is_some_and(CancellationToken::is_cancelled) {
            return None;
        }
        self.rx.recv().ok()
    }
}

impl std::fmt::Debug for ItemReceiver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ItemReceiver")
            .field("cancel", &self.cancel)
            .field("producer_finished", &self.is_producer_finished())
            .finish_non_exhaustive()
    }
}
