//! Channel iteration on the tokio runtime.
//!
//! Same protocol as [`crate::channel`], with a spawned task instead of a
//! thread. tokio channels cannot have zero capacity, so the producer may run
//! one item ahead of the consumer.

use crate::cancellation::CancellationToken;
use crate::container::Container;
use crate::errors::{IterError, Result};
use crate::producer::{ProducerReport, StopReason};
use futures::Stream;
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

/// Streams every item of `container` from a tokio task.
///
/// Must be called from within a tokio runtime.
pub fn stream_async<C: Container>(container: C, cancel: Option<CancellationToken>) -> AsyncItemStream {
    let (tx, rx) = mpsc::channel(1);
    let handle = tokio::spawn(produce(container, tx, cancel.clone()));
    AsyncItemStream { rx, cancel, handle }
}

async fn produce<C: Container>(
    container: C,
    tx: mpsc::Sender<i64>,
    cancel: Option<CancellationToken>,
) -> ProducerReport {
    let mut sent = 0;
    let mut reason = StopReason::Exhausted;

    for item in container.iter() {
        let outcome = match &cancel {
            None => tx.send(item).await.map_err(|_| StopReason::Disconnected),
            Some(token) => tokio::select! {
                biased;
                _ = token.cancelled() => Err(StopReason::Cancelled),
                res = tx.send(item) => res.map_err(|_| StopReason::Disconnected),
            },
        };
        if let Err(stopped) = outcome {
            reason = stopped;
            break;
        }
        sent += 1;
    }

    debug!(sent, reason = ?reason, "Async producer finished");
    ProducerReport { sent, reason }
}

/// Receiving end of an async channel traversal.
pub struct AsyncItemStream {
    rx: mpsc::Receiver<i64>,
    cancel: Option<CancellationToken>,
    handle: JoinHandle<ProducerReport>,
}

impl AsyncItemStream {
    /// Returns true once the producer task has exited.
    #[must_use]
    pub fn is_producer_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Stops receiving and waits for the producer task to exit.
    pub async fn finish(self) -> Result<ProducerReport> {
        let Self { mut rx, handle, .. } = self;
        rx.close();
        drop(rx);
        handle
            .await
            .map_err(|e| IterError::ProducerAborted(e.to_string()))
    }
}

impl Stream for AsyncItemStream {
    type Item = i64;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<i64>> {
        if self.cancel.as_ref().is_some_and(CancellationToken::is_cancelled) {
            return Poll::Ready(None);
        }
        self.rx.poll_recv(cx)
    }
}

impl std::fmt::Debug for AsyncItemStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AsyncItemStream")
            .field("cancel", &self.cancel)
            .field("producer_finished", &self.is_producer_finished())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::{KeySet, Sequence};
    use crate::verify::verify_permutation;
    use futures::StreamExt;
    use pretty_assertions::assert_eq;
    use std::time::Duration;

    #[tokio::test]
    async fn test_async_sequence_in_order() {
        let items: Vec<_> = stream_async(Sequence::iota(512), None).collect().await;
        assert_eq!(items, (0..512).collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn test_async_keys_covers_set() {
        let items: Vec<_> = stream_async(KeySet::iota(512), None).collect().await;
        assert!(verify_permutation(&items, 512));
    }

    #[tokio::test]
    async fn test_async_empty() {
        let mut items = stream_async(Sequence::iota(0), None);
        assert_eq!(items.next().await, None);
        assert_eq!(items.finish().await.unwrap().sent, 0);
    }

    #[tokio::test]
    async fn test_async_cancel_after_k_items() {
        let cancel = CancellationToken::new();
        let mut items = stream_async(Sequence::iota(1000), Some(cancel.clone()));

        for expected in 0..3 {
            assert_eq!(items.next().await, Some(expected));
        }
        cancel.cancel("done");
        assert_eq!(items.next().await, None);

        let report = tokio::time::timeout(Duration::from_secs(1), items.finish())
            .await
            .expect("producer should exit")
            .unwrap();
        assert_eq!(report.reason, StopReason::Cancelled);
        // One slot of buffering: at most one item beyond those received.
        assert!((3..=4).contains(&report.sent));
    }

    #[tokio::test]
    async fn test_async_finish_disconnects_uncancellable() {
        let mut items = stream_async(Sequence::iota(1000), None);
        assert_eq!(items.next().await, Some(0));

        let report = items.finish().await.unwrap();
        assert_eq!(report.reason, StopReason::Disconnected);
    }
}
