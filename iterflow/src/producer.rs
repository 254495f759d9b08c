//! Background producer threads feeding a rendezvous channel.

use crate::cancellation::CancellationToken;
use crate::config::TraversalConfig;
use crate::container::Container;
use crate::errors::{IterError, Result};
use crossbeam::channel::{self, select, Receiver, Sender};
use serde::Serialize;
use std::thread::JoinHandle;
use tracing::debug;

/// Why a producer stopped sending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// Every item was delivered.
    Exhausted,
    /// The cancellation gate closed first.
    Cancelled,
    /// The consumer dropped its end of the channel.
    Disconnected,
}

/// What a producer did before it exited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProducerReport {
    /// Items handed to the consumer.
    pub sent: usize,
    /// Why the producer stopped.
    pub reason: StopReason,
}

impl ProducerReport {
    /// Returns true if every item was delivered.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.reason == StopReason::Exhausted
    }
}

/// Spawns a producer thread that sends every item of `container` into a
/// zero-capacity channel, then closes it.
pub(crate) fn spawn<C: Container>(
    container: C,
    cancel: Option<CancellationToken>,
    config: &TraversalConfig,
) -> Result<(Receiver<i64>, JoinHandle<ProducerReport>)> {
    let (tx, rx) = channel::bounded(0);
    let len = container.len();
    let cancellable = cancel.is_some();
    let handle = config
        .thread_builder()
        .spawn(move || produce(&container, &tx, cancel.as_ref()))?;

    debug!(len, cancellable, thread = %config.thread_name, "Producer spawned");
    Ok((rx, handle))
}

/// Runs on the producer thread. Dropping `tx` on return closes the channel.
fn produce<C: Container>(
    container: &C,
    tx: &Sender<i64>,
    cancel: Option<&CancellationToken>,
) -> ProducerReport {
    let mut sent = 0;
    let mut reason = StopReason::Exhausted;

    container.traverse(|item| {
        let outcome = match cancel {
            None => tx.send(item).map_err(|_| StopReason::Disconnected),
            Some(token) => send_or_cancel(tx, item, token),
        };
        match outcome {
            Ok(()) => {
                sent += 1;
                true
            }
            Err(stopped) => {
                reason = stopped;
                false
            }
        }
    });

    debug!(sent, reason = ?reason, "Producer finished");
    ProducerReport { sent, reason }
}

/// Races one send against the cancellation gate. Cancellation wins ties.
fn send_or_cancel(
    tx: &Sender<i64>,
    item: i64,
    token: &CancellationToken,
) -> std::result::Result<(), StopReason> {
    if token.is_cancelled() {
        return Err(StopReason::Cancelled);
    }
    select! {
        recv(token.signal()) -> _ => Err(StopReason::Cancelled),
        send(tx, item) -> res => res.map_err(|_| StopReason::Disconnected),
    }
}

/// Joins a producer thread, turning a panic into an error.
pub(crate) fn join(handle: JoinHandle<ProducerReport>) -> Result<ProducerReport> {
    handle
        .join()
        .map_err(|payload| IterError::from_panic(payload.as_ref()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::{KeySet, Sequence};
    use pretty_assertions::assert_eq;
    use std::time::Duration;

    #[test]
    fn test_producer_exhausts_sequence() {
        let (rx, handle) = spawn(Sequence::iota(8), None, &TraversalConfig::default()).unwrap();
        let items: Vec<_> = rx.iter().collect();

        assert_eq!(items, (0..8).collect::<Vec<_>>());
        let report = join(handle).unwrap();
        assert_eq!(report, ProducerReport { sent: 8, reason: StopReason::Exhausted });
        assert!(report.is_exhausted());
    }

    #[test]
    fn test_producer_empty_closes_immediately() {
        let (rx, handle) = spawn(KeySet::iota(0), None, &TraversalConfig::default()).unwrap();
        assert!(rx.recv().is_err());
        assert_eq!(join(handle).unwrap().sent, 0);
    }

    #[test]
    fn test_producer_stops_when_receiver_dropped() {
        let (rx, handle) = spawn(Sequence::iota(100), None, &TraversalConfig::default()).unwrap();
        assert_eq!(rx.recv().unwrap(), 0);
        drop(rx);

        let report = join(handle).unwrap();
        assert_eq!(report.reason, StopReason::Disconnected);
        assert_eq!(report.sent, 1);
    }

    #[test]
    fn test_producer_cancelled_while_blocked() {
        let token = CancellationToken::new();
        let (rx, handle) = spawn(
            Sequence::iota(100),
            Some(token.clone()),
            &TraversalConfig::default(),
        )
        .unwrap();
        assert_eq!(rx.recv().unwrap(), 0);

        // Let the producer park on its next send.
        std::thread::sleep(Duration::from_millis(20));
        token.cancel("test");

        let report = join(handle).unwrap();
        assert_eq!(report.reason, StopReason::Cancelled);
        assert_eq!(report.sent, 1);
        assert!(rx.recv().is_err());
    }

    #[test]
    fn test_producer_cancelled_before_first_send() {
        let token = CancellationToken::new();
        token.cancel("never started");
        let (rx, handle) = spawn(
            Sequence::iota(10),
            Some(token),
            &TraversalConfig::default(),
        )
        .unwrap();

        assert!(rx.recv().is_err());
        assert_eq!(
            join(handle).unwrap(),
            ProducerReport { sent: 0, reason: StopReason::Cancelled }
        );
    }

    #[test]
    fn test_join_reports_panic() {
        let handle = std::thread::spawn(|| -> ProducerReport { panic!("producer blew up") });
        let err = join(handle).unwrap_err();
        assert!(matches!(err, IterError::ProducerPanicked(ref m) if m == "producer blew up"));
    }

    #[test]
    fn test_report_serializes() {
        let report = ProducerReport { sent: 3, reason: StopReason::Cancelled };
        let json = serde_json::to_value(report).unwrap();
        assert_eq!(json, serde_json::json!({"sent": 3, "reason": "cancelled"}));
    }
}
