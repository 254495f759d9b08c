//! Test assertions for traversal results.

use crate::channel::ItemReceiver;
use crate::verify::check_permutation;
use std::time::{Duration, Instant};

use super::Universe;

/// Asserts that `items` are exactly `0..items.len()` in order.
pub fn assert_in_order(items: &[i64]) {
    if let Some((position, value)) = items
        .iter()
        .enumerate()
        .find(|&(position, &value)| i64::try_from(position).map_or(true, |p| p != value))
    {
        panic!("Expected items in index order, position {position} holds {value}");
    }
}

/// Asserts that `items` visit every element of `universe` exactly once.
pub fn assert_covers(universe: &Universe, items: &[i64]) {
    if let Err(e) = check_permutation(items, universe.size()) {
        panic!("Expected full coverage of {} items: {e}", universe.size());
    }
}

/// Asserts that the producer behind `receiver` exits within `timeout`.
pub fn assert_producer_finishes(receiver: &ItemReceiver, timeout: Duration) {
    let deadline = Instant::now() + timeout;
    while !receiver.is_producer_finished() {
        assert!(
            Instant::now() < deadline,
            "Expected producer to finish within {timeout:?}"
        );
        std::thread::sleep(Duration::from_millis(1));
    }
}
