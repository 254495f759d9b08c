//! Testing utilities for traversal protocols.
//!
//! This module provides:
//! - An immutable fixture holding both backing containers
//! - Assertions on collected traversal results

mod assertions;
mod fixtures;

pub use assertions::{assert_covers, assert_in_order, assert_producer_finishes};
pub use fixtures::{Universe, STANDARD_SIZE};
