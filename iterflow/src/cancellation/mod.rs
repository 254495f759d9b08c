//! Cooperative cancellation.
//!
//! A [`CancellationToken`] is a write-once gate shared between a consumer and
//! the background producer it wants to stop.

mod token;

pub use token::CancellationToken;
