//! # Iterflow
//!
//! Iteration protocols over a fixed backing collection.
//!
//! Each protocol hands control of the traversal to a different party:
//!
//! - **Continuations**: the caller pulls one item at a time and holds a
//!   single-use cursor for the rest ([`continuation`])
//! - **Visitors**: the container pushes every item into a callback on the
//!   caller's thread ([`visitor`])
//! - **Channels**: a background producer pushes items through a rendezvous
//!   channel, optionally cancelled through a [`CancellationToken`] ([`channel`])
//! - **Async streams**: the channel protocol on the tokio runtime ([`stream`])
//!
//! Two backing containers are provided: the ordered [`Sequence`] and the
//! unordered [`KeySet`].
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use iterflow::prelude::*;
//!
//! let sequence = Sequence::iota(1024);
//!
//! // Pull
//! let mut next = continuation::start(&sequence);
//! while let Some(cursor) = next {
//!     let (item, rest) = cursor.next();
//!     next = rest;
//! }
//!
//! // Push, with early cancellation
//! let cancel = CancellationToken::new();
//! let mut items = channel::stream(sequence, Some(cancel.clone()))?;
//! let first = items.next();
//! cancel.cancel("enough");
//! let report = items.finish()?;
//! ```

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    missing_docs,
    rust_2018_idioms
)]
#![allow(
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc
)]

pub mod cancellation;
pub mod channel;
pub mod config;
pub mod container;
pub mod continuation;
pub mod errors;
pub mod observability;
mod producer;
pub mod stream;
pub mod testing;
pub mod verify;
pub mod visitor;

pub use producer::{ProducerReport, StopReason};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::cancellation::CancellationToken;
    pub use crate::channel::{self, ItemReceiver};
    pub use crate::config::TraversalConfig;
    pub use crate::container::{Container, KeySet, Sequence};
    pub use crate::continuation::{self, Continuation, KeyCursor, SliceCursor};
    pub use crate::errors::{CoverageError, IterError};
    pub use crate::stream::{self, AsyncItemStream};
    pub use crate::verify::{check_permutation, verify_permutation};
    pub use crate::visitor;
    pub use crate::{ProducerReport, StopReason};
}

pub use cancellation::CancellationToken;
pub use container::{Container, KeySet, Sequence};
pub use errors::{IterError, Result};
