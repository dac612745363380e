//! A fixed-capacity double-ended queue of small integer identifiers,
//! plus the label-correcting shortest path search it was built for.
//!
//! Internally, the deque keeps one link slot per identifier in a `Vec`
//! that is allocated once. The identifiers double as indices into that
//! `Vec`: the slot for an identifier holds the identifier behind it.
//! This makes every operation O(1) and lets one allocation be reused for
//! many searches, at the cost of only accepting identifiers below the
//! capacity and at most one occurrence of each.
//!
//! The deque is a plain sequential structure. Wrap it in a lock if it has
//! to be shared between threads.

mod deque;
mod error;
mod network;
mod path;
mod slot;

pub use crate::deque::IndexDeque;
pub use crate::error::{Error, Result};
pub use crate::network::Network;
pub use crate::path::{Method, PathEngine, ShortestPaths};
