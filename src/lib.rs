//! # Hyperseq
//!
//! A **composable sequence-processing engine** for Rust. Hyperseq provides a
//! lazy, re-traversable sequence model with operator fusion, capability
//! tiers that let terminals skip work, and an asynchronous mirror with
//! cooperative cancellation.
//!
//! ## Key Features
//!
//! - **Lazy, re-traversable sequences** - every terminal opens a fresh cursor
//! - **Operator fusion** - `map.map`, `filter.filter`, `filter.map`, `take.take`
//!   and `skip.skip` collapse into a single layer at construction time
//! - **Capability tiers** - sequential, countable and random-access sources;
//!   `count`, `any` and `element_at` use the cheapest path the tier allows
//! - **Checked reducers** - `sum` reports overflow, `single` separates
//!   "empty" from "many", map builders report duplicate keys
//! - **Absent values as `Option`** - "not found" is never an error
//! - **Async mirror** (feature: `async`) - the same operators over
//!   [`AsyncSequence`], with a [`CancellationToken`] observed at every
//!   suspension point
//!
//! ## Quick Start
//!
//! ```
//! use hyperseq::*;
//!
//! let data = vec![1, 2, 3, 4, 5];
//! let big = data
//!     .as_seq()
//!     .map(|x: &i32| x * 2)
//!     .filter(|x: &i32| *x > 4);
//!
//! assert_eq!(big.to_vec(), vec![6, 8, 10]);
//! assert_eq!(big.count(), 3);
//! assert_eq!(big.first(), Some(6));
//! ```
//!
//! ## Core Concepts
//!
//! ### Sequence and Cursor
//!
//! A [`Sequence`] is a description of a traversal: it owns or borrows a
//! source plus the transforms layered on it. Each terminal asks for a
//! [`Cursor`], drives it forward, and releases it on every exit path.
//! Sequences are values; building a chain never touches the source.
//!
//! ### Tiers
//!
//! Each sequence names its strongest capability through
//! [`Sequence::Tier`]. Projections and partitions keep their source's tier;
//! filters and flattening drop to [`SequentialTier`]. Terminals dispatch on
//! the tier at compile time through [`TierStrategy`].
//!
//! ### Combinators
//!
//! The [`ops`] module holds the combinator types:
//! - [`map`](SequenceExt::map) / [`map_at`](SequenceExt::map_at) - project each element
//! - [`filter`](SequenceExt::filter) / [`filter_at`](SequenceExt::filter_at) - keep matching elements
//! - [`take`](SequenceExt::take) / [`skip`](SequenceExt::skip) - partition by position
//! - [`flat_map`](SequenceExt::flat_map) - expand each element into a sub-sequence
//!
//! Reusable chains can be packaged with [`extensions::Composite`].
//!
//! ### Terminals
//!
//! The [`reducers`] module implements the terminals exposed on
//! [`SequenceExt`]: counting and summing, quantifiers, element access,
//! and materialization into vectors, maps and caller buffers.
//!
//! ### Read-only views
//!
//! [`ReadOnlyList`] wraps a random-access sequence in a list interface whose
//! mutators fail with [`SeqError::Unsupported`].
//!
//! ## Logging
//!
//! Hyperseq emits [`tracing`] events and never installs a subscriber: `trace`
//! for tier fast paths, `debug` for rejected inputs and cancellation, `warn`
//! for ignored configuration.

pub mod config;
pub mod cursor;
pub mod error;
pub mod extensions;
pub mod ops;
pub mod option;
pub mod reducers;
pub mod sequence;
pub mod sources;
pub mod testing;
pub mod tier;
pub mod view;

#[cfg(feature = "async")]
pub mod asynchronous;

// General re-exports
pub use config::AsyncConfig;
pub use cursor::{Cursor, CursorIter, Traversal};
pub use error::{Cancelled, Result, SeqError};
pub use ops::*;
pub use option::OptionExt;
pub use reducers::{Single, Summable};
pub use sequence::{Sequence, SequenceExt};
pub use sources::*;
pub use tier::{Countable, CountableTier, RandomAccess, RandomAccessTier, SequentialTier, Tier, TierStrategy};
pub use view::{ListMut, ReadOnlyList};

// Gated re-exports
#[cfg(feature = "async")]
pub use asynchronous::{
    AsyncCursor, AsyncSequence, AsyncSequenceExt, CancellationToken, IntoAsync, Lift, StreamSeq, from_stream,
};
