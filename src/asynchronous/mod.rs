//! Asynchronous mirror of the sequence model.
//!
//! Same shapes as the synchronous side: an [`AsyncCursor`] is one forward-only
//! traversal, an [`AsyncSequence`] hands out cursors, and
//! [`AsyncSequenceExt`] carries the combinators and terminals. The
//! differences:
//!
//! - `advance` is a future and takes a [`CancellationToken`]. Every
//!   suspension point checks the token before doing any work and races the
//!   work against it. A signalled token resolves the pending advance to
//!   `Err(Cancelled)`; later advances on the same cursor resolve `Ok(false)`.
//! - transforms and predicates are async and receive the token.
//! - `release` is a future. Terminals await it on every exit path, including
//!   errors and cancellation.
//!
//! Sources: lift any synchronous sequence with [`IntoAsync::into_async`], or
//! wrap a [`futures::Stream`] factory with [`from_stream`].

mod ext;
mod ops;
pub mod reducers;
mod sources;

pub use ext::*;
pub use ops::*;
pub use sources::*;

use std::future::Future;

pub use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::error::Cancelled;

/// One asynchronous forward-only traversal.
pub trait AsyncCursor {
    type Item;

    /// Moves to the next element. Resolves `Ok(false)` once exhausted,
    /// `Err(Cancelled)` when `cancel` is observed, and `Ok(false)` on every
    /// call after either.
    fn advance(&mut self, cancel: &CancellationToken) -> impl Future<Output = Result<bool, Cancelled>>;

    /// # Panics
    /// Without a preceding `Ok(true)` from [`advance`](AsyncCursor::advance).
    fn current(&self) -> &Self::Item;

    fn take_current(&mut self) -> Self::Item;

    /// Frees whatever the traversal holds. Idempotent.
    fn release(&mut self) -> impl Future<Output = ()> {
        async {}
    }
}

/// A re-traversable asynchronous source.
pub trait AsyncSequence {
    type Item;
    type Cursor: AsyncCursor<Item = Self::Item>;

    fn cursor(&self) -> Self::Cursor;
}

/// Async one-argument transform; receives the traversal's token.
pub trait AsyncSelector<In> {
    type Out;
    fn apply(&self, input: In, cancel: CancellationToken) -> impl Future<Output = Self::Out>;
}

impl<In, Out, Fut, F> AsyncSelector<In> for F
where
    F: Fn(In, CancellationToken) -> Fut,
    Fut: Future<Output = Out>,
{
    type Out = Out;

    fn apply(&self, input: In, cancel: CancellationToken) -> impl Future<Output = Out> {
        self(input, cancel)
    }
}

/// Async transform that also receives the element's position.
pub trait AsyncSelectorAt<In> {
    type Out;
    fn apply(&self, input: In, index: usize, cancel: CancellationToken) -> impl Future<Output = Self::Out>;
}

impl<In, Out, Fut, F> AsyncSelectorAt<In> for F
where
    F: Fn(In, usize, CancellationToken) -> Fut,
    Fut: Future<Output = Out>,
{
    type Out = Out;

    fn apply(&self, input: In, index: usize, cancel: CancellationToken) -> impl Future<Output = Out> {
        self(input, index, cancel)
    }
}

/// Runs `work` unless `cancel` is (or becomes) signalled first.
pub(crate) async fn race<F: Future>(cancel: &CancellationToken, work: F) -> Result<F::Output, Cancelled> {
    if cancel.is_cancelled() {
        return Err(Cancelled);
    }
    tokio::select! {
        biased;
        () = cancel.cancelled() => Err(Cancelled),
        out = work => Ok(out),
    }
}

/// Predicate accepting every element.
pub(crate) fn always<T>(_: &T, _: CancellationToken) -> std::future::Ready<bool> {
    std::future::ready(true)
}

/// Cancellation check at the top of every `advance`.
#[inline]
pub(crate) fn checkpoint(cancel: &CancellationToken, stage: &'static str) -> Result<(), Cancelled> {
    if cancel.is_cancelled() {
        debug!(stage, "cancellation observed");
        Err(Cancelled)
    } else {
        Ok(())
    }
}
