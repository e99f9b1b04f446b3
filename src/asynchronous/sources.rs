//! Async sources: lifted synchronous sequences and stream factories.

use std::fmt;

use futures::{Stream, StreamExt};

use super::{AsyncCursor, AsyncSequence, CancellationToken, checkpoint, race};
use crate::config::AsyncConfig;
use crate::cursor::{Cursor, Slot};
use crate::error::Cancelled;
use crate::sequence::Sequence;

/* ===================== lifted sequences ===================== */

/// A synchronous sequence driven through the async contract.
#[derive(Debug, Clone)]
pub struct Lift<S> {
    source: S,
    yield_every: usize,
}

/// Lifts any [`Sequence`] into the async mirror.
pub trait IntoAsync: Sequence + Sized {
    /// Lifts with the default [`AsyncConfig`].
    fn into_async(self) -> Lift<Self> {
        self.into_async_with(&AsyncConfig::default())
    }

    fn into_async_with(self, config: &AsyncConfig) -> Lift<Self> {
        Lift {
            source: self,
            yield_every: config.yield_every,
        }
    }
}

impl<S: Sequence> IntoAsync for S {}

impl<S> Lift<S> {
    pub fn get_ref(&self) -> &S {
        &self.source
    }
}

impl<S: Sequence> AsyncSequence for Lift<S> {
    type Item = S::Item;
    type Cursor = LiftCursor<S::Cursor>;

    fn cursor(&self) -> Self::Cursor {
        LiftCursor {
            inner: self.source.cursor(),
            yield_every: self.yield_every,
            since_yield: 0,
            stopped: false,
        }
    }
}

pub struct LiftCursor<C: Cursor> {
    inner: C,
    yield_every: usize,
    since_yield: usize,
    stopped: bool,
}

impl<C: Cursor> AsyncCursor for LiftCursor<C> {
    type Item = C::Item;

    async fn advance(&mut self, cancel: &CancellationToken) -> Result<bool, Cancelled> {
        if self.stopped {
            return Ok(false);
        }
        if self.yield_every != 0 {
            self.since_yield += 1;
            if self.since_yield >= self.yield_every {
                self.since_yield = 0;
                tokio::task::yield_now().await;
            }
        }
        if let Err(cancelled) = checkpoint(cancel, "lift") {
            self.stopped = true;
            return Err(cancelled);
        }
        let more = self.inner.advance();
        self.stopped = !more;
        Ok(more)
    }

    fn current(&self) -> &C::Item {
        self.inner.current()
    }

    fn take_current(&mut self) -> C::Item {
        self.inner.take_current()
    }

    async fn release(&mut self) {
        self.inner.release();
    }
}

/// Releases the synchronous cursor when a traversal unwinds before its
/// awaited `release`. Release is idempotent, so the normal path is unaffected.
impl<C: Cursor> Drop for LiftCursor<C> {
    fn drop(&mut self) {
        self.inner.release();
    }
}

/* ===================== streams ===================== */

/// Async source built from a stream factory; every traversal calls the
/// factory once. Streams must be `Unpin` (wrap others with `Box::pin`).
#[derive(Clone)]
pub struct StreamSeq<F> {
    factory: F,
}

pub fn from_stream<F, St>(factory: F) -> StreamSeq<F>
where
    F: Fn() -> St,
    St: Stream + Unpin,
{
    StreamSeq { factory }
}

impl<F> fmt::Debug for StreamSeq<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("StreamSeq")
    }
}

impl<F, St> AsyncSequence for StreamSeq<F>
where
    F: Fn() -> St,
    St: Stream + Unpin,
{
    type Item = St::Item;
    type Cursor = StreamCursor<St>;

    fn cursor(&self) -> Self::Cursor {
        StreamCursor {
            stream: Some((self.factory)()),
            slot: Slot::empty(),
            stopped: false,
        }
    }
}

pub struct StreamCursor<St: Stream> {
    stream: Option<St>,
    slot: Slot<St::Item>,
    stopped: bool,
}

impl<St: Stream + Unpin> StreamCursor<St> {
    async fn step(&mut self, cancel: &CancellationToken) -> Result<bool, Cancelled> {
        let Some(stream) = self.stream.as_mut() else {
            return Ok(false);
        };
        match race(cancel, stream.next()).await? {
            Some(item) => {
                self.slot.set(item);
                Ok(true)
            }
            None => {
                self.slot.clear();
                Ok(false)
            }
        }
    }
}

impl<St: Stream + Unpin> AsyncCursor for StreamCursor<St> {
    type Item = St::Item;

    async fn advance(&mut self, cancel: &CancellationToken) -> Result<bool, Cancelled> {
        if self.stopped {
            return Ok(false);
        }
        let step = match checkpoint(cancel, "stream") {
            Ok(()) => self.step(cancel).await,
            Err(cancelled) => Err(cancelled),
        };
        if !matches!(step, Ok(true)) {
            self.stopped = true;
        }
        step
    }

    fn current(&self) -> &St::Item {
        self.slot.get()
    }

    fn take_current(&mut self) -> St::Item {
        self.slot.take()
    }

    async fn release(&mut self) {
        self.stream = None;
        self.slot.clear();
    }
}
