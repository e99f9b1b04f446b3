//! Async combinators.

use std::fmt;
use std::future::Future;
use std::marker::PhantomData;

use super::{AsyncCursor, AsyncSelector, AsyncSelectorAt, AsyncSequence, CancellationToken, always, checkpoint, race, reducers};
use crate::cursor::Slot;
use crate::error::{Cancelled, Result};
use crate::option::OptionExt;

/// Shared `advance` shape: latch after exhaustion or cancellation, check the
/// token, then run the cursor's own `step`.
macro_rules! latched {
    ($cursor:ident, $cancel:ident, $stage:literal) => {{
        if $cursor.stopped {
            return Ok(false);
        }
        let step = match checkpoint($cancel, $stage) {
            Ok(()) => $cursor.step($cancel).await,
            Err(cancelled) => Err(cancelled),
        };
        if !matches!(step, Ok(true)) {
            $cursor.stopped = true;
        }
        step
    }};
}

/* ===================== AsyncCompose ===================== */

/// `second(first(x))` for async transforms, both awaited in order.
#[derive(Debug, Clone, Copy)]
pub struct AsyncCompose<F, G> {
    first: F,
    second: G,
}

impl<In, F, G> AsyncSelector<In> for AsyncCompose<F, G>
where
    F: AsyncSelector<In>,
    G: AsyncSelector<F::Out>,
{
    type Out = G::Out;

    async fn apply(&self, input: In, cancel: CancellationToken) -> G::Out {
        let mid = self.first.apply(input, cancel.clone()).await;
        self.second.apply(mid, cancel).await
    }
}

/// `second(first(x, i))`: indexed async transform followed by a plain one.
#[derive(Debug, Clone, Copy)]
pub struct AsyncComposeAt<F, G> {
    first: F,
    second: G,
}

impl<In, F, G> AsyncSelectorAt<In> for AsyncComposeAt<F, G>
where
    F: AsyncSelectorAt<In>,
    G: AsyncSelector<F::Out>,
{
    type Out = G::Out;

    async fn apply(&self, input: In, index: usize, cancel: CancellationToken) -> G::Out {
        let mid = self.first.apply(input, index, cancel.clone()).await;
        self.second.apply(mid, cancel).await
    }
}

/// `second(first(x), i)`: plain async transform followed by an indexed one.
#[derive(Debug, Clone, Copy)]
pub struct AsyncComposeThenAt<F, G> {
    first: F,
    second: G,
}

impl<In, F, G> AsyncSelectorAt<In> for AsyncComposeThenAt<F, G>
where
    F: AsyncSelector<In>,
    G: AsyncSelectorAt<F::Out>,
{
    type Out = G::Out;

    async fn apply(&self, input: In, index: usize, cancel: CancellationToken) -> G::Out {
        let mid = self.first.apply(input, cancel.clone()).await;
        self.second.apply(mid, index, cancel).await
    }
}

/// `second(first(x, i), i)`.
#[derive(Debug, Clone, Copy)]
pub struct AsyncComposeAtAt<F, G> {
    first: F,
    second: G,
}

impl<In, F, G> AsyncSelectorAt<In> for AsyncComposeAtAt<F, G>
where
    F: AsyncSelectorAt<In>,
    G: AsyncSelectorAt<F::Out>,
{
    type Out = G::Out;

    async fn apply(&self, input: In, index: usize, cancel: CancellationToken) -> G::Out {
        let mid = self.first.apply(input, index, cancel.clone()).await;
        self.second.apply(mid, index, cancel).await
    }
}

/* ===================== AsyncMap ===================== */

#[derive(Debug, Clone)]
pub struct AsyncMap<S, F> {
    source: S,
    f: F,
}

impl<S, F> AsyncMap<S, F> {
    pub(crate) fn new(source: S, f: F) -> Self {
        Self { source, f }
    }

    /// Fuses a second async projection into this layer.
    pub fn map<G, V, Fut>(self, g: G) -> AsyncMap<S, AsyncCompose<F, G>>
    where
        S: AsyncSequence,
        F: AsyncSelector<S::Item>,
        G: Fn(F::Out, CancellationToken) -> Fut + Clone,
        Fut: Future<Output = V>,
    {
        AsyncMap::new(
            self.source,
            AsyncCompose {
                first: self.f,
                second: g,
            },
        )
    }

    /// Fuses an indexed async projection into this layer.
    pub fn map_at<G, V, Fut>(self, g: G) -> AsyncMapAt<S, AsyncComposeThenAt<F, G>>
    where
        S: AsyncSequence,
        F: AsyncSelector<S::Item>,
        G: Fn(F::Out, usize, CancellationToken) -> Fut + Clone,
        Fut: Future<Output = V>,
    {
        AsyncMapAt::new(
            self.source,
            AsyncComposeThenAt {
                first: self.f,
                second: g,
            },
        )
    }

    /// Counts the source. The transform is never invoked.
    pub async fn count(&self, cancel: &CancellationToken) -> Result<usize>
    where
        S: AsyncSequence,
    {
        reducers::count(&self.source, cancel).await
    }

    /// Asks the source. The transform is never invoked.
    pub async fn any(&self, cancel: &CancellationToken) -> Result<bool>
    where
        S: AsyncSequence,
    {
        reducers::any(&self.source, cancel).await
    }

    /// Finds the source's first element, then projects only that one.
    pub async fn first(&self, cancel: &CancellationToken) -> Result<Option<F::Out>>
    where
        S: AsyncSequence,
        F: AsyncSelector<S::Item>,
    {
        reducers::first(&self.source, cancel)
            .await?
            .map_async(|item, token| self.f.apply(item, token), cancel)
            .await
    }

    /// Checks uniqueness on the source, then projects the single element.
    pub async fn single(&self, cancel: &CancellationToken) -> Result<Option<F::Out>>
    where
        S: AsyncSequence,
        F: AsyncSelector<S::Item>,
    {
        reducers::scan_single(&self.source, always, cancel)
            .await?
            .into_option()
            .map_async(|item, token| self.f.apply(item, token), cancel)
            .await
    }

    /// Locates `index` in the source, then projects only that element.
    pub async fn element_at(&self, index: usize, cancel: &CancellationToken) -> Result<Option<F::Out>>
    where
        S: AsyncSequence,
        F: AsyncSelector<S::Item>,
    {
        reducers::element_at(&self.source, index, cancel)
            .await?
            .ok()
            .map_async(|item, token| self.f.apply(item, token), cancel)
            .await
    }
}

impl<S, F> AsyncSequence for AsyncMap<S, F>
where
    S: AsyncSequence,
    F: AsyncSelector<S::Item> + Clone,
{
    type Item = F::Out;
    type Cursor = AsyncMapCursor<S::Cursor, F>;

    fn cursor(&self) -> Self::Cursor {
        AsyncMapCursor {
            source: self.source.cursor(),
            f: self.f.clone(),
            slot: Slot::empty(),
            stopped: false,
        }
    }
}

pub struct AsyncMapCursor<C: AsyncCursor, F: AsyncSelector<C::Item>> {
    source: C,
    f: F,
    slot: Slot<F::Out>,
    stopped: bool,
}

impl<C: AsyncCursor, F: AsyncSelector<C::Item>> AsyncMapCursor<C, F> {
    async fn step(&mut self, cancel: &CancellationToken) -> Result<bool, Cancelled> {
        if !self.source.advance(cancel).await? {
            self.slot.clear();
            return Ok(false);
        }
        let item = self.source.take_current();
        let value = race(cancel, self.f.apply(item, cancel.clone())).await?;
        self.slot.set(value);
        Ok(true)
    }
}

impl<C: AsyncCursor, F: AsyncSelector<C::Item>> AsyncCursor for AsyncMapCursor<C, F> {
    type Item = F::Out;

    async fn advance(&mut self, cancel: &CancellationToken) -> Result<bool, Cancelled> {
        latched!(self, cancel, "map")
    }

    fn current(&self) -> &F::Out {
        self.slot.get()
    }

    fn take_current(&mut self) -> F::Out {
        self.slot.take()
    }

    async fn release(&mut self) {
        self.slot.clear();
        self.source.release().await;
    }
}

/* ===================== AsyncMapAt ===================== */

#[derive(Debug, Clone)]
pub struct AsyncMapAt<S, F> {
    source: S,
    f: F,
}

impl<S, F> AsyncMapAt<S, F> {
    pub(crate) fn new(source: S, f: F) -> Self {
        Self { source, f }
    }

    /// Fuses a plain async projection into this layer.
    pub fn map<G, V, Fut>(self, g: G) -> AsyncMapAt<S, AsyncComposeAt<F, G>>
    where
        S: AsyncSequence,
        F: AsyncSelectorAt<S::Item>,
        G: Fn(F::Out, CancellationToken) -> Fut + Clone,
        Fut: Future<Output = V>,
    {
        AsyncMapAt::new(
            self.source,
            AsyncComposeAt {
                first: self.f,
                second: g,
            },
        )
    }

    /// Fuses a second indexed async projection; both see the same position.
    pub fn map_at<G, V, Fut>(self, g: G) -> AsyncMapAt<S, AsyncComposeAtAt<F, G>>
    where
        S: AsyncSequence,
        F: AsyncSelectorAt<S::Item>,
        G: Fn(F::Out, usize, CancellationToken) -> Fut + Clone,
        Fut: Future<Output = V>,
    {
        AsyncMapAt::new(
            self.source,
            AsyncComposeAtAt {
                first: self.f,
                second: g,
            },
        )
    }

    /// Counts the source. The transform is never invoked.
    pub async fn count(&self, cancel: &CancellationToken) -> Result<usize>
    where
        S: AsyncSequence,
    {
        reducers::count(&self.source, cancel).await
    }

    /// Asks the source. The transform is never invoked.
    pub async fn any(&self, cancel: &CancellationToken) -> Result<bool>
    where
        S: AsyncSequence,
    {
        reducers::any(&self.source, cancel).await
    }

    /// Finds the source's first element, then projects it at position 0.
    pub async fn first(&self, cancel: &CancellationToken) -> Result<Option<F::Out>>
    where
        S: AsyncSequence,
        F: AsyncSelectorAt<S::Item>,
    {
        reducers::first(&self.source, cancel)
            .await?
            .map_async(|item, token| self.f.apply(item, 0, token), cancel)
            .await
    }

    /// Checks uniqueness on the source, then projects the single element at
    /// position 0.
    pub async fn single(&self, cancel: &CancellationToken) -> Result<Option<F::Out>>
    where
        S: AsyncSequence,
        F: AsyncSelectorAt<S::Item>,
    {
        reducers::scan_single(&self.source, always, cancel)
            .await?
            .into_option()
            .map_async(|item, token| self.f.apply(item, 0, token), cancel)
            .await
    }

    /// Locates `index` in the source, then projects only that element.
    pub async fn element_at(&self, index: usize, cancel: &CancellationToken) -> Result<Option<F::Out>>
    where
        S: AsyncSequence,
        F: AsyncSelectorAt<S::Item>,
    {
        reducers::element_at(&self.source, index, cancel)
            .await?
            .ok()
            .map_async(|item, token| self.f.apply(item, index, token), cancel)
            .await
    }
}

impl<S, F> AsyncSequence for AsyncMapAt<S, F>
where
    S: AsyncSequence,
    F: AsyncSelectorAt<S::Item> + Clone,
{
    type Item = F::Out;
    type Cursor = AsyncMapAtCursor<S::Cursor, F>;

    fn cursor(&self) -> Self::Cursor {
        AsyncMapAtCursor {
            source: self.source.cursor(),
            f: self.f.clone(),
            next_index: 0,
            slot: Slot::empty(),
            stopped: false,
        }
    }
}

pub struct AsyncMapAtCursor<C: AsyncCursor, F: AsyncSelectorAt<C::Item>> {
    source: C,
    f: F,
    next_index: usize,
    slot: Slot<F::Out>,
    stopped: bool,
}

impl<C: AsyncCursor, F: AsyncSelectorAt<C::Item>> AsyncMapAtCursor<C, F> {
    async fn step(&mut self, cancel: &CancellationToken) -> Result<bool, Cancelled> {
        if !self.source.advance(cancel).await? {
            self.slot.clear();
            return Ok(false);
        }
        let item = self.source.take_current();
        let index = self.next_index;
        self.next_index += 1;
        let value = race(cancel, self.f.apply(item, index, cancel.clone())).await?;
        self.slot.set(value);
        Ok(true)
    }
}

impl<C: AsyncCursor, F: AsyncSelectorAt<C::Item>> AsyncCursor for AsyncMapAtCursor<C, F> {
    type Item = F::Out;

    async fn advance(&mut self, cancel: &CancellationToken) -> Result<bool, Cancelled> {
        latched!(self, cancel, "map_at")
    }

    fn current(&self) -> &F::Out {
        self.slot.get()
    }

    fn take_current(&mut self) -> F::Out {
        self.slot.take()
    }

    async fn release(&mut self) {
        self.slot.clear();
        self.source.release().await;
    }
}

/* ===================== AsyncFilter ===================== */

/// Async filter. The predicate sees the element by reference and returns a
/// future that must not borrow it; compute what the decision needs before
/// building the future.
pub struct AsyncFilter<S, P, Fut> {
    source: S,
    predicate: P,
    _fut: PhantomData<fn() -> Fut>,
}

impl<S, P, Fut> AsyncFilter<S, P, Fut> {
    pub(crate) fn new(source: S, predicate: P) -> Self {
        Self {
            source,
            predicate,
            _fut: PhantomData,
        }
    }
}

impl<S: Clone, P: Clone, Fut> Clone for AsyncFilter<S, P, Fut> {
    fn clone(&self) -> Self {
        Self::new(self.source.clone(), self.predicate.clone())
    }
}

impl<S: fmt::Debug, P, Fut> fmt::Debug for AsyncFilter<S, P, Fut> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AsyncFilter")
            .field("source", &self.source)
            .finish_non_exhaustive()
    }
}

impl<S, P, Fut> AsyncSequence for AsyncFilter<S, P, Fut>
where
    S: AsyncSequence,
    P: Fn(&S::Item, CancellationToken) -> Fut + Clone,
    Fut: Future<Output = bool>,
{
    type Item = S::Item;
    type Cursor = AsyncFilterCursor<S::Cursor, P, Fut>;

    fn cursor(&self) -> Self::Cursor {
        AsyncFilterCursor {
            source: self.source.cursor(),
            predicate: self.predicate.clone(),
            stopped: false,
            _fut: PhantomData,
        }
    }
}

pub struct AsyncFilterCursor<C, P, Fut> {
    source: C,
    predicate: P,
    stopped: bool,
    _fut: PhantomData<fn() -> Fut>,
}

impl<C, P, Fut> AsyncFilterCursor<C, P, Fut>
where
    C: AsyncCursor,
    P: Fn(&C::Item, CancellationToken) -> Fut,
    Fut: Future<Output = bool>,
{
    async fn step(&mut self, cancel: &CancellationToken) -> Result<bool, Cancelled> {
        while self.source.advance(cancel).await? {
            let decision = (self.predicate)(self.source.current(), cancel.clone());
            if race(cancel, decision).await? {
                return Ok(true);
            }
        }
        Ok(false)
    }
}

impl<C, P, Fut> AsyncCursor for AsyncFilterCursor<C, P, Fut>
where
    C: AsyncCursor,
    P: Fn(&C::Item, CancellationToken) -> Fut,
    Fut: Future<Output = bool>,
{
    type Item = C::Item;

    async fn advance(&mut self, cancel: &CancellationToken) -> Result<bool, Cancelled> {
        latched!(self, cancel, "filter")
    }

    fn current(&self) -> &C::Item {
        self.source.current()
    }

    fn take_current(&mut self) -> C::Item {
        self.source.take_current()
    }

    async fn release(&mut self) {
        self.source.release().await;
    }
}

/* ===================== AsyncTake / AsyncSkip ===================== */

#[derive(Debug, Clone)]
pub struct AsyncTake<S> {
    source: S,
    count: usize,
}

impl<S> AsyncTake<S> {
    pub(crate) fn new(source: S, count: usize) -> Self {
        Self { source, count }
    }

    /// Tightens the bound instead of stacking a second layer.
    pub fn take(self, count: usize) -> AsyncTake<S> {
        AsyncTake::new(self.source, self.count.min(count))
    }

    pub fn bound(&self) -> usize {
        self.count
    }
}

impl<S: AsyncSequence> AsyncSequence for AsyncTake<S> {
    type Item = S::Item;
    type Cursor = AsyncTakeCursor<S::Cursor>;

    fn cursor(&self) -> Self::Cursor {
        AsyncTakeCursor {
            source: self.source.cursor(),
            remaining: self.count,
            stopped: false,
        }
    }
}

pub struct AsyncTakeCursor<C> {
    source: C,
    remaining: usize,
    stopped: bool,
}

impl<C: AsyncCursor> AsyncTakeCursor<C> {
    async fn step(&mut self, cancel: &CancellationToken) -> Result<bool, Cancelled> {
        let more = self.source.advance(cancel).await?;
        if more {
            self.remaining -= 1;
        }
        Ok(more)
    }
}

impl<C: AsyncCursor> AsyncCursor for AsyncTakeCursor<C> {
    type Item = C::Item;

    async fn advance(&mut self, cancel: &CancellationToken) -> Result<bool, Cancelled> {
        // a spent window is exhausted, not cancelled
        if self.remaining == 0 {
            self.stopped = true;
            return Ok(false);
        }
        latched!(self, cancel, "take")
    }

    fn current(&self) -> &C::Item {
        self.source.current()
    }

    fn take_current(&mut self) -> C::Item {
        self.source.take_current()
    }

    async fn release(&mut self) {
        self.source.release().await;
    }
}

#[derive(Debug, Clone)]
pub struct AsyncSkip<S> {
    source: S,
    count: usize,
}

impl<S> AsyncSkip<S> {
    pub(crate) fn new(source: S, count: usize) -> Self {
        Self { source, count }
    }

    pub fn skip(self, count: usize) -> AsyncSkip<S> {
        AsyncSkip::new(self.source, self.count.saturating_add(count))
    }
}

impl<S: AsyncSequence> AsyncSequence for AsyncSkip<S> {
    type Item = S::Item;
    type Cursor = AsyncSkipCursor<S::Cursor>;

    fn cursor(&self) -> Self::Cursor {
        AsyncSkipCursor {
            source: self.source.cursor(),
            pending: self.count,
            stopped: false,
        }
    }
}

pub struct AsyncSkipCursor<C> {
    source: C,
    pending: usize,
    stopped: bool,
}

impl<C: AsyncCursor> AsyncSkipCursor<C> {
    async fn step(&mut self, cancel: &CancellationToken) -> Result<bool, Cancelled> {
        while self.pending > 0 {
            self.pending -= 1;
            if !self.source.advance(cancel).await? {
                return Ok(false);
            }
        }
        self.source.advance(cancel).await
    }
}

impl<C: AsyncCursor> AsyncCursor for AsyncSkipCursor<C> {
    type Item = C::Item;

    async fn advance(&mut self, cancel: &CancellationToken) -> Result<bool, Cancelled> {
        latched!(self, cancel, "skip")
    }

    fn current(&self) -> &C::Item {
        self.source.current()
    }

    fn take_current(&mut self) -> C::Item {
        self.source.take_current()
    }

    async fn release(&mut self) {
        self.source.release().await;
    }
}

/* ===================== AsyncFlatMap ===================== */

/// Async flattening projection: the transform resolves to a synchronous
/// sub-sequence, drained before the source advances again.
#[derive(Debug, Clone)]
pub struct AsyncFlatMap<S, F> {
    source: S,
    f: F,
}

impl<S, F> AsyncFlatMap<S, F> {
    pub(crate) fn new(source: S, f: F) -> Self {
        Self { source, f }
    }
}

impl<S, F> AsyncSequence for AsyncFlatMap<S, F>
where
    S: AsyncSequence,
    F: AsyncSelector<S::Item> + Clone,
    F::Out: IntoIterator,
{
    type Item = <F::Out as IntoIterator>::Item;
    type Cursor = AsyncFlatMapCursor<S::Cursor, F>;

    fn cursor(&self) -> Self::Cursor {
        AsyncFlatMapCursor {
            outer: self.source.cursor(),
            f: self.f.clone(),
            inner: None,
            slot: Slot::empty(),
            stopped: false,
        }
    }
}

pub struct AsyncFlatMapCursor<C, F>
where
    C: AsyncCursor,
    F: AsyncSelector<C::Item>,
    F::Out: IntoIterator,
{
    outer: C,
    f: F,
    inner: Option<<F::Out as IntoIterator>::IntoIter>,
    slot: Slot<<F::Out as IntoIterator>::Item>,
    stopped: bool,
}

impl<C, F> AsyncFlatMapCursor<C, F>
where
    C: AsyncCursor,
    F: AsyncSelector<C::Item>,
    F::Out: IntoIterator,
{
    async fn step(&mut self, cancel: &CancellationToken) -> Result<bool, Cancelled> {
        loop {
            if let Some(inner) = self.inner.as_mut() {
                if let Some(item) = inner.next() {
                    self.slot.set(item);
                    return Ok(true);
                }
                self.inner = None;
            }
            if !self.outer.advance(cancel).await? {
                self.slot.clear();
                return Ok(false);
            }
            let element = self.outer.take_current();
            let sub = race(cancel, self.f.apply(element, cancel.clone())).await?;
            self.inner = Some(sub.into_iter());
        }
    }
}

impl<C, F> AsyncCursor for AsyncFlatMapCursor<C, F>
where
    C: AsyncCursor,
    F: AsyncSelector<C::Item>,
    F::Out: IntoIterator,
{
    type Item = <F::Out as IntoIterator>::Item;

    async fn advance(&mut self, cancel: &CancellationToken) -> Result<bool, Cancelled> {
        latched!(self, cancel, "flat_map")
    }

    fn current(&self) -> &Self::Item {
        self.slot.get()
    }

    fn take_current(&mut self) -> Self::Item {
        self.slot.take()
    }

    async fn release(&mut self) {
        self.inner = None;
        self.slot.clear();
        self.outer.release().await;
    }
}
