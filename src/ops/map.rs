//! Projections: `map` and `map_at`.
//!
//! Both keep the source's tier. Chained projections fuse into one layer
//! holding a composed transform.

use crate::cursor::{Cursor, Slot};
use crate::ops::compose::{Compose, ComposeAt, ComposeAtAt, ComposeThenAt, Selector, SelectorAt};
use crate::sequence::{Sequence, SequenceExt};
use crate::tier::{Countable, RandomAccess, TierStrategy};

/* ===================== Map ===================== */

/// Sequence produced by [`SequenceExt::map`].
#[derive(Debug, Clone)]
pub struct Map<S, F> {
    source: S,
    f: F,
}

impl<S, F> Map<S, F> {
    pub(crate) fn new(source: S, f: F) -> Self {
        Self { source, f }
    }

    /// Fuses a second projection into this layer.
    pub fn map<G, V>(self, g: G) -> Map<S, Compose<F, G>>
    where
        S: Sequence,
        F: Selector<S::Item>,
        G: Fn(F::Out) -> V + Clone,
    {
        Map::new(self.source, Compose::new(self.f, g))
    }

    /// Fuses an indexed projection into this layer.
    pub fn map_at<G, V>(self, g: G) -> MapAt<S, ComposeThenAt<F, G>>
    where
        S: Sequence,
        F: Selector<S::Item>,
        G: Fn(F::Out, usize) -> V + Clone,
    {
        MapAt::new(self.source, ComposeThenAt::new(self.f, g))
    }

    /// Counts the source. The transform is never invoked.
    pub fn count(&self) -> usize
    where
        S: Sequence,
        S::Tier: TierStrategy<S>,
    {
        self.source.count()
    }
}

impl<S, F> Sequence for Map<S, F>
where
    S: Sequence,
    F: Selector<S::Item> + Clone,
{
    type Item = F::Out;
    type Tier = S::Tier;
    type Cursor = MapCursor<S::Cursor, F>;

    fn cursor(&self) -> Self::Cursor {
        MapCursor {
            source: self.source.cursor(),
            f: self.f.clone(),
            slot: Slot::empty(),
        }
    }
}

impl<S, F> Countable for Map<S, F>
where
    S: Countable,
    F: Selector<S::Item> + Clone,
{
    #[inline]
    fn len(&self) -> usize {
        self.source.len()
    }
}

impl<S, F> RandomAccess for Map<S, F>
where
    S: RandomAccess,
    F: Selector<S::Item> + Clone,
{
    #[inline]
    fn at(&self, index: usize) -> F::Out {
        self.f.apply(self.source.at(index))
    }
}

pub struct MapCursor<C: Cursor, F: Selector<C::Item>> {
    source: C,
    f: F,
    slot: Slot<F::Out>,
}

impl<C: Cursor, F: Selector<C::Item>> Cursor for MapCursor<C, F> {
    type Item = F::Out;

    #[inline]
    fn advance(&mut self) -> bool {
        if self.source.advance() {
            let item = self.source.take_current();
            self.slot.set(self.f.apply(item));
            true
        } else {
            self.slot.clear();
            false
        }
    }

    #[inline]
    fn current(&self) -> &F::Out {
        self.slot.get()
    }

    #[inline]
    fn take_current(&mut self) -> F::Out {
        self.slot.take()
    }

    fn release(&mut self) {
        self.slot.clear();
        self.source.release();
    }
}

/* ===================== MapAt ===================== */

/// Sequence produced by [`SequenceExt::map_at`]. Positions count from zero
/// in this sequence's own order.
#[derive(Debug, Clone)]
pub struct MapAt<S, F> {
    source: S,
    f: F,
}

impl<S, F> MapAt<S, F> {
    pub(crate) fn new(source: S, f: F) -> Self {
        Self { source, f }
    }

    pub fn map<G, V>(self, g: G) -> MapAt<S, ComposeAt<F, G>>
    where
        S: Sequence,
        F: SelectorAt<S::Item>,
        G: Fn(F::Out) -> V + Clone,
    {
        MapAt::new(self.source, ComposeAt::new(self.f, g))
    }

    pub fn map_at<G, V>(self, g: G) -> MapAt<S, ComposeAtAt<F, G>>
    where
        S: Sequence,
        F: SelectorAt<S::Item>,
        G: Fn(F::Out, usize) -> V + Clone,
    {
        MapAt::new(self.source, ComposeAtAt::new(self.f, g))
    }

    /// Counts the source. The transform is never invoked.
    pub fn count(&self) -> usize
    where
        S: Sequence,
        S::Tier: TierStrategy<S>,
    {
        self.source.count()
    }
}

impl<S, F> Sequence for MapAt<S, F>
where
    S: Sequence,
    F: SelectorAt<S::Item> + Clone,
{
    type Item = F::Out;
    type Tier = S::Tier;
    type Cursor = MapAtCursor<S::Cursor, F>;

    fn cursor(&self) -> Self::Cursor {
        MapAtCursor {
            source: self.source.cursor(),
            f: self.f.clone(),
            next_index: 0,
            slot: Slot::empty(),
        }
    }
}

impl<S, F> Countable for MapAt<S, F>
where
    S: Countable,
    F: SelectorAt<S::Item> + Clone,
{
    #[inline]
    fn len(&self) -> usize {
        self.source.len()
    }
}

impl<S, F> RandomAccess for MapAt<S, F>
where
    S: RandomAccess,
    F: SelectorAt<S::Item> + Clone,
{
    #[inline]
    fn at(&self, index: usize) -> F::Out {
        self.f.apply(self.source.at(index), index)
    }
}

pub struct MapAtCursor<C: Cursor, F: SelectorAt<C::Item>> {
    source: C,
    f: F,
    next_index: usize,
    slot: Slot<F::Out>,
}

impl<C: Cursor, F: SelectorAt<C::Item>> Cursor for MapAtCursor<C, F> {
    type Item = F::Out;

    #[inline]
    fn advance(&mut self) -> bool {
        if self.source.advance() {
            let item = self.source.take_current();
            let index = self.next_index;
            self.next_index += 1;
            self.slot.set(self.f.apply(item, index));
            true
        } else {
            self.slot.clear();
            false
        }
    }

    #[inline]
    fn current(&self) -> &F::Out {
        self.slot.get()
    }

    #[inline]
    fn take_current(&mut self) -> F::Out {
        self.slot.take()
    }

    fn release(&mut self) {
        self.slot.clear();
        self.source.release();
    }
}
