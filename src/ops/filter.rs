//! Filters: `filter`, `filter_at`, and the fused filter-then-project layer.
//!
//! A filter cannot know how many elements survive, so every type here is
//! [`SequentialTier`].

use crate::cursor::{Cursor, Slot};
use crate::ops::compose::{And, Compose, Predicate, PredicateAt, Selector};
use crate::sequence::Sequence;
use crate::tier::SequentialTier;

/* ===================== Filter ===================== */

/// Sequence produced by [`SequenceExt::filter`](crate::SequenceExt::filter).
#[derive(Debug, Clone)]
pub struct Filter<S, P> {
    source: S,
    predicate: P,
}

impl<S, P> Filter<S, P> {
    pub(crate) fn new(source: S, predicate: P) -> Self {
        Self { source, predicate }
    }

    /// Fuses a second filter: one layer, both predicates, short-circuiting.
    pub fn filter<Q>(self, q: Q) -> Filter<S, And<P, Q>>
    where
        S: Sequence,
        Q: Fn(&S::Item) -> bool + Clone,
    {
        Filter::new(self.source, And::new(self.predicate, q))
    }

    /// Fuses a projection of the surviving elements into this layer.
    pub fn map<F, U>(self, f: F) -> FilterThenMap<S, P, F>
    where
        S: Sequence,
        F: Fn(S::Item) -> U + Clone,
    {
        FilterThenMap {
            source: self.source,
            predicate: self.predicate,
            f,
        }
    }
}

impl<S, P> Sequence for Filter<S, P>
where
    S: Sequence,
    P: Predicate<S::Item> + Clone,
{
    type Item = S::Item;
    type Tier = SequentialTier;
    type Cursor = FilterCursor<S::Cursor, P>;

    fn cursor(&self) -> Self::Cursor {
        FilterCursor {
            source: self.source.cursor(),
            predicate: self.predicate.clone(),
        }
    }
}

pub struct FilterCursor<C, P> {
    source: C,
    predicate: P,
}

impl<C: Cursor, P: Predicate<C::Item>> Cursor for FilterCursor<C, P> {
    type Item = C::Item;

    #[inline]
    fn advance(&mut self) -> bool {
        while self.source.advance() {
            if self.predicate.test(self.source.current()) {
                return true;
            }
        }
        false
    }

    #[inline]
    fn current(&self) -> &C::Item {
        self.source.current()
    }

    #[inline]
    fn take_current(&mut self) -> C::Item {
        self.source.take_current()
    }

    fn release(&mut self) {
        self.source.release();
    }
}

/* ===================== FilterAt ===================== */

/// Sequence produced by
/// [`SequenceExt::filter_at`](crate::SequenceExt::filter_at). The index is
/// the element's position in the source, counting rejected elements.
#[derive(Debug, Clone)]
pub struct FilterAt<S, P> {
    source: S,
    predicate: P,
}

impl<S, P> FilterAt<S, P> {
    pub(crate) fn new(source: S, predicate: P) -> Self {
        Self { source, predicate }
    }
}

impl<S, P> Sequence for FilterAt<S, P>
where
    S: Sequence,
    P: PredicateAt<S::Item> + Clone,
{
    type Item = S::Item;
    type Tier = SequentialTier;
    type Cursor = FilterAtCursor<S::Cursor, P>;

    fn cursor(&self) -> Self::Cursor {
        FilterAtCursor {
            source: self.source.cursor(),
            predicate: self.predicate.clone(),
            next_index: 0,
        }
    }
}

pub struct FilterAtCursor<C, P> {
    source: C,
    predicate: P,
    next_index: usize,
}

impl<C: Cursor, P: PredicateAt<C::Item>> Cursor for FilterAtCursor<C, P> {
    type Item = C::Item;

    fn advance(&mut self) -> bool {
        while self.source.advance() {
            let index = self.next_index;
            self.next_index += 1;
            if self.predicate.test(self.source.current(), index) {
                return true;
            }
        }
        false
    }

    #[inline]
    fn current(&self) -> &C::Item {
        self.source.current()
    }

    #[inline]
    fn take_current(&mut self) -> C::Item {
        self.source.take_current()
    }

    fn release(&mut self) {
        self.source.release();
    }
}

/* ===================== FilterThenMap ===================== */

/// `filter(p).map(f)` as a single layer: the projection only runs for
/// accepted elements.
#[derive(Debug, Clone)]
pub struct FilterThenMap<S, P, F> {
    source: S,
    predicate: P,
    f: F,
}

impl<S, P, F> FilterThenMap<S, P, F> {
    /// Fuses a further projection.
    pub fn map<G, V>(self, g: G) -> FilterThenMap<S, P, Compose<F, G>>
    where
        S: Sequence,
        F: Selector<S::Item>,
        G: Fn(F::Out) -> V + Clone,
    {
        FilterThenMap {
            source: self.source,
            predicate: self.predicate,
            f: Compose::new(self.f, g),
        }
    }
}

impl<S, P, F> Sequence for FilterThenMap<S, P, F>
where
    S: Sequence,
    P: Predicate<S::Item> + Clone,
    F: Selector<S::Item> + Clone,
{
    type Item = F::Out;
    type Tier = SequentialTier;
    type Cursor = FilterThenMapCursor<S::Cursor, P, F>;

    fn cursor(&self) -> Self::Cursor {
        FilterThenMapCursor {
            source: self.source.cursor(),
            predicate: self.predicate.clone(),
            f: self.f.clone(),
            slot: Slot::empty(),
        }
    }
}

pub struct FilterThenMapCursor<C: Cursor, P, F: Selector<C::Item>> {
    source: C,
    predicate: P,
    f: F,
    slot: Slot<F::Out>,
}

impl<C, P, F> Cursor for FilterThenMapCursor<C, P, F>
where
    C: Cursor,
    P: Predicate<C::Item>,
    F: Selector<C::Item>,
{
    type Item = F::Out;

    fn advance(&mut self) -> bool {
        while self.source.advance() {
            if self.predicate.test(self.source.current()) {
                let item = self.source.take_current();
                self.slot.set(self.f.apply(item));
                return true;
            }
        }
        self.slot.clear();
        false
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

#[cfg(test)]
mod tests {
    use crate::sequence::SequenceExt;
    use crate::sources::from_slice;
    use crate::testing::CallCounter;

    #[test]
    fn projection_runs_only_for_accepted_elements() {
        let calls = CallCounter::new();
        let out = from_slice(&[1, 2, 3, 4, 5, 6])
            .filter(|x| **x % 2 == 0)
            .map(calls.wrap(|x: &i32| x * 100))
            .to_vec();
        assert_eq!(out, vec![200, 400, 600]);
        assert_eq!(calls.calls(), 3);
    }

    #[test]
    fn indexed_filter_counts_rejected_positions() {
        let out = from_slice(&[10, 11, 12, 13, 14])
            .filter(|x| **x != 11)
            .filter_at(|_, i| i % 2 == 0)
            .copied()
            .to_vec();
        // positions after the first filter: 10→0, 12→1, 13→2, 14→3
        assert_eq!(out, vec![10, 13]);
    }
}
