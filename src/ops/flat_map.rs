//! Flattening projection.

use crate::cursor::{Cursor, Slot};
use crate::ops::compose::Selector;
use crate::sequence::Sequence;
use crate::tier::SequentialTier;

/// Sequence produced by [`SequenceExt::flat_map`](crate::SequenceExt::flat_map).
///
/// Each sub-sequence is drained before the source advances again, so the
/// output keeps source order and, within each element, sub-sequence order.
#[derive(Debug, Clone)]
pub struct FlatMap<S, F> {
    source: S,
    f: F,
}

impl<S, F> FlatMap<S, F> {
    pub(crate) fn new(source: S, f: F) -> Self {
        Self { source, f }
    }
}

impl<S, F> Sequence for FlatMap<S, F>
where
    S: Sequence,
    F: Selector<S::Item> + Clone,
    F::Out: IntoIterator,
{
    type Item = <F::Out as IntoIterator>::Item;
    type Tier = SequentialTier;
    type Cursor = FlatMapCursor<S::Cursor, F>;

    fn cursor(&self) -> Self::Cursor {
        FlatMapCursor {
            outer: self.source.cursor(),
            f: self.f.clone(),
            inner: None,
            slot: Slot::empty(),
        }
    }
}

pub struct FlatMapCursor<C, F>
where
    C: Cursor,
    F: Selector<C::Item>,
    F::Out: IntoIterator,
{
    outer: C,
    f: F,
    inner: Option<<F::Out as IntoIterator>::IntoIter>,
    slot: Slot<<F::Out as IntoIterator>::Item>,
}

impl<C, F> Cursor for FlatMapCursor<C, F>
where
    C: Cursor,
    F: Selector<C::Item>,
    F::Out: IntoIterator,
{
    type Item = <F::Out as IntoIterator>::Item;

    fn advance(&mut self) -> bool {
        loop {
            if let Some(inner) = self.inner.as_mut() {
                if let Some(item) = inner.next() {
                    self.slot.set(item);
                    return true;
                }
                self.inner = None;
            }
            if !self.outer.advance() {
                self.slot.clear();
                return false;
            }
            let element = self.outer.take_current();
            self.inner = Some(self.f.apply(element).into_iter());
        }
    }

    #[inline]
    fn current(&self) -> &Self::Item {
        self.slot.get()
    }

    #[inline]
    fn take_current(&mut self) -> Self::Item {
        self.slot.take()
    }

    fn release(&mut self) {
        self.inner = None;
        self.slot.clear();
        self.outer.release();
    }
}
