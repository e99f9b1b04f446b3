//! Bounded windows: `take` and `skip`.
//!
//! Both keep the source's tier, with the length clamped. `take(a).take(b)`
//! collapses to `take(min(a, b))`; `skip(a).skip(b)` to `skip(a + b)`.

use crate::cursor::Cursor;
use crate::sequence::Sequence;
use crate::tier::{Countable, RandomAccess};

/* ===================== Take ===================== */

/// At most `count` leading elements of the source.
#[derive(Debug, Clone)]
pub struct Take<S> {
    source: S,
    count: usize,
}

impl<S> Take<S> {
    pub(crate) fn new(source: S, count: usize) -> Self {
        Self { source, count }
    }

    /// Tightens the bound instead of stacking a second layer.
    pub fn take(self, count: usize) -> Take<S> {
        Take::new(self.source, self.count.min(count))
    }

    /// The bound this window was built with.
    pub fn bound(&self) -> usize {
        self.count
    }
}

impl<S: Sequence> Sequence for Take<S> {
    type Item = S::Item;
    type Tier = S::Tier;
    type Cursor = TakeCursor<S::Cursor>;

    fn cursor(&self) -> Self::Cursor {
        TakeCursor {
            source: self.source.cursor(),
            remaining: self.count,
        }
    }
}

impl<S: Countable> Countable for Take<S> {
    #[inline]
    fn len(&self) -> usize {
        self.source.len().min(self.count)
    }
}

impl<S: RandomAccess> RandomAccess for Take<S> {
    #[inline]
    fn at(&self, index: usize) -> S::Item {
        self.source.at(index)
    }
}

pub struct TakeCursor<C> {
    source: C,
    remaining: usize,
}

impl<C: Cursor> Cursor for TakeCursor<C> {
    type Item = C::Item;

    #[inline]
    fn advance(&mut self) -> bool {
        // the source is never advanced past the bound
        if self.remaining == 0 {
            return false;
        }
        if self.source.advance() {
            self.remaining -= 1;
            true
        } else {
            self.remaining = 0;
            false
        }
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

/* ===================== Skip ===================== */

/// The source without its first `count` elements.
#[derive(Debug, Clone)]
pub struct Skip<S> {
    source: S,
    count: usize,
}

impl<S> Skip<S> {
    pub(crate) fn new(source: S, count: usize) -> Self {
        Self { source, count }
    }

    /// Merges consecutive skips.
    pub fn skip(self, count: usize) -> Skip<S> {
        Skip::new(self.source, self.count.saturating_add(count))
    }
}

impl<S: Sequence> Sequence for Skip<S> {
    type Item = S::Item;
    type Tier = S::Tier;
    type Cursor = SkipCursor<S::Cursor>;

    fn cursor(&self) -> Self::Cursor {
        SkipCursor {
            source: self.source.cursor(),
            pending: self.count,
        }
    }
}

impl<S: Countable> Countable for Skip<S> {
    #[inline]
    fn len(&self) -> usize {
        self.source.len().saturating_sub(self.count)
    }
}

impl<S: RandomAccess> RandomAccess for Skip<S> {
    #[inline]
    fn at(&self, index: usize) -> S::Item {
        self.source.at(index + self.count)
    }
}

pub struct SkipCursor<C> {
    source: C,
    pending: usize,
}

impl<C: Cursor> Cursor for SkipCursor<C> {
    type Item = C::Item;

    fn advance(&mut self) -> bool {
        while self.pending > 0 {
            self.pending -= 1;
            if !self.source.advance() {
                self.pending = 0;
                return false;
            }
        }
        self.source.advance()
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

#[cfg(test)]
mod tests {
    use crate::sequence::SequenceExt;
    use crate::sources::{from_fn, from_slice};
    use crate::tier::{Countable, RandomAccess};

    #[test]
    fn nested_takes_collapse_to_the_smaller_bound() {
        let seq = from_slice(&[1, 2, 3, 4, 5]).take(4).take(2).take(3);
        assert_eq!(seq.bound(), 2);
        assert_eq!(seq.len(), 2);
        assert_eq!(seq.copied().to_vec(), vec![1, 2]);
    }

    #[test]
    fn skip_keeps_random_access_with_shifted_positions() {
        let seq = from_slice(&[1, 2, 3, 4, 5]).skip(1).skip(2);
        assert_eq!(seq.len(), 2);
        assert_eq!(*seq.at(0), 4);
        assert_eq!(seq.element_at(1), Some(&5));
        assert_eq!(seq.element_at(2), None);
    }

    #[test]
    fn skip_past_the_end_is_empty() {
        let seq = from_fn(|| 0..3).skip(10);
        assert_eq!(seq.count(), 0);
        assert!(!seq.any());
    }
}
