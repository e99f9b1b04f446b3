//! Instrumented sources and transforms.

use std::cell::Cell;
use std::rc::Rc;

use crate::cursor::Cursor;
use crate::sequence::Sequence;
use crate::tier::{Countable, RandomAccess};

/// Counters shared by a [`Probe`] and all of its clones.
#[derive(Debug, Default)]
pub struct ProbeStats {
    cursors: Cell<usize>,
    advances: Cell<usize>,
    releases: Cell<usize>,
}

impl ProbeStats {
    /// Cursors opened.
    pub fn cursors(&self) -> usize {
        self.cursors.get()
    }

    /// Calls to `advance`, successful or not.
    pub fn advances(&self) -> usize {
        self.advances.get()
    }

    /// Cursors released. A cursor released twice counts once.
    pub fn releases(&self) -> usize {
        self.releases.get()
    }

    fn bump(counter: &Cell<usize>) {
        counter.set(counter.get() + 1);
    }
}

/// Wraps a sequence and records how it is driven. Keeps the wrapped
/// sequence's tier, so countable and random-access fast paths stay visible:
/// a terminal that answers from `len` or `at` opens no cursor.
#[derive(Debug, Clone)]
pub struct Probe<S> {
    inner: S,
    stats: Rc<ProbeStats>,
}

impl<S> Probe<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            stats: Rc::default(),
        }
    }

    pub fn stats(&self) -> &ProbeStats {
        &self.stats
    }
}

impl<S: Sequence> Sequence for Probe<S> {
    type Item = S::Item;
    type Tier = S::Tier;
    type Cursor = ProbeCursor<S::Cursor>;

    fn cursor(&self) -> Self::Cursor {
        ProbeStats::bump(&self.stats.cursors);
        ProbeCursor {
            inner: self.inner.cursor(),
            stats: Rc::clone(&self.stats),
            released: false,
        }
    }
}

impl<S: Countable> Countable for Probe<S> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<S: RandomAccess> RandomAccess for Probe<S> {
    fn at(&self, index: usize) -> S::Item {
        self.inner.at(index)
    }
}

pub struct ProbeCursor<C> {
    inner: C,
    stats: Rc<ProbeStats>,
    released: bool,
}

impl<C: Cursor> Cursor for ProbeCursor<C> {
    type Item = C::Item;

    fn advance(&mut self) -> bool {
        ProbeStats::bump(&self.stats.advances);
        self.inner.advance()
    }

    fn current(&self) -> &C::Item {
        self.inner.current()
    }

    fn take_current(&mut self) -> C::Item {
        self.inner.take_current()
    }

    fn release(&mut self) {
        if !self.released {
            self.released = true;
            ProbeStats::bump(&self.stats.releases);
        }
        self.inner.release();
    }
}

/// Counts invocations of wrapped transforms.
#[derive(Debug, Clone, Default)]
pub struct CallCounter {
    calls: Rc<Cell<usize>>,
}

impl CallCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps `f` so that every call is counted here.
    pub fn wrap<A, R, F>(&self, f: F) -> impl Fn(A) -> R + Clone
    where
        F: Fn(A) -> R + Clone,
    {
        let calls = Rc::clone(&self.calls);
        move |input| {
            calls.set(calls.get() + 1);
            f(input)
        }
    }

    /// Like [`wrap`](Self::wrap) for predicates, which must accept a
    /// reference of any lifetime.
    pub fn wrap_predicate<T, F>(&self, f: F) -> impl Fn(&T) -> bool + Clone
    where
        T: ?Sized,
        F: Fn(&T) -> bool + Clone,
    {
        let calls = Rc::clone(&self.calls);
        move |item: &T| {
            calls.set(calls.get() + 1);
            f(item)
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sequence::SequenceExt;
    use crate::sources::{from_fn, from_slice};

    #[test]
    fn probe_counts_a_full_traversal() {
        let probe = Probe::new(from_fn(|| 0..3));
        assert_eq!(probe.to_vec(), vec![0, 1, 2]);
        let stats = probe.stats();
        assert_eq!((stats.cursors(), stats.advances(), stats.releases()), (1, 4, 1));
    }

    #[test]
    fn random_access_probe_answers_without_cursors() {
        let probe = Probe::new(from_slice(&[4, 5, 6]));
        assert_eq!(probe.element_at(2), Some(&6));
        assert_eq!(probe.count(), 3);
        assert_eq!(probe.stats().cursors(), 0);
    }

    #[test]
    fn call_counter_counts_each_invocation() {
        let calls = CallCounter::new();
        let double = calls.wrap(|x: i32| x * 2);
        assert_eq!(double(2) + double(3), 10);
        assert_eq!(calls.calls(), 2);
    }
}
