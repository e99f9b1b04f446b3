//! The traversal contract.
//!
//! A [`Cursor`] is a single forward-only pass over a sequence. The protocol is
//! `advance` → (`current` | `take_current`)* → `advance` → … → `release`.
//! Reading before a successful `advance` is a protocol violation and panics.
//!
//! Terminals never drive a cursor directly: they wrap it in a [`Traversal`],
//! whose `Drop` runs [`Cursor::release`] exactly once on every exit path.

use std::fmt;

/// One forward-only traversal.
pub trait Cursor {
    type Item;

    /// Moves to the next element. Returns `false` once the sequence is
    /// exhausted; every later call keeps returning `false`.
    fn advance(&mut self) -> bool;

    /// The element positioned by the last successful [`advance`](Cursor::advance).
    ///
    /// # Panics
    /// If no successful `advance` preceded the call, or the element was
    /// already moved out with [`take_current`](Cursor::take_current).
    fn current(&self) -> &Self::Item;

    /// Moves the positioned element out of the cursor.
    ///
    /// # Panics
    /// Same conditions as [`current`](Cursor::current).
    fn take_current(&mut self) -> Self::Item;

    /// Frees whatever the traversal holds. Idempotent.
    fn release(&mut self) {}
}

/// Once-per-advance cache for the positioned element.
pub(crate) struct Slot<T>(Option<T>);

impl<T> Slot<T> {
    pub(crate) const fn empty() -> Self {
        Self(None)
    }

    #[inline]
    pub(crate) fn set(&mut self, value: T) {
        self.0 = Some(value);
    }

    #[inline]
    pub(crate) fn clear(&mut self) {
        self.0 = None;
    }

    #[inline]
    #[track_caller]
    pub(crate) fn get(&self) -> &T {
        match &self.0 {
            Some(value) => value,
            None => unpositioned(),
        }
    }

    #[inline]
    #[track_caller]
    pub(crate) fn take(&mut self) -> T {
        match self.0.take() {
            Some(value) => value,
            None => unpositioned(),
        }
    }
}

#[cold]
#[track_caller]
pub(crate) fn unpositioned() -> ! {
    panic!("cursor read without a preceding successful advance")
}

/// Owns a cursor for the duration of one terminal and releases it on drop.
pub struct Traversal<C: Cursor> {
    cursor: C,
    released: bool,
}

impl<C: Cursor> Traversal<C> {
    pub fn new(cursor: C) -> Self {
        Self {
            cursor,
            released: false,
        }
    }

    #[inline]
    pub fn advance(&mut self) -> bool {
        self.cursor.advance()
    }

    #[inline]
    pub fn current(&self) -> &C::Item {
        self.cursor.current()
    }

    #[inline]
    pub fn take_current(&mut self) -> C::Item {
        self.cursor.take_current()
    }

    /// Advances and moves the element out in one step.
    #[inline]
    pub fn next_item(&mut self) -> Option<C::Item> {
        if self.cursor.advance() {
            Some(self.cursor.take_current())
        } else {
            None
        }
    }

    /// Releases early. Dropping afterwards does not release again.
    pub fn release(&mut self) {
        if !self.released {
            self.released = true;
            self.cursor.release();
        }
    }
}

impl<C: Cursor> Drop for Traversal<C> {
    fn drop(&mut self) {
        self.release();
    }
}

impl<C: Cursor> fmt::Debug for Traversal<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Traversal")
            .field("released", &self.released)
            .finish_non_exhaustive()
    }
}

/// [`Iterator`] over a cursor. Returned by `SequenceExt::iter`.
pub struct CursorIter<C: Cursor> {
    traversal: Traversal<C>,
    done: bool,
}

impl<C: Cursor> CursorIter<C> {
    pub(crate) fn new(cursor: C) -> Self {
        Self {
            traversal: Traversal::new(cursor),
            done: false,
        }
    }
}

impl<C: Cursor> Iterator for CursorIter<C> {
    type Item = C::Item;

    fn next(&mut self) -> Option<C::Item> {
        if self.done {
            return None;
        }
        let next = self.traversal.next_item();
        if next.is_none() {
            // exhausted: free the source now instead of at drop
            self.done = true;
            self.traversal.release();
        }
        next
    }
}

impl<C: Cursor> std::iter::FusedIterator for CursorIter<C> {}
