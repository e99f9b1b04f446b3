//! Sequence sources: views over standard containers, iterator factories and
//! generators.
//!
//! Views borrow their container; the container outlives every traversal by
//! construction. Each source reports the strongest tier it can honour:
//!
//! | Source | Tier |
//! |---|---|
//! | [`from_slice`], `Vec`, arrays, `VecDeque` | random access |
//! | [`range`], [`repeat`], [`empty`], [`once`] | random access |
//! | `LinkedList`, `HashSet`, `BTreeSet` | countable |
//! | [`from_fn`] | sequential |

mod collections;
mod generate;
mod slice;

pub use collections::*;
pub use generate::*;
pub use slice::*;

use crate::cursor::{Cursor, Slot};
use crate::sequence::Sequence;

/// Borrows a container as a [`Sequence`].
pub trait AsSequence {
    type Seq<'a>: Sequence
    where
        Self: 'a;

    fn as_seq(&self) -> Self::Seq<'_>;
}

/// Cursor over any standard iterator. Releasing drops the iterator.
pub struct IterCursor<I: Iterator> {
    iter: Option<I>,
    slot: Slot<I::Item>,
}

impl<I: Iterator> IterCursor<I> {
    pub fn new(iter: I) -> Self {
        Self {
            iter: Some(iter),
            slot: Slot::empty(),
        }
    }
}

impl<I: Iterator> Cursor for IterCursor<I> {
    type Item = I::Item;

    #[inline]
    fn advance(&mut self) -> bool {
        match self.iter.as_mut().and_then(Iterator::next) {
            Some(item) => {
                self.slot.set(item);
                true
            }
            None => {
                self.slot.clear();
                false
            }
        }
    }

    #[inline]
    fn current(&self) -> &I::Item {
        self.slot.get()
    }

    #[inline]
    fn take_current(&mut self) -> I::Item {
        self.slot.take()
    }

    fn release(&mut self) {
        self.iter = None;
        self.slot.clear();
    }
}
