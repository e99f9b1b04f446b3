//! List-shaped view over a random-access sequence.
//!
//! [`ReadOnlyList`] offers the read side of a list (length, indexing,
//! membership, search, copying) on top of any [`RandomAccess`] sequence.
//! Its [`ListMut`] implementation rejects every mutation with
//! [`SeqError::Unsupported`], so code written against `ListMut` can be handed
//! either a real `Vec` or a read-only view.

use std::borrow::Borrow;

use tracing::debug;

use crate::cursor::CursorIter;
use crate::error::{Result, SeqError};
use crate::sequence::{Sequence, SequenceExt};
use crate::tier::{RandomAccess, TierStrategy};

/// Mutation surface shared by real lists and read-only views.
pub trait ListMut<T> {
    fn push(&mut self, value: T) -> Result<()>;

    fn insert(&mut self, index: usize, value: T) -> Result<()>;

    fn remove_at(&mut self, index: usize) -> Result<T>;

    fn clear(&mut self) -> Result<()>;
}

impl<T> ListMut<T> for Vec<T> {
    fn push(&mut self, value: T) -> Result<()> {
        Vec::push(self, value);
        Ok(())
    }

    fn insert(&mut self, index: usize, value: T) -> Result<()> {
        if index > self.len() {
            return Err(SeqError::IndexOutOfRange {
                index,
                len: self.len(),
            });
        }
        Vec::insert(self, index, value);
        Ok(())
    }

    fn remove_at(&mut self, index: usize) -> Result<T> {
        if index >= self.len() {
            return Err(SeqError::IndexOutOfRange {
                index,
                len: self.len(),
            });
        }
        Ok(self.remove(index))
    }

    fn clear(&mut self) -> Result<()> {
        Vec::clear(self);
        Ok(())
    }
}

/// Read-only list over a random-access sequence.
#[derive(Debug, Clone)]
pub struct ReadOnlyList<S> {
    source: S,
}

impl<S: RandomAccess> ReadOnlyList<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub fn len(&self) -> usize {
        self.source.len()
    }

    pub fn is_empty(&self) -> bool {
        self.source.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<S::Item> {
        (index < self.source.len()).then(|| self.source.at(index))
    }

    /// Position of the first element equal to `value`.
    pub fn index_of<Q>(&self, value: &Q) -> Option<usize>
    where
        Q: PartialEq + ?Sized,
        S::Item: Borrow<Q>,
    {
        (0..self.source.len()).find(|&i| Borrow::<Q>::borrow(&self.source.at(i)) == value)
    }

    pub fn contains<Q>(&self, value: &Q) -> bool
    where
        Q: PartialEq + ?Sized,
        S::Item: Borrow<Q>,
    {
        !self.is_empty() && self.index_of(value).is_some()
    }

    /// Copies every element into the front of `dest`; a short destination is
    /// rejected before anything is written.
    pub fn copy_to(&self, dest: &mut [S::Item]) -> Result<usize>
    where
        S::Tier: TierStrategy<S>,
    {
        self.source.copy_to(dest)
    }

    pub fn iter(&self) -> CursorIter<S::Cursor> {
        self.source.iter()
    }

    pub fn into_inner(self) -> S {
        self.source
    }
}

impl<S: RandomAccess> Sequence for ReadOnlyList<S> {
    type Item = S::Item;
    type Tier = S::Tier;
    type Cursor = S::Cursor;

    fn cursor(&self) -> S::Cursor {
        self.source.cursor()
    }
}

impl<S: RandomAccess> crate::tier::Countable for ReadOnlyList<S> {
    fn len(&self) -> usize {
        self.source.len()
    }
}

impl<S: RandomAccess> RandomAccess for ReadOnlyList<S> {
    fn at(&self, index: usize) -> S::Item {
        self.source.at(index)
    }
}

fn rejected<T>(operation: &'static str) -> Result<T> {
    debug!(operation, "mutation rejected");
    Err(SeqError::Unsupported(operation))
}

impl<S: RandomAccess> ListMut<S::Item> for ReadOnlyList<S> {
    fn push(&mut self, _: S::Item) -> Result<()> {
        rejected("push on a read-only list")
    }

    fn insert(&mut self, _: usize, _: S::Item) -> Result<()> {
        rejected("insert on a read-only list")
    }

    fn remove_at(&mut self, _: usize) -> Result<S::Item> {
        rejected("remove_at on a read-only list")
    }

    fn clear(&mut self) -> Result<()> {
        rejected("clear on a read-only list")
    }
}
