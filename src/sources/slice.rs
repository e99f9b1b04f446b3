//! Contiguous storage: slices, `Vec`, arrays.

use std::fmt;
use std::slice;

use super::{AsSequence, IterCursor};
use crate::sequence::Sequence;
use crate::tier::{Countable, RandomAccess, RandomAccessTier};

/// Random-access view over a slice. Elements are yielded by reference.
pub struct SliceSeq<'a, T> {
    items: &'a [T],
}

/// Views `items` as a sequence.
pub fn from_slice<T>(items: &[T]) -> SliceSeq<'_, T> {
    SliceSeq { items }
}

impl<'a, T> SliceSeq<'a, T> {
    pub fn as_slice(&self) -> &'a [T] {
        self.items
    }

    /// Native membership test of the underlying slice.
    pub fn contains(&self, value: &T) -> bool
    where
        T: PartialEq,
    {
        self.items.contains(value)
    }
}

impl<T> Clone for SliceSeq<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for SliceSeq<'_, T> {}

impl<T: fmt::Debug> fmt::Debug for SliceSeq<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SliceSeq").field(&self.items).finish()
    }
}

impl<'a, T> Sequence for SliceSeq<'a, T> {
    type Item = &'a T;
    type Tier = RandomAccessTier;
    type Cursor = IterCursor<slice::Iter<'a, T>>;

    fn cursor(&self) -> Self::Cursor {
        IterCursor::new(self.items.iter())
    }
}

impl<T> Countable for SliceSeq<'_, T> {
    #[inline]
    fn len(&self) -> usize {
        self.items.len()
    }
}

impl<'a, T> RandomAccess for SliceSeq<'a, T> {
    #[inline]
    fn at(&self, index: usize) -> &'a T {
        &self.items[index]
    }
}

impl<T> AsSequence for [T] {
    type Seq<'a>
        = SliceSeq<'a, T>
    where
        T: 'a;

    fn as_seq(&self) -> SliceSeq<'_, T> {
        from_slice(self)
    }
}

impl<T> AsSequence for Vec<T> {
    type Seq<'a>
        = SliceSeq<'a, T>
    where
        T: 'a;

    fn as_seq(&self) -> SliceSeq<'_, T> {
        from_slice(self)
    }
}

impl<T, const N: usize> AsSequence for [T; N] {
    type Seq<'a>
        = SliceSeq<'a, T>
    where
        T: 'a;

    fn as_seq(&self) -> SliceSeq<'_, T> {
        from_slice(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sequence::SequenceExt;

    #[test]
    fn vec_and_array_views_share_the_slice_adapter() {
        let v = vec![3, 1, 2];
        let a = [3, 1, 2];
        assert_eq!(v.as_seq().to_vec(), a.as_seq().to_vec());
        assert_eq!(v.as_seq().element_at(2), Some(&2));
        assert!(a.as_seq().contains(&1));
        assert!(!a.as_seq().contains(&7));
    }
}
