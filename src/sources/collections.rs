//! Views over the non-contiguous standard containers.

use std::collections::{BTreeSet, HashSet, LinkedList, VecDeque, btree_set, hash_set, linked_list, vec_deque};
use std::hash::{BuildHasher, Hash};

use super::{AsSequence, IterCursor};
use crate::sequence::Sequence;
use crate::tier::{Countable, CountableTier, RandomAccess, RandomAccessTier};

/* ===================== VecDeque ===================== */

/// Random-access view over a ring buffer.
#[derive(Debug)]
pub struct DequeSeq<'a, T> {
    items: &'a VecDeque<T>,
}

impl<T> Clone for DequeSeq<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for DequeSeq<'_, T> {}

impl<'a, T> Sequence for DequeSeq<'a, T> {
    type Item = &'a T;
    type Tier = RandomAccessTier;
    type Cursor = IterCursor<vec_deque::Iter<'a, T>>;

    fn cursor(&self) -> Self::Cursor {
        IterCursor::new(self.items.iter())
    }
}

impl<T> Countable for DequeSeq<'_, T> {
    fn len(&self) -> usize {
        self.items.len()
    }
}

impl<'a, T> RandomAccess for DequeSeq<'a, T> {
    fn at(&self, index: usize) -> &'a T {
        &self.items[index]
    }
}

impl<T> AsSequence for VecDeque<T> {
    type Seq<'a>
        = DequeSeq<'a, T>
    where
        T: 'a;

    fn as_seq(&self) -> DequeSeq<'_, T> {
        DequeSeq { items: self }
    }
}

/* ===================== LinkedList ===================== */

/// Countable view over a linked list.
#[derive(Debug)]
pub struct ListSeq<'a, T> {
    items: &'a LinkedList<T>,
}

impl<T> ListSeq<'_, T> {
    pub fn contains(&self, value: &T) -> bool
    where
        T: PartialEq,
    {
        self.items.contains(value)
    }
}

impl<T> Clone for ListSeq<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for ListSeq<'_, T> {}

impl<'a, T> Sequence for ListSeq<'a, T> {
    type Item = &'a T;
    type Tier = CountableTier;
    type Cursor = IterCursor<linked_list::Iter<'a, T>>;

    fn cursor(&self) -> Self::Cursor {
        IterCursor::new(self.items.iter())
    }
}

impl<T> Countable for ListSeq<'_, T> {
    fn len(&self) -> usize {
        self.items.len()
    }
}

impl<T> AsSequence for LinkedList<T> {
    type Seq<'a>
        = ListSeq<'a, T>
    where
        T: 'a;

    fn as_seq(&self) -> ListSeq<'_, T> {
        ListSeq { items: self }
    }
}

/* ===================== HashSet ===================== */

/// Countable view over a hash set, with the set's own O(1) membership test.
/// Traversal order is the set's iteration order.
#[derive(Debug)]
pub struct HashSetSeq<'a, T, H> {
    items: &'a HashSet<T, H>,
}

impl<T: Eq + Hash, H: BuildHasher> HashSetSeq<'_, T, H> {
    pub fn contains(&self, value: &T) -> bool {
        self.items.contains(value)
    }
}

impl<T, H> Clone for HashSetSeq<'_, T, H> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, H> Copy for HashSetSeq<'_, T, H> {}

impl<'a, T, H> Sequence for HashSetSeq<'a, T, H> {
    type Item = &'a T;
    type Tier = CountableTier;
    type Cursor = IterCursor<hash_set::Iter<'a, T>>;

    fn cursor(&self) -> Self::Cursor {
        IterCursor::new(self.items.iter())
    }
}

impl<T, H> Countable for HashSetSeq<'_, T, H> {
    fn len(&self) -> usize {
        self.items.len()
    }
}

impl<T, H> AsSequence for HashSet<T, H> {
    type Seq<'a>
        = HashSetSeq<'a, T, H>
    where
        T: 'a,
        H: 'a;

    fn as_seq(&self) -> HashSetSeq<'_, T, H> {
        HashSetSeq { items: self }
    }
}

/* ===================== BTreeSet ===================== */

/// Countable view over an ordered set, with the set's own membership test.
#[derive(Debug)]
pub struct BTreeSetSeq<'a, T> {
    items: &'a BTreeSet<T>,
}

impl<T: Ord> BTreeSetSeq<'_, T> {
    pub fn contains(&self, value: &T) -> bool {
        self.items.contains(value)
    }
}

impl<T> Clone for BTreeSetSeq<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for BTreeSetSeq<'_, T> {}

impl<'a, T> Sequence for BTreeSetSeq<'a, T> {
    type Item = &'a T;
    type Tier = CountableTier;
    type Cursor = IterCursor<btree_set::Iter<'a, T>>;

    fn cursor(&self) -> Self::Cursor {
        IterCursor::new(self.items.iter())
    }
}

impl<T> Countable for BTreeSetSeq<'_, T> {
    fn len(&self) -> usize {
        self.items.len()
    }
}

impl<T> AsSequence for BTreeSet<T> {
    type Seq<'a>
        = BTreeSetSeq<'a, T>
    where
        T: 'a;

    fn as_seq(&self) -> BTreeSetSeq<'_, T> {
        BTreeSetSeq { items: self }
    }
}
