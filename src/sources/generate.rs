//! Generated sequences and iterator factories.
//!
//! The signed-count generators validate their arguments when constructed, so
//! a bad count fails before any traversal starts.

use std::fmt;
use std::iter;
use std::marker::PhantomData;
use std::ops::RangeInclusive;

use super::IterCursor;
use crate::error::{Result, SeqError};
use crate::sequence::Sequence;
use crate::tier::{Countable, RandomAccess, RandomAccessTier, SequentialTier};

/* ===================== range ===================== */

/// `count` consecutive integers starting at `start`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeSeq {
    start: i32,
    count: usize,
}

/// Fails when `count` is negative or the last value would overflow `i32`.
pub fn range(start: i32, count: i32) -> Result<RangeSeq> {
    if count < 0 {
        return Err(SeqError::invalid_argument(
            "count",
            format!("must be non-negative, got {count}"),
        ));
    }
    if i64::from(start) + i64::from(count) - 1 > i64::from(i32::MAX) {
        return Err(SeqError::invalid_argument(
            "count",
            format!("{start} + {count} exceeds i32::MAX"),
        ));
    }
    Ok(RangeSeq {
        start,
        count: count as usize,
    })
}

impl RangeSeq {
    fn bounds(&self) -> RangeInclusive<i32> {
        if self.count == 0 {
            // empty by construction
            1..=0
        } else {
            self.start..=self.start + (self.count as i32 - 1)
        }
    }

    /// Arithmetic membership test.
    pub fn contains(&self, value: &i32) -> bool {
        self.bounds().contains(value)
    }
}

impl Sequence for RangeSeq {
    type Item = i32;
    type Tier = RandomAccessTier;
    type Cursor = IterCursor<RangeInclusive<i32>>;

    fn cursor(&self) -> Self::Cursor {
        IterCursor::new(self.bounds())
    }
}

impl Countable for RangeSeq {
    fn len(&self) -> usize {
        self.count
    }
}

impl RandomAccess for RangeSeq {
    fn at(&self, index: usize) -> i32 {
        assert!(index < self.count, "index {index} out of range for {} elements", self.count);
        self.start + index as i32
    }
}

/* ===================== repeat ===================== */

/// The same value `count` times.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepeatSeq<T> {
    value: T,
    count: usize,
}

/// Fails when `count` is negative.
pub fn repeat<T: Clone>(value: T, count: i32) -> Result<RepeatSeq<T>> {
    if count < 0 {
        return Err(SeqError::invalid_argument(
            "count",
            format!("must be non-negative, got {count}"),
        ));
    }
    Ok(RepeatSeq {
        value,
        count: count as usize,
    })
}

impl<T> RepeatSeq<T> {
    pub fn contains(&self, value: &T) -> bool
    where
        T: PartialEq,
    {
        self.count != 0 && self.value == *value
    }
}

impl<T: Clone> Sequence for RepeatSeq<T> {
    type Item = T;
    type Tier = RandomAccessTier;
    type Cursor = IterCursor<iter::RepeatN<T>>;

    fn cursor(&self) -> Self::Cursor {
        IterCursor::new(iter::repeat_n(self.value.clone(), self.count))
    }
}

impl<T: Clone> Countable for RepeatSeq<T> {
    fn len(&self) -> usize {
        self.count
    }
}

impl<T: Clone> RandomAccess for RepeatSeq<T> {
    fn at(&self, index: usize) -> T {
        assert!(index < self.count, "index {index} out of range for {} elements", self.count);
        self.value.clone()
    }
}

/* ===================== empty / once ===================== */

pub struct Empty<T>(PhantomData<fn() -> T>);

pub fn empty<T>() -> Empty<T> {
    Empty(PhantomData)
}

impl<T> Clone for Empty<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Empty<T> {}

impl<T> fmt::Debug for Empty<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Empty")
    }
}

impl<T> Sequence for Empty<T> {
    type Item = T;
    type Tier = RandomAccessTier;
    type Cursor = IterCursor<iter::Empty<T>>;

    fn cursor(&self) -> Self::Cursor {
        IterCursor::new(iter::empty())
    }
}

impl<T> Countable for Empty<T> {
    fn len(&self) -> usize {
        0
    }
}

impl<T> RandomAccess for Empty<T> {
    fn at(&self, index: usize) -> T {
        panic!("index {index} out of range for an empty sequence")
    }
}

/// Exactly one element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Once<T>(T);

pub fn once<T: Clone>(value: T) -> Once<T> {
    Once(value)
}

impl<T: Clone> Sequence for Once<T> {
    type Item = T;
    type Tier = RandomAccessTier;
    type Cursor = IterCursor<iter::Once<T>>;

    fn cursor(&self) -> Self::Cursor {
        IterCursor::new(iter::once(self.0.clone()))
    }
}

impl<T: Clone> Countable for Once<T> {
    fn len(&self) -> usize {
        1
    }
}

impl<T: Clone> RandomAccess for Once<T> {
    fn at(&self, index: usize) -> T {
        assert!(index == 0, "index {index} out of range for a single element");
        self.0.clone()
    }
}

/* ===================== from_fn ===================== */

/// Sequential source built from an iterator factory; every traversal calls
/// the factory once.
#[derive(Clone)]
pub struct FromFn<F> {
    factory: F,
}

pub fn from_fn<F, I>(factory: F) -> FromFn<F>
where
    F: Fn() -> I,
    I: IntoIterator,
{
    FromFn { factory }
}

impl<F> fmt::Debug for FromFn<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FromFn")
    }
}

impl<F, I> Sequence for FromFn<F>
where
    F: Fn() -> I,
    I: IntoIterator,
{
    type Item = I::Item;
    type Tier = SequentialTier;
    type Cursor = IterCursor<I::IntoIter>;

    fn cursor(&self) -> Self::Cursor {
        IterCursor::new((self.factory)().into_iter())
    }
}
