//! The sequence abstraction and its fluent surface.
//!
//! A [`Sequence`] is an immutable, re-traversable description of elements.
//! Every call to [`Sequence::cursor`] starts an independent traversal.
//! [`SequenceExt`] is implemented for every sequence and carries the
//! combinators and terminal reducers.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::{BuildHasher, Hash};

use crate::cursor::{Cursor, CursorIter};
use crate::error::Result;
use crate::extensions::Composite;
use crate::ops::{Cloned, Copied, Filter, FilterAt, FlatMap, Map, MapAt, Skip, Take};
use crate::reducers::{self, Summable};
use crate::tier::{Tier, TierStrategy};

/// A re-traversable source of elements.
pub trait Sequence {
    type Item;

    /// Strongest capability of this sequence: one of
    /// [`SequentialTier`](crate::SequentialTier),
    /// [`CountableTier`](crate::CountableTier) or
    /// [`RandomAccessTier`](crate::RandomAccessTier).
    type Tier: Tier;

    type Cursor: Cursor<Item = Self::Item>;

    /// Starts a fresh traversal.
    fn cursor(&self) -> Self::Cursor;
}

/// Combinators and terminals for every [`Sequence`].
///
/// Terminals whose cost depends on the capability tier carry a
/// `Self::Tier: TierStrategy<Self>` bound; it always holds for concrete
/// sequences and only has to be spelled out in generic code.
pub trait SequenceExt: Sequence + Sized {
    /* ---------- combinators ---------- */

    /// Projects each element.
    fn map<U, F>(self, f: F) -> Map<Self, F>
    where
        F: Fn(Self::Item) -> U + Clone,
    {
        Map::new(self, f)
    }

    /// Projects each element together with its zero-based position.
    fn map_at<U, F>(self, f: F) -> MapAt<Self, F>
    where
        F: Fn(Self::Item, usize) -> U + Clone,
    {
        MapAt::new(self, f)
    }

    /// Keeps the elements accepted by `predicate`.
    fn filter<P>(self, predicate: P) -> Filter<Self, P>
    where
        P: Fn(&Self::Item) -> bool + Clone,
    {
        Filter::new(self, predicate)
    }

    /// Keeps the elements accepted by `predicate`, which also sees each
    /// element's position in this sequence.
    fn filter_at<P>(self, predicate: P) -> FilterAt<Self, P>
    where
        P: Fn(&Self::Item, usize) -> bool + Clone,
    {
        FilterAt::new(self, predicate)
    }

    /// At most `count` leading elements. The source is never advanced more
    /// than `count` times.
    fn take(self, count: usize) -> Take<Self> {
        Take::new(self, count)
    }

    /// Everything after the first `count` elements.
    fn skip(self, count: usize) -> Skip<Self> {
        Skip::new(self, count)
    }

    /// Replaces each element with the elements of a sub-sequence.
    fn flat_map<I, F>(self, f: F) -> FlatMap<Self, F>
    where
        I: IntoIterator,
        F: Fn(Self::Item) -> I + Clone,
    {
        FlatMap::new(self, f)
    }

    fn copied<'a, T>(self) -> Map<Self, Copied>
    where
        T: Copy + 'a,
        Self: Sequence<Item = &'a T>,
    {
        Map::new(self, Copied)
    }

    fn cloned<'a, T>(self) -> Map<Self, Cloned>
    where
        T: Clone + 'a,
        Self: Sequence<Item = &'a T>,
    {
        Map::new(self, Cloned)
    }

    /// Hands this sequence to a reusable chain.
    fn apply<C: Composite<Self>>(self, composite: &C) -> C::Output {
        composite.expand(self)
    }

    /// A standard iterator over a fresh traversal.
    fn iter(&self) -> CursorIter<Self::Cursor> {
        CursorIter::new(self.cursor())
    }

    /* ---------- aggregates ---------- */

    /// Number of elements. O(1) for countable tiers.
    fn count(&self) -> usize
    where
        Self::Tier: TierStrategy<Self>,
    {
        reducers::count(self)
    }

    /// Checked sum; integer overflow is reported as
    /// [`SeqError::Overflow`](crate::SeqError::Overflow).
    fn sum(&self) -> Result<<Self::Item as Summable>::Total>
    where
        Self::Item: Summable,
    {
        reducers::sum(self)
    }

    /* ---------- quantifiers ---------- */

    /// `true` when the sequence has at least one element.
    fn any(&self) -> bool
    where
        Self::Tier: TierStrategy<Self>,
    {
        reducers::any(self)
    }

    fn any_by<P>(&self, predicate: P) -> bool
    where
        P: FnMut(&Self::Item) -> bool,
    {
        reducers::any_by(self, predicate)
    }

    /// `true` when every element satisfies `predicate`; vacuously `true`
    /// when empty.
    fn all<P>(&self, predicate: P) -> bool
    where
        P: FnMut(&Self::Item) -> bool,
    {
        reducers::all(self, predicate)
    }

    fn contains<Q>(&self, value: &Q) -> bool
    where
        Q: PartialEq + ?Sized,
        Self::Item: Borrow<Q>,
        Self::Tier: TierStrategy<Self>,
    {
        reducers::contains(self, value)
    }

    /// Membership under a caller-supplied equality.
    fn contains_with<Q, E>(&self, value: &Q, eq: E) -> bool
    where
        Q: ?Sized,
        E: FnMut(&Self::Item, &Q) -> bool,
        Self::Tier: TierStrategy<Self>,
    {
        reducers::contains_with(self, value, eq)
    }

    /* ---------- element access ---------- */

    fn first(&self) -> Option<Self::Item> {
        reducers::first(self)
    }

    fn first_by<P>(&self, predicate: P) -> Option<Self::Item>
    where
        P: FnMut(&Self::Item) -> bool,
    {
        reducers::first_by(self, predicate)
    }

    fn first_or_default(&self) -> Self::Item
    where
        Self::Item: Default,
    {
        reducers::first(self).unwrap_or_default()
    }

    /// Fails with [`SeqError::NoElements`](crate::SeqError::NoElements) when
    /// empty.
    fn first_or_err(&self) -> Result<Self::Item> {
        reducers::first_or_err(self)
    }

    /// The only element. `None` both when the sequence is empty and when it
    /// has more than one element; use [`single_or_err`](Self::single_or_err)
    /// to tell the two apart.
    fn single(&self) -> Option<Self::Item> {
        reducers::single_by(self, |_| true)
    }

    /// The only element accepted by `predicate`, scanning past the first
    /// match to confirm uniqueness.
    fn single_by<P>(&self, predicate: P) -> Option<Self::Item>
    where
        P: FnMut(&Self::Item) -> bool,
    {
        reducers::single_by(self, predicate)
    }

    /// The only element, or the default for zero or several.
    fn single_or_default(&self) -> Self::Item
    where
        Self::Item: Default,
    {
        reducers::single_by(self, |_| true).unwrap_or_default()
    }

    fn single_or_err(&self) -> Result<Self::Item> {
        reducers::single_by_or_err(self, |_| true)
    }

    fn single_by_or_err<P>(&self, predicate: P) -> Result<Self::Item>
    where
        P: FnMut(&Self::Item) -> bool,
    {
        reducers::single_by_or_err(self, predicate)
    }

    /// The element at `index`. Random-access tiers index directly;
    /// countable tiers reject out-of-range positions without traversal.
    fn element_at(&self, index: usize) -> Option<Self::Item>
    where
        Self::Tier: TierStrategy<Self>,
    {
        reducers::element_at(self, index)
    }

    fn element_at_or_default(&self, index: usize) -> Self::Item
    where
        Self::Item: Default,
        Self::Tier: TierStrategy<Self>,
    {
        reducers::element_at(self, index).unwrap_or_default()
    }

    fn element_at_or_err(&self, index: usize) -> Result<Self::Item>
    where
        Self::Tier: TierStrategy<Self>,
    {
        reducers::element_at_or_err(self, index)
    }

    /* ---------- conversion ---------- */

    /// Collects into a vector, preallocated when the length is known.
    fn to_vec(&self) -> Vec<Self::Item>
    where
        Self::Tier: TierStrategy<Self>,
    {
        reducers::to_vec(self)
    }

    fn to_boxed_slice(&self) -> Box<[Self::Item]>
    where
        Self::Tier: TierStrategy<Self>,
    {
        reducers::to_vec(self).into_boxed_slice()
    }

    /// Indexes elements by `key`. A repeated key fails with
    /// [`SeqError::DuplicateKey`](crate::SeqError::DuplicateKey).
    fn to_map<K, KF>(&self, key: KF) -> Result<HashMap<K, Self::Item>>
    where
        K: Eq + Hash,
        KF: FnMut(&Self::Item) -> K,
        Self::Tier: TierStrategy<Self>,
    {
        reducers::to_map_in(self, key, |item| item, Default::default())
    }

    fn to_map_with<K, V, KF, VF>(&self, key: KF, value: VF) -> Result<HashMap<K, V>>
    where
        K: Eq + Hash,
        KF: FnMut(&Self::Item) -> K,
        VF: FnMut(Self::Item) -> V,
        Self::Tier: TierStrategy<Self>,
    {
        reducers::to_map_in(self, key, value, Default::default())
    }

    /// Like [`to_map_with`](Self::to_map_with), with the key hashing and
    /// equality supplied by `hasher`.
    fn to_map_in<K, V, H, KF, VF>(&self, key: KF, value: VF, hasher: H) -> Result<HashMap<K, V, H>>
    where
        K: Eq + Hash,
        H: BuildHasher,
        KF: FnMut(&Self::Item) -> K,
        VF: FnMut(Self::Item) -> V,
        Self::Tier: TierStrategy<Self>,
    {
        reducers::to_map_in(self, key, value, hasher)
    }

    /// Indexes elements by `key`, folding values of repeated keys with
    /// `merge(earlier, later)`. Never fails.
    fn to_map_merge<K, V, KF, VF, M>(&self, key: KF, value: VF, merge: M) -> HashMap<K, V>
    where
        K: Eq + Hash,
        KF: FnMut(&Self::Item) -> K,
        VF: FnMut(Self::Item) -> V,
        M: FnMut(V, V) -> V,
        Self::Tier: TierStrategy<Self>,
    {
        reducers::to_map_merge(self, key, value, merge)
    }

    /// Writes elements into `dest` from the front and returns how many were
    /// written.
    ///
    /// With a known length, a short destination is rejected before anything
    /// is written. Otherwise writing stops with an error at the first element
    /// that does not fit.
    fn copy_to(&self, dest: &mut [Self::Item]) -> Result<usize>
    where
        Self::Tier: TierStrategy<Self>,
    {
        reducers::copy_to(self, dest)
    }
}

impl<S: Sequence> SequenceExt for S {}
