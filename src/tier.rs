//! Capability tiers and compile-time strategy selection.
//!
//! Every [`Sequence`] names its strongest capability through an associated
//! marker type ([`SequentialTier`], [`CountableTier`] or [`RandomAccessTier`]).
//! Terminals pick their implementation through [`TierStrategy`], which is
//! implemented once per marker, so the choice is made by the type checker
//! and costs nothing at run time.
//!
//! A sequence whose `Tier` is [`CountableTier`] must implement [`Countable`];
//! one whose `Tier` is [`RandomAccessTier`] must implement [`RandomAccess`].
//! Terminals that dispatch on the tier do not compile otherwise.

use crate::cursor::Traversal;
use crate::sequence::Sequence;

mod sealed {
    pub trait Sealed {}
    impl Sealed for super::SequentialTier {}
    impl Sealed for super::CountableTier {}
    impl Sealed for super::RandomAccessTier {}
}

/// Closed set of tier markers.
pub trait Tier: sealed::Sealed + 'static {
    /// Label used in log events.
    const NAME: &'static str;
}

/// Forward traversal only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SequentialTier;

/// Length known without traversal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CountableTier;

/// Constant-time indexing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RandomAccessTier;

impl Tier for SequentialTier {
    const NAME: &'static str = "sequential";
}

impl Tier for CountableTier {
    const NAME: &'static str = "countable";
}

impl Tier for RandomAccessTier {
    const NAME: &'static str = "random-access";
}

/// A sequence whose length is available in O(1).
pub trait Countable: Sequence {
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A sequence with O(1) positional access.
pub trait RandomAccess: Countable {
    /// The element at `index`.
    ///
    /// # Panics
    /// May panic when `index >= self.len()`; callers check the bound first.
    fn at(&self, index: usize) -> Self::Item;
}

/// Per-tier implementation of the terminals whose cost depends on the tier.
pub trait TierStrategy<S: Sequence + ?Sized>: Tier {
    /// Length without traversal, when the tier has one.
    fn known_len(source: &S) -> Option<usize>;

    fn count(source: &S) -> usize;

    /// The element at `index`, or the sequence length when `index` is past
    /// the end.
    fn element_at(source: &S, index: usize) -> Result<S::Item, usize>;
}

impl<S: Sequence + ?Sized> TierStrategy<S> for SequentialTier {
    #[inline]
    fn known_len(_: &S) -> Option<usize> {
        None
    }

    fn count(source: &S) -> usize {
        let mut traversal = Traversal::new(source.cursor());
        let mut n = 0;
        while traversal.advance() {
            n += 1;
        }
        n
    }

    fn element_at(source: &S, index: usize) -> Result<S::Item, usize> {
        let mut traversal = Traversal::new(source.cursor());
        let mut seen = 0;
        while traversal.advance() {
            if seen == index {
                return Ok(traversal.take_current());
            }
            seen += 1;
        }
        Err(seen)
    }
}

impl<S: Countable + ?Sized> TierStrategy<S> for CountableTier {
    #[inline]
    fn known_len(source: &S) -> Option<usize> {
        Some(source.len())
    }

    #[inline]
    fn count(source: &S) -> usize {
        source.len()
    }

    fn element_at(source: &S, index: usize) -> Result<S::Item, usize> {
        let len = source.len();
        if index >= len {
            return Err(len);
        }
        let mut traversal = Traversal::new(source.cursor());
        let mut seen = 0;
        while traversal.advance() {
            if seen == index {
                return Ok(traversal.take_current());
            }
            seen += 1;
        }
        // the source under-reported its length
        Err(seen)
    }
}

impl<S: RandomAccess + ?Sized> TierStrategy<S> for RandomAccessTier {
    #[inline]
    fn known_len(source: &S) -> Option<usize> {
        Some(source.len())
    }

    #[inline]
    fn count(source: &S) -> usize {
        source.len()
    }

    #[inline]
    fn element_at(source: &S, index: usize) -> Result<S::Item, usize> {
        let len = source.len();
        if index < len {
            Ok(source.at(index))
        } else {
            Err(len)
        }
    }
}
