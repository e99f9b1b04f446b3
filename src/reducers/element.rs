//! Element access: `first`, `single`, `element_at`.
//!
//! The `Option` forms report absence as `None`. The `_or_err` forms turn the
//! same outcomes into [`SeqError`] values.

use tracing::trace;

use crate::cursor::Traversal;
use crate::error::{Result, SeqError};
use crate::sequence::Sequence;
use crate::tier::{Tier, TierStrategy};

/// Outcome of a uniqueness scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Single<T> {
    Empty,
    One(T),
    Many,
}

impl<T> Single<T> {
    /// Collapses "empty" and "many" into `None`.
    pub fn into_option(self) -> Option<T> {
        match self {
            Single::One(value) => Some(value),
            Single::Empty | Single::Many => None,
        }
    }

    pub fn into_result(self) -> Result<T> {
        match self {
            Single::One(value) => Ok(value),
            Single::Empty => Err(SeqError::NoElements),
            Single::Many => Err(SeqError::MultipleElements),
        }
    }
}

pub fn first<S>(source: &S) -> Option<S::Item>
where
    S: Sequence + ?Sized,
{
    Traversal::new(source.cursor()).next_item()
}

pub fn first_by<S, P>(source: &S, mut predicate: P) -> Option<S::Item>
where
    S: Sequence + ?Sized,
    P: FnMut(&S::Item) -> bool,
{
    let mut traversal = Traversal::new(source.cursor());
    while traversal.advance() {
        if predicate(traversal.current()) {
            return Some(traversal.take_current());
        }
    }
    None
}

pub fn first_or_err<S>(source: &S) -> Result<S::Item>
where
    S: Sequence + ?Sized,
{
    first(source).ok_or(SeqError::NoElements)
}

/// Scans for elements accepted by `predicate`. The scan continues after the
/// first match and stops at the second.
pub fn scan_single<S, P>(source: &S, mut predicate: P) -> Single<S::Item>
where
    S: Sequence + ?Sized,
    P: FnMut(&S::Item) -> bool,
{
    let mut traversal = Traversal::new(source.cursor());
    let mut found = None;
    while traversal.advance() {
        if predicate(traversal.current()) {
            if found.is_some() {
                return Single::Many;
            }
            found = Some(traversal.take_current());
        }
    }
    match found {
        Some(value) => Single::One(value),
        None => Single::Empty,
    }
}

pub fn single_by<S, P>(source: &S, predicate: P) -> Option<S::Item>
where
    S: Sequence + ?Sized,
    P: FnMut(&S::Item) -> bool,
{
    scan_single(source, predicate).into_option()
}

pub fn single_by_or_err<S, P>(source: &S, predicate: P) -> Result<S::Item>
where
    S: Sequence + ?Sized,
    P: FnMut(&S::Item) -> bool,
{
    scan_single(source, predicate).into_result()
}

pub fn element_at<S>(source: &S, index: usize) -> Option<S::Item>
where
    S: Sequence + ?Sized,
    S::Tier: TierStrategy<S>,
{
    <S::Tier as TierStrategy<S>>::element_at(source, index).ok()
}

pub fn element_at_or_err<S>(source: &S, index: usize) -> Result<S::Item>
where
    S: Sequence + ?Sized,
    S::Tier: TierStrategy<S>,
{
    <S::Tier as TierStrategy<S>>::element_at(source, index).map_err(|len| {
        trace!(tier = <S::Tier as Tier>::NAME, index, len, "element_at past the end");
        SeqError::IndexOutOfRange { index, len }
    })
}
