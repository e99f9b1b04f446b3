use std::borrow::Borrow;
use std::collections::HashMap;
use std::future::Future;
use std::hash::{BuildHasher, Hash, RandomState};

use super::reducers;
use super::{AsyncFilter, AsyncFlatMap, AsyncMap, AsyncMapAt, AsyncSequence, AsyncSkip, AsyncTake, CancellationToken, always};
use crate::error::{Result, SeqError};
use crate::reducers::{Single, Summable};

/// Combinators and terminals for every [`AsyncSequence`].
///
/// Every terminal takes the traversal's [`CancellationToken`] and fails with
/// [`SeqError::Cancelled`] once it is observed.
pub trait AsyncSequenceExt: AsyncSequence + Sized {
    /* ---------- combinators ---------- */

    fn map<U, F, Fut>(self, f: F) -> AsyncMap<Self, F>
    where
        F: Fn(Self::Item, CancellationToken) -> Fut + Clone,
        Fut: Future<Output = U>,
    {
        AsyncMap::new(self, f)
    }

    fn map_at<U, F, Fut>(self, f: F) -> AsyncMapAt<Self, F>
    where
        F: Fn(Self::Item, usize, CancellationToken) -> Fut + Clone,
        Fut: Future<Output = U>,
    {
        AsyncMapAt::new(self, f)
    }

    fn filter<P, Fut>(self, predicate: P) -> AsyncFilter<Self, P, Fut>
    where
        P: Fn(&Self::Item, CancellationToken) -> Fut + Clone,
        Fut: Future<Output = bool>,
    {
        AsyncFilter::new(self, predicate)
    }

    fn take(self, count: usize) -> AsyncTake<Self> {
        AsyncTake::new(self, count)
    }

    fn skip(self, count: usize) -> AsyncSkip<Self> {
        AsyncSkip::new(self, count)
    }

    fn flat_map<I, F, Fut>(self, f: F) -> AsyncFlatMap<Self, F>
    where
        I: IntoIterator,
        F: Fn(Self::Item, CancellationToken) -> Fut + Clone,
        Fut: Future<Output = I>,
    {
        AsyncFlatMap::new(self, f)
    }

    /* ---------- terminals ---------- */

    fn count(&self, cancel: &CancellationToken) -> impl Future<Output = Result<usize>> {
        reducers::count(self, cancel)
    }

    fn sum(&self, cancel: &CancellationToken) -> impl Future<Output = Result<<Self::Item as Summable>::Total>>
    where
        Self::Item: Summable,
    {
        reducers::sum(self, cancel)
    }

    fn any(&self, cancel: &CancellationToken) -> impl Future<Output = Result<bool>> {
        reducers::any(self, cancel)
    }

    fn any_by<P, Fut>(&self, predicate: P, cancel: &CancellationToken) -> impl Future<Output = Result<bool>>
    where
        P: FnMut(&Self::Item, CancellationToken) -> Fut,
        Fut: Future<Output = bool>,
    {
        reducers::any_by(self, predicate, cancel)
    }

    fn all<P, Fut>(&self, predicate: P, cancel: &CancellationToken) -> impl Future<Output = Result<bool>>
    where
        P: FnMut(&Self::Item, CancellationToken) -> Fut,
        Fut: Future<Output = bool>,
    {
        reducers::all(self, predicate, cancel)
    }

    fn contains<Q>(&self, value: &Q, cancel: &CancellationToken) -> impl Future<Output = Result<bool>>
    where
        Self::Item: Borrow<Q>,
        Q: PartialEq + ?Sized,
    {
        reducers::contains(self, value, cancel)
    }

    fn contains_with<Q, E>(&self, value: &Q, eq: E, cancel: &CancellationToken) -> impl Future<Output = Result<bool>>
    where
        Q: ?Sized,
        E: FnMut(&Self::Item, &Q) -> bool,
    {
        reducers::contains_with(self, value, eq, cancel)
    }

    fn first(&self, cancel: &CancellationToken) -> impl Future<Output = Result<Option<Self::Item>>> {
        reducers::first(self, cancel)
    }

    fn first_by<P, Fut>(&self, predicate: P, cancel: &CancellationToken) -> impl Future<Output = Result<Option<Self::Item>>>
    where
        P: FnMut(&Self::Item, CancellationToken) -> Fut,
        Fut: Future<Output = bool>,
    {
        reducers::first_by(self, predicate, cancel)
    }

    fn first_or_default(&self, cancel: &CancellationToken) -> impl Future<Output = Result<Self::Item>>
    where
        Self::Item: Default,
    {
        async move { Ok(reducers::first(self, cancel).await?.unwrap_or_default()) }
    }

    fn first_or_err(&self, cancel: &CancellationToken) -> impl Future<Output = Result<Self::Item>> {
        async move { reducers::first(self, cancel).await?.ok_or(SeqError::NoElements) }
    }

    fn single(&self, cancel: &CancellationToken) -> impl Future<Output = Result<Option<Self::Item>>> {
        async move { Ok(reducers::scan_single(self, always, cancel).await?.into_option()) }
    }

    fn single_by<P, Fut>(&self, predicate: P, cancel: &CancellationToken) -> impl Future<Output = Result<Option<Self::Item>>>
    where
        P: FnMut(&Self::Item, CancellationToken) -> Fut,
        Fut: Future<Output = bool>,
    {
        async move { Ok(reducers::scan_single(self, predicate, cancel).await?.into_option()) }
    }

    fn single_or_default(&self, cancel: &CancellationToken) -> impl Future<Output = Result<Self::Item>>
    where
        Self::Item: Default,
    {
        async move { Ok(reducers::scan_single(self, always, cancel).await?.into_option().unwrap_or_default()) }
    }

    fn single_or_err(&self, cancel: &CancellationToken) -> impl Future<Output = Result<Self::Item>> {
        async move { reducers::scan_single(self, always, cancel).await?.into_result() }
    }

    fn single_by_or_err<P, Fut>(&self, predicate: P, cancel: &CancellationToken) -> impl Future<Output = Result<Self::Item>>
    where
        P: FnMut(&Self::Item, CancellationToken) -> Fut,
        Fut: Future<Output = bool>,
    {
        async move { reducers::scan_single(self, predicate, cancel).await?.into_result() }
    }

    /// Raw uniqueness outcome, for callers that need to tell "empty" from
    /// "many".
    fn scan_single(&self, cancel: &CancellationToken) -> impl Future<Output = Result<Single<Self::Item>>> {
        reducers::scan_single(self, always, cancel)
    }

    fn element_at(&self, index: usize, cancel: &CancellationToken) -> impl Future<Output = Result<Option<Self::Item>>> {
        async move { Ok(reducers::element_at(self, index, cancel).await?.ok()) }
    }

    fn element_at_or_default(&self, index: usize, cancel: &CancellationToken) -> impl Future<Output = Result<Self::Item>>
    where
        Self::Item: Default,
    {
        async move { Ok(reducers::element_at(self, index, cancel).await?.unwrap_or_default()) }
    }

    fn element_at_or_err(&self, index: usize, cancel: &CancellationToken) -> impl Future<Output = Result<Self::Item>> {
        async move {
            reducers::element_at(self, index, cancel)
                .await?
                .map_err(|len| SeqError::IndexOutOfRange { index, len })
        }
    }

    fn to_vec(&self, cancel: &CancellationToken) -> impl Future<Output = Result<Vec<Self::Item>>> {
        reducers::to_vec(self, cancel)
    }

    fn to_boxed_slice(&self, cancel: &CancellationToken) -> impl Future<Output = Result<Box<[Self::Item]>>> {
        async move { Ok(reducers::to_vec(self, cancel).await?.into_boxed_slice()) }
    }

    fn copy_to(&self, dest: &mut [Self::Item], cancel: &CancellationToken) -> impl Future<Output = Result<usize>> {
        reducers::copy_to(self, dest, cancel)
    }

    fn to_map<K, KF>(&self, key: KF, cancel: &CancellationToken) -> impl Future<Output = Result<HashMap<K, Self::Item>>>
    where
        K: Eq + Hash,
        KF: FnMut(&Self::Item) -> K,
    {
        reducers::to_map_in(self, key, |item| item, RandomState::new(), cancel)
    }

    fn to_map_with<K, V, KF, VF>(
        &self,
        key: KF,
        value: VF,
        cancel: &CancellationToken,
    ) -> impl Future<Output = Result<HashMap<K, V>>>
    where
        K: Eq + Hash,
        KF: FnMut(&Self::Item) -> K,
        VF: FnMut(Self::Item) -> V,
    {
        reducers::to_map_in(self, key, value, RandomState::new(), cancel)
    }

    fn to_map_in<K, V, H, KF, VF>(
        &self,
        key: KF,
        value: VF,
        hasher: H,
        cancel: &CancellationToken,
    ) -> impl Future<Output = Result<HashMap<K, V, H>>>
    where
        K: Eq + Hash,
        H: BuildHasher,
        KF: FnMut(&Self::Item) -> K,
        VF: FnMut(Self::Item) -> V,
    {
        reducers::to_map_in(self, key, value, hasher, cancel)
    }

    /// Collisions are folded with `merge(earlier, later)`.
    fn to_map_merge<K, V, KF, VF, M>(
        &self,
        key: KF,
        value: VF,
        merge: M,
        cancel: &CancellationToken,
    ) -> impl Future<Output = Result<HashMap<K, V>>>
    where
        K: Eq + Hash,
        KF: FnMut(&Self::Item) -> K,
        VF: FnMut(Self::Item) -> V,
        M: FnMut(V, V) -> V,
    {
        reducers::to_map_merge(self, key, value, merge, cancel)
    }
}

impl<S: AsyncSequence> AsyncSequenceExt for S {}
