//! Async terminal reducers.
//!
//! Same semantics as [`crate::reducers`], with two additions: every
//! reducer resolves to `Err(SeqError::Cancelled)` when the token is observed,
//! and the cursor's `release` is awaited before the result is returned,
//! whatever the outcome.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::future::Future;
use std::hash::{BuildHasher, Hash};

use tracing::debug;

use super::{AsyncCursor, AsyncSequence, CancellationToken, race};
use crate::error::{Result, SeqError};
use crate::reducers::{Single, Summable};

/// Runs `$body` against a fresh cursor bound to `$cursor`, then awaits
/// release. The body is an async block that must end in `Ok::<_, SeqError>`.
/// A panic in the body skips the awaited release; cursors that hold
/// resources (lifted synchronous cursors, streams) free them on drop.
macro_rules! drive {
    ($source:expr, |$cursor:ident| $body:block) => {{
        let mut $cursor = $source.cursor();
        let outcome = async { $body }.await;
        $cursor.release().await;
        if let Err(err) = &outcome {
            debug!(%err, "async traversal ended early");
        }
        outcome
    }};
}

pub async fn count<S>(source: &S, cancel: &CancellationToken) -> Result<usize>
where
    S: AsyncSequence + ?Sized,
{
    drive!(source, |cursor| {
        let mut n = 0;
        while cursor.advance(cancel).await? {
            n += 1;
        }
        Ok::<_, SeqError>(n)
    })
}

pub async fn sum<S>(source: &S, cancel: &CancellationToken) -> Result<<S::Item as Summable>::Total>
where
    S: AsyncSequence + ?Sized,
    S::Item: Summable,
{
    drive!(source, |cursor| {
        let mut total = <S::Item as Summable>::zero();
        while cursor.advance(cancel).await? {
            total = Summable::accumulate(total, cursor.take_current()).ok_or(SeqError::Overflow)?;
        }
        Ok::<_, SeqError>(total)
    })
}

pub async fn any<S>(source: &S, cancel: &CancellationToken) -> Result<bool>
where
    S: AsyncSequence + ?Sized,
{
    drive!(source, |cursor| { Ok::<_, SeqError>(cursor.advance(cancel).await?) })
}

pub async fn any_by<S, P, Fut>(source: &S, mut predicate: P, cancel: &CancellationToken) -> Result<bool>
where
    S: AsyncSequence + ?Sized,
    P: FnMut(&S::Item, CancellationToken) -> Fut,
    Fut: Future<Output = bool>,
{
    drive!(source, |cursor| {
        while cursor.advance(cancel).await? {
            let decision = predicate(cursor.current(), cancel.clone());
            if race(cancel, decision).await? {
                return Ok(true);
            }
        }
        Ok::<_, SeqError>(false)
    })
}

pub async fn all<S, P, Fut>(source: &S, mut predicate: P, cancel: &CancellationToken) -> Result<bool>
where
    S: AsyncSequence + ?Sized,
    P: FnMut(&S::Item, CancellationToken) -> Fut,
    Fut: Future<Output = bool>,
{
    drive!(source, |cursor| {
        while cursor.advance(cancel).await? {
            let decision = predicate(cursor.current(), cancel.clone());
            if !race(cancel, decision).await? {
                return Ok(false);
            }
        }
        Ok::<_, SeqError>(true)
    })
}

pub async fn contains<S, Q>(source: &S, value: &Q, cancel: &CancellationToken) -> Result<bool>
where
    S: AsyncSequence + ?Sized,
    S::Item: Borrow<Q>,
    Q: PartialEq + ?Sized,
{
    contains_with(source, value, |item, value| Borrow::<Q>::borrow(item) == value, cancel).await
}

pub async fn contains_with<S, Q, E>(source: &S, value: &Q, mut eq: E, cancel: &CancellationToken) -> Result<bool>
where
    S: AsyncSequence + ?Sized,
    Q: ?Sized,
    E: FnMut(&S::Item, &Q) -> bool,
{
    drive!(source, |cursor| {
        while cursor.advance(cancel).await? {
            if eq(cursor.current(), value) {
                return Ok(true);
            }
        }
        Ok::<_, SeqError>(false)
    })
}

pub async fn first<S>(source: &S, cancel: &CancellationToken) -> Result<Option<S::Item>>
where
    S: AsyncSequence + ?Sized,
{
    drive!(source, |cursor| {
        let found = if cursor.advance(cancel).await? {
            Some(cursor.take_current())
        } else {
            None
        };
        Ok::<_, SeqError>(found)
    })
}

pub async fn first_by<S, P, Fut>(source: &S, mut predicate: P, cancel: &CancellationToken) -> Result<Option<S::Item>>
where
    S: AsyncSequence + ?Sized,
    P: FnMut(&S::Item, CancellationToken) -> Fut,
    Fut: Future<Output = bool>,
{
    drive!(source, |cursor| {
        while cursor.advance(cancel).await? {
            let decision = predicate(cursor.current(), cancel.clone());
            if race(cancel, decision).await? {
                return Ok(Some(cursor.take_current()));
            }
        }
        Ok::<_, SeqError>(None)
    })
}

/// Uniqueness scan; continues past the first match and stops at the second.
pub async fn scan_single<S, P, Fut>(source: &S, mut predicate: P, cancel: &CancellationToken) -> Result<Single<S::Item>>
where
    S: AsyncSequence + ?Sized,
    P: FnMut(&S::Item, CancellationToken) -> Fut,
    Fut: Future<Output = bool>,
{
    drive!(source, |cursor| {
        let mut found = None;
        while cursor.advance(cancel).await? {
            let decision = predicate(cursor.current(), cancel.clone());
            if race(cancel, decision).await? {
                if found.is_some() {
                    return Ok(Single::Many);
                }
                found = Some(cursor.take_current());
            }
        }
        Ok::<_, SeqError>(match found {
            Some(value) => Single::One(value),
            None => Single::Empty,
        })
    })
}

pub async fn element_at<S>(source: &S, index: usize, cancel: &CancellationToken) -> Result<std::result::Result<S::Item, usize>>
where
    S: AsyncSequence + ?Sized,
{
    drive!(source, |cursor| {
        let mut seen = 0;
        while cursor.advance(cancel).await? {
            if seen == index {
                return Ok(Ok(cursor.take_current()));
            }
            seen += 1;
        }
        Ok::<_, SeqError>(Err(seen))
    })
}

pub async fn to_vec<S>(source: &S, cancel: &CancellationToken) -> Result<Vec<S::Item>>
where
    S: AsyncSequence + ?Sized,
{
    drive!(source, |cursor| {
        let mut out = Vec::new();
        while cursor.advance(cancel).await? {
            out.push(cursor.take_current());
        }
        Ok::<_, SeqError>(out)
    })
}

/// Writes elements into `dest` in order. Async sources have no known length,
/// so a short destination is detected while writing: the error reports how
/// many elements were written before it filled up.
pub async fn copy_to<S>(source: &S, dest: &mut [S::Item], cancel: &CancellationToken) -> Result<usize>
where
    S: AsyncSequence + ?Sized,
{
    let capacity = dest.len();
    drive!(source, |cursor| {
        let mut written = 0;
        while cursor.advance(cancel).await? {
            let Some(cell) = dest.get_mut(written) else {
                return Err(SeqError::DestinationTooSmall {
                    capacity,
                    required: None,
                    written,
                });
            };
            *cell = cursor.take_current();
            written += 1;
        }
        Ok::<_, SeqError>(written)
    })
}

pub async fn to_map_in<S, K, V, H, KF, VF>(
    source: &S,
    mut key: KF,
    mut value: VF,
    hasher: H,
    cancel: &CancellationToken,
) -> Result<HashMap<K, V, H>>
where
    S: AsyncSequence + ?Sized,
    K: Eq + Hash,
    H: BuildHasher,
    KF: FnMut(&S::Item) -> K,
    VF: FnMut(S::Item) -> V,
{
    drive!(source, |cursor| {
        let mut map = HashMap::with_hasher(hasher);
        let mut index = 0;
        while cursor.advance(cancel).await? {
            match map.entry(key(cursor.current())) {
                Entry::Occupied(_) => return Err(SeqError::DuplicateKey { index }),
                Entry::Vacant(slot) => {
                    slot.insert(value(cursor.take_current()));
                }
            }
            index += 1;
        }
        Ok::<_, SeqError>(map)
    })
}

pub async fn to_map_merge<S, K, V, KF, VF, M>(
    source: &S,
    mut key: KF,
    mut value: VF,
    mut merge: M,
    cancel: &CancellationToken,
) -> Result<HashMap<K, V>>
where
    S: AsyncSequence + ?Sized,
    K: Eq + Hash,
    KF: FnMut(&S::Item) -> K,
    VF: FnMut(S::Item) -> V,
    M: FnMut(V, V) -> V,
{
    drive!(source, |cursor| {
        let mut map: HashMap<K, V> = HashMap::new();
        while cursor.advance(cancel).await? {
            let k = key(cursor.current());
            let later = value(cursor.take_current());
            match map.remove_entry(&k) {
                Some((k, earlier)) => map.insert(k, merge(earlier, later)),
                None => map.insert(k, later),
            };
        }
        Ok::<_, SeqError>(map)
    })
}
