//! Materialization: vectors, hash maps and copies into caller buffers.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::hash::{BuildHasher, Hash};

use tracing::debug;

use crate::cursor::Traversal;
use crate::error::{Result, SeqError};
use crate::sequence::Sequence;
use crate::tier::TierStrategy;

pub fn to_vec<S>(source: &S) -> Vec<S::Item>
where
    S: Sequence + ?Sized,
    S::Tier: TierStrategy<S>,
{
    let capacity = <S::Tier as TierStrategy<S>>::known_len(source).unwrap_or(0);
    let mut out = Vec::with_capacity(capacity);
    let mut traversal = Traversal::new(source.cursor());
    while let Some(item) = traversal.next_item() {
        out.push(item);
    }
    out
}

/// Builds a map keyed by `key`, failing on the first repeated key.
pub fn to_map_in<S, K, V, H, KF, VF>(
    source: &S,
    mut key: KF,
    mut value: VF,
    hasher: H,
) -> Result<HashMap<K, V, H>>
where
    S: Sequence + ?Sized,
    S::Tier: TierStrategy<S>,
    K: Eq + Hash,
    H: BuildHasher,
    KF: FnMut(&S::Item) -> K,
    VF: FnMut(S::Item) -> V,
{
    let capacity = <S::Tier as TierStrategy<S>>::known_len(source).unwrap_or(0);
    let mut map = HashMap::with_capacity_and_hasher(capacity, hasher);
    let mut traversal = Traversal::new(source.cursor());
    let mut index = 0;
    while traversal.advance() {
        match map.entry(key(traversal.current())) {
            Entry::Occupied(_) => {
                debug!(index, "duplicate key while building map");
                return Err(SeqError::DuplicateKey { index });
            }
            Entry::Vacant(slot) => {
                slot.insert(value(traversal.take_current()));
            }
        }
        index += 1;
    }
    Ok(map)
}

/// Builds a map keyed by `key`; values of a repeated key are folded with
/// `merge(earlier, later)`.
pub fn to_map_merge<S, K, V, KF, VF, M>(
    source: &S,
    mut key: KF,
    mut value: VF,
    mut merge: M,
) -> HashMap<K, V>
where
    S: Sequence + ?Sized,
    S::Tier: TierStrategy<S>,
    K: Eq + Hash,
    KF: FnMut(&S::Item) -> K,
    VF: FnMut(S::Item) -> V,
    M: FnMut(V, V) -> V,
{
    let capacity = <S::Tier as TierStrategy<S>>::known_len(source).unwrap_or(0);
    let mut map: HashMap<K, V> = HashMap::with_capacity(capacity);
    let mut traversal = Traversal::new(source.cursor());
    while traversal.advance() {
        let k = key(traversal.current());
        let later = value(traversal.take_current());
        match map.remove_entry(&k) {
            Some((k, earlier)) => map.insert(k, merge(earlier, later)),
            None => map.insert(k, later),
        };
    }
    map
}

pub fn copy_to<S>(source: &S, dest: &mut [S::Item]) -> Result<usize>
where
    S: Sequence + ?Sized,
    S::Tier: TierStrategy<S>,
{
    let capacity = dest.len();
    if let Some(required) = <S::Tier as TierStrategy<S>>::known_len(source) {
        if required > capacity {
            debug!(required, capacity, "copy_to destination too small");
            return Err(SeqError::DestinationTooSmall {
                capacity,
                required: Some(required),
                written: 0,
            });
        }
    }
    let mut traversal = Traversal::new(source.cursor());
    let mut written = 0;
    while traversal.advance() {
        let Some(cell) = dest.get_mut(written) else {
            debug!(capacity, "copy_to ran out of room");
            return Err(SeqError::DestinationTooSmall {
                capacity,
                required: None,
                written,
            });
        };
        *cell = traversal.take_current();
        written += 1;
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sequence::SequenceExt;
    use crate::sources::{from_fn, from_slice};

    #[test]
    fn duplicate_key_reports_the_offending_position() {
        let words = from_slice(&["apple", "avocado", "banana"]);
        let err = words.to_map(|w| w.as_bytes()[0]).unwrap_err();
        assert_eq!(err, SeqError::DuplicateKey { index: 1 });
    }

    #[test]
    fn merge_policy_folds_in_source_order() {
        let words = from_slice(&["apple", "avocado", "banana"]);
        let joined = words.to_map_merge(
            |w| w.as_bytes()[0],
            |w| w.to_string(),
            |a, b| format!("{a}+{b}"),
        );
        assert_eq!(joined[&b'a'], "apple+avocado");
        assert_eq!(joined[&b'b'], "banana");
    }

    #[test]
    fn known_length_is_checked_before_writing() {
        let mut dest = [0; 2];
        let err = from_slice(&[1, 2, 3]).copied().copy_to(&mut dest).unwrap_err();
        assert_eq!(
            err,
            SeqError::DestinationTooSmall {
                capacity: 2,
                required: Some(3),
                written: 0
            }
        );
        assert_eq!(dest, [0, 0]);
    }

    #[test]
    fn unknown_length_writes_until_full() {
        let mut dest = [0; 2];
        let err = from_fn(|| [7, 8, 9]).copy_to(&mut dest).unwrap_err();
        assert!(matches!(
            err,
            SeqError::DestinationTooSmall { written: 2, required: None, .. }
        ));
        assert_eq!(dest, [7, 8]);

        let mut roomy = [0; 4];
        assert_eq!(from_fn(|| [7, 8, 9]).copy_to(&mut roomy), Ok(3));
        assert_eq!(roomy, [7, 8, 9, 0]);
    }
}
