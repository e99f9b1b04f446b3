//! Assertion functions for sequence outputs.

use std::fmt::Debug;

use crate::sequence::{Sequence, SequenceExt};
use crate::tier::TierStrategy;

/// Assert that two slices are equal in order and content.
///
/// # Panics
///
/// Panics with both collections in the message if they differ in length or
/// content.
pub fn assert_collections_equal<T, U>(actual: &[T], expected: &[U])
where
    T: Debug + PartialEq<U>,
    U: Debug,
{
    assert_eq!(
        actual.len(),
        expected.len(),
        "Collection length mismatch:\n  Expected: {expected:?}\n  Actual: {actual:?}"
    );

    for (i, (a, e)) in actual.iter().zip(expected).enumerate() {
        assert!(
            a == e,
            "Collection mismatch at index {i}:\n  Expected: {e:?}\n  Actual: {a:?}\n  Full expected: {expected:?}\n  Full actual: {actual:?}"
        );
    }
}

/// Assert that one traversal of `sequence` yields exactly `expected`.
///
/// # Panics
///
/// Panics if the traversal differs from `expected`.
///
/// # Example
///
/// ```
/// use hyperseq::*;
/// use hyperseq::testing::assert_sequence_eq;
///
/// assert_sequence_eq(&range(3, 3).unwrap(), &[3, 4, 5]);
/// ```
pub fn assert_sequence_eq<S, U>(sequence: &S, expected: &[U])
where
    S: Sequence,
    S::Item: Debug + PartialEq<U>,
    U: Debug,
{
    let actual: Vec<S::Item> = sequence.iter().collect();
    assert_collections_equal(&actual, expected);
}

/// Assert that two traversals of `sequence` agree, and that `count` agrees
/// with the number of elements traversed.
///
/// # Panics
///
/// Panics if the traversals differ or the count is wrong.
pub fn assert_retraversable<S>(sequence: &S)
where
    S: Sequence,
    S::Tier: TierStrategy<S>,
    S::Item: Debug + PartialEq,
{
    let first: Vec<S::Item> = sequence.iter().collect();
    let second: Vec<S::Item> = sequence.iter().collect();
    assert_collections_equal(&second, &first);
    assert_eq!(
        sequence.count(),
        first.len(),
        "count disagrees with traversal:\n  Traversed: {first:?}"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::{from_fn, from_slice};

    #[test]
    fn sequence_assertions_accept_matching_output() {
        assert_sequence_eq(&from_slice(&[1, 2]), &[&1, &2]);
        assert_retraversable(&from_fn(|| 0..4));
    }

    #[test]
    #[should_panic(expected = "Collection mismatch at index 1")]
    fn mismatch_names_the_index() {
        assert_collections_equal(&[1, 2, 3], &[1, 5, 3]);
    }

    #[test]
    #[should_panic(expected = "Collection length mismatch")]
    fn length_mismatch_is_reported() {
        assert_sequence_eq(&from_fn(|| 0..2), &[0, 1, 2]);
    }
}
