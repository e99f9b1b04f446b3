//! Quantifiers: `any`, `all`, `contains`. All of them short-circuit.

use std::borrow::Borrow;

use tracing::trace;

use crate::cursor::Traversal;
use crate::sequence::Sequence;
use crate::tier::{Tier, TierStrategy};

/// Non-emptiness. Countable tiers answer without traversal; otherwise one
/// advance decides.
pub fn any<S>(source: &S) -> bool
where
    S: Sequence + ?Sized,
    S::Tier: TierStrategy<S>,
{
    match <S::Tier as TierStrategy<S>>::known_len(source) {
        Some(len) => len != 0,
        None => Traversal::new(source.cursor()).advance(),
    }
}

pub fn any_by<S, P>(source: &S, mut predicate: P) -> bool
where
    S: Sequence + ?Sized,
    P: FnMut(&S::Item) -> bool,
{
    let mut traversal = Traversal::new(source.cursor());
    while traversal.advance() {
        if predicate(traversal.current()) {
            return true;
        }
    }
    false
}

pub fn all<S, P>(source: &S, mut predicate: P) -> bool
where
    S: Sequence + ?Sized,
    P: FnMut(&S::Item) -> bool,
{
    let mut traversal = Traversal::new(source.cursor());
    while traversal.advance() {
        if !predicate(traversal.current()) {
            return false;
        }
    }
    true
}

pub fn contains<S, Q>(source: &S, value: &Q) -> bool
where
    S: Sequence + ?Sized,
    S::Item: Borrow<Q>,
    S::Tier: TierStrategy<S>,
    Q: PartialEq + ?Sized,
{
    contains_with(source, value, |item, value| Borrow::<Q>::borrow(item) == value)
}

/// Linear membership test under `eq`. A known length of zero answers
/// `false` without starting a traversal.
pub fn contains_with<S, Q, E>(source: &S, value: &Q, mut eq: E) -> bool
where
    S: Sequence + ?Sized,
    S::Tier: TierStrategy<S>,
    Q: ?Sized,
    E: FnMut(&S::Item, &Q) -> bool,
{
    if <S::Tier as TierStrategy<S>>::known_len(source) == Some(0) {
        trace!(tier = <S::Tier as Tier>::NAME, "contains on empty source");
        return false;
    }
    let mut traversal = Traversal::new(source.cursor());
    while traversal.advance() {
        if eq(traversal.current(), value) {
            return true;
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sequence::SequenceExt;
    use crate::sources::{from_fn, from_slice};
    use crate::testing::Probe;

    #[test]
    fn countable_any_does_not_traverse() {
        let probe = Probe::new(from_slice(&[1, 2]));
        assert!(any(&probe));
        assert_eq!(probe.stats().cursors(), 0);
    }

    #[test]
    fn quantifiers_stop_at_the_deciding_element() {
        let probe = Probe::new(from_fn(|| 1..=100));
        assert!(any_by(&probe, |x| *x == 3));
        assert_eq!(probe.stats().advances(), 3);
        assert!(!probe.clone().all(|x| *x < 2));
        assert_eq!(probe.stats().advances(), 5);
        assert_eq!(probe.stats().releases(), 2);
    }

    #[test]
    fn contains_with_custom_equality() {
        let words = from_slice(&["Alpha", "beta"]);
        assert!(contains_with(&words, "BETA", |w, v| w.eq_ignore_ascii_case(v)));
        assert!(!contains(&words, &"BETA"));
    }
}
