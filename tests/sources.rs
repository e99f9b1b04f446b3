use std::collections::{BTreeSet, HashSet, LinkedList, VecDeque};

use hyperseq::testing::*;
use hyperseq::*;

#[test]
fn range_validates_its_arguments() -> anyhow::Result<()> {
    assert_sequence_eq(&range(-2, 4)?, &[-2, -1, 0, 1]);
    assert_eq!(range(7, 0)?.count(), 0);
    assert_sequence_eq(&range(i32::MAX, 1)?, &[i32::MAX]);

    let negative = range(0, -1).unwrap_err();
    assert!(matches!(negative, SeqError::InvalidArgument { name: "count", .. }));
    assert!(range(i32::MAX, 2).is_err());
    assert!(range(i32::MIN, i32::MAX).is_ok());
    Ok(())
}

#[test]
fn range_membership_is_arithmetic() -> anyhow::Result<()> {
    let r = range(100, 50)?;
    assert!(r.contains(&149));
    assert!(!r.contains(&150));
    assert!(!range(0, 0)?.contains(&0));
    Ok(())
}

#[test]
fn repeat_yields_clones() -> anyhow::Result<()> {
    let r = repeat("ab".to_string(), 3)?;
    assert_eq!(r.to_vec(), vec!["ab", "ab", "ab"]);
    assert_eq!(r.element_at(2).as_deref(), Some("ab"));
    assert!(r.contains(&"ab".to_string()));
    assert!(!repeat(1, 0)?.contains(&1));
    assert!(matches!(repeat('x', -3), Err(SeqError::InvalidArgument { .. })));
    Ok(())
}

#[test]
fn empty_and_once() {
    assert_eq!(empty::<String>().to_vec(), Vec::<String>::new());
    assert_eq!(empty::<u8>().element_at(0), None);
    assert_eq!(once('z').to_vec(), vec!['z']);
    assert_eq!(once('z').element_at(0), Some('z'));
    assert_retraversable(&once(1));
}

#[test]
fn from_fn_calls_the_factory_per_traversal() {
    let calls = CallCounter::new();
    let factory = calls.wrap(|()| vec![1, 2, 3]);
    let seq = from_fn(move || factory(()));
    assert_eq!(seq.count(), 3);
    assert_eq!(seq.to_vec(), vec![1, 2, 3]);
    assert_eq!(calls.calls(), 2);
}

#[test]
fn container_views_borrow_without_copying() {
    let mut deque: VecDeque<i32> = VecDeque::new();
    deque.push_back(2);
    deque.push_front(1);
    assert_sequence_eq(&deque.as_seq(), &[&1, &2]);

    let list: LinkedList<char> = "abc".chars().collect();
    assert_sequence_eq(&list.as_seq().copied(), &['a', 'b', 'c']);

    let ordered: BTreeSet<u32> = [3, 1, 2].into_iter().collect();
    assert_sequence_eq(&ordered.as_seq().copied(), &[1, 2, 3]);

    let set: HashSet<&str> = ["x", "y"].into_iter().collect();
    let mut seen = set.as_seq().copied().to_vec();
    seen.sort_unstable();
    assert_eq!(seen, vec!["x", "y"]);

    let array = [5u8; 4];
    assert_eq!(array.as_seq().count(), 4);
    assert_eq!(array[..].as_seq().sum().ok(), Some(20));
}
