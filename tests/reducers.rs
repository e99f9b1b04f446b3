use std::collections::HashMap;

use hyperseq::testing::*;
use hyperseq::*;

#[test]
fn sum_is_checked_for_integers() -> anyhow::Result<()> {
    assert_eq!(from_slice(&[1u8, 2, 3]).sum()?, 6);
    assert_eq!(from_slice(&[i32::MAX, 1]).sum(), Err(SeqError::Overflow));
    assert_eq!(from_slice(&[i64::MIN, -1]).sum(), Err(SeqError::Overflow));
    assert_eq!(from_slice(&[0.5f64, 0.25]).sum()?, 0.75);
    Ok(())
}

#[test]
fn sum_skips_absent_values() -> anyhow::Result<()> {
    let readings = [Some(3i32), None, Some(4), None];
    assert_eq!(from_slice(&readings).copied().sum()?, 7);
    assert_eq!(from_slice(&[None::<i32>]).copied().sum()?, 0);
    Ok(())
}

#[test]
fn single_distinguishes_empty_from_many() {
    let data = [1, 2, 2, 3];
    let seq = from_slice(&data).copied();

    assert_eq!(seq.single_by(|x| *x == 1), Some(1));
    assert_eq!(seq.single_by(|x| *x == 2), None);
    assert_eq!(seq.single_by(|x| *x == 9), None);
    assert_eq!(seq.single_by_or_err(|x| *x == 2), Err(SeqError::MultipleElements));
    assert_eq!(seq.single_by_or_err(|x| *x == 9), Err(SeqError::NoElements));
    assert_eq!(once(5).single_or_err(), Ok(5));
    assert_eq!(empty::<u8>().single_or_default(), 0);
}

#[test]
fn single_stops_at_the_second_match() {
    let probe = Probe::new(from_fn(|| 0..1000));
    assert_eq!(probe.single_by(|x| *x < 10), None);
    assert_eq!(probe.stats().advances(), 2);
}

#[test]
fn element_access_and_defaults() -> anyhow::Result<()> {
    let r = range(10, 3)?;
    assert_eq!(r.element_at(2), Some(12));
    assert_eq!(r.element_at(3), None);
    assert_eq!(r.element_at_or_default(7), 0);
    assert_eq!(r.element_at_or_err(5), Err(SeqError::IndexOutOfRange { index: 5, len: 3 }));

    let lazy = from_fn(|| 10..13);
    assert_eq!(lazy.element_at_or_err(5), Err(SeqError::IndexOutOfRange { index: 5, len: 3 }));
    assert_eq!(lazy.first_by(|x| x % 2 == 1), Some(11));
    Ok(())
}

#[test]
fn quantifiers_and_membership() {
    let words = from_slice(&["red", "green", "blue"]);
    assert!(words.any_by(|w| w.starts_with('g')));
    assert!(words.all(|w| w.len() >= 3));
    assert!(!words.all(|w| w.len() == 3));
    assert!(SequenceExt::contains(&words, &"blue"));
    assert!(words.contains_with("GREEN", |w, v| w.eq_ignore_ascii_case(v)));

    let owned = from_fn(|| vec!["a".to_string(), "b".to_string()]);
    assert!(owned.contains("b"));
}

#[test]
fn maps_report_duplicate_keys() -> anyhow::Result<()> {
    let people = [("ada", 36), ("alan", 41), ("grace", 85)];
    let seq = from_slice(&people).copied();

    let by_name = seq.to_map(|(name, _)| *name)?;
    assert_eq!(by_name["alan"], ("alan", 41));

    let ages: HashMap<&str, i32> = seq.to_map_with(|(name, _)| *name, |(_, age)| age)?;
    assert_eq!(ages["grace"], 85);

    let err = seq.to_map(|(name, _)| name.as_bytes()[0]).unwrap_err();
    assert_eq!(err, SeqError::DuplicateKey { index: 1 });

    let totals = seq.to_map_merge(|(name, _)| name.as_bytes()[0], |(_, age)| age, |a, b| a + b);
    assert_eq!(totals[&b'a'], 77);
    Ok(())
}

#[test]
fn copy_to_checks_capacity() -> anyhow::Result<()> {
    let mut dest = [0; 3];
    assert_eq!(range(1, 3)?.copy_to(&mut dest)?, 3);
    assert_eq!(dest, [1, 2, 3]);

    let mut small = [0; 2];
    let known = from_slice(&[1, 2, 3]).copied().copy_to(&mut small);
    assert_eq!(
        known,
        Err(SeqError::DestinationTooSmall {
            capacity: 2,
            required: Some(3),
            written: 0,
        })
    );
    assert_eq!(small, [0, 0]);

    let unknown = from_fn(|| 1..=3).copy_to(&mut small);
    assert_eq!(
        unknown,
        Err(SeqError::DestinationTooSmall {
            capacity: 2,
            required: None,
            written: 2,
        })
    );
    assert_eq!(small, [1, 2]);
    Ok(())
}

#[test]
fn materialization_preserves_order() {
    let seq = from_fn(|| "hyperseq".chars());
    assert_eq!(seq.to_vec().into_iter().collect::<String>(), "hyperseq");
    assert_eq!(seq.to_boxed_slice().len(), 8);
}
