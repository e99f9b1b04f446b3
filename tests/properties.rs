use hyperseq::*;
use proptest::prelude::*;

fn data() -> impl Strategy<Value = Vec<i32>> {
    prop::collection::vec(-1000i32..1000, 0..64)
}

proptest! {
    #[test]
    fn projection_preserves_count(v in data()) {
        let seq = from_slice(&v).map(|x: &i32| i64::from(*x) * 3);
        prop_assert_eq!(seq.count(), v.len());
        prop_assert_eq!(seq.to_vec().len(), v.len());
    }

    #[test]
    fn fused_maps_equal_nested_maps(v in data()) {
        let fused = from_slice(&v).map(|x: &i32| x + 1).map(|x: i32| x * 2).to_vec();
        let expected: Vec<i32> = v.iter().map(|x| (x + 1) * 2).collect();
        prop_assert_eq!(fused, expected);
    }

    #[test]
    fn fused_filters_equal_conjunction(v in data(), a in 1i32..7, b in 1i32..7) {
        let fused = from_slice(&v)
            .copied()
            .filter(move |x: &i32| x % a == 0)
            .filter(move |x: &i32| x % b == 0)
            .to_vec();
        let expected: Vec<i32> = v.iter().copied().filter(|x| x % a == 0 && x % b == 0).collect();
        prop_assert_eq!(fused, expected);
    }

    #[test]
    fn take_yields_min_of_bound_and_length(v in data(), n in 0usize..100) {
        let taken = from_slice(&v).take(n);
        prop_assert_eq!(taken.count(), n.min(v.len()));
        prop_assert_eq!(from_fn(|| v.clone()).take(n).count(), n.min(v.len()));
    }

    #[test]
    fn nested_takes_keep_the_smaller_bound(v in data(), n in 0usize..80, m in 0usize..80) {
        let nested = from_slice(&v).take(n).take(m).copied().to_vec();
        let expected: Vec<i32> = v.iter().copied().take(n.min(m)).collect();
        prop_assert_eq!(nested, expected);
    }

    #[test]
    fn skip_then_take_is_a_window(v in data(), s in 0usize..80, n in 0usize..80) {
        let window = from_slice(&v).skip(s).take(n);
        let expected: Vec<&i32> = v.iter().skip(s).take(n).collect();
        prop_assert_eq!(window.to_vec(), expected.clone());
        for (i, item) in expected.iter().enumerate() {
            prop_assert_eq!(window.element_at(i), Some(*item));
        }
        prop_assert_eq!(window.element_at(expected.len()), None);
    }

    #[test]
    fn single_reports_uniqueness(v in data(), needle in -1000i32..1000) {
        let hits = v.iter().filter(|x| **x == needle).count();
        let found = from_slice(&v).single_by(|x| **x == needle);
        prop_assert_eq!(found.is_some(), hits == 1);
        let err = from_slice(&v).single_by_or_err(|x| **x == needle).err();
        match hits {
            0 => {
                prop_assert_eq!(err, Some(SeqError::NoElements));
            }
            1 => {
                prop_assert_eq!(err, None);
            }
            _ => {
                prop_assert_eq!(err, Some(SeqError::MultipleElements));
            }
        }
    }

    #[test]
    fn materialization_round_trips(v in data()) {
        prop_assert_eq!(from_slice(&v).copied().to_vec(), v.clone());
        prop_assert_eq!(from_fn(|| v.clone()).to_vec(), v.clone());
        let mut dest = vec![0; v.len()];
        prop_assert_eq!(from_slice(&v).copied().copy_to(&mut dest), Ok(v.len()));
        prop_assert_eq!(dest, v);
    }
}

#[test]
fn empty_identities() {
    let e = empty::<i32>();
    assert_eq!(e.count(), 0);
    assert!(!e.any());
    assert!(e.all(|_| false));
    assert_eq!(e.first(), None);
    assert_eq!(e.single(), None);
    assert_eq!(e.sum(), Ok(0));
    assert!(e.to_vec().is_empty());
}
