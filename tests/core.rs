use hyperseq::testing::*;
use hyperseq::*;

#[test]
fn map_filter_count_chain() -> anyhow::Result<()> {
    let data = vec![1, 2, 3, 4, 5];
    let big = data
        .as_seq()
        .map(|x: &i32| x * 2)
        .filter(|x: &i32| *x > 4);

    assert_sequence_eq(&big, &[6, 8, 10]);
    assert_eq!(big.count(), 3);
    assert_eq!(big.first_or_err()?, 6);
    assert_retraversable(&big);
    Ok(())
}

#[test]
fn empty_source_identities() -> anyhow::Result<()> {
    let none = empty::<i32>();
    assert_eq!(none.single(), None);
    assert_eq!(none.first_or_default(), 0);
    assert!(!none.any());
    assert!(none.all(|_| false));
    assert_eq!(none.sum()?, 0);
    assert_eq!(none.first_or_err(), Err(SeqError::NoElements));
    Ok(())
}

#[test]
fn flat_map_then_reduce_words() -> anyhow::Result<()> {
    let lines = ["The quick brown fox", "jumps over the lazy dog"];
    let words = from_slice(&lines)
        .flat_map(|line: &&str| line.split_whitespace().map(str::to_lowercase).collect::<Vec<_>>())
        .filter(|w: &String| w.len() >= 4);

    assert_collections_equal(&words.to_vec(), &["quick", "brown", "jumps", "over", "lazy"]);

    let by_len = words.to_map_merge(|w| w.len(), |w| vec![w], |mut a, b| {
        a.extend(b);
        a
    });
    assert_eq!(by_len[&5], vec!["quick", "brown", "jumps"]);
    assert_eq!(by_len[&4], vec!["over", "lazy"]);
    Ok(())
}

#[test]
fn terminals_open_one_cursor_each() {
    let probe = Probe::new(from_fn(|| 1..=6));
    let odd = probe.clone().filter(|x: &i32| x % 2 == 1);

    assert_eq!(odd.count(), 3);
    assert_eq!(odd.first(), Some(1));
    assert_eq!(odd.to_vec(), vec![1, 3, 5]);

    let stats = probe.stats();
    assert_eq!(stats.cursors(), 3);
    assert_eq!(stats.releases(), 3);
}

#[test]
fn iterator_adapter_releases_on_exhaustion() {
    let probe = Probe::new(from_fn(|| 0..3));
    let mut iter = probe.iter();
    assert_eq!(iter.by_ref().sum::<i32>(), 3);
    assert_eq!(probe.stats().releases(), 1);
    assert_eq!(iter.next(), None);
    drop(iter);
    assert_eq!(probe.stats().releases(), 1);
}

#[test]
fn composites_apply_like_inline_chains() -> anyhow::Result<()> {
    struct Positives;

    impl<S> extensions::Composite<S> for Positives
    where
        S: Sequence<Item = i32>,
    {
        type Output = Filter<S, fn(&i32) -> bool>;

        fn expand(&self, input: S) -> Self::Output {
            let positive: fn(&i32) -> bool = |x| *x > 0;
            input.filter(positive)
        }
    }

    let values = range(-2, 5)?.apply(&Positives);
    assert_eq!(values.to_vec(), vec![1, 2]);
    assert_eq!(values.count(), range(-2, 5)?.filter(|x: &i32| *x > 0).count());
    Ok(())
}
