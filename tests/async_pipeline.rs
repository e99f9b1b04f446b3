#![cfg(feature = "async")]

use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use hyperseq::asynchronous::AsyncSequenceExt;
use hyperseq::testing::Probe;
use hyperseq::{AsyncConfig, AsyncCursor, AsyncSequence, Cancelled, CancellationToken, IntoAsync, SeqError, from_fn, from_slice, from_stream};

#[tokio::test]
async fn cancelled_cursor_fails_once_then_reports_exhaustion() -> anyhow::Result<()> {
    let naturals = from_stream(|| futures::stream::iter(0u64..));
    let cancel = CancellationToken::new();
    let mut cursor = naturals.cursor();

    for expected in 0..3 {
        assert!(cursor.advance(&cancel).await?);
        assert_eq!(*cursor.current(), expected);
    }
    cancel.cancel();
    assert_eq!(cursor.advance(&cancel).await, Err(Cancelled));
    assert_eq!(cursor.advance(&cancel).await, Ok(false));
    cursor.release().await;
    Ok(())
}

#[tokio::test]
async fn terminal_sees_only_elements_before_cancellation() {
    let seen = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&seen);
    let cancel = CancellationToken::new();

    let pipeline = from_stream(|| futures::stream::iter(0u64..)).map(move |x, token: CancellationToken| {
        if counter.fetch_add(1, Ordering::SeqCst) == 2 {
            token.cancel();
        }
        async move { x }
    });

    let err = pipeline.to_vec(&cancel).await.unwrap_err();
    assert!(err.is_cancelled());
    assert_eq!(seen.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn slow_predicate_is_interrupted() {
    let cancel = CancellationToken::new();
    let data = [1, 2, 3];
    let stuck = from_slice(&data).into_async().filter(|_, _| async {
        tokio::time::sleep(Duration::from_secs(3600)).await;
        true
    });

    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(10)).await;
        trigger.cancel();
    });

    let err = stuck.count(&cancel).await.unwrap_err();
    assert_eq!(err, SeqError::Cancelled(Cancelled));
}

#[tokio::test]
async fn release_runs_on_success_and_on_cancellation() -> anyhow::Result<()> {
    let probe = Probe::new(from_fn(|| 0..));
    let lifted = probe.clone().into_async().take(4);
    let cancel = CancellationToken::new();

    assert_eq!(lifted.to_vec(&cancel).await?, vec![0, 1, 2, 3]);
    assert_eq!(probe.stats().releases(), 1);

    cancel.cancel();
    assert!(lifted.first(&cancel).await.is_err());
    assert_eq!(probe.stats().cursors(), 2);
    assert_eq!(probe.stats().releases(), 2);
    Ok(())
}

#[tokio::test]
async fn lifted_pipeline_matches_the_synchronous_one() -> anyhow::Result<()> {
    let cancel = CancellationToken::new();
    let config = AsyncConfig::default().with_yield_every(1);
    let words = ["alpha", "beta", "gamma", "delta"];

    let lengths = from_slice(&words)
        .into_async_with(&config)
        .filter(|w: &&&str, _| {
            let keep = w.contains('l');
            async move { keep }
        })
        .map_at(|w: &&str, i, _| {
            let len = w.len() + i;
            async move { len }
        })
        .skip(1)
        .skip(0);

    assert_eq!(lengths.to_vec(&cancel).await?, vec![6]);
    assert_eq!(lengths.single_or_err(&cancel).await?, 6);
    assert!(!lengths.any_by(|n, _| std::future::ready(*n > 6), &cancel).await?);
    assert!(lengths.all(|n, _| std::future::ready(*n == 6), &cancel).await?);
    Ok(())
}

#[tokio::test]
async fn async_reducers_mirror_the_sync_ones() -> anyhow::Result<()> {
    let cancel = CancellationToken::new();
    let numbers = from_stream(|| futures::stream::iter(vec![3i32, 1, 4, 1, 5]));

    assert_eq!(numbers.count(&cancel).await?, 5);
    assert_eq!(numbers.sum(&cancel).await?, 14);
    assert!(numbers.contains(&4, &cancel).await?);
    assert!(numbers.contains_with(&-5, |x, v| *x == -*v, &cancel).await?);
    assert_eq!(numbers.first_or_default(&cancel).await?, 3);
    assert_eq!(numbers.element_at_or_default(9, &cancel).await?, 0);
    assert_eq!(
        numbers
            .first_by(|x, _| std::future::ready(*x > 3), &cancel)
            .await?,
        Some(4)
    );
    assert_eq!(
        numbers.single_by_or_err(|x, _| std::future::ready(*x == 1), &cancel).await,
        Err(SeqError::MultipleElements)
    );

    let overflow = from_stream(|| futures::stream::iter([i32::MAX, 1]));
    assert_eq!(overflow.sum(&cancel).await, Err(SeqError::Overflow));

    let lookup = numbers.to_map_with(|x| *x, |x| x * 10, &cancel).await;
    assert_eq!(lookup, Err(SeqError::DuplicateKey { index: 3 }));
    Ok(())
}

#[tokio::test]
async fn spent_take_window_reports_exhaustion_after_cancel() -> anyhow::Result<()> {
    let data = [1, 2, 3];
    let first_only = from_slice(&data).into_async().take(1);
    let cancel = CancellationToken::new();
    let mut cursor = first_only.cursor();

    assert!(cursor.advance(&cancel).await?);
    assert_eq!(**cursor.current(), 1);
    cancel.cancel();
    assert_eq!(cursor.advance(&cancel).await, Ok(false));
    cursor.release().await;
    Ok(())
}

#[tokio::test]
async fn materializes_into_boxed_slices_and_buffers() -> anyhow::Result<()> {
    let cancel = CancellationToken::new();
    let numbers = from_stream(|| futures::stream::iter([1i32, 2, 3]));

    assert_eq!(&*numbers.to_boxed_slice(&cancel).await?, &[1, 2, 3]);

    let mut roomy = [0; 4];
    assert_eq!(numbers.copy_to(&mut roomy, &cancel).await?, 3);
    assert_eq!(roomy, [1, 2, 3, 0]);

    let mut cramped = [0; 2];
    assert_eq!(
        numbers.copy_to(&mut cramped, &cancel).await,
        Err(SeqError::DestinationTooSmall {
            capacity: 2,
            required: None,
            written: 2,
        })
    );
    assert_eq!(cramped, [1, 2]);
    Ok(())
}

#[tokio::test]
async fn panicking_predicate_still_releases_the_lifted_cursor() {
    let probe = Probe::new(from_fn(|| 0..10));
    let lifted = probe.clone().into_async();
    let cancel = CancellationToken::new();

    let search = lifted.any_by(
        |x: &i32, _| {
            if *x == 2 {
                panic!("predicate failed on {x}");
            }
            std::future::ready(false)
        },
        &cancel,
    );
    let outcome = futures::FutureExt::catch_unwind(AssertUnwindSafe(search)).await;

    assert!(outcome.is_err());
    assert_eq!(probe.stats().cursors(), 1);
    assert_eq!(probe.stats().releases(), 1);
}
