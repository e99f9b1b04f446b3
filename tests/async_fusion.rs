#![cfg(feature = "async")]

use std::cell::Cell;
use std::rc::Rc;

use hyperseq::asynchronous::{AsyncComposeAt, AsyncComposeAtAt, AsyncComposeThenAt, AsyncMapAt};
use hyperseq::{AsyncSequenceExt, CancellationToken, IntoAsync, Lift, SliceSeq, from_slice};

#[tokio::test]
async fn map_then_map_at_fuses_into_one_layer() -> anyhow::Result<()> {
    let cancel = CancellationToken::new();
    let data = [1, 2, 3];
    let fused: AsyncMapAt<Lift<SliceSeq<'_, i32>>, AsyncComposeThenAt<_, _>> = from_slice(&data)
        .into_async()
        .map(|x: &i32, _: CancellationToken| {
            let x = *x;
            async move { x * 10 }
        })
        .map_at(|x: i32, i: usize, _: CancellationToken| async move { x + i as i32 });
    assert_eq!(fused.to_vec(&cancel).await?, vec![10, 21, 32]);
    Ok(())
}

#[tokio::test]
async fn map_at_then_map_fuses_into_one_layer() -> anyhow::Result<()> {
    let cancel = CancellationToken::new();
    let data = [1, 2, 3];
    let fused: AsyncMapAt<Lift<SliceSeq<'_, i32>>, AsyncComposeAt<_, _>> = from_slice(&data)
        .into_async()
        .map_at(|x: &i32, i: usize, _: CancellationToken| {
            let x = *x;
            async move { x * 10 + i as i32 }
        })
        .map(|x: i32, _: CancellationToken| async move { -x });
    assert_eq!(fused.to_vec(&cancel).await?, vec![-10, -21, -32]);
    Ok(())
}

#[tokio::test]
async fn indexed_projections_share_the_position() -> anyhow::Result<()> {
    let cancel = CancellationToken::new();
    let data = [5, 5, 5];
    let fused: AsyncMapAt<Lift<SliceSeq<'_, i32>>, AsyncComposeAtAt<_, _>> = from_slice(&data)
        .into_async()
        .map_at(|x: &i32, i: usize, _: CancellationToken| {
            let x = *x;
            async move { x + i as i32 }
        })
        .map_at(|x: i32, i: usize, _: CancellationToken| async move { x * 100 + i as i32 });
    assert_eq!(fused.to_vec(&cancel).await?, vec![500, 601, 702]);
    Ok(())
}

#[tokio::test]
async fn counting_a_projection_never_runs_it() -> anyhow::Result<()> {
    let cancel = CancellationToken::new();
    let calls = Rc::new(Cell::new(0));
    let seen = Rc::clone(&calls);
    let data = [1, 2, 3, 4];
    let doubled = from_slice(&data).into_async().map(move |x: &i32, _: CancellationToken| {
        seen.set(seen.get() + 1);
        let x = *x;
        async move { x * 2 }
    });

    assert_eq!(doubled.count(&cancel).await?, 4);
    assert!(doubled.any(&cancel).await?);
    assert_eq!(calls.get(), 0);

    assert_eq!(doubled.first(&cancel).await?, Some(2));
    assert_eq!(calls.get(), 1);
    assert_eq!(doubled.element_at(3, &cancel).await?, Some(8));
    assert_eq!(doubled.element_at(4, &cancel).await?, None);
    assert_eq!(calls.get(), 2);

    // four elements: not unique, nothing projected
    assert_eq!(doubled.single(&cancel).await?, None);
    assert_eq!(calls.get(), 2);
    Ok(())
}

#[tokio::test]
async fn indexed_terminals_project_with_the_source_position() -> anyhow::Result<()> {
    let cancel = CancellationToken::new();
    let calls = Rc::new(Cell::new(0));
    let seen = Rc::clone(&calls);
    let data = [7, 8, 9];
    let tagged = from_slice(&data)
        .into_async()
        .map_at(move |x: &i32, i: usize, _: CancellationToken| {
            seen.set(seen.get() + 1);
            let tag = *x * 10 + i as i32;
            async move { tag }
        });

    assert_eq!(tagged.count(&cancel).await?, 3);
    assert_eq!(calls.get(), 0);
    assert_eq!(tagged.element_at(2, &cancel).await?, Some(92));
    assert_eq!(tagged.first(&cancel).await?, Some(70));
    assert_eq!(calls.get(), 2);

    let lone = [4];
    let only = from_slice(&lone)
        .into_async()
        .map_at(|x: &i32, i: usize, _: CancellationToken| {
            let tag = *x * 10 + i as i32;
            async move { tag }
        });
    assert_eq!(only.single(&cancel).await?, Some(40));
    Ok(())
}

#[tokio::test]
async fn projection_terminals_observe_cancellation() {
    let cancel = CancellationToken::new();
    let data = [1, 2];
    let doubled = from_slice(&data).into_async().map(|x: &i32, _: CancellationToken| {
        let x = *x;
        async move { x * 2 }
    });
    cancel.cancel();
    assert!(doubled.count(&cancel).await.unwrap_err().is_cancelled());
    assert!(doubled.first(&cancel).await.unwrap_err().is_cancelled());
}
