//! The absent-value protocol.
//!
//! Zero-or-one results are plain [`Option`]s: `Some` carries the value,
//! `None` means "not found" and is never an error. The "or null" family of
//! terminals is simply the `Option` form. [`OptionExt`] adds the two
//! operations `Option` lacks: requiring presence as a [`SeqError`], and an
//! async, cancellation-aware map.

use crate::error::{Result, SeqError};

#[cfg(feature = "async")]
use std::future::Future;
#[cfg(feature = "async")]
use tokio_util::sync::CancellationToken;

pub trait OptionExt<T>: Sized {
    /// `Some(v)` becomes `Ok(v)`; `None` becomes
    /// [`SeqError::NoElements`].
    fn require(self) -> Result<T>;

    /// Maps a present value with an async transform that receives the
    /// cancellation token. Absence propagates without calling `f`; a
    /// signalled token fails with [`SeqError::Cancelled`] without calling
    /// `f` either.
    #[cfg(feature = "async")]
    fn map_async<U, F, Fut>(
        self,
        f: F,
        cancel: &CancellationToken,
    ) -> impl Future<Output = Result<Option<U>>>
    where
        F: FnOnce(T, CancellationToken) -> Fut,
        Fut: Future<Output = U>;
}

impl<T> OptionExt<T> for Option<T> {
    fn require(self) -> Result<T> {
        self.ok_or(SeqError::NoElements)
    }

    #[cfg(feature = "async")]
    async fn map_async<U, F, Fut>(self, f: F, cancel: &CancellationToken) -> Result<Option<U>>
    where
        F: FnOnce(T, CancellationToken) -> Fut,
        Fut: Future<Output = U>,
    {
        let Some(value) = self else {
            return Ok(None);
        };
        if cancel.is_cancelled() {
            return Err(crate::error::Cancelled.into());
        }
        let mapped = crate::asynchronous::race(cancel, f(value, cancel.clone())).await?;
        Ok(Some(mapped))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn require_turns_absence_into_no_elements() {
        assert_eq!(Some(3).require(), Ok(3));
        assert_eq!(None::<u8>.require(), Err(SeqError::NoElements));
    }

    #[cfg(feature = "async")]
    #[tokio::test]
    async fn map_async_respects_cancellation() -> Result<()> {
        let cancel = CancellationToken::new();
        let doubled = Some(4).map_async(|x, _| async move { x * 2 }, &cancel).await?;
        assert_eq!(doubled, Some(8));
        assert_eq!(None::<i32>.map_async(|x, _| async move { x }, &cancel).await?, None);

        cancel.cancel();
        let err = Some(1).map_async(|x, _| async move { x }, &cancel).await.unwrap_err();
        assert!(err.is_cancelled());
        Ok(())
    }
}
