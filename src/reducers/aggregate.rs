//! Aggregates: `count` and checked `sum`.

use tracing::trace;

use crate::cursor::Traversal;
use crate::error::{Result, SeqError};
use crate::sequence::Sequence;
use crate::tier::{Tier, TierStrategy};

/* ===================== Count ===================== */

/// Number of elements.
///
/// Countable tiers answer from their length. Sequential sequences are
/// traversed without reading any element.
pub fn count<S>(source: &S) -> usize
where
    S: Sequence + ?Sized,
    S::Tier: TierStrategy<S>,
{
    trace!(tier = <S::Tier as Tier>::NAME, "count");
    <S::Tier as TierStrategy<S>>::count(source)
}

/* ===================== Sum ===================== */

/// Element types [`sum`] can add up.
///
/// - Total: the accumulator and result type
/// - `accumulate` returns `None` on overflow
///
/// Integers add with overflow checks; floats follow IEEE addition and never
/// fail. References add their referent; absent `Option`s are skipped.
pub trait Summable: Sized {
    type Total;

    fn zero() -> Self::Total;

    fn accumulate(total: Self::Total, item: Self) -> Option<Self::Total>;
}

macro_rules! checked_summable {
    ($($t:ty),* $(,)?) => {$(
        impl Summable for $t {
            type Total = $t;

            #[inline]
            fn zero() -> $t {
                0
            }

            #[inline]
            fn accumulate(total: $t, item: $t) -> Option<$t> {
                total.checked_add(item)
            }
        }
    )*};
}

macro_rules! float_summable {
    ($($t:ty),* $(,)?) => {$(
        impl Summable for $t {
            type Total = $t;

            #[inline]
            fn zero() -> $t {
                0.0
            }

            #[inline]
            fn accumulate(total: $t, item: $t) -> Option<$t> {
                Some(total + item)
            }
        }
    )*};
}

checked_summable!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);
float_summable!(f32, f64);

impl<T: Summable + Copy> Summable for &T {
    type Total = T::Total;

    #[inline]
    fn zero() -> T::Total {
        T::zero()
    }

    #[inline]
    fn accumulate(total: T::Total, item: &T) -> Option<T::Total> {
        T::accumulate(total, *item)
    }
}

impl<T: Summable> Summable for Option<T> {
    type Total = T::Total;

    #[inline]
    fn zero() -> T::Total {
        T::zero()
    }

    #[inline]
    fn accumulate(total: T::Total, item: Option<T>) -> Option<T::Total> {
        match item {
            Some(value) => T::accumulate(total, value),
            None => Some(total),
        }
    }
}

/// Sum of all elements; `0` for an empty sequence.
pub fn sum<S>(source: &S) -> Result<<S::Item as Summable>::Total>
where
    S: Sequence + ?Sized,
    S::Item: Summable,
{
    let mut traversal = Traversal::new(source.cursor());
    let mut total = <S::Item as Summable>::zero();
    while let Some(item) = traversal.next_item() {
        total = Summable::accumulate(total, item).ok_or(SeqError::Overflow)?;
    }
    Ok(total)
}
