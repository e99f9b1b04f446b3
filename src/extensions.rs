//! Extension points for reusable operator chains.
//!
//! - [`Composite`]: package a chain of combinators into a named, reusable
//!   component applied with [`SequenceExt::apply`](crate::SequenceExt::apply).

use crate::sequence::Sequence;

/// A reusable, packaged chain of combinators.
///
/// The output type is spelled out by the implementor, so the chain stays
/// fully static: applying a composite costs the same as writing the chain
/// inline.
///
/// # Example
/// ```
/// use hyperseq::*;
/// use hyperseq::extensions::Composite;
///
/// struct EvenSquares;
///
/// impl<'a> Composite<SliceSeq<'a, i32>> for EvenSquares {
///     type Output = FilterThenMap<SliceSeq<'a, i32>, fn(&&'a i32) -> bool, fn(&'a i32) -> i32>;
///
///     fn expand(&self, input: SliceSeq<'a, i32>) -> Self::Output {
///         let even: fn(&&'a i32) -> bool = |x| **x % 2 == 0;
///         let square: fn(&'a i32) -> i32 = |x| x * x;
///         input.filter(even).map(square)
///     }
/// }
///
/// let squares = from_slice(&[1, 2, 3, 4]).apply(&EvenSquares).to_vec();
/// assert_eq!(squares, vec![4, 16]);
/// ```
pub trait Composite<S: Sequence> {
    type Output: Sequence;

    fn expand(&self, input: S) -> Self::Output;
}
