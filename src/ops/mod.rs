//! Operator combinators.
//!
//! Each combinator is a plain struct pairing a source with a transform. It
//! implements [`Sequence`](crate::Sequence) and declares its tier at the type
//! level:
//!
//! | Combinator | Tier |
//! |---|---|
//! | [`Map`], [`MapAt`] | source's |
//! | [`Take`], [`Skip`] | source's, length clamped |
//! | [`Filter`], [`FilterAt`], [`FilterThenMap`], [`FlatMap`] | sequential |
//!
//! Fusion happens through inherent methods that shadow the generic ones on
//! [`SequenceExt`](crate::SequenceExt): `map` on a [`Map`] composes the two
//! transforms, `take` on a [`Take`] keeps the smaller bound, and so on. The
//! fused value is an ordinary combinator, so nothing changes for the caller.

pub mod compose;
pub mod filter;
pub mod flat_map;
pub mod map;
pub mod partition;

pub use compose::*;
pub use filter::*;
pub use flat_map::*;
pub use map::*;
pub use partition::*;
