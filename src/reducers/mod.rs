//! Terminal reducers.
//!
//! Each reducer drives one traversal to completion (or to its short-circuit
//! point) and releases the cursor on every exit path. Reducers whose cost
//! depends on the capability tier go through [`TierStrategy`](crate::TierStrategy).
//!
//! Organization:
//! - [`aggregate`]: `count`, checked `sum`
//! - [`quantifier`]: `any`, `all`, `contains`
//! - [`element`]: `first`, `single`, `element_at`
//! - [`conversion`]: vectors, maps, `copy_to`

pub mod aggregate;
pub mod conversion;
pub mod element;
pub mod quantifier;

pub use aggregate::*;
pub use conversion::*;
pub use element::*;
pub use quantifier::*;
