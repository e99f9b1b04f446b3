//! Helpers for testing sequence pipelines.
//!
//! - **Assertions**: compare a sequence against expected output, and check
//!   that a sequence yields the same elements on every traversal.
//! - **Probes**: wrap a source and record how it was driven (cursors
//!   opened, advances, releases), or count transform invocations.
//!
//! # Quick Start
//!
//! ```
//! use hyperseq::*;
//! use hyperseq::testing::*;
//!
//! let probe = Probe::new(from_slice(&[1, 2, 3, 4]));
//! let doubled = probe.clone().map(|x: &i32| x * 2).take(2);
//!
//! assert_sequence_eq(&doubled, &[2, 4]);
//! assert_eq!(probe.stats().cursors(), 1);
//! assert_eq!(probe.stats().advances(), 2);
//! ```

mod assertions;
mod probes;

pub use assertions::*;
pub use probes::*;
