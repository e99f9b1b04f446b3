//! Error types shared by the synchronous and asynchronous surfaces.
//!
//! Absence is never an error: the `Option`-returning terminals report "not
//! found" as `None`. [`SeqError`] is reserved for the explicit `_or_err`
//! terminals, checked arithmetic, argument validation, read-only views and
//! cancellation.

use thiserror::Error;
use tracing::debug;

/// Result alias used throughout the crate.
pub type Result<T, E = SeqError> = std::result::Result<T, E>;

/// Marker produced when a cancellation token was observed at a suspension
/// point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
#[error("traversal cancelled")]
pub struct Cancelled;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SeqError {
    #[error("invalid argument `{name}`: {reason}")]
    InvalidArgument { name: &'static str, reason: String },

    #[error("unsupported operation: {0}")]
    Unsupported(&'static str),

    #[error("sequence contains no matching element")]
    NoElements,

    #[error("sequence contains more than one matching element")]
    MultipleElements,

    #[error("index {index} is out of range for a sequence of length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("duplicate key produced by element {index}")]
    DuplicateKey { index: usize },

    #[error(
        "destination too small: capacity {capacity}, required {}, written {written}",
        .required.map_or_else(|| "unknown".to_string(), |n| n.to_string())
    )]
    DestinationTooSmall {
        capacity: usize,
        required: Option<usize>,
        written: usize,
    },

    #[error("arithmetic overflow while summing")]
    Overflow,

    #[error(transparent)]
    Cancelled(#[from] Cancelled),

    #[error("config error: {0}")]
    Config(String),
}

impl SeqError {
    /// Shorthand for [`SeqError::InvalidArgument`].
    pub fn invalid_argument(name: &'static str, reason: impl Into<String>) -> Self {
        let reason = reason.into();
        debug!(name, %reason, "rejected argument");
        Self::InvalidArgument { name, reason }
    }

    /// `true` when the error reports cancellation rather than a failure of
    /// the traversal itself.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled(_))
    }
}

impl From<serde_json::Error> for SeqError {
    fn from(err: serde_json::Error) -> Self {
        Self::Config(err.to_string())
    }
}
