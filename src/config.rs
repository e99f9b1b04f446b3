//! Runtime configuration for the async mirror.

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::Result;

/// Settings applied when a synchronous sequence is lifted into the async
/// mirror.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AsyncConfig {
    /// A lifted source yields to the scheduler after this many consecutive
    /// advances. `0` never yields.
    pub yield_every: usize,
}

impl Default for AsyncConfig {
    fn default() -> Self {
        Self { yield_every: 64 }
    }
}

impl AsyncConfig {
    pub const ENV_YIELD_EVERY: &'static str = "HYPERSEQ_YIELD_EVERY";

    pub fn with_yield_every(mut self, yield_every: usize) -> Self {
        self.yield_every = yield_every;
        self
    }

    /// Create a config from environment variables, falling back to defaults.
    ///
    /// Environment variables:
    /// - `HYPERSEQ_YIELD_EVERY`: advances between cooperative yields
    ///
    /// Unparseable values are logged and ignored.
    pub fn from_env() -> Self {
        let mut cfg = Self::default();

        if let Ok(s) = std::env::var(Self::ENV_YIELD_EVERY) {
            match s.trim().parse::<usize>() {
                Ok(v) => cfg.yield_every = v,
                Err(err) => warn!(var = Self::ENV_YIELD_EVERY, value = %s, %err, "ignoring malformed setting"),
            }
        }

        cfg
    }

    /// Parses a JSON document; absent fields keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        Self::from_json_str(&raw).with_context(|| format!("parsing config file {}", path.display()))
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SeqError;

    #[test]
    fn missing_fields_keep_defaults() -> Result<()> {
        assert_eq!(AsyncConfig::from_json_str("{}")?, AsyncConfig::default());
        assert_eq!(AsyncConfig::from_json_str(r#"{"yield_every": 8}"#)?.yield_every, 8);
        Ok(())
    }

    #[test]
    fn malformed_json_is_a_config_error() {
        let err = AsyncConfig::from_json_str(r#"{"yield_every": "often"}"#).unwrap_err();
        assert!(matches!(err, SeqError::Config(_)));
    }
}
