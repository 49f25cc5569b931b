use std::path::Path;

use serde::Deserialize;

use crate::alignment::alphabet::DEFAULT_FALLBACK;
use crate::alignment::changes::TrailingChangePolicy;
use crate::error::AlignmentError;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AlignerConfig {
    pub trailing_change_policy: TrailingChangePolicy,
    /// Fallback symbol when neither document has a multi-unit character.
    /// Must be ASCII.
    pub fallback_sentinel: char,
    /// Compare match runs against the original characters after alignment.
    /// Always skipped when the alphabet overflows.
    pub verify_matches: bool,
}

impl AlignerConfig {
    pub const DEFAULT_FALLBACK_SENTINEL: char = DEFAULT_FALLBACK;

    pub fn load(path: &Path) -> Result<Self, AlignmentError> {
        let data = std::fs::read_to_string(path)
            .map_err(|e| AlignmentError::io("read aligner config", e))?;
        serde_json::from_str(&data).map_err(|e| AlignmentError::json("parse aligner config", e))
    }

    pub fn with_trailing_change_policy(mut self, policy: TrailingChangePolicy) -> Self {
        self.trailing_change_policy = policy;
        self
    }
}

impl Default for AlignerConfig {
    fn default() -> Self {
        Self {
            trailing_change_policy: TrailingChangePolicy::default(),
            fallback_sentinel: Self::DEFAULT_FALLBACK_SENTINEL,
            verify_matches: true,
        }
    }
}
