//! Evaluation configuration.
//!
//! Overlap thresholds are configuration, not constants, so the same engine
//! serves strict scoring (0.5) and the looser inter-annotator agreement
//! check (0.3).

use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// IoU threshold for strict system-vs-reference scoring.
pub const STRICT_IOU_THRESHOLD: f64 = 0.5;

/// IoU threshold for inter-annotator agreement checks.
pub const AGREEMENT_IOU_THRESHOLD: f64 = 0.3;

/// Thresholds driving candidate enumeration and redundancy consolidation.
///
/// # Example
///
/// ```rust
/// use qasrl_eval::eval::EvalConfig;
///
/// let config = EvalConfig::from_json(r#"{"match_threshold": 0.4}"#).unwrap();
/// assert_eq!(config.match_threshold, 0.4);
/// assert_eq!(config.consolidation_threshold, 0.5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvalConfig {
    /// Minimum IoU for a predicted/reference pair to be a match candidate
    pub match_threshold: f64,
    /// Minimum IoU for two leftover predictions to be treated as duplicates
    pub consolidation_threshold: f64,
}

impl Default for EvalConfig {
    fn default() -> Self {
        Self::strict()
    }
}

impl EvalConfig {
    /// Strict scoring thresholds (0.5 / 0.5).
    #[must_use]
    pub fn strict() -> Self {
        Self {
            match_threshold: STRICT_IOU_THRESHOLD,
            consolidation_threshold: STRICT_IOU_THRESHOLD,
        }
    }

    /// Inter-annotator agreement thresholds (0.3 / 0.3).
    #[must_use]
    pub fn agreement() -> Self {
        Self {
            match_threshold: AGREEMENT_IOU_THRESHOLD,
            consolidation_threshold: AGREEMENT_IOU_THRESHOLD,
        }
    }

    /// Set the match threshold.
    #[must_use]
    pub fn with_match_threshold(mut self, threshold: f64) -> Self {
        self.match_threshold = threshold;
        self
    }

    /// Set the consolidation threshold.
    #[must_use]
    pub fn with_consolidation_threshold(mut self, threshold: f64) -> Self {
        self.consolidation_threshold = threshold;
        self
    }

    /// Check that both thresholds lie in `(0, 1]`.
    ///
    /// A zero threshold would make disjoint spans match candidates.
    pub fn validate(&self) -> Result<()> {
        check_threshold("match_threshold", self.match_threshold)?;
        check_threshold("consolidation_threshold", self.consolidation_threshold)
    }

    /// Parse and validate a JSON configuration. Missing fields take strict defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }
}

fn check_threshold(name: &str, value: f64) -> Result<()> {
    if value > 0.0 && value <= 1.0 {
        Ok(())
    } else {
        Err(Error::config(format!("{} must be in (0, 1], got {}", name, value)))
    }
}
