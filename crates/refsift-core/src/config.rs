use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{RefsiftError, Result};
use crate::similarity::CANDIDATE_FLOOR;

/// How titles of a candidate pair are compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TitleMatch {
    /// Duplicate iff the lowercased, punctuation-stripped titles are identical.
    Exact,
    /// Cosine similarity over a two-document term matrix built from the titles.
    #[default]
    TokenSimilarity,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DedupConfig {
    pub doc_sim_threshold: f64,
    pub title_sim_threshold: f64,
    pub mean_sim_threshold: f64,
    pub title_match: TitleMatch,
}

impl Default for DedupConfig {
    fn default() -> Self {
        Self {
            doc_sim_threshold: 0.85,
            title_sim_threshold: 0.95,
            mean_sim_threshold: 0.80,
            title_match: TitleMatch::TokenSimilarity,
        }
    }
}

impl DedupConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_doc_threshold(mut self, threshold: f64) -> Self {
        self.doc_sim_threshold = threshold.clamp(0.0, 1.0);
        self
    }

    pub fn with_title_threshold(mut self, threshold: f64) -> Self {
        self.title_sim_threshold = threshold.clamp(0.0, 1.0);
        self
    }

    pub fn with_mean_threshold(mut self, threshold: f64) -> Self {
        self.mean_sim_threshold = threshold.clamp(0.0, 1.0);
        self
    }

    pub fn with_title_match(mut self, mode: TitleMatch) -> Self {
        self.title_match = mode;
        self
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self =
            toml::from_str(&content).map_err(|e| RefsiftError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Candidate pairs below `CANDIDATE_FLOOR` on document similarity are
    /// never materialized, so the decision thresholds must sit at or above
    /// the floor for the pruning to be lossless.
    pub fn validate(&self) -> Result<()> {
        if self.doc_sim_threshold < CANDIDATE_FLOOR {
            return Err(RefsiftError::InvalidThreshold(format!(
                "doc_sim_threshold {} is below the candidate floor {CANDIDATE_FLOOR}",
                self.doc_sim_threshold
            )));
        }
        if self.mean_sim_threshold < CANDIDATE_FLOOR {
            return Err(RefsiftError::InvalidThreshold(format!(
                "mean_sim_threshold {} is below the candidate floor {CANDIDATE_FLOOR}",
                self.mean_sim_threshold
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_pass_validation() {
        assert!(DedupConfig::default().validate().is_ok());
    }

    #[test]
    fn threshold_below_floor_is_rejected() {
        let config = DedupConfig::new().with_doc_threshold(0.3);
        assert!(matches!(
            config.validate(),
            Err(RefsiftError::InvalidThreshold(_))
        ));
    }

    #[test]
    fn builder_clamps_out_of_range_values() {
        let config = DedupConfig::new().with_mean_threshold(1.7);
        assert_eq!(config.mean_sim_threshold, 1.0);
    }

    #[test]
    fn parses_kebab_case_title_match() {
        let config: DedupConfig =
            toml::from_str("title_match = \"exact\"").expect("valid config");
        assert_eq!(config.title_match, TitleMatch::Exact);
        assert_eq!(config.doc_sim_threshold, 0.85);
    }
}
