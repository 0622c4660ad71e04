//! Generic string scorer for pairs no calculator claims.

use strsim::{jaro_winkler, normalized_levenshtein};

use crate::model::PartNumber;

use super::config::FallbackConfig;
use super::string_similarity::{common_affix_ratio, compute_token_similarity};

/// Scores two part numbers by their text alone.
///
/// The edit-distance blend (Jaro-Winkler and normalized Levenshtein) is
/// maxed with token Jaccard similarity when enabled, then blended with the
/// common-affix ratio. Symmetric and total.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FallbackScorer {
    config: FallbackConfig,
}

impl FallbackScorer {
    #[must_use]
    pub const fn new(config: FallbackConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub const fn config(&self) -> &FallbackConfig {
        &self.config
    }

    /// Similarity in [0, 1]; an empty side scores 0.0.
    #[must_use]
    pub fn score(&self, a: &PartNumber, b: &PartNumber) -> f64 {
        if a.is_empty() || b.is_empty() {
            return 0.0;
        }
        if a == b {
            return 1.0;
        }
        // Argument order must not leak into floating-point results.
        let (a, b) = if a <= b {
            (a.as_str(), b.as_str())
        } else {
            (b.as_str(), a.as_str())
        };

        let config = &self.config;
        let weight_sum = config.jaro_winkler_weight + config.levenshtein_weight;
        let mut edit = if weight_sum > 0.0 {
            (jaro_winkler(a, b) * config.jaro_winkler_weight
                + normalized_levenshtein(a, b) * config.levenshtein_weight)
                / weight_sum
        } else {
            0.0
        };
        if config.token_matching {
            edit = edit.max(compute_token_similarity(a, b));
        }

        let affix_weight = config.affix_weight.clamp(0.0, 1.0);
        let score = edit * (1.0 - affix_weight) + common_affix_ratio(a, b) * affix_weight;
        if score.is_nan() {
            0.0
        } else {
            score.clamp(0.0, 1.0)
        }
    }
}
