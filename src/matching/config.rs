//! Fallback string-scorer configuration.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Weights of the generic string scorer used when no calculator claims a pair.
///
/// `jaro_winkler_weight` and `levenshtein_weight` form the edit-distance
/// blend and should sum to 1.0. `affix_weight` is the share given to the
/// common prefix/suffix ratio in the final blend.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct FallbackConfig {
    /// Weight for Jaro-Winkler similarity
    pub jaro_winkler_weight: f64,
    /// Weight for normalized Levenshtein similarity
    pub levenshtein_weight: f64,
    /// Share of the common-affix ratio in the final score (0.0 - 1.0)
    pub affix_weight: f64,
    /// Whether token Jaccard similarity may lift the edit-distance score
    pub token_matching: bool,
}

impl FallbackConfig {
    /// Edit distance only, light affix credit.
    #[must_use]
    pub const fn strict() -> Self {
        Self {
            jaro_winkler_weight: 0.5,
            levenshtein_weight: 0.5,
            affix_weight: 0.1,
            token_matching: false,
        }
    }

    /// General-purpose weighting.
    #[must_use]
    pub const fn balanced() -> Self {
        Self {
            jaro_winkler_weight: 0.6,
            levenshtein_weight: 0.4,
            affix_weight: 0.2,
            token_matching: true,
        }
    }

    /// Favors shared families and ordering-code prefixes.
    #[must_use]
    pub const fn permissive() -> Self {
        Self {
            jaro_winkler_weight: 0.7,
            levenshtein_weight: 0.3,
            affix_weight: 0.3,
            token_matching: true,
        }
    }

    /// Create config from a preset name (`strict`, `balanced`, `permissive`).
    #[must_use]
    pub fn from_preset(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "strict" => Some(Self::strict()),
            "balanced" => Some(Self::balanced()),
            "permissive" => Some(Self::permissive()),
            _ => None,
        }
    }

    /// Preset names accepted by [`from_preset`](Self::from_preset).
    pub const PRESETS: [&'static str; 3] = ["strict", "balanced", "permissive"];

    /// Check the edit-distance weights sum to ~1.0.
    #[must_use]
    pub fn is_normalized(&self) -> bool {
        let sum = self.jaro_winkler_weight + self.levenshtein_weight;
        (sum - 1.0).abs() < 0.001
    }

    /// Scale the edit-distance weights to sum to 1.0.
    pub fn normalize(&mut self) {
        let sum = self.jaro_winkler_weight + self.levenshtein_weight;
        if sum > 0.0 {
            self.jaro_winkler_weight /= sum;
            self.levenshtein_weight /= sum;
        }
    }
}

impl Default for FallbackConfig {
    fn default() -> Self {
        Self::balanced()
    }
}
