//! Default values and named presets.

use super::types::{FallbackSettings, MatcherConfig};
use crate::scoring::SimilarityProfile;

// ============================================================================
// Configuration Presets
// ============================================================================

/// Named configurations for common sourcing situations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigPreset {
    /// Per-type default profiles, balanced fallback
    Default,
    /// New design: strict profile and strict text fallback
    Design,
    /// Shortage buy: emergency profile, permissive text fallback
    Shortage,
    /// Cheaper equivalents
    CostDown,
}

impl ConfigPreset {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Design => "design",
            Self::Shortage => "shortage",
            Self::CostDown => "cost-down",
        }
    }

    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "default" | "balanced" => Some(Self::Default),
            "design" | "new-design" | "strict" => Some(Self::Design),
            "shortage" | "emergency" => Some(Self::Shortage),
            "cost-down" | "cost" => Some(Self::CostDown),
            _ => None,
        }
    }

    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::Default => "Each component type's default profile",
            Self::Design => "Every characteristic weighs heavily; text fallback is strict",
            Self::Shortage => "Only critical characteristics really matter",
            Self::CostDown => "Secondary characteristics may drift",
        }
    }

    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Default, Self::Design, Self::Shortage, Self::CostDown]
    }
}

impl std::fmt::Display for ConfigPreset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

// ============================================================================
// Preset Implementations
// ============================================================================

impl MatcherConfig {
    #[must_use]
    pub fn from_preset(preset: ConfigPreset) -> Self {
        match preset {
            ConfigPreset::Default => Self::default(),
            ConfigPreset::Design => Self::with_profile(SimilarityProfile::DesignPhase, "strict"),
            ConfigPreset::Shortage => {
                Self::with_profile(SimilarityProfile::EmergencySourcing, "permissive")
            }
            ConfigPreset::CostDown => {
                Self::with_profile(SimilarityProfile::CostOptimization, DEFAULT_FALLBACK_PRESET)
            }
        }
    }

    fn with_profile(profile: SimilarityProfile, fallback_preset: &str) -> Self {
        Self {
            profile: Some(profile),
            fallback: FallbackSettings {
                preset: fallback_preset.to_string(),
                weights: None,
            },
            ..Self::default()
        }
    }
}

// ============================================================================
// Default Value Constants
// ============================================================================

/// Fallback preset used when none is configured.
pub const DEFAULT_FALLBACK_PRESET: &str = "balanced";
