//! Similarity profiles.
//!
//! A profile encodes the sourcing context a comparison is made in. It scales
//! each importance tier's base weight and sets the acceptance threshold: a new
//! design is strict about every characteristic, an emergency buy only about
//! the critical ones.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::importance::Importance;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "kebab-case")]
#[non_exhaustive]
pub enum SimilarityProfile {
    /// Selecting parts for a new design
    DesignPhase,
    /// Finding a drop-in replacement for an existing design
    #[default]
    Replacement,
    /// Looking for a cheaper equivalent
    CostOptimization,
    /// Looking for a better-performing part
    PerformanceUpgrade,
    /// Sourcing anything that works during a shortage
    EmergencySourcing,
}

impl SimilarityProfile {
    pub const ALL: [Self; 5] = [
        Self::DesignPhase,
        Self::Replacement,
        Self::CostOptimization,
        Self::PerformanceUpgrade,
        Self::EmergencySourcing,
    ];

    /// Multiplier applied to a tier's base weight.
    #[must_use]
    pub const fn multiplier(self, importance: Importance) -> f64 {
        let row: [f64; 5] = match self {
            Self::DesignPhase => [1.0, 0.9, 0.6, 0.3, 0.1],
            Self::Replacement => [1.0, 0.7, 0.4, 0.2, 0.05],
            Self::CostOptimization => [1.0, 0.5, 0.3, 0.15, 0.0],
            Self::PerformanceUpgrade => [1.0, 0.95, 0.7, 0.35, 0.15],
            Self::EmergencySourcing => [1.0, 0.4, 0.2, 0.1, 0.0],
        };
        match importance {
            Importance::Critical => row[0],
            Importance::High => row[1],
            Importance::Medium => row[2],
            Importance::Low => row[3],
            Importance::Optional => row[4],
        }
    }

    /// Minimum score for a candidate to be acceptable in this context.
    #[must_use]
    pub const fn threshold(self) -> f64 {
        match self {
            Self::DesignPhase => 0.85,
            Self::Replacement => 0.75,
            Self::CostOptimization => 0.70,
            Self::PerformanceUpgrade => 0.80,
            Self::EmergencySourcing => 0.60,
        }
    }

    /// `base_weight(tier) × multiplier(tier)`.
    #[must_use]
    pub fn effective_weight(self, importance: Importance) -> f64 {
        importance.base_weight() * self.multiplier(importance)
    }

    #[must_use]
    pub fn is_acceptable(self, score: f64) -> bool {
        score >= self.threshold()
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::DesignPhase => "design-phase",
            Self::Replacement => "replacement",
            Self::CostOptimization => "cost-optimization",
            Self::PerformanceUpgrade => "performance-upgrade",
            Self::EmergencySourcing => "emergency-sourcing",
        }
    }

    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::DesignPhase => "New design: all characteristics weigh heavily",
            Self::Replacement => "Drop-in replacement for an existing design",
            Self::CostOptimization => "Cheaper equivalent; secondary specs may drift",
            Self::PerformanceUpgrade => "Better part; high and medium specs weigh heavily",
            Self::EmergencySourcing => "Shortage buy: only critical specs really matter",
        }
    }

    /// Parse a profile name (`design-phase`, `design_phase`, `DesignPhase`).
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let key: String = name
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_lowercase())
            .collect();
        Self::ALL
            .into_iter()
            .find(|p| p.name().replace('-', "") == key)
    }
}

impl fmt::Display for SimilarityProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_multipliers_in_unit_range_and_distinct_per_tier() {
        for profile in SimilarityProfile::ALL {
            let row: Vec<f64> = Importance::ALL
                .iter()
                .map(|&i| profile.multiplier(i))
                .collect();
            assert!(row.iter().all(|m| (0.0..=1.0).contains(m)), "{profile}");
            assert!(row.windows(2).all(|w| w[0] > w[1] || w[1] == 0.0), "{profile}");
        }
    }

    #[test]
    fn test_thresholds() {
        assert_eq!(SimilarityProfile::DesignPhase.threshold(), 0.85);
        assert_eq!(SimilarityProfile::Replacement.threshold(), 0.75);
        assert_eq!(SimilarityProfile::CostOptimization.threshold(), 0.70);
        assert_eq!(SimilarityProfile::PerformanceUpgrade.threshold(), 0.80);
        assert_eq!(SimilarityProfile::EmergencySourcing.threshold(), 0.60);
    }

    #[test]
    fn test_effective_weight() {
        let p = SimilarityProfile::Replacement;
        assert!((p.effective_weight(Importance::High) - 0.49).abs() < 1e-12);
        assert!((p.effective_weight(Importance::Medium) - 0.16).abs() < 1e-12);
        assert_eq!(p.effective_weight(Importance::Critical), 1.0);
        assert_eq!(
            SimilarityProfile::EmergencySourcing.effective_weight(Importance::Optional),
            0.0
        );
    }

    #[test]
    fn test_from_name() {
        assert_eq!(
            SimilarityProfile::from_name("design-phase"),
            Some(SimilarityProfile::DesignPhase)
        );
        assert_eq!(
            SimilarityProfile::from_name("EMERGENCY_SOURCING"),
            Some(SimilarityProfile::EmergencySourcing)
        );
        assert_eq!(
            SimilarityProfile::from_name("PerformanceUpgrade"),
            Some(SimilarityProfile::PerformanceUpgrade)
        );
        assert_eq!(SimilarityProfile::from_name("cheap"), None);
    }

    #[test]
    fn test_serde_names() {
        let yaml = serde_yaml::to_string(&SimilarityProfile::CostOptimization).unwrap();
        assert_eq!(yaml.trim(), "cost-optimization");
    }
}
