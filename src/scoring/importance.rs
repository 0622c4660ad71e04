//! Importance tiers for characteristics.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How much a characteristic matters when comparing two parts.
///
/// Ordered `Optional < Low < Medium < High < Critical`. Only `Critical` is
/// mandatory: a critical spec missing from either part disqualifies the pair.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum Importance {
    Optional,
    Low,
    Medium,
    High,
    Critical,
}

impl Importance {
    /// All tiers, most important first.
    pub const ALL: [Self; 5] = [
        Self::Critical,
        Self::High,
        Self::Medium,
        Self::Low,
        Self::Optional,
    ];

    /// Weight before the profile multiplier is applied.
    #[must_use]
    pub const fn base_weight(self) -> f64 {
        match self {
            Self::Critical => 1.0,
            Self::High => 0.7,
            Self::Medium => 0.4,
            Self::Low => 0.2,
            Self::Optional => 0.0,
        }
    }

    #[must_use]
    pub const fn is_mandatory(self) -> bool {
        matches!(self, Self::Critical)
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Critical => "critical",
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
            Self::Optional => "optional",
        }
    }
}

impl fmt::Display for Importance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordering() {
        assert!(Importance::Critical > Importance::High);
        assert!(Importance::High > Importance::Medium);
        assert!(Importance::Low > Importance::Optional);
    }

    #[test]
    fn test_base_weights_descend() {
        let weights: Vec<f64> = Importance::ALL.iter().map(|i| i.base_weight()).collect();
        assert!(weights.windows(2).all(|w| w[0] > w[1]));
        assert_eq!(Importance::Optional.base_weight(), 0.0);
    }

    #[test]
    fn test_only_critical_is_mandatory() {
        let mandatory: Vec<_> = Importance::ALL
            .into_iter()
            .filter(|i| i.is_mandatory())
            .collect();
        assert_eq!(mandatory, [Importance::Critical]);
    }
}
