//! Configuration types for building a matcher.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::{ErrorContext, Result};
use crate::matching::FallbackConfig;
use crate::model::ComponentType;
use crate::scoring::{Importance, SimilarityProfile, ToleranceKind, ToleranceRule, TypeMetadata};

use super::defaults::DEFAULT_FALLBACK_PRESET;

// ============================================================================
// Matcher Configuration
// ============================================================================

/// Top-level configuration, loadable from `.mpn-tools.yaml`.
///
/// Every field is optional; an empty file yields the built-in behavior.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct MatcherConfig {
    /// Profile applied to every comparison; unset uses each type's default
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<SimilarityProfile>,
    /// Score a result must reach to be acceptable; unset uses the profile threshold
    #[serde(skip_serializing_if = "Option::is_none")]
    pub acceptance_threshold: Option<f64>,
    /// Generic string scorer settings
    pub fallback: FallbackSettings,
    /// Metadata registered on top of the built-in metadata
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub type_metadata: Vec<TypeMetadataConfig>,
}

impl MatcherConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn builder() -> MatcherConfigBuilder {
        MatcherConfigBuilder::default()
    }
}

// ============================================================================
// Builder for MatcherConfig
// ============================================================================

/// Fluent construction of a [`MatcherConfig`].
#[derive(Debug, Default)]
#[must_use]
pub struct MatcherConfigBuilder {
    config: MatcherConfig,
}

impl MatcherConfigBuilder {
    pub const fn profile(mut self, profile: SimilarityProfile) -> Self {
        self.config.profile = Some(profile);
        self
    }

    pub const fn acceptance_threshold(mut self, threshold: f64) -> Self {
        self.config.acceptance_threshold = Some(threshold);
        self
    }

    pub fn fallback_preset(mut self, preset: impl Into<String>) -> Self {
        self.config.fallback.preset = preset.into();
        self
    }

    pub const fn fallback_weights(mut self, weights: FallbackConfig) -> Self {
        self.config.fallback.weights = Some(weights);
        self
    }

    pub fn type_metadata(mut self, metadata: TypeMetadataConfig) -> Self {
        self.config.type_metadata.push(metadata);
        self
    }

    #[must_use]
    pub fn build(self) -> MatcherConfig {
        self.config
    }
}

// ============================================================================
// Fallback Scorer Settings
// ============================================================================

/// Preset name, or explicit weights which take precedence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct FallbackSettings {
    /// strict, balanced or permissive
    pub preset: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weights: Option<FallbackConfig>,
}

impl Default for FallbackSettings {
    fn default() -> Self {
        Self {
            preset: DEFAULT_FALLBACK_PRESET.to_string(),
            weights: None,
        }
    }
}

impl FallbackSettings {
    /// Explicit weights (normalized), else the named preset, else `balanced`.
    #[must_use]
    pub fn resolve(&self) -> FallbackConfig {
        match self.weights {
            Some(mut weights) => {
                weights.normalize();
                weights
            }
            None => FallbackConfig::from_preset(&self.preset).unwrap_or_default(),
        }
    }
}

// ============================================================================
// Type Metadata Overrides
// ============================================================================

/// Metadata for one component type, as written in a config file.
///
/// ```yaml
/// type_metadata:
///   - component_type: RESISTOR
///     default_profile: design-phase
///     specs:
///       - name: resistance
///         importance: critical
///         rule: { kind: percentage_tolerance, percent: 0.5 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TypeMetadataConfig {
    /// Display form of the type tag (`CAPACITOR_CERAMIC_MURATA`)
    pub component_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_profile: Option<SimilarityProfile>,
    pub specs: Vec<SpecRuleConfig>,
}

impl TypeMetadataConfig {
    /// Build validated metadata and the tag to register it under.
    pub fn to_metadata(&self) -> Result<(ComponentType, TypeMetadata)> {
        let tag: ComponentType = self.component_type.parse()?;
        let mut builder = TypeMetadata::builder(tag.clone());
        for spec in &self.specs {
            builder = builder.spec(spec.name.to_ascii_lowercase(), spec.importance, spec.to_rule());
        }
        if let Some(profile) = self.default_profile {
            builder = builder.default_profile(profile);
        }
        let metadata = builder
            .build()
            .with_context(|| format!("loading metadata for {tag}"))?;
        Ok((tag, metadata))
    }
}

/// One characteristic of a [`TypeMetadataConfig`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SpecRuleConfig {
    pub name: String,
    pub importance: Importance,
    pub rule: ToleranceKind,
    /// Acceptability threshold; defaults to 0.7
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threshold: Option<f64>,
}

impl SpecRuleConfig {
    #[must_use]
    pub fn to_rule(&self) -> ToleranceRule {
        let rule = ToleranceRule::new(self.rule);
        match self.threshold {
            Some(threshold) => rule.with_threshold(threshold),
            None => rule,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::BaseType;

    fn resistor_override() -> TypeMetadataConfig {
        TypeMetadataConfig {
            component_type: "resistor".to_string(),
            default_profile: Some(SimilarityProfile::DesignPhase),
            specs: vec![
                SpecRuleConfig {
                    name: "Resistance".to_string(),
                    importance: Importance::Critical,
                    rule: ToleranceKind::PercentageTolerance { percent: 0.5 },
                    threshold: None,
                },
                SpecRuleConfig {
                    name: "package".to_string(),
                    importance: Importance::Low,
                    rule: ToleranceKind::ExactMatch,
                    threshold: Some(0.9),
                },
            ],
        }
    }

    #[test]
    fn test_builder() {
        let config = MatcherConfig::builder()
            .profile(SimilarityProfile::EmergencySourcing)
            .acceptance_threshold(0.5)
            .fallback_preset("strict")
            .type_metadata(resistor_override())
            .build();
        assert_eq!(config.profile, Some(SimilarityProfile::EmergencySourcing));
        assert_eq!(config.acceptance_threshold, Some(0.5));
        assert_eq!(config.fallback.preset, "strict");
        assert_eq!(config.type_metadata.len(), 1);
    }

    #[test]
    fn test_fallback_resolution() {
        let settings = FallbackSettings::default();
        assert_eq!(settings.resolve(), FallbackConfig::balanced());

        let settings = FallbackSettings {
            preset: "Strict".to_string(),
            weights: None,
        };
        assert_eq!(settings.resolve(), FallbackConfig::strict());

        let settings = FallbackSettings {
            preset: "strict".to_string(),
            weights: Some(FallbackConfig {
                jaro_winkler_weight: 3.0,
                levenshtein_weight: 1.0,
                affix_weight: 0.0,
                token_matching: false,
            }),
        };
        let resolved = settings.resolve();
        assert!((resolved.jaro_winkler_weight - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_metadata_override_builds() {
        let (tag, metadata) = resistor_override().to_metadata().unwrap();
        assert_eq!(tag, ComponentType::of(BaseType::Resistor));
        assert_eq!(metadata.default_profile(), SimilarityProfile::DesignPhase);
        assert_eq!(metadata.critical_specs().collect::<Vec<_>>(), ["resistance"]);
        assert_eq!(metadata.spec("package").map(|s| s.rule.threshold()), Some(0.9));
    }

    #[test]
    fn test_bad_override_fails() {
        let mut bad = resistor_override();
        bad.component_type = "FLUX_CAPACITOR".to_string();
        assert!(bad.to_metadata().is_err());

        let mut bad = resistor_override();
        bad.specs[0].rule = ToleranceKind::MaximumAllowed { multiplier: 0.5 };
        assert!(bad.to_metadata().is_err());
    }

    #[test]
    fn test_yaml_shape() {
        let yaml = r"
profile: cost-optimization
fallback:
  preset: permissive
type_metadata:
  - component_type: CAPACITOR_CERAMIC
    specs:
      - name: capacitance
        importance: critical
        rule: { kind: percentage_tolerance, percent: 10.0 }
      - name: voltage
        importance: high
        rule: { kind: minimum_required }
";
        let config: MatcherConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.profile, Some(SimilarityProfile::CostOptimization));
        assert_eq!(config.fallback.preset, "permissive");
        let (tag, metadata) = config.type_metadata[0].to_metadata().unwrap();
        assert_eq!(tag.to_string(), "CAPACITOR_CERAMIC");
        assert_eq!(metadata.len(), 2);
    }
}
