//! Configuration validation.

use super::types::{FallbackSettings, MatcherConfig, SpecRuleConfig, TypeMetadataConfig};
use crate::matching::FallbackConfig;
use crate::model::ComponentType;
use crate::scoring::ToleranceRule;

// ============================================================================
// Configuration Error
// ============================================================================

/// A configuration value that failed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigError {
    /// Path of the offending field (`type_metadata[0].specs[1].threshold`)
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Validation Trait
// ============================================================================

/// Trait for validatable configuration types.
pub trait Validatable {
    /// Validate the configuration, returning any errors found.
    fn validate(&self) -> Vec<ConfigError>;

    fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}

fn unit_range(field: impl Into<String>, value: f64) -> Option<ConfigError> {
    (!(0.0..=1.0).contains(&value)).then(|| ConfigError {
        field: field.into(),
        message: format!("must be between 0.0 and 1.0, got {value}"),
    })
}

// ============================================================================
// Validation Implementations
// ============================================================================

impl Validatable for MatcherConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        if let Some(threshold) = self.acceptance_threshold {
            errors.extend(unit_range("acceptance_threshold", threshold));
        }
        errors.extend(self.fallback.validate());
        for (i, metadata) in self.type_metadata.iter().enumerate() {
            errors.extend(metadata.validate().into_iter().map(|e| ConfigError {
                field: format!("type_metadata[{i}].{}", e.field),
                message: e.message,
            }));
        }
        errors
    }
}

impl Validatable for FallbackSettings {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        if self.weights.is_none() && FallbackConfig::from_preset(&self.preset).is_none() {
            errors.push(ConfigError {
                field: "fallback.preset".to_string(),
                message: format!(
                    "Invalid preset '{}'. Valid options: {}",
                    self.preset,
                    FallbackConfig::PRESETS.join(", ")
                ),
            });
        }
        if let Some(weights) = &self.weights {
            for (name, value) in [
                ("jaro_winkler_weight", weights.jaro_winkler_weight),
                ("levenshtein_weight", weights.levenshtein_weight),
            ] {
                if !value.is_finite() || value < 0.0 {
                    errors.push(ConfigError {
                        field: format!("fallback.weights.{name}"),
                        message: format!("must be a non-negative number, got {value}"),
                    });
                }
            }
            if weights.jaro_winkler_weight + weights.levenshtein_weight <= 0.0 {
                errors.push(ConfigError {
                    field: "fallback.weights".to_string(),
                    message: "edit-distance weights must not both be zero".to_string(),
                });
            }
            errors.extend(unit_range("fallback.weights.affix_weight", weights.affix_weight));
        }
        errors
    }
}

impl Validatable for TypeMetadataConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        if let Err(e) = self.component_type.parse::<ComponentType>() {
            errors.push(ConfigError {
                field: "component_type".to_string(),
                message: e.to_string(),
            });
        }
        if self.specs.is_empty() {
            errors.push(ConfigError {
                field: "specs".to_string(),
                message: "at least one spec is required".to_string(),
            });
        }
        for (i, spec) in self.specs.iter().enumerate() {
            errors.extend(spec.validate().into_iter().map(|e| ConfigError {
                field: format!("specs[{i}].{}", e.field),
                message: e.message,
            }));
        }
        errors
    }
}

impl Validatable for SpecRuleConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        if self.name.trim().is_empty() {
            errors.push(ConfigError {
                field: "name".to_string(),
                message: "spec name is empty".to_string(),
            });
        }
        if let Some(threshold) = self.threshold {
            errors.extend(unit_range("threshold", threshold));
        }
        if let Err(e) = ToleranceRule::new(self.rule).validate() {
            let message = e
                .registration_kind()
                .map_or_else(|| e.to_string(), ToString::to_string);
            errors.push(ConfigError {
                field: "rule".to_string(),
                message,
            });
        }
        errors
    }
}
