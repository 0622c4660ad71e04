//! Matcher configuration.
//!
//! - [`MatcherConfig`]: profile, acceptance threshold, fallback scorer
//!   settings and per-type metadata overrides
//! - [`Validatable`]: field-level checks reported as [`ConfigError`]s
//! - [`ConfigPreset`]: named configurations
//! - YAML loading and discovery in [`file`]
//!
//! # Configuration File
//!
//! Place a `.mpn-tools.yaml` file in your project root or `~/.config/mpn-tools/`:
//!
//! ```yaml
//! profile: emergency-sourcing
//! fallback:
//!   preset: permissive
//! type_metadata:
//!   - component_type: CAPACITOR_CERAMIC
//!     specs:
//!       - name: capacitance
//!         importance: critical
//!         rule: { kind: percentage_tolerance, percent: 20.0 }
//! ```
//!
//! ```rust,ignore
//! use mpn_tools::config::file::load_or_default;
//! use mpn_tools::MpnMatcher;
//!
//! let (config, _) = load_or_default(None);
//! let matcher = MpnMatcher::from_config(&config)?;
//! ```

mod defaults;
pub mod file;
mod types;
mod validation;

pub use defaults::{ConfigPreset, DEFAULT_FALLBACK_PRESET};
pub use types::{
    FallbackSettings, MatcherConfig, MatcherConfigBuilder, SpecRuleConfig, TypeMetadataConfig,
};
pub use validation::{ConfigError, Validatable};

pub use file::{
    discover_config_file, generate_example_config, load_config_file, load_or_default,
    ConfigFileError,
};

/// JSON Schema of the `.mpn-tools.yaml` format, for editor validation.
#[must_use]
pub fn generate_json_schema() -> String {
    let schema = schemars::schema_for!(MatcherConfig);
    serde_json::to_string_pretty(&schema).unwrap_or_default()
}
