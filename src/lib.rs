//! **Classification and similarity scoring for electronic part numbers.**
//!
//! `mpn-tools` answers two questions about manufacturer part numbers (MPNs):
//! who makes this part and what kind of part it is, and how well one part can
//! stand in for another.
//!
//! ## Core Concepts & Modules
//!
//! - **[`model`]**: normalized [`PartNumber`]s, hierarchical [`ComponentType`]
//!   tags, [`Manufacturer`] identities and typed [`SpecValue`]s.
//! - **[`classify`]**: the [`PartClassifier`], an ordered manufacturer detector
//!   over a shared pattern registry.
//! - **[`scoring`]**: tolerance rules, importance tiers, similarity profiles
//!   and the metadata-driven [`WeightedScorer`].
//! - **[`calculators`]**: per-family calculators that decode a part number
//!   into characteristics and score them, dispatched in a fixed order.
//! - **[`matching`]**: the [`MpnMatcher`] tying it all together, plus the
//!   text fallback for part families no calculator claims.
//! - **[`config`]**: YAML configuration for profiles, thresholds and metadata
//!   overrides.
//!
//! ## Getting Started
//!
//! ```no_run
//! use mpn_tools::{MpnMatcher, SimilarityProfile};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let matcher = MpnMatcher::builtin()?;
//!
//!     let part = matcher.classify("GRM188R71H104KA93D");
//!     println!("{} / {:?}", part.manufacturer, part.component_type);
//!
//!     let result = matcher.similarity_detailed("LM7805CT", "L7805CV");
//!     println!("{}", result.summary());
//!
//!     let shortage = matcher.similarity_with_profile(
//!         "RC0603FR-0710KL",
//!         "RC0603JR-0710KL",
//!         SimilarityProfile::EmergencySourcing,
//!     );
//!     println!("shortage score: {shortage:.3}");
//!     Ok(())
//! }
//! ```
//!
//! The free functions [`similarity`], [`classify_type`] and
//! [`classify_manufacturer`] use a lazily built default matcher.

// Lint to discourage unwrap() in production code - prefer explicit error handling
#![warn(clippy::unwrap_used)]
#![allow(
    // Scores and spec values are f64; counts are converted for averaging
    clippy::cast_precision_loss,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    // Variable names like `min`/`max` or `a`/`b` are clear in context
    clippy::similar_names
)]

pub mod calculators;
pub mod classify;
pub mod config;
pub mod error;
pub mod matching;
pub mod model;
pub mod scoring;

use std::sync::LazyLock;

// Re-export main types for convenience
pub use calculators::{
    builtin_calculators, builtin_metadata, CalculatorRegistry, CalculatorResult,
    SimilarityCalculator,
};
pub use classify::{ClassifiedPart, PartClassifier};
pub use config::{ConfigError, ConfigPreset, MatcherConfig, Validatable};
pub use error::{ErrorContext, MpnError, OptionContext, Result};
pub use matching::{
    FallbackConfig, FallbackScorer, MpnMatcher, MpnMatcherBuilder, RankedCandidate,
    ScoringMethod, SimilarityResult,
};
pub use model::{BaseType, ComponentType, Manufacturer, PartNumber, SpecValue, Specs};
pub use scoring::{
    Importance, SimilarityProfile, SpecScoreBreakdown, ToleranceRule, TypeMetadata,
    TypeMetadataRegistry, WeightedScorer,
};

static DEFAULT_MATCHER: LazyLock<MpnMatcher> = LazyLock::new(|| {
    MpnMatcher::builtin().expect("built-in registries are valid")
});

/// The shared matcher over the built-in registries.
#[must_use]
pub fn default_matcher() -> &'static MpnMatcher {
    &DEFAULT_MATCHER
}

/// Uppercase and drop everything but alphanumerics and meaningful punctuation.
#[must_use]
pub fn normalize(raw: &str) -> PartNumber {
    PartNumber::normalize(raw)
}

/// The manufacturer of `raw`, `Manufacturer::Unknown` when undetected.
#[must_use]
pub fn classify_manufacturer(raw: &str) -> Manufacturer {
    default_matcher().classify(raw).manufacturer
}

/// The component type of `raw`, if any pattern matches.
#[must_use]
pub fn classify_type(raw: &str) -> Option<ComponentType> {
    default_matcher().classify(raw).component_type
}

/// Similarity of two part numbers in [0, 1] under each type's default profile.
#[must_use]
pub fn similarity(a: &str, b: &str) -> f64 {
    default_matcher().similarity(a, b)
}
