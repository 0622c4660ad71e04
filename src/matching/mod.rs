//! The similarity engine.
//!
//! [`MpnMatcher`] ties the pipeline together: normalize both part numbers,
//! classify them, hand the pair to the first calculator claiming either type
//! and fall back to the [`FallbackScorer`] when none does. A calculator's
//! result is final, even 0.0.
//!
//! ```ignore
//! use mpn_tools::MpnMatcher;
//!
//! let matcher = MpnMatcher::builtin()?;
//! let score = matcher.similarity("GRM188R71H104KA93D", "CL10B104KB8NNNC");
//! assert_eq!(score, 1.0);
//! ```

mod config;
mod fallback;
pub mod string_similarity;

pub use config::FallbackConfig;
pub use fallback::FallbackScorer;

use rayon::prelude::*;
use serde::Serialize;
use std::path::Path;
use tracing::debug;

use crate::calculators::{
    builtin_calculators, builtin_metadata, builtin_metadata_builder, CalculatorRegistry,
    ScoringContext,
};
use crate::classify::{ClassifiedPart, PartClassifier};
use crate::config::{load_config_file, MatcherConfig, Validatable};
use crate::error::{ErrorContext, MpnError, Result};
use crate::model::PartNumber;
use crate::scoring::{SimilarityProfile, SpecScoreBreakdown, TypeMetadataRegistry, WeightedScorer};

/// How a [`SimilarityResult`] was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScoringMethod {
    /// One side normalized to nothing
    EmptyInput,
    /// A calculator claimed the pair
    Calculator {
        name: &'static str,
        /// Neither part decoded; the calculator scored the text
        degraded: bool,
    },
    /// No calculator claimed either type
    Fallback,
}

/// Auditable result of one comparison.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[must_use]
pub struct SimilarityResult {
    /// Final score in [0, 1]
    pub score: f64,
    pub method: ScoringMethod,
    pub part_a: ClassifiedPart,
    pub part_b: ClassifiedPart,
    /// Profile the weighted scorer resolved, if it ran
    pub profile: Option<SimilarityProfile>,
    pub breakdown: Option<SpecScoreBreakdown>,
    /// Score needed for [`is_acceptable`](Self::is_acceptable)
    pub threshold: f64,
}

impl SimilarityResult {
    #[must_use]
    pub fn is_acceptable(&self) -> bool {
        self.score >= self.threshold
    }

    /// One-line report: `LM7805CT vs L7805CV: 1.000 via LinearRegulatorCalculator (replacement, acceptable)`.
    #[must_use]
    pub fn summary(&self) -> String {
        let via = match self.method {
            ScoringMethod::EmptyInput => "empty input".to_string(),
            ScoringMethod::Calculator {
                name,
                degraded: false,
            } => name.to_string(),
            ScoringMethod::Calculator {
                name,
                degraded: true,
            } => format!("{name}, text only"),
            ScoringMethod::Fallback => "text fallback".to_string(),
        };
        let verdict = if self.is_acceptable() {
            "acceptable"
        } else {
            "not acceptable"
        };
        match self.profile {
            Some(profile) => format!(
                "{} vs {}: {:.3} via {via} ({profile}, {verdict})",
                self.part_a.mpn, self.part_b.mpn, self.score
            ),
            None => format!(
                "{} vs {}: {:.3} via {via} ({verdict})",
                self.part_a.mpn, self.part_b.mpn, self.score
            ),
        }
    }
}

/// A candidate with its comparison against the reference.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedCandidate {
    /// Position in the input slice
    pub index: usize,
    pub result: SimilarityResult,
}

/// Frozen classification and scoring pipeline. `Send + Sync`.
#[derive(Debug)]
pub struct MpnMatcher {
    classifier: PartClassifier,
    scorer: WeightedScorer,
    calculators: CalculatorRegistry,
    fallback: FallbackScorer,
    profile: Option<SimilarityProfile>,
    acceptance_threshold: Option<f64>,
}

impl MpnMatcher {
    pub fn builder() -> MpnMatcherBuilder {
        MpnMatcherBuilder::default()
    }

    /// The built-in classifier, calculators and metadata.
    pub fn builtin() -> Result<Self> {
        Self::builder().build()
    }

    /// Built-in pipeline with the configuration's overrides applied.
    pub fn from_config(config: &MatcherConfig) -> Result<Self> {
        let errors = config.validate();
        if !errors.is_empty() {
            return Err(errors.into());
        }
        let mut metadata = builtin_metadata_builder()?;
        for override_ in &config.type_metadata {
            let (tag, type_metadata) = override_.to_metadata()?;
            metadata
                .register(tag, type_metadata)
                .context("applying configured type metadata")?;
        }
        let mut builder = Self::builder()
            .metadata(metadata.build())
            .fallback(config.fallback.resolve());
        if let Some(profile) = config.profile {
            builder = builder.profile(profile);
        }
        if let Some(threshold) = config.acceptance_threshold {
            builder = builder.acceptance_threshold(threshold);
        }
        builder.build()
    }

    /// Load a YAML config file and build from it.
    pub fn from_config_file(path: &Path) -> Result<Self> {
        let config = load_config_file(path).map_err(|e| MpnError::config(e.to_string()))?;
        Self::from_config(&config)
            .with_context(|| format!("building matcher from {}", path.display()))
    }

    #[must_use]
    pub const fn classifier(&self) -> &PartClassifier {
        &self.classifier
    }

    #[must_use]
    pub const fn calculators(&self) -> &CalculatorRegistry {
        &self.calculators
    }

    #[must_use]
    pub const fn scorer(&self) -> &WeightedScorer {
        &self.scorer
    }

    #[must_use]
    pub const fn fallback(&self) -> &FallbackScorer {
        &self.fallback
    }

    #[must_use]
    pub const fn profile(&self) -> Option<SimilarityProfile> {
        self.profile
    }

    /// Normalize and classify a raw part number.
    pub fn classify(&self, raw: &str) -> ClassifiedPart {
        self.classifier.classify(&PartNumber::normalize(raw))
    }

    /// Similarity in [0, 1]; 0.0 when either side is empty.
    #[must_use]
    pub fn similarity(&self, a: &str, b: &str) -> f64 {
        self.similarity_detailed(a, b).score
    }

    /// Similarity under an explicit profile, overriding the configured one.
    #[must_use]
    pub fn similarity_with_profile(&self, a: &str, b: &str, profile: SimilarityProfile) -> f64 {
        self.compare(self.classify(a), self.classify(b), Some(profile))
            .score
    }

    pub fn similarity_detailed(&self, a: &str, b: &str) -> SimilarityResult {
        self.compare(self.classify(a), self.classify(b), self.profile)
    }

    /// Score every candidate against `reference`, best first.
    ///
    /// Ties keep input order. The reference is classified once.
    pub fn rank_candidates<S>(&self, reference: &str, candidates: &[S]) -> Vec<RankedCandidate>
    where
        S: AsRef<str> + Sync,
    {
        let reference = self.classify(reference);
        let mut ranked: Vec<RankedCandidate> = candidates
            .par_iter()
            .enumerate()
            .map(|(index, candidate)| RankedCandidate {
                index,
                result: self.compare(reference.clone(), self.classify(candidate.as_ref()), self.profile),
            })
            .collect();
        ranked.sort_by(|x, y| {
            y.result
                .score
                .total_cmp(&x.result.score)
                .then(x.index.cmp(&y.index))
        });
        ranked
    }

    fn compare(
        &self,
        a: ClassifiedPart,
        b: ClassifiedPart,
        profile: Option<SimilarityProfile>,
    ) -> SimilarityResult {
        if a.mpn.is_empty() || b.mpn.is_empty() {
            return self.result(0.0, ScoringMethod::EmptyInput, a, b, None, profile);
        }

        let ctx = ScoringContext {
            scorer: &self.scorer,
            fallback: &self.fallback,
            profile,
        };
        match self.calculators.dispatch(&a, &b, &ctx) {
            Some((name, outcome)) => {
                let method = ScoringMethod::Calculator {
                    name,
                    degraded: outcome.degraded,
                };
                let resolved = outcome
                    .breakdown
                    .as_ref()
                    .and_then(|breakdown| breakdown.profile)
                    .or(profile);
                self.result(outcome.score, method, a, b, outcome.breakdown, resolved)
            }
            None => {
                debug!(
                    mpn_a = %a.mpn,
                    mpn_b = %b.mpn,
                    "no calculator claims either type, using text fallback"
                );
                let score = self.fallback.score(&a.mpn, &b.mpn);
                self.result(score, ScoringMethod::Fallback, a, b, None, profile)
            }
        }
    }

    fn result(
        &self,
        score: f64,
        method: ScoringMethod,
        part_a: ClassifiedPart,
        part_b: ClassifiedPart,
        breakdown: Option<SpecScoreBreakdown>,
        profile: Option<SimilarityProfile>,
    ) -> SimilarityResult {
        let threshold = self
            .acceptance_threshold
            .unwrap_or_else(|| profile.unwrap_or_default().threshold());
        SimilarityResult {
            score: if score.is_nan() { 0.0 } else { score.clamp(0.0, 1.0) },
            method,
            part_a,
            part_b,
            profile,
            breakdown,
            threshold,
        }
    }
}

/// Builder for [`MpnMatcher`]; unset parts use the built-ins.
#[derive(Debug, Default)]
#[must_use]
pub struct MpnMatcherBuilder {
    classifier: Option<PartClassifier>,
    metadata: Option<TypeMetadataRegistry>,
    calculators: Option<CalculatorRegistry>,
    fallback: FallbackConfig,
    profile: Option<SimilarityProfile>,
    acceptance_threshold: Option<f64>,
}

impl MpnMatcherBuilder {
    pub fn classifier(mut self, classifier: PartClassifier) -> Self {
        self.classifier = Some(classifier);
        self
    }

    pub fn metadata(mut self, metadata: TypeMetadataRegistry) -> Self {
        self.metadata = Some(metadata);
        self
    }

    pub fn calculators(mut self, calculators: CalculatorRegistry) -> Self {
        self.calculators = Some(calculators);
        self
    }

    pub fn fallback(mut self, config: FallbackConfig) -> Self {
        self.fallback = config;
        self
    }

    pub fn profile(mut self, profile: SimilarityProfile) -> Self {
        self.profile = Some(profile);
        self
    }

    pub fn acceptance_threshold(mut self, threshold: f64) -> Self {
        self.acceptance_threshold = Some(threshold);
        self
    }

    pub fn build(self) -> Result<MpnMatcher> {
        if let Some(threshold) = self.acceptance_threshold {
            if !(0.0..=1.0).contains(&threshold) {
                return Err(MpnError::validation(format!(
                    "acceptance threshold {threshold} must be between 0.0 and 1.0"
                )));
            }
        }
        let classifier = match self.classifier {
            Some(classifier) => classifier,
            None => PartClassifier::builtin().context("building matcher")?,
        };
        let metadata = match self.metadata {
            Some(metadata) => metadata,
            None => builtin_metadata().context("building matcher")?,
        };
        Ok(MpnMatcher {
            classifier,
            scorer: WeightedScorer::new(metadata),
            calculators: self.calculators.unwrap_or_else(builtin_calculators),
            fallback: FallbackScorer::new(self.fallback),
            profile: self.profile,
            acceptance_threshold: self.acceptance_threshold,
        })
    }
}
