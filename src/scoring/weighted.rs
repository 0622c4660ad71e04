//! Metadata-driven weighted scoring.
//!
//! For a component type with registered metadata, each declared spec present
//! on both sides is scored by its tolerance rule and weighted by
//! `base_weight(tier) × profile multiplier(tier)`. The total is
//! `Σ(score·w) / Σ(w)`. A critical spec missing from either side
//! disqualifies the pair outright.
//!
//! Types without metadata are scored by the legacy spec scorer, an unweighted
//! average of per-spec closeness over shared spec names.

use serde::Serialize;
use std::fmt::Write as _;
use tracing::debug;

use crate::model::{ComponentType, Specs};

use super::importance::Importance;
use super::metadata::{TypeMetadata, TypeMetadataRegistry};
use super::profile::SimilarityProfile;

/// Score contribution of a single spec.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpecComponentScore {
    pub name: String,
    pub importance: Importance,
    pub rule: &'static str,
    /// Rule score in [0, 1]
    pub raw_score: f64,
    /// Effective weight under the resolved profile
    pub weight: f64,
    pub weighted_score: f64,
    pub reference: String,
    pub candidate: String,
}

/// How a breakdown's total was reached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ScoreOutcome {
    /// Weighted average over comparable specs
    Scored,
    /// A critical spec was missing from one side
    Disqualified { spec: String },
    /// No declared spec carried weight on both sides
    NoComparableSpecs,
    /// No metadata for the type; legacy spec scorer used
    LegacyFallback,
}

/// Auditable result of a weighted comparison.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpecScoreBreakdown {
    pub total: f64,
    pub component_type: ComponentType,
    /// Resolved profile; `None` for the legacy path
    pub profile: Option<SimilarityProfile>,
    pub outcome: ScoreOutcome,
    pub components: Vec<SpecComponentScore>,
}

impl SpecScoreBreakdown {
    #[must_use]
    pub const fn is_disqualified(&self) -> bool {
        matches!(self.outcome, ScoreOutcome::Disqualified { .. })
    }

    /// One-line summary, e.g. `RESISTOR 0.815 (replacement): resistance=1.00 ...`.
    #[must_use]
    pub fn summary(&self) -> String {
        let mut out = format!("{} {:.3}", self.component_type, self.total);
        if let Some(profile) = self.profile {
            let _ = write!(out, " ({profile})");
        }
        match &self.outcome {
            ScoreOutcome::Scored => {
                out.push(':');
                for c in &self.components {
                    let _ = write!(out, " {}={:.2}", c.name, c.raw_score);
                }
            }
            ScoreOutcome::Disqualified { spec } => {
                let _ = write!(out, ": disqualified, missing critical spec '{spec}'");
            }
            ScoreOutcome::NoComparableSpecs => out.push_str(": no comparable specs"),
            ScoreOutcome::LegacyFallback => out.push_str(": legacy spec scorer"),
        }
        out
    }
}

/// Weighted scorer over a frozen metadata registry.
#[derive(Debug, Clone, Default)]
pub struct WeightedScorer {
    registry: TypeMetadataRegistry,
}

impl WeightedScorer {
    #[must_use]
    pub const fn new(registry: TypeMetadataRegistry) -> Self {
        Self { registry }
    }

    #[must_use]
    pub const fn registry(&self) -> &TypeMetadataRegistry {
        &self.registry
    }

    /// Score `candidate` against `reference` for `ty` in [0, 1].
    #[must_use]
    pub fn score(
        &self,
        ty: &ComponentType,
        reference: &Specs,
        candidate: &Specs,
        profile: Option<SimilarityProfile>,
    ) -> f64 {
        self.score_detailed(ty, reference, candidate, profile).total
    }

    /// Like [`score`](Self::score), with a per-spec breakdown.
    #[must_use]
    pub fn score_detailed(
        &self,
        ty: &ComponentType,
        reference: &Specs,
        candidate: &Specs,
        profile: Option<SimilarityProfile>,
    ) -> SpecScoreBreakdown {
        match self.registry.lookup(ty) {
            Some(metadata) => score_with_metadata(metadata, reference, candidate, profile),
            None => {
                debug!(
                    component_type = %ty,
                    "no type metadata registered, using legacy spec scorer"
                );
                SpecScoreBreakdown {
                    total: legacy_spec_score(reference, candidate),
                    component_type: ty.clone(),
                    profile: None,
                    outcome: ScoreOutcome::LegacyFallback,
                    components: Vec::new(),
                }
            }
        }
    }
}

/// Weighted comparison against explicit metadata.
#[must_use]
pub fn score_with_metadata(
    metadata: &TypeMetadata,
    reference: &Specs,
    candidate: &Specs,
    profile: Option<SimilarityProfile>,
) -> SpecScoreBreakdown {
    let profile = profile.unwrap_or_else(|| metadata.default_profile());
    let ty = metadata.component_type().clone();

    if let Some(missing) = metadata
        .critical_specs()
        .find(|name| !reference.contains(name) || !candidate.contains(name))
    {
        debug!(
            component_type = %ty,
            spec = missing,
            "critical spec missing, pair disqualified"
        );
        return SpecScoreBreakdown {
            total: 0.0,
            component_type: ty,
            profile: Some(profile),
            outcome: ScoreOutcome::Disqualified {
                spec: missing.to_string(),
            },
            components: Vec::new(),
        };
    }

    let mut components = Vec::new();
    let mut weighted_sum = 0.0;
    let mut weight_sum = 0.0;
    for (name, spec) in metadata.specs() {
        let (Some(r), Some(c)) = (reference.get(name), candidate.get(name)) else {
            continue;
        };
        let raw_score = spec.rule.compare(r, c);
        let weight = profile.effective_weight(spec.importance);
        weighted_sum += raw_score * weight;
        weight_sum += weight;
        components.push(SpecComponentScore {
            name: name.to_string(),
            importance: spec.importance,
            rule: spec.rule.name(),
            raw_score,
            weight,
            weighted_score: raw_score * weight,
            reference: r.to_string(),
            candidate: c.to_string(),
        });
    }

    if weight_sum <= 0.0 {
        debug!(component_type = %ty, "no comparable specs carry weight");
        return SpecScoreBreakdown {
            total: 0.0,
            component_type: ty,
            profile: Some(profile),
            outcome: ScoreOutcome::NoComparableSpecs,
            components,
        };
    }

    let total = weighted_sum / weight_sum;
    SpecScoreBreakdown {
        total: if total.is_nan() { 0.0 } else { total.clamp(0.0, 1.0) },
        component_type: ty,
        profile: Some(profile),
        outcome: ScoreOutcome::Scored,
        components,
    }
}

/// Unweighted closeness averaged over spec names present on both sides.
///
/// Numbers score `1 − |a−b| / max(|a|, |b|)`; anything else scores the
/// normalized Levenshtein similarity of the text forms. Symmetric.
#[must_use]
pub fn legacy_spec_score(reference: &Specs, candidate: &Specs) -> f64 {
    let mut total = 0.0;
    let mut shared = 0usize;
    for (name, r) in reference.iter() {
        let Some(c) = candidate.get(name) else {
            continue;
        };
        shared += 1;
        total += match (r.as_f64(), c.as_f64()) {
            (Some(a), Some(b)) => {
                let scale = a.abs().max(b.abs());
                if scale == 0.0 {
                    1.0
                } else {
                    (1.0 - (a - b).abs() / scale).max(0.0)
                }
            }
            _ => strsim::normalized_levenshtein(
                &r.as_text().to_ascii_uppercase(),
                &c.as_text().to_ascii_uppercase(),
            ),
        };
    }
    if shared == 0 {
        0.0
    } else {
        (total / shared as f64).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BaseType, SpecValue};
    use crate::scoring::{ToleranceRule, TypeMetadataRegistry};

    fn resistor() -> ComponentType {
        ComponentType::of(BaseType::Resistor)
    }

    fn scorer() -> WeightedScorer {
        let metadata = TypeMetadata::builder(resistor())
            .critical("resistance", ToleranceRule::percentage_tolerance(1.0))
            .critical("package", ToleranceRule::exact_match())
            .high("tolerance", ToleranceRule::maximum_allowed(5.0))
            .medium("power", ToleranceRule::minimum_required())
            .build()
            .unwrap();
        let mut builder = TypeMetadataRegistry::builder();
        builder.register(resistor(), metadata).unwrap();
        WeightedScorer::new(builder.build())
    }

    fn chip(ohms: f64, package: &str, tolerance: f64) -> Specs {
        Specs::new()
            .with("resistance", SpecValue::numeric(ohms, "Ω"))
            .with("package", SpecValue::text(package))
            .with("tolerance", SpecValue::numeric(tolerance, "%"))
    }

    #[test]
    fn test_identical_specs_score_one() {
        let specs = chip(10_000.0, "0603", 1.0);
        assert_eq!(scorer().score(&resistor(), &specs, &specs, None), 1.0);
    }

    #[test]
    fn test_resistance_decay_scenario() {
        let scorer = scorer();
        let reference = chip(10_000.0, "0603", 1.0);
        assert_eq!(
            scorer.score(&resistor(), &reference, &chip(10_100.0, "0603", 1.0), None),
            1.0
        );
        let halfway = scorer.score_detailed(
            &resistor(),
            &reference,
            &chip(10_125.0, "0603", 1.0),
            None,
        );
        assert!((halfway.components[0].raw_score - 0.5).abs() < 1e-9);
        // (0.5 + 1 + 0.49) / 2.49
        assert!((halfway.total - 1.99 / 2.49).abs() < 1e-9, "{}", halfway.total);
        let beyond = scorer.score_detailed(
            &resistor(),
            &reference,
            &chip(10_150.0, "0603", 1.0),
            None,
        );
        assert_eq!(beyond.components[0].raw_score, 0.0);
    }

    #[test]
    fn test_missing_critical_spec_disqualifies() {
        let scorer = scorer();
        let reference = chip(10_000.0, "0603", 1.0);
        let candidate = Specs::new()
            .with("resistance", SpecValue::numeric(10_000.0, "Ω"))
            .with("tolerance", SpecValue::numeric(1.0, "%"));
        let breakdown = scorer.score_detailed(&resistor(), &reference, &candidate, None);
        assert_eq!(breakdown.total, 0.0);
        assert_eq!(
            breakdown.outcome,
            ScoreOutcome::Disqualified {
                spec: "package".to_string()
            }
        );
        assert!(breakdown.summary().contains("disqualified"));
    }

    #[test]
    fn test_no_comparable_specs() {
        let metadata = TypeMetadata::builder(resistor())
            .optional("marking", ToleranceRule::exact_match())
            .build()
            .unwrap();
        let specs = Specs::new().with("marking", SpecValue::text("103"));
        let breakdown = score_with_metadata(
            &metadata,
            &specs,
            &specs,
            Some(SimilarityProfile::EmergencySourcing),
        );
        assert_eq!(breakdown.total, 0.0);
        assert_eq!(breakdown.outcome, ScoreOutcome::NoComparableSpecs);
    }

    #[test]
    fn test_profile_changes_weighting() {
        let scorer = scorer();
        let reference = chip(10_000.0, "0603", 1.0);
        let looser = chip(10_000.0, "0603", 5.0);
        let design = scorer.score(
            &resistor(),
            &reference,
            &looser,
            Some(SimilarityProfile::DesignPhase),
        );
        let emergency = scorer.score(
            &resistor(),
            &reference,
            &looser,
            Some(SimilarityProfile::EmergencySourcing),
        );
        assert!(emergency > design, "{emergency} <= {design}");
    }

    #[test]
    fn test_missing_metadata_uses_legacy_scorer() {
        let scorer = scorer();
        let a = Specs::new().with("inductance", SpecValue::numeric(10e-6, "H"));
        let b = Specs::new().with("inductance", SpecValue::numeric(8e-6, "H"));
        let breakdown = scorer.score_detailed(
            &ComponentType::of(BaseType::Inductor),
            &a,
            &b,
            None,
        );
        assert_eq!(breakdown.outcome, ScoreOutcome::LegacyFallback);
        assert!((breakdown.total - 0.8).abs() < 1e-9);
    }

    #[test]
    fn test_legacy_spec_score() {
        let a = Specs::new()
            .with("voltage", SpecValue::numeric(50.0, "V"))
            .with("package", SpecValue::text("0603"));
        let b = Specs::new()
            .with("voltage", SpecValue::numeric(25.0, "V"))
            .with("package", SpecValue::text("0603"))
            .with("extra", SpecValue::text("x"));
        assert!((legacy_spec_score(&a, &b) - 0.75).abs() < 1e-9);
        assert_eq!(legacy_spec_score(&a, &b), legacy_spec_score(&b, &a));
        assert_eq!(legacy_spec_score(&a, &Specs::new()), 0.0);
    }
}
