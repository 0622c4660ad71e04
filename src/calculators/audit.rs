//! Runtime verification of calculator claims.
//!
//! [`CalculatorRegistry::shadowing_report`] finds claims that overlap on
//! paper. This module checks what actually happens: for every sample pair,
//! each calculator claiming the pair's type must be the one dispatch reaches,
//! must decode both parts, and must not score a valid same-type pair 0.0.

use serde::Serialize;
use std::fmt;

use crate::classify::{ClassifiedPart, PartClassifier};
use crate::model::{ComponentType, PartNumber};

use super::{CalculatorRegistry, ScoringContext, SimilarityCalculator, TypeSelector};

/// Same-type pairs covering every built-in claim.
pub const REFERENCE_PAIRS: &[(&str, &str)] = &[
    ("RC0603FR-0710KL", "CRCW060310K0FKEA"),
    ("RC0603FR-0710KL", "ERJ-3EKF1002V"),
    ("GRM188R71H104KA93D", "CL10B104KB8NNNC"),
    ("C0603C104K5RACTU", "CC0603KRX7R9BB104"),
    ("EEE-1HA101P", "ECA-1HM101"),
    ("T491A106K016AT", "T491A106K016AS"),
    ("AO3400A", "SI2302CDS"),
    ("2N7002", "BSS138"),
    ("2N3904", "MMBT3904"),
    ("BC547B", "BC547C"),
    ("1N4148", "1N914"),
    ("SS14", "1N5819"),
    ("LM7805CT", "L7805CV"),
    ("AMS1117-3.3", "LM1117IMP-3.3"),
    ("SN74HC595N", "SN74HC595D"),
    ("74HC595D", "74HC595PW"),
    ("MC74HC00AN", "MC74HC00ADR2G"),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ViolationKind {
    /// A valid same-type pair scored 0.0
    ZeroScore,
    /// The calculator claims the type but could decode neither part
    Undecoded,
    /// The claim is shadowed by an earlier calculator
    Unreachable { by: &'static str },
}

/// A claim that does not hold for a sample pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClaimViolation {
    pub calculator: &'static str,
    pub component_type: ComponentType,
    pub mpn_a: String,
    pub mpn_b: String,
    pub kind: ViolationKind,
}

impl fmt::Display for ClaimViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} on {} ({} / {}): ",
            self.calculator, self.component_type, self.mpn_a, self.mpn_b
        )?;
        match &self.kind {
            ViolationKind::ZeroScore => f.write_str("same-type pair scored 0.0"),
            ViolationKind::Undecoded => f.write_str("neither part decoded"),
            ViolationKind::Unreachable { by } => write!(f, "dispatched to {by} instead"),
        }
    }
}

/// Check every calculator claim exercised by `samples`.
///
/// For each side's type, the first calculator claiming it must score the pair
/// above 0.0 without degrading, and any later calculator claiming it is
/// reported as unreachable.
#[must_use]
pub fn check_claims(
    registry: &CalculatorRegistry,
    classifier: &PartClassifier,
    ctx: &ScoringContext<'_>,
    samples: &[(&str, &str)],
) -> Vec<ClaimViolation> {
    let mut violations = Vec::new();
    for (raw_a, raw_b) in samples {
        let a = classifier.classify(&PartNumber::normalize(raw_a));
        let b = classifier.classify(&PartNumber::normalize(raw_b));
        let mut types: Vec<&ComponentType> = Vec::new();
        for ty in [&a.component_type, &b.component_type].into_iter().flatten() {
            if !types.contains(&ty) {
                types.push(ty);
            }
        }
        for ty in types {
            check_type(registry, ctx, ty, &a, &b, &mut violations);
        }
    }
    violations
}

fn check_type(
    registry: &CalculatorRegistry,
    ctx: &ScoringContext<'_>,
    ty: &ComponentType,
    a: &ClassifiedPart,
    b: &ClassifiedPart,
    violations: &mut Vec<ClaimViolation>,
) {
    let mut claimants = registry.iter().filter(|c| c.is_applicable(ty));
    let Some(first) = claimants.next() else {
        return;
    };
    let violation = |calculator: &dyn SimilarityCalculator, kind| ClaimViolation {
        calculator: calculator.name(),
        component_type: ty.clone(),
        mpn_a: a.mpn.to_string(),
        mpn_b: b.mpn.to_string(),
        kind,
    };

    let result = first.calculate(a, b, ctx);
    if result.degraded {
        violations.push(violation(first, ViolationKind::Undecoded));
    }
    if result.score <= 0.0 || result.score.is_nan() {
        violations.push(violation(first, ViolationKind::ZeroScore));
    }
    for later in claimants {
        violations.push(violation(
            later,
            ViolationKind::Unreachable { by: first.name() },
        ));
    }
}

/// Claim clauses that no sample's type exercises.
#[must_use]
pub fn claims_without_samples(
    registry: &CalculatorRegistry,
    classifier: &PartClassifier,
    samples: &[(&str, &str)],
) -> Vec<(&'static str, TypeSelector)> {
    let sampled: Vec<ComponentType> = samples
        .iter()
        .flat_map(|(a, b)| [a, b])
        .filter_map(|raw| classifier.classify(&PartNumber::normalize(raw)).component_type)
        .collect();
    registry
        .iter()
        .flat_map(|c| {
            c.applicability()
                .selectors()
                .iter()
                .map(move |s| (c.name(), s))
        })
        .filter(|(_, selector)| !sampled.iter().any(|ty| selector.matches(ty)))
        .map(|(name, selector)| (name, selector.clone()))
        .collect()
}
