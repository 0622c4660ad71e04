//! Similarity calculators and their ordered dispatch.
//!
//! A calculator declares which component types it can score
//! ([`Applicability`]) and scores a classified pair. The
//! [`CalculatorRegistry`] walks calculators in registration order and the
//! first one applicable to either side's type produces the final score.
//!
//! Claims must be exact: a calculator that claims a broader category than it
//! can score shadows every later calculator for that category. Overlaps are
//! reported at build time ([`CalculatorRegistry::shadowing_report`]) and
//! verified against sample pairs at test time ([`audit::check_claims`]).

pub mod audit;
mod bjt;
mod capacitor;
mod codes;
mod diode;
mod known_parts;
mod logic;
mod mosfet;
mod regulator;
mod resistor;
mod spec_based;

pub use bjt::{BjtCalculator, BjtSpecs};
pub use capacitor::{
    CeramicCapacitorCalculator, CeramicCapacitorSpecs, PolarizedCapacitorCalculator,
    PolarizedCapacitorSpecs,
};
pub use diode::{DiodeCalculator, DiodeSpecs};
pub use known_parts::{KnownPart, Lit};
pub use logic::{LogicCalculator, LogicSpecs};
pub use mosfet::{MosfetCalculator, MosfetSpecs};
pub use regulator::{LinearRegulatorCalculator, LinearRegulatorSpecs};
pub use resistor::{ResistorCalculator, ResistorSpecs};
pub use spec_based::{SpecBasedCalculator, SpecExtractor};

use serde::Serialize;
use std::fmt;
use tracing::warn;

use crate::classify::ClassifiedPart;
use crate::error::{ErrorContext, Result};
use crate::matching::FallbackScorer;
use crate::model::{BaseType, ComponentType};
use crate::scoring::{
    SimilarityProfile, SpecScoreBreakdown, TypeMetadataRegistry, TypeMetadataRegistryBuilder,
    WeightedScorer,
};

/// One clause of a calculator's claim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum TypeSelector {
    /// Every type with this base, subtypes included
    Base(BaseType),
    /// Subtypes of the base whose qualifier starts with the segment
    SubtypePrefix(BaseType, &'static str),
    /// Exactly this tag
    Exact(ComponentType),
}

impl TypeSelector {
    #[must_use]
    pub fn matches(&self, ty: &ComponentType) -> bool {
        match self {
            Self::Base(base) => ty.base_type() == *base,
            Self::SubtypePrefix(base, prefix) => {
                ty.base_type() == *base && ty.has_subtype_prefix(prefix)
            }
            Self::Exact(tag) => ty == tag,
        }
    }

    /// Whether every tag `other` matches is also matched by `self`.
    #[must_use]
    pub fn covers(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Base(a), Self::Base(b)) => a == b,
            (Self::Base(a), Self::SubtypePrefix(b, _)) => a == b,
            (Self::Base(_), Self::Exact(tag)) => self.matches(tag),
            (Self::SubtypePrefix(a, p), Self::SubtypePrefix(b, q)) => {
                a == b && ComponentType::sub(*b, *q).has_subtype_prefix(p)
            }
            (Self::SubtypePrefix(..), Self::Exact(tag)) => self.matches(tag),
            (Self::Exact(a), Self::Exact(b)) => a == b,
            (Self::SubtypePrefix(..) | Self::Exact(_), Self::Base(_))
            | (Self::Exact(_), Self::SubtypePrefix(..)) => false,
        }
    }
}

impl fmt::Display for TypeSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Base(base) => write!(f, "{base}"),
            Self::SubtypePrefix(base, prefix) => write!(f, "{base}_{prefix}*"),
            Self::Exact(tag) => write!(f, "={tag}"),
        }
    }
}

/// The set of types a calculator claims.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Applicability {
    selectors: Vec<TypeSelector>,
}

impl Applicability {
    pub fn new(selectors: impl IntoIterator<Item = TypeSelector>) -> Self {
        Self {
            selectors: selectors.into_iter().collect(),
        }
    }

    #[must_use]
    pub fn matches(&self, ty: &ComponentType) -> bool {
        self.selectors.iter().any(|s| s.matches(ty))
    }

    #[must_use]
    pub fn selectors(&self) -> &[TypeSelector] {
        &self.selectors
    }
}

/// Shared scoring machinery handed to calculators.
#[derive(Debug, Clone, Copy)]
pub struct ScoringContext<'a> {
    pub scorer: &'a WeightedScorer,
    pub fallback: &'a FallbackScorer,
    /// Profile override; `None` uses each type's default
    pub profile: Option<SimilarityProfile>,
}

/// What a calculator produced for one pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalculatorResult {
    pub score: f64,
    pub breakdown: Option<SpecScoreBreakdown>,
    /// The calculator could not decode either part and scored the text instead
    pub degraded: bool,
}

impl CalculatorResult {
    #[must_use]
    pub fn scored(score: f64, breakdown: SpecScoreBreakdown) -> Self {
        Self {
            score,
            breakdown: Some(breakdown),
            degraded: false,
        }
    }

    #[must_use]
    pub fn degraded(score: f64) -> Self {
        Self {
            score,
            breakdown: None,
            degraded: true,
        }
    }
}

/// A stateless pair scorer for the types it claims.
pub trait SimilarityCalculator: Send + Sync {
    fn name(&self) -> &'static str;

    fn applicability(&self) -> &Applicability;

    fn is_applicable(&self, ty: &ComponentType) -> bool {
        self.applicability().matches(ty)
    }

    /// Score a pair where at least one side is of a claimed type.
    fn calculate(
        &self,
        a: &ClassifiedPart,
        b: &ClassifiedPart,
        ctx: &ScoringContext<'_>,
    ) -> CalculatorResult;
}

/// A claim clause made unreachable by an earlier calculator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShadowedClaim {
    pub shadowed: &'static str,
    pub selector: TypeSelector,
    pub by: &'static str,
}

impl fmt::Display for ShadowedClaim {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} claim {} is unreachable behind {}",
            self.shadowed, self.selector, self.by
        )
    }
}

/// Frozen, ordered calculator list.
pub struct CalculatorRegistry {
    calculators: Vec<Box<dyn SimilarityCalculator>>,
}

impl fmt::Debug for CalculatorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

impl Default for CalculatorRegistry {
    fn default() -> Self {
        builtin_calculators()
    }
}

impl CalculatorRegistry {
    #[must_use]
    pub fn builder() -> CalculatorRegistryBuilder {
        CalculatorRegistryBuilder::default()
    }

    /// The first calculator applicable to either type.
    #[must_use]
    pub fn select(
        &self,
        type_a: Option<&ComponentType>,
        type_b: Option<&ComponentType>,
    ) -> Option<&dyn SimilarityCalculator> {
        self.calculators
            .iter()
            .find(|c| {
                type_a.is_some_and(|t| c.is_applicable(t))
                    || type_b.is_some_and(|t| c.is_applicable(t))
            })
            .map(|c| &**c)
    }

    /// Score a pair with the first applicable calculator. `None` when no
    /// calculator claims either type.
    #[must_use]
    pub fn dispatch(
        &self,
        a: &ClassifiedPart,
        b: &ClassifiedPart,
        ctx: &ScoringContext<'_>,
    ) -> Option<(&'static str, CalculatorResult)> {
        let calculator = self.select(a.component_type.as_ref(), b.component_type.as_ref())?;
        Some((calculator.name(), calculator.calculate(a, b, ctx)))
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn SimilarityCalculator> {
        self.calculators.iter().map(|c| &**c)
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.calculators.iter().map(|c| c.name())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.calculators.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.calculators.is_empty()
    }

    /// Claim clauses fully covered by an earlier calculator's claim.
    #[must_use]
    pub fn shadowing_report(&self) -> Vec<ShadowedClaim> {
        let mut report = Vec::new();
        for (i, later) in self.calculators.iter().enumerate() {
            for selector in later.applicability().selectors() {
                let earlier = self.calculators[..i].iter().find(|c| {
                    c.applicability()
                        .selectors()
                        .iter()
                        .any(|s| s.covers(selector))
                });
                if let Some(by) = earlier {
                    report.push(ShadowedClaim {
                        shadowed: later.name(),
                        selector: selector.clone(),
                        by: by.name(),
                    });
                }
            }
        }
        report
    }
}

/// Builder for [`CalculatorRegistry`]; order of registration is dispatch order.
#[derive(Default)]
#[must_use]
pub struct CalculatorRegistryBuilder {
    calculators: Vec<Box<dyn SimilarityCalculator>>,
}

impl CalculatorRegistryBuilder {
    pub fn with_calculator(mut self, calculator: impl SimilarityCalculator + 'static) -> Self {
        self.calculators.push(Box::new(calculator));
        self
    }

    pub fn with_boxed(mut self, calculator: Box<dyn SimilarityCalculator>) -> Self {
        self.calculators.push(calculator);
        self
    }

    /// Freeze the list. Shadowed claims are logged, not rejected, so a
    /// deliberately ordered override still builds.
    #[must_use]
    pub fn build(self) -> CalculatorRegistry {
        let registry = CalculatorRegistry {
            calculators: self.calculators,
        };
        for claim in registry.shadowing_report() {
            warn!(
                shadowed = claim.shadowed,
                selector = %claim.selector,
                by = claim.by,
                "calculator claim is unreachable"
            );
        }
        registry
    }
}

/// The built-in calculators, specific before generic.
#[must_use]
pub fn builtin_calculators() -> CalculatorRegistry {
    CalculatorRegistry::builder()
        .with_calculator(ResistorCalculator::default())
        .with_calculator(CeramicCapacitorCalculator::default())
        .with_calculator(PolarizedCapacitorCalculator::default())
        .with_calculator(MosfetCalculator::default())
        .with_calculator(BjtCalculator::default())
        .with_calculator(DiodeCalculator::default())
        .with_calculator(LinearRegulatorCalculator::default())
        .with_calculator(LogicCalculator::default())
        .build()
}

/// Builder pre-populated with the metadata of every built-in calculator.
pub fn builtin_metadata_builder() -> Result<TypeMetadataRegistryBuilder> {
    let mut builder = TypeMetadataRegistry::builder();
    for (key, metadata) in [
        (ResistorSpecs::metadata_key(), resistor::metadata()),
        (CeramicCapacitorSpecs::metadata_key(), capacitor::ceramic_metadata()),
        (PolarizedCapacitorSpecs::metadata_key(), capacitor::polarized_metadata()),
        (MosfetSpecs::metadata_key(), mosfet::metadata()),
        (BjtSpecs::metadata_key(), bjt::metadata()),
        (DiodeSpecs::metadata_key(), diode::metadata()),
        (LinearRegulatorSpecs::metadata_key(), regulator::metadata()),
        (LogicSpecs::metadata_key(), logic::metadata()),
    ] {
        let metadata = metadata.with_context(|| format!("building built-in metadata for {key}"))?;
        builder.register(key, metadata)?;
    }
    Ok(builder)
}

/// Frozen registry of the built-in metadata.
pub fn builtin_metadata() -> Result<TypeMetadataRegistry> {
    Ok(builtin_metadata_builder()?.build())
}

#[cfg(test)]
pub(crate) fn classify_for_test(raw: &str) -> ClassifiedPart {
    crate::classify::PartClassifier::builtin()
        .unwrap()
        .classify(&crate::model::PartNumber::normalize(raw))
}

/// Score two raw part numbers with `calculator` over the built-in metadata.
#[cfg(test)]
pub(crate) fn score_pair(
    calculator: &dyn SimilarityCalculator,
    a: &str,
    b: &str,
) -> CalculatorResult {
    let scorer = WeightedScorer::new(builtin_metadata().unwrap());
    let fallback = FallbackScorer::default();
    let ctx = ScoringContext {
        scorer: &scorer,
        fallback: &fallback,
        profile: None,
    };
    calculator.calculate(&classify_for_test(a), &classify_for_test(b), &ctx)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CERAMIC_MURATA: ComponentType = ComponentType::sub(BaseType::Capacitor, "CERAMIC_MURATA");

    #[test]
    fn test_selector_matching() {
        assert!(TypeSelector::Base(BaseType::Capacitor).matches(&CERAMIC_MURATA));
        assert!(TypeSelector::SubtypePrefix(BaseType::Capacitor, "CERAMIC").matches(&CERAMIC_MURATA));
        assert!(!TypeSelector::SubtypePrefix(BaseType::Capacitor, "CER").matches(&CERAMIC_MURATA));
        assert!(!TypeSelector::SubtypePrefix(BaseType::Capacitor, "CERAMIC")
            .matches(&ComponentType::of(BaseType::Capacitor)));
        assert!(TypeSelector::Exact(ComponentType::of(BaseType::VoltageRegulator))
            .matches(&ComponentType::of(BaseType::VoltageRegulator)));
        assert!(!TypeSelector::Exact(ComponentType::of(BaseType::VoltageRegulator))
            .matches(&ComponentType::sub(BaseType::VoltageRegulator, "SWITCHING_TI")));
    }

    #[test]
    fn test_selector_coverage() {
        let base = TypeSelector::Base(BaseType::Capacitor);
        let ceramic = TypeSelector::SubtypePrefix(BaseType::Capacitor, "CERAMIC");
        let murata = TypeSelector::SubtypePrefix(BaseType::Capacitor, "CERAMIC_MURATA");
        let exact = TypeSelector::Exact(CERAMIC_MURATA);
        assert!(base.covers(&ceramic));
        assert!(ceramic.covers(&murata));
        assert!(ceramic.covers(&exact));
        assert!(!ceramic.covers(&base));
        assert!(!murata.covers(&ceramic));
        assert!(!exact.covers(&murata));
        assert!(!TypeSelector::SubtypePrefix(BaseType::Capacitor, "TANTALUM").covers(&ceramic));
    }

    #[test]
    fn test_builtin_order_and_no_shadowing() {
        let registry = builtin_calculators();
        assert_eq!(
            registry.names().collect::<Vec<_>>(),
            [
                "ResistorCalculator",
                "CeramicCapacitorCalculator",
                "PolarizedCapacitorCalculator",
                "MosfetCalculator",
                "BjtCalculator",
                "DiodeCalculator",
                "LinearRegulatorCalculator",
                "LogicCalculator",
            ]
        );
        assert!(registry.shadowing_report().is_empty());
    }

    #[test]
    fn test_select_uses_either_side() {
        let registry = builtin_calculators();
        let resistor = ComponentType::sub(BaseType::Resistor, "CHIP_YAGEO");
        let opamp = ComponentType::sub(BaseType::OpAmp, "TI");
        assert_eq!(
            registry.select(None, Some(&resistor)).map(|c| c.name()),
            Some("ResistorCalculator")
        );
        assert_eq!(
            registry.select(Some(&opamp), Some(&resistor)).map(|c| c.name()),
            Some("ResistorCalculator")
        );
        assert!(registry.select(Some(&opamp), None).is_none());
        assert!(registry
            .select(
                Some(&ComponentType::sub(BaseType::VoltageRegulator, "SWITCHING_TI")),
                None
            )
            .is_none());
    }

    #[test]
    fn test_builtin_metadata_registers_every_key() {
        let registry = builtin_metadata().unwrap();
        assert_eq!(registry.len(), 8);
        for key in [
            ResistorSpecs::metadata_key(),
            CeramicCapacitorSpecs::metadata_key(),
            LinearRegulatorSpecs::metadata_key(),
        ] {
            assert!(registry.contains(&key), "{key}");
        }
    }
}
