//! Calculator dispatch and claim-shadowing regression tests.

use mpn_tools::calculators::audit::{
    check_claims, claims_without_samples, ClaimViolation, ViolationKind, REFERENCE_PAIRS,
};
use mpn_tools::calculators::{
    Applicability, CalculatorRegistry, CalculatorResult, DiodeCalculator, LogicCalculator,
    ResistorCalculator, ScoringContext, SimilarityCalculator, TypeSelector,
};
use mpn_tools::classify::ClassifiedPart;
use mpn_tools::model::BaseType;
use mpn_tools::{MpnMatcher, ScoringMethod};

/// Claims every semiconductor it is handed and only knows how to score diodes.
struct OverbroadDiodes {
    applicability: Applicability,
    diodes: DiodeCalculator,
}

impl OverbroadDiodes {
    fn new() -> Self {
        Self {
            applicability: Applicability::new([
                TypeSelector::Base(BaseType::Diode),
                TypeSelector::Base(BaseType::Bjt),
                TypeSelector::Base(BaseType::Mosfet),
            ]),
            diodes: DiodeCalculator::default(),
        }
    }
}

impl SimilarityCalculator for OverbroadDiodes {
    fn name(&self) -> &'static str {
        "OverbroadDiodes"
    }

    fn applicability(&self) -> &Applicability {
        &self.applicability
    }

    fn calculate(
        &self,
        a: &ClassifiedPart,
        b: &ClassifiedPart,
        ctx: &ScoringContext<'_>,
    ) -> CalculatorResult {
        self.diodes.calculate(a, b, ctx)
    }
}

fn audit(matcher: &MpnMatcher) -> Vec<ClaimViolation> {
    let ctx = ScoringContext {
        scorer: matcher.scorer(),
        fallback: matcher.fallback(),
        profile: None,
    };
    check_claims(matcher.calculators(), matcher.classifier(), &ctx, REFERENCE_PAIRS)
}

#[test]
fn builtin_calculators_satisfy_their_claims() {
    let matcher = MpnMatcher::builtin().unwrap();
    let violations = audit(&matcher);
    let rendered: Vec<String> = violations.iter().map(ToString::to_string).collect();
    assert!(violations.is_empty(), "{rendered:#?}");

    let unsampled = claims_without_samples(
        matcher.calculators(),
        matcher.classifier(),
        REFERENCE_PAIRS,
    );
    assert!(unsampled.is_empty(), "{unsampled:?}");
}

#[test]
fn overbroad_claim_is_caught() {
    let registry = CalculatorRegistry::builder()
        .with_calculator(OverbroadDiodes::new())
        .with_calculator(mpn_tools::calculators::MosfetCalculator::default())
        .with_calculator(mpn_tools::calculators::BjtCalculator::default())
        .with_calculator(DiodeCalculator::default())
        .build();

    let shadowed: Vec<&str> = registry
        .shadowing_report()
        .iter()
        .map(|claim| claim.shadowed)
        .collect();
    assert_eq!(shadowed, ["MosfetCalculator", "BjtCalculator", "DiodeCalculator"]);

    let matcher = MpnMatcher::builder().calculators(registry).build().unwrap();
    let violations = audit(&matcher);

    // transistors reach the diode scorer, which decodes neither side
    assert!(violations.iter().any(|v| v.calculator == "OverbroadDiodes"
        && v.mpn_a == "2N3904"
        && v.kind == ViolationKind::Undecoded));
    assert!(violations.iter().any(|v| v.calculator == "BjtCalculator"
        && v.kind == ViolationKind::Unreachable { by: "OverbroadDiodes" }));
}

#[test]
fn first_applicable_calculator_wins_even_at_zero() {
    let matcher = MpnMatcher::builtin().unwrap();
    // resistor on one side only: the resistor calculator owns the pair
    let result = matcher.similarity_detailed("RC0603FR-0710KL", "SN74HC595N");
    assert_eq!(result.score, 0.0);
    assert_eq!(
        result.method,
        ScoringMethod::Calculator {
            name: "ResistorCalculator",
            degraded: false
        }
    );
}

#[test]
fn dispatch_order_is_registration_order() {
    let registry = CalculatorRegistry::builder()
        .with_calculator(LogicCalculator::default())
        .with_calculator(ResistorCalculator::default())
        .build();
    let matcher = MpnMatcher::builder().calculators(registry).build().unwrap();

    let result = matcher.similarity_detailed("SN74HC595N", "RC0603FR-0710KL");
    assert!(matches!(
        result.method,
        ScoringMethod::Calculator {
            name: "LogicCalculator",
            ..
        }
    ));
}

#[test]
fn unclaimed_pairs_use_text_fallback() {
    let matcher = MpnMatcher::builtin().unwrap();
    let result = matcher.similarity_detailed("STM32F103C8T6", "STM32F103CBT6");
    assert_eq!(result.method, ScoringMethod::Fallback);
    assert!(result.score > 0.8 && result.score < 1.0, "{}", result.score);
    assert_eq!(
        matcher.similarity("STM32F103CBT6", "STM32F103C8T6"),
        result.score
    );
}

#[test]
fn empty_registry_always_falls_back() {
    let matcher = MpnMatcher::builder()
        .calculators(CalculatorRegistry::builder().build())
        .build()
        .unwrap();
    let result = matcher.similarity_detailed("LM7805CT", "L7805CV");
    assert_eq!(result.method, ScoringMethod::Fallback);
}
