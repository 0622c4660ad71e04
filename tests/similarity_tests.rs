//! End-to-end scoring tests: tolerance rules, weighted normalization,
//! metadata fallback and the top-level similarity API.

use mpn_tools::config::{SpecRuleConfig, TypeMetadataConfig};
use mpn_tools::model::{BaseType, ComponentType, SpecValue, Specs};
use mpn_tools::scoring::{
    Importance, ScoreOutcome, SimilarityProfile, ToleranceKind, ToleranceRule, TypeMetadata,
    TypeMetadataRegistry, WeightedScorer,
};
use mpn_tools::{similarity, MatcherConfig, MpnMatcher, ScoringMethod};

fn volts(v: f64) -> SpecValue {
    SpecValue::numeric(v, "V")
}

// ============================================================================
// Tolerance rules
// ============================================================================

#[test]
fn exact_match_on_dielectric() {
    let rule = ToleranceRule::exact_match();
    assert_eq!(rule.compare(&SpecValue::text("X7R"), &SpecValue::text("X7R")), 1.0);
    assert_eq!(rule.compare(&SpecValue::text("X7R"), &SpecValue::text("X5R")), 0.0);
}

#[test]
fn percentage_tolerance_boundary() {
    let rule = ToleranceRule::percentage_tolerance(1.0);
    let reference = SpecValue::number(10_000.0);
    assert_eq!(rule.compare(&reference, &SpecValue::number(10_100.0)), 1.0);
    assert_eq!(rule.compare(&reference, &SpecValue::number(10_150.0)), 0.0);

    let between = rule.compare(&reference, &SpecValue::number(10_120.0));
    assert!(between > 0.0 && between < 1.0, "{between}");
}

#[test]
fn minimum_required_is_asymmetric() {
    let rule = ToleranceRule::minimum_required();
    assert_eq!(rule.compare(&volts(5.0), &volts(50.0)), 1.0);
    assert!(rule.compare(&volts(50.0), &volts(5.0)) < 0.8);
    assert!(!rule.is_symmetric());
}

#[test]
fn range_tolerance_uses_reference_band() {
    let rule = ToleranceRule::range_tolerance(10.0, 20.0);
    let reference = volts(5.0);
    assert_eq!(rule.compare(&reference, &volts(5.9)), 1.0);
    assert_eq!(rule.compare(&reference, &volts(4.6)), 1.0);
    assert!(rule.compare(&reference, &volts(7.0)) < 1.0);
}

// ============================================================================
// Weighted scoring
// ============================================================================

fn regulator_scorer() -> WeightedScorer {
    let metadata = TypeMetadata::builder(ComponentType::of(BaseType::VoltageRegulator))
        .critical("output_voltage", ToleranceRule::exact_match())
        .high("max_current", ToleranceRule::minimum_required())
        .build()
        .unwrap();
    let mut builder = TypeMetadataRegistry::builder();
    builder
        .register(ComponentType::of(BaseType::VoltageRegulator), metadata)
        .unwrap();
    WeightedScorer::new(builder.build())
}

#[test]
fn weighted_normalization_of_perfect_match() {
    let scorer = regulator_scorer();
    let specs = Specs::new()
        .with("output_voltage", volts(5.0))
        .with("max_current", SpecValue::numeric(1.0, "A"));

    let breakdown = scorer.score_detailed(
        &ComponentType::of(BaseType::VoltageRegulator),
        &specs,
        &specs,
        Some(SimilarityProfile::Replacement),
    );
    assert_eq!(breakdown.total, 1.0);
    let weights: Vec<f64> = breakdown.components.iter().map(|c| c.weight).collect();
    assert_eq!(weights.len(), 2);
    assert!((weights[0] - 1.0).abs() < 1e-12);
    assert!((weights[1] - 0.49).abs() < 1e-12);
}

#[test]
fn missing_critical_spec_disqualifies() {
    let scorer = regulator_scorer();
    let reference = Specs::new()
        .with("output_voltage", volts(5.0))
        .with("max_current", SpecValue::numeric(1.0, "A"));
    let candidate = Specs::new().with("max_current", SpecValue::numeric(1.0, "A"));

    let breakdown = scorer.score_detailed(
        &ComponentType::sub(BaseType::VoltageRegulator, "LINEAR_TI"),
        &reference,
        &candidate,
        None,
    );
    assert_eq!(breakdown.total, 0.0);
    assert_eq!(
        breakdown.outcome,
        ScoreOutcome::Disqualified {
            spec: "output_voltage".to_string()
        }
    );
}

#[test]
fn unregistered_type_falls_back_without_error() {
    let scorer = regulator_scorer();
    let specs = Specs::new().with("gain", SpecValue::number(100.0));

    let breakdown =
        scorer.score_detailed(&ComponentType::of(BaseType::OpAmp), &specs, &specs, None);
    assert_eq!(breakdown.outcome, ScoreOutcome::LegacyFallback);
    assert_eq!(breakdown.total, 1.0);
    assert_eq!(
        scorer.score(&ComponentType::of(BaseType::OpAmp), &specs, &Specs::new(), None),
        0.0
    );
}

#[test]
fn importance_weights_follow_profile() {
    let high = SimilarityProfile::Replacement.effective_weight(Importance::High);
    let design = SimilarityProfile::DesignPhase.effective_weight(Importance::High);
    assert!((high - 0.49).abs() < 1e-12);
    assert!(design > high);
}

// ============================================================================
// Top-level similarity
// ============================================================================

#[test]
fn identical_parts_score_one() {
    for mpn in ["GRM188R71H104KA93D", "LM7805CT", "2N3904", "ATMEGA328P-PU"] {
        assert_eq!(similarity(mpn, mpn), 1.0, "{mpn}");
    }
}

#[test]
fn normalization_applies_before_scoring() {
    assert_eq!(similarity(" grm188r71h104ka93d ", "GRM188R71H104KA93D"), 1.0);
}

#[test]
fn fails_closed_on_empty_input() {
    assert_eq!(similarity("", ""), 0.0);
    assert_eq!(similarity("   ", "LM7805CT"), 0.0);
    assert_eq!(similarity("!!!", "LM7805CT"), 0.0);
}

#[test]
fn cross_vendor_equivalents() {
    let matcher = MpnMatcher::builtin().unwrap();
    for (a, b) in [
        ("GRM188R71H104KA93D", "CL10B104KB8NNNC"),
        ("C0603C109C5GACTU", "GRM1885C1H1R0CA01D"),
        ("RC0603FR-0710KL", "CRCW060310K0FKEA"),
        ("LM7805CT", "L7805CV"),
        ("1N4148", "1N914"),
    ] {
        let result = matcher.similarity_detailed(a, b);
        assert_eq!(result.score, 1.0, "{}", result.summary());
        assert!(matches!(result.method, ScoringMethod::Calculator { degraded: false, .. }));
    }
}

#[test]
fn different_values_score_low() {
    let matcher = MpnMatcher::builtin().unwrap();
    let result = matcher.similarity_detailed("GRM188R71H104KA93D", "GRM188R71H103KA01D");
    // a critical spec scoring 0.0 drags the pair below the replacement threshold
    assert!(result.score < 0.75, "{}", result.summary());
    assert!(!result.is_acceptable());

    assert!(matcher.similarity("LM7805CT", "LM7812CT") < 0.7);
}

#[test]
fn result_serializes() {
    let matcher = MpnMatcher::builtin().unwrap();
    let result = matcher.similarity_detailed("RC0603FR-0710KL", "ERJ-3EKF1002V");
    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["method"]["kind"], "calculator");
    assert_eq!(json["method"]["name"], "ResistorCalculator");
    assert_eq!(json["part_a"]["mpn"], "RC0603FR-0710KL");
    assert!(json["breakdown"]["components"].is_array());
}

// ============================================================================
// Conditional symmetry
// ============================================================================

/// Ceramic metadata whose capacitance band is wider above the reference than
/// below it, so the two directions of a pair score differently.
fn skewed_ceramic_matcher() -> MpnMatcher {
    let spec = |name: &str, rule| SpecRuleConfig {
        name: name.to_string(),
        importance: Importance::Critical,
        rule,
        threshold: None,
    };
    let config = MatcherConfig::builder()
        .type_metadata(TypeMetadataConfig {
            component_type: "CAPACITOR_CERAMIC".to_string(),
            default_profile: None,
            specs: vec![
                spec(
                    "capacitance",
                    ToleranceKind::RangeTolerance {
                        low_percent: 10.0,
                        high_percent: 25.0,
                    },
                ),
                spec("dielectric", ToleranceKind::ExactMatch),
            ],
        })
        .build();
    MpnMatcher::from_config(&config).unwrap()
}

fn x7r(farads: f64) -> Specs {
    Specs::new()
        .with("capacitance", SpecValue::numeric(farads, "F"))
        .with("dielectric", SpecValue::text("X7R"))
}

#[test]
fn symmetric_metadata_reports_lower_direction() {
    let matcher = skewed_ceramic_matcher();
    let ceramic = ComponentType::sub(BaseType::Capacitor, "CERAMIC");
    let (nf100, nf120) = (x7r(100e-9), x7r(120e-9));

    // 120 nF sits inside +25 % of 100 nF; 100 nF is 8 nF under the -10 % edge of 120 nF
    let forward = matcher.scorer().score(&ceramic, &nf100, &nf120, None);
    let reverse = matcher.scorer().score(&ceramic, &nf120, &nf100, None);
    assert_eq!(forward, 1.0);
    assert!((reverse - 2.0 / 3.0).abs() < 1e-9, "{reverse}");

    let (a, b) = ("GRM188R71H104KA93D", "GRM188R71H124KA01D");
    let ab = matcher.similarity_detailed(a, b);
    let ba = matcher.similarity_detailed(b, a);
    assert!(matches!(ab.method, ScoringMethod::Calculator { degraded: false, .. }));
    assert_eq!(ab.score, ba.score);
    assert!((ab.score - reverse).abs() < 1e-9, "{}", ab.summary());
}
