//! Signal, rectifier and Schottky diodes.

use crate::classify::ClassifiedPart;
use crate::error::Result;
use crate::model::{BaseType, ComponentType, Specs};
use crate::scoring::{ToleranceRule, TypeMetadata};

use super::known_parts::{lookup_specs, KnownPart, Lit};
use super::spec_based::{SpecBasedCalculator, SpecExtractor};
use super::{Applicability, TypeSelector};

#[derive(Debug, Clone, Copy, Default)]
pub struct DiodeSpecs;

pub type DiodeCalculator = SpecBasedCalculator<DiodeSpecs>;

impl SpecExtractor for DiodeSpecs {
    const NAME: &'static str = "DiodeCalculator";

    fn applicability() -> Applicability {
        Applicability::new([TypeSelector::Base(BaseType::Diode)])
    }

    fn metadata_key() -> ComponentType {
        ComponentType::of(BaseType::Diode)
    }

    fn extract(&self, part: &ClassifiedPart) -> Specs {
        lookup_specs(KNOWN_DIODES, &part.mpn)
    }
}

pub(super) fn metadata() -> Result<TypeMetadata> {
    TypeMetadata::builder(DiodeSpecs::metadata_key())
        .critical("kind", ToleranceRule::exact_match())
        .critical("vrrm", ToleranceRule::minimum_required())
        .high("if", ToleranceRule::minimum_required())
        .medium("vf", ToleranceRule::maximum_allowed(1.5))
        .low("package", ToleranceRule::exact_match())
        .build()
}

/// `prefix, kind, Vrrm (V), If (A), Vf (V), package`
macro_rules! diode {
    ($prefix:literal, $kind:literal, $vrrm:literal, $if_:literal, $vf:literal, $package:literal) => {
        KnownPart {
            prefix: $prefix,
            specs: &[
                ("kind", Lit::Text($kind)),
                ("vrrm", Lit::Num($vrrm, "V")),
                ("if", Lit::Num($if_, "A")),
                ("vf", Lit::Num($vf, "V")),
                ("package", Lit::Text($package)),
            ],
        }
    };
}

static KNOWN_DIODES: &[KnownPart] = &[
    diode!("1N4148W", "SIGNAL", 100.0, 0.3, 1.0, "SOD-123"),
    diode!("1N4148", "SIGNAL", 100.0, 0.3, 1.0, "DO-35"),
    diode!("1N914", "SIGNAL", 100.0, 0.3, 1.0, "DO-35"),
    diode!("BAS16", "SIGNAL", 100.0, 0.2, 1.0, "SOT-23"),
    diode!("BAV99", "SIGNAL", 100.0, 0.2, 1.0, "SOT-23"),
    diode!("1N4001", "RECTIFIER", 50.0, 1.0, 1.1, "DO-41"),
    diode!("1N4002", "RECTIFIER", 100.0, 1.0, 1.1, "DO-41"),
    diode!("1N4003", "RECTIFIER", 200.0, 1.0, 1.1, "DO-41"),
    diode!("1N4004", "RECTIFIER", 400.0, 1.0, 1.1, "DO-41"),
    diode!("1N4005", "RECTIFIER", 600.0, 1.0, 1.1, "DO-41"),
    diode!("1N4006", "RECTIFIER", 800.0, 1.0, 1.1, "DO-41"),
    diode!("1N4007", "RECTIFIER", 1000.0, 1.0, 1.1, "DO-41"),
    diode!("1N5817", "SCHOTTKY", 20.0, 1.0, 0.45, "DO-41"),
    diode!("1N5818", "SCHOTTKY", 30.0, 1.0, 0.55, "DO-41"),
    diode!("1N5819", "SCHOTTKY", 40.0, 1.0, 0.6, "DO-41"),
    diode!("1N5822", "SCHOTTKY", 40.0, 3.0, 0.525, "DO-201AD"),
    diode!("SS14", "SCHOTTKY", 40.0, 1.0, 0.5, "SMA"),
    diode!("SS34", "SCHOTTKY", 40.0, 3.0, 0.5, "SMC"),
    diode!("BAT54", "SCHOTTKY", 30.0, 0.2, 0.8, "SOT-23"),
    diode!("PMEG3020", "SCHOTTKY", 30.0, 2.0, 0.42, "SOD-123W"),
    diode!("MBRS140", "SCHOTTKY", 40.0, 1.0, 0.6, "SMB"),
    diode!("MBR0520", "SCHOTTKY", 20.0, 0.5, 0.385, "SOD-123"),
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculators::{classify_for_test, score_pair};
    use crate::model::SpecValue;

    #[test]
    fn test_longest_prefix_wins() {
        let package = |raw: &str| {
            DiodeSpecs
                .extract(&classify_for_test(raw))
                .get("package")
                .map(|v| v.as_text().into_owned())
        };
        assert_eq!(package("1N4148W-7-F").as_deref(), Some("SOD-123"));
        assert_eq!(package("1N4148").as_deref(), Some("DO-35"));
    }

    #[test]
    fn test_second_source_scores_one() {
        let calculator = DiodeCalculator::default();
        assert_eq!(score_pair(&calculator, "1N4148", "1N914").score, 1.0);
    }

    #[test]
    fn test_schottky_substitute() {
        let calculator = DiodeCalculator::default();
        let result = score_pair(&calculator, "SS14", "1N5819");
        assert!(result.score > 0.8 && result.score < 1.0, "{}", result.score);
    }

    #[test]
    fn test_higher_voltage_rectifier_covers_lower() {
        let calculator = DiodeCalculator::default();
        assert_eq!(score_pair(&calculator, "1N4001", "1N4007").score, 1.0);
        let under = score_pair(&calculator, "1N4007", "1N4001").score;
        assert!(under < 0.8, "{under}");
        let vrrm = DiodeSpecs
            .extract(&classify_for_test("1N4007"))
            .get("vrrm")
            .and_then(SpecValue::as_f64);
        assert_eq!(vrrm, Some(1000.0));
    }

    #[test]
    fn test_kind_mismatch_penalized() {
        let calculator = DiodeCalculator::default();
        let schottky = score_pair(&calculator, "1N5819", "SS14").score;
        let rectifier = score_pair(&calculator, "1N5819", "1N4004").score;
        assert!(rectifier < schottky);
    }
}
