//! MOSFETs, scored from a table of common parts.

use crate::classify::ClassifiedPart;
use crate::error::Result;
use crate::model::{BaseType, ComponentType, Specs};
use crate::scoring::{ToleranceRule, TypeMetadata};

use super::known_parts::{lookup_specs, KnownPart, Lit};
use super::spec_based::{SpecBasedCalculator, SpecExtractor};
use super::{Applicability, TypeSelector};

/// Looks up channel, voltage, current and on-resistance by part family.
#[derive(Debug, Clone, Copy, Default)]
pub struct MosfetSpecs;

pub type MosfetCalculator = SpecBasedCalculator<MosfetSpecs>;

impl SpecExtractor for MosfetSpecs {
    const NAME: &'static str = "MosfetCalculator";

    fn applicability() -> Applicability {
        Applicability::new([TypeSelector::Base(BaseType::Mosfet)])
    }

    fn metadata_key() -> ComponentType {
        ComponentType::of(BaseType::Mosfet)
    }

    fn extract(&self, part: &ClassifiedPart) -> Specs {
        lookup_specs(KNOWN_MOSFETS, &part.mpn)
    }
}

pub(super) fn metadata() -> Result<TypeMetadata> {
    TypeMetadata::builder(MosfetSpecs::metadata_key())
        .critical("channel", ToleranceRule::exact_match())
        .critical("vds", ToleranceRule::minimum_required())
        .high("id", ToleranceRule::minimum_required())
        .high("rds_on", ToleranceRule::maximum_allowed(2.0))
        .medium("vgs_th", ToleranceRule::range_tolerance(40.0, 40.0))
        .medium("package", ToleranceRule::exact_match())
        .build()
}

/// `prefix, channel, Vds (V), Id (A), Rds(on) (Ω), Vgs(th) (V), package`
macro_rules! mosfet {
    ($prefix:literal, $channel:literal, $vds:literal, $id:literal, $rds:literal, $vth:literal, $package:literal) => {
        KnownPart {
            prefix: $prefix,
            specs: &[
                ("channel", Lit::Text($channel)),
                ("vds", Lit::Num($vds, "V")),
                ("id", Lit::Num($id, "A")),
                ("rds_on", Lit::Num($rds, "Ω")),
                ("vgs_th", Lit::Num($vth, "V")),
                ("package", Lit::Text($package)),
            ],
        }
    };
}

static KNOWN_MOSFETS: &[KnownPart] = &[
    mosfet!("2N7000", "N", 60.0, 0.2, 5.0, 2.1, "TO-92"),
    mosfet!("2N7002", "N", 60.0, 0.3, 3.0, 2.1, "SOT-23"),
    mosfet!("BSS138", "N", 50.0, 0.22, 3.5, 1.3, "SOT-23"),
    mosfet!("BSS84", "P", 50.0, 0.13, 10.0, 1.7, "SOT-23"),
    mosfet!("AO3400", "N", 30.0, 5.7, 0.033, 1.05, "SOT-23"),
    mosfet!("AO3401", "P", 30.0, 4.0, 0.06, 0.9, "SOT-23"),
    mosfet!("SI2302", "N", 20.0, 2.9, 0.057, 0.65, "SOT-23"),
    mosfet!("SI2301", "P", 20.0, 3.1, 0.112, 0.7, "SOT-23"),
    mosfet!("DMG2302", "N", 20.0, 4.2, 0.07, 0.9, "SOT-23"),
    mosfet!("PMV45EN", "N", 30.0, 5.4, 0.042, 1.9, "SOT-23"),
    mosfet!("IRLML2502", "N", 20.0, 4.2, 0.045, 0.9, "SOT-23"),
    mosfet!("IRLML6402", "P", 20.0, 3.7, 0.065, 0.8, "SOT-23"),
    mosfet!("IRF540", "N", 100.0, 33.0, 0.044, 3.0, "TO-220"),
    mosfet!("IRFZ44N", "N", 55.0, 49.0, 0.0175, 3.0, "TO-220"),
    mosfet!("IRLZ44N", "N", 55.0, 47.0, 0.022, 1.5, "TO-220"),
    mosfet!("IRF9540", "P", 100.0, 23.0, 0.117, 3.0, "TO-220"),
    mosfet!("FQP30N06L", "N", 60.0, 32.0, 0.035, 1.75, "TO-220"),
    mosfet!("STP55NF06", "N", 60.0, 50.0, 0.018, 3.0, "TO-220"),
    mosfet!("FDN340P", "P", 20.0, 2.0, 0.07, 0.8, "SOT-23"),
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculators::{classify_for_test, score_pair};
    use crate::model::SpecValue;

    #[test]
    fn test_table_lookup_uses_base_part() {
        let specs = MosfetSpecs.extract(&classify_for_test("SI2302CDS-T1-GE3"));
        assert_eq!(specs.get("vds").and_then(SpecValue::as_f64), Some(20.0));
        assert_eq!(
            specs.get("channel").map(|v| v.as_text().into_owned()).as_deref(),
            Some("N")
        );
        assert!(MosfetSpecs.extract(&classify_for_test("IRF3205")).is_empty());
    }

    #[test]
    fn test_same_family_scores_one() {
        let calculator = MosfetCalculator::default();
        assert_eq!(score_pair(&calculator, "AO3400A", "AO3400").score, 1.0);
    }

    #[test]
    fn test_small_signal_substitutes_score_above_zero() {
        let calculator = MosfetCalculator::default();
        let result = score_pair(&calculator, "SI2302CDS", "AO3400A");
        assert!(result.score > 0.7, "{}", result.score);
        // 30 V reference, 20 V candidate
        let reverse = score_pair(&calculator, "AO3400A", "SI2302CDS");
        assert!(reverse.score < result.score);
    }

    #[test]
    fn test_opposite_channel_penalized() {
        let calculator = MosfetCalculator::default();
        let n = score_pair(&calculator, "AO3400A", "IRLML2502").score;
        let p = score_pair(&calculator, "AO3400A", "AO3401A").score;
        assert!(p < n);
    }

    #[test]
    fn test_unknown_parts_degrade_to_text() {
        let calculator = MosfetCalculator::default();
        let result = score_pair(&calculator, "IRF3205", "IRF3205S");
        assert!(result.degraded);
        assert!(result.score > 0.5);
    }
}
