//! Bipolar transistors, scored from a table of common parts.

use crate::classify::ClassifiedPart;
use crate::error::Result;
use crate::model::{BaseType, ComponentType, Specs};
use crate::scoring::{ToleranceRule, TypeMetadata};

use super::known_parts::{lookup_specs, KnownPart, Lit};
use super::spec_based::{SpecBasedCalculator, SpecExtractor};
use super::{Applicability, TypeSelector};

#[derive(Debug, Clone, Copy, Default)]
pub struct BjtSpecs;

pub type BjtCalculator = SpecBasedCalculator<BjtSpecs>;

impl SpecExtractor for BjtSpecs {
    const NAME: &'static str = "BjtCalculator";

    fn applicability() -> Applicability {
        Applicability::new([TypeSelector::Base(BaseType::Bjt)])
    }

    fn metadata_key() -> ComponentType {
        ComponentType::of(BaseType::Bjt)
    }

    fn extract(&self, part: &ClassifiedPart) -> Specs {
        lookup_specs(KNOWN_BJTS, &part.mpn)
    }
}

pub(super) fn metadata() -> Result<TypeMetadata> {
    TypeMetadata::builder(BjtSpecs::metadata_key())
        .critical("polarity", ToleranceRule::exact_match())
        .critical("vceo", ToleranceRule::minimum_required())
        .high("ic", ToleranceRule::minimum_required())
        .medium("hfe", ToleranceRule::minimum_required())
        .medium("power", ToleranceRule::minimum_required())
        .low("package", ToleranceRule::exact_match())
        .build()
}

/// `prefix, polarity, Vceo (V), Ic (A), minimum hFE, Ptot (W), package`
macro_rules! bjt {
    ($prefix:literal, $polarity:literal, $vceo:literal, $ic:literal, $hfe:literal, $power:literal, $package:literal) => {
        KnownPart {
            prefix: $prefix,
            specs: &[
                ("polarity", Lit::Text($polarity)),
                ("vceo", Lit::Num($vceo, "V")),
                ("ic", Lit::Num($ic, "A")),
                ("hfe", Lit::Num($hfe, "")),
                ("power", Lit::Num($power, "W")),
                ("package", Lit::Text($package)),
            ],
        }
    };
}

static KNOWN_BJTS: &[KnownPart] = &[
    bjt!("2N3904", "NPN", 40.0, 0.2, 100.0, 0.625, "TO-92"),
    bjt!("2N3906", "PNP", 40.0, 0.2, 100.0, 0.625, "TO-92"),
    bjt!("2N2222", "NPN", 40.0, 0.6, 100.0, 0.5, "TO-18"),
    bjt!("2N2907", "PNP", 60.0, 0.6, 100.0, 0.4, "TO-18"),
    bjt!("PN2222", "NPN", 40.0, 0.6, 100.0, 0.625, "TO-92"),
    bjt!("MMBT3904", "NPN", 40.0, 0.2, 100.0, 0.35, "SOT-23"),
    bjt!("MMBT3906", "PNP", 40.0, 0.2, 100.0, 0.35, "SOT-23"),
    bjt!("MMBT2222A", "NPN", 40.0, 0.6, 100.0, 0.35, "SOT-23"),
    bjt!("BC547", "NPN", 45.0, 0.1, 110.0, 0.5, "TO-92"),
    bjt!("BC557", "PNP", 45.0, 0.1, 110.0, 0.5, "TO-92"),
    bjt!("BC817", "NPN", 45.0, 0.5, 100.0, 0.25, "SOT-23"),
    bjt!("BC807", "PNP", 45.0, 0.5, 100.0, 0.25, "SOT-23"),
    bjt!("TIP31C", "NPN", 100.0, 3.0, 25.0, 40.0, "TO-220"),
    bjt!("TIP32C", "PNP", 100.0, 3.0, 25.0, 40.0, "TO-220"),
    bjt!("MJD31C", "NPN", 100.0, 3.0, 25.0, 15.0, "DPAK"),
    bjt!("MJE3055", "NPN", 60.0, 10.0, 20.0, 75.0, "TO-220"),
    bjt!("MPSA42", "NPN", 300.0, 0.5, 40.0, 0.625, "TO-92"),
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculators::{classify_for_test, score_pair};
    use crate::model::SpecValue;

    #[test]
    fn test_lookup() {
        let specs = BjtSpecs.extract(&classify_for_test("BC547B"));
        assert_eq!(specs.get("vceo").and_then(SpecValue::as_f64), Some(45.0));
        assert_eq!(
            specs.get("polarity").map(|v| v.as_text().into_owned()).as_deref(),
            Some("NPN")
        );
    }

    #[test]
    fn test_gain_grades_score_one() {
        let calculator = BjtCalculator::default();
        assert_eq!(score_pair(&calculator, "BC547B", "BC547C").score, 1.0);
    }

    #[test]
    fn test_smd_equivalent_differs_only_by_package() {
        let calculator = BjtCalculator::default();
        let result = score_pair(&calculator, "2N3904", "MMBT3904");
        assert!(result.score > 0.8 && result.score < 1.0, "{}", result.score);
    }

    #[test]
    fn test_complementary_pair_penalized() {
        let calculator = BjtCalculator::default();
        let npn = score_pair(&calculator, "2N3904", "MMBT3904").score;
        let pnp = score_pair(&calculator, "2N3904", "2N3906").score;
        assert!(pnp < npn);
    }
}
