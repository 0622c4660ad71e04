//! Chip resistors: Yageo RC, Vishay CRCW/TNPW and Panasonic ERJ.

use regex::Regex;
use std::sync::LazyLock;

use crate::classify::ClassifiedPart;
use crate::error::Result;
use crate::model::{decode_eia_code, decode_rkm_code, BaseType, ComponentType, SpecValue, Specs};
use crate::scoring::{ToleranceRule, TypeMetadata};

use super::codes::{chip_power_rating, imperial, tolerance_percent};
use super::spec_based::{SpecBasedCalculator, SpecExtractor};
use super::{Applicability, TypeSelector};

/// `RC0603FR-0710KL`: size, tolerance, packaging, reel, RKM value.
static YAGEO_RC: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^RC(\d{4})([BCDFGJK])([RK])-?(\d{2})(\d*[RKM]\d*)").expect("static regex")
});

/// `CRCW060310K0FKEA`: size, RKM value, tolerance.
static VISHAY_CRCW: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:CRCW|TNPW)(\d{4})(\d*[RKM]\d*)([BCDFGJ])").expect("static regex")
});

/// `ERJ-3EKF1002V`: size digit(s), series, tolerance, EIA value.
static PANASONIC_ERJ: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^ERJ-?(\d{1,2})([A-Z]{1,3}?)([BDFGJ])(\d{3,4}|\d*R\d+)").expect("static regex")
});

/// Decodes resistance, size, tolerance and rated power.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResistorSpecs;

pub type ResistorCalculator = SpecBasedCalculator<ResistorSpecs>;

impl SpecExtractor for ResistorSpecs {
    const NAME: &'static str = "ResistorCalculator";

    fn applicability() -> Applicability {
        Applicability::new([TypeSelector::Base(BaseType::Resistor)])
    }

    fn metadata_key() -> ComponentType {
        ComponentType::of(BaseType::Resistor)
    }

    fn extract(&self, part: &ClassifiedPart) -> Specs {
        decode(part.mpn.as_str()).map_or_else(Specs::new, |chip| chip.into_specs())
    }
}

struct ChipResistor {
    ohms: f64,
    size: &'static str,
    tolerance: Option<f64>,
}

impl ChipResistor {
    fn into_specs(self) -> Specs {
        let mut specs = Specs::new()
            .with("resistance", SpecValue::numeric(self.ohms, "Ω"))
            .with("package", SpecValue::text(self.size));
        specs.insert_opt(
            "tolerance",
            self.tolerance.map(|t| SpecValue::numeric(t, "%")),
        );
        specs.insert_opt(
            "power",
            chip_power_rating(self.size).map(|w| SpecValue::numeric(w, "W")),
        );
        specs
    }
}

fn decode(mpn: &str) -> Option<ChipResistor> {
    if let Some(caps) = YAGEO_RC.captures(mpn) {
        return Some(ChipResistor {
            ohms: decode_rkm_code(&caps[5])?,
            size: imperial(&caps[1])?,
            tolerance: tolerance_percent(&caps[2]),
        });
    }
    if let Some(caps) = VISHAY_CRCW.captures(mpn) {
        return Some(ChipResistor {
            ohms: decode_rkm_code(&caps[2])?,
            size: imperial(&caps[1])?,
            tolerance: tolerance_percent(&caps[3]),
        });
    }
    if let Some(caps) = PANASONIC_ERJ.captures(mpn) {
        return Some(ChipResistor {
            ohms: decode_eia_code(&caps[4])?,
            size: panasonic_size(&caps[1])?,
            tolerance: tolerance_percent(&caps[3]),
        });
    }
    None
}

fn panasonic_size(code: &str) -> Option<&'static str> {
    Some(match code {
        "1" => "0201",
        "2" => "0402",
        "3" => "0603",
        "6" => "0805",
        "8" => "1206",
        "14" => "1210",
        "12" => "1812",
        "1T" => "2512",
        _ => return None,
    })
}

pub(super) fn metadata() -> Result<TypeMetadata> {
    TypeMetadata::builder(ResistorSpecs::metadata_key())
        .critical("resistance", ToleranceRule::percentage_tolerance(1.0))
        .critical("package", ToleranceRule::exact_match())
        .high("tolerance", ToleranceRule::maximum_allowed(5.0))
        .medium("power", ToleranceRule::minimum_required())
        .build()
}
