//! Fixed and adjustable linear regulators: 78xx/79xx, 1117 and LM317/LM337.

use regex::{Captures, Regex};
use std::sync::LazyLock;

use crate::classify::ClassifiedPart;
use crate::error::Result;
use crate::model::{BaseType, ComponentType, SpecValue, Specs};
use crate::scoring::{ToleranceRule, TypeMetadata};

use super::codes::suffix_package;
use super::spec_based::{SpecBasedCalculator, SpecExtractor};
use super::{Applicability, TypeSelector};

/// `LM7805CT`, `78L05`, `MC7912CDT`: series, current class, output volts, suffix.
static SERIES_78: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:LM|UA|MC|KA|L|NCV)?(7[89])(L|M)?(\d{2})([A-Z0-9]*)").expect("static regex")
});

/// `AMS1117-3.3`, `LM1117IMP-ADJ`, `TLV1117-33DCYR`, `LD1117S33`.
static SERIES_1117: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:[A-Z]{1,4})?1117([A-Z]*)-?(\d\.\d|\d{2}|ADJ)?([A-Z0-9]*)").expect("static regex")
});

/// `LM317T`, `LM337T`, `LM317LZ`.
static ADJUSTABLE_317: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^LM3([13])7(L)?([A-Z0-9]*)").expect("static regex"));

/// Package codes after the temperature-grade letter, tried in order.
const PACKAGE_SUFFIXES: &[(&str, &str)] = &[
    ("D2T", "TO-263"),
    ("DCY", "SOT-223"),
    ("DT", "TO-252"),
    ("KCS", "TO-220"),
    ("KTT", "TO-263"),
    ("MP", "SOT-223"),
    ("ST", "SOT-223"),
    ("S", "SOT-223"),
    ("T", "TO-220"),
    ("V", "TO-220"),
    ("Z", "TO-92"),
];

const ADJUSTABLE: &str = "ADJ";

/// Decodes output voltage, polarity, current class, dropout and package.
#[derive(Debug, Clone, Copy, Default)]
pub struct LinearRegulatorSpecs;

pub type LinearRegulatorCalculator = SpecBasedCalculator<LinearRegulatorSpecs>;

impl SpecExtractor for LinearRegulatorSpecs {
    const NAME: &'static str = "LinearRegulatorCalculator";

    fn applicability() -> Applicability {
        Applicability::new([
            TypeSelector::Exact(ComponentType::of(BaseType::VoltageRegulator)),
            TypeSelector::SubtypePrefix(BaseType::VoltageRegulator, "LINEAR"),
        ])
    }

    fn metadata_key() -> ComponentType {
        ComponentType::sub(BaseType::VoltageRegulator, "LINEAR")
    }

    fn extract(&self, part: &ClassifiedPart) -> Specs {
        decode(part.mpn.as_str()).map_or_else(Specs::new, Regulator::into_specs)
    }
}

#[derive(Debug)]
struct Regulator {
    /// `None` for adjustable parts
    output_volts: Option<f64>,
    positive: bool,
    max_amps: f64,
    dropout_volts: f64,
    package: Option<&'static str>,
}

impl Regulator {
    fn into_specs(self) -> Specs {
        let output = match self.output_volts {
            Some(volts) => SpecValue::numeric(volts, "V"),
            None => SpecValue::text(ADJUSTABLE),
        };
        let mut specs = Specs::new()
            .with("output_voltage", output)
            .with(
                "polarity",
                SpecValue::text(if self.positive { "POSITIVE" } else { "NEGATIVE" }),
            )
            .with("max_current", SpecValue::numeric(self.max_amps, "A"))
            .with("dropout", SpecValue::numeric(self.dropout_volts, "V"));
        specs.insert_opt("package", self.package.map(SpecValue::text));
        specs
    }
}

fn decode(mpn: &str) -> Option<Regulator> {
    if let Some(caps) = SERIES_78.captures(mpn) {
        return Some(decode_78(&caps));
    }
    if let Some(caps) = SERIES_1117.captures(mpn) {
        return decode_1117(&caps);
    }
    ADJUSTABLE_317.captures(mpn).map(|caps| decode_317(&caps))
}

fn decode_78(caps: &Captures) -> Regulator {
    let max_amps = match caps.get(2).map(|m| m.as_str()) {
        Some("L") => 0.1,
        Some("M") => 0.5,
        _ => 1.5,
    };
    Regulator {
        output_volts: caps[3].parse().ok(),
        positive: &caps[1] == "78",
        max_amps,
        dropout_volts: 2.0,
        package: package(&caps[4]),
    }
}

fn decode_1117(caps: &Captures) -> Option<Regulator> {
    let output_volts = match caps.get(2).map(|m| m.as_str()) {
        None | Some(ADJUSTABLE) => None,
        // `33` is 3.3 V
        Some(code) if !code.contains('.') => Some(code.parse::<f64>().ok()? / 10.0),
        Some(code) => Some(code.parse().ok()?),
    };
    let package = package(&caps[1]).or_else(|| package(&caps[3]));
    Some(Regulator {
        output_volts,
        positive: true,
        max_amps: 0.8,
        dropout_volts: 1.2,
        package,
    })
}

fn decode_317(caps: &Captures) -> Regulator {
    Regulator {
        output_volts: None,
        positive: &caps[1] == "1",
        max_amps: if caps.get(2).is_some() { 0.1 } else { 1.5 },
        dropout_volts: 2.0,
        package: package(&caps[3]),
    }
}

fn package(suffix: &str) -> Option<&'static str> {
    let suffix = suffix.strip_prefix(['A', 'B', 'C', 'I']).unwrap_or(suffix);
    suffix_package(suffix, PACKAGE_SUFFIXES)
}

pub(super) fn metadata() -> Result<TypeMetadata> {
    TypeMetadata::builder(LinearRegulatorSpecs::metadata_key())
        .critical("output_voltage", ToleranceRule::exact_match())
        .critical("polarity", ToleranceRule::exact_match())
        .high("max_current", ToleranceRule::minimum_required())
        .medium("dropout", ToleranceRule::maximum_allowed(2.0))
        .low("package", ToleranceRule::exact_match())
        .build()
}
