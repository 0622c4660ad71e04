//! Capacitors: multilayer ceramics and polarized (aluminum electrolytic and
//! tantalum) parts.
//!
//! Ceramic ordering codes share the same ingredients (size, dielectric,
//! rated voltage, EIA capacitance code, tolerance letter) in a
//! manufacturer-specific order, so each series gets its own pattern and they
//! all decode into one spec layout.

use regex::{Captures, Regex};
use std::sync::LazyLock;

use crate::classify::ClassifiedPart;
use crate::error::Result;
use crate::model::{decode_capacitance_code, BaseType, ComponentType, SpecValue, Specs};
use crate::scoring::{ToleranceRule, TypeMetadata};

use super::codes::{
    eia_voltage, imperial, metric_to_imperial, tolerance_percent, tolerance_picofarads,
};
use super::spec_based::{SpecBasedCalculator, SpecExtractor};
use super::{Applicability, TypeSelector};

const PICO: f64 = 1e-12;
const MICRO: f64 = 1e-6;

/// `GRM188R71H104KA93D`: size, thickness, dielectric, voltage, value, tolerance.
static MURATA: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^G(?:[RCJ]M|RT)(\d{2})([0-9A-Z])([0-9A-Z]{2})(\d[A-Z])(\d{3}|\dR\d|R\d{2})([A-Z])")
        .expect("static regex")
});

/// `CL10B104KB8NNNC`: size, dielectric, value, tolerance, voltage.
static SAMSUNG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^CL(\d{2})([A-Z])(\d{3}|\dR\d)([A-Z])([A-Z])").expect("static regex")
});

/// `C1608X7R1H104K080AA`: metric size, dielectric, voltage, value, tolerance.
static TDK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^C(1005|1608|2012|3216|3225|4532|5750)(X7R|X5R|X7S|X6S|X7T|C0G|NP0|Y5V|CH|JB)(\d[A-Z])(\d{3}|\dR\d)([A-Z])",
    )
    .expect("static regex")
});

/// `C0603C104K5RACTU`: size, value, tolerance, voltage digit, dielectric letter.
static KEMET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^C(0402|0603|0805|1206|1210|1812)C(\d{3}|\dR\d)([A-Z])([0-9A-Z])([A-Z])")
        .expect("static regex")
});

/// `CC0603KRX7R9BB104`: size, tolerance, packaging, dielectric, voltage, value.
static YAGEO: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^CC(\d{4})([A-Z])([A-Z])(X7R|X5R|X7S|X6S|NPO|NP0|C0G|Y5V)(\d)B[BN](\d{3}|\dR\d)")
        .expect("static regex")
});

/// `EEE-1HA101P`, `ECA-1HM101`: voltage, series, value in µF.
static PANASONIC_VOLTAGE_FIRST: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^E(?:EE|CA)-?(\d[A-Z])([A-Z]{1,2}?)(\d{3}|\dR\d)").expect("static regex")
});

/// `EEU-FR1H101`, `EEE-FK1V101P`: series, voltage, value in µF.
static PANASONIC_SERIES_FIRST: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^EE[EUH]-?([A-Z]{2})(\d[A-Z])(\d{3}|\dR\d)").expect("static regex")
});

/// `T491A106K016AT`: series, case, value in pF, tolerance, voltage.
static KEMET_TANTALUM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^T49([0-9])([A-Z])(\d{3}|\dR\d)([A-Z])(\d{3})").expect("static regex")
});

// ============================================================================
// Ceramic
// ============================================================================

/// Decodes MLCC capacitance, dielectric, voltage, size and tolerance.
#[derive(Debug, Clone, Copy, Default)]
pub struct CeramicCapacitorSpecs;

pub type CeramicCapacitorCalculator = SpecBasedCalculator<CeramicCapacitorSpecs>;

impl SpecExtractor for CeramicCapacitorSpecs {
    const NAME: &'static str = "CeramicCapacitorCalculator";

    fn applicability() -> Applicability {
        Applicability::new([TypeSelector::SubtypePrefix(BaseType::Capacitor, "CERAMIC")])
    }

    fn metadata_key() -> ComponentType {
        ComponentType::sub(BaseType::Capacitor, "CERAMIC")
    }

    fn extract(&self, part: &ClassifiedPart) -> Specs {
        decode_ceramic(part.mpn.as_str()).map_or_else(Specs::new, Mlcc::into_specs)
    }
}

struct Mlcc {
    picofarads: f64,
    dielectric: &'static str,
    volts: Option<f64>,
    size: Option<&'static str>,
    tolerance: Option<f64>,
}

impl Mlcc {
    fn new(
        value_code: &str,
        dielectric: Option<&'static str>,
        volts: Option<f64>,
        size: Option<&'static str>,
        tolerance_letter: &str,
    ) -> Option<Self> {
        let picofarads = decode_capacitance_code(value_code)?;
        Some(Self {
            picofarads,
            dielectric: dielectric?,
            volts,
            size,
            tolerance: capacitance_tolerance(tolerance_letter, picofarads),
        })
    }

    fn into_specs(self) -> Specs {
        let mut specs = Specs::new()
            .with("capacitance", SpecValue::numeric(self.picofarads * PICO, "F"))
            .with("dielectric", SpecValue::text(self.dielectric));
        specs.insert_opt("voltage", self.volts.map(|v| SpecValue::numeric(v, "V")));
        specs.insert_opt("package", self.size.map(SpecValue::text));
        specs.insert_opt("tolerance", self.tolerance.map(|t| SpecValue::numeric(t, "%")));
        specs
    }
}

fn decode_ceramic(mpn: &str) -> Option<Mlcc> {
    let decoders: [(&LazyLock<Regex>, fn(&Captures<'_>) -> Option<Mlcc>); 5] = [
        (&MURATA, murata),
        (&SAMSUNG, samsung),
        (&TDK, tdk),
        (&KEMET, kemet),
        (&YAGEO, yageo),
    ];
    decoders
        .iter()
        .find_map(|(pattern, decode)| pattern.captures(mpn).and_then(|caps| decode(&caps)))
}

fn murata(caps: &Captures<'_>) -> Option<Mlcc> {
    let size = match &caps[1] {
        "03" => Some("0201"),
        "15" => Some("0402"),
        "18" => Some("0603"),
        "21" => Some("0805"),
        "31" => Some("1206"),
        "32" => Some("1210"),
        "43" => Some("1812"),
        "55" => Some("2220"),
        _ => None,
    };
    let dielectric = match &caps[3] {
        "R7" => Some("X7R"),
        "R6" => Some("X5R"),
        "C7" => Some("X7S"),
        "C8" => Some("X6S"),
        "D7" => Some("X7T"),
        "5C" => Some("C0G"),
        "F5" => Some("Y5V"),
        _ => None,
    };
    Mlcc::new(&caps[5], dielectric, eia_voltage(&caps[4]), size, &caps[6])
}

fn samsung(caps: &Captures<'_>) -> Option<Mlcc> {
    let size = match &caps[1] {
        "03" => Some("0201"),
        "05" => Some("0402"),
        "10" => Some("0603"),
        "21" => Some("0805"),
        "31" => Some("1206"),
        "32" => Some("1210"),
        "43" => Some("1812"),
        "55" => Some("2220"),
        _ => None,
    };
    let dielectric = match &caps[2] {
        "A" => Some("X5R"),
        "B" => Some("X7R"),
        "C" => Some("C0G"),
        "F" => Some("Y5V"),
        "X" => Some("X6S"),
        "Z" => Some("X7S"),
        _ => None,
    };
    let volts = match &caps[5] {
        "R" => Some(4.0),
        "Q" => Some(6.3),
        "P" => Some(10.0),
        "O" => Some(16.0),
        "A" => Some(25.0),
        "L" => Some(35.0),
        "B" => Some(50.0),
        "C" => Some(100.0),
        "D" => Some(200.0),
        "E" => Some(250.0),
        "G" => Some(500.0),
        "I" => Some(1000.0),
        _ => None,
    };
    Mlcc::new(&caps[3], dielectric, volts, size, &caps[4])
}

fn tdk(caps: &Captures<'_>) -> Option<Mlcc> {
    Mlcc::new(
        &caps[4],
        normalize_dielectric(&caps[2]),
        eia_voltage(&caps[3]),
        metric_to_imperial(&caps[1]),
        &caps[5],
    )
}

fn kemet(caps: &Captures<'_>) -> Option<Mlcc> {
    let volts = match &caps[4] {
        "9" => Some(6.3),
        "8" => Some(10.0),
        "4" => Some(16.0),
        "3" => Some(25.0),
        "6" => Some(35.0),
        "5" => Some(50.0),
        "1" => Some(100.0),
        "2" => Some(200.0),
        "A" => Some(250.0),
        _ => None,
    };
    let dielectric = match &caps[5] {
        "G" => Some("C0G"),
        "P" => Some("X5R"),
        "R" => Some("X7R"),
        "U" => Some("Z5U"),
        "V" => Some("Y5V"),
        _ => None,
    };
    Mlcc::new(&caps[2], dielectric, volts, imperial(&caps[1]), &caps[3])
}

fn yageo(caps: &Captures<'_>) -> Option<Mlcc> {
    let volts = match &caps[5] {
        "5" => Some(6.3),
        "6" => Some(10.0),
        "7" => Some(16.0),
        "8" => Some(25.0),
        "9" => Some(50.0),
        "0" => Some(100.0),
        _ => None,
    };
    Mlcc::new(
        &caps[6],
        normalize_dielectric(&caps[4]),
        volts,
        imperial(&caps[1]),
        &caps[2],
    )
}

/// Class-1 aliases collapse to `C0G`.
fn normalize_dielectric(code: &str) -> Option<&'static str> {
    Some(match code {
        "C0G" | "NP0" | "NPO" | "CH" => "C0G",
        "X7R" => "X7R",
        "X5R" => "X5R",
        "X7S" => "X7S",
        "X6S" => "X6S",
        "X7T" => "X7T",
        "Y5V" => "Y5V",
        "JB" => "JB",
        _ => return None,
    })
}

/// Tolerance in percent; picofarad letters are converted against the value.
fn capacitance_tolerance(letter: &str, picofarads: f64) -> Option<f64> {
    match tolerance_picofarads(letter) {
        Some(pf) if picofarads > 0.0 && picofarads < 10.0 => Some(pf / picofarads * 100.0),
        _ => tolerance_percent(letter),
    }
}

pub(super) fn ceramic_metadata() -> Result<TypeMetadata> {
    TypeMetadata::builder(CeramicCapacitorSpecs::metadata_key())
        .critical("capacitance", ToleranceRule::percentage_tolerance(5.0))
        .critical("dielectric", ToleranceRule::exact_match())
        .high("voltage", ToleranceRule::minimum_required())
        .high("package", ToleranceRule::exact_match())
        .medium("tolerance", ToleranceRule::maximum_allowed(2.0))
        .build()
}

// ============================================================================
// Polarized
// ============================================================================

/// Decodes aluminum electrolytic and tantalum capacitance, voltage and case.
#[derive(Debug, Clone, Copy, Default)]
pub struct PolarizedCapacitorSpecs;

pub type PolarizedCapacitorCalculator = SpecBasedCalculator<PolarizedCapacitorSpecs>;

impl SpecExtractor for PolarizedCapacitorSpecs {
    const NAME: &'static str = "PolarizedCapacitorCalculator";

    fn applicability() -> Applicability {
        Applicability::new([
            TypeSelector::SubtypePrefix(BaseType::Capacitor, "ELECTROLYTIC"),
            TypeSelector::SubtypePrefix(BaseType::Capacitor, "TANTALUM"),
        ])
    }

    fn metadata_key() -> ComponentType {
        ComponentType::sub(BaseType::Capacitor, "POLARIZED")
    }

    fn extract(&self, part: &ClassifiedPart) -> Specs {
        let mpn = part.mpn.as_str();
        decode_panasonic_electrolytic(mpn)
            .or_else(|| decode_kemet_tantalum(mpn))
            .unwrap_or_default()
    }
}

fn decode_panasonic_electrolytic(mpn: &str) -> Option<Specs> {
    let (voltage, value) = if let Some(caps) = PANASONIC_VOLTAGE_FIRST.captures(mpn) {
        (eia_voltage(&caps[1])?, decode_capacitance_code(&caps[3])?)
    } else {
        let caps = PANASONIC_SERIES_FIRST.captures(mpn)?;
        (eia_voltage(&caps[2])?, decode_capacitance_code(&caps[3])?)
    };
    Some(
        Specs::new()
            .with("capacitance", SpecValue::numeric(value * MICRO, "F"))
            .with("voltage", SpecValue::numeric(voltage, "V"))
            .with("technology", SpecValue::text("ALUMINUM")),
    )
}

fn decode_kemet_tantalum(mpn: &str) -> Option<Specs> {
    let caps = KEMET_TANTALUM.captures(mpn)?;
    let picofarads = decode_capacitance_code(&caps[3])?;
    let voltage = caps[5].parse::<f64>().ok()?;
    let case = match &caps[2] {
        "R" => Some("2012-12"),
        "S" => Some("3216-12"),
        "A" => Some("3216-18"),
        "T" => Some("3528-12"),
        "B" => Some("3528-21"),
        "C" => Some("6032-28"),
        "D" => Some("7343-31"),
        "E" | "X" => Some("7343-43"),
        _ => None,
    };
    let mut specs = Specs::new()
        .with("capacitance", SpecValue::numeric(picofarads * PICO, "F"))
        .with("voltage", SpecValue::numeric(voltage, "V"))
        .with("technology", SpecValue::text("TANTALUM"));
    specs.insert_opt(
        "tolerance",
        tolerance_percent(&caps[4]).map(|t| SpecValue::numeric(t, "%")),
    );
    specs.insert_opt("package", case.map(SpecValue::text));
    Some(specs)
}

pub(super) fn polarized_metadata() -> Result<TypeMetadata> {
    TypeMetadata::builder(PolarizedCapacitorSpecs::metadata_key())
        .critical("capacitance", ToleranceRule::percentage_tolerance(10.0))
        .critical("voltage", ToleranceRule::minimum_required())
        .high("technology", ToleranceRule::exact_match())
        .medium("tolerance", ToleranceRule::maximum_allowed(2.0))
        .low("package", ToleranceRule::exact_match())
        .build()
}
