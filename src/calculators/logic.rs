//! 74-series logic: function number, technology family and package.

use regex::Regex;
use std::sync::LazyLock;

use crate::classify::ClassifiedPart;
use crate::error::Result;
use crate::model::{BaseType, ComponentType, SpecValue, Specs};
use crate::scoring::{ToleranceRule, TypeMetadata};

use super::codes::suffix_package;
use super::spec_based::{SpecBasedCalculator, SpecExtractor};
use super::{Applicability, TypeSelector};

/// `SN74HC595N`, `MC74HC00ADR2G`, `74LVC1G08GW`: family, function, suffix.
static SERIES_74: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:SN|CD|MC|NX|M)?74([A-Z]{0,5})(\d{1,2}G\d{2,3}|\d{2,4})([A-Z0-9]*)")
        .expect("static regex")
});

const PACKAGE_SUFFIXES: &[(&str, &str)] = &[
    ("DBV", "SOT-23"),
    ("DCK", "SC-70"),
    ("DGG", "TSSOP"),
    ("DB", "SSOP"),
    ("DT", "TSSOP"),
    ("DR", "SOIC"),
    ("D", "SOIC"),
    ("PW", "TSSOP"),
    ("GW", "SOT-353"),
    ("GV", "SOT-753"),
    ("BQ", "DHVQFN"),
    ("N", "DIP"),
];

/// Original bipolar parts carry no family letters (`SN7400N`).
const STANDARD_TTL: &str = "TTL";

#[derive(Debug, Clone, Copy, Default)]
pub struct LogicSpecs;

pub type LogicCalculator = SpecBasedCalculator<LogicSpecs>;

impl SpecExtractor for LogicSpecs {
    const NAME: &'static str = "LogicCalculator";

    fn applicability() -> Applicability {
        Applicability::new([TypeSelector::Base(BaseType::LogicIc)])
    }

    fn metadata_key() -> ComponentType {
        ComponentType::of(BaseType::LogicIc)
    }

    fn extract(&self, part: &ClassifiedPart) -> Specs {
        let Some(caps) = SERIES_74.captures(part.mpn.as_str()) else {
            return Specs::new();
        };
        let family = match &caps[1] {
            "" => STANDARD_TTL,
            family => family,
        };
        let suffix = &caps[3];
        // a leading `A` is a die revision, not a package
        let suffix = suffix.strip_prefix('A').unwrap_or(suffix);

        let mut specs = Specs::new()
            .with("function", SpecValue::text(&caps[2]))
            .with("family", SpecValue::text(family));
        specs.insert_opt(
            "package",
            suffix_package(suffix, PACKAGE_SUFFIXES).map(SpecValue::text),
        );
        specs
    }
}

pub(super) fn metadata() -> Result<TypeMetadata> {
    TypeMetadata::builder(LogicSpecs::metadata_key())
        .critical("function", ToleranceRule::exact_match())
        .high("family", ToleranceRule::exact_match())
        .medium("package", ToleranceRule::exact_match())
        .build()
}
