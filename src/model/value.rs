//! Typed characteristic values and spec sets.
//!
//! A [`SpecValue`] is what a decoder extracts from a part number: a number in
//! SI base units (ohms, farads, volts, amperes) or a text token such as a
//! package code or dielectric class, optionally with an explicit `[min, max]`
//! range. [`Specs`] is the ordered set of named values extracted from one part.

use indexmap::IndexMap;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;
use std::sync::LazyLock;

/// `10k`, `4.7uF`, `50 V`, `100nF`, `1.5A`
static SI_VALUE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([+-]?\d+(?:\.\d+)?|[+-]?\.\d+)\s*([pnuµmkKMG]?)\s*([A-Za-zΩ]*)$")
        .expect("static regex")
});

/// `4K7`, `4R7`, `1M5`
static RKM_VALUE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)([RrKkM])(\d+)$").expect("static regex"));

/// Raw value of a characteristic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Number(f64),
    Text(String),
}

/// An immutable characteristic value with optional unit and explicit range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpecValue {
    value: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    unit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    max: Option<f64>,
}

impl SpecValue {
    /// A numeric value in SI base units.
    pub fn numeric(value: f64, unit: impl Into<String>) -> Self {
        Self {
            value: Value::Number(value),
            unit: Some(unit.into()),
            min: None,
            max: None,
        }
    }

    /// A unitless number.
    #[must_use]
    pub const fn number(value: f64) -> Self {
        Self {
            value: Value::Number(value),
            unit: None,
            min: None,
            max: None,
        }
    }

    /// A text token such as a package or dielectric code.
    pub fn text(value: impl Into<String>) -> Self {
        Self {
            value: Value::Text(value.into()),
            unit: None,
            min: None,
            max: None,
        }
    }

    /// Attach an explicit acceptable range. Bounds are reordered if reversed.
    #[must_use]
    pub fn with_range(mut self, min: f64, max: f64) -> Self {
        let (lo, hi) = if min <= max { (min, max) } else { (max, min) };
        self.min = Some(lo);
        self.max = Some(hi);
        self
    }

    /// Parse a human-written value: SI prefixes (`10k`, `4.7uF`, `100nF`),
    /// RKM notation (`4K7`, `4R7`) or free text (`X7R`, `SOT-23`).
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if let Some(caps) = RKM_VALUE.captures(trimmed) {
            let joined = format!("{}.{}", &caps[1], &caps[3]);
            if let Ok(base) = joined.parse::<f64>() {
                let scale = match &caps[2] {
                    "K" | "k" => 1e3,
                    "M" => 1e6,
                    _ => 1.0,
                };
                return Self::numeric(base * scale, "Ω");
            }
        }
        if let Some(caps) = SI_VALUE.captures(trimmed) {
            let number = caps[1].parse::<f64>().ok();
            let scale = si_prefix_scale(&caps[2]);
            if let (Some(number), Some(scale)) = (number, scale) {
                let value = number * scale;
                return match canonical_unit(&caps[3]) {
                    Some(unit) => Self::numeric(value, unit),
                    None => Self::number(value),
                };
            }
        }
        Self::text(trimmed)
    }

    #[must_use]
    pub const fn value(&self) -> &Value {
        &self.value
    }

    #[must_use]
    pub fn unit(&self) -> Option<&str> {
        self.unit.as_deref()
    }

    #[must_use]
    pub const fn min(&self) -> Option<f64> {
        self.min
    }

    #[must_use]
    pub const fn max(&self) -> Option<f64> {
        self.max
    }

    /// The numeric value, if this is a finite number.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self.value {
            Value::Number(n) if n.is_finite() => Some(n),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_numeric(&self) -> bool {
        self.as_f64().is_some()
    }

    /// Text form of the value, used for text comparisons.
    #[must_use]
    pub fn as_text(&self) -> Cow<'_, str> {
        match &self.value {
            Value::Text(s) => Cow::Borrowed(s.as_str()),
            Value::Number(n) => Cow::Owned(n.to_string()),
        }
    }
}

impl fmt::Display for SpecValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.value, &self.unit) {
            (Value::Number(n), Some(unit)) => write!(f, "{n}{unit}")?,
            (Value::Number(n), None) => write!(f, "{n}")?,
            (Value::Text(s), _) => f.write_str(s)?,
        }
        if let (Some(lo), Some(hi)) = (self.min, self.max) {
            write!(f, " [{lo}, {hi}]")?;
        }
        Ok(())
    }
}

fn si_prefix_scale(prefix: &str) -> Option<f64> {
    Some(match prefix {
        "" => 1.0,
        "p" => 1e-12,
        "n" => 1e-9,
        "u" | "µ" => 1e-6,
        "m" => 1e-3,
        "k" | "K" => 1e3,
        "M" => 1e6,
        "G" => 1e9,
        _ => return None,
    })
}

fn canonical_unit(unit: &str) -> Option<String> {
    match unit {
        "" => None,
        "R" | "r" | "ohm" | "Ohm" | "ohms" | "Ω" => Some("Ω".to_string()),
        other => Some(other.to_string()),
    }
}

/// Decode an EIA significant-figures value code.
///
/// The last digit is a power-of-ten multiplier (`104` is 10·10⁴, `1002` is
/// 100·10²); an `R` marks the decimal point (`4R7` is 4.7, `R47` is 0.47).
/// The result is in the code's own unit (picofarads for capacitors, ohms for
/// resistors, microfarads for Panasonic electrolytics).
#[must_use]
pub fn decode_eia_code(code: &str) -> Option<f64> {
    if code.contains('R') {
        let dotted = code.replacen('R', ".", 1);
        let dotted = if dotted.starts_with('.') {
            format!("0{dotted}")
        } else {
            dotted
        };
        return dotted.parse::<f64>().ok().filter(|v| v.is_finite());
    }
    if code.len() < 2 || !code.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let (mantissa, exponent) = code.split_at(code.len() - 1);
    let mantissa = mantissa.parse::<f64>().ok()?;
    let exponent = exponent.parse::<i32>().ok()?;
    Some(mantissa * 10f64.powi(exponent))
}

/// Decode a three-figure EIA capacitance code.
///
/// Same as [`decode_eia_code`] except that a trailing `8` or `9` marks a
/// fractional multiplier: `109` is 1.0 and `508` is 0.5. Resistor codes do
/// not use this convention.
#[must_use]
pub fn decode_capacitance_code(code: &str) -> Option<f64> {
    let bytes = code.as_bytes();
    if bytes.len() == 3 && bytes.iter().all(u8::is_ascii_digit) {
        let exponent = match bytes[2] {
            b'8' => -2,
            b'9' => -1,
            _ => return decode_eia_code(code),
        };
        let mantissa = code[..2].parse::<f64>().ok()?;
        return Some(mantissa * 10f64.powi(exponent));
    }
    decode_eia_code(code)
}

/// Decode an RKM resistance code where the letter marks the decimal point and
/// the multiplier: `10K0` is 10 kΩ, `4K7` 4.7 kΩ, `100R` 100 Ω, `1M` 1 MΩ.
#[must_use]
pub fn decode_rkm_code(code: &str) -> Option<f64> {
    let pos = code.find(['R', 'K', 'M'])?;
    let (int_part, rest) = code.split_at(pos);
    let (letter, frac_part) = rest.split_at(1);
    if !int_part.bytes().all(|b| b.is_ascii_digit()) || !frac_part.bytes().all(|b| b.is_ascii_digit())
    {
        return None;
    }
    if int_part.is_empty() && frac_part.is_empty() {
        return None;
    }
    let int_part = if int_part.is_empty() { "0" } else { int_part };
    let frac_part = if frac_part.is_empty() { "0" } else { frac_part };
    let base = format!("{int_part}.{frac_part}").parse::<f64>().ok()?;
    let scale = match letter {
        "K" => 1e3,
        "M" => 1e6,
        _ => 1.0,
    };
    Some(base * scale)
}

/// Ordered set of named characteristic values extracted from one part.
///
/// Names are stored lowercase; lookups are case-insensitive.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Specs(IndexMap<String, SpecValue>);

impl Specs {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: SpecValue) -> Self {
        self.insert(name, value);
        self
    }

    /// Insert a value, returning the previous value for that name.
    pub fn insert(&mut self, name: impl Into<String>, value: SpecValue) -> Option<SpecValue> {
        self.0.insert(name.into().to_ascii_lowercase(), value)
    }

    /// Insert only when the value is present.
    pub fn insert_opt(&mut self, name: impl Into<String>, value: Option<SpecValue>) {
        if let Some(value) = value {
            self.insert(name, value);
        }
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&SpecValue> {
        self.0.get(lowercase(name).as_ref())
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(lowercase(name).as_ref())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SpecValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

impl<K: Into<String>> FromIterator<(K, SpecValue)> for Specs {
    fn from_iter<I: IntoIterator<Item = (K, SpecValue)>>(iter: I) -> Self {
        let mut specs = Self::new();
        for (name, value) in iter {
            specs.insert(name, value);
        }
        specs
    }
}

fn lowercase(name: &str) -> Cow<'_, str> {
    if name.bytes().any(|b| b.is_ascii_uppercase()) {
        Cow::Owned(name.to_ascii_lowercase())
    } else {
        Cow::Borrowed(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() <= expected.abs() * 1e-12,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_parse_si_prefixes() {
        let v = SpecValue::parse("10k");
        assert_close(v.as_f64().unwrap(), 10_000.0);
        assert_eq!(v.unit(), None);

        let v = SpecValue::parse("4.7uF");
        assert_close(v.as_f64().unwrap(), 4.7e-6);
        assert_eq!(v.unit(), Some("F"));

        let v = SpecValue::parse("100 nF");
        assert_close(v.as_f64().unwrap(), 1e-7);

        let v = SpecValue::parse("50V");
        assert_close(v.as_f64().unwrap(), 50.0);
        assert_eq!(v.unit(), Some("V"));

        let v = SpecValue::parse("500mA");
        assert_close(v.as_f64().unwrap(), 0.5);
        assert_eq!(v.unit(), Some("A"));
    }

    #[test]
    fn test_parse_rkm_notation() {
        let v = SpecValue::parse("4K7");
        assert_close(v.as_f64().unwrap(), 4700.0);
        assert_eq!(v.unit(), Some("Ω"));
        assert_close(SpecValue::parse("4R7").as_f64().unwrap(), 4.7);
        assert_close(SpecValue::parse("1M5").as_f64().unwrap(), 1.5e6);
        assert_close(SpecValue::parse("100R").as_f64().unwrap(), 100.0);
    }

    #[test]
    fn test_parse_text() {
        assert_eq!(SpecValue::parse("X7R"), SpecValue::text("X7R"));
        assert_eq!(SpecValue::parse(" SOT-23 "), SpecValue::text("SOT-23"));
        assert!(!SpecValue::parse("ADJ").is_numeric());
    }

    #[test]
    fn test_decode_eia_code() {
        assert_close(decode_eia_code("104").unwrap(), 100_000.0);
        assert_close(decode_eia_code("1002").unwrap(), 10_000.0);
        assert_close(decode_eia_code("4R7").unwrap(), 4.7);
        assert_close(decode_eia_code("R47").unwrap(), 0.47);
        assert_close(decode_eia_code("100").unwrap(), 10.0);
        assert!(decode_eia_code("1").is_none());
        assert!(decode_eia_code("1A4").is_none());
    }

    #[test]
    fn test_decode_capacitance_code() {
        assert_close(decode_capacitance_code("109").unwrap(), 1.0);
        assert_close(decode_capacitance_code("229").unwrap(), 2.2);
        assert_close(decode_capacitance_code("508").unwrap(), 0.5);
        assert_close(decode_capacitance_code("104").unwrap(), 100_000.0);
        assert_close(decode_capacitance_code("1R0").unwrap(), 1.0);
        assert!(decode_capacitance_code("10A").is_none());
        // four-figure resistor codes keep the plain multiplier
        assert_close(decode_capacitance_code("1009").unwrap(), 100e9);
        assert_close(decode_eia_code("109").unwrap(), 1e10);
    }

    #[test]
    fn test_decode_rkm_code() {
        assert_close(decode_rkm_code("10K0").unwrap(), 10_000.0);
        assert_close(decode_rkm_code("4K7").unwrap(), 4_700.0);
        assert_close(decode_rkm_code("100R").unwrap(), 100.0);
        assert_close(decode_rkm_code("1M").unwrap(), 1e6);
        assert_close(decode_rkm_code("0R").unwrap(), 0.0);
        assert!(decode_rkm_code("1002").is_none());
        assert!(decode_rkm_code("R").is_none());
    }

    #[test]
    fn test_text_form_of_numbers() {
        assert_eq!(SpecValue::number(5.0).as_text(), "5");
        assert_eq!(SpecValue::text("ADJ").as_text(), "ADJ");
    }

    #[test]
    fn test_with_range_orders_bounds() {
        let v = SpecValue::numeric(5.0, "V").with_range(5.2, 4.8);
        assert_eq!(v.min(), Some(4.8));
        assert_eq!(v.max(), Some(5.2));
        assert_eq!(v.to_string(), "5V [4.8, 5.2]");
    }

    #[test]
    fn test_specs_case_insensitive_names() {
        let specs = Specs::new()
            .with("Resistance", SpecValue::numeric(10_000.0, "Ω"))
            .with("package", SpecValue::text("0603"));
        assert!(specs.contains("resistance"));
        assert!(specs.contains("RESISTANCE"));
        assert_eq!(specs.get("Package"), Some(&SpecValue::text("0603")));
        assert_eq!(specs.names().collect::<Vec<_>>(), ["resistance", "package"]);
    }

    #[test]
    fn test_non_finite_numbers_are_not_numeric() {
        assert!(SpecValue::number(f64::NAN).as_f64().is_none());
        assert!(SpecValue::number(f64::INFINITY).as_f64().is_none());
    }
}
