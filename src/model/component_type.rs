//! Component-type tags.
//!
//! A tag is a closed [`BaseType`] plus an optional open subtype qualifier
//! (`CAPACITOR` + `CERAMIC_MURATA`). The display form joins them with an
//! underscore, which is also the form used in configuration files.

use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use crate::error::{MpnError, Result};

/// Closed set of base component categories.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[non_exhaustive]
pub enum BaseType {
    Resistor,
    Capacitor,
    Inductor,
    Diode,
    Bjt,
    Mosfet,
    #[serde(rename = "OPAMP")]
    OpAmp,
    VoltageRegulator,
    LogicIc,
    Microcontroller,
    Memory,
}

impl BaseType {
    pub const ALL: [Self; 11] = [
        Self::Resistor,
        Self::Capacitor,
        Self::Inductor,
        Self::Diode,
        Self::Bjt,
        Self::Mosfet,
        Self::OpAmp,
        Self::VoltageRegulator,
        Self::LogicIc,
        Self::Microcontroller,
        Self::Memory,
    ];

    /// Upper-case tag used in display and configuration.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Resistor => "RESISTOR",
            Self::Capacitor => "CAPACITOR",
            Self::Inductor => "INDUCTOR",
            Self::Diode => "DIODE",
            Self::Bjt => "BJT",
            Self::Mosfet => "MOSFET",
            Self::OpAmp => "OPAMP",
            Self::VoltageRegulator => "VOLTAGE_REGULATOR",
            Self::LogicIc => "LOGIC_IC",
            Self::Microcontroller => "MICROCONTROLLER",
            Self::Memory => "MEMORY",
        }
    }

    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|b| b.tag() == tag)
    }
}

impl fmt::Display for BaseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// A component-type tag: base type plus optional subtype qualifier.
///
/// Built-in tags are `const`-constructible:
///
/// ```
/// use mpn_tools::{BaseType, ComponentType};
///
/// const MURATA_MLCC: ComponentType = ComponentType::sub(BaseType::Capacitor, "CERAMIC_MURATA");
/// assert_eq!(MURATA_MLCC.to_string(), "CAPACITOR_CERAMIC_MURATA");
/// assert_eq!(MURATA_MLCC.base_tag(), ComponentType::of(BaseType::Capacitor));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComponentType {
    base: BaseType,
    subtype: Option<Cow<'static, str>>,
}

impl ComponentType {
    /// The plain base-type tag.
    #[must_use]
    pub const fn of(base: BaseType) -> Self {
        Self {
            base,
            subtype: None,
        }
    }

    /// A built-in subtype tag. The qualifier must be upper-case and non-empty.
    #[must_use]
    pub const fn sub(base: BaseType, subtype: &'static str) -> Self {
        Self {
            base,
            subtype: Some(Cow::Borrowed(subtype)),
        }
    }

    /// A runtime-defined subtype tag, validated.
    pub fn custom(base: BaseType, subtype: &str) -> Result<Self> {
        let trimmed = subtype.trim().trim_matches('_');
        if trimmed.is_empty() {
            return Err(MpnError::invalid_type_tag(
                format!("{}_{subtype}", base.tag()),
                "subtype qualifier is empty",
            ));
        }
        if !trimmed
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_')
        {
            return Err(MpnError::invalid_type_tag(
                format!("{}_{subtype}", base.tag()),
                "subtype qualifier may only contain letters, digits and '_'",
            ));
        }
        Ok(Self {
            base,
            subtype: Some(Cow::Owned(trimmed.to_ascii_uppercase())),
        })
    }

    #[must_use]
    pub const fn base_type(&self) -> BaseType {
        self.base
    }

    #[must_use]
    pub fn subtype(&self) -> Option<&str> {
        self.subtype.as_deref()
    }

    #[must_use]
    pub const fn is_subtype(&self) -> bool {
        self.subtype.is_some()
    }

    /// The base-type tag this tag falls back to.
    #[must_use]
    pub const fn base_tag(&self) -> Self {
        Self::of(self.base)
    }

    /// Whether the subtype starts with `prefix` on a `_` segment boundary.
    ///
    /// `CERAMIC_MURATA` has prefix `CERAMIC` but `CERAMICX` does not.
    #[must_use]
    pub fn has_subtype_prefix(&self, prefix: &str) -> bool {
        self.subtype().is_some_and(|s| segment_prefix(s, prefix))
    }
}

pub(crate) fn segment_prefix(value: &str, prefix: &str) -> bool {
    value
        .strip_prefix(prefix)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with('_'))
}

impl fmt::Display for ComponentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.subtype {
            Some(sub) => write!(f, "{}_{sub}", self.base.tag()),
            None => f.write_str(self.base.tag()),
        }
    }
}

impl FromStr for ComponentType {
    type Err = MpnError;

    /// Parse the display form; the longest matching base name wins so
    /// `VOLTAGE_REGULATOR_LINEAR_TI` is never read as a `VOLTAGE` base.
    fn from_str(s: &str) -> Result<Self> {
        let tag = s.trim().to_ascii_uppercase();
        let base = BaseType::ALL
            .into_iter()
            .filter(|b| segment_prefix(&tag, b.tag()))
            .max_by_key(|b| b.tag().len())
            .ok_or_else(|| MpnError::invalid_type_tag(s, "unknown base type"))?;
        match tag[base.tag().len()..].strip_prefix('_') {
            None => Ok(Self::of(base)),
            Some(rest) => Self::custom(base, rest),
        }
    }
}

impl Serialize for ComponentType {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ComponentType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
