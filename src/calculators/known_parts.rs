//! Static spec tables for discrete parts whose numbers encode no values.

use crate::model::{PartNumber, SpecValue, Specs};

/// A literal spec value in a static table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Lit {
    Num(f64, &'static str),
    Text(&'static str),
}

impl Lit {
    fn to_value(self) -> SpecValue {
        match self {
            Self::Num(value, unit) if unit.is_empty() => SpecValue::number(value),
            Self::Num(value, unit) => SpecValue::numeric(value, unit),
            Self::Text(text) => SpecValue::text(text),
        }
    }
}

/// Specs of a part family keyed by its base part number.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KnownPart {
    /// Alphanumeric prefix matched against the compacted part number
    pub prefix: &'static str,
    pub specs: &'static [(&'static str, Lit)],
}

impl KnownPart {
    #[must_use]
    pub fn specs(&self) -> Specs {
        self.specs
            .iter()
            .map(|(name, lit)| (*name, lit.to_value()))
            .collect()
    }
}

/// The entry with the longest prefix of the compacted part number.
///
/// `1N4148W-7-F` picks `1N4148W` over `1N4148`.
pub(crate) fn lookup<'t>(table: &'t [KnownPart], mpn: &PartNumber) -> Option<&'t KnownPart> {
    let compact = mpn.compact();
    table
        .iter()
        .filter(|part| compact.starts_with(part.prefix))
        .max_by_key(|part| part.prefix.len())
}

/// Decoded specs of the longest matching entry; empty when none matches.
pub(crate) fn lookup_specs(table: &[KnownPart], mpn: &PartNumber) -> Specs {
    lookup(table, mpn).map(KnownPart::specs).unwrap_or_default()
}
