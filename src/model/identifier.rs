//! Normalized manufacturer part numbers.
//!
//! Distributors, BOM exports and datasheets spell the same part number in many
//! ways (`grm188r71h104ka93d`, `GRM188R71H104KA93D `, `"GRM188R71H104KA93D"`).
//! Every comparison in this crate runs on the normalized form produced here.

use serde::Serialize;
use std::fmt;

/// Punctuation that carries meaning inside a part number. It is kept between
/// alphanumerics and trimmed from either end.
pub const SEMANTIC_PUNCTUATION: &[char] = &['-', '.', '/', '+', '#'];

/// A normalized manufacturer part number.
///
/// Normalization uppercases ASCII letters, keeps ASCII alphanumerics and the
/// semantic punctuation set (`- . / + #`), and drops everything else
/// (whitespace, underscores, brackets, quotes, non-ASCII). Leading and trailing
/// punctuation is trimmed, so a lead-free `+` suffix collapses onto the base
/// part (`MAX232CPE+` is `MAX232CPE`) while an inner `#` stays
/// (`LTC6655#PBF`). Construction never fails; empty input gives an empty
/// identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize)]
#[serde(transparent)]
pub struct PartNumber(String);

impl PartNumber {
    /// Normalize a raw part number.
    #[must_use]
    pub fn normalize(raw: &str) -> Self {
        let kept: String = raw
            .chars()
            .filter(|c| c.is_ascii_alphanumeric() || SEMANTIC_PUNCTUATION.contains(c))
            .map(|c| c.to_ascii_uppercase())
            .collect();
        let trimmed = kept.trim_matches(|c| SEMANTIC_PUNCTUATION.contains(&c));
        if trimmed.len() == kept.len() {
            Self(kept)
        } else {
            Self(trimmed.to_string())
        }
    }

    /// The normalized text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn starts_with(&self, prefix: &str) -> bool {
        self.0.starts_with(prefix)
    }

    /// The identifier with all punctuation removed.
    ///
    /// Known-part lookups use this form so `SI2302CDS-T1-GE3` and
    /// `SI2302CDST1GE3` resolve to the same entry.
    #[must_use]
    pub fn compact(&self) -> String {
        self.0
            .chars()
            .filter(char::is_ascii_alphanumeric)
            .collect()
    }
}

impl fmt::Display for PartNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for PartNumber {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PartNumber {
    fn from(raw: &str) -> Self {
        Self::normalize(raw)
    }
}

/// Normalize a raw part number.
#[must_use]
pub fn normalize(raw: &str) -> PartNumber {
    PartNumber::normalize(raw)
}
