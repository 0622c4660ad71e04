//! Pattern registry keyed by component type.
//!
//! Patterns are compiled once when the registry is built; an invalid regex
//! fails the build instead of silently never matching. Each pattern is owned
//! by a manufacturer so type classification can restrict itself to the
//! detected manufacturer's patterns, with `Unknown` owning the generic,
//! manufacturer-independent ones.

use indexmap::IndexMap;
use regex::Regex;

use crate::error::{MpnError, RegistrationErrorKind, Result};
use crate::model::{ComponentType, Manufacturer, PartNumber};

/// A compiled type pattern.
#[derive(Debug, Clone)]
pub enum Pattern {
    /// Literal prefix match
    Prefix(String),
    /// Regular expression, usually anchored with `^`
    Regex(Regex),
}

impl Pattern {
    #[must_use]
    pub fn is_match(&self, mpn: &str) -> bool {
        match self {
            Self::Prefix(prefix) => mpn.starts_with(prefix.as_str()),
            Self::Regex(re) => re.is_match(mpn),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Prefix(prefix) => prefix,
            Self::Regex(re) => re.as_str(),
        }
    }
}

#[derive(Debug, Clone)]
struct PatternEntry {
    owner: Manufacturer,
    pattern: Pattern,
}

/// Frozen registry of type patterns, in registration order.
#[derive(Debug, Clone, Default)]
pub struct PatternRegistry {
    by_type: IndexMap<ComponentType, Vec<PatternEntry>>,
}

impl PatternRegistry {
    #[must_use]
    pub fn builder() -> PatternRegistryBuilder {
        PatternRegistryBuilder::default()
    }

    /// Whether any pattern registered for `ty` matches.
    #[must_use]
    pub fn matches(&self, mpn: &PartNumber, ty: &ComponentType) -> bool {
        self.by_type
            .get(ty)
            .is_some_and(|entries| entries.iter().any(|e| e.pattern.is_match(mpn.as_str())))
    }

    /// Whether a pattern owned by `owner` and registered for `ty` matches.
    #[must_use]
    pub fn matches_for(&self, mpn: &PartNumber, ty: &ComponentType, owner: Manufacturer) -> bool {
        self.by_type.get(ty).is_some_and(|entries| {
            entries
                .iter()
                .any(|e| e.owner == owner && e.pattern.is_match(mpn.as_str()))
        })
    }

    /// All types with a matching pattern owned by `owner`, in registration order.
    #[must_use]
    pub fn types_matching_for(&self, mpn: &PartNumber, owner: Manufacturer) -> Vec<ComponentType> {
        self.by_type
            .iter()
            .filter(|(_, entries)| {
                entries
                    .iter()
                    .any(|e| e.owner == owner && e.pattern.is_match(mpn.as_str()))
            })
            .map(|(ty, _)| ty.clone())
            .collect()
    }

    /// Every type with at least one registered pattern.
    pub fn registered_types(&self) -> impl Iterator<Item = &ComponentType> {
        self.by_type.keys()
    }

    /// Pattern sources registered for `ty`.
    pub fn patterns_for(&self, ty: &ComponentType) -> impl Iterator<Item = &str> {
        self.by_type
            .get(ty)
            .into_iter()
            .flatten()
            .map(|e| e.pattern.as_str())
    }

    #[must_use]
    pub fn pattern_count(&self) -> usize {
        self.by_type.values().map(Vec::len).sum()
    }
}

/// Builder for [`PatternRegistry`]; regexes are compiled as they are added.
#[derive(Debug, Default)]
pub struct PatternRegistryBuilder {
    by_type: IndexMap<ComponentType, Vec<PatternEntry>>,
}

impl PatternRegistryBuilder {
    /// Register a regular expression for `ty`, owned by `owner`.
    pub fn add_regex(
        &mut self,
        owner: Manufacturer,
        ty: ComponentType,
        pattern: &str,
    ) -> Result<&mut Self> {
        let re = Regex::new(pattern).map_err(|e| {
            MpnError::registration(
                format!("registering {ty} pattern for {owner}"),
                RegistrationErrorKind::InvalidPattern {
                    pattern: pattern.to_string(),
                    message: e.to_string(),
                },
            )
        })?;
        self.push(owner, ty, Pattern::Regex(re));
        Ok(self)
    }

    /// Register a literal prefix for `ty`, owned by `owner`.
    pub fn add_prefix(
        &mut self,
        owner: Manufacturer,
        ty: ComponentType,
        prefix: &str,
    ) -> Result<&mut Self> {
        let normalized = PartNumber::normalize(prefix);
        if normalized.is_empty() {
            return Err(MpnError::registration(
                format!("registering {ty} prefix for {owner}"),
                RegistrationErrorKind::InvalidPattern {
                    pattern: prefix.to_string(),
                    message: "prefix is empty after normalization".to_string(),
                },
            ));
        }
        self.push(owner, ty, Pattern::Prefix(normalized.as_str().to_string()));
        Ok(self)
    }

    fn push(&mut self, owner: Manufacturer, ty: ComponentType, pattern: Pattern) {
        self.by_type
            .entry(ty)
            .or_default()
            .push(PatternEntry { owner, pattern });
    }

    #[must_use]
    pub fn build(self) -> PatternRegistry {
        PatternRegistry {
            by_type: self.by_type,
        }
    }
}
