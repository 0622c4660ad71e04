//! Component-type metadata and its registry.
//!
//! Metadata declares, per component type, which characteristics matter, how
//! much (importance tier) and how they are compared (tolerance rule). The
//! registry is built once and then frozen; lookups fall back from a subtype
//! tag to its base tag.

use indexmap::IndexMap;
use tracing::debug;

use crate::error::{ErrorContext, MpnError, RegistrationErrorKind, Result};
use crate::model::ComponentType;

use super::importance::Importance;
use super::profile::SimilarityProfile;
use super::tolerance::ToleranceRule;

/// Importance and comparison rule for one characteristic.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpecRule {
    pub importance: Importance,
    pub rule: ToleranceRule,
}

/// Validated, immutable metadata for one component type.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeMetadata {
    component_type: ComponentType,
    specs: IndexMap<String, SpecRule>,
    default_profile: SimilarityProfile,
}

impl TypeMetadata {
    pub fn builder(component_type: ComponentType) -> TypeMetadataBuilder {
        TypeMetadataBuilder {
            component_type,
            specs: IndexMap::new(),
            default_profile: SimilarityProfile::default(),
        }
    }

    #[must_use]
    pub const fn component_type(&self) -> &ComponentType {
        &self.component_type
    }

    #[must_use]
    pub const fn default_profile(&self) -> SimilarityProfile {
        self.default_profile
    }

    /// Declared specs in declaration order.
    pub fn specs(&self) -> impl Iterator<Item = (&str, &SpecRule)> {
        self.specs.iter().map(|(k, v)| (k.as_str(), v))
    }

    #[must_use]
    pub fn spec(&self, name: &str) -> Option<&SpecRule> {
        self.specs.get(name)
    }

    /// Specs whose absence disqualifies a comparison.
    pub fn critical_specs(&self) -> impl Iterator<Item = &str> {
        self.specs
            .iter()
            .filter(|(_, s)| s.importance.is_mandatory())
            .map(|(k, _)| k.as_str())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.specs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    /// Whether every declared rule scores both directions alike.
    #[must_use]
    pub fn is_symmetric(&self) -> bool {
        self.specs.values().all(|s| s.rule.is_symmetric())
    }
}

/// Builder for [`TypeMetadata`]; `build` validates every rule.
#[derive(Debug, Clone)]
#[must_use]
pub struct TypeMetadataBuilder {
    component_type: ComponentType,
    specs: IndexMap<String, SpecRule>,
    default_profile: SimilarityProfile,
}

impl TypeMetadataBuilder {
    /// Declare a characteristic. Redeclaring a name replaces it in place.
    pub fn spec(mut self, name: impl Into<String>, importance: Importance, rule: ToleranceRule) -> Self {
        self.specs.insert(
            name.into().to_ascii_lowercase(),
            SpecRule { importance, rule },
        );
        self
    }

    pub fn critical(self, name: impl Into<String>, rule: ToleranceRule) -> Self {
        self.spec(name, Importance::Critical, rule)
    }

    pub fn high(self, name: impl Into<String>, rule: ToleranceRule) -> Self {
        self.spec(name, Importance::High, rule)
    }

    pub fn medium(self, name: impl Into<String>, rule: ToleranceRule) -> Self {
        self.spec(name, Importance::Medium, rule)
    }

    pub fn low(self, name: impl Into<String>, rule: ToleranceRule) -> Self {
        self.spec(name, Importance::Low, rule)
    }

    pub fn optional(self, name: impl Into<String>, rule: ToleranceRule) -> Self {
        self.spec(name, Importance::Optional, rule)
    }

    pub fn default_profile(mut self, profile: SimilarityProfile) -> Self {
        self.default_profile = profile;
        self
    }

    pub fn build(self) -> Result<TypeMetadata> {
        let ty = self.component_type;
        if self.specs.is_empty() {
            return Err(MpnError::registration(
                format!("building metadata for {ty}"),
                RegistrationErrorKind::EmptyMetadata(ty.to_string()),
            ));
        }
        for (name, spec) in &self.specs {
            if name.trim().is_empty() {
                return Err(MpnError::invalid_rule(
                    spec.rule.name(),
                    format!("empty spec name in metadata for {ty}"),
                ));
            }
            spec.rule
                .validate()
                .with_context(|| format!("building metadata for {ty}, spec '{name}'"))?;
        }
        Ok(TypeMetadata {
            component_type: ty,
            specs: self.specs,
            default_profile: self.default_profile,
        })
    }
}

/// Frozen registry of type metadata.
#[derive(Debug, Clone, Default)]
pub struct TypeMetadataRegistry {
    entries: IndexMap<ComponentType, TypeMetadata>,
}

impl TypeMetadataRegistry {
    #[must_use]
    pub fn builder() -> TypeMetadataRegistryBuilder {
        TypeMetadataRegistryBuilder::default()
    }

    /// Metadata for `ty`, falling back from a subtype to its base type.
    #[must_use]
    pub fn lookup(&self, ty: &ComponentType) -> Option<&TypeMetadata> {
        self.entries.get(ty).or_else(|| {
            if ty.is_subtype() {
                self.entries.get(&ty.base_tag())
            } else {
                None
            }
        })
    }

    #[must_use]
    pub fn contains(&self, ty: &ComponentType) -> bool {
        self.entries.contains_key(ty)
    }

    pub fn types(&self) -> impl Iterator<Item = &ComponentType> {
        self.entries.keys()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// A builder pre-populated with this registry's entries.
    #[must_use]
    pub fn to_builder(&self) -> TypeMetadataRegistryBuilder {
        TypeMetadataRegistryBuilder {
            entries: self.entries.clone(),
        }
    }
}

/// Builder for [`TypeMetadataRegistry`]. Registration is the only mutation
/// point; the built registry has none.
#[derive(Debug, Clone, Default)]
pub struct TypeMetadataRegistryBuilder {
    entries: IndexMap<ComponentType, TypeMetadata>,
}

impl TypeMetadataRegistryBuilder {
    /// Register `metadata` under `tag`, replacing any earlier registration.
    ///
    /// The metadata must describe the same base type as the tag.
    pub fn register(&mut self, tag: ComponentType, metadata: TypeMetadata) -> Result<&mut Self> {
        if tag.base_type() != metadata.component_type().base_type() {
            return Err(MpnError::registration(
                format!("registering metadata under {tag}"),
                RegistrationErrorKind::TypeMismatch {
                    tag: tag.to_string(),
                    metadata: metadata.component_type().to_string(),
                },
            ));
        }
        if metadata.is_empty() {
            return Err(MpnError::registration(
                format!("registering metadata under {tag}"),
                RegistrationErrorKind::EmptyMetadata(tag.to_string()),
            ));
        }
        if self.entries.insert(tag.clone(), metadata).is_some() {
            debug!(component_type = %tag, "replaced registered type metadata");
        }
        Ok(self)
    }

    #[must_use]
    pub fn build(self) -> TypeMetadataRegistry {
        TypeMetadataRegistry {
            entries: self.entries,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::BaseType;

    fn resistor_metadata() -> TypeMetadata {
        TypeMetadata::builder(ComponentType::of(BaseType::Resistor))
            .critical("resistance", ToleranceRule::percentage_tolerance(1.0))
            .critical("package", ToleranceRule::exact_match())
            .high("tolerance", ToleranceRule::maximum_allowed(5.0))
            .medium("Power", ToleranceRule::minimum_required())
            .build()
            .unwrap()
    }

    #[test]
    fn test_builder_keeps_declaration_order() {
        let metadata = resistor_metadata();
        let names: Vec<_> = metadata.specs().map(|(n, _)| n).collect();
        assert_eq!(names, ["resistance", "package", "tolerance", "power"]);
        assert_eq!(
            metadata.critical_specs().collect::<Vec<_>>(),
            ["resistance", "package"]
        );
        assert!(!metadata.is_symmetric());
    }

    #[test]
    fn test_empty_metadata_rejected() {
        let err = TypeMetadata::builder(ComponentType::of(BaseType::Inductor))
            .build()
            .unwrap_err();
        assert!(matches!(
            err.registration_kind(),
            Some(RegistrationErrorKind::EmptyMetadata(_))
        ));
    }

    #[test]
    fn test_invalid_rule_rejected_at_build() {
        let err = TypeMetadata::builder(ComponentType::of(BaseType::Resistor))
            .critical("resistance", ToleranceRule::percentage_tolerance(-1.0))
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("RESISTOR"));
        assert!(matches!(
            err.registration_kind(),
            Some(RegistrationErrorKind::InvalidRuleParameter { .. })
        ));
    }

    #[test]
    fn test_lookup_falls_back_to_base() {
        let mut builder = TypeMetadataRegistry::builder();
        builder
            .register(ComponentType::of(BaseType::Resistor), resistor_metadata())
            .unwrap();
        let registry = builder.build();

        let sub = ComponentType::sub(BaseType::Resistor, "CHIP_YAGEO");
        assert!(registry.lookup(&sub).is_some());
        assert!(!registry.contains(&sub));
        assert!(registry
            .lookup(&ComponentType::of(BaseType::Capacitor))
            .is_none());
    }

    #[test]
    fn test_subtype_registration_overrides_base() {
        let sub = ComponentType::sub(BaseType::Resistor, "CHIP_VISHAY");
        let precise = TypeMetadata::builder(sub.clone())
            .critical("resistance", ToleranceRule::percentage_tolerance(0.1))
            .build()
            .unwrap();
        let mut builder = TypeMetadataRegistry::builder();
        builder
            .register(ComponentType::of(BaseType::Resistor), resistor_metadata())
            .unwrap()
            .register(sub.clone(), precise)
            .unwrap();
        let registry = builder.build();
        assert_eq!(registry.lookup(&sub).map(TypeMetadata::len), Some(1));
        assert_eq!(
            registry
                .lookup(&ComponentType::sub(BaseType::Resistor, "CHIP_YAGEO"))
                .map(TypeMetadata::len),
            Some(4)
        );
    }

    #[test]
    fn test_mismatched_base_rejected() {
        let mut builder = TypeMetadataRegistry::builder();
        let err = builder
            .register(ComponentType::of(BaseType::Capacitor), resistor_metadata())
            .unwrap_err();
        assert!(matches!(
            err.registration_kind(),
            Some(RegistrationErrorKind::TypeMismatch { .. })
        ));
    }
}
