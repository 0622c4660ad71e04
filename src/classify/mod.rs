//! Manufacturer and component-type classification.
//!
//! Classification is a pure function of the normalized part number:
//!
//! 1. The [`ManufacturerDetector`] walks its entries in declaration order and
//!    the first matching pattern names the manufacturer.
//! 2. The manufacturer's handler checks its supported types in preference
//!    order, answering itself or deferring to the [`PatternRegistry`]
//!    restricted to that manufacturer's patterns.
//! 3. When the handler recognizes nothing, the generic patterns owned by
//!    `Unknown` are consulted.
//!
//! Among matching types the first subtype is preferred over a base type.
//! Empty and unrecognized input resolve to `Unknown` / `None`, never a panic.

mod detector;
mod handlers;
mod patterns;

pub use detector::{DetectorEntry, ManufacturerDetector, ManufacturerDetectorBuilder};
pub use handlers::{HandlerFactory, ManufacturerHandler, TableHandler, TypePatterns};
pub use patterns::{Pattern, PatternRegistry, PatternRegistryBuilder};

use serde::Serialize;

use crate::error::{ErrorContext, Result};
use crate::model::{ComponentType, Manufacturer, PartNumber};

/// A part number with its classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassifiedPart {
    pub mpn: PartNumber,
    pub manufacturer: Manufacturer,
    pub component_type: Option<ComponentType>,
}

/// Frozen classifier combining the detector and the shared pattern registry.
#[derive(Debug, Clone)]
pub struct PartClassifier {
    detector: ManufacturerDetector,
    patterns: PatternRegistry,
}

impl PartClassifier {
    /// The built-in classifier.
    pub fn builtin() -> Result<Self> {
        let detector = ManufacturerDetector::builtin().context("building manufacturer detector")?;
        Self::from_detector(detector)
    }

    /// A classifier whose pattern registry is populated from the detector's handlers.
    pub fn from_detector(detector: ManufacturerDetector) -> Result<Self> {
        let mut builder = PatternRegistry::builder();
        for entry in detector.entries() {
            entry
                .handler()
                .register_patterns(&mut builder)
                .with_context(|| format!("registering {} patterns", entry.manufacturer()))?;
        }
        Ok(Self::new(detector, builder.build()))
    }

    #[must_use]
    pub const fn new(detector: ManufacturerDetector, patterns: PatternRegistry) -> Self {
        Self { detector, patterns }
    }

    #[must_use]
    pub const fn detector(&self) -> &ManufacturerDetector {
        &self.detector
    }

    #[must_use]
    pub const fn patterns(&self) -> &PatternRegistry {
        &self.patterns
    }

    #[must_use]
    pub fn classify_manufacturer(&self, mpn: &PartNumber) -> Manufacturer {
        self.detector.detect(mpn)
    }

    /// Resolve the component type of `mpn` as made by `manufacturer`.
    #[must_use]
    pub fn classify_type(&self, mpn: &PartNumber, manufacturer: Manufacturer) -> Option<ComponentType> {
        if mpn.is_empty() {
            return None;
        }
        let handler = self.detector.entry(manufacturer).handler();
        let owner = handler.manufacturer();
        let matched: Vec<ComponentType> = handler
            .supported_types()
            .into_iter()
            .filter(|ty| {
                handler
                    .matches(mpn, ty)
                    .unwrap_or_else(|| self.patterns.matches_for(mpn, ty, owner))
            })
            .collect();

        let matched = if matched.is_empty() && !owner.is_unknown() {
            self.patterns.types_matching_for(mpn, Manufacturer::Unknown)
        } else {
            matched
        };
        prefer_subtype(matched)
    }

    /// Classify manufacturer and type in one step.
    #[must_use]
    pub fn classify(&self, mpn: &PartNumber) -> ClassifiedPart {
        let manufacturer = self.classify_manufacturer(mpn);
        ClassifiedPart {
            mpn: mpn.clone(),
            manufacturer,
            component_type: self.classify_type(mpn, manufacturer),
        }
    }
}

fn prefer_subtype(mut matched: Vec<ComponentType>) -> Option<ComponentType> {
    match matched.iter().position(ComponentType::is_subtype) {
        Some(i) => Some(matched.swap_remove(i)),
        None => matched.into_iter().next(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::BaseType;

    fn classify(raw: &str) -> ClassifiedPart {
        PartClassifier::builtin()
            .unwrap()
            .classify(&PartNumber::normalize(raw))
    }

    fn type_of(raw: &str) -> Option<String> {
        classify(raw).component_type.map(|t| t.to_string())
    }

    #[test]
    fn test_subtype_preferred_over_base() {
        // GRM parts match both the Murata MLCC subtype and the plain CAPACITOR pattern
        assert_eq!(
            type_of("GRM188R71H104KA93D").as_deref(),
            Some("CAPACITOR_CERAMIC_MURATA")
        );
        assert_eq!(type_of("GRM").as_deref(), Some("CAPACITOR"));
    }

    #[test]
    fn test_manufacturer_specific_types() {
        assert_eq!(type_of("RC0603FR-0710KL").as_deref(), Some("RESISTOR_CHIP_YAGEO"));
        assert_eq!(type_of("T491A106K016AT").as_deref(), Some("CAPACITOR_TANTALUM_KEMET"));
        assert_eq!(type_of("LM7805CT").as_deref(), Some("VOLTAGE_REGULATOR_LINEAR_TI"));
        assert_eq!(type_of("TLV1117-33").as_deref(), Some("VOLTAGE_REGULATOR_LINEAR_TI"));
        assert_eq!(type_of("LM358DR").as_deref(), Some("OPAMP_TI"));
        assert_eq!(type_of("74HC595D").as_deref(), Some("LOGIC_IC_NEXPERIA"));
        assert_eq!(type_of("SI2302CDS-T1-GE3").as_deref(), Some("MOSFET_VISHAY"));
    }

    #[test]
    fn test_generic_patterns_after_handler() {
        assert_eq!(type_of("2N7002").as_deref(), Some("MOSFET"));
        assert_eq!(type_of("1N4148").as_deref(), Some("DIODE"));
        assert_eq!(type_of("2N3904").as_deref(), Some("BJT"));
        assert_eq!(type_of("AMS1117-3.3").as_deref(), Some("VOLTAGE_REGULATOR"));
        // onsemi owns the MC7 prefix but has no logic table
        let part = classify("MC74HC00AN");
        assert_eq!(part.manufacturer, Manufacturer::OnSemi);
        assert_eq!(
            part.component_type,
            Some(ComponentType::of(BaseType::LogicIc))
        );
    }

    #[test]
    fn test_handler_override_rejects_lookalike() {
        let part = classify("SI7021-A20");
        assert_eq!(part.manufacturer, Manufacturer::Vishay);
        assert_eq!(part.component_type, None);
    }

    #[test]
    fn test_unclassified_inputs() {
        assert_eq!(classify("").component_type, None);
        assert_eq!(classify("").manufacturer, Manufacturer::Unknown);
        assert_eq!(classify("XYZ-123").component_type, None);
        assert_eq!(classify("SI5351A-B-GT").component_type, None);
    }

    #[test]
    fn test_classification_is_deterministic() {
        let classifier = PartClassifier::builtin().unwrap();
        let mpn = PartNumber::normalize("CL10B104KB8NNNC");
        let first = classifier.classify(&mpn);
        for _ in 0..10 {
            assert_eq!(classifier.classify(&mpn), first);
        }
    }

    #[test]
    fn test_prefer_subtype_helper() {
        let base = ComponentType::of(BaseType::Capacitor);
        let sub = ComponentType::sub(BaseType::Capacitor, "CERAMIC_TDK");
        assert_eq!(prefer_subtype(vec![base.clone(), sub.clone()]), Some(sub));
        assert_eq!(prefer_subtype(vec![base.clone()]), Some(base));
        assert_eq!(prefer_subtype(Vec::new()), None);
    }
}
