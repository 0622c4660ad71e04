//! Ordered manufacturer detection.

use regex::Regex;
use std::collections::HashSet;

use crate::error::{MpnError, RegistrationErrorKind, Result};
use crate::model::{Manufacturer, PartNumber};

use super::handlers::{HandlerFactory, ManufacturerHandler};

/// One detection entry: identity, compiled pattern and handler factory.
#[derive(Debug, Clone)]
pub struct DetectorEntry {
    manufacturer: Manufacturer,
    pattern: Regex,
    factory: HandlerFactory,
}

impl DetectorEntry {
    #[must_use]
    pub const fn manufacturer(&self) -> Manufacturer {
        self.manufacturer
    }

    #[must_use]
    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    /// A fresh handler for this entry's manufacturer.
    #[must_use]
    pub fn handler(&self) -> Box<dyn ManufacturerHandler> {
        (self.factory)()
    }
}

/// Frozen, ordered manufacturer detector. The first matching entry wins and
/// the catch-all `Unknown` entry always closes the list.
#[derive(Debug, Clone)]
pub struct ManufacturerDetector {
    entries: Vec<DetectorEntry>,
    catch_all: DetectorEntry,
}

impl ManufacturerDetector {
    /// The built-in detector, in [`Manufacturer::ALL`] order.
    pub fn builtin() -> Result<Self> {
        Manufacturer::ALL
            .into_iter()
            .fold(Self::builder(), |builder, m| {
                builder.entry(m, m.pattern(), m.handler_factory())
            })
            .build()
    }

    #[must_use]
    pub fn builder() -> ManufacturerDetectorBuilder {
        ManufacturerDetectorBuilder::default()
    }

    /// The entry whose pattern matches first, or the catch-all.
    #[must_use]
    pub fn entry_for(&self, mpn: &PartNumber) -> &DetectorEntry {
        if mpn.is_empty() {
            return &self.catch_all;
        }
        self.entries
            .iter()
            .find(|e| e.pattern.is_match(mpn.as_str()))
            .unwrap_or(&self.catch_all)
    }

    #[must_use]
    pub fn detect(&self, mpn: &PartNumber) -> Manufacturer {
        self.entry_for(mpn).manufacturer
    }

    /// Entry for a given manufacturer; unknown identities map to the catch-all.
    #[must_use]
    pub fn entry(&self, manufacturer: Manufacturer) -> &DetectorEntry {
        self.entries
            .iter()
            .find(|e| e.manufacturer == manufacturer)
            .unwrap_or(&self.catch_all)
    }

    /// All entries in detection order, catch-all last.
    pub fn entries(&self) -> impl Iterator<Item = &DetectorEntry> {
        self.entries.iter().chain(std::iter::once(&self.catch_all))
    }

    pub fn manufacturers(&self) -> impl Iterator<Item = Manufacturer> + '_ {
        self.entries().map(|e| e.manufacturer)
    }
}

/// Builder for [`ManufacturerDetector`].
#[derive(Debug, Default)]
#[must_use]
pub struct ManufacturerDetectorBuilder {
    entries: Vec<(Manufacturer, String, HandlerFactory)>,
}

impl ManufacturerDetectorBuilder {
    /// Append an entry. Order of calls is detection order.
    pub fn entry(
        mut self,
        manufacturer: Manufacturer,
        pattern: impl Into<String>,
        factory: HandlerFactory,
    ) -> Self {
        self.entries.push((manufacturer, pattern.into(), factory));
        self
    }

    /// Compile patterns and freeze the detector.
    ///
    /// A catch-all `Unknown` entry is appended when missing. An `Unknown`
    /// entry anywhere but last would shadow every later entry and is rejected,
    /// as are duplicate manufacturers and invalid patterns.
    pub fn build(self) -> Result<ManufacturerDetector> {
        let mut seen = HashSet::new();
        let mut entries = Vec::with_capacity(self.entries.len());
        let mut catch_all = None;

        for (manufacturer, pattern, factory) in self.entries {
            if catch_all.is_some() {
                return Err(MpnError::registration(
                    format!("registering {manufacturer} after the catch-all entry"),
                    RegistrationErrorKind::CatchAllNotLast,
                ));
            }
            if !seen.insert(manufacturer) {
                return Err(MpnError::registration(
                    "building manufacturer detector",
                    RegistrationErrorKind::DuplicateManufacturer(manufacturer.to_string()),
                ));
            }
            let entry = DetectorEntry {
                manufacturer,
                pattern: compile(manufacturer, &pattern)?,
                factory,
            };
            if manufacturer.is_unknown() {
                catch_all = Some(entry);
            } else {
                entries.push(entry);
            }
        }

        let catch_all = match catch_all {
            Some(entry) => entry,
            None => DetectorEntry {
                manufacturer: Manufacturer::Unknown,
                pattern: compile(Manufacturer::Unknown, Manufacturer::Unknown.pattern())?,
                factory: Manufacturer::Unknown.handler_factory(),
            },
        };

        Ok(ManufacturerDetector { entries, catch_all })
    }
}

fn compile(manufacturer: Manufacturer, pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|e| {
        MpnError::registration(
            format!("compiling detection pattern for {manufacturer}"),
            RegistrationErrorKind::InvalidPattern {
                pattern: pattern.to_string(),
                message: e.to_string(),
            },
        )
    })
}
