//! Manufacturer handlers and their built-in type pattern tables.
//!
//! A handler is stateless: it names its manufacturer, lists the types it can
//! recognize in preference order, and may answer a type check itself. When it
//! defers (`matches` returns `None`) the shared [`PatternRegistry`] is asked,
//! restricted to the patterns this handler registered.
//!
//! The tables below are representative, not exhaustive. Part families a
//! handler cannot decode are left unclassified rather than claimed.

use crate::error::Result;
use crate::model::{BaseType, ComponentType, Manufacturer, PartNumber};

use super::patterns::PatternRegistryBuilder;

/// Patterns recognizing one component type.
#[derive(Debug, Clone)]
pub struct TypePatterns {
    pub component_type: ComponentType,
    pub patterns: &'static [&'static str],
}

impl TypePatterns {
    #[must_use]
    pub const fn new(component_type: ComponentType, patterns: &'static [&'static str]) -> Self {
        Self {
            component_type,
            patterns,
        }
    }
}

/// Manufacturer-specific type recognition.
pub trait ManufacturerHandler: Send + Sync {
    /// The manufacturer this handler speaks for.
    fn manufacturer(&self) -> Manufacturer;

    /// Type patterns in preference order.
    fn type_patterns(&self) -> &'static [TypePatterns];

    /// Types this handler can recognize, in preference order.
    fn supported_types(&self) -> Vec<ComponentType> {
        self.type_patterns()
            .iter()
            .map(|tp| tp.component_type.clone())
            .collect()
    }

    /// Answer a type check directly, or `None` to defer to the registry.
    fn matches(&self, _mpn: &PartNumber, _ty: &ComponentType) -> Option<bool> {
        None
    }

    /// Register this handler's patterns, owned by its manufacturer.
    fn register_patterns(&self, builder: &mut PatternRegistryBuilder) -> Result<()> {
        for tp in self.type_patterns() {
            for pattern in tp.patterns {
                builder.add_regex(self.manufacturer(), tp.component_type.clone(), pattern)?;
            }
        }
        Ok(())
    }
}

/// Constructs a fresh handler.
pub type HandlerFactory = fn() -> Box<dyn ManufacturerHandler>;

/// Handler driven entirely by a static pattern table.
#[derive(Debug, Clone, Copy)]
pub struct TableHandler {
    manufacturer: Manufacturer,
    table: &'static [TypePatterns],
}

impl TableHandler {
    #[must_use]
    pub const fn new(manufacturer: Manufacturer, table: &'static [TypePatterns]) -> Self {
        Self {
            manufacturer,
            table,
        }
    }
}

impl ManufacturerHandler for TableHandler {
    fn manufacturer(&self) -> Manufacturer {
        self.manufacturer
    }

    fn type_patterns(&self) -> &'static [TypePatterns] {
        self.table
    }
}

const VISHAY_MOSFET: ComponentType = ComponentType::sub(BaseType::Mosfet, "VISHAY");

/// Vishay shares the `SIxxxx` prefix with non-MOSFET parts (`SI7021-A20`).
/// Siliconix MOSFET numbers always continue with a revision or package letter.
struct VishayHandler;

impl ManufacturerHandler for VishayHandler {
    fn manufacturer(&self) -> Manufacturer {
        Manufacturer::Vishay
    }

    fn type_patterns(&self) -> &'static [TypePatterns] {
        VISHAY
    }

    fn matches(&self, mpn: &PartNumber, ty: &ComponentType) -> Option<bool> {
        if *ty != VISHAY_MOSFET {
            return None;
        }
        let rest = mpn.as_str().strip_prefix("SI")?;
        let rest = rest.strip_prefix(['R', 'S']).unwrap_or(rest);
        let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
        let next = rest.as_bytes().get(digits);
        Some(digits >= 3 && next.is_some_and(u8::is_ascii_uppercase))
    }
}

impl Manufacturer {
    /// Factory for this manufacturer's handler.
    #[must_use]
    pub fn handler_factory(self) -> HandlerFactory {
        match self {
            Self::Murata => murata,
            Self::Samsung => samsung,
            Self::Tdk => tdk,
            Self::Kemet => kemet,
            Self::Yageo => yageo,
            Self::Panasonic => panasonic,
            Self::SiliconLabs => silicon_labs,
            Self::Vishay => vishay,
            Self::TexasInstruments => texas_instruments,
            Self::StMicro => st_micro,
            Self::Microchip => microchip,
            Self::Infineon => infineon,
            Self::OnSemi => on_semi,
            Self::Nexperia => nexperia,
            Self::DiodesInc => diodes_inc,
            Self::AlphaOmega => alpha_omega,
            Self::Unknown => generic,
        }
    }
}

fn murata() -> Box<dyn ManufacturerHandler> {
    Box::new(TableHandler::new(Manufacturer::Murata, MURATA))
}
fn samsung() -> Box<dyn ManufacturerHandler> {
    Box::new(TableHandler::new(Manufacturer::Samsung, SAMSUNG))
}
fn tdk() -> Box<dyn ManufacturerHandler> {
    Box::new(TableHandler::new(Manufacturer::Tdk, TDK))
}
fn kemet() -> Box<dyn ManufacturerHandler> {
    Box::new(TableHandler::new(Manufacturer::Kemet, KEMET))
}
fn yageo() -> Box<dyn ManufacturerHandler> {
    Box::new(TableHandler::new(Manufacturer::Yageo, YAGEO))
}
fn panasonic() -> Box<dyn ManufacturerHandler> {
    Box::new(TableHandler::new(Manufacturer::Panasonic, PANASONIC))
}
fn silicon_labs() -> Box<dyn ManufacturerHandler> {
    Box::new(TableHandler::new(Manufacturer::SiliconLabs, SILICON_LABS))
}
fn vishay() -> Box<dyn ManufacturerHandler> {
    Box::new(VishayHandler)
}
fn texas_instruments() -> Box<dyn ManufacturerHandler> {
    Box::new(TableHandler::new(Manufacturer::TexasInstruments, TEXAS_INSTRUMENTS))
}
fn st_micro() -> Box<dyn ManufacturerHandler> {
    Box::new(TableHandler::new(Manufacturer::StMicro, ST_MICRO))
}
fn microchip() -> Box<dyn ManufacturerHandler> {
    Box::new(TableHandler::new(Manufacturer::Microchip, MICROCHIP))
}
fn infineon() -> Box<dyn ManufacturerHandler> {
    Box::new(TableHandler::new(Manufacturer::Infineon, INFINEON))
}
fn on_semi() -> Box<dyn ManufacturerHandler> {
    Box::new(TableHandler::new(Manufacturer::OnSemi, ON_SEMI))
}
fn nexperia() -> Box<dyn ManufacturerHandler> {
    Box::new(TableHandler::new(Manufacturer::Nexperia, NEXPERIA))
}
fn diodes_inc() -> Box<dyn ManufacturerHandler> {
    Box::new(TableHandler::new(Manufacturer::DiodesInc, DIODES_INC))
}
fn alpha_omega() -> Box<dyn ManufacturerHandler> {
    Box::new(TableHandler::new(Manufacturer::AlphaOmega, ALPHA_OMEGA))
}
fn generic() -> Box<dyn ManufacturerHandler> {
    Box::new(TableHandler::new(Manufacturer::Unknown, GENERIC))
}

// ============================================================================
// Built-in pattern tables
// ============================================================================

static MURATA: &[TypePatterns] = &[
    TypePatterns::new(
        ComponentType::sub(BaseType::Capacitor, "CERAMIC_MURATA"),
        &[r"^(G[RCJ]M|GRT)[0-9]{3}"],
    ),
    TypePatterns::new(
        ComponentType::of(BaseType::Capacitor),
        &[r"^(G[RCJ]M|GRT)"],
    ),
    TypePatterns::new(
        ComponentType::sub(BaseType::Inductor, "MURATA"),
        &[r"^LQ[GHMW]"],
    ),
    TypePatterns::new(ComponentType::of(BaseType::Inductor), &[r"^BLM"]),
];

static SAMSUNG: &[TypePatterns] = &[TypePatterns::new(
    ComponentType::sub(BaseType::Capacitor, "CERAMIC_SAMSUNG"),
    &[r"^CL[0-9]{2}[A-Z]"],
)];

static TDK: &[TypePatterns] = &[
    TypePatterns::new(
        ComponentType::sub(BaseType::Capacitor, "CERAMIC_TDK"),
        &[r"^C(1005|1608|2012|3216|3225|4532)[A-Z0-9]"],
    ),
    TypePatterns::new(
        ComponentType::sub(BaseType::Inductor, "TDK"),
        &[r"^(MLZ|VLS)"],
    ),
];

static KEMET: &[TypePatterns] = &[
    TypePatterns::new(
        ComponentType::sub(BaseType::Capacitor, "CERAMIC_KEMET"),
        &[r"^C(0402|0603|0805|1206|1210)C"],
    ),
    TypePatterns::new(
        ComponentType::sub(BaseType::Capacitor, "TANTALUM_KEMET"),
        &[r"^T49[0-9][A-Z]"],
    ),
];

static YAGEO: &[TypePatterns] = &[
    TypePatterns::new(
        ComponentType::sub(BaseType::Resistor, "CHIP_YAGEO"),
        &[r"^RC[0-9]{4}"],
    ),
    TypePatterns::new(
        ComponentType::sub(BaseType::Capacitor, "CERAMIC_YAGEO"),
        &[r"^CC[0-9]{4}"],
    ),
];

static PANASONIC: &[TypePatterns] = &[
    TypePatterns::new(
        ComponentType::sub(BaseType::Resistor, "CHIP_PANASONIC"),
        &[r"^ERJ"],
    ),
    TypePatterns::new(
        ComponentType::sub(BaseType::Capacitor, "ELECTROLYTIC_PANASONIC"),
        &[r"^(EEE|EEU|ECA|EEH)"],
    ),
];

static SILICON_LABS: &[TypePatterns] = &[TypePatterns::new(
    ComponentType::sub(BaseType::Microcontroller, "SILABS"),
    &[r"^(EFM8|EFM32|EFR32)"],
)];

static VISHAY: &[TypePatterns] = &[
    TypePatterns::new(
        ComponentType::sub(BaseType::Resistor, "CHIP_VISHAY"),
        &[r"^(CRCW|TNPW)"],
    ),
    TypePatterns::new(VISHAY_MOSFET, &[r"^SI[0-9]{4}", r"^SI[RS][0-9]{3}"]),
    TypePatterns::new(
        ComponentType::sub(BaseType::Diode, "VISHAY"),
        &[r"^SS[0-9]{2}"],
    ),
];

static TEXAS_INSTRUMENTS: &[TypePatterns] = &[
    TypePatterns::new(
        ComponentType::sub(BaseType::VoltageRegulator, "LINEAR_TI"),
        &[r"^(LM78|LM79|UA78|UA79|LM1117|LM317|LM337|TLV1117)"],
    ),
    TypePatterns::new(
        ComponentType::sub(BaseType::VoltageRegulator, "SWITCHING_TI"),
        &[r"^(TPS5|TPS6|LM25|LM26)"],
    ),
    TypePatterns::new(
        ComponentType::sub(BaseType::OpAmp, "TI"),
        &[r"^(OPA[0-9]|TL0[678][0-9]|TLV[0-9]|LM(358|324|741|833))"],
    ),
    TypePatterns::new(
        ComponentType::sub(BaseType::LogicIc, "TI"),
        &[r"^(SN74|CD74)"],
    ),
    TypePatterns::new(
        ComponentType::sub(BaseType::Microcontroller, "TI"),
        &[r"^MSP430"],
    ),
];

static ST_MICRO: &[TypePatterns] = &[
    TypePatterns::new(
        ComponentType::sub(BaseType::Microcontroller, "ST"),
        &[r"^(STM32|STM8)"],
    ),
    TypePatterns::new(
        ComponentType::sub(BaseType::VoltageRegulator, "LINEAR_ST"),
        &[r"^(L78|L79|LD1117)"],
    ),
    TypePatterns::new(
        ComponentType::sub(BaseType::Mosfet, "ST"),
        &[r"^(STP|STD)[0-9]{2}N"],
    ),
];

static MICROCHIP: &[TypePatterns] = &[
    TypePatterns::new(
        ComponentType::sub(BaseType::Microcontroller, "MICROCHIP"),
        &[r"^(PIC|ATMEGA|ATTINY|ATSAM)"],
    ),
    TypePatterns::new(
        ComponentType::sub(BaseType::Memory, "MICROCHIP"),
        &[r"^(24LC|25LC|AT24)"],
    ),
    TypePatterns::new(
        ComponentType::sub(BaseType::OpAmp, "MICROCHIP"),
        &[r"^MCP60[0-9]"],
    ),
];

static INFINEON: &[TypePatterns] = &[
    TypePatterns::new(
        ComponentType::sub(BaseType::Mosfet, "INFINEON"),
        &[r"^(IRF|IRL|IPB|IPD|IPP|BSC|BSZ|BSS1|BSS8)"],
    ),
    TypePatterns::new(
        ComponentType::sub(BaseType::Microcontroller, "INFINEON"),
        &[r"^XMC"],
    ),
];

static ON_SEMI: &[TypePatterns] = &[
    TypePatterns::new(
        ComponentType::sub(BaseType::Mosfet, "ONSEMI"),
        &[r"^(FDN|FDS|FQP|NTR|NTD)"],
    ),
    TypePatterns::new(
        ComponentType::sub(BaseType::Bjt, "ONSEMI"),
        &[r"^(MMBT|MJE|MJD)"],
    ),
    TypePatterns::new(
        ComponentType::sub(BaseType::Diode, "ONSEMI"),
        &[r"^MBR"],
    ),
    TypePatterns::new(
        ComponentType::sub(BaseType::VoltageRegulator, "LINEAR_ONSEMI"),
        &[r"^(MC78|MC79|NCP1117)"],
    ),
];

static NEXPERIA: &[TypePatterns] = &[
    TypePatterns::new(
        ComponentType::sub(BaseType::Bjt, "NEXPERIA"),
        &[r"^BC[0-9]{3}"],
    ),
    TypePatterns::new(
        ComponentType::sub(BaseType::Mosfet, "NEXPERIA"),
        &[r"^(PMV|BUK)"],
    ),
    TypePatterns::new(
        ComponentType::sub(BaseType::Diode, "NEXPERIA"),
        &[r"^(PMEG|BAS|BAV|BAT54)"],
    ),
    TypePatterns::new(
        ComponentType::sub(BaseType::LogicIc, "NEXPERIA"),
        &[r"^74(HC|HCT|LVC|AHC|LV)"],
    ),
];

static DIODES_INC: &[TypePatterns] = &[
    TypePatterns::new(
        ComponentType::sub(BaseType::Mosfet, "DIODES"),
        &[r"^(DMG|DMN|DMP)"],
    ),
    TypePatterns::new(
        ComponentType::sub(BaseType::VoltageRegulator, "LINEAR_DIODES"),
        &[r"^AZ1117"],
    ),
];

static ALPHA_OMEGA: &[TypePatterns] = &[TypePatterns::new(
    ComponentType::sub(BaseType::Mosfet, "AOS"),
    &[r"^AO[0-9]{4}"],
)];

/// Manufacturer-independent patterns, owned by `Unknown` and consulted when
/// the detected manufacturer's handler recognizes nothing.
static GENERIC: &[TypePatterns] = &[
    TypePatterns::new(
        ComponentType::of(BaseType::Mosfet),
        &[r"^(2N700[02]|BS170|BSS138|BSS84|IRF[0-9]|IRLZ?[0-9])"],
    ),
    TypePatterns::new(
        ComponentType::of(BaseType::Bjt),
        &[r"^(2N[2-6][0-9]{3}|PN2222|MPSA|TIP[0-9])"],
    ),
    TypePatterns::new(
        ComponentType::of(BaseType::Diode),
        &[r"^(1N[0-9]{3,4}|SS[0-9]{2}|BAT54|BAS16)"],
    ),
    TypePatterns::new(
        ComponentType::of(BaseType::VoltageRegulator),
        &[
            r"^(LM|UA|MC|KA|L|NCV)?7[89](L|M)?[0-9]{2}",
            r"^(AMS|LM|AZ|LD|NCP)1117",
            r"^LM3[13]7",
        ],
    ),
    TypePatterns::new(
        ComponentType::of(BaseType::LogicIc),
        &[r"^(SN|CD|MC)?74[A-Z]{0,5}[0-9]{2,4}"],
    ),
    TypePatterns::new(
        ComponentType::of(BaseType::OpAmp),
        &[r"^(LM|NE|TL|MC|UA)(358|324|741|5532|072|071|082)"],
    ),
];
