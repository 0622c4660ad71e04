//! Manufacturer identities.
//!
//! The enum's declaration order is the detection order: the first identity
//! whose pattern matches a normalized part number wins, and
//! [`Manufacturer::Unknown`] closes the list with a match-all pattern.
//! Ordering matters where families share a prefix: Silicon Labs `SI5xxx`
//! clock generators are tested before the Vishay `SIxxxx` MOSFET pattern.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[non_exhaustive]
pub enum Manufacturer {
    Murata,
    Samsung,
    Tdk,
    Kemet,
    Yageo,
    Panasonic,
    SiliconLabs,
    Vishay,
    TexasInstruments,
    StMicro,
    Microchip,
    Infineon,
    OnSemi,
    Nexperia,
    DiodesInc,
    AlphaOmega,
    Unknown,
}

impl Manufacturer {
    /// All identities in detection order.
    pub const ALL: [Self; 17] = [
        Self::Murata,
        Self::Samsung,
        Self::Tdk,
        Self::Kemet,
        Self::Yageo,
        Self::Panasonic,
        Self::SiliconLabs,
        Self::Vishay,
        Self::TexasInstruments,
        Self::StMicro,
        Self::Microchip,
        Self::Infineon,
        Self::OnSemi,
        Self::Nexperia,
        Self::DiodesInc,
        Self::AlphaOmega,
        Self::Unknown,
    ];

    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Murata => "Murata",
            Self::Samsung => "Samsung Electro-Mechanics",
            Self::Tdk => "TDK",
            Self::Kemet => "KEMET",
            Self::Yageo => "Yageo",
            Self::Panasonic => "Panasonic",
            Self::SiliconLabs => "Silicon Labs",
            Self::Vishay => "Vishay",
            Self::TexasInstruments => "Texas Instruments",
            Self::StMicro => "STMicroelectronics",
            Self::Microchip => "Microchip",
            Self::Infineon => "Infineon",
            Self::OnSemi => "onsemi",
            Self::Nexperia => "Nexperia",
            Self::DiodesInc => "Diodes Incorporated",
            Self::AlphaOmega => "Alpha & Omega Semiconductor",
            Self::Unknown => "Unknown",
        }
    }

    /// Detection pattern matched against the normalized part number.
    #[must_use]
    pub const fn pattern(self) -> &'static str {
        match self {
            Self::Murata => r"^(GRM|GCM|GJM|GRT|LQ[GHMW]|BLM)",
            Self::Samsung => r"^CL[0-9]{2}[A-Z]",
            Self::Tdk => r"^(C(1005|1608|2012|3216|3225|4532)[A-Z]|MLZ|VLS)",
            Self::Kemet => r"^(C(0402|0603|0805|1206|1210)C|T49[0-9])",
            Self::Yageo => r"^(RC[0-9]{4}|CC[0-9]{4})",
            Self::Panasonic => r"^(ERJ|EEE|EEU|ECA|EEH)",
            Self::SiliconLabs => r"^(SI5[0-9]{3}|EFM8|EFM32|EFR32|CP210)",
            Self::Vishay => r"^(CRCW|TNPW|SI[0-9]{4}|SI[RS][0-9]{3}|SS[0-9]{2})",
            Self::TexasInstruments => {
                r"^(SN74|CD74|CD4|TPS|LM|UA78|UA79|OPA|TL0|TLV|INA|MSP430|DRV)"
            }
            Self::StMicro => r"^(STM32|STM8|L78|L79|LD1117|STP[0-9]{2}|STD[0-9]{2})",
            Self::Microchip => r"^(PIC|ATMEGA|ATTINY|ATSAM|MCP[0-9]|24LC|25LC|AT24)",
            Self::Infineon => r"^(IRF|IRL|IPB|IPD|IPP|BSC|BSZ|BSS1|BSS8|XMC|TLE)",
            Self::OnSemi => r"^(MC7|MC3|MMBT|MJE|MJD|FDN|FDS|FQP|NTR|NTD|MBR|NCP)",
            Self::Nexperia => r"^(BC[0-9]{3}|PMV|PMEG|BUK|BAS|BAV|BAT54|74(HC|HCT|LVC|AHC|LV))",
            Self::DiodesInc => r"^(DMG|DMN|DMP|AP2|AP7|AZ1117)",
            Self::AlphaOmega => r"^AO[0-9]{4}",
            Self::Unknown => r"^",
        }
    }

    #[must_use]
    pub const fn is_unknown(self) -> bool {
        matches!(self, Self::Unknown)
    }
}

impl fmt::Display for Manufacturer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_is_last() {
        assert_eq!(Manufacturer::ALL.last(), Some(&Manufacturer::Unknown));
        assert_eq!(
            Manufacturer::ALL.iter().filter(|m| m.is_unknown()).count(),
            1
        );
    }

    #[test]
    fn test_all_is_declaration_order() {
        let mut sorted = Manufacturer::ALL;
        sorted.sort();
        assert_eq!(sorted, Manufacturer::ALL);
    }

    #[test]
    fn test_patterns_compile() {
        for m in Manufacturer::ALL {
            assert!(regex::Regex::new(m.pattern()).is_ok(), "{m:?}");
        }
    }
}
