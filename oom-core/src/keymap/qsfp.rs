//! QSFP+ / QSFP28 key map (SFF-8636)

use super::KeyDef;
use crate::decode::{Decoder, Encoder};
use crate::types::MemoryLocation;

pub(super) const MMAP: &[KeyDef] = &[
    // Lower memory
    ("IDENTIFIER", Decoder::UInt, false, MemoryLocation::a0(0, 1)),
    ("STATUS", Decoder::Hex, true, MemoryLocation::a0(1, 2)),
    ("TEMPERATURE", Decoder::Temperature, true, MemoryLocation::a0(22, 2)),
    ("SUPPLY_VOLTAGE", Decoder::Voltage, true, MemoryLocation::a0(26, 2)),
    ("RX1_POWER", Decoder::Power, true, MemoryLocation::a0(34, 2)),
    ("RX2_POWER", Decoder::Power, true, MemoryLocation::a0(36, 2)),
    ("RX3_POWER", Decoder::Power, true, MemoryLocation::a0(38, 2)),
    ("RX4_POWER", Decoder::Power, true, MemoryLocation::a0(40, 2)),
    ("TX1_BIAS", Decoder::Bias, true, MemoryLocation::a0(42, 2)),
    ("TX2_BIAS", Decoder::Bias, true, MemoryLocation::a0(44, 2)),
    ("TX3_BIAS", Decoder::Bias, true, MemoryLocation::a0(46, 2)),
    ("TX4_BIAS", Decoder::Bias, true, MemoryLocation::a0(48, 2)),
    ("TX_DISABLE", Decoder::UInt, true, MemoryLocation::a0(86, 1)),
    ("POWER_CONTROL", Decoder::UInt, true, MemoryLocation::a0(93, 1)),
    // Upper page 0: serial ID
    ("EXT_IDENTIFIER", Decoder::UInt, false, MemoryLocation::paged(0, 129, 1)),
    ("CONNECTOR", Decoder::UInt, false, MemoryLocation::paged(0, 130, 1)),
    ("SPEC_COMPLIANCE", Decoder::Hex, false, MemoryLocation::paged(0, 131, 8)),
    ("ENCODING", Decoder::UInt, false, MemoryLocation::paged(0, 139, 1)),
    ("BR_NOMINAL", Decoder::UInt, false, MemoryLocation::paged(0, 140, 1)),
    ("VENDOR_NAME", Decoder::Ascii, false, MemoryLocation::paged(0, 148, 16)),
    ("VENDOR_OUI", Decoder::Hex, false, MemoryLocation::paged(0, 165, 3)),
    ("VENDOR_PN", Decoder::Ascii, false, MemoryLocation::paged(0, 168, 16)),
    ("VENDOR_REV", Decoder::Ascii, false, MemoryLocation::paged(0, 184, 2)),
    ("WAVELENGTH", Decoder::UInt, false, MemoryLocation::paged(0, 186, 2)),
    ("CC_BASE", Decoder::UInt, false, MemoryLocation::paged(0, 191, 1)),
    ("VENDOR_SN", Decoder::Ascii, false, MemoryLocation::paged(0, 196, 16)),
    ("DATE_CODE", Decoder::DateCode, false, MemoryLocation::paged(0, 212, 8)),
    ("CC_EXT", Decoder::UInt, false, MemoryLocation::paged(0, 223, 1)),
    // Upper page 2: user EEPROM
    ("USER_EEPROM", Decoder::Hex, false, MemoryLocation::paged(2, 128, 128)),
];

pub(super) const FMAP: &[(&str, &[&str])] = &[
    (
        "SERIAL_ID",
        &[
            "IDENTIFIER",
            "EXT_IDENTIFIER",
            "CONNECTOR",
            "SPEC_COMPLIANCE",
            "ENCODING",
            "BR_NOMINAL",
            "VENDOR_NAME",
            "VENDOR_OUI",
            "VENDOR_PN",
            "VENDOR_REV",
            "WAVELENGTH",
            "VENDOR_SN",
            "DATE_CODE",
        ],
    ),
    (
        "DOM",
        &[
            "TEMPERATURE",
            "SUPPLY_VOLTAGE",
            "RX1_POWER",
            "RX2_POWER",
            "RX3_POWER",
            "RX4_POWER",
            "TX1_BIAS",
            "TX2_BIAS",
            "TX3_BIAS",
            "TX4_BIAS",
        ],
    ),
    (
        "VENDOR",
        &["VENDOR_NAME", "VENDOR_OUI", "VENDOR_PN", "VENDOR_REV", "VENDOR_SN"],
    ),
];

pub(super) const WMAP: &[(&str, Encoder)] = &[
    ("TX_DISABLE", Encoder::UInt),
    ("POWER_CONTROL", Encoder::UInt),
    ("USER_EEPROM", Encoder::Hex),
];
