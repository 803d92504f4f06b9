//! SFP / SFP+ key map (SFF-8472)

use super::KeyDef;
use crate::decode::{Decoder, Encoder};
use crate::types::MemoryLocation;

pub(super) const MMAP: &[KeyDef] = &[
    // A0: serial ID
    ("IDENTIFIER", Decoder::UInt, false, MemoryLocation::a0(0, 1)),
    ("EXT_IDENTIFIER", Decoder::UInt, false, MemoryLocation::a0(1, 1)),
    ("CONNECTOR", Decoder::UInt, false, MemoryLocation::a0(2, 1)),
    ("TRANSCEIVER", Decoder::Hex, false, MemoryLocation::a0(3, 8)),
    ("ENCODING", Decoder::UInt, false, MemoryLocation::a0(11, 1)),
    ("BR_NOMINAL", Decoder::UInt, false, MemoryLocation::a0(12, 1)),
    ("LENGTH_SMF_KM", Decoder::UInt, false, MemoryLocation::a0(14, 1)),
    ("LENGTH_OM3", Decoder::UInt, false, MemoryLocation::a0(19, 1)),
    ("VENDOR_NAME", Decoder::Ascii, false, MemoryLocation::a0(20, 16)),
    ("VENDOR_OUI", Decoder::Hex, false, MemoryLocation::a0(37, 3)),
    ("VENDOR_PN", Decoder::Ascii, false, MemoryLocation::a0(40, 16)),
    ("VENDOR_REV", Decoder::Ascii, false, MemoryLocation::a0(56, 4)),
    ("WAVELENGTH", Decoder::UInt, false, MemoryLocation::a0(60, 2)),
    ("CC_BASE", Decoder::UInt, false, MemoryLocation::a0(63, 1)),
    ("OPTIONS", Decoder::Hex, false, MemoryLocation::a0(64, 2)),
    ("VENDOR_SN", Decoder::Ascii, false, MemoryLocation::a0(68, 16)),
    ("DATE_CODE", Decoder::DateCode, false, MemoryLocation::a0(84, 8)),
    ("DIAGNOSTIC_MONITORING_TYPE", Decoder::UInt, false, MemoryLocation::a0(92, 1)),
    ("CC_EXT", Decoder::UInt, false, MemoryLocation::a0(95, 1)),
    // A2: diagnostics
    ("TEMPERATURE", Decoder::Temperature, true, MemoryLocation::a2(96, 2)),
    ("VCC", Decoder::Voltage, true, MemoryLocation::a2(98, 2)),
    ("TX_BIAS", Decoder::Bias, true, MemoryLocation::a2(100, 2)),
    ("TX_POWER", Decoder::Power, true, MemoryLocation::a2(102, 2)),
    ("RX_POWER", Decoder::Power, true, MemoryLocation::a2(104, 2)),
    ("STATUS_CONTROL", Decoder::UInt, true, MemoryLocation::a2(110, 1)),
    ("USER_EEPROM", Decoder::Hex, false, MemoryLocation::a2(128, 120)),
];

pub(super) const FMAP: &[(&str, &[&str])] = &[
    (
        "SERIAL_ID",
        &[
            "IDENTIFIER",
            "EXT_IDENTIFIER",
            "CONNECTOR",
            "TRANSCEIVER",
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
    ("DOM", &["TEMPERATURE", "VCC", "TX_BIAS", "TX_POWER", "RX_POWER"]),
    (
        "VENDOR",
        &["VENDOR_NAME", "VENDOR_OUI", "VENDOR_PN", "VENDOR_REV", "VENDOR_SN"],
    ),
];

pub(super) const WMAP: &[(&str, Encoder)] = &[
    ("STATUS_CONTROL", Encoder::UInt),
    ("USER_EEPROM", Encoder::Hex),
];
