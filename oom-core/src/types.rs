//! Core types and data structures for OOM

use std::collections::BTreeSet;
use std::fmt;
use std::ops::Range;
use std::sync::atomic::{AtomicU64, Ordering};

/// Two-wire address of the serial ID memory map
pub const ADDR_A0: u8 = 0xA0;

/// Two-wire address of the SFP diagnostics memory map
pub const ADDR_A2: u8 = 0xA2;

/// Optical module form factor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PortType {
    /// SFP / SFP+ (SFF-8472)
    Sfp,
    /// QSFP / QSFP+ (SFF-8636)
    Qsfp,
    /// QSFP28 (SFF-8636)
    Qsfp28,
    /// Empty cage or unrecognized module
    Unknown,
}

impl std::str::FromStr for PortType {
    type Err = crate::OomError;

    /// Parse a port type from a module-data file extension
    ///
    /// # Examples
    ///
    /// ```
    /// use std::str::FromStr;
    /// use oom_core::types::PortType;
    ///
    /// assert_eq!(PortType::from_str("sfp").unwrap(), PortType::Sfp);
    /// assert_eq!(PortType::from_str("QSFP28").unwrap(), PortType::Qsfp28);
    /// assert!(PortType::from_str("cfp").is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sfp" => Ok(PortType::Sfp),
            "qsfp" | "qsfp+" => Ok(PortType::Qsfp),
            "qsfp28" => Ok(PortType::Qsfp28),
            _ => Err(crate::OomError::Config(format!(
                "Unknown port type: '{}'. Valid options: sfp, qsfp, qsfp28",
                s
            ))),
        }
    }
}

impl PortType {
    /// Map an SFF-8024 identifier byte to a port type
    pub fn from_identifier(id: u8) -> Self {
        match id {
            0x03 => PortType::Sfp,
            0x0C | 0x0D => PortType::Qsfp,
            0x11 => PortType::Qsfp28,
            _ => PortType::Unknown,
        }
    }

    /// Human-readable name
    pub fn name(&self) -> &'static str {
        match self {
            PortType::Sfp => "SFP",
            PortType::Qsfp => "QSFP+",
            PortType::Qsfp28 => "QSFP28",
            PortType::Unknown => "UNKNOWN",
        }
    }

    /// Size in bytes of a complete EEPROM image for this module type
    ///
    /// SFP images hold A0 followed by A2 (256 bytes each). QSFP images hold
    /// lower memory plus upper pages 0 through 3 (128 bytes each).
    pub fn image_len(&self) -> usize {
        match self {
            PortType::Sfp => 512,
            PortType::Qsfp | PortType::Qsfp28 => 640,
            PortType::Unknown => 0,
        }
    }
}

impl fmt::Display for PortType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Location of a key's bytes in module memory
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemoryLocation {
    /// Two-wire device address (0xA0 or 0xA2)
    pub address: u8,
    /// Upper memory page (ignored for offsets below 128)
    pub page: u8,
    /// Byte offset within the 256-byte address space
    pub offset: u16,
    /// Number of bytes
    pub length: usize,
}

impl MemoryLocation {
    /// Location on the A0 address, page 0
    pub const fn a0(offset: u16, length: usize) -> Self {
        Self {
            address: ADDR_A0,
            page: 0,
            offset,
            length,
        }
    }

    /// Location on the A2 address, page 0
    pub const fn a2(offset: u16, length: usize) -> Self {
        Self {
            address: ADDR_A2,
            page: 0,
            offset,
            length,
        }
    }

    /// Location in an upper page of the A0 address
    pub const fn paged(page: u8, offset: u16, length: usize) -> Self {
        Self {
            address: ADDR_A0,
            page,
            offset,
            length,
        }
    }

    /// Byte range of this location inside a module image
    ///
    /// Returns `None` when the location does not exist for the module type
    /// or runs past the end of its address space or page.
    pub fn image_range(&self, port_type: PortType) -> Option<Range<usize>> {
        let offset = self.offset as usize;
        let (start, limit) = match port_type {
            PortType::Sfp => match self.address {
                ADDR_A0 => (offset, 256),
                ADDR_A2 => (256 + offset, 512),
                _ => return None,
            },
            PortType::Qsfp | PortType::Qsfp28 => {
                if self.address != ADDR_A0 {
                    return None;
                }
                if offset < 128 {
                    (offset, 128)
                } else if self.page <= 3 {
                    let base = 128 + self.page as usize * 128;
                    (base + offset - 128, base + 128)
                } else {
                    return None;
                }
            }
            PortType::Unknown => return None,
        };
        let end = start + self.length;
        if offset + self.length > 256 || end > limit {
            return None;
        }
        Some(start..end)
    }
}

/// Decoded value of a key
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Text field
    Str(String),
    /// Unsigned integer field
    Int(u64),
    /// Scaled measurement
    Float(f64),
    /// Raw bytes
    Bytes(Vec<u8>),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Str(s) => write!(f, "{}", s),
            Value::Int(n) => write!(f, "{}", n),
            Value::Float(x) => write!(f, "{:.4}", x),
            Value::Bytes(b) => f.write_str(&crate::decode::hexstr(b)),
        }
    }
}

/// Handle to one module cage
///
/// Ports are created by the API. Callers only borrow them; the raw read
/// counter is the one piece of state the API updates behind a shared
/// reference.
#[derive(Debug)]
pub struct Port {
    /// Display identifier
    pub port_name: String,
    /// Module form factor
    pub port_type: PortType,
    /// Keys readable as scalar values
    pub mmap: BTreeSet<String>,
    /// Keys readable as raw memory blocks
    pub fmap: BTreeSet<String>,
    /// Keys that can be read and written
    pub wmap: BTreeSet<String>,
    readcount: AtomicU64,
}

impl Port {
    /// Create a port with empty key sets
    pub fn new(port_name: impl Into<String>, port_type: PortType) -> Self {
        Self {
            port_name: port_name.into(),
            port_type,
            mmap: BTreeSet::new(),
            fmap: BTreeSet::new(),
            wmap: BTreeSet::new(),
            readcount: AtomicU64::new(0),
        }
    }

    /// Set the scalar-readable key set
    pub fn with_mmap<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.mmap = keys.into_iter().map(Into::into).collect();
        self
    }

    /// Set the block-readable key set
    pub fn with_fmap<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fmap = keys.into_iter().map(Into::into).collect();
        self
    }

    /// Set the writable key set
    pub fn with_wmap<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.wmap = keys.into_iter().map(Into::into).collect();
        self
    }

    /// Number of raw memory reads performed against this port so far
    pub fn readcount(&self) -> u64 {
        self.readcount.load(Ordering::Relaxed)
    }

    /// Record one raw memory read, returning the new count
    pub fn record_read(&self) -> u64 {
        self.readcount.fetch_add(1, Ordering::Relaxed) + 1
    }
}
