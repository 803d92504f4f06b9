//! Key maps: which keys a module type advertises and where they live
//!
//! Each module type has three tables:
//! - `mmap` - scalar keys, with a decoder and a memory location
//! - `fmap` - function keys, each naming an ordered group of mmap keys
//! - `wmap` - writable keys, with an encoder (their location comes from mmap)

mod qsfp;
mod sfp;

use crate::decode::{Decoder, Encoder};
use crate::types::{MemoryLocation, Port, PortType};
use std::collections::BTreeMap;

/// `(key, decoder, dynamic, location)` row of a static key table
type KeyDef = (&'static str, Decoder, bool, MemoryLocation);

/// Definition of one scalar key
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MemoryKey {
    /// How raw bytes become a value
    pub decoder: Decoder,
    /// Value changes while the module runs (diagnostics, control bits)
    pub dynamic: bool,
    /// Where the bytes live
    pub location: MemoryLocation,
}

/// Complete key map for one module type
#[derive(Debug, Clone, Default)]
pub struct KeyMap {
    pub mmap: BTreeMap<&'static str, MemoryKey>,
    pub fmap: BTreeMap<&'static str, Vec<&'static str>>,
    pub wmap: BTreeMap<&'static str, Encoder>,
}

impl KeyMap {
    /// Built-in key map for a module type
    ///
    /// Unknown modules get an empty map.
    pub fn for_port_type(port_type: PortType) -> Self {
        match port_type {
            PortType::Sfp => Self::from_tables(sfp::MMAP, sfp::FMAP, sfp::WMAP),
            PortType::Qsfp | PortType::Qsfp28 => {
                Self::from_tables(qsfp::MMAP, qsfp::FMAP, qsfp::WMAP)
            }
            PortType::Unknown => Self::default(),
        }
    }

    fn from_tables(
        mmap: &[KeyDef],
        fmap: &[(&'static str, &[&'static str])],
        wmap: &[(&'static str, Encoder)],
    ) -> Self {
        Self {
            mmap: mmap
                .iter()
                .map(|&(key, decoder, dynamic, location)| {
                    (
                        key,
                        MemoryKey {
                            decoder,
                            dynamic,
                            location,
                        },
                    )
                })
                .collect(),
            fmap: fmap
                .iter()
                .map(|&(key, members)| (key, members.to_vec()))
                .collect(),
            wmap: wmap.iter().copied().collect(),
        }
    }

    /// Look up a scalar key
    pub fn memory_key(&self, key: &str) -> Option<&MemoryKey> {
        self.mmap.get(key)
    }

    /// Look up the member keys of a function key
    pub fn function(&self, key: &str) -> Option<&[&'static str]> {
        self.fmap.get(key).map(Vec::as_slice)
    }

    /// Look up the encoder of a writable key
    pub fn encoder(&self, key: &str) -> Option<Encoder> {
        self.wmap.get(key).copied()
    }

    /// Build a port handle advertising this map's key sets
    pub fn port(&self, port_name: impl Into<String>, port_type: PortType) -> Port {
        Port::new(port_name, port_type)
            .with_mmap(self.mmap.keys().copied())
            .with_fmap(self.fmap.keys().copied())
            .with_wmap(self.wmap.keys().copied())
    }
}
