//! Southbound module memory shims
//!
//! A shim knows which module sits in which cage and how to move raw bytes to
//! and from its memory. The [`crate::Oom`] API sits on top and adds keys,
//! decoding and read accounting.

mod file;
mod memory;

pub use file::FileShim;
pub use memory::{MemoryShim, ModuleImage};

use oom_core::{MemoryLocation, PortType, Result};

/// A module cage as reported by the shim
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleDescriptor {
    pub port_name: String,
    pub port_type: PortType,
}

/// Raw module memory access
///
/// This trait enables testing of [`crate::Oom`] without real hardware by
/// allowing in-memory and failing implementations.
pub trait ModuleShim {
    /// Enumerate module cages, in the order ports should be reported
    fn ports(&self) -> Result<Vec<ModuleDescriptor>>;

    /// Read `location.length` bytes from a module
    fn read(&self, port_name: &str, location: &MemoryLocation) -> Result<Vec<u8>>;

    /// Write `data` at a module location
    fn write(&self, port_name: &str, location: &MemoryLocation, data: &[u8]) -> Result<()>;
}

impl<T: ModuleShim + ?Sized> ModuleShim for Box<T> {
    fn ports(&self) -> Result<Vec<ModuleDescriptor>> {
        (**self).ports()
    }

    fn read(&self, port_name: &str, location: &MemoryLocation) -> Result<Vec<u8>> {
        (**self).read(port_name, location)
    }

    fn write(&self, port_name: &str, location: &MemoryLocation, data: &[u8]) -> Result<()> {
        (**self).write(port_name, location, data)
    }
}
