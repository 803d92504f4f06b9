//! oom-hardware
//!
//! Southbound shims that reach module memory, and the northbound [`Oom`]
//! API built on top of them.
//!
//! Public API:
//! - `oom::Oom` - key-level API implementing [`oom_core::OomApi`]
//! - `shim::ModuleShim` - raw module memory access trait
//! - `shim::MemoryShim` - in-memory images, including a simulated module pair
//! - `shim::FileShim` - images loaded from a module data directory

pub mod oom;
pub mod shim;

pub use oom::Oom;
pub use shim::{FileShim, MemoryShim, ModuleDescriptor, ModuleImage, ModuleShim};

