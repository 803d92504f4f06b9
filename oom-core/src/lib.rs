//! OOM Core Library
//!
//! Shared types, key maps, and decoders for the optical module management
//! (OOM) API. Used by the shims in `oom-hardware` and by the coverage walker.

pub mod api;
pub mod config;
pub mod decode;
pub mod error;
pub mod keymap;
pub mod types;

// Re-export commonly used types
pub use api::OomApi;
pub use config::{default_config_path, default_module_data_dir, OomConfig, ShimKind};
pub use decode::{hexstr, Decoder, Encoder};
pub use error::*;
pub use keymap::{KeyMap, MemoryKey};
pub use types::*;
