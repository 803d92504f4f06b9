//! Configuration types for OOM tools
//!
//! - [`OomConfig`] - which shim backs the API and where module data lives,
//!   loaded once at startup from `~/.config/oom/config.toml`

mod oom_config;
mod paths;

pub use oom_config::{OomConfig, ShimKind};
pub use paths::{default_config_path, default_module_data_dir};
