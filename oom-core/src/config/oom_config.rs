//! Configuration loaded once at startup

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::paths::default_module_data_dir;
use crate::Result;

/// Which southbound shim backs the API
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShimKind {
    /// EEPROM images from the module data directory
    #[default]
    Files,
    /// Built-in simulated modules, no files needed
    Simulated,
}

/// OOM configuration
///
/// Located at `~/.config/oom/config.toml` by default. Every field is
/// optional in the file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OomConfig {
    /// Shim selection
    #[serde(default)]
    pub shim: ShimKind,

    /// Directory of `<port>.sfp` / `<port>.qsfp` EEPROM images
    ///
    /// Defaults to `~/.local/share/oom/module_data` (XDG data directory).
    #[serde(default = "default_module_data_dir")]
    pub module_data: PathBuf,
}

impl Default for OomConfig {
    fn default() -> Self {
        Self {
            shim: ShimKind::default(),
            module_data: default_module_data_dir(),
        }
    }
}

impl OomConfig {
    /// Parse OomConfig from TOML string.
    pub fn from_toml(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Serialize OomConfig to TOML string.
    pub fn to_toml(&self) -> std::result::Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Load from a file, falling back to defaults when it does not exist
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        Ok(Self::from_toml(&content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = OomConfig::default();
        assert_eq!(config.shim, ShimKind::Files);
        assert!(config.module_data.ends_with("oom/module_data"));
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = OomConfig::from_toml("").unwrap();
        assert_eq!(config, OomConfig::default());
    }

    #[test]
    fn test_parse_full_config() {
        let config = OomConfig::from_toml(
            r#"
            shim = "simulated"
            module_data = "/srv/oom/modules"
            "#,
        )
        .unwrap();

        assert_eq!(config.shim, ShimKind::Simulated);
        assert_eq!(config.module_data, PathBuf::from("/srv/oom/modules"));
    }

    #[test]
    fn test_unknown_shim_rejected() {
        assert!(OomConfig::from_toml(r#"shim = "i2c""#).is_err());
    }

    #[test]
    fn test_serialization_roundtrip() {
        let config = OomConfig {
            shim: ShimKind::Simulated,
            module_data: PathBuf::from("/tmp/modules"),
        };
        let toml_str = config.to_toml().unwrap();
        assert!(toml_str.contains("shim = \"simulated\""));
        assert_eq!(OomConfig::from_toml(&toml_str).unwrap(), config);
    }

    #[test]
    fn test_load_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = OomConfig::load(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config, OomConfig::default());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "module_data = \"/data\"\n").unwrap();

        let config = OomConfig::load(&path).unwrap();
        assert_eq!(config.shim, ShimKind::Files);
        assert_eq!(config.module_data, PathBuf::from("/data"));
    }

    #[test]
    fn test_load_invalid_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "shim = [").unwrap();

        let err = OomConfig::load(&path).unwrap_err();
        assert!(matches!(err, crate::OomError::Config(_)));
    }
}
