//! Where the configuration file and module images live by default

use std::path::PathBuf;

/// `config.toml` under the user's config directory, or under `/etc/oom`
/// on systems without one.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("/etc"))
        .join("oom")
        .join("config.toml")
}

/// Directory scanned by the file shim for `<port>.sfp` / `<port>.qsfp`
/// images: `oom/module_data` under the user's data directory, or
/// `/var/lib/oom/module_data` as a system-wide fallback.
pub fn default_module_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("/var/lib"))
        .join("oom")
        .join("module_data")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_file_is_oom_toml() {
        let path = default_config_path();
        assert_eq!(path.file_name().and_then(|n| n.to_str()), Some("config.toml"));
        assert!(path.ends_with("oom/config.toml"));
    }

    #[test]
    fn test_module_data_under_oom_dir() {
        let path = default_module_data_dir();
        assert!(path.ends_with("oom/module_data"));
    }
}
