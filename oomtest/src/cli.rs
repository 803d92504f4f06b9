//! Command-line arguments and startup wiring

use anyhow::{Context, Result};
use clap::Parser;
use oom_core::{OomConfig, ShimKind};
use oom_hardware::{FileShim, MemoryShim, ModuleShim};
use std::path::PathBuf;
use tracing::info;

/// OOM coverage test
///
/// Takes no required arguments. With none given, the configuration file
/// decides which modules are walked.
#[derive(Parser, Debug, Default)]
#[command(name = "oomtest")]
#[command(
    version,
    about = "Read every key, read every function and write back every writable key on every port",
    long_about = None
)]
pub struct Args {
    /// Path to configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Directory of module EEPROM images (overrides the configuration file)
    #[arg(long)]
    pub module_data: Option<PathBuf>,

    /// Walk the built-in simulated modules instead of module data files
    #[arg(long)]
    pub simulate: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Apply command-line overrides on top of file configuration
    pub fn apply_to(&self, mut config: OomConfig) -> OomConfig {
        if let Some(ref dir) = self.module_data {
            config.module_data = dir.clone();
            config.shim = ShimKind::Files;
        }
        if self.simulate {
            config.shim = ShimKind::Simulated;
        }
        config
    }
}

/// Open the shim selected by the configuration
pub fn open_shim(config: &OomConfig) -> Result<Box<dyn ModuleShim>> {
    match config.shim {
        ShimKind::Simulated => {
            info!("Using simulated modules");
            Ok(Box::new(MemoryShim::simulated()))
        }
        ShimKind::Files => {
            let shim = FileShim::open(&config.module_data).with_context(|| {
                format!(
                    "Failed to load module data from {}",
                    config.module_data.display()
                )
            })?;
            Ok(Box::new(shim))
        }
    }
}

/// Initialize tracing on stderr; stdout carries only diagnostic lines
pub fn init_tracing(verbose: bool) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = if verbose {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_arguments() {
        let args = Args::try_parse_from(["oomtest"]).unwrap();
        assert!(args.config.is_none());
        assert!(args.module_data.is_none());
        assert!(!args.simulate);
        assert!(!args.verbose);
    }

    #[test]
    fn test_parse_all_flags() {
        let args = Args::try_parse_from([
            "oomtest",
            "-c",
            "/etc/oom/test.toml",
            "--module-data",
            "/srv/modules",
            "--simulate",
            "-v",
        ])
        .unwrap();

        assert_eq!(args.config, Some(PathBuf::from("/etc/oom/test.toml")));
        assert_eq!(args.module_data, Some(PathBuf::from("/srv/modules")));
        assert!(args.simulate);
        assert!(args.verbose);
    }

    #[test]
    fn test_rejects_positional_arguments() {
        assert!(Args::try_parse_from(["oomtest", "port0"]).is_err());
    }

    #[test]
    fn test_no_overrides_keeps_file_config() {
        let config = OomConfig {
            shim: ShimKind::Simulated,
            module_data: PathBuf::from("/data"),
        };
        assert_eq!(Args::default().apply_to(config.clone()), config);
    }

    #[test]
    fn test_module_data_override_selects_files() {
        let args = Args {
            module_data: Some(PathBuf::from("/srv/modules")),
            ..Default::default()
        };
        let config = args.apply_to(OomConfig {
            shim: ShimKind::Simulated,
            module_data: PathBuf::from("/data"),
        });

        assert_eq!(config.shim, ShimKind::Files);
        assert_eq!(config.module_data, PathBuf::from("/srv/modules"));
    }

    #[test]
    fn test_simulate_wins() {
        let args = Args {
            module_data: Some(PathBuf::from("/srv/modules")),
            simulate: true,
            ..Default::default()
        };
        assert_eq!(args.apply_to(OomConfig::default()).shim, ShimKind::Simulated);
    }

    #[test]
    fn test_open_simulated_shim() {
        let config = OomConfig {
            shim: ShimKind::Simulated,
            ..Default::default()
        };
        let shim = open_shim(&config).unwrap();
        assert_eq!(shim.ports().unwrap().len(), 2);
    }

    #[test]
    fn test_open_missing_module_data_has_context() {
        let dir = tempfile::tempdir().unwrap();
        let config = OomConfig {
            shim: ShimKind::Files,
            module_data: dir.path().join("missing"),
        };

        let err = open_shim(&config).err().unwrap();
        assert!(err.to_string().contains("Failed to load module data"));
    }
}
