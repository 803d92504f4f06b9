//! oomtest
//!
//! Walks every port reported by the OOM API and prints one line per port.
//! Any accessor failure aborts the run with a non-zero exit status.

use anyhow::{Context, Result};
use clap::Parser;
use oom_core::{default_config_path, OomConfig};
use oom_hardware::Oom;
use oomtest::cli::{init_tracing, open_shim, Args};
use oomtest::CoverageWalker;
use tracing::{debug, info};

fn main() -> Result<()> {
    let args = Args::parse();

    init_tracing(args.verbose);

    // Determine config path: CLI flag > default
    let config_path = args.config.clone().unwrap_or_else(default_config_path);
    debug!("Configuration file: {}", config_path.display());

    let config = OomConfig::load(&config_path).with_context(|| {
        format!("Failed to load configuration from {}", config_path.display())
    })?;
    let config = args.apply_to(config);

    let oom = Oom::new(open_shim(&config)?);

    let stdout = std::io::stdout();
    let summary = CoverageWalker::new(&oom).run(&mut stdout.lock())?;

    info!("All keys on {} port(s) completed", summary.ports);
    Ok(())
}
