//! File-backed module simulator
//!
//! Loads EEPROM images from a module data directory. Each file describes one
//! cage: `<port_name>.sfp` (A0 then A2) or `<port_name>.qsfp` /
//! `<port_name>.qsfp28` (lower memory then upper pages 0-3). Writes change
//! the loaded image only; files on disk are never modified.

use super::{MemoryShim, ModuleDescriptor, ModuleImage, ModuleShim};
use oom_core::{MemoryLocation, OomError, PortType, Result};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{debug, info, warn};

/// Shim over a directory of module EEPROM images
#[derive(Debug)]
pub struct FileShim {
    dir: PathBuf,
    images: MemoryShim,
}

impl FileShim {
    /// Load every module image in `dir`
    ///
    /// Ports are ordered by name. Files whose extension is not a known module
    /// type are skipped. Two images for the same port name are a
    /// configuration error. Short images are zero padded and long ones
    /// truncated to the module type's image size.
    pub fn open(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        debug!("Loading module data from {}", dir.display());

        let mut modules = Vec::new();
        for entry in std::fs::read_dir(dir)? {
            let path = entry?.path();
            if !path.is_file() {
                continue;
            }

            let (Some(stem), Some(ext)) = (
                path.file_stem().and_then(|s| s.to_str()),
                path.extension().and_then(|e| e.to_str()),
            ) else {
                debug!("Skipping {}", path.display());
                continue;
            };

            let port_type = match PortType::from_str(ext) {
                Ok(port_type) => port_type,
                Err(_) => {
                    debug!("Skipping {}: not a module image", path.display());
                    continue;
                }
            };

            let mut bytes = std::fs::read(&path)?;
            let expected = port_type.image_len();
            if bytes.len() != expected {
                warn!(
                    "{} is {} bytes, expected {} for {}; resizing",
                    path.display(),
                    bytes.len(),
                    expected,
                    port_type
                );
                bytes.resize(expected, 0);
            }

            modules.push((stem.to_string(), ModuleImage { port_type, bytes }));
        }

        modules.sort_by(|a, b| a.0.cmp(&b.0));
        if let Some(pair) = modules.windows(2).find(|pair| pair[0].0 == pair[1].0) {
            return Err(OomError::Config(format!(
                "Duplicate module image for port {} in {}",
                pair[0].0,
                dir.display()
            )));
        }
        info!("Loaded {} module image(s) from {}", modules.len(), dir.display());

        Ok(Self {
            dir: dir.to_path_buf(),
            images: modules.into_iter().collect(),
        })
    }

    /// Directory the images were loaded from
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl ModuleShim for FileShim {
    fn ports(&self) -> Result<Vec<ModuleDescriptor>> {
        self.images.ports()
    }

    fn read(&self, port_name: &str, location: &MemoryLocation) -> Result<Vec<u8>> {
        self.images.read(port_name, location)
    }

    fn write(&self, port_name: &str, location: &MemoryLocation, data: &[u8]) -> Result<()> {
        self.images.write(port_name, location, data)
    }
}
