//! In-memory module images

use super::{ModuleDescriptor, ModuleShim};
use oom_core::{KeyMap, MemoryLocation, OomError, PortType, Result};
use std::sync::Mutex;
use tracing::debug;

/// Complete EEPROM contents of one module
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleImage {
    pub port_type: PortType,
    pub bytes: Vec<u8>,
}

impl ModuleImage {
    /// Zero-filled image of the right size for the module type
    pub fn blank(port_type: PortType) -> Self {
        Self {
            port_type,
            bytes: vec![0; port_type.image_len()],
        }
    }

    fn range(&self, port_name: &str, location: &MemoryLocation) -> Result<std::ops::Range<usize>> {
        location
            .image_range(self.port_type)
            .filter(|range| range.end <= self.bytes.len())
            .ok_or_else(|| {
                OomError::Transport(format!(
                    "Address 0x{:02X} page {} offset {} length {} is outside the {} module on {}",
                    location.address,
                    location.page,
                    location.offset,
                    location.length,
                    self.port_type,
                    port_name
                ))
            })
    }

    /// Store raw bytes at the location of a key from this module's key map
    ///
    /// Short data is zero padded to the field length.
    fn set(&mut self, map: &KeyMap, key: &str, raw: &[u8]) {
        if let Some(range) = map
            .memory_key(key)
            .and_then(|def| def.location.image_range(self.port_type))
        {
            let len = raw.len().min(range.len());
            let field = &mut self.bytes[range];
            field.fill(0);
            field[..len].copy_from_slice(&raw[..len]);
        }
    }
}

/// Shim over module images held in memory
///
/// Ports are reported in insertion order.
#[derive(Debug, Default)]
pub struct MemoryShim {
    modules: Mutex<Vec<(String, ModuleImage)>>,
}

impl MemoryShim {
    /// Create an empty shim (no ports)
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a module, replacing any module already in that cage
    pub fn insert(&self, port_name: impl Into<String>, image: ModuleImage) -> Result<()> {
        let port_name = port_name.into();
        let mut modules = self.lock()?;
        match modules.iter_mut().find(|(name, _)| *name == port_name) {
            Some(slot) => slot.1 = image,
            None => modules.push((port_name, image)),
        }
        Ok(())
    }

    /// Copy of a module's current image
    pub fn image(&self, port_name: &str) -> Result<ModuleImage> {
        self.lock()?
            .iter()
            .find(|(name, _)| name == port_name)
            .map(|(_, image)| image.clone())
            .ok_or_else(|| OomError::PortNotFound(port_name.to_string()))
    }

    /// One SFP and one QSFP+ module with plausible serial ID and
    /// diagnostics content
    pub fn simulated() -> Self {
        let sfp_map = KeyMap::for_port_type(PortType::Sfp);
        let mut sfp = ModuleImage::blank(PortType::Sfp);
        sfp.set(&sfp_map, "IDENTIFIER", &[0x03]);
        sfp.set(&sfp_map, "EXT_IDENTIFIER", &[0x04]);
        sfp.set(&sfp_map, "CONNECTOR", &[0x07]);
        sfp.set(&sfp_map, "TRANSCEIVER", &[0x10, 0, 0, 0, 0, 0, 0, 0]);
        sfp.set(&sfp_map, "ENCODING", &[0x06]);
        sfp.set(&sfp_map, "BR_NOMINAL", &[0x67]);
        sfp.set(&sfp_map, "LENGTH_OM3", &[0x1E]);
        sfp.set(&sfp_map, "VENDOR_NAME", b"OOM SIMULATOR   ");
        sfp.set(&sfp_map, "VENDOR_OUI", &[0x00, 0x90, 0x65]);
        sfp.set(&sfp_map, "VENDOR_PN", b"SIM-SFP-10G-SR  ");
        sfp.set(&sfp_map, "VENDOR_REV", b"A   ");
        sfp.set(&sfp_map, "WAVELENGTH", &850u16.to_be_bytes());
        sfp.set(&sfp_map, "VENDOR_SN", b"SIM00000001     ");
        sfp.set(&sfp_map, "DATE_CODE", b"150704  ");
        sfp.set(&sfp_map, "DIAGNOSTIC_MONITORING_TYPE", &[0x68]);
        sfp.set(&sfp_map, "TEMPERATURE", &[0x19, 0x80]);
        sfp.set(&sfp_map, "VCC", &33000u16.to_be_bytes());
        sfp.set(&sfp_map, "TX_BIAS", &3000u16.to_be_bytes());
        sfp.set(&sfp_map, "TX_POWER", &5000u16.to_be_bytes());
        sfp.set(&sfp_map, "RX_POWER", &4000u16.to_be_bytes());

        let qsfp_map = KeyMap::for_port_type(PortType::Qsfp);
        let mut qsfp = ModuleImage::blank(PortType::Qsfp);
        qsfp.set(&qsfp_map, "IDENTIFIER", &[0x0D]);
        // Upper page 0 repeats the identifier
        qsfp.bytes[128] = 0x0D;
        qsfp.set(&qsfp_map, "EXT_IDENTIFIER", &[0x10]);
        qsfp.set(&qsfp_map, "CONNECTOR", &[0x0C]);
        qsfp.set(&qsfp_map, "SPEC_COMPLIANCE", &[0x04, 0, 0, 0, 0, 0, 0, 0]);
        qsfp.set(&qsfp_map, "ENCODING", &[0x05]);
        qsfp.set(&qsfp_map, "BR_NOMINAL", &[0x67]);
        qsfp.set(&qsfp_map, "VENDOR_NAME", b"OOM SIMULATOR   ");
        qsfp.set(&qsfp_map, "VENDOR_OUI", &[0x00, 0x90, 0x65]);
        qsfp.set(&qsfp_map, "VENDOR_PN", b"SIM-QSFP-40G-SR4");
        qsfp.set(&qsfp_map, "VENDOR_REV", b"B ");
        qsfp.set(&qsfp_map, "WAVELENGTH", &[0x42, 0x68]);
        qsfp.set(&qsfp_map, "VENDOR_SN", b"SIM00000002     ");
        qsfp.set(&qsfp_map, "DATE_CODE", b"160115  ");
        qsfp.set(&qsfp_map, "TEMPERATURE", &[0x1E, 0x40]);
        qsfp.set(&qsfp_map, "SUPPLY_VOLTAGE", &32900u16.to_be_bytes());
        for lane in 1..=4 {
            qsfp.set(&qsfp_map, &format!("RX{}_POWER", lane), &6000u16.to_be_bytes());
            qsfp.set(&qsfp_map, &format!("TX{}_BIAS", lane), &3500u16.to_be_bytes());
        }

        Self {
            modules: Mutex::new(vec![
                ("port0".to_string(), sfp),
                ("port1".to_string(), qsfp),
            ]),
        }
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Vec<(String, ModuleImage)>>> {
        self.modules
            .lock()
            .map_err(|_| OomError::Transport("Module image lock poisoned".to_string()))
    }
}

impl FromIterator<(String, ModuleImage)> for MemoryShim {
    fn from_iter<I: IntoIterator<Item = (String, ModuleImage)>>(iter: I) -> Self {
        Self {
            modules: Mutex::new(iter.into_iter().collect()),
        }
    }
}

impl ModuleShim for MemoryShim {
    fn ports(&self) -> Result<Vec<ModuleDescriptor>> {
        Ok(self
            .lock()?
            .iter()
            .map(|(name, image)| ModuleDescriptor {
                port_name: name.clone(),
                port_type: image.port_type,
            })
            .collect())
    }

    fn read(&self, port_name: &str, location: &MemoryLocation) -> Result<Vec<u8>> {
        let modules = self.lock()?;
        let (_, image) = modules
            .iter()
            .find(|(name, _)| name == port_name)
            .ok_or_else(|| OomError::PortNotFound(port_name.to_string()))?;
        let range = image.range(port_name, location)?;
        Ok(image.bytes[range].to_vec())
    }

    fn write(&self, port_name: &str, location: &MemoryLocation, data: &[u8]) -> Result<()> {
        let mut modules = self.lock()?;
        let (_, image) = modules
            .iter_mut()
            .find(|(name, _)| name == port_name)
            .ok_or_else(|| OomError::PortNotFound(port_name.to_string()))?;
        let range = image.range(port_name, location)?;
        if data.len() != range.len() {
            return Err(OomError::Transport(format!(
                "Write of {} bytes to a {}-byte field on {}",
                data.len(),
                range.len(),
                port_name
            )));
        }
        debug!(
            "Write {} byte(s) to {} at 0x{:02X}/{}/{}",
            data.len(),
            port_name,
            location.address,
            location.page,
            location.offset
        );
        image.bytes[range].copy_from_slice(data);
        Ok(())
    }
}
