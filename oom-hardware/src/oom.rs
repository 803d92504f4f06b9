//! OOM northbound API
//!
//! Turns key names into memory locations, reads and writes them through a
//! [`ModuleShim`], and keeps each port's raw read counter.

use crate::shim::ModuleShim;
use oom_core::{
    KeyMap, MemoryKey, MemoryLocation, OomApi, OomError, Port, PortType, Result, Value,
};
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, trace};

/// Key-level access to the modules behind a shim
pub struct Oom<S: ModuleShim> {
    shim: S,
    keymaps: HashMap<PortType, KeyMap>,
}

impl<S: ModuleShim> Oom<S> {
    /// Create the API over a shim
    pub fn new(shim: S) -> Self {
        let keymaps = [
            PortType::Sfp,
            PortType::Qsfp,
            PortType::Qsfp28,
            PortType::Unknown,
        ]
        .into_iter()
        .map(|port_type| (port_type, KeyMap::for_port_type(port_type)))
        .collect();

        Self { shim, keymaps }
    }

    /// The underlying shim
    pub fn shim(&self) -> &S {
        &self.shim
    }

    fn keymap(&self, port_type: PortType) -> Result<&KeyMap> {
        self.keymaps
            .get(&port_type)
            .ok_or_else(|| OomError::Config(format!("No key map for {}", port_type)))
    }

    fn memory_key(&self, port: &Port, key: &str) -> Result<MemoryKey> {
        self.keymap(port.port_type)?
            .memory_key(key)
            .copied()
            .ok_or_else(|| unknown_key(port, key))
    }

    /// One raw read, counted against the port
    fn raw_read(&self, port: &Port, location: &MemoryLocation) -> Result<Vec<u8>> {
        let data = self.shim.read(&port.port_name, location)?;
        let count = port.record_read();
        trace!(
            "{} raw read #{}: 0x{:02X}/{}/{} x{}",
            port.port_name,
            count,
            location.address,
            location.page,
            location.offset,
            location.length
        );
        Ok(data)
    }

    /// Decode every member of a function key, keyed by member name
    pub fn read_function(&self, port: &Port, key: &str) -> Result<BTreeMap<String, Value>> {
        let members = self
            .keymap(port.port_type)?
            .function(key)
            .ok_or_else(|| unknown_key(port, key))?;

        let mut values = BTreeMap::new();
        for member in members {
            values.insert(member.to_string(), self.read_value(port, member)?);
        }
        Ok(values)
    }
}

impl<S: ModuleShim> OomApi for Oom<S> {
    fn list_ports(&self) -> Result<Vec<Port>> {
        let ports = self
            .shim
            .ports()?
            .into_iter()
            .map(|module| -> Result<Port> {
                let keymap = self.keymap(module.port_type)?;
                Ok(keymap.port(module.port_name, module.port_type))
            })
            .collect::<Result<Vec<_>>>()?;

        debug!("Discovered {} port(s)", ports.len());
        Ok(ports)
    }

    fn read_value(&self, port: &Port, key: &str) -> Result<Value> {
        let def = self.memory_key(port, key)?;
        let raw = self.raw_read(port, &def.location)?;
        let value = def.decoder.decode(&raw)?;
        debug!("{} {} = {}", port.port_name, key, value);
        Ok(value)
    }

    fn read_block(&self, port: &Port, key: &str) -> Result<Vec<u8>> {
        let keymap = self.keymap(port.port_type)?;
        let members = keymap.function(key).ok_or_else(|| unknown_key(port, key))?;

        let mut block = Vec::new();
        for member in members {
            let def = keymap
                .memory_key(member)
                .ok_or_else(|| unknown_key(port, member))?;
            block.extend(self.raw_read(port, &def.location)?);
        }
        debug!("{} {}: {} byte(s)", port.port_name, key, block.len());
        Ok(block)
    }

    fn write_value(&self, port: &Port, key: &str, value: &Value) -> Result<()> {
        let keymap = self.keymap(port.port_type)?;
        let def = self.memory_key(port, key)?;
        let encoder = keymap.encoder(key).ok_or_else(|| OomError::NotWritable {
            port: port.port_name.clone(),
            key: key.to_string(),
        })?;

        let raw = encoder.encode(value, def.location.length)?;
        self.shim.write(&port.port_name, &def.location, &raw)?;
        debug!("{} {} <- {}", port.port_name, key, value);
        Ok(())
    }
}

fn unknown_key(port: &Port, key: &str) -> OomError {
    OomError::UnknownKey {
        port: port.port_name.clone(),
        key: key.to_string(),
    }
}
