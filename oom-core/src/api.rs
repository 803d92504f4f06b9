//! Northbound accessor contract
//!
//! The four operations every OOM provider offers. The coverage walker is
//! written against this trait so it can be driven by real shims or by test
//! doubles.

use crate::{Port, Result, Value};

/// Port enumeration and key access
pub trait OomApi {
    /// Enumerate every port visible at call time, in provider order
    fn list_ports(&self) -> Result<Vec<Port>>;

    /// Read and decode one scalar key
    fn read_value(&self, port: &Port, key: &str) -> Result<Value>;

    /// Read the raw memory behind one function key
    fn read_block(&self, port: &Port, key: &str) -> Result<Vec<u8>>;

    /// Encode and write one writable key
    fn write_value(&self, port: &Port, key: &str, value: &Value) -> Result<()>;
}
