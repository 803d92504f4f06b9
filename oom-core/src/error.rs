//! Error types for the OOM system

use thiserror::Error;

/// Core error type for OOM operations
///
/// Every accessor failure is one of these; nothing in the walker recovers
/// from them.
#[derive(Error, Debug)]
pub enum OomError {
    /// Key is not defined for the port's module type
    #[error("Key {key} not defined for port {port}")]
    UnknownKey { port: String, key: String },

    /// Key exists but has no encoder
    #[error("Key {key} is not writable on port {port}")]
    NotWritable { port: String, key: String },

    /// Shim has no module by that name
    #[error("Port not found: {0}")]
    PortNotFound(String),

    /// Raw memory access failed
    #[error("Transport error: {0}")]
    Transport(String),

    /// Raw bytes could not be turned into a value
    #[error("Decode error: {0}")]
    Decode(String),

    /// Value could not be turned into raw bytes
    #[error("Encode error: {0}")]
    Encode(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for OOM operations
pub type Result<T> = std::result::Result<T, OomError>;

impl From<toml::de::Error> for OomError {
    fn from(err: toml::de::Error) -> Self {
        OomError::Config(err.to_string())
    }
}
