//! Error types for the probe

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Probe error types
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Local bind failure, fatal at startup
    #[error("Failed to bind {addr}: {source}")]
    Bind {
        /// Local address that could not be bound
        addr: String,
        /// Underlying socket error
        source: std::io::Error,
    },

    /// Invalid packet or header
    #[error("Invalid packet: {0}")]
    InvalidPacket(String),

    /// Address string that did not resolve
    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    /// Invalid configuration parameter
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Configuration file parse error
    #[error("Config parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Configuration file write error
    #[error("Config write error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// Operation on an endpoint that was already closed
    #[error("Endpoint closed")]
    EndpointClosed,

    /// Generic error with message
    #[error("{0}")]
    Other(String),
}
