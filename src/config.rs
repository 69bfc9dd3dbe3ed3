//! Configuration for the cadence probe
//!
//! Loads configuration from a TOML file with the minimal parameters needed
//! to drive one probe session: endpoints, the fixed request content, and
//! the timing/sampling knobs.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Top-level application configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    pub network: NetworkConfig,
    pub request: RequestConfig,
    pub probe: ProbeConfig,
    pub logging: LoggingConfig,
}

/// Network configuration (UDP endpoints)
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NetworkConfig {
    /// Local bind address for the probe socket
    ///
    /// Examples:
    /// - `0.0.0.0:30509` - all interfaces, SOME/IP port
    /// - `192.168.2.10:30509` - wired NIC only
    pub bind_address: String,
    /// Destination address of the target board
    pub target_address: String,
}

/// Fixed request content, built once at startup and reused for every send
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RequestConfig {
    /// Service identifier (header bytes 0-1)
    pub service_id: u16,
    /// Method identifier (header bytes 2-3)
    pub method_id: u16,
    /// Correlation id, constant for the whole session (no per-send increment)
    pub request_id: u32,
    /// Protocol framing version
    pub protocol_version: u8,
    /// Service interface version
    pub interface_version: u8,
    /// ASCII control record sent as payload, newline-terminated
    pub payload: String,
}

/// Timing and sampling configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProbeConfig {
    /// Send interval in milliseconds
    pub send_interval_ms: u64,
    /// Log one diagnostic line every N received datagrams
    pub sample_every: u64,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Log output (stdout or stderr)
    pub output: String,
}

impl AppConfig {
    /// Load configuration from TOML file
    ///
    /// # Arguments
    /// - `path`: Path to TOML configuration file
    ///
    /// # Returns
    /// Parsed configuration or error
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Default configuration for the TC375 evaluation board
    ///
    /// Matches the bench setup: probe on the wired NIC, board at
    /// 192.168.2.20, SOME/IP service 0x0100 method 0x0103, one motor
    /// control record every 10 ms.
    pub fn tc375_defaults() -> Self {
        Self {
            network: NetworkConfig {
                bind_address: "0.0.0.0:30509".to_string(),
                target_address: "192.168.2.20:30509".to_string(),
            },
            request: RequestConfig {
                service_id: 0x0100,
                method_id: 0x0103,
                request_id: 0x0000_0001,
                protocol_version: 0x01,
                interface_version: 0x01,
                payload: "250;250;0;0;0;0;0;1;1\n".to_string(),
            },
            probe: ProbeConfig {
                send_interval_ms: 10,
                sample_every: 100,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                output: "stdout".to_string(),
            },
        }
    }

    /// Save configuration to TOML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Reject values the probe loop cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.probe.send_interval_ms == 0 {
            return Err(Error::InvalidParameter(
                "send_interval_ms must be at least 1".to_string(),
            ));
        }
        if self.probe.sample_every == 0 {
            return Err(Error::InvalidParameter(
                "sample_every must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::tc375_defaults()
    }
}
