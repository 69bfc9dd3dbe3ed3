//! Taala - SOME/IP cadence probe
//!
//! Sends a fixed SOME/IP request to an embedded target on a strict interval
//! while draining responses without blocking, all from a single control
//! loop. Used to validate the target's real-time responsiveness under load.

pub mod config;
pub mod error;
pub mod probe;
pub mod someip;
pub mod transport;

// Re-export commonly used types
pub use config::AppConfig;
pub use error::{Error, Result};
