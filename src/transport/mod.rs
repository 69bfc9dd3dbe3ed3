//! Transport layer for socket I/O abstraction

use crate::error::Result;
use std::net::SocketAddr;

mod udp;
pub use udp::UdpEndpoint;

#[cfg(test)]
pub(crate) mod mock;

/// Endpoint seam between the probe loop and the OS socket
pub trait Endpoint {
    /// Send one datagram to the fixed remote target
    fn send(&mut self, data: &[u8]) -> Result<usize>;

    /// Non-blocking receive of at most one datagram
    ///
    /// Returns `Ok(None)` when nothing is pending. An error means a genuine
    /// socket failure, never "would block".
    fn try_recv(&mut self, buf: &mut [u8]) -> Result<Option<(usize, SocketAddr)>>;
}
