//! UDP endpoint implementation

use super::Endpoint;
use crate::error::{Error, Result};
use std::io::ErrorKind;
use std::net::{SocketAddr, ToSocketAddrs, UdpSocket};

/// UDP endpoint bound locally with a fixed send target
///
/// The socket runs in non-blocking mode so receives never stall the send
/// cadence. It is released when the endpoint drops; [`close`](Self::close)
/// may also be called explicitly and is safe to call more than once.
pub struct UdpEndpoint {
    socket: Option<UdpSocket>,
    target: SocketAddr,
}

impl UdpEndpoint {
    /// Bind the local address and remember the fixed remote target
    ///
    /// Bind failure is fatal to startup and surfaces as [`Error::Bind`].
    pub fn open(bind_addr: &str, target_addr: &str) -> Result<Self> {
        let target = resolve(target_addr)?;

        let socket = UdpSocket::bind(bind_addr).map_err(|source| Error::Bind {
            addr: bind_addr.to_string(),
            source,
        })?;
        socket.set_nonblocking(true)?;

        log::info!(
            "UDP endpoint bound to {} (target {})",
            socket.local_addr()?,
            target
        );

        Ok(UdpEndpoint {
            socket: Some(socket),
            target,
        })
    }

    /// Local address the socket is bound to
    pub fn local_addr(&self) -> Result<SocketAddr> {
        let socket = self.socket.as_ref().ok_or(Error::EndpointClosed)?;
        Ok(socket.local_addr()?)
    }

    /// Release the OS socket; later calls are no-ops
    pub fn close(&mut self) {
        if let Some(socket) = self.socket.take() {
            drop(socket);
            log::debug!("UDP endpoint closed");
        }
    }
}

impl Endpoint for UdpEndpoint {
    fn send(&mut self, data: &[u8]) -> Result<usize> {
        let socket = self.socket.as_ref().ok_or(Error::EndpointClosed)?;
        Ok(socket.send_to(data, self.target)?)
    }

    fn try_recv(&mut self, buf: &mut [u8]) -> Result<Option<(usize, SocketAddr)>> {
        let socket = self.socket.as_ref().ok_or(Error::EndpointClosed)?;
        match socket.recv_from(buf) {
            Ok((len, peer)) => Ok(Some((len, peer))),
            Err(e) if e.kind() == ErrorKind::WouldBlock => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

impl Drop for UdpEndpoint {
    fn drop(&mut self) {
        self.close();
    }
}

fn resolve(addr: &str) -> Result<SocketAddr> {
    addr.to_socket_addrs()?
        .next()
        .ok_or_else(|| Error::InvalidAddress(addr.to_string()))
}
