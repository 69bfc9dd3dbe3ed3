//! Mock endpoint for testing

use super::Endpoint;
use crate::error::{Error, Result};
use std::collections::VecDeque;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

/// Mock endpoint for unit testing the probe loop
#[derive(Clone)]
pub struct MockEndpoint {
    inner: Arc<Mutex<MockEndpointInner>>,
}

struct MockEndpointInner {
    inbound: VecDeque<Vec<u8>>,
    sent: Vec<Vec<u8>>,
    fail_next_send: bool,
    peer: SocketAddr,
}

impl MockEndpoint {
    /// Create a new mock endpoint
    pub fn new() -> Self {
        MockEndpoint {
            inner: Arc::new(Mutex::new(MockEndpointInner {
                inbound: VecDeque::new(),
                sent: Vec::new(),
                fail_next_send: false,
                peer: "192.168.2.20:30509".parse().unwrap(),
            })),
        }
    }

    /// Queue a datagram to be returned by the next `try_recv`
    pub fn inject_datagram(&self, data: &[u8]) {
        let mut inner = self.inner.lock().unwrap();
        inner.inbound.push_back(data.to_vec());
    }

    /// All datagrams sent so far
    pub fn sent_datagrams(&self) -> Vec<Vec<u8>> {
        let inner = self.inner.lock().unwrap();
        inner.sent.clone()
    }

    /// Make the next send fail with an I/O error
    pub fn fail_next_send(&self) {
        let mut inner = self.inner.lock().unwrap();
        inner.fail_next_send = true;
    }
}

impl Endpoint for MockEndpoint {
    fn send(&mut self, data: &[u8]) -> Result<usize> {
        let mut inner = self.inner.lock().unwrap();
        if inner.fail_next_send {
            inner.fail_next_send = false;
            return Err(Error::Io(std::io::Error::new(
                std::io::ErrorKind::Other,
                "injected send failure",
            )));
        }
        inner.sent.push(data.to_vec());
        Ok(data.len())
    }

    fn try_recv(&mut self, buf: &mut [u8]) -> Result<Option<(usize, SocketAddr)>> {
        let mut inner = self.inner.lock().unwrap();
        match inner.inbound.pop_front() {
            Some(data) => {
                let len = data.len().min(buf.len());
                buf[..len].copy_from_slice(&data[..len]);
                Ok(Some((len, inner.peer)))
            }
            None => Ok(None),
        }
    }
}

impl Default for MockEndpoint {
    fn default() -> Self {
        Self::new()
    }
}
