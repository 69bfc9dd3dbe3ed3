//! Receive-side decoding and periodic diagnostics

use crate::someip::MessageHeader;
use std::net::SocketAddr;

/// Emits one diagnostic line every N received datagrams
///
/// Datagrams shorter than the wire header are dropped with a debug note;
/// they still count toward the receive total maintained by the loop.
#[derive(Debug)]
pub struct ReceiveSampler {
    sample_every: u64,
}

impl ReceiveSampler {
    /// Create a sampler logging every `sample_every`th datagram
    pub fn new(sample_every: u64) -> Self {
        debug_assert!(sample_every > 0);
        ReceiveSampler { sample_every }
    }

    /// Process one received datagram; `count` is the running receive total
    pub fn observe(&self, count: u64, data: &[u8], peer: SocketAddr) {
        let (header, payload) = match MessageHeader::decode(data) {
            Ok(parsed) => parsed,
            Err(e) => {
                log::debug!("dropping undecodable datagram from {}: {}", peer, e);
                return;
            }
        };

        if self.sampled(count) {
            log::info!(
                "rx[{}] {}B from {}, msg_type=0x{:02X} ret=0x{:02X} payload={:?}",
                count,
                data.len(),
                peer,
                header.message_type,
                header.return_code,
                String::from_utf8_lossy(payload)
            );
        }
    }

    /// The first datagram is always sampled, then every Nth after it
    fn sampled(&self, count: u64) -> bool {
        count % self.sample_every == 1 % self.sample_every
    }
}
