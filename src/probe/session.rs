//! Probe control loop and session accounting
//!
//! Single thread of control. Each tick checks the cancellation flag, issues
//! a due send, attempts one non-blocking receive, then yields. The due send
//! always comes before the receive attempt, so inbound traffic can delay the
//! cadence by at most one tick.

use crate::probe::sampler::ReceiveSampler;
use crate::probe::scheduler::CadenceScheduler;
use crate::transport::Endpoint;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Instant;

/// Receive buffer size, generous headroom over the 38-byte request frame
pub const MAX_DATAGRAM_SIZE: usize = 2048;

/// Counters accumulated over one probe run
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SessionStats {
    /// Successfully sent requests
    pub sent: u64,
    /// Successfully read datagrams, decodable or not
    pub received: u64,
    /// Send attempts that failed at the transport layer
    pub send_errors: u64,
}

impl fmt::Display for SessionStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "sent={} received={} send_errors={}",
            self.sent, self.received, self.send_errors
        )
    }
}

/// The probe: scheduler and sampler interleaved over one endpoint
pub struct Probe<E: Endpoint> {
    endpoint: E,
    request: Vec<u8>,
    scheduler: CadenceScheduler,
    sampler: ReceiveSampler,
    running: Arc<AtomicBool>,
}

impl<E: Endpoint> Probe<E> {
    /// Create a probe over an already open endpoint
    ///
    /// `request` is the encoded request frame, reused for every send.
    pub fn new(
        endpoint: E,
        request: Vec<u8>,
        scheduler: CadenceScheduler,
        sampler: ReceiveSampler,
        running: Arc<AtomicBool>,
    ) -> Self {
        Probe {
            endpoint,
            request,
            scheduler,
            sampler,
            running,
        }
    }

    /// Run until the cancellation flag clears, returning the final counters
    ///
    /// Every steady-state failure is absorbed here: a failed send or a
    /// malformed datagram never interrupts the cadence. The endpoint is
    /// released when this returns.
    pub fn run(mut self) -> SessionStats {
        let mut stats = SessionStats::default();
        let mut buf = [0u8; MAX_DATAGRAM_SIZE];

        while self.running.load(Ordering::Relaxed) {
            let now = Instant::now();

            if self.scheduler.poll(now) {
                match self.endpoint.send(&self.request) {
                    Ok(_) => stats.sent += 1,
                    Err(e) => {
                        stats.send_errors += 1;
                        log::warn!("send failed: {}", e);
                    }
                }
            }

            match self.endpoint.try_recv(&mut buf) {
                Ok(Some((len, peer))) => {
                    stats.received += 1;
                    self.sampler.observe(stats.received, &buf[..len], peer);
                }
                Ok(None) => {}
                Err(e) => log::warn!("receive error: {}", e),
            }

            thread::yield_now();
        }

        stats
    }
}
