//! End-to-end loopback run: the probe against a local echo responder

use std::net::UdpSocket;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use taala_probe::probe::{CadenceScheduler, Probe, ReceiveSampler};
use taala_probe::someip::{Frame, MessageHeader, MessageType};
use taala_probe::transport::UdpEndpoint;

const INTERVAL_MS: u64 = 10;
const RUN_MS: u64 = 300;

/// Blocking responder that answers every request with a RESPONSE frame
/// echoing the request payload.
fn spawn_responder(socket: UdpSocket, alive: Arc<AtomicBool>) -> thread::JoinHandle<u64> {
    thread::spawn(move || {
        let mut buf = [0u8; 2048];
        let mut answered = 0u64;

        while alive.load(Ordering::Relaxed) {
            match socket.recv_from(&mut buf) {
                Ok((len, peer)) => {
                    let (header, payload) = MessageHeader::decode(&buf[..len]).unwrap();
                    assert_eq!(header.message_type, MessageType::Request as u8);
                    assert_eq!(header.length, 8 + payload.len() as u32);

                    let reply = Frame {
                        service_id: header.service_id,
                        method_id: header.method_id,
                        request_id: header.request_id,
                        protocol_version: header.protocol_version,
                        interface_version: header.interface_version,
                        message_type: MessageType::Response,
                        return_code: 0x00,
                        payload: payload.to_vec(),
                    }
                    .encode();
                    socket.send_to(&reply, peer).unwrap();
                    answered += 1;
                }
                Err(_) => {
                    // Read timeout, check the alive flag again
                }
            }
        }

        answered
    })
}

#[test]
fn probe_run_against_echo_responder() {
    let responder_socket = UdpSocket::bind("127.0.0.1:0").unwrap();
    responder_socket
        .set_read_timeout(Some(Duration::from_millis(20)))
        .unwrap();
    let responder_addr = responder_socket.local_addr().unwrap();

    let responder_alive = Arc::new(AtomicBool::new(true));
    let responder = spawn_responder(responder_socket, Arc::clone(&responder_alive));

    let endpoint = UdpEndpoint::open("127.0.0.1:0", &responder_addr.to_string()).unwrap();

    let request = Frame {
        service_id: 0x0100,
        method_id: 0x0103,
        request_id: 1,
        protocol_version: 1,
        interface_version: 1,
        message_type: MessageType::Request,
        return_code: 0x00,
        payload: b"250;250;0;0;0;0;0;1;1\n".to_vec(),
    }
    .encode();

    let running = Arc::new(AtomicBool::new(true));
    let stop_flag = Arc::clone(&running);
    let stopper = thread::spawn(move || {
        thread::sleep(Duration::from_millis(RUN_MS));
        stop_flag.store(false, Ordering::Relaxed);
    });

    let probe = Probe::new(
        endpoint,
        request,
        CadenceScheduler::new(Duration::from_millis(INTERVAL_MS)),
        ReceiveSampler::new(10),
        running,
    );

    let started = Instant::now();
    let stats = probe.run();
    let elapsed = started.elapsed();

    stopper.join().unwrap();
    responder_alive.store(false, Ordering::Relaxed);
    let answered = responder.join().unwrap();

    // The cadence bound: never more than one send per interval plus the
    // immediate first tick, however long the stopper actually slept.
    let upper = elapsed.as_millis() as u64 / INTERVAL_MS + 2;
    assert!(
        stats.sent <= upper,
        "sent {} over {}ms (bound {})",
        stats.sent,
        elapsed.as_millis(),
        upper
    );
    assert!(stats.sent >= 15, "sent only {} in {}ms", stats.sent, elapsed.as_millis());
    assert_eq!(stats.send_errors, 0);

    // Every response the probe saw came from the responder, one per request
    assert!(stats.received >= 1, "no responses received");
    assert!(stats.received <= answered);
    assert!(answered <= stats.sent);
}
