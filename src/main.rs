//! taala-probe: SOME/IP cadence probe for the TC375 board
//!
//! Sends one fixed request every interval and samples whatever comes back,
//! reporting total counts on shutdown.

use std::env;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use taala_probe::config::AppConfig;
use taala_probe::error::{Error, Result};
use taala_probe::probe::{CadenceScheduler, Probe, ReceiveSampler};
use taala_probe::someip::{Frame, MessageType};
use taala_probe::transport::UdpEndpoint;

/// Configuration path tried when no argument is given
const DEFAULT_CONFIG_PATH: &str = "taala-probe.toml";

/// Parse config path from command line arguments.
///
/// Supports:
/// - `taala-probe <path>` (positional)
/// - `taala-probe --config <path>` (flag-based)
/// - `taala-probe -c <path>` (short flag)
fn parse_config_path() -> Option<String> {
    let args: Vec<String> = env::args().collect();

    // Look for --config or -c flag
    for i in 1..args.len() {
        if (args[i] == "--config" || args[i] == "-c") && i + 1 < args.len() {
            return Some(args[i + 1].clone());
        }
    }

    // Fall back to first positional argument (if it doesn't start with -)
    if args.len() > 1 && !args[1].starts_with('-') {
        return Some(args[1].clone());
    }

    None
}

/// An explicitly given path must load; the default path may be absent,
/// in which case the built-in TC375 bench defaults apply.
fn load_config() -> Result<AppConfig> {
    match parse_config_path() {
        Some(path) => AppConfig::from_file(path),
        None if Path::new(DEFAULT_CONFIG_PATH).exists() => AppConfig::from_file(DEFAULT_CONFIG_PATH),
        None => Ok(AppConfig::tc375_defaults()),
    }
}

fn main() -> Result<()> {
    let config = load_config()?;
    config.validate()?;

    // Initialize logger with the configured level as the default filter
    let mut builder = env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.logging.level.as_str()),
    );
    if config.logging.output == "stdout" {
        builder.target(env_logger::Target::Stdout);
    }
    builder.init();

    log::info!("taala-probe v{} starting...", env!("CARGO_PKG_VERSION"));
    log::info!(
        "target {} via {}, one request every {}ms, sampling every {} receives",
        config.network.target_address,
        config.network.bind_address,
        config.probe.send_interval_ms,
        config.probe.sample_every
    );

    // The fixed request frame, encoded once and reused for every send
    let request = Frame {
        service_id: config.request.service_id,
        method_id: config.request.method_id,
        request_id: config.request.request_id,
        protocol_version: config.request.protocol_version,
        interface_version: config.request.interface_version,
        message_type: MessageType::Request,
        return_code: 0x00,
        payload: config.request.payload.clone().into_bytes(),
    }
    .encode();

    // Bind failure is the only fatal condition; every failure after this
    // point is absorbed by the loop.
    let endpoint = UdpEndpoint::open(
        &config.network.bind_address,
        &config.network.target_address,
    )?;

    // Shutdown signal clears the flag; the loop checks it once per tick
    let running = Arc::new(AtomicBool::new(true));
    let r = Arc::clone(&running);
    ctrlc::set_handler(move || {
        log::info!("Received shutdown signal");
        r.store(false, Ordering::Relaxed);
    })
    .map_err(|e| Error::Other(format!("Error setting Ctrl-C handler: {}", e)))?;

    log::info!("Probe running. Press Ctrl-C to stop.");

    let probe = Probe::new(
        endpoint,
        request,
        CadenceScheduler::new(Duration::from_millis(config.probe.send_interval_ms)),
        ReceiveSampler::new(config.probe.sample_every),
        running,
    );

    let stats = probe.run();

    log::info!("Probe stopped: {}", stats);
    Ok(())
}
