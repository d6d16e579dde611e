//! Minimal host telemetry agent.
//!
//! Samples CPU, memory, and disk utilization via `sysinfo`, stamps each
//! sample with the machine's best-guess LAN IPv4 address, and POSTs it
//! as JSON to a configured HTTP endpoint on a fixed interval:
//!
//! - [`config`] - environment-derived configuration
//! - [`resolver`] - local address resolution
//! - [`sampler`] - OS metric queries
//! - [`sample`] - the wire record
//! - [`publisher`] - HTTP JSON delivery
//! - [`agent`] - the run loop
//! - [`error`] - error types
//!
//! # Wire format
//!
//! ```text
//! POST <SERVER_URL>  Content-Type: application/json
//! {"clientIP":"192.168.1.42","cpuUsage":12.5,"memoryUsage":47.3,"diskUsage":88.0}
//! ```

pub mod agent;
pub mod config;
pub mod error;
pub mod publisher;
pub mod resolver;
pub mod sample;
pub mod sampler;

// Re-export commonly used types at the crate root
pub use agent::Agent;
pub use config::Config;
pub use error::{Error, Result};
pub use publisher::Publisher;
pub use sample::Sample;

use std::fs::{File, OpenOptions};
use std::path::Path;

/// Open the diagnostic log file for append, creating it if needed.
pub fn open_log_file(path: &Path) -> std::io::Result<File> {
    OpenOptions::new().create(true).append(true).open(path)
}

/// Initialize tracing, writing to the append-mode log file at `path`.
///
/// The log file is the agent's sole visibility channel; failing to open
/// it is the one fatal startup condition. `RUST_LOG` overrides the
/// default `info` level filter.
pub fn init_tracing(path: &Path) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let file = open_log_file(path)?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_ansi(false)
                .with_writer(std::sync::Mutex::new(file)),
        )
        .with(filter)
        .try_init()
        .map_err(|e| Error::Config(format!("Failed to initialize tracing: {}", e)))?;

    Ok(())
}
