//! Environment-derived configuration.
//!
//! The agent takes exactly three values from the environment, each with
//! a hardcoded default. A malformed interval is never fatal: it falls
//! back to the default and surfaces as a startup warning, logged once
//! tracing is up.

use std::path::PathBuf;
use std::time::Duration;

/// Default destination for metric POSTs.
pub const DEFAULT_SERVER_URL: &str = "http://192.168.1.180/monitor/monitor.php";

/// Default append-mode diagnostic log.
pub const DEFAULT_LOG_FILE_PATH: &str = "/var/log/monitor/monitor.log";

/// Default seconds between samples.
pub const DEFAULT_INTERVAL_SECS: u64 = 20;

/// Agent configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Endpoint that receives the JSON samples.
    pub server_url: String,

    /// Log file, opened for append at startup.
    pub log_file_path: PathBuf,

    /// Time between samples.
    pub interval: Duration,
}

impl Config {
    /// Read the configuration from the process environment.
    ///
    /// Returns the config plus any soft-error warnings. Warnings cannot
    /// be logged here because tracing is initialized only after the log
    /// path is known.
    pub fn from_env() -> (Self, Vec<String>) {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> (Self, Vec<String>) {
        let mut warnings = Vec::new();

        let server_url = lookup("SERVER_URL").unwrap_or_else(|| DEFAULT_SERVER_URL.to_string());

        let log_file_path = lookup("LOG_FILE_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE_PATH));

        let interval_secs = match lookup("INTERVAL_SECONDS") {
            Some(raw) => match raw.parse::<u64>() {
                Ok(0) => {
                    warnings.push(format!(
                        "INTERVAL_SECONDS must be > 0, got '{}'; using default {}s",
                        raw, DEFAULT_INTERVAL_SECS
                    ));
                    DEFAULT_INTERVAL_SECS
                }
                Ok(secs) => secs,
                Err(e) => {
                    warnings.push(format!(
                        "Invalid INTERVAL_SECONDS '{}': {}; using default {}s",
                        raw, e, DEFAULT_INTERVAL_SECS
                    ));
                    DEFAULT_INTERVAL_SECS
                }
            },
            None => DEFAULT_INTERVAL_SECS,
        };

        let config = Self {
            server_url,
            log_file_path,
            interval: Duration::from_secs(interval_secs),
        };

        (config, warnings)
    }
}
