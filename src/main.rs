//! Host telemetry agent binary.
//!
//! Reads its three configuration values from the environment, opens the
//! diagnostic log, resolves the local address once, then samples and
//! publishes forever.

use anyhow::{Context, Result};
use tracing::{info, warn};

use hostbeat::{Agent, Config, init_tracing};

#[tokio::main]
async fn main() -> Result<()> {
    let (config, warnings) = Config::from_env();

    // The one unrecoverable startup condition: the log file is the sole
    // error-visibility channel, so without it the agent aborts.
    init_tracing(&config.log_file_path).with_context(|| {
        format!(
            "cannot open log file '{}'",
            config.log_file_path.display()
        )
    })?;

    for warning in &warnings {
        warn!("{}", warning);
    }

    info!(version = env!("CARGO_PKG_VERSION"), "host telemetry agent started");

    let agent = Agent::new(&config);
    agent.run().await;

    Ok(())
}
