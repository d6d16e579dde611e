//! Run loop wiring the resolver, sampler, and publisher together.

use std::time::Duration;

use tokio::time::{self, MissedTickBehavior};
use tracing::{error, info};

use crate::config::Config;
use crate::publisher::Publisher;
use crate::resolver;
use crate::sampler::SystemSampler;

/// The agent: one sequential loop, no shared state beyond the cached
/// address and the collaborators it owns.
pub struct Agent {
    client_ip: String,
    interval: Duration,
    sampler: SystemSampler,
    publisher: Publisher,
}

impl Agent {
    /// Resolve the local address once and wire up the collaborators.
    pub fn new(config: &Config) -> Self {
        let client_ip = resolver::resolve_local_address().to_string();

        Self {
            client_ip,
            interval: config.interval,
            sampler: SystemSampler::new(),
            publisher: Publisher::new(config.server_url.clone()),
        }
    }

    /// The address every sample is stamped with.
    pub fn client_ip(&self) -> &str {
        &self.client_ip
    }

    /// Run the sample loop until the process is killed.
    ///
    /// A slow publish delays subsequent ticks; the ticker resumes the
    /// interval from completion rather than bursting to catch up.
    pub async fn run(mut self) {
        info!(
            endpoint = %self.publisher.endpoint(),
            client_ip = %self.client_ip,
            interval_secs = self.interval.as_secs(),
            "starting sample loop"
        );

        let mut ticker = time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;
            self.tick().await;
        }
    }

    /// One iteration: sample, publish, log the outcome.
    async fn tick(&mut self) {
        let sample = self.sampler.collect(&self.client_ip);

        match self.publisher.publish(&sample).await {
            Ok(()) => info!(?sample, "sample published"),
            Err(e) => error!(error = %e, "failed to publish sample"),
        }
    }
}
