//! HTTP delivery of samples.

use reqwest::header::CONTENT_TYPE;
use tracing::info;

use crate::error::{Error, Result};
use crate::sample::Sample;

/// Sends samples to the configured endpoint as JSON.
///
/// One client is built at startup and reused; transport timeouts are
/// whatever reqwest defaults to. There is no retry and no buffering: a
/// failed publish drops the sample.
pub struct Publisher {
    client: reqwest::Client,
    endpoint: String,
}

impl Publisher {
    /// Create a publisher for the given endpoint URL.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }

    /// The endpoint this publisher delivers to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Serialize and POST one sample.
    ///
    /// The response body is read in full and logged verbatim for
    /// diagnostics; it is never parsed or acted upon.
    pub async fn publish(&self, sample: &Sample) -> Result<()> {
        let body = serde_json::to_vec(sample).map_err(Error::Serialize)?;

        let response = self
            .client
            .post(&self.endpoint)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(|e| Error::Request {
                url: self.endpoint.clone(),
                source: e,
            })?;

        let status = response.status();
        let reply = response.text().await.map_err(Error::ResponseRead)?;
        info!(%status, reply = %reply, "server response");

        Ok(())
    }
}
