use thiserror::Error;

/// Result type alias using the agent's [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Common error type for the agent.
///
/// The three publish failure sites (serialization, transport, response
/// read) are separate variants, but the run loop treats them uniformly;
/// only the rendered message distinguishes them in the log.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to serialize sample: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("Failed to POST sample to {url}: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to read server response: {0}")]
    ResponseRead(#[source] reqwest::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
