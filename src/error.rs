use reqwest::StatusCode;
use thiserror::Error;

use crate::config::ClientConfigBuilderError;

/// Hard failures. Non-2xx responses are not errors; they come back in the
/// `SfResponse` envelope with `success == false`.
#[derive(Debug, Error)]
pub enum SfError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Response body is not valid JSON (status {status}): {source}")]
    MalformedBody {
        status: StatusCode,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to serialize record: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("Invalid credential bundle: {0}")]
    Credentials(String),

    #[error("Failed to read credential bundle: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),

    #[error("Invalid client configuration: {0}")]
    Config(String),
}

impl From<ClientConfigBuilderError> for SfError {
    fn from(err: ClientConfigBuilderError) -> Self {
        SfError::Config(err.to_string())
    }
}
