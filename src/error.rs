use thiserror::Error;

/// Failures surfaced by backend exchanges and configuration.
///
/// Fetch operations raise `Network`, `Status`, or `Decode`; `InvalidUrl`
/// only comes out of configuration changes. Status and decode failures
/// keep the raw response body so callers can show a diagnosable message.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(#[source] reqwest::Error),

    #[error("server returned {code}: {body}")]
    Status { code: u16, body: String },

    #[error("failed to decode response ({source}); body: {body}")]
    Decode {
        #[source]
        source: serde_json::Error,
        body: String,
    },

    #[error("invalid backend URL '{input}': {reason}")]
    InvalidUrl { input: String, reason: String },
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::Network(err)
    }
}
