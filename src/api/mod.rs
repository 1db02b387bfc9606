pub mod session;
pub mod types;
pub mod upload;

use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use tracing::{info, warn};
use url::Url;

use crate::config::BackendConfig;
use crate::error::ApiError;

const USER_AGENT: &str = "TrialMate/1.0";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP client for the Clinical Trial Copilot backend.
///
/// Holds one connection-pooling `reqwest::Client` and the shared backend
/// configuration; every request resolves its URL against the currently
/// configured base. Performs no retries and no caching; both are the
/// caller's concern.
pub struct ApiClient {
    http: reqwest::Client,
    config: Arc<BackendConfig>,
}

impl ApiClient {
    pub fn new(config: Arc<BackendConfig>) -> Self {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to build reqwest client");

        Self { http, config }
    }

    pub fn config(&self) -> &BackendConfig {
        &self.config
    }

    /// GET a resource and decode its JSON body.
    pub(crate) async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, ApiError> {
        info!("GET {}", url);
        let response = self.http.get(url).send().await?;
        decode_response(response).await
    }
}

/// Check the response status and decode the body.
///
/// Any 2xx status is success; the body must then parse into `T`. Non-2xx
/// and unparsable bodies both keep the raw body text for diagnostics.
pub(crate) async fn decode_response<T: DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, ApiError> {
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        warn!("Request failed with {}: {}", status, body);
        return Err(ApiError::Status {
            code: status.as_u16(),
            body,
        });
    }

    serde_json::from_str(&body).map_err(|source| ApiError::Decode { source, body })
}
