use async_trait::async_trait;
use url::Url;

use super::types::{MatchedTrial, SessionState};
use super::ApiClient;
use crate::error::ApiError;

/// Read-only session resources consumed by the poller.
///
/// Both operations are single GETs with uniform failure semantics:
/// network error, non-2xx status, or malformed body. Implemented by
/// [`ApiClient`]; tests drive the poller with in-memory fakes.
#[async_trait]
pub trait SessionApi: Send + Sync {
    async fn fetch_session_state(&self, session_id: &str) -> Result<SessionState, ApiError>;

    async fn fetch_matched_trials(&self, session_id: &str)
        -> Result<Vec<MatchedTrial>, ApiError>;
}

#[async_trait]
impl SessionApi for ApiClient {
    async fn fetch_session_state(&self, session_id: &str) -> Result<SessionState, ApiError> {
        let url = self.config().session_url(session_id, "state");
        self.get_json(url).await
    }

    async fn fetch_matched_trials(
        &self,
        session_id: &str,
    ) -> Result<Vec<MatchedTrial>, ApiError> {
        let url = self.config().session_url(session_id, "matched-trials");
        self.get_json(url).await
    }
}

impl ApiClient {
    /// URL of the generated session report, for external rendering once
    /// `report_generated` is observed. The core never fetches or parses
    /// this resource.
    pub fn report_url(&self, session_id: &str) -> Url {
        self.config().session_url(session_id, "report")
    }
}
