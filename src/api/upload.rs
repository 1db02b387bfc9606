use tracing::info;

use super::types::{UploadPayload, UploadResponse};
use super::{decode_response, ApiClient};
use crate::error::ApiError;

impl ApiClient {
    /// Upload a health import payload for the given session.
    ///
    /// One POST to the session-scoped import resource. Any 2xx status
    /// with a well-formed body succeeds; everything else surfaces as an
    /// [`ApiError`] carrying the status code and raw body. No retry is
    /// performed here; a failed upload leaves the session untracked and
    /// the caller decides what to surface.
    pub async fn upload_health_data(
        &self,
        session_id: &str,
        payload: &UploadPayload,
    ) -> Result<UploadResponse, ApiError> {
        let url = self.config().session_url(session_id, "health-import-json");
        info!(
            "Uploading health import for session {}: {} labs, {} vitals, {} medications",
            session_id,
            payload.lab_results.len(),
            payload.vitals.len(),
            payload.medications.len()
        );

        let response = self.http.post(url).json(payload).send().await?;
        let imported: UploadResponse = decode_response(response).await?;

        info!(
            "Import accepted for session {}: status={}, estimated_ecog={:?}",
            session_id, imported.status, imported.estimated_ecog
        );
        Ok(imported)
    }
}
