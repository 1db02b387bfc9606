use serde::Serialize;

/// One recorded upload session, newest-first in listings.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct UploadRecord {
    pub session_id: String,
    /// RFC 3339 timestamp of when the upload was recorded.
    pub imported_at: String,
    pub status: String,
    pub lab_count: Option<u32>,
    pub vital_count: Option<u32>,
    pub medication_count: Option<u32>,
    pub estimated_ecog: Option<u8>,
}
