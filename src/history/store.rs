use std::path::Path;

use chrono::Utc;
use rusqlite::{params, Connection, Row};
use tracing::info;

use super::types::UploadRecord;
use crate::api::types::UploadResponse;

/// SQLite store of completed uploads.
///
/// Lets a relaunched client find its most recent session and resume
/// tracking it. All operations are synchronous (rusqlite is blocking);
/// callers in async contexts should use `tokio::task::spawn_blocking`.
pub struct UploadHistory {
    conn: Connection,
}

impl UploadHistory {
    /// Create or open the history database at the given path.
    pub fn new(db_path: &Path) -> Result<Self, String> {
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create data dir: {}", e))?;
        }

        let conn = Connection::open(db_path)
            .map_err(|e| format!("Failed to open history db: {}", e))?;

        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS upload_sessions (
                session_id TEXT PRIMARY KEY,
                imported_at TEXT NOT NULL,
                status TEXT NOT NULL,
                lab_count INTEGER,
                vital_count INTEGER,
                medication_count INTEGER,
                estimated_ecog INTEGER
            );
            CREATE INDEX IF NOT EXISTS idx_upload_sessions_imported
                ON upload_sessions(imported_at DESC);",
        )
        .map_err(|e| format!("Failed to create history table: {}", e))?;

        info!("Opened upload history database at {:?}", db_path);
        Ok(Self { conn })
    }

    /// Record a completed upload. Re-uploading for the same session
    /// overwrites its previous record.
    pub fn record(&self, session_id: &str, response: &UploadResponse) -> Result<(), String> {
        let imported_at = Utc::now().to_rfc3339();

        self.conn
            .execute(
                "INSERT OR REPLACE INTO upload_sessions
                 (session_id, imported_at, status, lab_count, vital_count,
                  medication_count, estimated_ecog)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![
                    session_id,
                    imported_at,
                    response.status,
                    response.lab_count,
                    response.vital_count,
                    response.medication_count,
                    response.estimated_ecog,
                ],
            )
            .map_err(|e| format!("Failed to record upload: {}", e))?;

        info!("Recorded upload for session {}", session_id);
        Ok(())
    }

    /// All recorded uploads, newest first.
    pub fn list(&self) -> Result<Vec<UploadRecord>, String> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT session_id, imported_at, status, lab_count, vital_count,
                        medication_count, estimated_ecog
                 FROM upload_sessions
                 ORDER BY imported_at DESC",
            )
            .map_err(|e| format!("Failed to prepare history query: {}", e))?;

        let rows = stmt
            .query_map([], row_to_record)
            .map_err(|e| format!("Failed to query history: {}", e))?;

        rows.collect::<Result<Vec<_>, _>>()
            .map_err(|e| format!("Failed to read history row: {}", e))
    }

    /// The most recently recorded upload, if any.
    pub fn latest(&self) -> Result<Option<UploadRecord>, String> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT session_id, imported_at, status, lab_count, vital_count,
                        medication_count, estimated_ecog
                 FROM upload_sessions
                 ORDER BY imported_at DESC
                 LIMIT 1",
            )
            .map_err(|e| format!("Failed to prepare history query: {}", e))?;

        match stmt.query_row([], row_to_record) {
            Ok(record) => Ok(Some(record)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(format!("Failed to read latest upload: {}", e)),
        }
    }
}

fn row_to_record(row: &Row<'_>) -> rusqlite::Result<UploadRecord> {
    Ok(UploadRecord {
        session_id: row.get(0)?,
        imported_at: row.get(1)?,
        status: row.get(2)?,
        lab_count: row.get(3)?,
        vital_count: row.get(4)?,
        medication_count: row.get(5)?,
        estimated_ecog: row.get(6)?,
    })
}
