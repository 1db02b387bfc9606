use serde::{Deserialize, Serialize};

/// Import payload matching the backend health-import model.
/// List order is preserved from the snapshot; absent scalar vitals
/// contribute no entry (never a null entry).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UploadPayload {
    pub lab_results: Vec<LabResultPayload>,
    pub vitals: Vec<VitalPayload>,
    pub medications: Vec<MedicationPayload>,
    pub activity_steps_per_day: Option<f64>,
    pub activity_active_minutes_per_day: Option<f64>,
    /// RFC 3339 timestamp of payload construction.
    pub import_date: String,
    /// Constant tag identifying the originating client.
    pub source_file: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LabResultPayload {
    pub test_name: String,
    pub value: f64,
    pub unit: String,
    pub date: String,
    pub source: String,
}

/// One snapshot-time vital reading. Unlike labs, vitals are stamped with
/// the payload construction time, not a per-metric observation date.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VitalPayload {
    #[serde(rename = "type")]
    pub kind: String,
    pub value: f64,
    pub unit: String,
    pub date: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MedicationPayload {
    pub name: String,
    pub dose: String,
    pub frequency: String,
    pub start_date: String,
    pub end_date: String,
    pub is_active: bool,
}

/// Backend response to a health import. Everything except `status` is
/// optional because the backend only reports values it computed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UploadResponse {
    pub status: String,
    pub lab_count: Option<u32>,
    pub vital_count: Option<u32>,
    pub medication_count: Option<u32>,
    pub estimated_ecog: Option<u8>,
    pub steps_per_day: Option<f64>,
    pub active_minutes_per_day: Option<f64>,
}

/// Backend-owned session processing state. Completion flags are
/// monotonic within a session: once observed true they never revert.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionState {
    pub session_id: String,
    /// Raw phase string; values outside the known pipeline parse to
    /// `None` via [`SessionPhase::parse`].
    pub phase: String,
    pub profile_complete: bool,
    pub search_complete: bool,
    pub matching_complete: bool,
    pub report_generated: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MatchedTrial {
    /// ClinicalTrials.gov identifier; stable key for display and dedup.
    pub nct_id: String,
    pub brief_title: String,
    pub phase: String,
    pub overall_status: String,
    pub fit_score: f64,
    pub fit_summary: String,
    pub plain_language_summary: String,
    pub interventions: Vec<String>,
    pub nearest_location: Option<TrialLocation>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TrialLocation {
    pub facility: String,
    pub city: String,
    pub state: String,
    pub distance_miles: Option<f64>,
}

/// The ordered session processing pipeline. The backend drives all
/// transitions; the client only reports where the session currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Intake,
    Search,
    Matching,
    Selection,
    Report,
}

impl SessionPhase {
    /// All phases in pipeline order.
    pub const ALL: [SessionPhase; 5] = [
        SessionPhase::Intake,
        SessionPhase::Search,
        SessionPhase::Matching,
        SessionPhase::Selection,
        SessionPhase::Report,
    ];

    /// Parse a backend phase string. Unknown values map to `None` so a
    /// newer backend can add phases without breaking older clients.
    pub fn parse(input: &str) -> Option<SessionPhase> {
        match input {
            "intake" => Some(SessionPhase::Intake),
            "search" => Some(SessionPhase::Search),
            "matching" => Some(SessionPhase::Matching),
            "selection" => Some(SessionPhase::Selection),
            "report" => Some(SessionPhase::Report),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SessionPhase::Intake => "intake",
            SessionPhase::Search => "search",
            SessionPhase::Matching => "matching",
            SessionPhase::Selection => "selection",
            SessionPhase::Report => "report",
        }
    }

    /// Progress label for presentation.
    pub fn label(self) -> &'static str {
        match self {
            SessionPhase::Intake => "Gathering profile",
            SessionPhase::Search => "Searching trials",
            SessionPhase::Matching => "Analyzing eligibility",
            SessionPhase::Selection => "Selecting trials",
            SessionPhase::Report => "Generating report",
        }
    }

    /// Position in the pipeline, 0-based.
    pub fn index(self) -> usize {
        match self {
            SessionPhase::Intake => 0,
            SessionPhase::Search => 1,
            SessionPhase::Matching => 2,
            SessionPhase::Selection => 3,
            SessionPhase::Report => 4,
        }
    }
}

/// Pipeline index of a raw phase string, `None` for unmapped phases.
pub fn phase_index(phase: &str) -> Option<usize> {
    SessionPhase::parse(phase).map(SessionPhase::index)
}
