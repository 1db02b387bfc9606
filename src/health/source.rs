use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use serde_json::Value;

use super::types::VitalKind;

/// Daily activity aggregates the collector reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityMetric {
    Steps,
    ActiveMinutes,
}

/// One day's cumulative total for an activity metric. Days with no
/// recorded samples produce no entry at all.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyTotal {
    pub day: NaiveDate,
    pub total: f64,
}

/// Clinical record categories the collector reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClinicalRecordKind {
    LabResult,
    Medication,
}

/// A clinical record as surfaced by the device store: a display name
/// plus the embedded structured resource document, passed through
/// unparsed so extraction stays tolerant of per-provider variation.
#[derive(Debug, Clone, PartialEq)]
pub struct ClinicalDocument {
    pub display_name: String,
    pub resource: Value,
}

/// Boundary to the device health store.
///
/// Production implementations wrap the platform health API; tests use
/// in-memory fakes. All lookups are total: a store with no data answers
/// with empty collections or `None`, never an error.
#[async_trait]
pub trait HealthSource: Send + Sync {
    /// Per-day cumulative totals for `metric` between `start` and `end`.
    /// Days without samples are omitted, not reported as zero.
    async fn daily_totals(
        &self,
        metric: ActivityMetric,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Vec<DailyTotal>;

    /// Most recent sample for `kind`, converted to `kind.unit()`.
    /// `None` when the store holds no sample of that kind.
    async fn latest_quantity(&self, kind: VitalKind) -> Option<f64>;

    /// All clinical records of `kind`, each carrying its embedded
    /// structured resource.
    async fn clinical_records(&self, kind: ClinicalRecordKind) -> Vec<ClinicalDocument>;
}
