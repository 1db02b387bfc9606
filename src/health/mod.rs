pub mod ecog;
pub mod fhir;
pub mod source;
pub mod types;

use chrono::{Duration, Utc};
use tracing::info;

use self::source::{ActivityMetric, ClinicalRecordKind, DailyTotal, HealthSource};
use self::types::{HealthSnapshot, VitalKind};

/// Trailing window for activity averages, in days.
const ACTIVITY_WINDOW_DAYS: i64 = 30;

/// All vital kinds the collector reads, in snapshot order.
const COLLECTED_VITALS: [VitalKind; 11] = [
    VitalKind::BodyMass,
    VitalKind::Height,
    VitalKind::BodyMassIndex,
    VitalKind::HeartRate,
    VitalKind::BloodPressureSystolic,
    VitalKind::BloodPressureDiastolic,
    VitalKind::BodyTemperature,
    VitalKind::RespiratoryRate,
    VitalKind::OxygenSaturation,
    VitalKind::BloodGlucose,
    VitalKind::Vo2Max,
];

/// Average of the recorded daily totals. Days absent from the store are
/// excluded from the divisor, never counted as zero; no recorded days
/// means no average.
fn average_daily(totals: &[DailyTotal]) -> Option<f64> {
    if totals.is_empty() {
        return None;
    }
    Some(totals.iter().map(|t| t.total).sum::<f64>() / totals.len() as f64)
}

/// Read a full health snapshot from the device store.
///
/// Runs the activity, vitals, and clinical lookups over a trailing
/// 30-day window and assembles the result. Never fails: a store with no
/// data yields an empty snapshot, and malformed clinical records are
/// skipped individually.
pub async fn collect_snapshot<S: HealthSource>(source: &S) -> HealthSnapshot {
    let end = Utc::now();
    let start = end - Duration::days(ACTIVITY_WINDOW_DAYS);

    let mut snapshot = HealthSnapshot::default();

    let steps = source.daily_totals(ActivityMetric::Steps, start, end).await;
    snapshot.step_average = average_daily(&steps);

    let active = source
        .daily_totals(ActivityMetric::ActiveMinutes, start, end)
        .await;
    snapshot.active_minutes_average = average_daily(&active);

    for kind in COLLECTED_VITALS {
        let value = source.latest_quantity(kind).await;
        snapshot.set_scalar(kind, value);
    }

    let labs = source.clinical_records(ClinicalRecordKind::LabResult).await;
    snapshot.lab_results = labs.iter().filter_map(fhir::lab_from_document).collect();

    let meds = source.clinical_records(ClinicalRecordKind::Medication).await;
    snapshot.medications = meds
        .iter()
        .filter_map(fhir::medication_from_document)
        .collect();

    info!(
        "Collected snapshot: {} labs, {} medications, steps/day={:?}, active min/day={:?}",
        snapshot.lab_results.len(),
        snapshot.medications.len(),
        snapshot.step_average,
        snapshot.active_minutes_average
    );
    snapshot
}
