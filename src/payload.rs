use chrono::{DateTime, SecondsFormat, Utc};

use crate::api::types::{LabResultPayload, MedicationPayload, UploadPayload, VitalPayload};
use crate::health::types::{HealthSnapshot, VitalKind};

/// Tag identifying this client in uploaded payloads.
pub const SOURCE_FILE: &str = "trialmate-client";

/// The vital kinds the backend accepts, in payload order.
pub const UPLOADED_VITALS: [VitalKind; 6] = [
    VitalKind::BodyMass,
    VitalKind::Height,
    VitalKind::BodyMassIndex,
    VitalKind::HeartRate,
    VitalKind::BloodPressureSystolic,
    VitalKind::BloodPressureDiastolic,
];

/// Build the backend import payload from a health snapshot.
///
/// Pure and infallible: absence of data is valid input, never an error.
/// Labs and medications map field-for-field in order; each present
/// recognized vital yields exactly one entry with its fixed tag and
/// unit, stamped with `now` (vitals are snapshot-time facts, unlike
/// date-stamped labs). `now` also becomes `import_date`.
pub fn build_payload(snapshot: &HealthSnapshot, now: DateTime<Utc>) -> UploadPayload {
    let stamp = now.to_rfc3339_opts(SecondsFormat::Secs, true);

    let lab_results = snapshot
        .lab_results
        .iter()
        .map(|lab| LabResultPayload {
            test_name: lab.test_name.clone(),
            value: lab.value,
            unit: lab.unit.clone(),
            date: lab.date.clone(),
            source: lab.source.clone(),
        })
        .collect();

    let vitals = UPLOADED_VITALS
        .iter()
        .filter_map(|&kind| {
            snapshot.scalar(kind).map(|value| VitalPayload {
                kind: kind.wire_type().to_string(),
                value,
                unit: kind.unit().to_string(),
                date: stamp.clone(),
            })
        })
        .collect();

    let medications = snapshot
        .medications
        .iter()
        .map(|med| MedicationPayload {
            name: med.name.clone(),
            dose: med.dose.clone(),
            frequency: med.frequency.clone(),
            start_date: med.start_date.clone(),
            end_date: med.end_date.clone(),
            is_active: med.is_active,
        })
        .collect();

    UploadPayload {
        lab_results,
        vitals,
        medications,
        activity_steps_per_day: snapshot.step_average,
        activity_active_minutes_per_day: snapshot.active_minutes_average,
        import_date: stamp,
        source_file: SOURCE_FILE.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::health::types::{LabResult, MedicationRecord};
    use chrono::TimeZone;

    fn test_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 8, 7, 12, 0, 0).unwrap()
    }

    fn full_snapshot() -> HealthSnapshot {
        HealthSnapshot {
            step_average: Some(5500.0),
            active_minutes_average: Some(34.0),
            weight_lb: Some(165.0),
            height_in: Some(69.0),
            bmi: Some(24.4),
            heart_rate_bpm: Some(78.0),
            bp_systolic: Some(128.0),
            bp_diastolic: Some(82.0),
            lab_results: vec![LabResult {
                test_name: "Hemoglobin A1c".to_string(),
                value: 5.9,
                unit: "%".to_string(),
                date: "2026-07-01T09:30:00Z".to_string(),
                source: "device-fhir".to_string(),
            }],
            medications: vec![MedicationRecord {
                name: "Metformin".to_string(),
                dose: "500mg".to_string(),
                frequency: "BID".to_string(),
                start_date: "2025-11-20".to_string(),
                end_date: String::new(),
                is_active: true,
            }],
            ..HealthSnapshot::default()
        }
    }

    #[test]
    fn test_empty_snapshot_builds_empty_payload() {
        let payload = build_payload(&HealthSnapshot::default(), test_now());
        assert!(payload.lab_results.is_empty());
        assert!(payload.vitals.is_empty());
        assert!(payload.medications.is_empty());
        assert_eq!(payload.activity_steps_per_day, None);
        assert_eq!(payload.activity_active_minutes_per_day, None);
        assert_eq!(payload.import_date, "2026-08-07T12:00:00Z");
        assert_eq!(payload.source_file, SOURCE_FILE);
    }

    #[test]
    fn test_full_snapshot_builds_six_vitals_in_order() {
        let payload = build_payload(&full_snapshot(), test_now());
        let kinds: Vec<&str> = payload.vitals.iter().map(|v| v.kind.as_str()).collect();
        assert_eq!(
            kinds,
            [
                "body_mass",
                "height",
                "bmi",
                "heart_rate",
                "blood_pressure_systolic",
                "blood_pressure_diastolic"
            ]
        );
        let units: Vec<&str> = payload.vitals.iter().map(|v| v.unit.as_str()).collect();
        assert_eq!(units, ["lb", "in", "count", "bpm", "mmHg", "mmHg"]);
        // All vitals carry the construction timestamp, not per-metric dates
        assert!(payload
            .vitals
            .iter()
            .all(|v| v.date == "2026-08-07T12:00:00Z"));
    }

    #[test]
    fn test_absent_fields_contribute_no_entry() {
        let snapshot = HealthSnapshot {
            height_in: Some(69.0),
            bp_diastolic: Some(82.0),
            ..HealthSnapshot::default()
        };
        let payload = build_payload(&snapshot, test_now());
        assert_eq!(payload.vitals.len(), 2);
        assert_eq!(payload.vitals[0].kind, "height");
        assert_eq!(payload.vitals[1].kind, "blood_pressure_diastolic");
    }

    #[test]
    fn test_vitals_count_matches_present_fields_with_unique_tags() {
        let snapshot = full_snapshot();
        let payload = build_payload(&snapshot, test_now());
        let present = UPLOADED_VITALS
            .iter()
            .filter(|&&k| snapshot.scalar(k).is_some())
            .count();
        assert_eq!(payload.vitals.len(), present);
        assert_eq!(payload.vitals.len(), 6);

        let mut tags: Vec<&str> = payload.vitals.iter().map(|v| v.kind.as_str()).collect();
        tags.sort_unstable();
        tags.dedup();
        assert_eq!(tags.len(), payload.vitals.len(), "duplicate vital tag");
    }

    #[test]
    fn test_display_only_vitals_are_not_uploaded() {
        let snapshot = HealthSnapshot {
            temperature_f: Some(98.6),
            oxygen_saturation_pct: Some(97.0),
            vo2_max: Some(41.0),
            ..HealthSnapshot::default()
        };
        let payload = build_payload(&snapshot, test_now());
        assert!(payload.vitals.is_empty());
    }

    #[test]
    fn test_labs_and_medications_map_field_for_field() {
        let payload = build_payload(&full_snapshot(), test_now());

        assert_eq!(payload.lab_results.len(), 1);
        let lab = &payload.lab_results[0];
        assert_eq!(lab.test_name, "Hemoglobin A1c");
        assert_eq!(lab.value, 5.9);
        assert_eq!(lab.unit, "%");
        assert_eq!(lab.date, "2026-07-01T09:30:00Z");
        assert_eq!(lab.source, "device-fhir");

        assert_eq!(payload.medications.len(), 1);
        let med = &payload.medications[0];
        assert_eq!(med.name, "Metformin");
        assert_eq!(med.dose, "500mg");
        assert_eq!(med.frequency, "BID");
        assert_eq!(med.start_date, "2025-11-20");
        assert!(med.is_active);
    }

    #[test]
    fn test_activity_averages_pass_through() {
        let payload = build_payload(&full_snapshot(), test_now());
        assert_eq!(payload.activity_steps_per_day, Some(5500.0));
        assert_eq!(payload.activity_active_minutes_per_day, Some(34.0));
    }

    #[test]
    fn test_wire_field_names() {
        let payload = build_payload(&full_snapshot(), test_now());
        let json = serde_json::to_value(&payload).unwrap();

        for key in [
            "lab_results",
            "vitals",
            "medications",
            "activity_steps_per_day",
            "activity_active_minutes_per_day",
            "import_date",
            "source_file",
        ] {
            assert!(json.get(key).is_some(), "missing payload key {}", key);
        }
        assert_eq!(json["vitals"][0]["type"], "body_mass");
        assert_eq!(json["lab_results"][0]["test_name"], "Hemoglobin A1c");
        assert_eq!(json["medications"][0]["is_active"], true);
    }

    #[test]
    fn test_empty_snapshot_serializes_null_activity() {
        let payload = build_payload(&HealthSnapshot::default(), test_now());
        let json = serde_json::to_value(&payload).unwrap();
        assert!(json["activity_steps_per_day"].is_null());
        assert!(json["activity_active_minutes_per_day"].is_null());
        assert_eq!(json["vitals"].as_array().unwrap().len(), 0);
    }
}
