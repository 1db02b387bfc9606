use serde_json::Value;

use super::source::ClinicalDocument;
use super::types::{LabResult, MedicationRecord};

/// Source label attached to records extracted from device FHIR documents.
pub const CLINICAL_SOURCE: &str = "device-fhir";

/// Extract a lab result from an embedded FHIR Observation document.
///
/// Returns `None` when the embedded resource is not a JSON object; the
/// record is skipped, never an error for the whole batch. Missing fields
/// inside an object degrade to defaults (0 value, empty unit/date).
pub fn lab_from_document(doc: &ClinicalDocument) -> Option<LabResult> {
    let resource = doc.resource.as_object()?;

    let quantity = resource.get("valueQuantity").and_then(Value::as_object);
    let value = quantity
        .and_then(|q| q.get("value"))
        .and_then(Value::as_f64)
        .unwrap_or(0.0);
    let unit = quantity
        .and_then(|q| q.get("unit"))
        .and_then(Value::as_str)
        .unwrap_or("")
        .to_string();
    let date = resource
        .get("effectiveDateTime")
        .and_then(Value::as_str)
        .unwrap_or("")
        .to_string();

    Some(LabResult {
        test_name: doc.display_name.clone(),
        value,
        unit,
        date,
        source: CLINICAL_SOURCE.to_string(),
    })
}

/// Extract a medication from an embedded FHIR MedicationRequest-style
/// document: active flag from `status`, start date from `authoredOn`.
/// Dose and frequency are not present in these documents and stay empty.
pub fn medication_from_document(doc: &ClinicalDocument) -> Option<MedicationRecord> {
    let resource = doc.resource.as_object()?;

    let status = resource.get("status").and_then(Value::as_str).unwrap_or("");
    let start_date = resource
        .get("authoredOn")
        .and_then(Value::as_str)
        .unwrap_or("")
        .to_string();

    Some(MedicationRecord {
        name: doc.display_name.clone(),
        dose: String::new(),
        frequency: String::new(),
        start_date,
        end_date: String::new(),
        is_active: status == "active",
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(name: &str, resource: Value) -> ClinicalDocument {
        ClinicalDocument {
            display_name: name.to_string(),
            resource,
        }
    }

    #[test]
    fn test_lab_extraction_full() {
        let lab = lab_from_document(&doc(
            "Hemoglobin A1c",
            json!({
                "resourceType": "Observation",
                "valueQuantity": { "value": 5.9, "unit": "%" },
                "effectiveDateTime": "2026-07-01T09:30:00Z"
            }),
        ))
        .unwrap();

        assert_eq!(lab.test_name, "Hemoglobin A1c");
        assert_eq!(lab.value, 5.9);
        assert_eq!(lab.unit, "%");
        assert_eq!(lab.date, "2026-07-01T09:30:00Z");
        assert_eq!(lab.source, CLINICAL_SOURCE);
    }

    #[test]
    fn test_lab_extraction_missing_fields_default() {
        let lab = lab_from_document(&doc("CBC Panel", json!({ "resourceType": "Observation" })))
            .unwrap();
        assert_eq!(lab.value, 0.0);
        assert_eq!(lab.unit, "");
        assert_eq!(lab.date, "");
    }

    #[test]
    fn test_lab_extraction_non_object_skips_record() {
        assert!(lab_from_document(&doc("Broken", json!("just a string"))).is_none());
        assert!(lab_from_document(&doc("Broken", json!(null))).is_none());
        assert!(lab_from_document(&doc("Broken", json!([1, 2, 3]))).is_none());
    }

    #[test]
    fn test_medication_extraction_active() {
        let med = medication_from_document(&doc(
            "Metformin 500mg",
            json!({ "status": "active", "authoredOn": "2025-11-20" }),
        ))
        .unwrap();

        assert_eq!(med.name, "Metformin 500mg");
        assert!(med.is_active);
        assert_eq!(med.start_date, "2025-11-20");
        assert_eq!(med.dose, "");
        assert_eq!(med.frequency, "");
        assert_eq!(med.end_date, "");
    }

    #[test]
    fn test_medication_extraction_inactive_statuses() {
        for status in ["stopped", "completed", ""] {
            let med = medication_from_document(&doc(
                "Old Med",
                json!({ "status": status, "authoredOn": "2024-01-01" }),
            ))
            .unwrap();
            assert!(!med.is_active, "status {:?} should not be active", status);
        }
    }

    #[test]
    fn test_medication_extraction_non_object_skips_record() {
        assert!(medication_from_document(&doc("Broken", json!(42))).is_none());
    }
}
