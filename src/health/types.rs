use serde::{Deserialize, Serialize};

/// Vital kinds the client reads from the device store.
///
/// The first six are the kinds the backend accepts in uploads; the rest
/// are read for on-device display only. Each kind has a fixed wire tag
/// and a fixed unit the device value is requested in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VitalKind {
    BodyMass,
    Height,
    BodyMassIndex,
    HeartRate,
    BloodPressureSystolic,
    BloodPressureDiastolic,
    BodyTemperature,
    RespiratoryRate,
    OxygenSaturation,
    BloodGlucose,
    Vo2Max,
}

impl VitalKind {
    pub fn wire_type(self) -> &'static str {
        match self {
            VitalKind::BodyMass => "body_mass",
            VitalKind::Height => "height",
            VitalKind::BodyMassIndex => "bmi",
            VitalKind::HeartRate => "heart_rate",
            VitalKind::BloodPressureSystolic => "blood_pressure_systolic",
            VitalKind::BloodPressureDiastolic => "blood_pressure_diastolic",
            VitalKind::BodyTemperature => "body_temperature",
            VitalKind::RespiratoryRate => "respiratory_rate",
            VitalKind::OxygenSaturation => "oxygen_saturation",
            VitalKind::BloodGlucose => "blood_glucose",
            VitalKind::Vo2Max => "vo2_max",
        }
    }

    /// Unit the device value is requested and reported in.
    pub fn unit(self) -> &'static str {
        match self {
            VitalKind::BodyMass => "lb",
            VitalKind::Height => "in",
            VitalKind::BodyMassIndex => "count",
            VitalKind::HeartRate => "bpm",
            VitalKind::BloodPressureSystolic => "mmHg",
            VitalKind::BloodPressureDiastolic => "mmHg",
            VitalKind::BodyTemperature => "degF",
            VitalKind::RespiratoryRate => "count/min",
            VitalKind::OxygenSaturation => "%",
            VitalKind::BloodGlucose => "mg/dL",
            VitalKind::Vo2Max => "mL/kg/min",
        }
    }
}

/// A lab result extracted from a clinical record. Constructed once,
/// never mutated.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LabResult {
    pub test_name: String,
    pub value: f64,
    pub unit: String,
    pub date: String,
    pub source: String,
}

/// A medication extracted from a clinical record. Constructed once,
/// never mutated.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MedicationRecord {
    pub name: String,
    pub dose: String,
    pub frequency: String,
    pub start_date: String,
    pub end_date: String,
    pub is_active: bool,
}

/// A point-in-time set of health observations. Every field is
/// independently optional; a completely empty snapshot is valid input
/// everywhere it is consumed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HealthSnapshot {
    /// 30-day average steps per day.
    pub step_average: Option<f64>,
    /// 30-day average active minutes per day.
    pub active_minutes_average: Option<f64>,

    pub weight_lb: Option<f64>,
    pub height_in: Option<f64>,
    pub bmi: Option<f64>,
    pub heart_rate_bpm: Option<f64>,
    pub bp_systolic: Option<f64>,
    pub bp_diastolic: Option<f64>,

    // Display-only vitals, not part of the upload payload.
    pub temperature_f: Option<f64>,
    pub respiratory_rate: Option<f64>,
    pub oxygen_saturation_pct: Option<f64>,
    pub blood_glucose_mg_dl: Option<f64>,
    pub vo2_max: Option<f64>,

    pub lab_results: Vec<LabResult>,
    pub medications: Vec<MedicationRecord>,
}

impl HealthSnapshot {
    /// The stored scalar for a vital kind, if present.
    pub fn scalar(&self, kind: VitalKind) -> Option<f64> {
        match kind {
            VitalKind::BodyMass => self.weight_lb,
            VitalKind::Height => self.height_in,
            VitalKind::BodyMassIndex => self.bmi,
            VitalKind::HeartRate => self.heart_rate_bpm,
            VitalKind::BloodPressureSystolic => self.bp_systolic,
            VitalKind::BloodPressureDiastolic => self.bp_diastolic,
            VitalKind::BodyTemperature => self.temperature_f,
            VitalKind::RespiratoryRate => self.respiratory_rate,
            VitalKind::OxygenSaturation => self.oxygen_saturation_pct,
            VitalKind::BloodGlucose => self.blood_glucose_mg_dl,
            VitalKind::Vo2Max => self.vo2_max,
        }
    }

    pub(crate) fn set_scalar(&mut self, kind: VitalKind, value: Option<f64>) {
        match kind {
            VitalKind::BodyMass => self.weight_lb = value,
            VitalKind::Height => self.height_in = value,
            VitalKind::BodyMassIndex => self.bmi = value,
            VitalKind::HeartRate => self.heart_rate_bpm = value,
            VitalKind::BloodPressureSystolic => self.bp_systolic = value,
            VitalKind::BloodPressureDiastolic => self.bp_diastolic = value,
            VitalKind::BodyTemperature => self.temperature_f = value,
            VitalKind::RespiratoryRate => self.respiratory_rate = value,
            VitalKind::OxygenSaturation => self.oxygen_saturation_pct = value,
            VitalKind::BloodGlucose => self.blood_glucose_mg_dl = value,
            VitalKind::Vo2Max => self.vo2_max = value,
        }
    }
}
