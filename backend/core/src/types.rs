use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Clinical measurements submitted for a prediction.
///
/// Only the JSON shape is checked; missing fields default to zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MeasurementRecord {
    pub pregnancies: i64,
    pub glucose: f64,
    pub blood_pressure: f64,
    pub skin_thickness: f64,
    pub insulin: f64,
    pub bmi: f64,
    pub diabetes_pedigree_function: f64,
    pub age: i64,
}

/// Label returned by the prediction service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub prediction: String,
}

impl PredictionResult {
    pub fn new(prediction: impl Into<String>) -> Self {
        Self {
            prediction: prediction.into(),
        }
    }
}

/// The fixed set of labels that can be scraped from OCR text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MeasurementField {
    Pregnancies,
    Glucose,
    BloodPressure,
    SkinThickness,
    Insulin,
    #[serde(rename = "BMI")]
    Bmi,
    DiabetesPedigreeFunction,
    Age,
}

impl MeasurementField {
    pub const ALL: [MeasurementField; 8] = [
        MeasurementField::Pregnancies,
        MeasurementField::Glucose,
        MeasurementField::BloodPressure,
        MeasurementField::SkinThickness,
        MeasurementField::Insulin,
        MeasurementField::Bmi,
        MeasurementField::DiabetesPedigreeFunction,
        MeasurementField::Age,
    ];

    /// Canonical label, as it appears on a lab sheet and in responses.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pregnancies => "Pregnancies",
            Self::Glucose => "Glucose",
            Self::BloodPressure => "BloodPressure",
            Self::SkinThickness => "SkinThickness",
            Self::Insulin => "Insulin",
            Self::Bmi => "BMI",
            Self::DiabetesPedigreeFunction => "DiabetesPedigreeFunction",
            Self::Age => "Age",
        }
    }

    /// Counts that only ever appear as whole numbers.
    pub fn is_integral(&self) -> bool {
        matches!(self, Self::Pregnancies | Self::Age)
    }
}

/// Fields recognised in a scanned document. A missing key means "not found".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExtractedFields(BTreeMap<MeasurementField, f64>);

impl ExtractedFields {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: MeasurementField, value: f64) {
        self.0.insert(field, value);
    }

    pub fn get(&self, field: MeasurementField) -> Option<f64> {
        self.0.get(&field).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn record_uses_camel_case_and_defaults_missing_fields() {
        let record: MeasurementRecord =
            serde_json::from_value(json!({"glucose": 148.0, "bloodPressure": 72, "age": 50}))
                .unwrap();
        assert_eq!(record.glucose, 148.0);
        assert_eq!(record.blood_pressure, 72.0);
        assert_eq!(record.age, 50);
        assert_eq!(record.pregnancies, 0);
        assert_eq!(record.bmi, 0.0);

        let out = serde_json::to_value(&record).unwrap();
        assert!(out.get("diabetesPedigreeFunction").is_some());
        assert!(out.get("skinThickness").is_some());
    }

    #[test]
    fn record_rejects_fractional_counts() {
        let parsed = serde_json::from_value::<MeasurementRecord>(json!({"pregnancies": 1.5}));
        assert!(parsed.is_err());
    }

    #[test]
    fn field_serializes_with_canonical_name() {
        for field in MeasurementField::ALL {
            let value = serde_json::to_value(field).unwrap();
            assert_eq!(value, json!(field.as_str()));
        }
    }

    #[test]
    fn extracted_fields_serialize_as_flat_map() {
        let mut fields = ExtractedFields::new();
        fields.insert(MeasurementField::Bmi, 23.4);
        fields.insert(MeasurementField::Age, 45.0);
        let value = serde_json::to_value(&fields).unwrap();
        assert_eq!(value["BMI"], json!(23.4));
        assert_eq!(value["Age"].as_f64(), Some(45.0));
        assert_eq!(value.as_object().unwrap().len(), 2);
    }
}
