// Request/response types for the prediction API

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::pipeline::{FeatureValue, Row, StrokePipeline};

/// Shared handle to the loaded pipeline, cloned into every request handler.
pub type SharedPipeline = Arc<StrokePipeline>;

/// One prediction request: the ten fields the pipeline was trained on.
/// Field names match the training data verbatim, including the capitalized
/// `Residence_type` column.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatientRecord {
    pub gender: String,
    pub age: f64,
    pub hypertension: u8,
    pub heart_disease: u8,
    pub ever_married: String,
    pub work_type: String,
    #[serde(rename = "Residence_type")]
    pub residence_type: String,
    pub avg_glucose_level: f64,
    pub bmi: f64,
    pub smoking_status: String,
}

impl PatientRecord {
    /// Build the single-row tabular record, preserving column names verbatim.
    pub fn to_row(&self) -> Row {
        let mut row = Row::new();
        row.insert("gender".to_string(), FeatureValue::Text(self.gender.clone()));
        row.insert("age".to_string(), FeatureValue::Number(self.age));
        row.insert(
            "hypertension".to_string(),
            FeatureValue::Number(f64::from(self.hypertension)),
        );
        row.insert(
            "heart_disease".to_string(),
            FeatureValue::Number(f64::from(self.heart_disease)),
        );
        row.insert(
            "ever_married".to_string(),
            FeatureValue::Text(self.ever_married.clone()),
        );
        row.insert(
            "work_type".to_string(),
            FeatureValue::Text(self.work_type.clone()),
        );
        row.insert(
            "Residence_type".to_string(),
            FeatureValue::Text(self.residence_type.clone()),
        );
        row.insert(
            "avg_glucose_level".to_string(),
            FeatureValue::Number(self.avg_glucose_level),
        );
        row.insert("bmi".to_string(), FeatureValue::Number(self.bmi));
        row.insert(
            "smoking_status".to_string(),
            FeatureValue::Text(self.smoking_status.clone()),
        );
        row
    }
}

/// Coarse risk label derived from the positive-class probability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskTier {
    Low,
    Moderate,
    High,
}

impl RiskTier {
    /// Total over [0,1]; the 0.33 and 0.66 boundaries belong to the tier above.
    pub fn from_probability(p: f64) -> Self {
        if p < 0.33 {
            RiskTier::Low
        } else if p < 0.66 {
            RiskTier::Moderate
        } else {
            RiskTier::High
        }
    }
}

/// Successful prediction response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionResponse {
    pub prediction: u8,
    pub probability: f64,
    pub risk: RiskTier,
}

impl PredictionResponse {
    pub fn from_probability(probability: f64) -> Self {
        PredictionResponse {
            prediction: u8::from(probability >= 0.5),
            probability,
            risk: RiskTier::from_probability(probability),
        }
    }
}
