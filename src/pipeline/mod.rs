// Inference pipeline: fused preprocessing (one-hot + standard scaling) and
// logistic-regression classifier, deserialized from a single artifact file.

pub mod artifact;

use std::collections::BTreeMap;
use std::path::Path;

use thiserror::Error;

use crate::log_warn;
use artifact::{FeatureSpec, PipelineArtifact, SUPPORTED_FORMAT_VERSION};

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("failed to read model artifact: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse model artifact: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unsupported artifact format version {found} (supported: {supported})")]
    FormatVersion { found: u32, supported: u32 },

    #[error("artifact is inconsistent: {0}")]
    Inconsistent(String),

    #[error("missing feature '{0}' in input record")]
    MissingFeature(String),

    #[error("feature '{name}' expects a {expected} value")]
    WrongType { name: String, expected: &'static str },
}

/// One cell of the single-row tabular record handed to the pipeline.
#[derive(Debug, Clone, PartialEq)]
pub enum FeatureValue {
    Number(f64),
    Text(String),
}

/// Single-row tabular record, keyed by feature name verbatim.
pub type Row = BTreeMap<String, FeatureValue>;

/// The loaded pipeline. Immutable after `load`; shared read-only across
/// request handlers.
#[derive(Debug)]
pub struct StrokePipeline {
    artifact: PipelineArtifact,
}

impl StrokePipeline {
    /// Deserialize the artifact from `path` and validate its internal
    /// consistency. Any failure here is fatal to startup.
    pub fn load(path: &Path) -> Result<Self, PipelineError> {
        let raw = std::fs::read_to_string(path)?;
        let artifact: PipelineArtifact = serde_json::from_str(&raw)?;
        Self::from_artifact(artifact)
    }

    /// Validate and wrap an already-deserialized artifact.
    pub fn from_artifact(artifact: PipelineArtifact) -> Result<Self, PipelineError> {
        if artifact.format_version != SUPPORTED_FORMAT_VERSION {
            return Err(PipelineError::FormatVersion {
                found: artifact.format_version,
                supported: SUPPORTED_FORMAT_VERSION,
            });
        }

        let width = artifact.expanded_width();
        if artifact.classifier.coefficients.len() != width {
            return Err(PipelineError::Inconsistent(format!(
                "classifier has {} coefficients but features expand to {} columns",
                artifact.classifier.coefficients.len(),
                width
            )));
        }
        if artifact.scaler.mean.len() != width || artifact.scaler.std.len() != width {
            return Err(PipelineError::Inconsistent(format!(
                "scaler has {}/{} mean/std entries but features expand to {} columns",
                artifact.scaler.mean.len(),
                artifact.scaler.std.len(),
                width
            )));
        }
        if artifact.scaler.std.iter().any(|s| *s <= 0.0) {
            return Err(PipelineError::Inconsistent(
                "scaler std contains a non-positive entry".to_string(),
            ));
        }

        Ok(StrokePipeline { artifact })
    }

    /// Label of the positive class this pipeline scores.
    pub fn positive_class(&self) -> &str {
        &self.artifact.positive_class
    }

    /// Probability mass assigned to the positive class for one record.
    pub fn predict_proba(&self, row: &Row) -> Result<f64, PipelineError> {
        let x = self.encode(row)?;

        let mut z = self.artifact.classifier.intercept;
        for (i, value) in x.iter().enumerate() {
            let scaled = (value - self.artifact.scaler.mean[i]) / self.artifact.scaler.std[i];
            z += self.artifact.classifier.coefficients[i] * scaled;
        }

        Ok(sigmoid(z))
    }

    /// Expand the row into the training column order: numerics pass through,
    /// categoricals one-hot against the training vocabulary.
    fn encode(&self, row: &Row) -> Result<Vec<f64>, PipelineError> {
        let mut x = Vec::with_capacity(self.artifact.expanded_width());

        for feature in &self.artifact.features {
            let value = row
                .get(feature.name())
                .ok_or_else(|| PipelineError::MissingFeature(feature.name().to_string()))?;

            match feature {
                FeatureSpec::Numeric { name } => match value {
                    FeatureValue::Number(n) => x.push(*n),
                    FeatureValue::Text(_) => {
                        return Err(PipelineError::WrongType {
                            name: name.clone(),
                            expected: "numeric",
                        });
                    }
                },
                FeatureSpec::Categorical { name, categories } => {
                    let text = match value {
                        FeatureValue::Text(t) => t,
                        FeatureValue::Number(_) => {
                            return Err(PipelineError::WrongType {
                                name: name.clone(),
                                expected: "string",
                            });
                        }
                    };
                    // Unknown categories encode to all zeros, matching the
                    // trained encoder's handle_unknown="ignore" setting.
                    if !categories.iter().any(|c| c == text) {
                        log_warn!(
                            "[PIPELINE] Value '{}' for '{}' not in training vocabulary",
                            text,
                            name
                        );
                    }
                    for category in categories {
                        x.push(if category == text { 1.0 } else { 0.0 });
                    }
                }
            }
        }

        Ok(x)
    }
}

fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}

#[cfg(test)]
mod tests {
    use super::artifact::{ClassifierParams, ScalerParams};
    use super::*;

    fn test_artifact() -> PipelineArtifact {
        PipelineArtifact {
            format_version: 1,
            positive_class: "stroke".to_string(),
            features: vec![
                FeatureSpec::Numeric {
                    name: "age".to_string(),
                },
                FeatureSpec::Categorical {
                    name: "ever_married".to_string(),
                    categories: vec!["Yes".to_string(), "No".to_string()],
                },
            ],
            scaler: ScalerParams {
                mean: vec![43.0, 0.66, 0.34],
                std: vec![22.0, 0.47, 0.47],
            },
            classifier: ClassifierParams {
                coefficients: vec![1.5, 0.2, -0.2],
                intercept: -2.0,
            },
        }
    }

    fn test_row(age: f64, married: &str) -> Row {
        let mut row = Row::new();
        row.insert("age".to_string(), FeatureValue::Number(age));
        row.insert(
            "ever_married".to_string(),
            FeatureValue::Text(married.to_string()),
        );
        row
    }

    #[test]
    fn test_predict_proba_in_unit_interval() {
        let pipeline = StrokePipeline::from_artifact(test_artifact()).unwrap();
        for age in [0.0, 30.0, 67.0, 95.0] {
            let p = pipeline.predict_proba(&test_row(age, "Yes")).unwrap();
            assert!((0.0..=1.0).contains(&p), "p = {p} out of range");
        }
    }

    #[test]
    fn test_predict_proba_monotone_in_positive_coefficient() {
        let pipeline = StrokePipeline::from_artifact(test_artifact()).unwrap();
        let young = pipeline.predict_proba(&test_row(20.0, "Yes")).unwrap();
        let old = pipeline.predict_proba(&test_row(80.0, "Yes")).unwrap();
        assert!(old > young);
    }

    #[test]
    fn test_missing_feature_is_an_error() {
        let pipeline = StrokePipeline::from_artifact(test_artifact()).unwrap();
        let mut row = Row::new();
        row.insert("age".to_string(), FeatureValue::Number(50.0));
        let err = pipeline.predict_proba(&row).unwrap_err();
        assert!(matches!(err, PipelineError::MissingFeature(ref name) if name == "ever_married"));
    }

    #[test]
    fn test_wrong_type_is_an_error() {
        let pipeline = StrokePipeline::from_artifact(test_artifact()).unwrap();
        let mut row = test_row(50.0, "Yes");
        row.insert("age".to_string(), FeatureValue::Text("fifty".to_string()));
        let err = pipeline.predict_proba(&row).unwrap_err();
        assert!(matches!(err, PipelineError::WrongType { .. }));
    }

    #[test]
    fn test_unknown_category_encodes_to_zeros() {
        let pipeline = StrokePipeline::from_artifact(test_artifact()).unwrap();
        let known = pipeline.predict_proba(&test_row(50.0, "Yes")).unwrap();
        let unknown = pipeline.predict_proba(&test_row(50.0, "Maybe")).unwrap();
        assert!((0.0..=1.0).contains(&unknown));
        assert!(unknown != known);
    }

    #[test]
    fn test_coefficient_width_mismatch_rejected() {
        let mut artifact = test_artifact();
        artifact.classifier.coefficients.pop();
        let err = StrokePipeline::from_artifact(artifact).unwrap_err();
        assert!(matches!(err, PipelineError::Inconsistent(_)));
    }

    #[test]
    fn test_scaler_width_mismatch_rejected() {
        let mut artifact = test_artifact();
        artifact.scaler.mean.push(0.0);
        let err = StrokePipeline::from_artifact(artifact).unwrap_err();
        assert!(matches!(err, PipelineError::Inconsistent(_)));
    }

    #[test]
    fn test_unsupported_format_version_rejected() {
        let mut artifact = test_artifact();
        artifact.format_version = 99;
        let err = StrokePipeline::from_artifact(artifact).unwrap_err();
        assert!(matches!(err, PipelineError::FormatVersion { found: 99, .. }));
    }

    #[test]
    fn test_sigmoid_bounds() {
        assert!(sigmoid(-50.0) < 1e-10);
        assert!(sigmoid(50.0) > 1.0 - 1e-10);
        assert!((sigmoid(0.0) - 0.5).abs() < 1e-12);
    }
}
