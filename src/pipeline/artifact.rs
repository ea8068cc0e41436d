// Serialized pipeline artifact: the on-disk JSON format produced by the
// training export step. Everything the fitted pipeline knows (encoder
// vocabularies, scaler statistics, classifier weights) lives here.

use serde::{Deserialize, Serialize};

/// One input feature of the pipeline, in training column order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FeatureSpec {
    /// Passed through as a single column.
    Numeric { name: String },
    /// One-hot encoded against the training vocabulary, one column per
    /// category in listed order.
    Categorical { name: String, categories: Vec<String> },
}

impl FeatureSpec {
    pub fn name(&self) -> &str {
        match self {
            FeatureSpec::Numeric { name } | FeatureSpec::Categorical { name, .. } => name,
        }
    }

    /// Number of columns this feature expands to.
    pub fn width(&self) -> usize {
        match self {
            FeatureSpec::Numeric { .. } => 1,
            FeatureSpec::Categorical { categories, .. } => categories.len(),
        }
    }
}

/// Fitted standard scaler over the expanded (post one-hot) columns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScalerParams {
    pub mean: Vec<f64>,
    pub std: Vec<f64>,
}

/// Fitted logistic regression over the scaled columns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifierParams {
    pub coefficients: Vec<f64>,
    pub intercept: f64,
}

/// Root of the serialized artifact file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineArtifact {
    /// Artifact format version, bumped on incompatible changes.
    pub format_version: u32,
    /// Human-readable label of the positive class.
    pub positive_class: String,
    pub features: Vec<FeatureSpec>,
    pub scaler: ScalerParams,
    pub classifier: ClassifierParams,
}

/// Artifact format version this build understands.
pub const SUPPORTED_FORMAT_VERSION: u32 = 1;

impl PipelineArtifact {
    /// Total column count after one-hot expansion.
    pub fn expanded_width(&self) -> usize {
        self.features.iter().map(FeatureSpec::width).sum()
    }
}
