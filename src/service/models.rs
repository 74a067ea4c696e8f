//! Request and response payloads
//!
//! Request fields are optional so that an absent field can be reported as a
//! contract violation instead of a deserialization failure.

use crate::domain::Finding;
use serde::{Deserialize, Serialize};

/// Detection request
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub text: Option<String>,
    /// Minimum score to report; configured default when absent
    #[serde(default)]
    pub threshold: Option<f64>,
    /// Entity types to report; configured defaults when absent or empty
    #[serde(default)]
    pub entities: Option<Vec<String>>,
}

impl AnalyzeRequest {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::default()
        }
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = Some(threshold);
        self
    }

    pub fn with_entities<I, S>(mut self, entities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.entities = Some(entities.into_iter().map(Into::into).collect());
        self
    }
}

/// De-identification request
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeidentifyRequest {
    #[serde(default)]
    pub text: Option<String>,
}

impl DeidentifyRequest {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
        }
    }
}

/// Cross-reference request
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CrossReferenceRequest {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub findings: Option<Vec<Finding>>,
}

impl CrossReferenceRequest {
    pub fn new(text: impl Into<String>, findings: Vec<Finding>) -> Self {
        Self {
            text: Some(text.into()),
            findings: Some(findings),
        }
    }
}

/// Findings with their count
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FindingsResponse {
    pub findings: Vec<Finding>,
    pub count: usize,
}

impl FindingsResponse {
    pub fn new(findings: Vec<Finding>) -> Self {
        let count = findings.len();
        Self { findings, count }
    }
}

/// Service health summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    /// Name of the attached entity detector, or the built-in recognizers
    pub engine: String,
    pub language: String,
    /// Entity types handled by the loaded recognizers
    pub custom_recognizers: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deidentifier: Option<String>,
}
