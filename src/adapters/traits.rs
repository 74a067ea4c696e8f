//! Collaborator traits
//!
//! Offsets exchanged across these traits are character offsets into the text
//! that was passed in.

use crate::domain::{EntityType, Finding, FindingSource, Result, Span};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A span reported by an entity detector
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectedSpan {
    pub entity_type: String,
    pub start: usize,
    pub end: usize,
    pub score: f64,
}

impl DetectedSpan {
    pub fn new(entity_type: impl Into<String>, start: usize, end: usize, score: f64) -> Self {
        Self {
            entity_type: entity_type.into(),
            start,
            end,
            score,
        }
    }

    /// Convert to a finding; `text` is filled in by the caller
    pub fn into_finding(self) -> Finding {
        Finding::new(
            EntityType::new(self.entity_type),
            Span::new(self.start, self.end),
            String::new(),
        )
        .with_score(self.score)
        .with_source(FindingSource::EntityDetector)
    }
}

/// A span annotated by a de-identifier
///
/// De-identifiers do not score their output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    pub tag: String,
    pub start: usize,
    pub end: usize,
    pub text: String,
}

impl Annotation {
    pub fn new(tag: impl Into<String>, start: usize, end: usize, text: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            start,
            end,
            text: text.into(),
        }
    }

    /// Convert to a finding with a fixed confidence
    pub fn into_finding(self, score: f64) -> Finding {
        Finding::new(
            EntityType::new(self.tag),
            Span::new(self.start, self.end),
            self.text,
        )
        .with_score(score)
        .with_source(FindingSource::Deidentifier)
    }
}

/// Statistical or model-based entity detector
#[async_trait]
pub trait EntityDetector: Send + Sync {
    /// Detect entities of the requested types
    ///
    /// # Arguments
    ///
    /// * `text` - Document to analyze
    /// * `entities` - Entity types to report
    /// * `threshold` - Minimum confidence to report
    ///
    /// # Errors
    ///
    /// Returns an error if the detector is unavailable or answers with
    /// something that cannot be interpreted.
    async fn analyze(
        &self,
        text: &str,
        entities: &[String],
        threshold: f64,
    ) -> Result<Vec<DetectedSpan>>;

    /// Engine name reported by the health check
    fn name(&self) -> &str;
}

/// Rule-based de-identifier producing unscored annotations
#[async_trait]
pub trait Deidentifier: Send + Sync {
    /// Annotate every identifying span in `text`
    ///
    /// # Errors
    ///
    /// Returns an error if the de-identifier fails.
    async fn annotate(&self, text: &str) -> Result<Vec<Annotation>>;

    fn name(&self) -> &str;
}
