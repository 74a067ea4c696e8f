//! Pattern-based PII detector

use super::library::RecognizerSet;
use crate::domain::{DocumentText, EntityType, Finding};
use std::cmp::Ordering;
use std::sync::Arc;

/// Runs a [`RecognizerSet`] over documents
///
/// Cheap to clone; the compiled recognizers are shared.
#[derive(Debug, Clone)]
pub struct PatternDetector {
    recognizers: Arc<RecognizerSet>,
}

impl PatternDetector {
    pub fn new(recognizers: Arc<RecognizerSet>) -> Self {
        Self { recognizers }
    }

    pub fn recognizers(&self) -> &RecognizerSet {
        &self.recognizers
    }

    /// Detect PII with every recognizer whose entity type is requested
    ///
    /// Results are deduplicated but neither thresholded nor sorted.
    pub fn detect(&self, doc: &DocumentText<'_>, entities: &[EntityType]) -> Vec<Finding> {
        let findings: Vec<Finding> = self
            .recognizers
            .all()
            .iter()
            .filter(|r| entities.contains(&r.entity_type))
            .flat_map(|r| r.analyze(doc))
            .collect();

        let before = findings.len();
        let findings = remove_duplicates(findings);
        tracing::debug!(
            candidates = before,
            kept = findings.len(),
            "Pattern detection finished"
        );
        findings
    }
}

/// Drop results contained in an equal-or-higher-scored result of the same type
///
/// Zero-scored results are discarded outright.
pub fn remove_duplicates(mut findings: Vec<Finding>) -> Vec<Finding> {
    findings.sort_by(|a, b| {
        let score_a = a.score.unwrap_or(0.0);
        let score_b = b.score.unwrap_or(0.0);
        score_b
            .partial_cmp(&score_a)
            .unwrap_or(Ordering::Equal)
            .then(a.start.cmp(&b.start))
            .then(b.span().len().cmp(&a.span().len()))
    });

    let mut kept: Vec<Finding> = Vec::with_capacity(findings.len());
    for finding in findings {
        if finding.score.unwrap_or(0.0) <= 0.0 {
            continue;
        }
        let shadowed = kept.iter().any(|k| {
            k.entity_type == finding.entity_type && finding.span().contained_in(&k.span())
        });
        if !shadowed {
            kept.push(finding);
        }
    }
    kept
}
