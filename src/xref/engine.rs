//! Cross-reference engine
//!
//! Given a document and the findings already detected in it, the engine finds
//! further occurrences of the same values in two passes:
//!
//! 1. **Value propagation**: every sufficiently specific finding value is
//!    searched across the whole document and each uncovered whole-word match
//!    becomes a new finding of the same type.
//! 2. **Email-derived names**: the local part of every e-mail finding is split
//!    into name tokens, which are searched the same way and reported as `PERSON`.
//!
//! Both passes share one [`Accumulator`]: the coverage baseline starts with the
//! original findings and grows with every accepted span, so no character is
//! ever claimed twice.
//!
//! # Examples
//!
//! ```
//! use pii_xref::domain::{Finding, Span};
//! use pii_xref::xref::CrossReferenceEngine;
//!
//! let text = "Bel Jan Jansen op 06-12345678, of mail naar jan.jansen@test.nl";
//! let email = Finding::new("EMAIL_ADDRESS", Span::new(44, 62), "jan.jansen@test.nl")
//!     .with_score(0.9);
//!
//! let engine = CrossReferenceEngine::default();
//! let additional = engine.cross_reference(text, &[email]);
//! assert_eq!(additional.len(), 2);
//! ```

use super::coverage::CoverageIndex;
use super::lexicon::Lexicon;
use super::search::{LiteralSearch, DEFAULT_SIZE_LIMIT};
use crate::domain::{DocumentText, EntityType, Finding, FindingReason, FindingSource, Span};
use crate::logging::fingerprint;
use std::collections::HashSet;
use std::sync::Arc;

/// Delimiters splitting an e-mail local part into name tokens
const LOCAL_PART_DELIMITERS: [char; 3] = ['.', '_', '-'];

/// Tunables for the cross-reference passes
#[derive(Debug, Clone, PartialEq)]
pub struct EngineSettings {
    /// Minimum characters for a value to seed propagation
    pub min_value_length: usize,
    /// Minimum characters for an e-mail name token
    pub min_name_length: usize,
    /// Score for propagated findings whose source has none
    pub default_score: f64,
    /// Score for names taken from e-mail addresses
    pub email_name_score: f64,
    /// Compiled-size ceiling per search value
    pub max_search_size: usize,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            min_value_length: 3,
            min_name_length: 2,
            default_score: 0.7,
            email_name_score: 0.5,
            max_search_size: DEFAULT_SIZE_LIMIT,
        }
    }
}

/// Coverage baseline and additions threaded through both passes
#[derive(Debug)]
pub struct Accumulator {
    coverage: CoverageIndex,
    additional: Vec<Finding>,
}

impl Accumulator {
    /// Start from the caller's findings
    pub fn seeded(findings: &[Finding]) -> Self {
        Self {
            coverage: CoverageIndex::from_findings(findings),
            additional: Vec::new(),
        }
    }

    /// Accept a finding iff its span is still entirely uncovered
    fn claim(&mut self, finding: Finding) -> bool {
        if self.coverage.overlaps_span(finding.span()) {
            return false;
        }
        self.coverage.mark_covered(finding.start, finding.end);
        self.additional.push(finding);
        true
    }

    pub fn additional(&self) -> &[Finding] {
        &self.additional
    }

    pub fn into_findings(self) -> Vec<Finding> {
        self.additional
    }
}

/// Finds additional occurrences of already detected values
#[derive(Debug, Clone)]
pub struct CrossReferenceEngine {
    lexicon: Arc<Lexicon>,
    settings: EngineSettings,
}

impl CrossReferenceEngine {
    pub fn new(lexicon: Arc<Lexicon>, settings: EngineSettings) -> Self {
        Self { lexicon, settings }
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// Additional findings for `text`, in the order they were accepted
    ///
    /// The input findings are trusted as given: their `text` values seed the
    /// searches and their spans seed the coverage baseline.
    pub fn cross_reference(&self, text: &str, findings: &[Finding]) -> Vec<Finding> {
        let doc = DocumentText::new(text);

        let acc = Accumulator::seeded(findings);
        let acc = self.propagate_values(&doc, findings, acc);
        let after_values = acc.additional().len();
        crate::log_pass_complete!("value-propagation", after_values);

        let acc = self.propagate_email_names(&doc, findings, acc);
        crate::log_pass_complete!("email-extraction", acc.additional().len() - after_values);

        acc.into_findings()
    }

    /// Pass 1: search every eligible finding value across the document
    pub fn propagate_values(
        &self,
        doc: &DocumentText<'_>,
        findings: &[Finding],
        mut acc: Accumulator,
    ) -> Accumulator {
        let mut searched: HashSet<&str> = HashSet::new();

        for source in findings {
            let value = source.text.as_str();
            if value.chars().count() < self.settings.min_value_length
                || self.lexicon.is_filtered(value)
                || !searched.insert(value)
            {
                continue;
            }

            let score = source.score.unwrap_or(self.settings.default_score);
            self.claim_matches(doc, value, &mut acc, |span, matched| {
                Finding::new(source.entity_type.clone(), span, matched)
                    .with_score(score)
                    .with_source(FindingSource::CrossReference)
                    .with_reason(FindingReason::ValuePropagation)
            });
        }

        acc
    }

    /// Pass 2: search name tokens taken from e-mail local parts
    pub fn propagate_email_names(
        &self,
        doc: &DocumentText<'_>,
        findings: &[Finding],
        mut acc: Accumulator,
    ) -> Accumulator {
        let mut searched: HashSet<String> = HashSet::new();

        for email in findings.iter().filter(|f| f.entity_type.is_email()) {
            for name in self.email_name_candidates(&email.text) {
                if !searched.insert(name.to_string()) {
                    continue;
                }

                let score = self.settings.email_name_score;
                self.claim_matches(doc, name, &mut acc, |span, matched| {
                    Finding::new(EntityType::person(), span, matched)
                        .with_score(score)
                        .with_source(FindingSource::CrossReference)
                        .with_reason(FindingReason::EmailExtraction)
                });
            }
        }

        acc
    }

    /// Name tokens in the local part of an e-mail address
    ///
    /// A token qualifies when it is purely alphabetic, long enough, and neither
    /// a stop word nor a name prefix.
    pub fn email_name_candidates<'e>(&self, email: &'e str) -> Vec<&'e str> {
        let Some((local, _)) = email.split_once('@') else {
            return Vec::new();
        };

        local
            .split(LOCAL_PART_DELIMITERS)
            .filter(|token| {
                token.chars().count() >= self.settings.min_name_length
                    && token.chars().all(char::is_alphabetic)
                    && !self.lexicon.is_filtered(token)
            })
            .collect()
    }

    /// Search `value` and claim every uncovered match
    fn claim_matches<F>(
        &self,
        doc: &DocumentText<'_>,
        value: &str,
        acc: &mut Accumulator,
        make_finding: F,
    ) where
        F: Fn(Span, &str) -> Finding,
    {
        let search = match LiteralSearch::new(value, self.settings.max_search_size) {
            Ok(search) => search,
            Err(e) => {
                tracing::warn!(
                    value_hash = %fingerprint(value),
                    error = %e,
                    "Skipping value that cannot be searched"
                );
                return;
            }
        };

        for span in search.find_spans(doc) {
            let Some(matched) = doc.slice(span) else {
                continue;
            };
            if acc.claim(make_finding(span, matched)) {
                tracing::trace!(start = span.start, end = span.end, "Claimed span");
            }
        }
    }
}

impl Default for CrossReferenceEngine {
    fn default() -> Self {
        Self::new(Arc::new(Lexicon::dutch()), EngineSettings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn finding(entity_type: &str, start: usize, end: usize, text: &str, score: f64) -> Finding {
        Finding::new(entity_type, Span::new(start, end), text).with_score(score)
    }

    #[test]
    fn test_email_candidates_drop_prefixes() {
        let engine = CrossReferenceEngine::default();
        assert_eq!(
            engine.email_name_candidates("jan.de.vries@example.nl"),
            vec!["jan", "vries"]
        );
    }

    #[test]
    fn test_email_candidates_split_on_all_delimiters() {
        let engine = CrossReferenceEngine::default();
        assert_eq!(
            engine.email_name_candidates("anna_van-dijk.2@example.nl"),
            vec!["anna", "dijk"]
        );
    }

    #[test]
    fn test_email_candidates_without_at_sign() {
        let engine = CrossReferenceEngine::default();
        assert!(engine.email_name_candidates("jan.jansen").is_empty());
        assert!(engine.email_name_candidates("@example.nl").is_empty());
    }

    #[test]
    fn test_email_candidates_use_first_at_sign() {
        let engine = CrossReferenceEngine::default();
        assert_eq!(
            engine.email_name_candidates("piet@hein@example.nl"),
            vec!["piet"]
        );
    }

    #[test]
    fn test_email_candidates_reject_short_and_numeric_tokens() {
        let engine = CrossReferenceEngine::default();
        assert_eq!(
            engine.email_name_candidates("j.k.smit99.bakker@example.nl"),
            vec!["bakker"]
        );
    }

    #[test]
    fn test_value_propagation_copies_type_and_score() {
        let text = "Pieter belde. Later belde pieter opnieuw.";
        let findings = vec![finding("PERSON", 0, 6, "Pieter", 0.85)];

        let additional = CrossReferenceEngine::default().cross_reference(text, &findings);

        assert_eq!(additional.len(), 1);
        let found = &additional[0];
        assert_eq!(found.entity_type.as_str(), "PERSON");
        assert_eq!((found.start, found.end), (26, 32));
        assert_eq!(found.text, "pieter");
        assert_eq!(found.score, Some(0.85));
        assert_eq!(found.reason, Some(FindingReason::ValuePropagation));
        assert_eq!(found.source, Some(FindingSource::CrossReference));
    }

    #[test]
    fn test_missing_score_defaults() {
        let text = "Utrecht en Utrecht";
        let findings = vec![Finding::new("LOCATION", Span::new(0, 7), "Utrecht")];

        let additional = CrossReferenceEngine::default().cross_reference(text, &findings);
        assert_eq!(additional.len(), 1);
        assert_eq!(additional[0].score, Some(0.7));
    }

    #[test]
    fn test_short_values_do_not_propagate() {
        let text = "Bo en Bo";
        let findings = vec![finding("PERSON", 0, 2, "Bo", 0.9)];
        assert!(CrossReferenceEngine::default()
            .cross_reference(text, &findings)
            .is_empty());
    }

    #[test]
    fn test_stop_word_value_does_not_propagate() {
        let text = "naam: Jan, naam: Piet";
        let findings = vec![finding("PERSON", 0, 4, "naam", 0.6)];
        assert!(CrossReferenceEngine::default()
            .cross_reference(text, &findings)
            .is_empty());
    }

    #[test]
    fn test_overlapping_values_claim_span_once() {
        // "Jan Jansen" and "Jansen" both occur again at the end
        let text = "Jan Jansen belde. Groet, Jan Jansen";
        let findings = vec![
            finding("PERSON", 0, 10, "Jan Jansen", 0.9),
            finding("PERSON", 4, 10, "Jansen", 0.8),
        ];

        let additional = CrossReferenceEngine::default().cross_reference(text, &findings);

        assert_eq!(additional.len(), 1);
        assert_eq!((additional[0].start, additional[0].end), (25, 35));
        assert_eq!(additional[0].score, Some(0.9));
    }

    #[test]
    fn test_input_is_not_mutated() {
        let text = "Jansen, Jansen";
        let findings = vec![finding("PERSON", 0, 6, "Jansen", 0.9)];
        let before = findings.clone();

        let _ = CrossReferenceEngine::default().cross_reference(text, &findings);
        assert_eq!(findings, before);
    }

    #[test]
    fn test_accumulator_rejects_partial_overlap() {
        let mut acc = Accumulator::seeded(&[finding("X", 5, 10, "abcde", 0.5)]);
        assert!(!acc.claim(finding("X", 9, 12, "efg", 0.5)));
        assert!(acc.claim(finding("X", 10, 12, "fg", 0.5)));
        assert!(!acc.claim(finding("X", 11, 13, "gh", 0.5)));
        assert_eq!(acc.additional().len(), 1);
    }
}
