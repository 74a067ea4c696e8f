//! Finding data model
//!
//! A [`Finding`] is a tagged, half-open character span `[start, end)` with a
//! confidence score. Offsets count Unicode scalar values, not bytes, so that
//! findings exchanged with external detectors line up with their offsets.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Entity type tag newtype wrapper
///
/// The set of tags is open: external detectors may report types this crate has
/// never heard of, so the tag is kept as a string.
///
/// # Examples
///
/// ```
/// use pii_xref::domain::EntityType;
///
/// let email = EntityType::new("EMAIL_ADDRESS");
/// assert!(email.is_email());
/// assert_eq!(EntityType::person().as_str(), "PERSON");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityType(String);

impl EntityType {
    pub const PERSON: &'static str = "PERSON";
    pub const EMAIL_ADDRESS: &'static str = "EMAIL_ADDRESS";
    pub const BSN: &'static str = "BSN";
    pub const KVK_NUMBER: &'static str = "KVK_NUMBER";
    pub const NL_PHONE_NUMBER: &'static str = "NL_PHONE_NUMBER";

    /// Creates a new entity type tag
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    /// The `PERSON` tag
    pub fn person() -> Self {
        Self::new(Self::PERSON)
    }

    /// Returns the tag as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this tag denotes an e-mail address
    ///
    /// Matches `EMAIL_ADDRESS` as well as the shorter tags some de-identifiers
    /// emit (`EMAIL`, `e-mail`, `emailadres`), ignoring case.
    pub fn is_email(&self) -> bool {
        let normalized: String = self
            .0
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .flat_map(char::to_uppercase)
            .collect();
        normalized.starts_with("EMAIL")
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for EntityType {
    fn from(tag: &str) -> Self {
        Self::new(tag)
    }
}

/// Half-open character range `[start, end)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// True if both spans share at least one character position
    pub fn overlaps(&self, other: &Span) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// True if `self` lies entirely within `other`
    pub fn contained_in(&self, other: &Span) -> bool {
        other.start <= self.start && self.end <= other.end
    }
}

/// Where a finding came from
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FindingSource {
    /// Built-in pattern recognizer
    Recognizer,
    /// External statistical entity detector
    EntityDetector,
    /// External rule-based de-identifier
    Deidentifier,
    /// Cross-reference engine
    CrossReference,
    /// Tag supplied by a caller that this crate does not know
    Other(String),
}

impl FindingSource {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Recognizer => "recognizer",
            Self::EntityDetector => "entity-detector",
            Self::Deidentifier => "deidentifier",
            Self::CrossReference => "cross-reference",
            Self::Other(tag) => tag,
        }
    }
}

impl From<String> for FindingSource {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "recognizer" => Self::Recognizer,
            "entity-detector" => Self::EntityDetector,
            "deidentifier" => Self::Deidentifier,
            "cross-reference" => Self::CrossReference,
            _ => Self::Other(tag),
        }
    }
}

impl From<FindingSource> for String {
    fn from(source: FindingSource) -> Self {
        source.as_str().to_string()
    }
}

impl fmt::Display for FindingSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why the cross-reference engine produced a finding
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FindingReason {
    /// Another occurrence of an already detected value
    ValuePropagation,
    /// A name token taken from an e-mail local part
    EmailExtraction,
    Other(String),
}

impl FindingReason {
    pub fn as_str(&self) -> &str {
        match self {
            Self::ValuePropagation => "value-propagation",
            Self::EmailExtraction => "email-extraction",
            Self::Other(tag) => tag,
        }
    }
}

impl From<String> for FindingReason {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "value-propagation" => Self::ValuePropagation,
            "email-extraction" => Self::EmailExtraction,
            _ => Self::Other(tag),
        }
    }
}

impl From<FindingReason> for String {
    fn from(reason: FindingReason) -> Self {
        reason.as_str().to_string()
    }
}

impl fmt::Display for FindingReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Detected PII span
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Finding {
    /// Entity type tag
    pub entity_type: EntityType,
    /// Start character offset (inclusive)
    pub start: usize,
    /// End character offset (exclusive)
    pub end: usize,
    /// Confidence score (0.0 - 1.0), absent when the producer gave none
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    /// Literal text of the span
    #[serde(default)]
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<FindingSource>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<FindingReason>,
}

impl Finding {
    /// Create a new finding without score, source or reason
    pub fn new(entity_type: impl Into<EntityType>, span: Span, text: impl Into<String>) -> Self {
        Self {
            entity_type: entity_type.into(),
            start: span.start,
            end: span.end,
            score: None,
            text: text.into(),
            source: None,
            reason: None,
        }
    }

    /// Set the confidence score, clamped to [0, 1]
    pub fn with_score(mut self, score: f64) -> Self {
        self.score = Some(score.clamp(0.0, 1.0));
        self
    }

    pub fn with_source(mut self, source: FindingSource) -> Self {
        self.source = Some(source);
        self
    }

    pub fn with_reason(mut self, reason: FindingReason) -> Self {
        self.reason = Some(reason);
        self
    }

    pub fn span(&self) -> Span {
        Span::new(self.start, self.end)
    }

    /// Score rounded to two decimals, as reported by the detection entry points
    pub fn rounded(mut self) -> Self {
        self.score = self.score.map(|s| (s * 100.0).round() / 100.0);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_is_email_variants() {
        assert!(EntityType::new("EMAIL_ADDRESS").is_email());
        assert!(EntityType::new("email").is_email());
        assert!(EntityType::new("e-mail").is_email());
        assert!(EntityType::new("emailadres").is_email());
        assert!(!EntityType::new("PERSON").is_email());
        assert!(!EntityType::new("URL").is_email());
    }

    #[test]
    fn test_span_overlap_is_strict() {
        let a = Span::new(0, 3);
        assert!(a.overlaps(&Span::new(2, 5)));
        assert!(!a.overlaps(&Span::new(3, 5)));
        assert!(Span::new(1, 2).contained_in(&a));
    }

    #[test]
    fn test_finding_deserializes_without_optional_fields() {
        let finding: Finding = serde_json::from_value(json!({
            "entity_type": "EMAIL_ADDRESS",
            "start": 45,
            "end": 63,
            "text": "jan.jansen@test.nl"
        }))
        .unwrap();

        assert_eq!(finding.score, None);
        assert_eq!(finding.source, None);
        assert_eq!(finding.span(), Span::new(45, 63));
    }

    #[test]
    fn test_finding_serializes_tags() {
        let finding = Finding::new(EntityType::person(), Span::new(4, 7), "Jan")
            .with_score(0.5)
            .with_source(FindingSource::CrossReference)
            .with_reason(FindingReason::EmailExtraction);

        let value = serde_json::to_value(&finding).unwrap();
        assert_eq!(value["source"], "cross-reference");
        assert_eq!(value["reason"], "email-extraction");
        assert_eq!(value["entity_type"], "PERSON");
    }

    #[test]
    fn test_unknown_source_round_trips() {
        let source: FindingSource = serde_json::from_value(json!("presidio")).unwrap();
        assert_eq!(source, FindingSource::Other("presidio".to_string()));
        assert_eq!(serde_json::to_value(&source).unwrap(), "presidio");
    }

    #[test]
    fn test_rounded_score() {
        let finding = Finding::new("BSN", Span::new(0, 9), "123456782").with_score(0.8549);
        assert_eq!(finding.rounded().score, Some(0.85));
    }
}
