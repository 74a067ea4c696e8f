//! Recognizer library loaded from TOML
//!
//! The built-in library is embedded at compile time; a deployment can point
//! `detection.pattern_library` at its own file instead. Either way the set is
//! compiled once at start-up and shared read-only afterwards.

use super::checksum::eleven_check;
use crate::domain::{DocumentText, EntityType, Finding, FindingSource, XrefError};
use crate::domain::Result;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Post-match validation applied to every candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Validator {
    /// Dutch BSN eleven-residue checksum
    ElevenCheck,
}

impl Validator {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ElevenCheck => "eleven_check",
        }
    }

    pub fn validate(&self, candidate: &str) -> bool {
        match self {
            Self::ElevenCheck => eleven_check(candidate),
        }
    }
}

/// Pattern definition from TOML
#[derive(Debug, Clone, Deserialize)]
pub struct PatternDefinition {
    pub name: String,
    pub regex: String,
    /// Base confidence (0.0 - 1.0)
    pub score: f64,
}

/// Recognizer definition from TOML
#[derive(Debug, Clone, Deserialize)]
pub struct RecognizerDefinition {
    pub name: String,
    pub entity_type: String,
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default)]
    pub context: Vec<String>,
    #[serde(default)]
    pub validator: Option<Validator>,
    /// Score assigned to candidates that pass the validator
    #[serde(default)]
    pub validated_score: Option<f64>,
    pub patterns: Vec<PatternDefinition>,
}

fn default_language() -> String {
    "nl".to_string()
}

#[derive(Debug, Deserialize)]
struct RecognizerLibrary {
    recognizers: Vec<RecognizerDefinition>,
}

/// Compiled pattern with metadata
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    pub name: String,
    pub regex: Regex,
    pub score: f64,
}

/// A compiled recognizer for one entity type
#[derive(Debug, Clone)]
pub struct Recognizer {
    pub name: String,
    pub entity_type: EntityType,
    pub language: String,
    /// Hint words for an external detector's context boosting
    pub context: Vec<String>,
    pub patterns: Vec<CompiledPattern>,
    pub validator: Option<Validator>,
    pub validated_score: Option<f64>,
}

impl Recognizer {
    fn compile(def: RecognizerDefinition) -> Result<Self> {
        if def.patterns.is_empty() {
            return Err(XrefError::Pattern(format!(
                "Recognizer '{}' declares no patterns",
                def.name
            )));
        }

        let mut patterns = Vec::with_capacity(def.patterns.len());
        for pattern in def.patterns {
            check_score(&def.name, pattern.score)?;
            let regex = Regex::new(&pattern.regex).map_err(|e| {
                XrefError::Pattern(format!(
                    "Invalid regex in pattern '{}' of '{}': {}",
                    pattern.name, def.name, e
                ))
            })?;
            patterns.push(CompiledPattern {
                name: pattern.name,
                regex,
                score: pattern.score,
            });
        }

        if let Some(score) = def.validated_score {
            check_score(&def.name, score)?;
        }

        Ok(Self {
            name: def.name,
            entity_type: EntityType::new(def.entity_type),
            language: def.language,
            context: def.context,
            patterns,
            validator: def.validator,
            validated_score: def.validated_score,
        })
    }

    /// Run every pattern over the document
    ///
    /// Matches are trimmed of trailing separators. Candidates failing the
    /// validator are dropped, not downweighted.
    pub fn analyze(&self, doc: &DocumentText<'_>) -> Vec<Finding> {
        let mut findings = Vec::new();

        for pattern in &self.patterns {
            for matched in pattern.regex.find_iter(doc.as_str()) {
                let value = matched
                    .as_str()
                    .trim_end_matches(|c: char| c.is_whitespace() || c == '-');
                if value.is_empty() {
                    continue;
                }

                let score = match self.validator {
                    Some(validator) if !validator.validate(value) => {
                        tracing::trace!(
                            recognizer = %self.name,
                            pattern = %pattern.name,
                            "Candidate failed validation"
                        );
                        continue;
                    }
                    Some(_) => self.validated_score.unwrap_or(pattern.score),
                    None => pattern.score,
                };

                let span = doc.span_of(matched.start()..matched.start() + value.len());
                findings.push(
                    Finding::new(self.entity_type.clone(), span, value)
                        .with_score(score)
                        .with_source(FindingSource::Recognizer),
                );
            }
        }

        findings
    }
}

fn check_score(recognizer: &str, score: f64) -> Result<()> {
    if !(0.0..=1.0).contains(&score) {
        return Err(XrefError::Pattern(format!(
            "Score {score} in '{recognizer}' must be between 0.0 and 1.0"
        )));
    }
    Ok(())
}

/// Fixed, explicitly constructed list of recognizers
#[derive(Debug, Clone)]
pub struct RecognizerSet {
    recognizers: Vec<Recognizer>,
}

impl RecognizerSet {
    /// Load a recognizer library from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            XrefError::Configuration(format!(
                "Failed to read pattern library {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;

        Self::from_toml(&content)
    }

    /// Compile a recognizer library from TOML content
    pub fn from_toml(content: &str) -> Result<Self> {
        let library: RecognizerLibrary = toml::from_str(content)
            .map_err(|e| XrefError::Pattern(format!("Failed to parse pattern library: {e}")))?;

        let recognizers = library
            .recognizers
            .into_iter()
            .map(Recognizer::compile)
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { recognizers })
    }

    /// Built-in Dutch recognizers (BSN, KvK, phone numbers)
    pub fn builtin() -> Result<Self> {
        let default_toml = include_str!("../../patterns/recognizers.toml");
        Self::from_toml(default_toml)
    }

    pub fn all(&self) -> &[Recognizer] {
        &self.recognizers
    }

    /// Recognizers for a specific entity type
    pub fn for_entity(&self, entity_type: &str) -> Option<&Recognizer> {
        self.recognizers
            .iter()
            .find(|r| r.entity_type.as_str() == entity_type)
    }

    /// Entity types covered by this set, in declaration order
    pub fn entity_types(&self) -> Vec<EntityType> {
        self.recognizers
            .iter()
            .map(|r| r.entity_type.clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_builtin_library() {
        let set = RecognizerSet::builtin().unwrap();
        let types: Vec<String> = set
            .entity_types()
            .into_iter()
            .map(|t| t.as_str().to_string())
            .collect();
        assert_eq!(types, vec!["BSN", "KVK_NUMBER", "NL_PHONE_NUMBER"]);
    }

    #[test]
    fn test_builtin_scores() {
        let set = RecognizerSet::builtin().unwrap();

        let bsn = set.for_entity("BSN").unwrap();
        assert_eq!(bsn.validator, Some(Validator::ElevenCheck));
        assert_eq!(bsn.validated_score, Some(0.85));

        let kvk = set.for_entity("KVK_NUMBER").unwrap();
        assert_eq!(kvk.patterns[0].score, 0.15);
        assert!(kvk.context.contains(&"handelsregister".to_string()));

        let phone = set.for_entity("NL_PHONE_NUMBER").unwrap();
        let scores: Vec<f64> = phone.patterns.iter().map(|p| p.score).collect();
        assert_eq!(scores, vec![0.7, 0.7, 0.5]);
    }

    #[test]
    fn test_bsn_rejects_invalid_checksum() {
        let set = RecognizerSet::builtin().unwrap();
        let bsn = set.for_entity("BSN").unwrap();

        let doc = DocumentText::new("BSN 123456782 en 111111111");
        let findings = bsn.analyze(&doc);

        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].text, "123456782");
        assert_eq!(findings[0].score, Some(0.85));
        assert_eq!((findings[0].start, findings[0].end), (4, 13));
    }

    #[test]
    fn test_bsn_ignores_longer_digit_runs() {
        let set = RecognizerSet::builtin().unwrap();
        let bsn = set.for_entity("BSN").unwrap();

        let doc = DocumentText::new("rekening 1234567820");
        assert!(bsn.analyze(&doc).is_empty());
    }

    #[test]
    fn test_mobile_with_mixed_separators() {
        let set = RecognizerSet::builtin().unwrap();
        let phone = set.for_entity("NL_PHONE_NUMBER").unwrap();

        let doc = DocumentText::new("Bel 06-12 34-56 78 vandaag");
        let findings = phone.analyze(&doc);

        let mobile = findings
            .iter()
            .find(|f| f.score == Some(0.7))
            .expect("mobile number");
        assert_eq!(mobile.text, "06-12 34-56 78");
    }

    #[test]
    fn test_trailing_separator_is_trimmed() {
        let set = RecognizerSet::builtin().unwrap();
        let phone = set.for_entity("NL_PHONE_NUMBER").unwrap();

        let doc = DocumentText::new("mobiel 06 12345678 of later");
        let findings = phone.analyze(&doc);

        assert!(!findings.is_empty());
        assert!(findings.iter().all(|f| !f.text.ends_with(' ')));
    }

    #[test]
    fn test_international_prefix() {
        let set = RecognizerSet::builtin().unwrap();
        let phone = set.for_entity("NL_PHONE_NUMBER").unwrap();

        let doc = DocumentText::new("tel: +31 6 12345678");
        let findings = phone.analyze(&doc);

        assert!(findings.iter().any(|f| f.text == "+31 6 12345678"));
    }

    #[test]
    fn test_invalid_regex_is_reported() {
        let toml = r#"
[[recognizers]]
name = "Broken"
entity_type = "BROKEN"

[[recognizers.patterns]]
name = "bad"
regex = '([0-9]'
score = 0.5
"#;
        let err = RecognizerSet::from_toml(toml).unwrap_err();
        assert!(matches!(err, XrefError::Pattern(_)));
    }

    #[test]
    fn test_score_out_of_range_is_reported() {
        let toml = r#"
[[recognizers]]
name = "Overconfident"
entity_type = "X"

[[recognizers.patterns]]
name = "x"
regex = 'x'
score = 1.5
"#;
        assert!(RecognizerSet::from_toml(toml).is_err());
    }

    #[test]
    fn test_unknown_validator_is_reported() {
        let toml = r#"
[[recognizers]]
name = "Luhn"
entity_type = "CREDIT_CARD"
validator = "luhn"

[[recognizers.patterns]]
name = "cc"
regex = '[0-9]{16}'
score = 0.5
"#;
        assert!(RecognizerSet::from_toml(toml).is_err());
    }
}
