//! Integration tests for the built-in and custom recognizer libraries

use pii_xref::domain::{DocumentText, EntityType, FindingSource, XrefError};
use pii_xref::recognizers::checksum::eleven_check;
use pii_xref::recognizers::{PatternDetector, RecognizerSet};
use std::io::Write;
use std::sync::Arc;
use tempfile::NamedTempFile;
use test_case::test_case;

fn detect(text: &str, entity: &str) -> Vec<(usize, usize, String, f64)> {
    let detector = PatternDetector::new(Arc::new(RecognizerSet::builtin().unwrap()));
    let mut findings: Vec<_> = detector
        .detect(&DocumentText::new(text), &[EntityType::new(entity)])
        .into_iter()
        .map(|f| (f.start, f.end, f.text, f.score.unwrap()))
        .collect();
    findings.sort_by_key(|f| f.0);
    findings
}

#[test_case("123456782", true ; "weighted sum 154")]
#[test_case("111222333", true ; "weighted sum 66")]
#[test_case("012345672", true ; "leading zero")]
#[test_case("111111111", false ; "weighted sum 43")]
#[test_case("000000000", false ; "zero sum")]
#[test_case("123456789", false ; "weighted sum 147")]
fn test_eleven_check(candidate: &str, expected: bool) {
    assert_eq!(eleven_check(candidate), expected);
}

#[test]
fn test_valid_bsn_is_reported_with_validated_score() {
    let findings = detect("BSN: 123456782.", "BSN");
    assert_eq!(findings, vec![(5, 14, "123456782".to_string(), 0.85)]);
}

#[test]
fn test_invalid_bsn_is_dropped() {
    assert!(detect("BSN: 111111111", "BSN").is_empty());
}

#[test]
fn test_longer_digit_runs_are_not_bsn() {
    assert!(detect("Rekening 1234567820", "BSN").is_empty());
}

#[test]
fn test_kvk_number_has_low_base_score() {
    let findings = detect("KvK 12345678", "KVK_NUMBER");
    assert_eq!(findings, vec![(4, 12, "12345678".to_string(), 0.15)]);
}

#[test]
fn test_mobile_number_trailing_separator_is_trimmed() {
    let findings = detect("Bel 06 12345678 nu", "NL_PHONE_NUMBER");
    assert_eq!(findings, vec![(4, 15, "06 12345678".to_string(), 0.7)]);
}

#[test]
fn test_international_number() {
    let findings = detect("tel: +31 6 12345678", "NL_PHONE_NUMBER");
    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].2, "+31 6 12345678");
    assert_eq!(findings[0].3, 0.7);
}

#[test]
fn test_landline_number() {
    let findings = detect("Kantoor 020-1234567", "NL_PHONE_NUMBER");
    assert_eq!(findings, vec![(8, 19, "020-1234567".to_string(), 0.5)]);
}

#[test]
fn test_unrequested_entities_are_skipped() {
    assert!(detect("BSN: 123456782", "PERSON").is_empty());
}

#[test]
fn test_findings_carry_recognizer_source() {
    let detector = PatternDetector::new(Arc::new(RecognizerSet::builtin().unwrap()));
    let findings = detector.detect(&DocumentText::new("123456782"), &[EntityType::new("BSN")]);
    assert_eq!(findings[0].source, Some(FindingSource::Recognizer));
}

#[test]
fn test_custom_library_from_file() {
    let library = r#"
[[recognizers]]
name = "Postcode Recognizer"
entity_type = "NL_POSTCODE"
context = ["postcode"]

[[recognizers.patterns]]
name = "POSTCODE"
regex = '\b[1-9][0-9]{3} ?[A-Z]{2}\b'
score = 0.6
"#;
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(library.as_bytes()).unwrap();
    file.flush().unwrap();

    let set = RecognizerSet::from_file(file.path()).unwrap();
    assert_eq!(set.entity_types(), vec![EntityType::new("NL_POSTCODE")]);
    assert_eq!(set.all()[0].language, "nl");

    let detector = PatternDetector::new(Arc::new(set));
    let findings = detector.detect(
        &DocumentText::new("Adres: Damstraat 1, 1012 JS Amsterdam"),
        &[EntityType::new("NL_POSTCODE")],
    );
    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].text, "1012 JS");
}

#[test]
fn test_invalid_regex_is_a_pattern_error() {
    let library = r#"
[[recognizers]]
name = "Broken"
entity_type = "BROKEN"

[[recognizers.patterns]]
name = "BROKEN"
regex = '([0-9]'
score = 0.5
"#;
    assert!(matches!(
        RecognizerSet::from_toml(library),
        Err(XrefError::Pattern(_))
    ));
}

#[test]
fn test_unknown_validator_is_rejected() {
    let library = r#"
[[recognizers]]
name = "Odd"
entity_type = "ODD"
validator = "luhn_mod_97"

[[recognizers.patterns]]
name = "ODD"
regex = '[0-9]+'
score = 0.5
"#;
    assert!(RecognizerSet::from_toml(library).is_err());
}

#[test]
fn test_missing_library_file() {
    assert!(matches!(
        RecognizerSet::from_file("/nonexistent/pii-xref/patterns.toml"),
        Err(XrefError::Configuration(_))
    ));
}
