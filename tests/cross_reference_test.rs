//! Integration tests for the cross-reference engine

use pii_xref::domain::{Finding, FindingReason, FindingSource, Span};
use pii_xref::xref::{CrossReferenceEngine, EngineSettings, Lexicon};
use std::sync::Arc;

const EMAIL_DOC: &str = "Bel Jan Jansen op 06-12345678, of mail naar jan.jansen@test.nl";

fn finding(entity_type: &str, start: usize, end: usize, text: &str, score: f64) -> Finding {
    Finding::new(entity_type, Span::new(start, end), text).with_score(score)
}

fn assert_no_overlap(original: &[Finding], additional: &[Finding]) {
    for (i, added) in additional.iter().enumerate() {
        for existing in original.iter().chain(&additional[..i]) {
            assert!(
                !added.span().overlaps(&existing.span()),
                "{:?} overlaps {:?}",
                added.span(),
                existing.span()
            );
        }
    }
}

#[test]
fn test_email_names_are_extracted() {
    let email = finding("EMAIL_ADDRESS", 44, 62, "jan.jansen@test.nl", 1.0);
    let additional = CrossReferenceEngine::default().cross_reference(EMAIL_DOC, &[email]);

    assert_eq!(additional.len(), 2);
    assert_eq!(
        (additional[0].start, additional[0].end, additional[0].text.as_str()),
        (4, 7, "Jan")
    );
    assert_eq!(
        (additional[1].start, additional[1].end, additional[1].text.as_str()),
        (8, 14, "Jansen")
    );
    for found in &additional {
        assert_eq!(found.entity_type.as_str(), "PERSON");
        assert_eq!(found.score, Some(0.5));
        assert_eq!(found.reason, Some(FindingReason::EmailExtraction));
        assert_eq!(found.source, Some(FindingSource::CrossReference));
    }
}

#[test]
fn test_caller_offsets_are_trusted() {
    // Offsets one past the real e-mail position still cover the tokens inside it
    let email = finding("EMAIL_ADDRESS", 45, 63, "jan.jansen@test.nl", 0.9);
    let additional = CrossReferenceEngine::default().cross_reference(EMAIL_DOC, &[email]);

    let spans: Vec<(usize, usize)> = additional.iter().map(|f| (f.start, f.end)).collect();
    assert_eq!(spans, vec![(4, 7), (8, 14)]);
}

#[test]
fn test_lowercase_email_type_is_recognized() {
    let email = finding("email", 44, 62, "jan.jansen@test.nl", 0.9);
    let additional = CrossReferenceEngine::default().cross_reference(EMAIL_DOC, &[email]);
    assert_eq!(additional.len(), 2);
}

#[test]
fn test_existing_findings_block_propagation() {
    let findings = vec![
        finding("EMAIL_ADDRESS", 44, 62, "jan.jansen@test.nl", 0.9),
        finding("PERSON", 4, 14, "Jan Jansen", 0.85),
    ];
    let additional = CrossReferenceEngine::default().cross_reference(EMAIL_DOC, &findings);
    assert!(additional.is_empty());
}

#[test]
fn test_stop_word_never_propagates() {
    let text = "naam: Jan de Vries\nnaam partner: Els";
    let findings = vec![finding("PERSON", 0, 4, "naam", 0.6)];
    assert!(CrossReferenceEngine::default()
        .cross_reference(text, &findings)
        .is_empty());
}

#[test]
fn test_name_prefix_tokens_are_not_searched() {
    let text = "De heer van Dijk en mevrouw de Vries. Mail: jan.de.vries@example.nl. Vries belt.";
    let email_start = text.find("jan.de.vries").unwrap();
    let email = finding(
        "EMAIL_ADDRESS",
        email_start,
        email_start + "jan.de.vries@example.nl".len(),
        "jan.de.vries@example.nl",
        0.9,
    );

    let additional = CrossReferenceEngine::default().cross_reference(text, &[email]);
    let texts: Vec<&str> = additional.iter().map(|f| f.text.as_str()).collect();

    // "de" and "van" stay unclaimed
    assert_eq!(texts, vec!["Vries", "Vries"]);
}

#[test]
fn test_value_propagation_across_document() {
    let text = "BSN 123456782 hoort bij Pieter. Pieter gaf 123456782 opnieuw op.";
    let findings = vec![
        finding("BSN", 4, 13, "123456782", 0.85),
        finding("PERSON", 24, 30, "Pieter", 0.8),
    ];

    let additional = CrossReferenceEngine::default().cross_reference(text, &findings);

    let summary: Vec<(&str, usize, usize)> = additional
        .iter()
        .map(|f| (f.entity_type.as_str(), f.start, f.end))
        .collect();
    assert_eq!(summary, vec![("BSN", 43, 52), ("PERSON", 32, 38)]);
    assert!(additional
        .iter()
        .all(|f| f.reason == Some(FindingReason::ValuePropagation)));
}

#[test]
fn test_no_overlap_with_nested_values() {
    let text = "Anna van der Berg-Smit en Berg-Smit. Later: anna van der berg-smit, Smit.";
    let findings = vec![
        finding("PERSON", 0, 22, "Anna van der Berg-Smit", 0.9),
        finding("PERSON", 13, 22, "Berg-Smit", 0.7),
        finding("PERSON", 18, 22, "Smit", 0.6),
    ];

    let additional = CrossReferenceEngine::default().cross_reference(text, &findings);

    assert_no_overlap(&findings, &additional);
    assert!(additional.iter().any(|f| f.text == "anna van der berg-smit"));
    assert!(additional.iter().any(|f| f.text == "Berg-Smit"));
}

#[test]
fn test_rerun_with_additions_finds_nothing_new() {
    let documents: Vec<(&str, Vec<Finding>)> = vec![
        (
            EMAIL_DOC,
            vec![finding("EMAIL_ADDRESS", 44, 62, "jan.jansen@test.nl", 0.9)],
        ),
        (
            "Utrecht, Utrecht en nog eens utrecht. Bel 020-1234567 of 020-1234567.",
            vec![
                Finding::new("LOCATION", Span::new(0, 7), "Utrecht"),
                finding("NL_PHONE_NUMBER", 42, 53, "020-1234567", 0.5),
            ],
        ),
    ];

    let engine = CrossReferenceEngine::default();
    for (text, findings) in documents {
        let additional = engine.cross_reference(text, &findings);
        assert!(!additional.is_empty());
        assert_no_overlap(&findings, &additional);

        let mut combined = findings.clone();
        combined.extend(additional);
        assert!(engine.cross_reference(text, &combined).is_empty());
    }
}

#[test]
fn test_offsets_are_characters() {
    let text = "Zoë de Bruïne belde. Later: zoë.";
    let findings = vec![finding("PERSON", 0, 3, "Zoë", 0.9)];

    let additional = CrossReferenceEngine::default().cross_reference(text, &findings);

    assert_eq!(additional.len(), 1);
    assert_eq!((additional[0].start, additional[0].end), (28, 31));
    assert_eq!(additional[0].text, "zoë");
}

#[test]
fn test_settings_are_honored() {
    let lexicon = Lexicon::dutch().with_extra_stop_words(["pieter"]);
    let settings = EngineSettings {
        email_name_score: 0.4,
        ..EngineSettings::default()
    };
    let engine = CrossReferenceEngine::new(Arc::new(lexicon), settings);

    let text = "pieter.bakker@example.nl: Pieter Bakker";
    let email = finding("EMAIL_ADDRESS", 0, 24, "pieter.bakker@example.nl", 0.9);
    let additional = engine.cross_reference(text, &[email]);

    assert_eq!(additional.len(), 1);
    assert_eq!(additional[0].text, "Bakker");
    assert_eq!(additional[0].score, Some(0.4));
}

#[test]
fn test_empty_findings_yield_nothing() {
    assert!(CrossReferenceEngine::default()
        .cross_reference(EMAIL_DOC, &[])
        .is_empty());
}

#[test]
fn test_unsearchable_value_is_skipped_and_pass_continues() {
    let settings = EngineSettings {
        max_search_size: 2000,
        ..EngineSettings::default()
    };
    let engine = CrossReferenceEngine::new(Arc::new(Lexicon::dutch()), settings);

    let long = "x".repeat(3000);
    let text = format!("{long} Pieter belde. Later belde Pieter opnieuw.");
    let findings = vec![
        finding("ID", 0, 3000, &long, 0.9),
        finding("PERSON", 3001, 3007, "Pieter", 0.8),
    ];

    let additional = engine.cross_reference(&text, &findings);

    assert_eq!(additional.len(), 1);
    assert_eq!(
        (additional[0].start, additional[0].end, additional[0].text.as_str()),
        (3027, 3033, "Pieter")
    );
    assert_eq!(additional[0].entity_type.as_str(), "PERSON");
}
