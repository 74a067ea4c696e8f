//! PII service entry points
//!
//! [`PiiService`] validates requests, runs the built-in recognizers and any
//! attached collaborators, and exposes the cross-reference engine. It holds
//! only read-only state and can be shared across tasks behind an `Arc`.
//!
//! # Example
//!
//! ```rust
//! use pii_xref::config::XrefConfig;
//! use pii_xref::service::{AnalyzeRequest, PiiService};
//!
//! # async fn example() -> pii_xref::domain::Result<()> {
//! let service = PiiService::new(&XrefConfig::default())?;
//! let response = service
//!     .analyze(AnalyzeRequest::new("BSN: 123456782").with_entities(["BSN"]))
//!     .await?;
//! assert_eq!(response.count, 1);
//! # Ok(())
//! # }
//! ```

pub mod models;

pub use models::{
    AnalyzeRequest, CrossReferenceRequest, DeidentifyRequest, FindingsResponse, HealthStatus,
};

use crate::adapters::{Deidentifier, EntityDetector};
use crate::config::XrefConfig;
use crate::domain::{
    CollaboratorError, DocumentText, EntityType, Finding, Result, XrefError,
};
use crate::recognizers::detector::remove_duplicates;
use crate::recognizers::{PatternDetector, RecognizerSet};
use crate::xref::{CrossReferenceEngine, Lexicon};
use std::sync::Arc;

const BUILTIN_ENGINE: &str = "pattern-recognizers";

/// Detection, de-identification and cross-reference service
#[derive(Clone)]
pub struct PiiService {
    config: Arc<XrefConfig>,
    detector: PatternDetector,
    engine: CrossReferenceEngine,
    entity_detector: Option<Arc<dyn EntityDetector>>,
    deidentifier: Option<Arc<dyn Deidentifier>>,
}

impl PiiService {
    /// Build a service from configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configured pattern library cannot be loaded.
    pub fn new(config: &XrefConfig) -> Result<Self> {
        let recognizers = match &config.detection.pattern_library {
            Some(path) => RecognizerSet::from_file(path)?,
            None => RecognizerSet::builtin()?,
        };
        Ok(Self::with_recognizers(config, recognizers))
    }

    /// Build a service around an already compiled recognizer set
    pub fn with_recognizers(config: &XrefConfig, recognizers: RecognizerSet) -> Self {
        let lexicon =
            Lexicon::dutch().with_extra_stop_words(&config.cross_reference.extra_stop_words);

        tracing::info!(
            recognizers = recognizers.all().len(),
            language = %config.detection.language,
            "PII service initialized"
        );

        Self {
            config: Arc::new(config.clone()),
            detector: PatternDetector::new(Arc::new(recognizers)),
            engine: CrossReferenceEngine::new(Arc::new(lexicon), config.engine_settings()),
            entity_detector: None,
            deidentifier: None,
        }
    }

    pub fn with_entity_detector(mut self, detector: Arc<dyn EntityDetector>) -> Self {
        self.entity_detector = Some(detector);
        self
    }

    pub fn with_deidentifier(mut self, deidentifier: Arc<dyn Deidentifier>) -> Self {
        self.deidentifier = Some(deidentifier);
        self
    }

    pub fn config(&self) -> &XrefConfig {
        &self.config
    }

    pub fn recognizers(&self) -> &RecognizerSet {
        self.detector.recognizers()
    }

    /// Detect PII with the recognizers and the attached entity detector
    ///
    /// Findings below the threshold are dropped, scores are rounded to two
    /// decimals, `text` is taken from the document and the result is sorted
    /// by start offset.
    ///
    /// # Errors
    ///
    /// Contract violations for a missing or oversized text or an out-of-range
    /// threshold; [`XrefError::AnalysisFailed`] if the entity detector fails.
    pub async fn analyze(&self, request: AnalyzeRequest) -> Result<FindingsResponse> {
        let text = self.require_text(request.text.as_deref(), "analyze")?;

        let threshold = request
            .threshold
            .unwrap_or(self.config.detection.default_threshold);
        if !(0.0..=1.0).contains(&threshold) {
            let err = XrefError::InvalidRequest(format!(
                "threshold must be between 0 and 1, got {}",
                threshold
            ));
            crate::log_contract_violation!(&err, "analyze");
            return Err(err);
        }

        let entities = match request.entities {
            Some(entities) if !entities.is_empty() => entities,
            _ => self.config.detection.default_entities.clone(),
        };
        let entity_types: Vec<EntityType> = entities.iter().map(EntityType::new).collect();

        let doc = DocumentText::new(text);
        let mut findings = self.detector.detect(&doc, &entity_types);

        if let Some(detector) = &self.entity_detector {
            let spans = detector
                .analyze(text, &entities, threshold)
                .await
                .map_err(|e| {
                    tracing::error!(detector = detector.name(), error = %e, "Entity detection failed");
                    XrefError::AnalysisFailed
                })?;

            let char_len = doc.char_len();
            for span in spans {
                if span.start >= span.end || span.end > char_len {
                    tracing::warn!(
                        detector = detector.name(),
                        start = span.start,
                        end = span.end,
                        "Skipping out-of-bounds detection"
                    );
                    continue;
                }
                let mut finding = span.into_finding();
                finding.text = doc.slice(finding.span()).unwrap_or_default().to_string();
                findings.push(finding);
            }
        }

        let mut findings: Vec<Finding> = remove_duplicates(findings)
            .into_iter()
            .filter(|f| f.score.unwrap_or(0.0) >= threshold)
            .map(Finding::rounded)
            .collect();
        findings.sort_by_key(|f| f.start);

        tracing::debug!(count = findings.len(), threshold, "Analysis complete");
        Ok(FindingsResponse::new(findings))
    }

    /// Annotate the text with the attached de-identifier
    ///
    /// Every annotation becomes a finding with the configured fixed score,
    /// sorted by start offset.
    ///
    /// # Errors
    ///
    /// Contract violations for a missing or oversized text; a collaborator
    /// error when no de-identifier is attached; [`XrefError::AnalysisFailed`]
    /// if it fails.
    pub async fn deidentify(&self, request: DeidentifyRequest) -> Result<FindingsResponse> {
        let text = self.require_text(request.text.as_deref(), "deidentify")?;

        let Some(deidentifier) = &self.deidentifier else {
            tracing::error!("De-identification requested but no de-identifier is attached");
            return Err(CollaboratorError::NotConfigured("de-identifier").into());
        };

        let annotations = deidentifier.annotate(text).await.map_err(|e| {
            tracing::error!(deidentifier = deidentifier.name(), error = %e, "De-identification failed");
            XrefError::AnalysisFailed
        })?;

        let score = self.config.deidentifier.fixed_score;
        let mut findings: Vec<Finding> = annotations
            .into_iter()
            .map(|a| a.into_finding(score))
            .collect();
        findings.sort_by_key(|f| f.start);

        Ok(FindingsResponse::new(findings))
    }

    /// Find further occurrences of the given findings' values
    ///
    /// Only the additional findings are returned. They are in acceptance order
    /// unless `cross_reference.sort_output` is set.
    ///
    /// # Errors
    ///
    /// Contract violations for a missing text, missing findings or an
    /// oversized text.
    pub fn cross_reference(&self, request: CrossReferenceRequest) -> Result<FindingsResponse> {
        let text = self.require_text(request.text.as_deref(), "cross_reference")?;
        let Some(findings) = request.findings.as_deref() else {
            let err = XrefError::MissingField("findings");
            crate::log_contract_violation!(&err, "cross_reference");
            return Err(err);
        };

        let mut additional = self.engine.cross_reference(text, findings);
        if self.config.cross_reference.sort_output {
            additional.sort_by_key(|f| f.start);
        }

        tracing::info!(
            input = findings.len(),
            additional = additional.len(),
            "Cross-reference complete"
        );
        Ok(FindingsResponse::new(additional))
    }

    pub fn health(&self) -> HealthStatus {
        HealthStatus {
            status: "ok".to_string(),
            engine: self
                .entity_detector
                .as_ref()
                .map(|d| d.name().to_string())
                .unwrap_or_else(|| BUILTIN_ENGINE.to_string()),
            language: self.config.detection.language.clone(),
            custom_recognizers: self
                .recognizers()
                .entity_types()
                .iter()
                .map(|t| t.to_string())
                .collect(),
            deidentifier: self.deidentifier.as_ref().map(|d| d.name().to_string()),
        }
    }

    /// Presence and size checks shared by every entry point
    fn require_text<'t>(&self, text: Option<&'t str>, operation: &str) -> Result<&'t str> {
        let Some(text) = text else {
            let err = XrefError::MissingField("text");
            crate::log_contract_violation!(&err, operation);
            return Err(err);
        };

        let max = self.config.detection.max_text_length;
        let length = text.chars().count();
        if length > max {
            let err = XrefError::TextTooLarge { length, max };
            crate::log_contract_violation!(&err, operation);
            return Err(err);
        }

        Ok(text)
    }
}

impl std::fmt::Debug for PiiService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PiiService")
            .field("recognizers", &self.recognizers().all().len())
            .field(
                "entity_detector",
                &self.entity_detector.as_ref().map(|d| d.name().to_string()),
            )
            .field(
                "deidentifier",
                &self.deidentifier.as_ref().map(|d| d.name().to_string()),
            )
            .finish()
    }
}
