//! Domain error types
//!
//! This module defines the error hierarchy for pii-xref. Errors fall into three
//! groups: contract violations raised before any processing starts, per-item
//! failures that callers log and skip, and internal failures that are surfaced
//! as a generic message.

use serde::Serialize;
use thiserror::Error;

/// Main pii-xref error type
#[derive(Debug, Error)]
pub enum XrefError {
    /// A required request field was absent
    #[error("No {0} provided")]
    MissingField(&'static str),

    /// Document exceeds the configured size ceiling
    #[error("Text too large ({length} characters, max {max})")]
    TextTooLarge { length: usize, max: usize },

    /// Request is structurally valid but semantically unusable
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Recognizer library errors (bad regex, unknown validator)
    #[error("Pattern error: {0}")]
    Pattern(String),

    /// A literal search value could not be compiled
    #[error("Search construction failed: {0}")]
    Search(String),

    /// External collaborator errors
    #[error("Collaborator error: {0}")]
    Collaborator(#[from] CollaboratorError),

    /// Unexpected failure, details are logged and not exposed
    #[error("Analysis failed")]
    AnalysisFailed,
}

/// Errors reported by the external entity detector or de-identifier
///
/// These errors don't expose the collaborators' own client types.
#[derive(Debug, Error)]
pub enum CollaboratorError {
    /// No collaborator of the requested kind is attached
    #[error("{0} is not configured")]
    NotConfigured(&'static str),

    /// Collaborator could not be reached
    #[error("{name} unavailable: {message}")]
    Unavailable { name: String, message: String },
}

/// Serializable error payload for callers
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorBody {
    /// Human-readable message
    pub error: String,
    /// Stable machine-readable code
    pub code: &'static str,
}

impl XrefError {
    /// Stable machine-readable error code
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingField(_) => "missing_field",
            Self::TextTooLarge { .. } => "text_too_large",
            Self::InvalidRequest(_) => "invalid_request",
            Self::Configuration(_) => "configuration",
            Self::Pattern(_) => "pattern",
            Self::Search(_) => "search",
            Self::Collaborator(_) | Self::AnalysisFailed => "analysis_failed",
        }
    }

    /// Whether the caller broke the request contract
    pub fn is_contract_violation(&self) -> bool {
        matches!(
            self,
            Self::MissingField(_) | Self::TextTooLarge { .. } | Self::InvalidRequest(_)
        )
    }

    /// Payload safe to hand back to a caller
    ///
    /// Internal failures collapse to a generic message.
    pub fn to_body(&self) -> ErrorBody {
        let error = match self {
            Self::Collaborator(_) | Self::AnalysisFailed => "Analysis failed".to_string(),
            other => other.to_string(),
        };
        ErrorBody {
            error,
            code: self.code(),
        }
    }
}

impl From<toml::de::Error> for XrefError {
    fn from(err: toml::de::Error) -> Self {
        XrefError::Configuration(format!("TOML parse error: {err}"))
    }
}
