//! Domain models and types for pii-xref.
//!
//! The domain layer provides:
//! - **Findings** ([`Finding`], [`EntityType`], [`Span`]) shared by every component
//! - **Document offsets** ([`DocumentText`]) converting regex byte offsets to characters
//! - **Error types** ([`XrefError`], [`CollaboratorError`])
//! - **Result type alias** ([`Result`])
//!
//! # Example
//!
//! ```rust
//! use pii_xref::domain::{EntityType, Finding, FindingSource, Span};
//!
//! let finding = Finding::new(EntityType::person(), Span::new(4, 7), "Jan")
//!     .with_score(0.5)
//!     .with_source(FindingSource::CrossReference);
//! assert_eq!(finding.span().len(), 3);
//! ```

pub mod errors;
pub mod finding;
pub mod result;
pub mod text;

// Re-export commonly used types for convenience
pub use errors::{CollaboratorError, ErrorBody, XrefError};
pub use finding::{EntityType, Finding, FindingReason, FindingSource, Span};
pub use result::Result;
pub use text::DocumentText;
