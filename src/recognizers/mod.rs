//! Validated pattern recognizers
//!
//! Regex candidate generators for Dutch identifiers, used as an input provider
//! next to the external entity detector:
//!
//! - **BSN**: nine digits, kept only when the eleven-residue checksum passes
//! - **KvK number**: eight digits with a low base score
//! - **Dutch phone numbers**: international, mobile and landline forms
//!
//! # Usage
//!
//! ```rust
//! use pii_xref::domain::{DocumentText, EntityType};
//! use pii_xref::recognizers::{PatternDetector, RecognizerSet};
//! use std::sync::Arc;
//!
//! # fn example() -> pii_xref::domain::Result<()> {
//! let detector = PatternDetector::new(Arc::new(RecognizerSet::builtin()?));
//! let doc = DocumentText::new("BSN 123456782");
//! let findings = detector.detect(&doc, &[EntityType::new("BSN")]);
//! assert_eq!(findings.len(), 1);
//! # Ok(())
//! # }
//! ```

pub mod checksum;
pub mod detector;
pub mod library;

pub use detector::PatternDetector;
pub use library::{Recognizer, RecognizerSet, Validator};
