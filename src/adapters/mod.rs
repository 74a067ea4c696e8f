//! External collaborator seams
//!
//! The service does not run NER itself. Statistical entity detection and
//! de-identification live behind the traits in [`traits`] so that deployments
//! can plug in their own engines and tests can substitute stubs.
//!
//! ```rust
//! use async_trait::async_trait;
//! use pii_xref::adapters::{DetectedSpan, EntityDetector};
//! use pii_xref::domain::Result;
//!
//! struct NoNames;
//!
//! #[async_trait]
//! impl EntityDetector for NoNames {
//!     async fn analyze(&self, _text: &str, _entities: &[String], _threshold: f64) -> Result<Vec<DetectedSpan>> {
//!         Ok(Vec::new())
//!     }
//!
//!     fn name(&self) -> &str {
//!         "no-names"
//!     }
//! }
//! ```

pub mod traits;

pub use traits::{Annotation, Deidentifier, DetectedSpan, EntityDetector};
