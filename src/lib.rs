// pii-xref - Dutch PII Detection and Cross-Reference
// Copyright (c) 2025 pii-xref Contributors
// Licensed under the MIT License

//! # pii-xref - Dutch PII Detection and Cross-Reference
//!
//! pii-xref complements upstream PII detectors for Dutch text. Detectors tend
//! to find a value once; this library finds every other place it occurs.
//!
//! ## Overview
//!
//! - **Recognizing** BSN, KvK and Dutch phone numbers with checksum validation
//! - **Propagating** detected values to their other occurrences in a document
//! - **Extracting** person names from e-mail addresses
//! - **Guaranteeing** that no character is claimed by two findings
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`service`] - Request validation and the detection entry points
//! - [`xref`] - Coverage index, lexicon filters and the cross-reference engine
//! - [`recognizers`] - Validated regex recognizers
//! - [`adapters`] - Seams for external entity detectors and de-identifiers
//! - [`domain`] - Findings, spans, character offsets and errors
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust
//! use pii_xref::config::XrefConfig;
//! use pii_xref::domain::{Finding, Span};
//! use pii_xref::service::{CrossReferenceRequest, PiiService};
//!
//! # fn main() -> pii_xref::domain::Result<()> {
//! let service = PiiService::new(&XrefConfig::default())?;
//!
//! let text = "Bel Jan Jansen op 06-12345678, of mail naar jan.jansen@test.nl";
//! let email = Finding::new("EMAIL_ADDRESS", Span::new(44, 62), "jan.jansen@test.nl")
//!     .with_score(0.95);
//!
//! let response = service.cross_reference(CrossReferenceRequest::new(text, vec![email]))?;
//! let names: Vec<&str> = response.findings.iter().map(|f| f.text.as_str()).collect();
//! assert_eq!(names, ["Jan", "Jansen"]);
//! # Ok(())
//! # }
//! ```
//!
//! ## Offsets
//!
//! Every `start`/`end` in this crate is a character offset, end exclusive.
//! [`domain::DocumentText`] converts regex byte offsets at the boundary.
//!
//! ## Error Handling
//!
//! Fallible operations return [`domain::Result`] with [`domain::XrefError`].
//! Contract violations are distinguishable through
//! [`domain::XrefError::is_contract_violation`] and every error has a stable
//! code for callers.

pub mod adapters;
pub mod cli;
pub mod config;
pub mod domain;
pub mod logging;
pub mod recognizers;
pub mod service;
pub mod xref;
