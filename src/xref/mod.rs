//! Cross-reference of detected PII
//!
//! Detectors find a value once; documents repeat it. This module finds the
//! repeats without ever letting two findings claim the same character.

pub mod coverage;
pub mod engine;
pub mod lexicon;
pub mod search;

pub use coverage::CoverageIndex;
pub use engine::{Accumulator, CrossReferenceEngine, EngineSettings};
pub use lexicon::Lexicon;
pub use search::LiteralSearch;
