//! Logging and observability
//!
//! Structured logging through `tracing`:
//! - console output for interactive use
//! - optional JSON files with daily or hourly rotation
//! - PII values only ever appear as SHA-256 fingerprints
//!
//! # Example
//!
//! ```no_run
//! use pii_xref::config::LoggingConfig;
//! use pii_xref::logging::init_logging;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Service started");
//! ```

pub mod structured;

pub use structured::{init_logging, LoggingGuard};

use sha2::{Digest, Sha256};

/// SHA-256 fingerprint of a PII value, safe to log
pub fn fingerprint(value: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(value.as_bytes());
    let result = hasher.finalize();
    format!("{result:x}")
}

/// Log the completion of a cross-reference pass
///
/// # Example
///
/// ```no_run
/// use pii_xref::log_pass_complete;
///
/// log_pass_complete!("value-propagation", 3);
/// ```
#[macro_export]
macro_rules! log_pass_complete {
    ($pass:expr, $added:expr) => {
        tracing::debug!(pass = $pass, added = $added, "Cross-reference pass complete");
    };
}

/// Log a rejected request
///
/// # Example
///
/// ```no_run
/// use pii_xref::log_contract_violation;
/// use pii_xref::domain::XrefError;
///
/// let error = XrefError::MissingField("text");
/// log_contract_violation!(&error, "analyze");
/// ```
#[macro_export]
macro_rules! log_contract_violation {
    ($error:expr, $operation:expr) => {
        tracing::warn!(
            error = %$error,
            code = $error.code(),
            operation = $operation,
            "Request rejected"
        );
    };
}
