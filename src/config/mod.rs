//! Configuration management
//!
//! TOML configuration with defaults for every setting, `${VAR_NAME}`
//! substitution and `PII_XREF_<SECTION>_<KEY>` environment overrides.
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [detection]
//! language = "nl"
//! default_threshold = 0.5
//! pattern_library = "${PII_XREF_PATTERNS}"
//!
//! [cross_reference]
//! min_value_length = 3
//! extra_stop_words = ["dossier", "referentie"]
//! sort_output = false
//!
//! [deidentifier]
//! fixed_score = 0.75
//!
//! [logging]
//! local_enabled = true
//! local_path = "./logs"
//! local_rotation = "daily"
//! ```
//!
//! # Loading
//!
//! ```rust,no_run
//! use pii_xref::config::load_config;
//!
//! # fn example() {
//! match load_config("pii-xref.toml") {
//!     Ok(config) => println!("Threshold: {}", config.detection.default_threshold),
//!     Err(e) => eprintln!("Configuration error: {}", e),
//! }
//! # }
//! ```

pub mod loader;
pub mod schema;

pub use loader::{load_config, load_config_or_default};
pub use schema::{
    ApplicationConfig, CrossReferenceConfig, DeidentifierConfig, DetectionConfig, LoggingConfig,
    XrefConfig,
};
