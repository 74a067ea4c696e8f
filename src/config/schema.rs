//! Configuration schema types

use crate::xref::EngineSettings;
use serde::{Deserialize, Serialize};

/// Root configuration, mapped from the TOML file
///
/// Every section is optional; an empty file yields the defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct XrefConfig {
    #[serde(default)]
    pub application: ApplicationConfig,

    #[serde(default)]
    pub detection: DetectionConfig,

    #[serde(default)]
    pub cross_reference: CrossReferenceConfig,

    #[serde(default)]
    pub deidentifier: DeidentifierConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl XrefConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns a message naming the first invalid setting
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.detection.validate()?;
        self.cross_reference.validate()?;
        self.deidentifier.validate()?;
        self.logging.validate()?;
        Ok(())
    }

    /// Cross-reference engine tunables
    pub fn engine_settings(&self) -> EngineSettings {
        EngineSettings {
            min_value_length: self.cross_reference.min_value_length,
            min_name_length: self.cross_reference.min_name_length,
            default_score: self.cross_reference.default_score,
            email_name_score: self.cross_reference.email_name_score,
            max_search_size: self.detection.max_search_size,
        }
    }
}

/// Application-level configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// Detection entry point settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectionConfig {
    /// Language passed to detectors and reported by health
    #[serde(default = "default_language")]
    pub language: String,

    /// Minimum score kept when a request gives no threshold
    #[serde(default = "default_threshold")]
    pub default_threshold: f64,

    /// Entity types analyzed when a request names none
    #[serde(default = "default_entities")]
    pub default_entities: Vec<String>,

    /// Maximum document length in characters
    #[serde(default = "default_max_text_length")]
    pub max_text_length: usize,

    /// Recognizer library replacing the built-in one
    #[serde(default)]
    pub pattern_library: Option<String>,

    /// Compiled-size ceiling for each cross-reference search
    #[serde(default = "default_max_search_size")]
    pub max_search_size: usize,
}

impl DetectionConfig {
    fn validate(&self) -> Result<(), String> {
        if self.language.trim().is_empty() {
            return Err("detection.language must not be empty".to_string());
        }
        if !(0.0..=1.0).contains(&self.default_threshold) {
            return Err(format!(
                "detection.default_threshold must be between 0 and 1, got {}",
                self.default_threshold
            ));
        }
        if self.default_entities.is_empty() {
            return Err("detection.default_entities must not be empty".to_string());
        }
        if self.max_text_length == 0 {
            return Err("detection.max_text_length must be > 0".to_string());
        }
        if self.max_search_size < 1024 {
            return Err("detection.max_search_size must be at least 1024".to_string());
        }
        Ok(())
    }
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            language: default_language(),
            default_threshold: default_threshold(),
            default_entities: default_entities(),
            max_text_length: default_max_text_length(),
            pattern_library: None,
            max_search_size: default_max_search_size(),
        }
    }
}

/// Cross-reference engine settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrossReferenceConfig {
    #[serde(default = "default_min_value_length")]
    pub min_value_length: usize,

    #[serde(default = "default_min_name_length")]
    pub min_name_length: usize,

    /// Score for propagated findings whose source had none
    #[serde(default = "default_propagation_score")]
    pub default_score: f64,

    #[serde(default = "default_email_name_score")]
    pub email_name_score: f64,

    /// Added to the built-in stop words
    #[serde(default)]
    pub extra_stop_words: Vec<String>,

    /// Sort output by start offset instead of acceptance order
    #[serde(default)]
    pub sort_output: bool,
}

impl CrossReferenceConfig {
    fn validate(&self) -> Result<(), String> {
        if self.min_value_length == 0 {
            return Err("cross_reference.min_value_length must be > 0".to_string());
        }
        if self.min_name_length == 0 {
            return Err("cross_reference.min_name_length must be > 0".to_string());
        }
        for (name, score) in [
            ("default_score", self.default_score),
            ("email_name_score", self.email_name_score),
        ] {
            if !(0.0..=1.0).contains(&score) {
                return Err(format!(
                    "cross_reference.{} must be between 0 and 1, got {}",
                    name, score
                ));
            }
        }
        Ok(())
    }
}

impl Default for CrossReferenceConfig {
    fn default() -> Self {
        Self {
            min_value_length: default_min_value_length(),
            min_name_length: default_min_name_length(),
            default_score: default_propagation_score(),
            email_name_score: default_email_name_score(),
            extra_stop_words: Vec::new(),
            sort_output: false,
        }
    }
}

/// De-identifier settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeidentifierConfig {
    /// Confidence assigned to every annotation
    #[serde(default = "default_fixed_score")]
    pub fixed_score: f64,
}

impl DeidentifierConfig {
    fn validate(&self) -> Result<(), String> {
        if !(0.0..=1.0).contains(&self.fixed_score) {
            return Err(format!(
                "deidentifier.fixed_score must be between 0 and 1, got {}",
                self.fixed_score
            ));
        }
        Ok(())
    }
}

impl Default for DeidentifierConfig {
    fn default() -> Self {
        Self {
            fixed_score: default_fixed_score(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable JSON file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Log file directory
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }
        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err("logging.local_path must be set when local logging is enabled".to_string());
        }
        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_language() -> String {
    "nl".to_string()
}

fn default_threshold() -> f64 {
    0.5
}

fn default_entities() -> Vec<String> {
    [
        "EMAIL_ADDRESS",
        "IBAN_CODE",
        "CREDIT_CARD",
        "IP_ADDRESS",
        "URL",
        "PHONE_NUMBER",
        "PERSON",
        "LOCATION",
        "ORGANIZATION",
        "BSN",
        "KVK_NUMBER",
        "NL_PHONE_NUMBER",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_max_text_length() -> usize {
    2 * 1024 * 1024
}

fn default_max_search_size() -> usize {
    crate::xref::search::DEFAULT_SIZE_LIMIT
}

fn default_min_value_length() -> usize {
    3
}

fn default_min_name_length() -> usize {
    2
}

fn default_propagation_score() -> f64 {
    0.7
}

fn default_email_name_score() -> f64 {
    0.5
}

fn default_fixed_score() -> f64 {
    0.75
}

fn default_local_path() -> String {
    "./logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}
