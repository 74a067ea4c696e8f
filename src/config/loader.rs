//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::XrefConfig;
use crate::domain::{Result, XrefError};
use regex::Regex;
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// Prefix of environment variable overrides
pub const ENV_PREFIX: &str = "PII_XREF";

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into XrefConfig
/// 4. Applies environment variable overrides (PII_XREF_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns a configuration error if the file is missing or unreadable, a
/// referenced variable is unset, the TOML is malformed, or validation fails.
///
/// # Examples
///
/// ```no_run
/// use pii_xref::config::load_config;
///
/// let config = load_config("pii-xref.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<XrefConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(XrefError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        XrefError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let contents = substitute_env_vars(&contents)?;

    let config: XrefConfig = toml::from_str(&contents)
        .map_err(|e| XrefError::Configuration(format!("Failed to parse TOML: {}", e)))?;

    finish(config)
}

/// Loads the given file, or the defaults when no path is given
///
/// Environment overrides and validation apply either way.
pub fn load_config_or_default(path: Option<&str>) -> Result<XrefConfig> {
    match path {
        Some(path) => load_config(path),
        None => finish(XrefConfig::default()),
    }
}

fn finish(mut config: XrefConfig) -> Result<XrefConfig> {
    apply_env_overrides(&mut config)?;

    config.validate().map_err(|e| {
        XrefError::Configuration(format!("Configuration validation failed: {}", e))
    })?;

    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are left untouched.
///
/// # Errors
///
/// Returns an error listing every referenced variable that is not set
pub fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| XrefError::Configuration(e.to_string()))?;
    let mut result = String::with_capacity(input.len());
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let processed = re.replace_all(line, |caps: &regex::Captures<'_>| {
            let var_name = &caps[1];
            match std::env::var(var_name) {
                Ok(value) => value,
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                    String::new()
                }
            }
        });
        result.push_str(&processed);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(XrefError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Read and parse one `PII_XREF_<SECTION>_<KEY>` variable
fn env_override<T: FromStr>(key: &str) -> Result<Option<T>> {
    let name = format!("{}_{}", ENV_PREFIX, key);
    match std::env::var(&name) {
        Ok(val) => val.trim().parse().map(Some).map_err(|_| {
            XrefError::Configuration(format!("Invalid value for {}: '{}'", name, val))
        }),
        Err(_) => Ok(None),
    }
}

fn env_list(key: &str) -> Option<Vec<String>> {
    std::env::var(format!("{}_{}", ENV_PREFIX, key))
        .ok()
        .map(|val| {
            val.split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect()
        })
}

/// Applies environment variable overrides using the PII_XREF_* prefix
///
/// Variables follow the pattern `PII_XREF_<SECTION>_<KEY>`, for example
/// `PII_XREF_DETECTION_DEFAULT_THRESHOLD` or `PII_XREF_CROSS_REFERENCE_SORT_OUTPUT`.
/// List values are comma separated.
pub fn apply_env_overrides(config: &mut XrefConfig) -> Result<()> {
    // Application overrides
    if let Some(val) = env_override("APPLICATION_LOG_LEVEL")? {
        config.application.log_level = val;
    }

    // Detection overrides
    if let Some(val) = env_override("DETECTION_LANGUAGE")? {
        config.detection.language = val;
    }
    if let Some(val) = env_override("DETECTION_DEFAULT_THRESHOLD")? {
        config.detection.default_threshold = val;
    }
    if let Some(val) = env_list("DETECTION_DEFAULT_ENTITIES") {
        config.detection.default_entities = val;
    }
    if let Some(val) = env_override("DETECTION_MAX_TEXT_LENGTH")? {
        config.detection.max_text_length = val;
    }
    if let Some(val) = env_override("DETECTION_PATTERN_LIBRARY")? {
        config.detection.pattern_library = Some(val);
    }
    if let Some(val) = env_override("DETECTION_MAX_SEARCH_SIZE")? {
        config.detection.max_search_size = val;
    }

    // Cross-reference overrides
    if let Some(val) = env_override("CROSS_REFERENCE_MIN_VALUE_LENGTH")? {
        config.cross_reference.min_value_length = val;
    }
    if let Some(val) = env_override("CROSS_REFERENCE_MIN_NAME_LENGTH")? {
        config.cross_reference.min_name_length = val;
    }
    if let Some(val) = env_override("CROSS_REFERENCE_DEFAULT_SCORE")? {
        config.cross_reference.default_score = val;
    }
    if let Some(val) = env_override("CROSS_REFERENCE_EMAIL_NAME_SCORE")? {
        config.cross_reference.email_name_score = val;
    }
    if let Some(val) = env_list("CROSS_REFERENCE_EXTRA_STOP_WORDS") {
        config.cross_reference.extra_stop_words = val;
    }
    if let Some(val) = env_override("CROSS_REFERENCE_SORT_OUTPUT")? {
        config.cross_reference.sort_output = val;
    }

    // De-identifier overrides
    if let Some(val) = env_override("DEIDENTIFIER_FIXED_SCORE")? {
        config.deidentifier.fixed_score = val;
    }

    // Logging overrides
    if let Some(val) = env_override("LOGGING_LOCAL_ENABLED")? {
        config.logging.local_enabled = val;
    }
    if let Some(val) = env_override("LOGGING_LOCAL_PATH")? {
        config.logging.local_path = val;
    }
    if let Some(val) = env_override("LOGGING_LOCAL_ROTATION")? {
        config.logging.local_rotation = val;
    }

    Ok(())
}
