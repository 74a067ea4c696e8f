//! Validate config command implementation

use crate::config::load_config_or_default;
use crate::recognizers::RecognizerSet;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: Option<&str>) -> anyhow::Result<i32> {
        let shown = config_path.unwrap_or("(defaults)");
        tracing::info!(config_path = %shown, "Validating configuration");

        println!("🔍 Validating configuration: {shown}");
        println!();

        // Loading also validates
        let config = match load_config_or_default(config_path) {
            Ok(c) => {
                println!("✅ Configuration is valid");
                c
            }
            Err(e) => {
                println!("❌ Configuration validation failed");
                println!("   Error: {e}");
                return Ok(2); // Configuration error exit code
            }
        };

        let recognizers = match &config.detection.pattern_library {
            Some(path) => RecognizerSet::from_file(path),
            None => RecognizerSet::builtin(),
        };
        let recognizers = match recognizers {
            Ok(r) => {
                println!("✅ Pattern library compiled");
                r
            }
            Err(e) => {
                println!("❌ Pattern library failed to compile");
                println!("   Error: {e}");
                return Ok(2);
            }
        };

        println!();
        println!("Configuration Summary:");
        println!("  Log Level: {}", config.application.log_level);
        println!("  Language: {}", config.detection.language);
        println!("  Default Threshold: {}", config.detection.default_threshold);
        println!("  Default Entities: {:?}", config.detection.default_entities);
        println!("  Max Text Length: {} characters", config.detection.max_text_length);
        println!("  Recognizers: {}", recognizers.all().len());
        println!(
            "  Min Value Length: {}",
            config.cross_reference.min_value_length
        );
        println!("  Sort Output: {}", config.cross_reference.sort_output);
        println!(
            "  De-identifier Score: {}",
            config.deidentifier.fixed_score
        );
        println!();
        Ok(0)
    }
}
