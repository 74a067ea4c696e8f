//! Recognizers command implementation

use super::build_service;
use clap::Args;
use serde::Serialize;

/// Arguments for the recognizers command
#[derive(Args, Debug)]
pub struct RecognizersArgs {
    /// Print JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct PatternSummary<'a> {
    name: &'a str,
    regex: &'a str,
    score: f64,
}

#[derive(Debug, Serialize)]
struct RecognizerSummary<'a> {
    name: &'a str,
    entity_type: &'a str,
    language: &'a str,
    validator: Option<&'static str>,
    validated_score: Option<f64>,
    context: &'a [String],
    patterns: Vec<PatternSummary<'a>>,
}

impl RecognizersArgs {
    /// Execute the recognizers command
    pub async fn execute(&self, config_path: Option<&str>) -> anyhow::Result<i32> {
        let (config, service) = match build_service(config_path) {
            Ok(built) => built,
            Err(code) => return Ok(code),
        };

        let summaries: Vec<RecognizerSummary<'_>> = service
            .recognizers()
            .all()
            .iter()
            .map(|r| RecognizerSummary {
                name: &r.name,
                entity_type: r.entity_type.as_str(),
                language: &r.language,
                validator: r.validator.map(|v| v.as_str()),
                validated_score: r.validated_score,
                context: &r.context,
                patterns: r
                    .patterns
                    .iter()
                    .map(|p| PatternSummary {
                        name: &p.name,
                        regex: p.regex.as_str(),
                        score: p.score,
                    })
                    .collect(),
            })
            .collect();

        if self.json {
            println!("{}", serde_json::to_string_pretty(&summaries)?);
            return Ok(0);
        }

        let source = config
            .detection
            .pattern_library
            .as_deref()
            .unwrap_or("built-in");
        println!("🔎 Recognizers ({source})");
        println!();
        for summary in &summaries {
            println!("  {} [{}]", summary.name, summary.entity_type);
            if let Some(validator) = &summary.validator {
                println!(
                    "    Validator: {} (score {})",
                    validator,
                    summary.validated_score.unwrap_or_default()
                );
            }
            for pattern in &summary.patterns {
                println!("    {:<28} {:.2}  {}", pattern.name, pattern.score, pattern.regex);
            }
            if !summary.context.is_empty() {
                println!("    Context: {}", summary.context.join(", "));
            }
            println!();
        }

        Ok(0)
    }
}
