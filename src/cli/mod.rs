//! CLI interface and argument parsing

pub mod commands;

use clap::{Parser, Subcommand};

/// pii-xref - Dutch PII detection and cross-reference
#[derive(Parser, Debug)]
#[command(name = "pii-xref")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file (built-in defaults when omitted)
    #[arg(short, long, env = "PII_XREF_CONFIG")]
    pub config: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "PII_XREF_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Detect PII in documents with the built-in recognizers
    Scan(commands::scan::ScanArgs),

    /// Find further occurrences of known findings in a document
    Xref(commands::xref::XrefArgs),

    /// List the loaded recognizers
    Recognizers(commands::recognizers::RecognizersArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),
}
