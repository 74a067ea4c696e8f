//! Xref command implementation

use super::build_service;
use crate::domain::Finding;
use crate::service::CrossReferenceRequest;
use anyhow::Context;
use clap::Args;
use serde::Deserialize;
use std::path::PathBuf;

/// Arguments for the xref command
#[derive(Args, Debug)]
pub struct XrefArgs {
    /// Document text
    #[arg(long)]
    pub text: PathBuf,

    /// JSON findings, either an array or an object with a `findings` array
    #[arg(long)]
    pub findings: PathBuf,
}

/// Accepted shapes of the findings file
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum FindingsInput {
    List(Vec<Finding>),
    Wrapped { findings: Vec<Finding> },
}

impl FindingsInput {
    pub fn into_findings(self) -> Vec<Finding> {
        match self {
            Self::List(findings) | Self::Wrapped { findings } => findings,
        }
    }
}

impl XrefArgs {
    /// Execute the xref command
    pub async fn execute(&self, config_path: Option<&str>) -> anyhow::Result<i32> {
        let (_, service) = match build_service(config_path) {
            Ok(built) => built,
            Err(code) => return Ok(code),
        };

        let text = tokio::fs::read_to_string(&self.text)
            .await
            .with_context(|| format!("Failed to read {}", self.text.display()))?;
        let raw = tokio::fs::read_to_string(&self.findings)
            .await
            .with_context(|| format!("Failed to read {}", self.findings.display()))?;

        let findings = match serde_json::from_str::<FindingsInput>(&raw) {
            Ok(input) => input.into_findings(),
            Err(e) => {
                eprintln!("❌ Findings file is not valid JSON findings");
                eprintln!("   Error: {e}");
                return Ok(2);
            }
        };

        match service.cross_reference(CrossReferenceRequest::new(text, findings)) {
            Ok(response) => {
                println!("{}", serde_json::to_string_pretty(&response)?);
                Ok(0)
            }
            Err(e) if e.is_contract_violation() => {
                println!("{}", serde_json::to_string_pretty(&e.to_body())?);
                Ok(2)
            }
            Err(e) => Err(e.into()),
        }
    }
}
