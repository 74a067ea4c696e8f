//! Scan command implementation
//!
//! Runs detection over every file concurrently and prints one JSON report.

use super::build_service;
use crate::domain::Finding;
use crate::service::{AnalyzeRequest, CrossReferenceRequest, PiiService};
use chrono::{DateTime, Utc};
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::task::JoinSet;

/// Arguments for the scan command
#[derive(Args, Debug)]
pub struct ScanArgs {
    /// Documents to scan
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Also cross-reference each document's findings
    #[arg(long)]
    pub cross_reference: bool,

    /// Minimum score to report (configured default when omitted)
    #[arg(long)]
    pub threshold: Option<f64>,

    /// Entity types to report, comma separated
    #[arg(long, value_delimiter = ',')]
    pub entities: Vec<String>,
}

/// Report for one scanned document
#[derive(Debug, Serialize)]
pub struct DocumentReport {
    pub path: String,
    pub findings: Vec<Finding>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub additional: Vec<Finding>,
    pub count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Report printed by the scan command
#[derive(Debug, Serialize)]
pub struct ScanReport {
    pub generated_at: DateTime<Utc>,
    pub documents: Vec<DocumentReport>,
    pub total_findings: usize,
    pub failed_documents: usize,
}

impl ScanArgs {
    /// Execute the scan command
    pub async fn execute(&self, config_path: Option<&str>) -> anyhow::Result<i32> {
        let (_, service) = match build_service(config_path) {
            Ok(built) => built,
            Err(code) => return Ok(code),
        };
        let service = Arc::new(service);

        tracing::info!(files = self.files.len(), "Starting scan");

        let mut set = JoinSet::new();
        for (index, path) in self.files.iter().enumerate() {
            let service = Arc::clone(&service);
            let path = path.clone();
            let request = self.request_template();
            let cross_reference = self.cross_reference;
            set.spawn(async move {
                let report = scan_document(&service, path, request, cross_reference).await;
                (index, report)
            });
        }

        let mut documents: Vec<(usize, DocumentReport)> = Vec::with_capacity(self.files.len());
        while let Some(joined) = set.join_next().await {
            documents.push(joined?);
        }
        documents.sort_by_key(|(index, _)| *index);
        let documents: Vec<DocumentReport> = documents.into_iter().map(|(_, r)| r).collect();

        let report = ScanReport {
            generated_at: Utc::now(),
            total_findings: documents.iter().map(|d| d.count).sum(),
            failed_documents: documents.iter().filter(|d| d.error.is_some()).count(),
            documents,
        };

        println!("{}", serde_json::to_string_pretty(&report)?);

        tracing::info!(
            total_findings = report.total_findings,
            failed_documents = report.failed_documents,
            "Scan completed"
        );

        if report.failed_documents > 0 {
            eprintln!("⚠️  Scan completed with failures");
            return Ok(1); // Partial success
        }
        Ok(0)
    }

    fn request_template(&self) -> AnalyzeRequest {
        AnalyzeRequest {
            text: None,
            threshold: self.threshold,
            entities: (!self.entities.is_empty()).then(|| self.entities.clone()),
        }
    }
}

async fn scan_document(
    service: &PiiService,
    path: PathBuf,
    mut request: AnalyzeRequest,
    cross_reference: bool,
) -> DocumentReport {
    let shown = path.display().to_string();
    let mut report = DocumentReport {
        path: shown.clone(),
        findings: Vec::new(),
        additional: Vec::new(),
        count: 0,
        error: None,
    };

    let text = match tokio::fs::read_to_string(&path).await {
        Ok(text) => text,
        Err(e) => {
            tracing::warn!(path = %shown, error = %e, "Failed to read document");
            report.error = Some(format!("Failed to read {shown}: {e}"));
            return report;
        }
    };

    request.text = Some(text.clone());
    let findings = match service.analyze(request).await {
        Ok(response) => response.findings,
        Err(e) => {
            report.error = Some(e.to_body().error);
            return report;
        }
    };

    if cross_reference {
        match service.cross_reference(CrossReferenceRequest::new(text, findings.clone())) {
            Ok(response) => report.additional = response.findings,
            Err(e) => {
                report.error = Some(e.to_body().error);
            }
        }
    }

    report.count = findings.len() + report.additional.len();
    report.findings = findings;
    report
}
