//! JSON export of a conversion run

use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;
use serde::Serialize;

use crate::convert::ConversionResult;

/// Metadata about the conversion run
#[derive(Serialize)]
pub struct ReportMetadata {
    /// Timestamp of the run (RFC 3339, UTC)
    pub timestamp: String,
    pub imgconv_version: String,
    /// Input file or folder
    pub input: String,
    pub target_format: String,
    pub output_dir: String,
    /// Icon sizes, only for ICO output
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon_sizes: Option<String>,
}

#[derive(Serialize)]
pub struct ReportSummary {
    pub succeeded: usize,
    pub failed: usize,
}

/// One converted (or failed) file
#[derive(Serialize)]
pub struct ReportEntry {
    pub source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination: Option<String>,
    pub success: bool,
    /// Error kind such as `not_found` or `encode_decode_failure`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<String>,
    pub message: String,
}

impl From<&ConversionResult> for ReportEntry {
    fn from(result: &ConversionResult) -> Self {
        Self {
            source: result.source().display().to_string(),
            destination: result.destination().map(|d| d.display().to_string()),
            success: result.is_success(),
            error_kind: result.error().map(|e| e.kind().to_string()),
            message: result.message(),
        }
    }
}

/// Complete report written by `--report`
#[derive(Serialize)]
pub struct ConversionReport {
    pub metadata: ReportMetadata,
    pub summary: ReportSummary,
    pub entries: Vec<ReportEntry>,
    /// Informational lines that do not belong to a file (e.g. "No images found")
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub notes: Vec<String>,
}

/// Parameters describing the run for report metadata
pub struct ReportParams<'a> {
    pub input: &'a Path,
    pub target_format: &'a str,
    pub output_dir: &'a Path,
    pub icon_sizes: Option<String>,
}

impl ConversionReport {
    pub fn new(params: ReportParams<'_>, results: &[ConversionResult], notes: Vec<String>) -> Self {
        let entries: Vec<ReportEntry> = results.iter().map(ReportEntry::from).collect();
        let succeeded = entries.iter().filter(|e| e.success).count();

        Self {
            metadata: ReportMetadata {
                timestamp: Utc::now().to_rfc3339(),
                imgconv_version: env!("CARGO_PKG_VERSION").to_string(),
                input: params.input.display().to_string(),
                target_format: params.target_format.to_string(),
                output_dir: params.output_dir.display().to_string(),
                icon_sizes: params.icon_sizes,
            },
            summary: ReportSummary {
                succeeded,
                failed: entries.len() - succeeded,
            },
            entries,
            notes,
        }
    }
}

/// Write the report as pretty-printed JSON
pub fn export_report(report: &ConversionReport, output_path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(report)
        .context("Failed to serialize conversion report to JSON")?;

    std::fs::write(output_path, json).with_context(|| {
        format!(
            "Failed to write conversion report to {}",
            output_path.display()
        )
    })?;

    Ok(())
}
