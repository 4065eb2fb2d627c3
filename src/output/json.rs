//! JSON output formatter for machine processing
//!
//! This module provides:
//! - JSON serialization of sync reports
//! - Structured platform-by-platform and file-by-file results

use crate::domain::{Derived, FieldChange, FileOutcome, PlatformReport, PlatformStatus, SyncReport};
use crate::output::{OutputFormatter, Verbosity};
use serde::Serialize;
use std::io::Write;

/// JSON formatter for machine-readable output
pub struct JsonFormatter {
    /// Quiet output omits per-file results
    verbosity: Verbosity,
}

impl JsonFormatter {
    /// Create a new JSON formatter
    pub fn new(verbosity: Verbosity) -> Self {
        Self { verbosity }
    }
}

/// JSON representation of the full report
#[derive(Serialize)]
struct JsonOutput<'a> {
    /// Version synced to
    version: String,
    /// Whether this was a dry-run
    dry_run: bool,
    /// Summary statistics
    summary: JsonSummary,
    /// Per-platform results
    platforms: Vec<JsonPlatform<'a>>,
}

/// JSON representation of summary statistics
#[derive(Serialize)]
struct JsonSummary {
    /// Files with at least one changed field
    files_changed: usize,
    /// Changed fields across all files
    changes: usize,
    /// Failed platforms and files
    errors: usize,
}

/// JSON representation of a platform report
#[derive(Serialize)]
struct JsonPlatform<'a> {
    platform: &'static str,
    /// "synced", "skipped" or "failed"
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    derived: Option<&'a Derived>,
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    files: Vec<JsonFile<'a>>,
}

/// JSON representation of one file outcome
#[derive(Serialize)]
struct JsonFile<'a> {
    path: String,
    kind: &'static str,
    found: bool,
    written: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    changes: Option<&'a [FieldChange]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl JsonFormatter {
    fn file_to_json(file: &FileOutcome) -> JsonFile<'_> {
        let (written, changes, error) = match &file.result {
            Ok(result) => (result.written, Some(result.changes.as_slice()), None),
            Err(e) => (false, None, Some(e.to_string())),
        };
        JsonFile {
            path: file.path().display().to_string(),
            kind: file.target.kind.label(),
            found: file.found(),
            written,
            changes,
            error,
        }
    }

    fn platform_to_json<'a>(&self, platform: &'a PlatformReport) -> JsonPlatform<'a> {
        let files = if self.verbosity == Verbosity::Quiet {
            Vec::new()
        } else {
            platform.files.iter().map(Self::file_to_json).collect()
        };

        let (status, derived, reason, error) = match &platform.status {
            PlatformStatus::Derived(d) => ("synced", Some(d), None, None),
            PlatformStatus::Skipped { reason } => ("skipped", None, Some(reason.clone()), None),
            PlatformStatus::Failed(e) => ("failed", None, None, Some(e.to_string())),
        };

        JsonPlatform {
            platform: platform.platform.project_dir(),
            status,
            derived,
            reason,
            error,
            files,
        }
    }

    fn report_to_json<'a>(&self, report: &'a SyncReport) -> JsonOutput<'a> {
        JsonOutput {
            version: report.version.to_string(),
            dry_run: report.dry_run,
            summary: JsonSummary {
                files_changed: report.files_changed(),
                changes: report.total_changes(),
                errors: report.error_count(),
            },
            platforms: report
                .platforms
                .iter()
                .map(|p| self.platform_to_json(p))
                .collect(),
        }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format(&self, report: &SyncReport, writer: &mut dyn Write) -> std::io::Result<()> {
        let output = self.report_to_json(report);
        serde_json::to_writer_pretty(&mut *writer, &output)?;
        writeln!(writer)
    }

    fn format_platform(
        &self,
        platform: &PlatformReport,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        let output = self.platform_to_json(platform);
        serde_json::to_writer_pretty(&mut *writer, &output)?;
        writeln!(writer)
    }
}
