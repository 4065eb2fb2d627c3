//! Diff output formatter for showing changes
//!
//! This module provides:
//! - Unified diff style display per target file
//! - Before/after value for each changed field

use crate::domain::{FileOutcome, PlatformReport, PlatformStatus, SyncReport};
use crate::output::OutputFormatter;
use std::io::Write;

/// Diff formatter for showing field changes
pub struct DiffFormatter {
    /// Whether this is a dry-run
    dry_run: bool,
}

impl DiffFormatter {
    /// Create a new diff formatter
    pub fn new(dry_run: bool) -> Self {
        Self { dry_run }
    }

    /// Get the dry-run prefix if applicable
    fn dry_run_prefix(&self) -> &'static str {
        if self.dry_run {
            "(dry-run) "
        } else {
            ""
        }
    }

    fn format_file(&self, file: &FileOutcome, writer: &mut dyn Write) -> std::io::Result<()> {
        let prefix = self.dry_run_prefix();
        let path = file.path().display();

        match &file.result {
            Ok(result) if result.has_changes() => {
                writeln!(writer, "{}--- a/{}", prefix, path)?;
                writeln!(writer, "{}+++ b/{}", prefix, path)?;
                for change in result.changes.iter().filter(|c| c.changed) {
                    if change.occurrences > 1 {
                        writeln!(writer, "@@ {} ({} occurrences) @@", change.field, change.occurrences)?;
                    } else {
                        writeln!(writer, "@@ {} @@", change.field)?;
                    }
                    writeln!(writer, "-{} = {}", change.field, change.old_value)?;
                    writeln!(writer, "+{} = {}", change.field, change.new_value)?;
                }
                writeln!(writer)
            }
            Ok(_) => Ok(()),
            Err(e) => {
                writeln!(writer, "# error: {}", e)?;
                writeln!(writer)
            }
        }
    }
}

impl OutputFormatter for DiffFormatter {
    fn format(&self, report: &SyncReport, writer: &mut dyn Write) -> std::io::Result<()> {
        for platform in &report.platforms {
            self.format_platform(platform, writer)?;
        }

        // Write summary at the end
        let verb = if self.dry_run { "would be" } else { "were" };
        writeln!(
            writer,
            "{}# {} file(s) {} updated to {}",
            self.dry_run_prefix(),
            report.files_changed(),
            verb,
            report.version
        )?;

        Ok(())
    }

    fn format_platform(
        &self,
        platform: &PlatformReport,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        match &platform.status {
            PlatformStatus::Skipped { reason } => {
                writeln!(writer, "# {} skipped: {}", platform.platform, reason)?;
                writeln!(writer)
            }
            PlatformStatus::Failed(e) => {
                writeln!(writer, "# {} failed: {}", platform.platform, e)?;
                writeln!(writer)
            }
            PlatformStatus::Derived(_) => {
                for file in &platform.files {
                    self.format_file(file, writer)?;
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::fixtures::sample_report;

    fn render(dry_run: bool) -> String {
        let mut out = Vec::new();
        DiffFormatter::new(dry_run)
            .format(&sample_report(dry_run), &mut out)
            .unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_diff_format() {
        let output = render(false);
        assert!(output.contains("--- a/android/app/build.gradle\n+++ b/android/app/build.gradle\n"));
        assert!(output.contains("@@ versionCode @@\n-versionCode = 1\n+versionCode = 1002003\n"));
        assert!(output.contains("@@ MARKETING_VERSION (2 occurrences) @@\n"));
        assert!(output.contains("# error: field 'CFBundleVersion' not found"));
        assert!(output.ends_with("# 3 file(s) were updated to 1.2.3\n"));
    }

    #[test]
    fn test_diff_skips_unchanged_fields() {
        let output = render(false);
        assert!(!output.contains("CFBundleShortVersionString"));
    }

    #[test]
    fn test_diff_dry_run() {
        let output = render(true);
        assert!(output.contains("(dry-run) --- a/android/app/build.gradle"));
        assert!(output.ends_with("(dry-run) # 3 file(s) would be updated to 1.2.3\n"));
    }
}
