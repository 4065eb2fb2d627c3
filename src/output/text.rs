//! Text output formatter for human-readable display
//!
//! This module provides:
//! - Per-platform header with the derived version values
//! - Per-file status with old → new field values
//! - Skipped platforms and per-file errors
//! - Summary line

use crate::domain::{Derived, FieldChange, FileOutcome, PlatformReport, PlatformStatus, SyncReport};
use crate::output::{OutputFormatter, Verbosity};
use colored::Colorize;
use std::io::Write;

/// Text formatter for human-readable output
pub struct TextFormatter {
    /// Verbosity level
    verbosity: Verbosity,
    /// Whether this is a dry-run
    dry_run: bool,
    /// Whether to use colors
    color: bool,
}

impl TextFormatter {
    /// Create a new text formatter
    pub fn new(verbosity: Verbosity, dry_run: bool) -> Self {
        Self {
            verbosity,
            dry_run,
            color: true,
        }
    }

    /// Create a new text formatter with color option
    pub fn with_color(verbosity: Verbosity, dry_run: bool, color: bool) -> Self {
        Self {
            verbosity,
            dry_run,
            color,
        }
    }

    /// Get the dry-run prefix if applicable
    fn dry_run_prefix(&self) -> String {
        if self.dry_run {
            if self.color {
                format!("{} ", "(dry-run)".cyan())
            } else {
                "(dry-run) ".to_string()
            }
        } else {
            String::new()
        }
    }

    /// Describe the derived values of a platform
    fn describe_derived(derived: &Derived) -> String {
        match derived {
            Derived::Android(d) => {
                format!("versionName {}, versionCode {}", d.version_name, d.version_code)
            }
            Derived::Ios(d) => format!(
                "marketing {}, build {}",
                d.marketing_version, d.build_version
            ),
        }
    }

    fn format_header(
        &self,
        platform: &PlatformReport,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        let name = platform.platform.display_name();
        match &platform.status {
            PlatformStatus::Derived(derived) => {
                let detail = Self::describe_derived(derived);
                if self.color {
                    writeln!(writer, "{} {}", name.bold(), format!("({})", detail).dimmed())
                } else {
                    writeln!(writer, "{} ({})", name, detail)
                }
            }
            PlatformStatus::Skipped { reason } => {
                if self.color {
                    writeln!(writer, "{} {}", name.bold(), format!("skipped: {}", reason).dimmed())
                } else {
                    writeln!(writer, "{} skipped: {}", name, reason)
                }
            }
            PlatformStatus::Failed(error) => {
                if self.color {
                    writeln!(writer, "{} {} {}", name.bold(), "✗".red(), error)
                } else {
                    writeln!(writer, "{} failed: {}", name, error)
                }
            }
        }
    }

    fn format_change(&self, change: &FieldChange, writer: &mut dyn Write) -> std::io::Result<()> {
        let times = if change.occurrences > 1 {
            format!(" (×{})", change.occurrences)
        } else {
            String::new()
        };

        if self.color {
            if change.changed {
                writeln!(
                    writer,
                    "      {} {} {} {}{}",
                    format!("{}:", change.field),
                    change.old_value.dimmed(),
                    "→".dimmed(),
                    change.new_value.bright_white().bold(),
                    times.dimmed()
                )
            } else {
                writeln!(
                    writer,
                    "      {}",
                    format!("{}: {} (unchanged){}", change.field, change.new_value, times)
                        .dimmed()
                )
            }
        } else if change.changed {
            writeln!(
                writer,
                "      {}: {} -> {}{}",
                change.field, change.old_value, change.new_value, times
            )
        } else {
            writeln!(
                writer,
                "      {}: {} (unchanged){}",
                change.field, change.new_value, times
            )
        }
    }

    fn format_file(&self, file: &FileOutcome, writer: &mut dyn Write) -> std::io::Result<()> {
        let path = file.path().display().to_string();

        match &file.result {
            Ok(result) if result.has_changes() => {
                if self.color {
                    writeln!(writer, "  {} {}", "✓".green(), path.bold())?;
                } else {
                    writeln!(writer, "  + {}", path)?;
                }
                for change in &result.changes {
                    if change.changed || self.verbosity == Verbosity::Verbose {
                        self.format_change(change, writer)?;
                    }
                }
                Ok(())
            }
            Ok(result) => {
                if self.color {
                    writeln!(writer, "  {} {}", "=".dimmed(), format!("{} (up to date)", path).dimmed())?;
                } else {
                    writeln!(writer, "  = {} (up to date)", path)?;
                }
                if self.verbosity == Verbosity::Verbose {
                    for change in &result.changes {
                        self.format_change(change, writer)?;
                    }
                }
                Ok(())
            }
            Err(error) => {
                if self.color {
                    writeln!(writer, "  {} {}", "✗".red(), path.bold())?;
                    writeln!(writer, "      {}", error.to_string().red())
                } else {
                    writeln!(writer, "  ! {}", path)?;
                    writeln!(writer, "      {}", error)
                }
            }
        }
    }

    fn format_summary(&self, report: &SyncReport, writer: &mut dyn Write) -> std::io::Result<()> {
        let prefix = self.dry_run_prefix();
        let files = report.files_changed();
        let changes = report.total_changes();
        let failures = report.error_count();

        if self.verbosity == Verbosity::Quiet {
            let status = if files > 0 {
                format!("{} file(s) updated to {}", files, report.version)
            } else {
                format!("Already at {}", report.version)
            };
            write!(writer, "{}{}", prefix, status)?;
            if failures > 0 {
                if self.color {
                    write!(writer, ", {}", format!("{} error(s)", failures).red())?;
                } else {
                    write!(writer, ", {} error(s)", failures)?;
                }
            }
            return writeln!(writer);
        }

        if self.color {
            writeln!(writer, "{}{}:", prefix, "Summary".bold())?;
            writeln!(
                writer,
                "  {} file(s) updated, {} field(s) changed",
                files.to_string().green(),
                changes.to_string().green()
            )?;
            if failures > 0 {
                writeln!(writer, "  {} error(s)", failures.to_string().red())?;
            }
        } else {
            writeln!(writer, "{}Summary:", prefix)?;
            writeln!(
                writer,
                "  {} file(s) updated, {} field(s) changed",
                files, changes
            )?;
            if failures > 0 {
                writeln!(writer, "  {} error(s)", failures)?;
            }
        }
        Ok(())
    }
}

impl OutputFormatter for TextFormatter {
    fn format(&self, report: &SyncReport, writer: &mut dyn Write) -> std::io::Result<()> {
        // In quiet mode, only show summary
        if self.verbosity == Verbosity::Quiet {
            return self.format_summary(report, writer);
        }

        let prefix = self.dry_run_prefix();
        if self.color {
            writeln!(
                writer,
                "{}Syncing version {}",
                prefix,
                report.version.to_string().bright_white().bold()
            )?;
        } else {
            writeln!(writer, "{}Syncing version {}", prefix, report.version)?;
        }
        writeln!(writer)?;

        for platform in &report.platforms {
            self.format_platform(platform, writer)?;
            writeln!(writer)?;
        }

        self.format_summary(report, writer)
    }

    fn format_platform(
        &self,
        platform: &PlatformReport,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        self.format_header(platform, writer)?;
        for file in &platform.files {
            self.format_file(file, writer)?;
        }
        Ok(())
    }
}
