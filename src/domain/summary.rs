//! Sync report types
//!
//! Provides structures for tracking patch results at platform and overall levels.

use super::{
    AndroidVersionDescriptor, FileOutcome, IosVersionDescriptor, Platform, SemanticVersion,
};
use crate::error::{PatchError, VersionError};
use serde::Serialize;

/// Values derived for a platform
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Derived {
    Android(AndroidVersionDescriptor),
    Ios(IosVersionDescriptor),
}

/// What happened to a platform as a whole
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlatformStatus {
    /// Versions were derived and the platform files attempted
    Derived(Derived),
    /// Platform was not attempted
    Skipped { reason: String },
    /// Derivation failed; no file of this platform was touched
    Failed(VersionError),
}

/// Result of syncing one platform
#[derive(Debug)]
pub struct PlatformReport {
    pub platform: Platform,
    pub status: PlatformStatus,
    /// Per-file outcomes, in the order the files were attempted
    pub files: Vec<FileOutcome>,
}

impl PlatformReport {
    /// Creates a report for a platform whose versions were derived
    pub fn derived(platform: Platform, derived: Derived) -> Self {
        Self {
            platform,
            status: PlatformStatus::Derived(derived),
            files: Vec::new(),
        }
    }

    /// Creates a report for a skipped platform
    pub fn skipped(platform: Platform, reason: impl Into<String>) -> Self {
        Self {
            platform,
            status: PlatformStatus::Skipped {
                reason: reason.into(),
            },
            files: Vec::new(),
        }
    }

    /// Creates a report for a platform whose derivation failed
    pub fn failed(platform: Platform, error: VersionError) -> Self {
        Self {
            platform,
            status: PlatformStatus::Failed(error),
            files: Vec::new(),
        }
    }

    /// Adds a file outcome
    pub fn add_file(&mut self, outcome: FileOutcome) {
        self.files.push(outcome);
    }

    /// Returns true if the platform was skipped
    pub fn is_skipped(&self) -> bool {
        matches!(self.status, PlatformStatus::Skipped { .. })
    }

    /// Returns true if derivation or any file failed
    pub fn has_failures(&self) -> bool {
        matches!(self.status, PlatformStatus::Failed(_))
            || self.files.iter().any(|f| f.result.is_err())
    }

    /// Number of files with at least one changed field
    pub fn files_changed(&self) -> usize {
        self.files.iter().filter(|f| f.has_changes()).count()
    }

    /// Number of changed fields across all files
    pub fn total_changes(&self) -> usize {
        self.files
            .iter()
            .filter_map(|f| f.result.as_ref().ok())
            .map(|r| r.change_count())
            .sum()
    }
}

/// Overall summary of a sync run
#[derive(Debug)]
pub struct SyncReport {
    /// Version the run synced to
    pub version: SemanticVersion,
    /// Reports for each selected platform
    pub platforms: Vec<PlatformReport>,
    /// Whether this was a dry run
    pub dry_run: bool,
}

impl SyncReport {
    /// Creates a new SyncReport
    pub fn new(version: SemanticVersion, dry_run: bool) -> Self {
        Self {
            version,
            platforms: Vec::new(),
            dry_run,
        }
    }

    /// Adds a platform report
    pub fn add_platform(&mut self, report: PlatformReport) {
        self.platforms.push(report);
    }

    /// Returns the report for a platform
    pub fn platform(&self, platform: Platform) -> Option<&PlatformReport> {
        self.platforms.iter().find(|p| p.platform == platform)
    }

    /// Returns all file outcomes across platforms
    pub fn files(&self) -> impl Iterator<Item = &FileOutcome> {
        self.platforms.iter().flat_map(|p| p.files.iter())
    }

    /// Number of files with at least one changed field
    pub fn files_changed(&self) -> usize {
        self.platforms.iter().map(|p| p.files_changed()).sum()
    }

    /// Number of changed fields across all files
    pub fn total_changes(&self) -> usize {
        self.platforms.iter().map(|p| p.total_changes()).sum()
    }

    /// Returns true if any platform or file failed
    pub fn has_failures(&self) -> bool {
        self.platforms.iter().any(|p| p.has_failures())
    }

    /// Returns every file error
    pub fn file_errors(&self) -> impl Iterator<Item = &PatchError> {
        self.files().filter_map(|f| f.error())
    }

    /// Returns the derivation error of each failed platform
    pub fn platform_errors(&self) -> impl Iterator<Item = (Platform, &VersionError)> {
        self.platforms.iter().filter_map(|p| match &p.status {
            PlatformStatus::Failed(e) => Some((p.platform, e)),
            _ => None,
        })
    }

    /// Number of failed platforms and files
    pub fn error_count(&self) -> usize {
        self.platform_errors().count() + self.file_errors().count()
    }

    /// Describes every failure, platform errors first
    pub fn error_messages(&self) -> Vec<String> {
        self.platform_errors()
            .map(|(platform, e)| format!("{}: {}", platform, e))
            .chain(self.file_errors().map(|e| e.to_string()))
            .collect()
    }
}
