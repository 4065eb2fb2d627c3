//! Per-file patch result types

use super::TargetFile;
use crate::error::PatchError;
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};

/// A single version field located in a target file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldChange {
    /// Field name, e.g. "versionCode" or "CFBundleVersion"
    pub field: String,
    /// Value found in the file (the first one when there are several occurrences)
    pub old_value: String,
    /// Value written
    pub new_value: String,
    /// Number of occurrences rewritten
    pub occurrences: usize,
    /// Whether any occurrence held a different value
    pub changed: bool,
}

impl FieldChange {
    /// Creates a FieldChange for one occurrence
    pub fn new(
        field: impl Into<String>,
        old_value: impl Into<String>,
        new_value: impl Into<String>,
    ) -> Self {
        let old_value = old_value.into();
        let new_value = new_value.into();
        let changed = old_value != new_value;
        Self {
            field: field.into(),
            old_value,
            new_value,
            occurrences: 1,
            changed,
        }
    }

    /// Folds another occurrence of the same field into this change
    pub fn record_occurrence(&mut self, old_value: &str) {
        self.occurrences += 1;
        if old_value != self.new_value {
            self.changed = true;
        }
    }
}

impl fmt::Display for FieldChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.changed {
            write!(f, "{}: {} → {}", self.field, self.old_value, self.new_value)?;
        } else {
            write!(f, "{}: {} (unchanged)", self.field, self.new_value)?;
        }
        if self.occurrences > 1 {
            write!(f, " ×{}", self.occurrences)?;
        }
        Ok(())
    }
}

/// Result of patching one target file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PatchResult {
    /// Path to the patched file
    pub path: PathBuf,
    /// Fields located in the file
    pub changes: Vec<FieldChange>,
    /// Whether the file was actually written
    pub written: bool,
}

impl PatchResult {
    /// Creates a new PatchResult
    pub fn new(path: impl Into<PathBuf>, changes: Vec<FieldChange>) -> Self {
        Self {
            path: path.into(),
            changes,
            written: false,
        }
    }

    /// Returns true if any field value differs from the derived one
    pub fn has_changes(&self) -> bool {
        self.changes.iter().any(|c| c.changed)
    }

    /// Number of fields whose value changed
    pub fn change_count(&self) -> usize {
        self.changes.iter().filter(|c| c.changed).count()
    }

    /// Looks up the change for a field
    pub fn field(&self, name: &str) -> Option<&FieldChange> {
        self.changes.iter().find(|c| c.field == name)
    }
}

/// Outcome of one target file in a sync run
#[derive(Debug)]
pub struct FileOutcome {
    pub target: TargetFile,
    pub result: Result<PatchResult, PatchError>,
}

impl FileOutcome {
    /// Creates a successful outcome
    pub fn patched(target: TargetFile, result: PatchResult) -> Self {
        Self {
            target,
            result: Ok(result),
        }
    }

    /// Creates a failed outcome
    pub fn failed(target: TargetFile, error: PatchError) -> Self {
        Self {
            target,
            result: Err(error),
        }
    }

    /// Returns the path of the target file
    pub fn path(&self) -> &Path {
        &self.target.path
    }

    /// Returns true if the file had at least one changed field
    pub fn has_changes(&self) -> bool {
        self.result.as_ref().is_ok_and(|r| r.has_changes())
    }

    /// Returns the error if patching failed
    pub fn error(&self) -> Option<&PatchError> {
        self.result.as_ref().err()
    }

    /// Returns true if the target file existed when it was patched
    pub fn found(&self) -> bool {
        !matches!(self.result, Err(PatchError::FileNotFound { .. }))
    }
}
