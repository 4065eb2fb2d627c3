//! Target file read-modify-write
//!
//! This module provides:
//! - PatchWriter for applying a patcher to one file on disk
//! - Dry-run mode support (no actual file modifications)
//! - No-op writes: a file is only rewritten when its content changes

use super::FilePatcher;
use crate::domain::PatchResult;
use crate::error::PatchError;
use std::fs;
use std::path::Path;

/// Writer that applies a patcher to a file on disk
#[derive(Debug, Clone, Copy, Default)]
pub struct PatchWriter {
    /// Whether to run in dry-run mode (no file modifications)
    dry_run: bool,
}

impl PatchWriter {
    /// Create a new PatchWriter
    pub fn new(dry_run: bool) -> Self {
        Self { dry_run }
    }

    /// Read `path`, patch it, and write it back if anything changed
    pub fn apply(
        &self,
        path: &Path,
        patcher: &dyn FilePatcher,
    ) -> Result<PatchResult, PatchError> {
        if !path.is_file() {
            return Err(PatchError::file_not_found(path));
        }

        let bytes = fs::read(path).map_err(|e| PatchError::read_error(path, e))?;
        let content = String::from_utf8(bytes).map_err(|_| patcher.invalid_encoding(path))?;

        let patched = patcher.patch_content(path, &content)?;
        let mut result = PatchResult::new(path, patched.changes);

        if patched.content != content && !self.dry_run {
            write_target(path, &patched.content)?;
            result.written = true;
        }

        Ok(result)
    }
}

/// Write content to a target file
pub fn write_target(path: &Path, content: &str) -> Result<(), PatchError> {
    fs::write(path, content).map_err(|e| PatchError::write_error(path, e))
}
