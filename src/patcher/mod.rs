//! Version field patchers for native project files
//!
//! This module provides:
//! - The `FilePatcher` trait implemented per file format
//! - Gradle, plist and Xcode project patchers
//! - `PatchWriter`, which owns the read-modify-write cycle of one file
//!
//! Patchers never re-serialize a file. They locate the byte span of each value token and
//! splice the new value in, so every other byte of the file is left as it was.

mod gradle;
mod pbxproj;
mod plist;
mod writer;

pub use gradle::GradlePatcher;
pub use pbxproj::ProjectPatcher;
pub use plist::PlistPatcher;
pub use writer::{write_target, PatchWriter};

use crate::domain::{
    AndroidVersionDescriptor, FieldChange, IosVersionDescriptor, PatchResult, TargetKind,
};
use crate::error::PatchError;
use std::ops::Range;
use std::path::Path;

/// Patched content together with the fields that were located
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Patched {
    pub content: String,
    pub changes: Vec<FieldChange>,
}

/// Trait for rewriting version fields in one file format
pub trait FilePatcher {
    /// Rewrite the version fields in `content`; `path` is only used for error reporting
    fn patch_content(&self, path: &Path, content: &str) -> Result<Patched, PatchError>;

    /// Returns the file format this patcher handles
    fn kind(&self) -> TargetKind;

    /// Error for a file that is not valid UTF-8 text
    fn invalid_encoding(&self, path: &Path) -> PatchError {
        PatchError::read_error(
            path,
            std::io::Error::new(std::io::ErrorKind::InvalidData, "file is not valid UTF-8"),
        )
    }
}

/// A replacement of one byte range of the original content
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Edit {
    pub range: Range<usize>,
    pub replacement: String,
}

impl Edit {
    pub fn new(range: Range<usize>, replacement: impl Into<String>) -> Self {
        Self {
            range,
            replacement: replacement.into(),
        }
    }
}

/// Apply non-overlapping edits to `content`
pub(crate) fn splice(content: &str, mut edits: Vec<Edit>) -> String {
    edits.sort_by_key(|e| e.range.start);

    let mut out = String::with_capacity(content.len());
    let mut cursor = 0;
    for edit in edits {
        debug_assert!(edit.range.start >= cursor, "overlapping edits");
        out.push_str(&content[cursor..edit.range.start]);
        out.push_str(&edit.replacement);
        cursor = edit.range.end;
    }
    out.push_str(&content[cursor..]);
    out
}

/// Record one located occurrence of `field`, merging repeated fields into one change
pub(crate) fn record_change(
    changes: &mut Vec<FieldChange>,
    field: &str,
    old_value: &str,
    new_value: &str,
) {
    match changes.iter_mut().find(|c| c.field == field) {
        Some(change) => change.record_occurrence(old_value),
        None => changes.push(FieldChange::new(field, old_value, new_value)),
    }
}

/// Find the index of the `}` closing the `{` at `open`
///
/// Skips `//` and `/* */` comments and string literals delimited by any of `quotes`
/// (with backslash escapes).
pub(crate) fn matching_brace(text: &str, open: usize, quotes: &[u8]) -> Option<usize> {
    let bytes = text.as_bytes();
    if bytes.get(open) != Some(&b'{') {
        return None;
    }

    let mut depth = 0usize;
    let mut i = open;
    while i < bytes.len() {
        match bytes[i] {
            b'/' if bytes.get(i + 1) == Some(&b'/') => {
                while i < bytes.len() && bytes[i] != b'\n' {
                    i += 1;
                }
                continue;
            }
            b'/' if bytes.get(i + 1) == Some(&b'*') => {
                i += 2;
                while i + 1 < bytes.len() && !(bytes[i] == b'*' && bytes[i + 1] == b'/') {
                    i += 1;
                }
                i += 2;
                continue;
            }
            q if quotes.contains(&q) => {
                i += 1;
                while i < bytes.len() && bytes[i] != q {
                    if bytes[i] == b'\\' {
                        i += 1;
                    }
                    i += 1;
                }
            }
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
        i += 1;
    }
    None
}

/// Patch the version fields of an Android Gradle build file
pub fn patch_gradle(
    path: &Path,
    descriptor: &AndroidVersionDescriptor,
) -> Result<PatchResult, PatchError> {
    PatchWriter::new(false).apply(path, &GradlePatcher::new(descriptor))
}

/// Patch CFBundleShortVersionString / CFBundleVersion of an iOS plist
pub fn patch_plist(
    path: &Path,
    descriptor: &IosVersionDescriptor,
) -> Result<PatchResult, PatchError> {
    PatchWriter::new(false).apply(path, &PlistPatcher::new(descriptor))
}

/// Patch every MARKETING_VERSION / CURRENT_PROJECT_VERSION of an Xcode project
pub fn patch_project_descriptor(
    path: &Path,
    descriptor: &IosVersionDescriptor,
) -> Result<PatchResult, PatchError> {
    PatchWriter::new(false).apply(path, &ProjectPatcher::new(descriptor))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_splice_out_of_order_edits() {
        let content = "a=1; b=2; c=3;";
        let result = splice(
            content,
            vec![Edit::new(12..13, "30"), Edit::new(2..3, "10")],
        );
        assert_eq!(result, "a=10; b=2; c=30;");
    }

    #[test]
    fn test_splice_no_edits() {
        assert_eq!(splice("unchanged", Vec::new()), "unchanged");
    }

    #[test]
    fn test_record_change_merges_occurrences() {
        let mut changes = Vec::new();
        record_change(&mut changes, "MARKETING_VERSION", "1.0", "2.0.0");
        record_change(&mut changes, "MARKETING_VERSION", "2.0.0", "2.0.0");
        record_change(&mut changes, "CURRENT_PROJECT_VERSION", "1", "2.0.0");

        assert_eq!(changes.len(), 2);
        assert_eq!(changes[0].occurrences, 2);
        assert_eq!(changes[0].old_value, "1.0");
        assert!(changes[0].changed);
    }

    #[test]
    fn test_matching_brace_nested() {
        let text = "x { a { b } c }";
        assert_eq!(matching_brace(text, 2, b"\""), Some(14));
        assert_eq!(matching_brace(text, 6, b"\""), Some(10));
    }

    #[test]
    fn test_matching_brace_skips_strings_and_comments() {
        let text = "{ s = \"}\"; // }\n /* } */ t = '}' }";
        assert_eq!(matching_brace(text, 0, b"\"'"), Some(text.len() - 1));
    }

    #[test]
    fn test_matching_brace_unbalanced() {
        assert_eq!(matching_brace("{ { }", 0, b"\""), None);
        assert_eq!(matching_brace("no brace", 0, b"\""), None);
    }
}
