//! Xcode project.pbxproj patcher
//!
//! Build settings are repeated once per build configuration and target, so every
//! `MARKETING_VERSION` and `CURRENT_PROJECT_VERSION` assignment in the file is rewritten
//! to the same value. Quoted values stay quoted.

use super::{matching_brace, record_change, splice, Edit, FilePatcher, Patched};
use crate::domain::{IosVersionDescriptor, TargetKind};
use crate::error::PatchError;
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

pub(crate) const MARKETING_VERSION: &str = "MARKETING_VERSION";
pub(crate) const CURRENT_PROJECT_VERSION: &str = "CURRENT_PROJECT_VERSION";

const UTF8_HEADER: &str = "// !$*UTF8*$!";

// MARKETING_VERSION = 1.0; / CURRENT_PROJECT_VERSION = "1";
static VERSION_SETTING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?m)^[ \t]*(MARKETING_VERSION|CURRENT_PROJECT_VERSION)[ \t]*=[ \t]*(?:"((?:[^"\\\n]|\\.)*)"|([^;\s"]+))[ \t]*;"#,
    )
    .expect("hardcoded regex must compile")
});

/// Patcher for Xcode project.pbxproj files
pub struct ProjectPatcher {
    marketing_version: String,
    build_version: String,
}

impl ProjectPatcher {
    /// Create a patcher writing the given descriptor
    pub fn new(descriptor: &IosVersionDescriptor) -> Self {
        Self {
            marketing_version: descriptor.marketing_version.clone(),
            build_version: descriptor.build_version.clone(),
        }
    }

    fn value_for(&self, setting: &str) -> &str {
        if setting == MARKETING_VERSION {
            &self.marketing_version
        } else {
            &self.build_version
        }
    }

    /// Checks that the content is a `{ ... }` OpenStep plist, optionally after the UTF-8 header
    fn check_structure(path: &Path, content: &str) -> Result<(), PatchError> {
        let body = content.trim_start_matches('\u{feff}');
        let body = body.strip_prefix(UTF8_HEADER).unwrap_or(body);
        let offset = content.len() - body.len();
        let trimmed_start = body.len() - body.trim_start().len();
        let open = offset + trimmed_start;

        if !content[open..].starts_with('{') {
            return Err(PatchError::malformed_project(
                path,
                "expected the project to start with '{'",
            ));
        }

        let close = matching_brace(content, open, b"\"").ok_or_else(|| {
            PatchError::malformed_project(path, "unbalanced braces in project file")
        })?;
        if !content[close + 1..].trim().is_empty() {
            return Err(PatchError::malformed_project(
                path,
                "unexpected content after the root object",
            ));
        }
        Ok(())
    }
}

impl FilePatcher for ProjectPatcher {
    fn patch_content(&self, path: &Path, content: &str) -> Result<Patched, PatchError> {
        Self::check_structure(path, content)?;

        let mut edits = Vec::new();
        let mut changes = Vec::new();

        for caps in VERSION_SETTING.captures_iter(content) {
            let Some(setting) = caps.get(1) else {
                continue;
            };
            let new_value = self.value_for(setting.as_str());

            if let Some(quoted) = caps.get(2) {
                record_change(&mut changes, setting.as_str(), quoted.as_str(), new_value);
                edits.push(Edit::new(quoted.range(), new_value));
            } else if let Some(bare) = caps.get(3) {
                record_change(&mut changes, setting.as_str(), bare.as_str(), new_value);
                edits.push(Edit::new(bare.range(), quote_if_needed(new_value)));
            }
        }

        if changes.is_empty() {
            return Err(PatchError::field_not_found(path, MARKETING_VERSION));
        }

        Ok(Patched {
            content: splice(content, edits),
            changes,
        })
    }

    fn kind(&self) -> TargetKind {
        TargetKind::ProjectDescriptor
    }
}

/// Values outside the unquoted-string alphabet of OpenStep plists need quotes
fn quote_if_needed(value: &str) -> String {
    let bare = !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-' | '/' | '$'));
    if bare {
        value.to_string()
    } else {
        format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\""))
    }
}
