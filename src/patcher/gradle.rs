//! Gradle build file patcher for Android projects
//!
//! Handles:
//! - build.gradle (Groovy DSL): `versionCode 7`, `versionName "1.0"`
//! - build.gradle.kts (Kotlin DSL): `versionCode = 7`, `versionName = "1.0"`
//! - Declarations scoped to the `defaultConfig { }` block when it exists
//! - Single or double quoted version names (quote style preserved)

use super::{matching_brace, record_change, splice, Edit, FilePatcher, Patched};
use crate::domain::{AndroidVersionDescriptor, TargetKind};
use crate::error::PatchError;
use regex::{Captures, Regex};
use std::ops::Range;
use std::path::Path;
use std::sync::LazyLock;

pub(crate) const VERSION_CODE: &str = "versionCode";
pub(crate) const VERSION_NAME: &str = "versionName";

// defaultConfig { at line start or after `{` / `;`
static DEFAULT_CONFIG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)(?:^|[{;])[ \t]*defaultConfig[ \t]*\{").expect("hardcoded regex must compile")
});

// versionCode 7 / versionCode = 7 at line start or after `{` / `;`
static VERSION_CODE_DECL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)(?:^|[{;])[ \t]*versionCode(?:[ \t]*=[ \t]*|[ \t]+)([^\s;/}]+)")
        .expect("hardcoded regex must compile")
});

// versionName "1.0" / versionName = '1.0' at line start or after `{` / `;`
static VERSION_NAME_DECL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?m)(?:^|[{;])[ \t]*versionName(?:[ \t]*=[ \t]*|[ \t]+)(?:"([^"\n]*)"|'([^'\n]*)'|([^\s;/}]+))"#)
        .expect("hardcoded regex must compile")
});

/// First match of `re` in `body` that is not inside a `//` line comment
fn first_declaration<'h>(re: &Regex, body: &'h str) -> Option<Captures<'h>> {
    re.captures_iter(body).find(|caps| {
        let start = caps.get(0).map_or(0, |m| m.start());
        let line_start = body[..start].rfind('\n').map_or(0, |i| i + 1);
        !body[line_start..start].contains("//")
    })
}

/// Patcher for build.gradle and build.gradle.kts files
pub struct GradlePatcher {
    version_name: String,
    version_code: String,
}

impl GradlePatcher {
    /// Create a patcher writing the given descriptor
    pub fn new(descriptor: &AndroidVersionDescriptor) -> Self {
        Self {
            version_name: descriptor.version_name.clone(),
            version_code: descriptor.version_code.to_string(),
        }
    }

    /// Byte range the declarations are searched in
    fn scope(content: &str) -> Range<usize> {
        DEFAULT_CONFIG
            .find(content)
            .and_then(|m| {
                let open = m.end() - 1;
                matching_brace(content, open, b"\"'").map(|close| open + 1..close)
            })
            .unwrap_or(0..content.len())
    }
}

impl FilePatcher for GradlePatcher {
    fn patch_content(&self, path: &Path, content: &str) -> Result<Patched, PatchError> {
        let scope = Self::scope(content);
        let body = &content[scope.clone()];
        let mut edits = Vec::new();
        let mut changes = Vec::new();

        let name = first_declaration(&VERSION_NAME_DECL, body)
            .ok_or_else(|| PatchError::field_not_found(path, VERSION_NAME))?;
        let value = match (name.get(1), name.get(2)) {
            (Some(m), _) | (None, Some(m)) => m,
            (None, None) => {
                let raw = name.get(3).map(|m| m.as_str()).unwrap_or_default();
                return Err(PatchError::UnexpectedValue {
                    path: path.to_path_buf(),
                    field: VERSION_NAME.to_string(),
                    message: format!("expected a string literal, found '{}'", raw),
                });
            }
        };
        record_change(&mut changes, VERSION_NAME, value.as_str(), &self.version_name);
        edits.push(Edit::new(
            scope.start + value.start()..scope.start + value.end(),
            self.version_name.as_str(),
        ));

        let code = first_declaration(&VERSION_CODE_DECL, body)
            .and_then(|c| c.get(1))
            .ok_or_else(|| PatchError::field_not_found(path, VERSION_CODE))?;
        if !code.as_str().bytes().all(|b| b.is_ascii_digit()) {
            return Err(PatchError::UnexpectedValue {
                path: path.to_path_buf(),
                field: VERSION_CODE.to_string(),
                message: format!("expected an integer literal, found '{}'", code.as_str()),
            });
        }
        record_change(&mut changes, VERSION_CODE, code.as_str(), &self.version_code);
        edits.push(Edit::new(
            scope.start + code.start()..scope.start + code.end(),
            self.version_code.as_str(),
        ));

        Ok(Patched {
            content: splice(content, edits),
            changes,
        })
    }

    fn kind(&self) -> TargetKind {
        TargetKind::Gradle
    }
}
