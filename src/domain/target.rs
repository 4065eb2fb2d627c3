//! Target file references

use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};

/// On-disk format of a target file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetKind {
    /// Android build.gradle / build.gradle.kts
    Gradle,
    /// iOS XML property list
    Plist,
    /// Xcode project.pbxproj
    ProjectDescriptor,
}

impl TargetKind {
    /// Detects the format from the file name
    pub fn detect(path: &Path) -> Option<Self> {
        let name = path.file_name()?.to_str()?;
        if name.ends_with(".gradle") || name.ends_with(".gradle.kts") {
            Some(TargetKind::Gradle)
        } else if name.ends_with(".plist") {
            Some(TargetKind::Plist)
        } else if name.ends_with(".pbxproj") {
            Some(TargetKind::ProjectDescriptor)
        } else {
            None
        }
    }

    /// Short label for output
    pub fn label(&self) -> &'static str {
        match self {
            TargetKind::Gradle => "gradle",
            TargetKind::Plist => "plist",
            TargetKind::ProjectDescriptor => "pbxproj",
        }
    }
}

impl fmt::Display for TargetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A file the patchers operate on; holds no handle between patch calls
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TargetFile {
    pub path: PathBuf,
    pub kind: TargetKind,
}

impl TargetFile {
    /// Creates a new TargetFile
    pub fn new(path: impl Into<PathBuf>, kind: TargetKind) -> Self {
        Self {
            path: path.into(),
            kind,
        }
    }

    /// Creates a TargetFile, detecting the kind from the file name
    pub fn detect(path: impl Into<PathBuf>) -> Option<Self> {
        let path = path.into();
        let kind = TargetKind::detect(&path)?;
        Some(Self { path, kind })
    }
}
