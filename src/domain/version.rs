//! Version value types: the source semantic version and the per-platform descriptors

use serde::Serialize;
use std::fmt;

/// A parsed semantic version (major.minor.patch[-prerelease][+build])
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct SemanticVersion {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
    /// Dot-separated prerelease identifiers, e.g. ["beta", "1"]
    pub prerelease: Vec<String>,
    /// Dot-separated build metadata identifiers
    pub build_metadata: Vec<String>,
}

impl SemanticVersion {
    /// Creates a release version without prerelease or build metadata
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            major,
            minor,
            patch,
            prerelease: Vec::new(),
            build_metadata: Vec::new(),
        }
    }

    /// Returns the release triple used for ordering and derivation
    pub fn release(&self) -> (u64, u64, u64) {
        (self.major, self.minor, self.patch)
    }

    /// Returns "{major}.{minor}.{patch}"
    pub fn release_string(&self) -> String {
        format!("{}.{}.{}", self.major, self.minor, self.patch)
    }

    /// Returns true if the version carries prerelease identifiers
    pub fn is_prerelease(&self) -> bool {
        !self.prerelease.is_empty()
    }
}

impl fmt::Display for SemanticVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if !self.prerelease.is_empty() {
            write!(f, "-{}", self.prerelease.join("."))?;
        }
        if !self.build_metadata.is_empty() {
            write!(f, "+{}", self.build_metadata.join("."))?;
        }
        Ok(())
    }
}

/// Version fields written into the Android Gradle descriptor
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AndroidVersionDescriptor {
    pub version_name: String,
    pub version_code: u64,
}

/// Version fields written into iOS plists and the Xcode project
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IosVersionDescriptor {
    pub marketing_version: String,
    pub build_version: String,
}
